// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dw watch` - Print reconciliation events until interrupted

use anyhow::Result;
use dw_engine::ChannelCallbacks;

use super::Context;
use crate::output::print_event;

pub async fn handle(ctx: &Context) -> Result<()> {
    let (callbacks, mut events) = ChannelCallbacks::new();
    let config = crate::env::reconcile_config();
    let handle = ctx.client.subscribe_to_namespace(ctx.namespace(), callbacks, config);
    tracing::info!(namespace = %ctx.namespace(), "watching workspaces, Ctrl-C to stop");

    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break Ok(()),
            event = events.recv() => match event {
                Some(event) => {
                    if let Err(e) = print_event(&event, ctx.format) {
                        break Err(e);
                    }
                }
                None => break Ok(()),
            },
        }
    };

    handle.shutdown().await;
    result
}
