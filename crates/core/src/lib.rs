// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dw-core: Resource model for the DevWorkspace lifecycle client

pub mod macros;

pub mod devfile;
pub mod devworkspace;
pub mod error;
pub mod legacy;
pub mod phase;
pub mod plugin;
pub mod status_update;
pub mod storage_type;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use devfile::{json_eq, Component, Devfile, DevfileDocument, EnvVar, DEVFILE_SCHEMA_VERSION};
pub use devworkspace::{
    devfile_to_devworkspace, devworkspace_to_devfile, group_version, DevWorkspace, DevWorkspaceSpec,
    DevWorkspaceStatus, DevWorkspaceTemplate, DevWorkspaceTemplateSpec, PendingDesiredState, API_GROUP,
    API_VERSION, DEVWORKSPACE_KIND, DEVWORKSPACE_TEMPLATE_KIND, NEXT_START_ANNOTATION, ROUTING_CLASS,
    WEB_TERMINAL_LABEL,
};
pub use error::WorkspaceError;
pub use legacy::LegacyWorkspace;
pub use phase::Phase;
pub use plugin::{inject_plugin_env, normalize_plugin_name, ExtraFiles, SidecarPolicy};
pub use status_update::StatusUpdate;
pub use storage_type::StorageType;
pub use view::{Shape, WorkspaceResource, WorkspaceView};
