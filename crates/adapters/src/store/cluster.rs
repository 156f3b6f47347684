// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes-backed store using `kube-rs` dynamic objects.

use async_trait::async_trait;
use dw_core::{
    DevWorkspace, DevWorkspaceTemplate, API_GROUP, API_VERSION, DEVWORKSPACE_KIND,
    DEVWORKSPACE_TEMPLATE_KIND,
};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{
    Api, ApiResource, DeleteParams, DynamicObject, ListParams, Patch, PatchParams, PostParams,
};
use kube::core::{GroupVersionKind, TypeMeta};
use kube::Client;

use super::{DevWorkspaceStore, PatchOp, StoreError};

/// Store talking to the cluster the local kubeconfig (or in-cluster config)
/// points at.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    workspaces: ApiResource,
    templates: ApiResource,
}

impl KubeStore {
    pub async fn new() -> Result<Self, StoreError> {
        let client = Client::try_default()
            .await
            .map_err(|e| StoreError::Api(format!("failed to create kube client: {}", e)))?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        let resource = |kind: &str, plural: &str| {
            ApiResource::from_gvk_with_plural(
                &GroupVersionKind::gvk(API_GROUP, API_VERSION, kind),
                plural,
            )
        };
        Self {
            client,
            workspaces: resource(DEVWORKSPACE_KIND, "devworkspaces"),
            templates: resource(DEVWORKSPACE_TEMPLATE_KIND, "devworkspacetemplates"),
        }
    }

    fn workspace_api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.workspaces)
    }

    fn template_api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.templates)
    }

    /// List items can come back without `apiVersion`/`kind`; restore them
    /// before handing the object to the resource model.
    fn to_workspace(&self, mut obj: DynamicObject) -> Result<DevWorkspace, StoreError> {
        if obj.types.is_none() {
            obj.types = Some(TypeMeta {
                api_version: self.workspaces.api_version.clone(),
                kind: self.workspaces.kind.clone(),
            });
        }
        Ok(DevWorkspace::from_value(serde_json::to_value(obj)?)?)
    }
}

fn api_error(kind: &'static str, namespace: &str, name: &str, e: kube::Error) -> StoreError {
    match e {
        kube::Error::Api(ae) if ae.code == 404 => {
            StoreError::NotFound { kind, namespace: namespace.to_string(), name: name.to_string() }
        }
        kube::Error::Api(ae) if ae.code == 409 => StoreError::Conflict(ae.message),
        e => StoreError::Api(e.to_string()),
    }
}

#[async_trait]
impl DevWorkspaceStore for KubeStore {
    async fn is_enabled(&self) -> Result<bool, StoreError> {
        let groups = self.client.list_api_groups().await.map_err(|e| StoreError::Api(e.to_string()))?;
        Ok(groups.groups.iter().any(|g| g.name == API_GROUP))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<DevWorkspace>, StoreError> {
        let list = self
            .workspace_api(namespace)
            .list(&ListParams::default())
            .await
            .map_err(|e| api_error(DEVWORKSPACE_KIND, namespace, "", e))?;
        list.items.into_iter().map(|obj| self.to_workspace(obj)).collect()
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<DevWorkspace, StoreError> {
        let obj = self
            .workspace_api(namespace)
            .get(name)
            .await
            .map_err(|e| api_error(DEVWORKSPACE_KIND, namespace, name, e))?;
        self.to_workspace(obj)
    }

    async fn create(&self, workspace: &DevWorkspace) -> Result<DevWorkspace, StoreError> {
        let namespace = workspace.namespace();
        let obj: DynamicObject = serde_json::from_value(workspace.to_value()?)?;
        tracing::info!(%namespace, name = %workspace.name(), "creating DevWorkspace");
        let created = self
            .workspace_api(namespace)
            .create(&PostParams::default(), &obj)
            .await
            .map_err(|e| api_error(DEVWORKSPACE_KIND, namespace, workspace.name(), e))?;
        self.to_workspace(created)
    }

    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        ops: &[PatchOp],
    ) -> Result<DevWorkspace, StoreError> {
        let patch = PatchOp::to_json_patch(ops)?;
        tracing::debug!(%namespace, %name, ops = ops.len(), "patching DevWorkspace");
        let patched = self
            .workspace_api(namespace)
            .patch(name, &PatchParams::default(), &Patch::Json::<()>(patch))
            .await
            .map_err(|e| api_error(DEVWORKSPACE_KIND, namespace, name, e))?;
        self.to_workspace(patched)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        tracing::info!(%namespace, %name, "deleting DevWorkspace");
        self.workspace_api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map_err(|e| api_error(DEVWORKSPACE_KIND, namespace, name, e))?;
        Ok(())
    }

    async fn create_template(
        &self,
        template: &DevWorkspaceTemplate,
    ) -> Result<DevWorkspaceTemplate, StoreError> {
        let namespace = template.namespace();
        let obj: DynamicObject = serde_json::from_value(serde_json::to_value(template)?)?;
        tracing::info!(%namespace, name = %template.name(), "creating DevWorkspaceTemplate");
        let created = self
            .template_api(namespace)
            .create(&PostParams::default(), &obj)
            .await
            .map_err(|e| api_error(DEVWORKSPACE_TEMPLATE_KIND, namespace, template.name(), e))?;
        let mut value = serde_json::to_value(created)?;
        if value.get("kind").is_none() {
            value["kind"] = DEVWORKSPACE_TEMPLATE_KIND.into();
            value["apiVersion"] = self.templates.api_version.clone().into();
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn initialize_namespace(&self, namespace: &str) -> Result<(), StoreError> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let existing = namespaces
            .get_opt(namespace)
            .await
            .map_err(|e| api_error("Namespace", "", namespace, e))?;
        if existing.is_some() {
            return Ok(());
        }
        tracing::info!(%namespace, "creating namespace");
        let ns = Namespace {
            metadata: ObjectMeta { name: Some(namespace.to_string()), ..Default::default() },
            ..Default::default()
        };
        namespaces
            .create(&PostParams::default(), &ns)
            .await
            .map_err(|e| api_error("Namespace", "", namespace, e))?;
        Ok(())
    }
}
