use crate::condition::{ConditionsStatus, DetailedCondition};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An external service the proxy calls out to, such as an authorization
/// server.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema,
)]
#[kube(
    group = "ingress.controller.io",
    version = "v1alpha1",
    kind = "ExtensionService",
    status = "ExtensionServiceStatus",
    shortname = "extensionsvc",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionServiceSpec {
    pub services: Vec<ExtensionServiceTarget>,

    /// `h2` or `h2c`; defaults to `h2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionServiceTarget {
    pub name: String,
    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionServiceStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<DetailedCondition>,
}

impl ConditionsStatus for ExtensionServiceStatus {
    fn conditions(&self) -> &[DetailedCondition] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<DetailedCondition> {
        &mut self.conditions
    }
}
