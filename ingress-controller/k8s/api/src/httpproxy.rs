use crate::condition::{ConditionStatus, ConditionsStatus, DetailedCondition, VALID_CONDITION};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Describes how requests for a virtual host are routed to services.
///
/// A proxy with a `virtualhost` is a root; proxies without one only take
/// effect when a root includes them.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema,
)]
#[kube(
    group = "ingress.controller.io",
    version = "v1",
    kind = "HTTPProxy",
    root = "HttpProxy",
    status = "HttpProxyStatus",
    shortname = "proxy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtualhost: Option<VirtualHost>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<Include>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHost {
    pub fqdn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    /// Name of a TLS secret, optionally `namespace/name` when the secret is
    /// delegated from another namespace.
    pub secret_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MatchCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub port: u16,
}

/// Delegates the routes under a set of conditions to another proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Include {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MatchCondition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxyStatus {
    /// One of `valid`, `invalid` or `NotReconciled`, derived from the
    /// `Valid` condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Conditions keyed by `type`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<DetailedCondition>,
}

// === impl HttpProxyStatus ===

impl HttpProxyStatus {
    pub const VALID: &'static str = "valid";
    pub const INVALID: &'static str = "invalid";
    pub const NOT_RECONCILED: &'static str = "NotReconciled";
}

impl ConditionsStatus for HttpProxyStatus {
    fn conditions(&self) -> &[DetailedCondition] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<DetailedCondition> {
        &mut self.conditions
    }

    fn summarize(&mut self) {
        let (current, description) = match self.find_condition(VALID_CONDITION) {
            Some(valid) => {
                let current = match valid.status {
                    ConditionStatus::True => Self::VALID,
                    ConditionStatus::False => Self::INVALID,
                    ConditionStatus::Unknown => Self::NOT_RECONCILED,
                };
                (current, valid.message.clone())
            }
            None => (Self::NOT_RECONCILED, "Waiting for controller".to_string()),
        };
        self.current_status = Some(current.to_string());
        self.description = Some(description);
    }
}
