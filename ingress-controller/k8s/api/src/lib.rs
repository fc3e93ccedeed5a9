#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod condition;
pub mod extension_service;
pub mod httpproxy;

pub use self::{
    condition::{
        find_condition_index, find_sub_condition, truncate_message, truncate_message_to,
        ConditionStatus, ConditionsStatus, DetailedCondition, InvalidCondition, Polarity,
        Severity, SubCondition,
    },
    extension_service::{ExtensionService, ExtensionServiceSpec, ExtensionServiceStatus},
    httpproxy::{HttpProxy, HttpProxySpec, HttpProxyStatus},
};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
pub use kube::{
    api::{ObjectMeta, Patch},
    Resource, ResourceExt,
};
