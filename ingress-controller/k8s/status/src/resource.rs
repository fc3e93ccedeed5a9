use ingress_controller_k8s_api::{
    ConditionsStatus, ExtensionService, ExtensionServiceStatus, HttpProxy, HttpProxyStatus,
    Resource,
};
use serde::Serialize;

/// A resource whose status is a list of detailed conditions.
pub trait HasConditions: Resource<DynamicType = ()> {
    type Status: ConditionsStatus + Clone + Default + PartialEq + Serialize;

    fn current_status(&self) -> Option<&Self::Status>;
}

impl HasConditions for HttpProxy {
    type Status = HttpProxyStatus;

    fn current_status(&self) -> Option<&Self::Status> {
        self.status.as_ref()
    }
}

impl HasConditions for ExtensionService {
    type Status = ExtensionServiceStatus;

    fn current_status(&self) -> Option<&Self::Status> {
        self.status.as_ref()
    }
}
