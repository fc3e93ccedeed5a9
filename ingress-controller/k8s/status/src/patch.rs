use crate::{resource::HasConditions, resource_id::ResourceId};
use ingress_controller_k8s_api::{ConditionsStatus, DetailedCondition, Patch};

/// A status patch that should be applied to a resource.
#[derive(Debug, PartialEq)]
pub struct Update {
    pub id: ResourceId,
    pub patch: Patch<serde_json::Value>,
}

pub fn make_patch<K: HasConditions>(name: &str, status: &K::Status) -> Patch<serde_json::Value> {
    let value = serde_json::json!({
        "apiVersion": K::api_version(&()),
        "kind": K::kind(&()),
        "name": name,
        "status": status,
    });
    Patch::Merge(value)
}

/// Compares two condition lists, ignoring `lastTransitionTime` and the
/// order the conditions are listed in.
pub fn eq_time_insensitive_conditions(a: &[DetailedCondition], b: &[DetailedCondition]) -> bool {
    a.len() == b.len() && time_insensitive(a.to_vec()) == time_insensitive(b.to_vec())
}

/// Compares two statuses the way [`eq_time_insensitive_conditions`] compares
/// their conditions. All other status fields must be equal.
pub fn eq_time_insensitive_status<S>(a: &S, b: &S) -> bool
where
    S: ConditionsStatus + Clone + PartialEq,
{
    let (mut a, mut b) = (a.clone(), b.clone());
    for status in [&mut a, &mut b] {
        let conditions = std::mem::take(status.conditions_mut());
        *status.conditions_mut() = time_insensitive(conditions);
    }
    a == b
}

fn time_insensitive(mut conditions: Vec<DetailedCondition>) -> Vec<DetailedCondition> {
    for c in conditions.iter_mut() {
        c.last_transition_time = None;
    }
    conditions.sort_by(|a, b| a.type_.cmp(&b.type_));
    conditions
}
