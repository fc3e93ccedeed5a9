use crate::ResourceId;
use chrono::{DateTime, Utc};
use ingress_controller_k8s_api::{
    ConditionStatus, DetailedCondition, HttpProxyStatus, SubCondition, Time,
};


pub(crate) fn proxy_id() -> ResourceId {
    ResourceId::new("ns-0".to_string(), "proxy-0".to_string())
}

pub(crate) fn update_time() -> Time {
    Time(DateTime::<Utc>::MIN_UTC)
}

pub(crate) fn earlier_time() -> Time {
    Time(DateTime::from_timestamp(1_700_000_000, 0).expect("timestamp must be valid"))
}

pub(crate) fn make_valid(generation: i64, time: Time) -> DetailedCondition {
    DetailedCondition {
        type_: "Valid".to_string(),
        status: ConditionStatus::True,
        observed_generation: Some(generation),
        last_transition_time: Some(time),
        reason: "Valid".to_string(),
        message: "Valid HTTPProxy".to_string(),
        ..DetailedCondition::default()
    }
}

pub(crate) fn make_invalid(generation: i64, time: Time) -> DetailedCondition {
    DetailedCondition {
        type_: "Valid".to_string(),
        status: ConditionStatus::False,
        observed_generation: Some(generation),
        last_transition_time: Some(time),
        reason: "ServiceErrorNotFound".to_string(),
        message: "service x missing".to_string(),
        errors: vec![SubCondition {
            type_: "ServiceError".to_string(),
            status: ConditionStatus::True,
            reason: "NotFound".to_string(),
            message: "service x missing".to_string(),
        }],
        ..DetailedCondition::default()
    }
}

pub(crate) fn make_status(conditions: Vec<DetailedCondition>) -> HttpProxyStatus {
    let mut status = HttpProxyStatus {
        conditions,
        ..HttpProxyStatus::default()
    };
    ingress_controller_k8s_api::ConditionsStatus::summarize(&mut status);
    status
}
