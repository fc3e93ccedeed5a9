use super::{DetailedCondition, SubCondition};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_TYPE_LENGTH: usize = 316;
pub const MAX_REASON_LENGTH: usize = 1024;
pub const MAX_MESSAGE_LENGTH: usize = 32768;

const TYPE_REGEX: &str = r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/)?(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])$";

const REASON_REGEX: &str = r"^[A-Za-z]([A-Za-z0-9_,:]*[A-Za-z0-9_])?$";

static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TYPE_REGEX).expect("type regex must compile"));

static REASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(REASON_REGEX).expect("reason regex must compile"));

/// A condition that the resource schema would refuse.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidCondition {
    #[error("condition type {0:?} must match the regex: {regex}", regex = TYPE_REGEX)]
    Type(String),

    #[error(
        "condition type is {len} characters long; at most {max} are allowed",
        max = MAX_TYPE_LENGTH
    )]
    TypeTooLong { len: usize },

    #[error("condition {type_:?} has an empty reason")]
    EmptyReason { type_: String },

    #[error(
        "condition {type_:?} reason is {len} characters long; at most {max} are allowed",
        max = MAX_REASON_LENGTH
    )]
    ReasonTooLong { type_: String, len: usize },

    #[error(
        "condition {type_:?} reason {reason:?} must match the regex: {regex}",
        regex = REASON_REGEX
    )]
    Reason { type_: String, reason: String },

    #[error(
        "condition {type_:?} message is {len} characters long; at most {max} are allowed",
        max = MAX_MESSAGE_LENGTH
    )]
    MessageTooLong { type_: String, len: usize },
}

// === impl DetailedCondition ===

impl DetailedCondition {
    /// Checks the condition and every sub-condition against the limits the
    /// resource schema enforces.
    pub fn validate(&self) -> Result<(), InvalidCondition> {
        validate_fields(&self.type_, &self.reason, &self.message)?;
        for sc in self.errors.iter().chain(&self.warnings) {
            sc.validate()?;
        }
        Ok(())
    }
}

// === impl SubCondition ===

impl SubCondition {
    pub fn validate(&self) -> Result<(), InvalidCondition> {
        validate_fields(&self.type_, &self.reason, &self.message)
    }
}

fn validate_fields(type_: &str, reason: &str, message: &str) -> Result<(), InvalidCondition> {
    let len = type_.chars().count();
    if len > MAX_TYPE_LENGTH {
        return Err(InvalidCondition::TypeTooLong { len });
    }
    if !TYPE_RE.is_match(type_) {
        return Err(InvalidCondition::Type(type_.to_string()));
    }

    let len = reason.chars().count();
    if len == 0 {
        return Err(InvalidCondition::EmptyReason {
            type_: type_.to_string(),
        });
    }
    if len > MAX_REASON_LENGTH {
        return Err(InvalidCondition::ReasonTooLong {
            type_: type_.to_string(),
            len,
        });
    }
    if !REASON_RE.is_match(reason) {
        return Err(InvalidCondition::Reason {
            type_: type_.to_string(),
            reason: reason.to_string(),
        });
    }

    let len = message.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(InvalidCondition::MessageTooLong {
            type_: type_.to_string(),
            len,
        });
    }

    Ok(())
}
