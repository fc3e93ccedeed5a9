//! Status conditions reported on ingress resources.
//!
//! A [`DetailedCondition`] is built up over a single validation pass: every
//! problem the pass detects is folded into it with [`DetailedCondition::add_error`]
//! or [`DetailedCondition::add_warning`]. Each distinct check kind owns one
//! [`SubCondition`] in `errors` or `warnings`, while the condition's own
//! reason and message summarize everything that was added.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

mod message;
mod polarity;
mod validate;


pub use self::{
    message::{truncate_message, truncate_message_to, LONG_MESSAGE_LENGTH},
    polarity::Polarity,
    validate::{InvalidCondition, MAX_MESSAGE_LENGTH, MAX_REASON_LENGTH, MAX_TYPE_LENGTH},
};

/// The positive-polarity condition describing whether a resource is usable.
pub const VALID_CONDITION: &str = "Valid";

/// Reason given to a sub-condition that was reported with differing reasons.
pub const MULTIPLE_REASONS: &str = "MultipleReasons";

/// Reason given to a condition once findings of different kinds were added.
pub const MULTIPLE_PROBLEMS_REASON: &str = "MultipleProblems";

/// Message paired with [`MULTIPLE_PROBLEMS_REASON`].
pub const MULTIPLE_PROBLEMS_MESSAGE: &str =
    "Multiple problems were found, see errors or warnings for details";

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// How severe a finding is.
///
/// Errors always change the status of the condition they are added to.
/// Warnings are recorded but never change it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single class of problem nested under a [`DetailedCondition`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct SubCondition {
    /// Identifies the check that failed, e.g. `ServiceError`.
    #[serde(rename = "type")]
    #[schemars(
        length(max = 316),
        regex(
            pattern = r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/)?(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])$"
        )
    )]
    pub type_: String,

    /// Always `True` for sub-conditions listed under errors or warnings.
    pub status: ConditionStatus,

    #[schemars(
        length(min = 1, max = 1024),
        regex(pattern = r"^[A-Za-z]([A-Za-z0-9_,:]*[A-Za-z0-9_])?$")
    )]
    pub reason: String,

    #[serde(default)]
    #[schemars(length(max = 32768))]
    pub message: String,
}

/// A Kubernetes-style condition that carries the individual errors and
/// warnings it summarizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCondition {
    #[serde(rename = "type")]
    #[schemars(
        length(max = 316),
        regex(
            pattern = r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/)?(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])$"
        )
    )]
    pub type_: String,

    pub status: ConditionStatus,

    /// The resource generation this condition was computed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// When `status` last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    #[serde(default)]
    #[schemars(
        length(min = 1, max = 1024),
        regex(pattern = r"^[A-Za-z]([A-Za-z0-9_,:]*[A-Za-z0-9_])?$")
    )]
    pub reason: String,

    #[serde(default)]
    #[schemars(length(max = 32768))]
    pub message: String,

    /// Problems that make the resource unusable, one entry per check kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SubCondition>,

    /// Problems worth surfacing that do not affect `status`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SubCondition>,
}

/// A resource status that owns a list of conditions keyed by their type.
///
/// The list is serialized as a sequence but must never hold two conditions
/// of the same type, so writers go through [`ConditionsStatus::set_condition`].
pub trait ConditionsStatus {
    fn conditions(&self) -> &[DetailedCondition];

    fn conditions_mut(&mut self) -> &mut Vec<DetailedCondition>;

    fn find_condition(&self, kind: &str) -> Option<&DetailedCondition> {
        self.conditions().iter().find(|c| c.type_ == kind)
    }

    fn find_condition_mut(&mut self, kind: &str) -> Option<&mut DetailedCondition> {
        self.conditions_mut().iter_mut().find(|c| c.type_ == kind)
    }

    /// Replaces the condition of the same type in place, or appends it.
    fn set_condition(&mut self, condition: DetailedCondition) {
        let conditions = self.conditions_mut();
        match find_condition_index(conditions, &condition.type_) {
            Some(idx) => conditions[idx] = condition,
            None => conditions.push(condition),
        }
    }

    /// Recomputes any summary fields the status derives from its conditions.
    fn summarize(&mut self) {}
}

/// Finds the sub-condition with the given type.
pub fn find_sub_condition<'c>(list: &'c [SubCondition], kind: &str) -> Option<&'c SubCondition> {
    list.iter().find(|sc| sc.type_ == kind)
}

/// Finds the position of the condition with the given type.
pub fn find_condition_index(conditions: &[DetailedCondition], kind: &str) -> Option<usize> {
    conditions.iter().position(|c| c.type_ == kind)
}

// === impl ConditionStatus ===

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === impl SubCondition ===

impl SubCondition {
    fn new(kind: &str, reason: &str, message: &str) -> Self {
        Self {
            type_: kind.to_string(),
            status: ConditionStatus::True,
            reason: reason.to_string(),
            message: message.to_string(),
        }
    }

    /// Folds another occurrence of this check into the sub-condition.
    ///
    /// Once two different reasons were seen, the reason is reported as
    /// [`MULTIPLE_REASONS`] no matter which order they arrived in. Messages
    /// are appended in call order, so the message text is order-sensitive
    /// while the reason is not.
    fn fold(&mut self, reason: &str, message: &str) {
        if self.reason.is_empty() {
            self.reason = reason.to_string();
            self.message = message.to_string();
            return;
        }

        if self.reason != reason {
            self.reason = MULTIPLE_REASONS.to_string();
        }
        message::append(&mut self.message, message);
    }
}

// === impl DetailedCondition ===

impl DetailedCondition {
    /// Starts a new, empty condition of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            type_: kind.into(),
            ..Self::default()
        }
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::of(&self.type_)
    }

    pub fn is_positive_polarity(&self) -> bool {
        self.polarity() == Polarity::Positive
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn find_error(&self, kind: &str) -> Option<&SubCondition> {
        find_sub_condition(&self.errors, kind)
    }

    pub fn find_warning(&self, kind: &str) -> Option<&SubCondition> {
        find_sub_condition(&self.warnings, kind)
    }

    pub fn add_error(&mut self, kind: &str, reason: &str, message: &str) {
        self.add(Severity::Error, kind, reason, message)
    }

    /// Adds an error whose message is rendered from format arguments, i.e.
    /// `dc.add_error_fmt("ServiceError", "NotFound", format_args!("service {name} missing"))`.
    pub fn add_error_fmt(&mut self, kind: &str, reason: &str, message: fmt::Arguments<'_>) {
        self.add(Severity::Error, kind, reason, &fmt::format(message))
    }

    pub fn add_warning(&mut self, kind: &str, reason: &str, message: &str) {
        self.add(Severity::Warning, kind, reason, message)
    }

    pub fn add_warning_fmt(&mut self, kind: &str, reason: &str, message: fmt::Arguments<'_>) {
        self.add(Severity::Warning, kind, reason, &fmt::format(message))
    }

    /// Records a finding against this condition.
    ///
    /// The message is truncated to [`LONG_MESSAGE_LENGTH`] before it is
    /// merged. An error sets `status` to the value its polarity treats as
    /// unhealthy; a warning leaves `status` untouched.
    pub fn add(&mut self, severity: Severity, kind: &str, reason: &str, message: &str) {
        let message = truncate_message(message);

        let list = match severity {
            Severity::Error => {
                self.status = self.polarity().error_status();
                &mut self.errors
            }
            Severity::Warning => &mut self.warnings,
        };
        upsert(list, kind, reason, message);

        self.summarize(kind, reason, message);
    }

    /// Updates the condition's own reason and message.
    ///
    /// Findings are identified by kind and reason together, so two kinds
    /// that share a reason string still count as different problems. The
    /// first divergence collapses the summary to the fixed
    /// [`MULTIPLE_PROBLEMS_REASON`] pair, and it stays collapsed.
    fn summarize(&mut self, kind: &str, reason: &str, message: &str) {
        let id = format!("{kind}{reason}");

        if self.reason.is_empty() {
            self.reason = id;
            self.message = message.to_string();
            return;
        }

        if self.reason == MULTIPLE_PROBLEMS_REASON && self.message == MULTIPLE_PROBLEMS_MESSAGE {
            return;
        }

        if self.reason != id {
            self.reason = MULTIPLE_PROBLEMS_REASON.to_string();
            self.message = MULTIPLE_PROBLEMS_MESSAGE.to_string();
            return;
        }

        message::append(&mut self.message, message);
    }
}

fn upsert(list: &mut Vec<SubCondition>, kind: &str, reason: &str, message: &str) {
    match list.iter_mut().find(|sc| sc.type_ == kind) {
        Some(existing) => existing.fold(reason, message),
        None => list.push(SubCondition::new(kind, reason, message)),
    }
}
