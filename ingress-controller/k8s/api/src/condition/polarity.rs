use super::{ConditionStatus, VALID_CONDITION};

/// Condition types for which `True` means the resource is healthy.
///
/// Every other condition type reports a problem when it is `True`.
static POSITIVE_POLARITY: &[&str] = &[VALID_CONDITION];

/// Whether `True` on a condition is the healthy or the unhealthy state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

// === impl Polarity ===

impl Polarity {
    pub fn of(kind: &str) -> Self {
        if POSITIVE_POLARITY.contains(&kind) {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// The status a condition takes once any error was added to it.
    pub fn error_status(self) -> ConditionStatus {
        match self {
            Self::Positive => ConditionStatus::False,
            Self::Negative => ConditionStatus::True,
        }
    }

    /// The status a condition takes when nothing is wrong.
    pub fn healthy_status(self) -> ConditionStatus {
        match self {
            Self::Positive => ConditionStatus::True,
            Self::Negative => ConditionStatus::False,
        }
    }
}
