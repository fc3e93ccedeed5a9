use crate::{
    patch::{eq_time_insensitive_status, make_patch, Update},
    resource::HasConditions,
    resource_id::ResourceId,
};
#[cfg(not(test))]
use chrono::offset::Utc;
use ingress_controller_k8s_api::{
    condition::VALID_CONDITION, find_condition_index, ConditionsStatus, DetailedCondition,
    Polarity, Time,
};
use std::marker::PhantomData;

/// Reason given to a negative-polarity condition that recorded nothing.
pub(crate) const AS_EXPECTED_REASON: &str = "AsExpected";

/// The conditions computed for one generation of one resource.
///
/// Every update starts out with an empty `Valid` condition, so a pass that
/// finds nothing reports the resource as valid.
///
/// Validation fetches a condition with [`StatusUpdate::condition_for`] and
/// adds its findings to it. Once validation is done, [`StatusUpdate::commit`]
/// folds the finished conditions into the resource's current status.
pub struct StatusUpdate<K> {
    id: ResourceId,
    generation: i64,
    transition_time: Time,
    conditions: Vec<DetailedCondition>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: HasConditions> StatusUpdate<K> {
    pub fn new(id: ResourceId, generation: i64) -> Self {
        #[cfg(not(test))]
        let timestamp = Utc::now();
        #[cfg(test)]
        let timestamp = chrono::DateTime::<chrono::Utc>::MIN_UTC;

        Self {
            id,
            generation,
            transition_time: Time(timestamp),
            conditions: vec![DetailedCondition::new(VALID_CONDITION)],
            _kind: PhantomData,
        }
    }

    pub fn for_resource(resource: &K) -> Self {
        let generation = resource.meta().generation.unwrap_or_default();
        Self::new(ResourceId::of(resource), generation)
    }

    pub fn with_transition_time(mut self, time: Time) -> Self {
        self.transition_time = time;
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn generation(&self) -> i64 {
        self.generation
    }

    /// Returns the condition of the given type, starting a new one the
    /// first time it is requested.
    pub fn condition_for(&mut self, kind: &str) -> &mut DetailedCondition {
        let idx = match find_condition_index(&self.conditions, kind) {
            Some(idx) => idx,
            None => {
                self.conditions.push(DetailedCondition::new(kind));
                self.conditions.len() - 1
            }
        };
        &mut self.conditions[idx]
    }

    /// Returns the finished conditions, in the order they were first
    /// requested.
    pub fn finalize(&self) -> Vec<DetailedCondition> {
        let kind = K::kind(&());
        self.conditions
            .iter()
            .cloned()
            .map(|mut cond| {
                cond.observed_generation = Some(self.generation);
                cond.last_transition_time = Some(self.transition_time.clone());

                if !cond.has_errors() {
                    let polarity = cond.polarity();
                    cond.status = polarity.healthy_status();
                    // Warnings keep their summary; only an empty condition
                    // gets the canned reason.
                    if !cond.has_warnings() {
                        match polarity {
                            Polarity::Positive => {
                                cond.reason = VALID_CONDITION.to_string();
                                cond.message = format!("Valid {kind}");
                            }
                            Polarity::Negative => {
                                cond.reason = AS_EXPECTED_REASON.to_string();
                                cond.message.clear();
                            }
                        }
                    }
                }
                cond
            })
            .collect()
    }

    /// Merges the finished conditions into `current`, replacing conditions of
    /// the same type in place.
    ///
    /// A condition already observed at a newer generation is left alone. A
    /// condition whose status did not change keeps its transition time.
    pub fn commit(&self, current: Option<&K::Status>) -> K::Status {
        let mut status = current.cloned().unwrap_or_default();

        for mut cond in self.finalize() {
            if let Some(existing) = status.find_condition(&cond.type_) {
                if existing
                    .observed_generation
                    .is_some_and(|observed| observed > self.generation)
                {
                    tracing::debug!(
                        id = %self.id,
                        condition = %cond.type_,
                        observed = ?existing.observed_generation,
                        generation = self.generation,
                        "Skipping stale condition"
                    );
                    continue;
                }

                if existing.status == cond.status {
                    if let Some(time) = existing.last_transition_time.clone() {
                        cond.last_transition_time = Some(time);
                    }
                }
            }
            status.set_condition(cond);
        }

        status.summarize();
        status
    }

    /// Builds the patch that brings `current` up to date, or `None` when
    /// nothing would change.
    pub fn into_update(self, current: Option<&K::Status>) -> Option<Update> {
        let status = self.commit(current);

        if let Some(current) = current {
            if eq_time_insensitive_status(current, &status) {
                tracing::trace!(id = %self.id, "Status is up to date");
                return None;
            }
        }

        let patch = make_patch::<K>(&self.id.name, &status);
        Some(Update { id: self.id, patch })
    }
}
