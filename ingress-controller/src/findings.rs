use anyhow::{Context, Result};
use ingress_controller_k8s_api::{condition::VALID_CONDITION, DetailedCondition, Severity};
use serde::Deserialize;
use std::path::Path;

/// One problem reported by validation against a condition.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct Finding {
    #[serde(default = "default_condition")]
    pub condition: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub type_: String,
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

fn default_condition() -> String {
    VALID_CONDITION.to_string()
}

impl Finding {
    pub(crate) fn apply(&self, condition: &mut DetailedCondition) {
        condition.add(self.severity, &self.type_, &self.reason, &self.message);
    }
}

/// Reads a list of findings from a YAML or JSON document.
pub(crate) fn read(path: &Path) -> Result<Vec<Finding>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read findings from {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid findings in {}", path.display()))
}

pub(crate) fn parse(contents: &str) -> Result<Vec<Finding>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    // JSON is a subset of YAML, so one parser handles both.
    Ok(serde_yaml::from_str(contents)?)
}
