use crate::findings::{self, Finding};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use ingress_controller_k8s_api::{ExtensionService, HttpProxy, Patch};
use ingress_controller_k8s_status::{HasConditions, ResourceId, StatusUpdate};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(
    name = "ingress-status",
    about = "Computes the status patch the ingress controller would write for a resource"
)]
pub struct Args {
    #[clap(long, default_value = "ingress=info,warn", env = "INGRESS_STATUS_LOG")]
    log_level: String,

    #[clap(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[clap(long, value_enum, default_value = "http-proxy")]
    resource: ResourceKind,

    /// A YAML or JSON list of findings to record.
    #[clap(long)]
    findings: PathBuf,

    /// The resource as currently stored, as YAML or JSON.
    ///
    /// Its metadata identifies the resource and its status is what the
    /// update is compared against.
    #[clap(long, conflicts_with_all = ["namespace", "name", "generation"])]
    current: Option<PathBuf>,

    #[clap(long, default_value = "default")]
    namespace: String,

    #[clap(long, required_unless_present = "current")]
    name: Option<String>,

    #[clap(long, default_value = "1")]
    generation: i64,

    /// Fails when a computed condition would be rejected by the resource
    /// schema.
    #[clap(long)]
    validate: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Plain,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    HttpProxy,
    ExtensionService,
}

// === impl Args ===

impl Args {
    pub fn run(self) -> Result<()> {
        init_log(&self.log_level, self.log_format)?;

        match self.resource {
            ResourceKind::HttpProxy => self.check::<HttpProxy>(),
            ResourceKind::ExtensionService => self.check::<ExtensionService>(),
        }
    }

    fn check<K>(&self) -> Result<()>
    where
        K: HasConditions + DeserializeOwned,
    {
        let findings = findings::read(&self.findings)?;
        let current = self
            .current
            .as_deref()
            .map(read_resource::<K>)
            .transpose()?;

        if let Some(patch) = self.status_patch(&findings, current.as_ref())? {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &patch)?;
            println!();
        }
        Ok(())
    }

    /// Records `findings`, in order, against the resource and returns the
    /// merge patch that would bring its stored status up to date.
    fn status_patch<K: HasConditions>(
        &self,
        findings: &[Finding],
        current: Option<&K>,
    ) -> Result<Option<serde_json::Value>> {
        let mut update = match current {
            Some(resource) => StatusUpdate::for_resource(resource),
            None => {
                let name = self.name.clone().unwrap_or_default();
                StatusUpdate::new(ResourceId::new(self.namespace.clone(), name), self.generation)
            }
        };
        debug!(id = %update.id(), findings = findings.len(), "Recording findings");

        for finding in findings {
            finding.apply(update.condition_for(&finding.condition));
        }

        if self.validate {
            for condition in update.finalize() {
                condition.validate().with_context(|| {
                    format!("{} condition would be rejected", condition.type_)
                })?;
            }
        }

        let id = update.id().clone();
        let Some(update) = update.into_update(current.and_then(K::current_status)) else {
            info!(%id, "Status is up to date");
            return Ok(None);
        };

        match update.patch {
            Patch::Merge(value) => Ok(Some(value)),
            _ => bail!("status updates must be merge patches"),
        }
    }
}

fn read_resource<K: DeserializeOwned>(path: &Path) -> Result<K> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read resource from {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid resource in {}", path.display()))
}

fn init_log(level: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level: {level}"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let res = match format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|error| anyhow::anyhow!("failed to initialize logging: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(flags: &[&str]) -> Args {
        let mut argv = vec!["ingress-status", "--findings", "f.yaml"];
        argv.extend_from_slice(flags);
        Args::try_parse_from(argv).unwrap()
    }

    fn current_proxy(generation: i64) -> HttpProxy {
        serde_yaml::from_str(&format!(
            r#"
apiVersion: ingress.controller.io/v1
kind: HTTPProxy
metadata:
  namespace: ns-0
  name: proxy-0
  generation: {generation}
spec:
  routes: []
status:
  currentStatus: valid
  description: Valid HTTPProxy
  conditions:
  - type: Valid
    status: "True"
    observedGeneration: 3
    lastTransitionTime: "2024-01-01T00:00:00Z"
    reason: Valid
    message: Valid HTTPProxy
"#
        ))
        .unwrap()
    }

    #[test]
    fn requires_name_without_current() {
        assert!(Args::try_parse_from(["ingress-status", "--findings", "f.yaml"]).is_err());

        let args =
            Args::try_parse_from(["ingress-status", "--findings", "f.yaml", "--name", "proxy-0"])
                .unwrap();
        assert_eq!(args.namespace, "default");
        assert_eq!(args.generation, 1);
        assert_eq!(args.resource, ResourceKind::HttpProxy);
    }

    #[test]
    fn current_conflicts_with_identity_flags() {
        assert!(Args::try_parse_from([
            "ingress-status",
            "--findings",
            "f.yaml",
            "--current",
            "proxy.yaml",
            "--name",
            "proxy-0",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "ingress-status",
            "--findings",
            "f.yaml",
            "--current",
            "svc.yaml",
            "--resource",
            "extension-service",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.resource, ResourceKind::ExtensionService);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn findings_apply_in_file_order() {
        let findings = findings::parse(
            r#"
- severity: error
  type: ServiceError
  reason: NotFound
  message: service foo missing
- severity: error
  type: ServiceError
  reason: NotFound
  message: service bar missing
"#,
        )
        .unwrap();

        let patch = args(&["--name", "proxy-0", "--generation", "2"])
            .status_patch::<HttpProxy>(&findings, None)
            .unwrap()
            .expect("a new status must be patched");

        assert_eq!(patch["name"], "proxy-0");
        assert_eq!(patch["kind"], "HTTPProxy");
        let status = &patch["status"];
        assert_eq!(status["currentStatus"], "invalid");
        assert_eq!(
            status["description"],
            "service foo missing, service bar missing"
        );
        let valid = &status["conditions"][0];
        assert_eq!(valid["status"], "False");
        assert_eq!(valid["observedGeneration"], 2);
        assert_eq!(valid["reason"], "ServiceErrorNotFound");
        assert_eq!(
            valid["errors"][0]["message"],
            "service foo missing, service bar missing"
        );
    }

    #[test]
    fn up_to_date_current_has_no_patch() {
        let current = current_proxy(3);
        let patch = args(&["--current", "proxy.yaml"])
            .status_patch(&[], Some(&current))
            .unwrap();
        assert_eq!(patch, None);

        // A newer generation must be recorded even though nothing else changed.
        let current = current_proxy(4);
        let patch = args(&["--current", "proxy.yaml"])
            .status_patch(&[], Some(&current))
            .unwrap()
            .expect("a newer generation must be patched");
        assert_eq!(patch["status"]["conditions"][0]["observedGeneration"], 4);
        assert_eq!(
            patch["status"]["conditions"][0]["lastTransitionTime"],
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn validate_rejects_conditions_the_schema_refuses() {
        let findings = findings::parse(
            r#"
- severity: warning
  type: TLSError
  reason: Bad-Reason
  message: certificate expires soon
"#,
        )
        .unwrap();

        let error = args(&["--name", "proxy-0", "--validate"])
            .status_patch::<HttpProxy>(&findings, None)
            .unwrap_err();
        assert_eq!(error.to_string(), "Valid condition would be rejected");

        let patch = args(&["--name", "proxy-0"])
            .status_patch::<HttpProxy>(&findings, None)
            .unwrap();
        assert!(patch.is_some());
    }
}
