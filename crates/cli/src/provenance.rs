use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: who classified, with which parameters.
pub struct Payload {
    pub params: Value,
    pub classifier: Option<String>,
    pub rows: Option<usize>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            classifier: None,
            rows: None,
        }
    }

    pub fn classifier(mut self, initials: &str) -> Self {
        self.classifier = Some(initials.to_string());
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }
}

#[derive(Serialize)]
struct Callsite<'a> {
    file: &'a str,
    line: u32,
}

#[derive(Serialize)]
pub(crate) struct Record<'a> {
    code_rev: String,
    tool_version: &'static str,
    callsite: Callsite<'a>,
    classifier: Option<String>,
    rows: Option<usize>,
    params: Value,
    outputs: Vec<String>,
}

impl<'a> Record<'a> {
    #[track_caller]
    pub(crate) fn new(payload: Payload, outputs: Vec<String>) -> Self {
        let callsite = Location::caller();
        Self {
            code_rev: revision_label(source_revision()),
            tool_version: jellyfish::VERSION,
            callsite: Callsite {
                file: callsite.file(),
                line: callsite.line(),
            },
            classifier: payload.classifier,
            rows: payload.rows,
            params: payload.params,
            outputs,
        }
    }
}

/// Write `<artifact>.provenance.json` next to a table or figure.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let record = Record::new(payload, vec![artifact.to_string_lossy().into_owned()]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    tracing::debug!(path = %sidecar.display(), "provenance");
    Ok(sidecar)
}

/// Provenance block for stdout (no artifact).
#[track_caller]
pub fn report(payload: Payload) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Record::new(payload, Vec::new()))?)
}

/// `tails.csv` → `tails.provenance.json`, in the same directory.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit the tool was run from, if one can be found.
///
/// Installed binaries usually have no checkout next to them; the record then
/// falls back to the crate version alone.
pub fn source_revision() -> Option<String> {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok());
    if let Some(rev) = from_env.map(|r| r.trim().to_string()) {
        if !rev.is_empty() {
            return Some(rev);
        }
    }
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!("no git checkout; provenance records the tool version only");
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!rev.is_empty()).then_some(rev)
}

fn revision_label(rev: Option<String>) -> String {
    rev.unwrap_or_else(|| format!("release-{}", jellyfish::VERSION))
}
