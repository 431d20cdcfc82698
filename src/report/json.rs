//! Machine-readable run report

use crate::error::Result;
use crate::models::RunSummary;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the run summary, including every per-request outcome, as
/// pretty-printed JSON. An existing file at `output_path` is replaced.
pub fn export(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        "Run report for {} ({} requests) written to {}",
        summary.run_id,
        summary.total_requests,
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProbeOutcome, RunMode};

    #[test]
    fn test_export_writes_readable_summary() {
        let mut summary = RunSummary::new(RunMode::List, "http://cb.io/");
        summary.record(ProbeOutcome {
            request_number: 1,
            method: "GET".into(),
            target_url: "http://a.com/x?r=http%3A%2F%2Fcb.io%2F".into(),
            target_parameters: vec!["r".into()],
            status: Some(302),
            error: None,
            elapsed_ms: 12,
        });
        summary.record(ProbeOutcome {
            request_number: 2,
            method: "GET".into(),
            target_url: "http://b.com/y?r=http%3A%2F%2Fcb.io%2F".into(),
            target_parameters: vec!["r".into()],
            status: None,
            error: Some("connection refused".into()),
            elapsed_ms: 3,
        });
        summary.finish();

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("run.json");
        export(&summary, &path).expect("export");

        let content = std::fs::read_to_string(&path).expect("read report");
        let loaded: RunSummary = serde_json::from_str(&content).expect("valid JSON");
        assert_eq!(loaded.run_id, summary.run_id);
        assert_eq!(loaded.mode, RunMode::List);
        assert_eq!(loaded.total_requests, 2);
        assert_eq!(loaded.successful_requests, 1);
        assert_eq!(loaded.failed_requests(), 1);
        assert_eq!(loaded.outcomes[1].error.as_deref(), Some("connection refused"));
    }
}
