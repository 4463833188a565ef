use anyhow::Context;
use nudge_audit::config::AuditConfig;
use nudge_audit::export::{build_export, export_json};
use nudge_audit::ids::RunId;
use nudge_audit::pipeline::{run_seeded, AUDIT_COMPLETE};
use nudge_audit::reports::BitmapSurface;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr; stdout carries the audit report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AuditConfig::default();
    let run_id = RunId::new();
    let seed: u64 = rand::random();
    tracing::info!(%run_id, seed, "Starting nudge audit");

    let mut surface = BitmapSurface::new(&config.chart.output_path);
    let outcome = run_seeded(&config, seed, &mut surface).context("audit run failed")?;

    let export = build_export(run_id, Some(seed), &outcome);
    tracing::debug!(export = %export_json(&export), "Audit export");
    tracing::info!(chart = %surface.path().display(), "Chart written");

    println!("{AUDIT_COMPLETE}");
    Ok(())
}
