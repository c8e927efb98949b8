//! Generate and emit command implementations

use crate::manifest::{MANIFEST_FILE, Manifest, base_dir};
use anyhow::{Context, Result};
use embindgen_core::{ExportKind, ExportSpec, GenerationReport, ModuleNames};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Options of the ad hoc `emit` command
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub definition: PathBuf,
    pub kind: String,
    pub output: PathBuf,
    pub template: Option<PathBuf>,
    pub interface_name: Option<String>,
    pub container_name: String,
}

/// Run every export declared in a manifest
pub async fn run(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| PathBuf::from(MANIFEST_FILE));

    println!("Generating from manifest: {}", path.display());

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let base = base_dir(&path);
    let specs = manifest.export_specs(&base);
    debug!(
        manifest = %path.display(),
        base_dir = %base.display(),
        exports = specs.len(),
        "manifest loaded"
    );

    run_exports(&manifest.definition_path(&base), manifest.names(), specs).await
}

/// Run a single export described on the command line
pub async fn emit(options: EmitOptions) -> Result<()> {
    let kind: ExportKind = options
        .kind
        .parse()
        .with_context(|| format!("Invalid export type: {}", options.kind))?;

    let mut spec = ExportSpec::new(kind, options.output);
    if let Some(template) = options.template {
        spec = spec.with_template(template);
    }

    let names = ModuleNames::new(options.interface_name.as_deref(), &options.container_name);

    run_exports(&options.definition, names, vec![spec]).await
}

async fn run_exports(definition: &Path, names: ModuleNames, specs: Vec<ExportSpec>) -> Result<()> {
    let total = specs.len();

    let report = embindgen_core::generate(definition, names, specs)
        .await
        .with_context(|| format!("Failed to load definition: {}", definition.display()))?;

    print_report(&report);

    if !report.is_success() {
        warn!(
            failed = report.failures.len(),
            total,
            "generation finished with failures"
        );
        anyhow::bail!("{} of {} exports failed", report.failures.len(), total);
    }

    println!("\n✓ Generation complete!");

    Ok(())
}

fn print_report(report: &GenerationReport) {
    for outcome in &report.written {
        let templated = if outcome.templated { " (templated)" } else { "" };
        println!(
            "✓ {} → {}{}",
            outcome.kind,
            outcome.filepath.display(),
            templated
        );
    }

    for failure in &report.failures {
        println!("✗ {}: {}", failure.filepath.display(), failure.error);
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
