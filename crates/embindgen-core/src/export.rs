//! Export scheduling.
//!
//! One [`InterfaceModel`] feeds any number of exports. Each export renders
//! its body, composes it with an optional template and writes the result.
//! Exports run as independent tasks; a failing export is reported without
//! affecting the others, and [`generate_exports`] only returns after every
//! task has finished.
//!
//! Every export owns its output file. When two specs resolve to the same
//! path, the first one is written and the later ones fail with
//! [`GeneratorError::DuplicateTarget`]. Paths are compared as given, without
//! normalisation.

use crate::compose::{compose, load_template};
use crate::definition::DefinitionDocument;
use crate::emit::{generate_markdown, generate_registration, generate_typescript};
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::InterfaceModel;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

/// Output format of one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ExportKind {
    /// TypeScript declarations (`ts`, `typescript`)
    TypeScript,
    /// Emscripten registration code (`c++`, `cpp`)
    Native,
    /// Reference documentation (`md`, `markdown`)
    Markdown,
}

impl ExportKind {
    /// Canonical tag as written in manifests
    pub fn tag(&self) -> &'static str {
        match self {
            ExportKind::TypeScript => "ts",
            ExportKind::Native => "c++",
            ExportKind::Markdown => "md",
        }
    }

    /// Whether composed output carries the generated-file header
    pub fn is_native(&self) -> bool {
        matches!(self, ExportKind::Native)
    }

    /// Render the export body for a model
    pub fn render(&self, names: &ModuleNames, model: &InterfaceModel) -> String {
        match self {
            ExportKind::TypeScript => generate_typescript(&names.container_name, model),
            ExportKind::Native => generate_registration(names.interface_name.as_deref(), model),
            ExportKind::Markdown => generate_markdown(model),
        }
    }
}

impl FromStr for ExportKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ts" | "typescript" => Ok(ExportKind::TypeScript),
            "c++" | "cpp" => Ok(ExportKind::Native),
            "md" | "markdown" => Ok(ExportKind::Markdown),
            _ => Err(GeneratorError::UnknownExportType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportKind {
    type Error = GeneratorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Names shared by all exports of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    /// Registration block name; `None` leaves the block unwrapped
    pub interface_name: Option<String>,
    /// Name of the TypeScript container interface
    pub container_name: String,
}

impl ModuleNames {
    /// An empty interface name counts as none
    pub fn new(interface_name: Option<&str>, container_name: &str) -> Self {
        Self {
            interface_name: interface_name
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            container_name: container_name.to_string(),
        }
    }
}

/// One requested output file.
///
/// `filepath` and `template` are kept as configured and resolved against
/// `root` when the export runs. The provenance header quotes the configured
/// template path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportSpec {
    #[serde(rename = "type")]
    pub kind: ExportKind,
    pub filepath: PathBuf,
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Base directory for relative paths; the working directory when unset
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

impl ExportSpec {
    pub fn new(kind: ExportKind, filepath: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            filepath: filepath.into(),
            template: None,
            root: None,
        }
    }

    /// Attach a template file
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Resolve relative paths against `root`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Where the export is written
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.filepath)
    }

    /// Where the template is read from
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_deref().map(|template| self.resolve(template))
    }
}

/// A written export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub kind: ExportKind,
    pub filepath: PathBuf,
    /// Whether a template was substituted
    pub templated: bool,
    pub bytes: usize,
}

/// An export that could not be written.
#[derive(Debug)]
pub struct ExportFailure {
    pub filepath: PathBuf,
    pub error: GeneratorError,
}

/// Result of running every export of one model.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Successful exports, in request order
    pub written: Vec<ExportOutcome>,
    /// Failed exports, in request order
    pub failures: Vec<ExportFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

async fn run_export(
    model: &InterfaceModel,
    names: &ModuleNames,
    spec: &ExportSpec,
) -> GeneratorResult<ExportOutcome> {
    let body = spec.kind.render(names, model);
    let template = load_template(spec.template.as_deref(), spec.root.as_deref()).await;
    let text = compose(spec.kind, &body, &template);

    let filepath = spec.output_path();
    tokio::fs::write(&filepath, &text)
        .await
        .map_err(|err| GeneratorError::io(&filepath, err))?;

    Ok(ExportOutcome {
        kind: spec.kind,
        filepath,
        templated: template.has_placeholder(),
        bytes: text.len(),
    })
}

/// Run every export concurrently and wait for all of them.
pub async fn generate_exports(
    model: Arc<InterfaceModel>,
    names: Arc<ModuleNames>,
    specs: Vec<ExportSpec>,
) -> GenerationReport {
    let mut targets = HashSet::new();
    let tasks: Vec<_> = specs
        .into_iter()
        .map(|spec| {
            let filepath = spec.output_path();
            if !targets.insert(filepath.clone()) {
                return (filepath, None);
            }
            let model = Arc::clone(&model);
            let names = Arc::clone(&names);
            let handle = tokio::spawn(async move { run_export(&model, &names, &spec).await });
            (filepath, Some(handle))
        })
        .collect();

    let mut report = GenerationReport::default();
    for (filepath, task) in tasks {
        let result = match task {
            Some(handle) => handle
                .await
                .map_err(|err| GeneratorError::TaskFailed(err.to_string()))
                .and_then(|result| result),
            None => Err(GeneratorError::DuplicateTarget(filepath.clone())),
        };

        match result {
            Ok(outcome) => {
                info!(
                    kind = %outcome.kind,
                    filepath = %outcome.filepath.display(),
                    templated = outcome.templated,
                    bytes = outcome.bytes,
                    "export written"
                );
                report.written.push(outcome);
            }
            Err(err) => {
                error!(filepath = %filepath.display(), error = %err, "export failed");
                report.failures.push(ExportFailure {
                    filepath,
                    error: err,
                });
            }
        }
    }

    report
}

/// Load a definition file and run every export against it.
///
/// A definition that cannot be read or parsed aborts the run before any
/// export starts. Export failures are collected in the report.
pub async fn generate(
    definition_path: &Path,
    names: ModuleNames,
    specs: Vec<ExportSpec>,
) -> GeneratorResult<GenerationReport> {
    let document = DefinitionDocument::load(definition_path).await?;
    let model = InterfaceModel::from_document(&document);

    info!(
        definition = %definition_path.display(),
        summary = %model.summary(),
        exports = specs.len(),
        "generating exports"
    );

    Ok(generate_exports(Arc::new(model), Arc::new(names), specs).await)
}
