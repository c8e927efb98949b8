//! Manifest parsing and validation

use anyhow::{Context, Result};
use embindgen_core::{DefinitionDocument, ExportSpec, InterfaceModel, ModuleNames};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "embindgen.toml";

/// embindgen.toml manifest structure
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub module: ModuleSection,

    /// Export requests; `type` tags are checked while parsing
    #[serde(default)]
    pub exports: Vec<ExportSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSection {
    /// Definition document, relative to the manifest
    pub definition: PathBuf,

    /// Registration block name
    #[serde(default)]
    pub interface_name: Option<String>,

    pub container_name: String,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.module.definition.as_os_str().is_empty() {
            anyhow::bail!("Definition path cannot be empty");
        }

        if self.module.container_name.is_empty() {
            anyhow::bail!("Container name cannot be empty");
        }

        if self.exports.is_empty() {
            anyhow::bail!("Manifest declares no exports");
        }

        let mut targets = HashSet::new();
        for export in &self.exports {
            if !targets.insert(&export.filepath) {
                anyhow::bail!("Duplicate export target: {:?}", export.filepath);
            }
        }

        Ok(())
    }

    /// Names shared by every export
    pub fn names(&self) -> ModuleNames {
        ModuleNames::new(
            self.module.interface_name.as_deref(),
            &self.module.container_name,
        )
    }

    /// Definition path resolved against `base_dir`
    pub fn definition_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.module.definition)
    }

    /// Export requests rooted at `base_dir`
    pub fn export_specs(&self, base_dir: &Path) -> Vec<ExportSpec> {
        self.exports
            .iter()
            .cloned()
            .map(|export| export.with_root(base_dir))
            .collect()
    }
}

/// Directory that relative manifest paths are resolved against
pub fn base_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Check command implementation
pub fn check(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| PathBuf::from(MANIFEST_FILE));

    println!("Checking manifest: {}", path.display());

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let definition = manifest.definition_path(&base_dir(&path));
    let document = DefinitionDocument::from_file(&definition)
        .with_context(|| format!("Failed to load definition: {}", definition.display()))?;
    let summary = InterfaceModel::from_document(&document).summary();

    println!("✓ Definition: {}", definition.display());
    match &manifest.module.interface_name {
        Some(name) => println!("✓ Interface: {name}"),
        None => println!("✓ Interface: (bare registration block)"),
    }
    println!("✓ Container: {}", manifest.module.container_name);
    println!("✓ Entities: {summary}");
    println!("✓ Exports: {}", manifest.exports.len());
    println!("\nManifest is valid!");

    Ok(())
}
