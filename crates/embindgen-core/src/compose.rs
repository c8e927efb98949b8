//! Template composition and provenance headers.
//!
//! Every export may name a template file. A template is plain text holding
//! the [`PLACEHOLDER`] token; the generated body replaces the first
//! occurrence. A template that is missing, unreadable or lacks the token is
//! simply not applied.
//!
//! Native exports additionally start with a provenance header:
//!
//! ```text
//! // This file was created automatically
//! // from .ci/Geometry.cpp.in
//!
//! <composed text>
//! ```
//!
//! The `// from` line is only present when a template was applied.

use crate::export::ExportKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token replaced by the generated body.
pub const PLACEHOLDER: &str = "${DATA}";

/// First line of every native export.
pub const GENERATED_HEADER: &str = "// This file was created automatically";

/// A template as seen by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// The template file was read.
    Available { path: PathBuf, text: String },
    /// No template was configured, or it could not be read.
    Unavailable,
}

impl Template {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Template::Available {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Whether composing with this template substitutes the body
    pub fn has_placeholder(&self) -> bool {
        matches!(self, Template::Available { text, .. } if text.contains(PLACEHOLDER))
    }
}

/// Read a template, falling back to [`Template::Unavailable`].
///
/// A relative `path` is read from `root` when one is given; the returned
/// template keeps `path` as configured.
pub async fn load_template(path: Option<&Path>, root: Option<&Path>) -> Template {
    let Some(path) = path else {
        return Template::Unavailable;
    };
    let location = match root {
        Some(root) => root.join(path),
        None => path.to_path_buf(),
    };

    match tokio::fs::read_to_string(&location).await {
        Ok(text) => Template::new(path, text),
        Err(err) => {
            debug!(
                template = %location.display(),
                error = %err,
                "template not readable, using generated body as is"
            );
            Template::Unavailable
        }
    }
}

/// Combine a generated body with its template and header.
pub fn compose(kind: ExportKind, body: &str, template: &Template) -> String {
    let substituted = match template {
        Template::Available { path, text } if text.contains(PLACEHOLDER) => {
            Some((path, text.replacen(PLACEHOLDER, body, 1)))
        }
        _ => None,
    };

    if !kind.is_native() {
        return match substituted {
            Some((_, text)) => text,
            None => body.to_string(),
        };
    }

    let mut header = format!("{GENERATED_HEADER}\n");
    let text = match substituted {
        Some((path, text)) => {
            header.push_str(&format!("// from {}\n", path.display()));
            text
        }
        None => body.to_string(),
    };

    format!("{header}\n{text}")
}
