//! embindgen-core - Definition loading, classification and emission
//!
//! This crate turns one JSON description of a native module's public surface
//! into three artifacts that must stay in lockstep:
//! - [`emit::typescript`] TypeScript declarations for the module container
//! - [`emit::registration`] the `EMSCRIPTEN_BINDINGS` registration block
//! - [`emit::markdown`] reference documentation
//!
//! # Pipeline
//!
//! ```text
//! definition.json
//!     ↓
//!  [DefinitionDocument]      records, closed Definition enum
//!     ↓
//!  [InterfaceModel]          classified and ordered
//!     ↓
//!  ├─→ [typescript]   ─┐
//!  ├─→ [registration] ─┼─→ [compose] template + header ─→ file
//!  └─→ [markdown]     ─┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use embindgen_core::{DefinitionDocument, ExportKind, InterfaceModel, ModuleNames};
//!
//! let json = r#"{
//!     "objects": [
//!         {
//!             "type": "enum",
//!             "name": "Color",
//!             "cppType": "Color",
//!             "values": [
//!                 { "value": "RED", "cppValue": "Color::RED" },
//!                 { "value": "GREEN", "cppValue": "Color::GREEN" }
//!             ]
//!         }
//!     ]
//! }"#;
//!
//! let document = DefinitionDocument::from_str(json).unwrap();
//! let model = InterfaceModel::from_document(&document);
//! let names = ModuleNames::new(Some("Palette"), "PaletteContainer");
//!
//! let ts = ExportKind::TypeScript.render(&names, &model);
//! assert!(ts.contains("export const enum Color {"));
//!
//! let cpp = ExportKind::Native.render(&names, &model);
//! assert!(cpp.contains(r#".value("GREEN", Color::GREEN)"#));
//! ```

pub mod compose;
pub mod definition;
pub mod emit;
mod error;
pub mod export;
pub mod model;
pub mod signature;

pub use compose::{PLACEHOLDER, Template, compose, load_template};
pub use definition::{Definition, DefinitionDocument, DefinitionKind};
pub use error::{GeneratorError, GeneratorResult};
pub use export::{
    ExportFailure, ExportKind, ExportOutcome, ExportSpec, GenerationReport, ModuleNames, generate,
    generate_exports,
};
pub use model::{InterfaceModel, ModelSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DefinitionDocument, ExportKind, ExportSpec, GeneratorError, GeneratorResult,
        InterfaceModel, ModuleNames, generate,
    };
}
