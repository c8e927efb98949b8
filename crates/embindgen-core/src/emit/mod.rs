//! Emitters for the three generated artifacts.
//!
//! Every emitter consumes the same [`InterfaceModel`](crate::model::InterfaceModel)
//! and walks its categories in the model's order, so the declarations, the
//! registrations and the documentation list the same symbols under the same
//! names.
//!
//! | Export type | Emitter | Artifact |
//! |-------------|---------|----------|
//! | `ts` | [`typescript::generate_typescript`] | `export const enum` / `export interface` declarations |
//! | `c++` | [`registration::generate_registration`] | `EMSCRIPTEN_BINDINGS` block |
//! | `md` | [`markdown::generate_markdown`] | reference documentation |

pub mod markdown;
pub mod registration;
pub mod typescript;

pub use markdown::generate_markdown;
pub use registration::generate_registration;
pub use typescript::generate_typescript;
