//! # ds-lint-ts
//!
//! Tree-sitter based structural markup extraction for ds-lint.
//!
//! The rules in `ds-lint-rules` consume a [`Markup`](ds_lint_core::Markup)
//! model and never look at tags themselves. `ds-lint-core` builds that
//! model with a standalone tag scanner; this crate builds the same model
//! from a real TSX/TypeScript parse tree:
//!
//! - [`StructuralExtractor`] implements [`MarkupExtractor`](ds_lint_core::MarkupExtractor)
//!   with engine id `"tree"`
//! - `jsx_element`, `jsx_self_closing_element` and `jsx_attribute` nodes map
//!   to elements and attributes with the same byte offsets the scanner
//!   reports
//!
//! ## Example
//!
//! ```ignore
//! use ds_lint_core::Validator;
//! use ds_lint_rules::Preset;
//! use ds_lint_ts::StructuralExtractor;
//!
//! let validator = Validator::builder()
//!     .root("./src")
//!     .registry(Preset::Recommended.registry())
//!     .extractor(Box::new(StructuralExtractor::new()))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
mod jsx;

pub use extractor::StructuralExtractor;
