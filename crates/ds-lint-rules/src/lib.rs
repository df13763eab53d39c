//! # ds-lint-rules
//!
//! Built-in design-system rules for ds-lint, and the pattern library they
//! are built from.
//!
//! ## Available Rules
//!
//! | Code | Name | Default | Fix |
//! |------|------|---------|-----|
//! | DS001 | `no-forbidden-classes` | error | removes the class |
//! | DS002 | `no-tailwind-only-classes` | warning | removes the class |
//! | DS003 | `spacing-grid-classes` | error | snaps to the grid |
//! | DS004 | `no-raw-colors` | error | manual |
//! | DS005 | `no-foundation-tokens` | error | manual |
//! | DS006 | `spacing-grid-values` | warning | snaps to the grid |
//! | DS007 | `import-paths` | error | deep imports only |
//! | IX001 | `keyboard-handlers` | warning | manual |
//! | IX002 | `modal-focus-trap` | warning | manual |
//! | A11Y001 | `accessible-labels` | error | manual |
//! | A11Y002 | `img-alt` | error | manual |
//!
//! ## Usage
//!
//! ```ignore
//! use ds_lint_core::Validator;
//! use ds_lint_rules::Preset;
//!
//! let validator = Validator::builder()
//!     .root("./src")
//!     .registry(Preset::Recommended.registry())
//!     .build()?;
//! let run = validator.validate();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod patterns;

mod accessible_labels;
mod img_alt;
mod import_paths;
mod keyboard_handlers;
mod modal_focus_trap;
mod no_forbidden_classes;
mod no_foundation_tokens;
mod no_raw_colors;
mod no_tailwind_only_classes;
mod presets;
mod spacing_grid_classes;
mod spacing_grid_values;
mod support;

pub use accessible_labels::AccessibleLabels;
pub use img_alt::ImgAlt;
pub use import_paths::ImportPaths;
pub use keyboard_handlers::KeyboardHandlers;
pub use modal_focus_trap::ModalFocusTrap;
pub use no_forbidden_classes::NoForbiddenClasses;
pub use no_foundation_tokens::NoFoundationTokens;
pub use no_raw_colors::NoRawColors;
pub use no_tailwind_only_classes::NoTailwindOnlyClasses;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, registry_from_config, strict_rules, Preset,
};
pub use spacing_grid_classes::SpacingGridClasses;
pub use spacing_grid_values::SpacingGridValues;

/// Re-export core types for convenience.
pub use ds_lint_core::{Rule, RuleRegistry, Severity, Violation};
