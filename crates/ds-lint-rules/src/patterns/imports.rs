//! Import-path resolver.
//!
//! Application code may import the design-system package and its public
//! entry points, and nothing from competing UI libraries.

use super::compile;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Default design-system package.
pub const DEFAULT_PACKAGE: &str = "@ds/ui";

/// UI libraries that duplicate what the design system provides.
pub const DEFAULT_FOREIGN: &[&str] = &[
    "@mui/",
    "@material-ui/",
    "@chakra-ui/",
    "antd",
    "react-bootstrap",
    "@mantine/",
    "semantic-ui-react",
    "@headlessui/react",
    "@radix-ui/",
];

/// Package sub-directories that are implementation details.
const INTERNAL_DIRS: &[&str] = &["src", "dist", "lib"];

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"(?m)(?:^|[;\s])(?:import|export)\b[^'"`;]*?\bfrom\s*(['"])([^'"\n]+)['"]|(?:^|[;\s])import\s*(['"])([^'"\n]+)['"]|\b(?:require|import)\s*\(\s*(['"])([^'"\n]+)['"]\s*\)"#,
    )
});

/// How a module specifier relates to the design system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// A UI library the design system replaces.
    Foreign {
        /// The matched library entry.
        library: String,
    },
    /// A path into the design-system package internals.
    DeepImport {
        /// The public entry point to import from instead.
        public_path: String,
    },
    /// Fine.
    Ok,
}

/// A module specifier found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef<'a> {
    /// The specifier text.
    pub specifier: &'a str,
    /// Absolute range of the specifier, quotes excluded.
    pub range: Range<usize>,
}

/// Which imports are allowed.
#[derive(Debug, Clone)]
pub struct ImportPolicy {
    package: String,
    foreign: Vec<String>,
}

impl Default for ImportPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportPolicy {
    /// Creates the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            foreign: DEFAULT_FOREIGN.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Sets the design-system package name.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Adds foreign libraries.
    #[must_use]
    pub fn foreign<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for lib in libraries {
            let lib = lib.into();
            if !self.foreign.contains(&lib) {
                self.foreign.push(lib);
            }
        }
        self
    }

    /// Returns the design-system package name.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// Classifies a module specifier.
    #[must_use]
    pub fn classify(&self, specifier: &str) -> ImportKind {
        if let Some(library) = self
            .foreign
            .iter()
            .find(|lib| matches_library(specifier, lib))
        {
            return ImportKind::Foreign {
                library: library.clone(),
            };
        }

        let Some(rest) = specifier
            .strip_prefix(self.package.as_str())
            .and_then(|r| r.strip_prefix('/'))
        else {
            return ImportKind::Ok;
        };
        let mut segments = rest.split('/');
        let first = segments.next().unwrap_or_default();
        if INTERNAL_DIRS.contains(&first) {
            let public_path = match segments
                .map(strip_extension)
                .find(|s| !s.is_empty() && *s != "index")
            {
                Some(component) => format!("{}/{component}", self.package),
                None => self.package.clone(),
            };
            return ImportKind::DeepImport { public_path };
        }
        ImportKind::Ok
    }
}

fn matches_library(specifier: &str, library: &str) -> bool {
    if library.ends_with('/') {
        return specifier.starts_with(library);
    }
    specifier == library
        || specifier
            .strip_prefix(library)
            .is_some_and(|r| r.starts_with('/'))
}

fn strip_extension(component: &str) -> &str {
    component
        .rsplit_once('.')
        .map_or(component, |(stem, _)| stem)
}

/// Finds module specifiers in import, export-from, `require()` and dynamic
/// `import()` forms.
#[must_use]
pub fn find_imports(text: &str) -> Vec<ImportRef<'_>> {
    IMPORT
        .captures_iter(text)
        .filter_map(|caps| {
            let spec = caps.get(2).or_else(|| caps.get(4)).or_else(|| caps.get(6))?;
            Some(ImportRef {
                specifier: spec.as_str(),
                range: spec.range(),
            })
        })
        .collect()
}
