//! Class-token taxonomy.
//!
//! A class token is checked against three ordered lists: the layout and
//! spacing allow-list, the design block-list (things the design system
//! provides through components and tokens), and utility-framework shapes
//! the design system does not ship. Lists are checked in that order and
//! the first match wins. Tokens matching none are unknown and never
//! reported; product code is free to carry its own class names.

use super::compile;
use ds_lint_core::Category;
use once_cell::sync::Lazy;
use regex::Regex;

/// Spacing utility prefixes, longest first so `px` wins over `p`.
pub const SPACING_PREFIXES: &[&str] = &[
    "space-x", "space-y", "inset-x", "inset-y", "gap-x", "gap-y", "inset", "gap", "px", "py",
    "pt", "pr", "pb", "pl", "ps", "pe", "mx", "my", "mt", "mr", "mb", "ml", "ms", "me", "top",
    "right", "bottom", "left", "p", "m",
];

const PALETTE: &str = "slate|gray|grey|zinc|neutral|stone|red|orange|amber|yellow|lime|green|emerald|teal|cyan|sky|blue|indigo|violet|purple|fuchsia|pink|rose";

static ALLOWED: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(flex|inline-flex|grid|inline-grid|block|inline-block|inline|hidden|contents|flow-root)$",
        r"^flex-(row|col|row-reverse|col-reverse|wrap|wrap-reverse|nowrap|1|auto|initial|none)$",
        r"^(grow|shrink)(-0)?$",
        r"^(items|justify|content|self|place-items|place-content|place-self)-(start|end|center|between|around|evenly|stretch|baseline|normal|auto)$",
        r"^(order|z)-(\d+|first|last|none|auto)$",
        r"^(grid-cols|grid-rows|col-span|row-span)-(\d+|full|none)$",
        r"^(static|fixed|absolute|relative|sticky)$",
        r"^overflow(-[xy])?-(auto|hidden|visible|scroll|clip)$",
        r"^(visible|invisible|truncate|sr-only|not-sr-only|isolate)$",
        r"^text-(left|center|right|justify|start|end)$",
        r"^-?(space-x|space-y|inset-x|inset-y|gap-x|gap-y|inset|gap|px|py|pt|pr|pb|pl|ps|pe|mx|my|mt|mr|mb|ml|ms|me|top|right|bottom|left|p|m)-(\d+|px|auto)$",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

static FORBIDDEN: Lazy<Vec<(Regex, Forbidden)>> = Lazy::new(|| {
    vec![
        (
            compile(&format!(
                r"^(bg|text|border|ring|outline|fill|stroke|from|via|to|divide|placeholder|accent|caret|decoration|shadow)-({PALETTE})-(50|[1-9]00|950)(/\d+)?$"
            )),
            Forbidden {
                category: Category::Colors,
                replacement: "Use a component prop or a semantic color token such as var(--surface-*) or var(--text-*)",
            },
        ),
        (
            compile(r"^(bg|text|border|ring|fill|stroke)-(white|black)(/\d+)?$"),
            Forbidden {
                category: Category::Colors,
                replacement: "Use a semantic color token such as var(--surface-*) or var(--text-*)",
            },
        ),
        (
            compile(r"^text-(xs|sm|base|lg|xl|[2-9]xl)$"),
            Forbidden {
                category: Category::Typography,
                replacement: "Use the Text component's variant prop",
            },
        ),
        (
            compile(r"^(font-(thin|extralight|light|normal|medium|semibold|bold|extrabold|black)|leading-\w+|tracking-\w+)$"),
            Forbidden {
                category: Category::Typography,
                replacement: "Use the Text component's variant or weight prop",
            },
        ),
        (
            compile(r"^shadow(-(xs|sm|md|lg|xl|2xl|inner|none))?$"),
            Forbidden {
                category: Category::Effects,
                replacement: "Use an elevation token, var(--elevation-*)",
            },
        ),
        (
            compile(r"^rounded(-(t|r|b|l|tl|tr|bl|br|s|e|ss|se|es|ee))?(-(none|xs|sm|md|lg|xl|2xl|3xl|full))?$"),
            Forbidden {
                category: Category::Effects,
                replacement: "Use a radius token, var(--radius-*)",
            },
        ),
        (
            compile(r"^border(-[xytrblse])?(-(0|2|4|8))?$|^border-(solid|dashed|dotted|double|none)$"),
            Forbidden {
                category: Category::Borders,
                replacement: "Use a border token, var(--border-*)",
            },
        ),
    ]
});

static TAILWIND_LIKE: Lazy<Vec<(Regex, TailwindLike)>> = Lazy::new(|| {
    [
        (r"^[a-z0-9-]+:", "variant-prefixed utility (hover:, md:, dark:)"),
        (r"\[.*\]", "arbitrary-value utility"),
        (r"^!", "important modifier"),
        (
            r"^(transition(-\w+)?|duration-\d+|ease-\w+|delay-\d+|animate-\w+)$",
            "motion utility",
        ),
        (
            r"^(opacity-\d+|blur(-\w+)?|backdrop-[\w-]+|cursor-[\w-]+|select-\w+|pointer-events-\w+|ring(-\w+)?|outline(-\w+)?|scale-\d+|rotate-\d+|-?translate-[xy]-[\w/]+|skew-[xy]-\d+|transform)$",
            "effect or interaction utility",
        ),
        (r"^(w|h|min-w|min-h|max-w|max-h|size)-", "sizing utility"),
        (r"^(bg|text|border)-", "color or appearance utility"),
    ]
    .into_iter()
    .map(|(pattern, description)| (compile(pattern), TailwindLike { description }))
    .collect()
});

/// A design block-list match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forbidden {
    /// What the class styles.
    pub category: Category,
    /// What to use instead.
    pub replacement: &'static str,
}

/// A utility-framework shape the design system does not ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailwindLike {
    /// What kind of utility it is.
    pub description: &'static str,
}

/// Classification of one class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Layout or spacing utility the design system allows.
    Allowed,
    /// Design utility that must come from components or tokens.
    Forbidden(Forbidden),
    /// Utility-framework class.
    TailwindLike(TailwindLike),
    /// Anything else.
    Unknown,
}

/// Returns true if `token` is an allowed layout or spacing utility.
#[must_use]
pub fn is_allowed(token: &str) -> bool {
    ALLOWED.iter().any(|re| re.is_match(token))
}

/// Returns the block-list entry `token` matches.
#[must_use]
pub fn forbidden(token: &str) -> Option<Forbidden> {
    FORBIDDEN
        .iter()
        .find(|(re, _)| re.is_match(token))
        .map(|(_, f)| *f)
}

/// Returns the utility-framework shape `token` matches.
#[must_use]
pub fn tailwind_like(token: &str) -> Option<TailwindLike> {
    TAILWIND_LIKE
        .iter()
        .find(|(re, _)| re.is_match(token))
        .map(|(_, t)| *t)
}

/// Classifies `token` against the ordered lists.
#[must_use]
pub fn classify(token: &str) -> ClassKind {
    if is_allowed(token) {
        ClassKind::Allowed
    } else if let Some(f) = forbidden(token) {
        ClassKind::Forbidden(f)
    } else if let Some(t) = tailwind_like(token) {
        ClassKind::TailwindLike(t)
    } else {
        ClassKind::Unknown
    }
}

/// Scale of a spacing utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingScale {
    /// `p-N`: N pixels.
    Px(u32),
    /// `p-px` or `p-1`: a one pixel hairline.
    Hairline,
    /// `m-auto`.
    Auto,
}

/// A parsed spacing utility such as `-mt-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingClass<'a> {
    /// Leading `-` for negative margins.
    pub negative: bool,
    /// Utility prefix (`p`, `mt`, `gap-x`).
    pub prefix: &'a str,
    /// Scale value.
    pub scale: SpacingScale,
}

impl SpacingClass<'_> {
    /// Renders the same utility with a different pixel value.
    #[must_use]
    pub fn with_px(&self, px: u32) -> String {
        let sign = if self.negative { "-" } else { "" };
        format!("{sign}{}-{px}", self.prefix)
    }
}

/// Parses a spacing utility.
#[must_use]
pub fn spacing_class(token: &str) -> Option<SpacingClass<'_>> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    SPACING_PREFIXES.iter().find_map(|prefix| {
        let value = rest.strip_prefix(prefix)?.strip_prefix('-')?;
        let scale = match value {
            "px" | "1" => SpacingScale::Hairline,
            "auto" => SpacingScale::Auto,
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                SpacingScale::Px(digits.parse().ok()?)
            }
            _ => return None,
        };
        Some(SpacingClass {
            negative,
            prefix,
            scale,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_and_spacing_are_allowed() {
        for token in ["flex", "items-center", "justify-between", "p-4", "-mt-8", "gap-x-2", "text-center", "m-auto", "p-10"] {
            assert_eq!(classify(token), ClassKind::Allowed, "{token}");
        }
    }

    #[test]
    fn design_utilities_are_forbidden_with_category() {
        let cases = [
            ("bg-blue-500", Category::Colors),
            ("text-gray-900", Category::Colors),
            ("border-red-200/50", Category::Colors),
            ("bg-white", Category::Colors),
            ("text-lg", Category::Typography),
            ("font-semibold", Category::Typography),
            ("shadow-md", Category::Effects),
            ("rounded-lg", Category::Effects),
            ("rounded", Category::Effects),
            ("border", Category::Borders),
            ("border-t-2", Category::Borders),
        ];
        for (token, category) in cases {
            match classify(token) {
                ClassKind::Forbidden(f) => assert_eq!(f.category, category, "{token}"),
                other => panic!("{token} classified as {other:?}"),
            }
        }
    }

    #[test]
    fn framework_shapes_are_tailwind_like() {
        for token in ["hover:bg-blue-500", "md:flex", "w-[320px]", "!p-4", "transition", "duration-200", "opacity-50", "cursor-pointer", "w-full", "bg-primary"] {
            assert!(
                matches!(classify(token), ClassKind::TailwindLike(_)),
                "{token} -> {:?}",
                classify(token)
            );
        }
    }

    #[test]
    fn unknown_tokens_pass_through() {
        for token in ["card", "Button_root__x1", "my-widget-title", "ds-stack"] {
            assert_eq!(classify(token), ClassKind::Unknown, "{token}");
        }
    }

    #[test]
    fn allow_and_block_lists_are_disjoint() {
        for token in ["p-4", "flex", "text-left", "-m-2", "gap-8", "overflow-hidden"] {
            assert!(is_allowed(token));
            assert!(forbidden(token).is_none(), "{token}");
        }
    }

    #[test]
    fn parses_spacing_classes() {
        let c = spacing_class("-mt-10").unwrap();
        assert!(c.negative);
        assert_eq!(c.prefix, "mt");
        assert_eq!(c.scale, SpacingScale::Px(10));
        assert_eq!(c.with_px(8), "-mt-8");

        assert_eq!(spacing_class("px-6").unwrap().prefix, "px");
        assert_eq!(spacing_class("p-px").unwrap().scale, SpacingScale::Hairline);
        assert_eq!(spacing_class("p-1").unwrap().scale, SpacingScale::Hairline);
        assert_eq!(spacing_class("space-x-4").unwrap().prefix, "space-x");
        assert!(spacing_class("flex").is_none());
        assert!(spacing_class("p-").is_none());
        assert!(spacing_class("pb-1.5").is_none());
    }
}
