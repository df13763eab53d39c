//! Integration test: built-in rules end-to-end through the validator and
//! the autofix engine, on files written to a temporary project.

use ds_lint_core::{fix, Category, Severity, ValidationRun, Validator};
use ds_lint_rules::Preset;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write fixture");
    }
    dir
}

fn validate(root: &Path) -> ValidationRun {
    Validator::builder()
        .root(root)
        .registry(Preset::Recommended.registry())
        .build()
        .expect("validator should build")
        .validate()
}

#[test]
fn class_list_yields_exactly_color_and_spacing() {
    let dir = project(&[(
        "src/Box.tsx",
        r#"export const Box = () => <div className="flex bg-blue-500 p-10">x</div>;
"#,
    )]);
    let run = validate(dir.path());
    let violations: Vec<_> = run.violations().map(|(_, v)| v).collect();

    assert_eq!(
        violations.len(),
        2,
        "expected 2 violations, got {:#?}",
        violations.iter().map(|v| v.to_string()).collect::<Vec<_>>()
    );
    let color = violations.iter().find(|v| v.code == "DS001").expect("DS001");
    assert_eq!(color.category, Some(Category::Colors));
    let spacing = violations.iter().find(|v| v.code == "DS003").expect("DS003");
    assert_eq!(
        spacing.replacement().map(|r| r.new_text.as_str()),
        Some("p-8")
    );
}

#[test]
fn clean_project_has_no_violations() {
    let dir = project(&[
        (
            "src/Card.tsx",
            r#"import { Stack, Text } from "@ds/ui";

export function Card({ title, onOpen }: Props) {
  return (
    <Stack className="flex flex-col gap-4 p-4" style={{ padding: 8, margin: "16px 0" }}>
      <Text variant="heading">{title}</Text>
      <img src={cover} alt="" />
      <button onClick={onOpen} aria-label="Open">
        <OpenIcon />
      </button>
      <div style={{ color: "var(--text-muted)" }}>{title}</div>
    </Stack>
  );
}
"#,
        ),
        ("src/util.ts", "export const add = (a: number, b: number) => a + b;\n"),
    ]);
    let run = validate(dir.path());
    assert_eq!(run.files_scanned, 2);
    assert_eq!(
        run.total_violations(),
        0,
        "{:#?}",
        run.violations().map(|(_, v)| v.to_string()).collect::<Vec<_>>()
    );
    assert!(run.results.is_empty());
}

#[test]
fn two_fixes_on_one_line_leave_surrounding_text_intact() {
    let dir = project(&[(
        "src/Panel.tsx",
        "const Panel = () => (\n  <section className=\"bg-blue-500 p-10 shadow-md\" id=\"panel\">Body</section>\n);\n",
    )]);
    let registry = Preset::Recommended.registry();
    let run = validate(dir.path());
    assert_eq!(run.total_violations(), 3);

    let fixes = fix::apply(&run, &registry);
    assert_eq!(fixes.values().map(Vec::len).sum::<usize>(), 3);

    let fixed = fs::read_to_string(dir.path().join("src/Panel.tsx")).expect("read back");
    assert_eq!(
        fixed,
        "const Panel = () => (\n  <section className=\"p-8\" id=\"panel\">Body</section>\n);\n"
    );

    let after = validate(dir.path());
    assert_eq!(after.total_violations(), 0);
}

#[test]
fn fixing_twice_changes_nothing() {
    let dir = project(&[(
        "src/List.tsx",
        r#"export const List = () => <ul className="m-6 text-lg hover:underline">{items}</ul>;
"#,
    )]);
    let registry = Preset::Recommended.registry();
    let run = validate(dir.path());
    let first = fix::apply(&run, &registry);
    assert!(!first.is_empty());
    let once = fs::read_to_string(dir.path().join("src/List.tsx")).expect("read back");

    // Stale violations from the first run no longer match the file.
    let second = fix::apply(&run, &registry);
    assert!(second.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/List.tsx")).expect("read back"),
        once
    );

    let rerun = validate(dir.path());
    assert!(fix::apply(&rerun, &registry).is_empty());
}

#[test]
fn manual_only_findings_are_never_rewritten() {
    let source = r##"const style = { color: "#fff", background: "var(--blue-500)" };
"##;
    let dir = project(&[("src/theme.ts", source)]);
    let registry = Preset::Recommended.registry();
    let run = validate(dir.path());
    let mut codes: Vec<&str> = run.violations().map(|(_, v)| v.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["DS004", "DS005"]);

    assert!(fix::apply(&run, &registry).is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/theme.ts")).expect("read back"),
        source
    );
}

#[test]
fn every_violation_is_documented_and_categorised() {
    let dir = project(&[(
        "src/Everything.tsx",
        r#"import { Button } from "@mui/material";
const s = { padding: 10, color: "red", border: "1px solid var(--palette-gray)" };
export const X = () => (
  <Modal open>
    <div className="text-lg w-[3px] p-10" onClick={go}>
      <img src={a} />
      <input type="text" />
    </div>
  </Modal>
);
"#,
    )]);
    let run = validate(dir.path());
    let mut codes: Vec<&str> = run.violations().map(|(_, v)| v.code.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(
        codes,
        vec![
            "A11Y001", "A11Y002", "DS001", "DS002", "DS003", "DS004", "DS005", "DS006", "DS007",
            "IX001", "IX002"
        ]
    );
    for (_, v) in run.violations() {
        assert!(v.doc_ref.is_some(), "{} has no doc_ref", v.code);
        assert!(v.category.is_some(), "{} has no category", v.code);
    }
}

#[test]
fn strict_preset_raises_warnings() {
    let dir = project(&[(
        "src/A.tsx",
        r#"export const A = () => <div className="transition">x</div>;
"#,
    )]);
    let run = Validator::builder()
        .root(dir.path())
        .registry(Preset::Strict.registry())
        .build()
        .expect("validator should build")
        .validate();
    let severities: Vec<Severity> = run.violations().map(|(_, v)| v.severity).collect();
    assert_eq!(severities, vec![Severity::Error]);
}
