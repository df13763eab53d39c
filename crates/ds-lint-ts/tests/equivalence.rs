//! Integration test: the structural and text extractors agree on
//! well-formed TSX, and rule runs through either engine are identical.

use ds_lint_core::{Markup, MarkupExtractor, TextExtractor, Validator};
use ds_lint_rules::Preset;
use ds_lint_ts::StructuralExtractor;
use std::fs;
use std::path::Path;

const SETTINGS_PAGE: &str = r#"import { Stack, Text, Modal } from "@ds/ui";
import { useState } from "react";

// <p>commented out markup is not an element</p>
export function Settings({ user, onSave }: Props) {
  const [open, setOpen] = useState<boolean>(false);
  const compact = user.items.length > 3 && user.items.length < 10;

  return (
    <>
      <Stack className="flex flex-col gap-4 p-10" data-testid="settings">
        <Text variant="heading">Settings</Text>
        {/* <img src="x" /> */}
        <div className={`grid m-2 ${compact ? "gap-2" : "gap-4"}`} onClick={() => setOpen(true)}>
          <img src={user.avatar} />
          <Box>
            <Box className="bg-blue-500">nested</Box>
          </Box>
        </div>
        <form>
          <label htmlFor="email">Email</label>
          <input id="email" type="email" disabled />
          <input type="text" {...register("name")} />
          <button type="submit" onClick={onSave}>
            <SaveIcon />
          </button>
        </form>
      </Stack>
      <Modal open={open} onClose={() => setOpen(false)}>
        <Dialog.Title>Confirm</Dialog.Title>
      </Modal>
    </>
  );
}
"#;

fn both(path: &str, src: &str) -> (Markup, Markup) {
    let path = Path::new(path);
    (
        TextExtractor::new().extract(path, src),
        StructuralExtractor::new().extract(path, src),
    )
}

// ── Markup model ──

#[test]
fn elements_agree_on_well_formed_tsx() {
    let (text, tree) = both("Settings.tsx", SETTINGS_PAGE);

    let names: Vec<&str> = tree.elements.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Stack", "Text", "div", "img", "Box", "Box", "form", "label", "input", "input",
            "button", "SaveIcon", "Modal", "Dialog.Title"
        ]
    );
    for (t, s) in text.elements.iter().zip(&tree.elements) {
        assert_eq!(t, s, "element `{}` differs between engines", s.name);
    }
    assert_eq!(text.elements.len(), tree.elements.len());
}

#[test]
fn class_attributes_agree_on_well_formed_tsx() {
    let (text, tree) = both("Settings.tsx", SETTINGS_PAGE);
    assert_eq!(text.class_attrs, tree.class_attrs);
    assert_eq!(tree.class_attrs.len(), 3);

    let tokens: Vec<&str> = tree
        .class_attrs
        .iter()
        .flat_map(|c| c.tokens())
        .map(|t| t.text)
        .collect();
    assert_eq!(
        tokens,
        vec!["flex", "flex-col", "gap-4", "p-10", "grid", "m-2", "bg-blue-500"]
    );
}

#[test]
fn typescript_files_have_no_markup_in_either_engine() {
    let src = "export const cast = <Widget>value;\nexport const ok = a < b && c > d;\n";
    let (text, tree) = both("cast.ts", src);
    assert_eq!(text, Markup::default());
    assert_eq!(tree, Markup::default());
}

// ── Rule runs ──

#[test]
fn validation_runs_are_identical_across_engines() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("src")).expect("create src");
    fs::write(dir.path().join("src/Settings.tsx"), SETTINGS_PAGE).expect("write fixture");

    let text_run = Validator::builder()
        .root(dir.path())
        .registry(Preset::Recommended.registry())
        .build()
        .expect("validator should build")
        .validate();

    let tree_validator = Validator::builder()
        .root(dir.path())
        .registry(Preset::Recommended.registry())
        .extractor(Box::new(StructuralExtractor::new()))
        .build()
        .expect("validator should build");
    assert_eq!(tree_validator.engine(), "tree");
    let tree_run = tree_validator.validate();

    assert!(tree_run.total_violations() > 0);
    assert_eq!(
        text_run.to_json().expect("json"),
        tree_run.to_json().expect("json")
    );
}
