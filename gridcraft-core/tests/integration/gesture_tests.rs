//! Gesture scripts loaded from disk and replayed through the editor

use std::fs;

use gridcraft_core::{
    ConfigManager, DragSource, DropTarget, HoverCandidate, LayoutEditor, NestingLevel, Point,
    Rect, StepOutcome, sample_layout,
};
use tempfile::TempDir;

const ROW_SWAP_JSON: &str = r#"{
  "steps": [
    {"step": "drag_start", "source": {"kind": "row", "row": "row2"}},
    {"step": "hover",
     "candidate": {"level": "row", "target": "row1",
                   "bounds": {"x": 0, "y": 0, "width": 400, "height": 200}},
     "pointer": {"x": 20, "y": 30}},
    {"step": "drop", "target": {"kind": "row", "row": "row1"}}
  ]
}"#;

const NEW_ITEM_TOML: &str = r#"
[[steps]]
step = "drag_start"
source = { kind = "new_item", template = { type = "input", label = "Input Field" } }

[[steps]]
step = "hover"
candidate = { level = "item", target = "comp3", parent = "column2", bounds = { x = 0.0, y = 0.0, width = 100.0, height = 40.0 } }
pointer = { x = 50.0, y = 35.0 }

[[steps]]
step = "drop"
target = { kind = "column", row = "row1", column = "column2" }

[[steps]]
step = "resize"
row = "row1"
column = "column2"
delta = -500.0
"#;

fn write_script(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn json_script_matches_manual_gesture() {
    let dir = TempDir::new().unwrap();
    let script = ConfigManager::load_script(&write_script(&dir, "swap.json", ROW_SWAP_JSON)).unwrap();

    let mut replayed = LayoutEditor::new(sample_layout());
    let reports = replayed.replay(&script.steps);
    let steps: Vec<_> = reports.iter().map(|r| r.step).collect();
    assert_eq!(steps, ["drag_start", "hover", "drop"]);
    assert_eq!(reports[1].outcome, StepOutcome::Indicator { changed: true });
    assert!(matches!(reports[2].outcome, StepOutcome::Applied { .. }));

    let mut manual = LayoutEditor::new(sample_layout());
    manual.begin_drag(DragSource::Row {
        row: "row2".to_string(),
    });
    manual.drag_over(
        &HoverCandidate {
            level: NestingLevel::Row,
            target: "row1".to_string(),
            parent: None,
            bounds: Rect::new(0.0, 0.0, 400.0, 200.0),
        },
        Point::new(20.0, 30.0),
    );
    manual.drop_on(&DropTarget::Row {
        row: "row1".to_string(),
    });

    assert_eq!(replayed.tree(), manual.tree());
    let rows: Vec<_> = replayed.tree().rows().keys().cloned().collect();
    assert_eq!(rows, ["row2", "row1"]);
}

#[test]
fn toml_script_inserts_and_resizes() {
    let dir = TempDir::new().unwrap();
    let script = ConfigManager::load_script(&write_script(&dir, "item.toml", NEW_ITEM_TOML)).unwrap();

    let mut editor = LayoutEditor::new(sample_layout());
    let reports = editor.replay(&script.steps);

    assert_eq!(reports.len(), 4);
    assert_eq!(reports[3].outcome, StepOutcome::Resized { height: 150.0 });
    let ids: Vec<_> = editor
        .tree()
        .column_items("row1", "column2")
        .unwrap()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(ids, ["comp3", "input_1", "comp4"]);
    assert_eq!(editor.version(), 2);
}

#[test]
fn replay_report_serializes_flat() {
    let dir = TempDir::new().unwrap();
    let script = ConfigManager::load_script(&write_script(&dir, "swap.json", ROW_SWAP_JSON)).unwrap();
    let mut editor = LayoutEditor::new(sample_layout());
    let reports = editor.replay(&script.steps);

    let json = serde_json::to_value(&reports[2]).unwrap();
    assert_eq!(json["index"], 2);
    assert_eq!(json["step"], "drop");
    assert_eq!(json["outcome"], "applied");
    assert_eq!(json["effect"]["effect"], "row_moved");
    assert_eq!(json["effect"]["index"], 0);
}

#[test]
fn malformed_script_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "broken.json", r#"{"steps": [{"step": "fly"}]}"#);
    let err = ConfigManager::load_script(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"), "{err}");
}
