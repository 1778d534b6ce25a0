#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use serde_json::Value;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn replayer() -> Replayer {
    Replayer::new(EditorCore::new(), ChaCha8Rng::seed_from_u64(7))
}

/// Run `script` and return every output line parsed as JSON.
fn replay(script: &str) -> Vec<Value> {
    let mut out = Vec::new();
    replayer().run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn final_rects(lines: &[Value]) -> &Vec<Value> {
    let last = lines.last().unwrap();
    assert_eq!(last["type"], "final");
    last["rects"].as_array().unwrap()
}

fn types(lines: &[Value]) -> Vec<&str> {
    lines.iter().map(|l| l["type"].as_str().unwrap()).collect()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn every_step_kind_parses() {
    let script = [
        r#"{"op":"add"}"#,
        r#"{"op":"pointer_down","x":1,"y":2}"#,
        r#"{"op":"hover","x":1,"y":2}"#,
        r#"{"op":"drag_start","rect":0}"#,
        r#"{"op":"drag_move","rect":0,"x":1,"y":2}"#,
        r#"{"op":"drag_end","rect":0,"x":1,"y":2}"#,
        r#"{"op":"drag_cancel","rect":0}"#,
        r#"{"op":"rotate_start","rect":0}"#,
        r#"{"op":"rotate_move","rect":0,"x":1,"y":2,"rotation":30,"scale_x":1.5}"#,
        r#"{"op":"rotate_end","rect":0,"x":1,"y":2,"rotation":30}"#,
        r#"{"op":"flip","rect":0}"#,
        r#"{"op":"replace","rect":0,"x":1,"y":2}"#,
        r#"{"op":"remove","rect":0}"#,
        r#"{"op":"resize_stage","width":320,"height":240}"#,
    ];
    for line in script {
        assert!(serde_json::from_str::<ScriptStep>(line).is_ok(), "failed to parse {line}");
    }
}

#[test]
fn rotate_scale_defaults_to_one() {
    let step: ScriptStep = serde_json::from_str(r#"{"op":"rotate_end","rect":0,"x":0,"y":0,"rotation":90}"#).unwrap();
    assert_eq!(
        step,
        ScriptStep::RotateEnd { rect: 0, x: 0.0, y: 0.0, rotation: 90.0, scale_x: 1.0, scale_y: 1.0 }
    );
}

#[test]
fn bad_json_reports_line_number() {
    let script = "{\"op\":\"add\"}\n\n{\"op\":\"teleport\"}\n";
    let err = replayer().run(script.as_bytes(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ReplayError::Json { line: 3, .. }), "got {err}");
}

#[test]
fn unknown_ordinal_is_an_error() {
    let script = "{\"op\":\"add\"}\n{\"op\":\"flip\",\"rect\":1}\n";
    let err = replayer().run(script.as_bytes(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ReplayError::UnknownRect { line: 2, ordinal: 1 }), "got {err}");
}

// =============================================================
// Replay
// =============================================================

#[test]
fn empty_script_prints_empty_collection() {
    let lines = replay("");
    assert_eq!(lines.len(), 1);
    assert!(final_rects(&lines).is_empty());
}

#[test]
fn add_select_drag_commits_clamped_position() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"pointer_down","x":320,"y":180}
{"op":"drag_start","rect":0}
{"op":"drag_move","rect":0,"x":-50,"y":-50}
{"op":"drag_end","rect":0,"x":600,"y":300}
"#,
    );
    let kinds = types(&lines);
    assert_eq!(kinds.iter().filter(|k| **k == "rect_committed").count(), 1);
    let preview = lines.iter().find(|l| l["type"] == "live_preview").unwrap();
    assert_eq!((preview["rect"]["x"].as_f64(), preview["rect"]["y"].as_f64()), (Some(0.0), Some(0.0)));

    let rects = final_rects(&lines);
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0]["x"], 540.0);
    assert_eq!(rects[0]["y"], 260.0);
    assert_eq!(rects[0]["strokeWidth"], 2.0);
}

#[test]
fn drag_cancel_leaves_collection_untouched() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"pointer_down","x":320,"y":180}
{"op":"drag_start","rect":0}
{"op":"drag_move","rect":0,"x":10,"y":10}
{"op":"drag_cancel","rect":0}
"#,
    );
    assert!(!types(&lines).contains(&"rect_committed"));
    let rects = final_rects(&lines);
    assert_eq!((rects[0]["x"].as_f64(), rects[0]["y"].as_f64()), (Some(270.0), Some(130.0)));
}

#[test]
fn flip_via_overlay_click() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"pointer_down","x":320,"y":180}
{"op":"pointer_down","x":320,"y":90}
"#,
    );
    let rects = final_rects(&lines);
    assert_eq!(rects[0]["rotation"], 180.0);
    assert!((rects[0]["x"].as_f64().unwrap() - 370.0).abs() < 1e-9);
}

#[test]
fn rotate_discards_scale() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"pointer_down","x":320,"y":180}
{"op":"rotate_start","rect":0}
{"op":"rotate_move","rect":0,"x":280,"y":120,"rotation":45,"scale_x":1.3,"scale_y":1.3}
{"op":"rotate_end","rect":0,"x":280,"y":120,"rotation":45,"scale_x":1.3,"scale_y":1.3}
"#,
    );
    let rects = final_rects(&lines);
    assert_eq!(rects[0]["width"], 100.0);
    assert_eq!(rects[0]["rotation"], 45.0);
}

#[test]
fn replace_cannot_resize() {
    let script = "{\"op\":\"add\"}\n{\"op\":\"replace\",\"rect\":0,\"x\":0,\"y\":0,\"width\":50}\n";
    let err = replayer().run(script.as_bytes(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ReplayError::Rect { line: 2, .. }), "got {err}");
}

#[test]
fn replace_without_rotation_keeps_current_rotation() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"pointer_down","x":320,"y":180}
{"op":"rotate_start","rect":0}
{"op":"rotate_end","rect":0,"x":270,"y":130,"rotation":45}
{"op":"replace","rect":0,"x":10,"y":10}
"#,
    );
    let rects = final_rects(&lines);
    assert_eq!((rects[0]["x"].as_f64(), rects[0]["y"].as_f64()), (Some(10.0), Some(10.0)));
    assert_eq!(rects[0]["rotation"], 45.0);
}

#[test]
fn replace_with_rotation_overrides_it() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"replace","rect":0,"x":10,"y":10,"rotation":-90}
"#,
    );
    assert_eq!(final_rects(&lines)[0]["rotation"], 270.0);
}

#[test]
fn replace_after_remove_is_skipped() {
    let lines = replay(
        r#"{"op":"add"}
{"op":"remove","rect":0}
{"op":"replace","rect":0,"x":5,"y":5}
"#,
    );
    assert!(final_rects(&lines).is_empty());
}

#[test]
fn resize_stage_changes_bounds() {
    let lines = replay(
        r#"{"op":"resize_stage","width":200,"height":200}
{"op":"add"}
{"op":"pointer_down","x":100,"y":100}
{"op":"drag_start","rect":0}
{"op":"drag_end","rect":0,"x":500,"y":500}
"#,
    );
    let rects = final_rects(&lines);
    assert_eq!((rects[0]["x"].as_f64(), rects[0]["y"].as_f64()), (Some(100.0), Some(100.0)));
}

#[test]
fn resize_stage_rejects_non_positive_sizes() {
    for script in [
        "{\"op\":\"resize_stage\",\"width\":0,\"height\":200}\n",
        "{\"op\":\"add\"}\n{\"op\":\"resize_stage\",\"width\":200,\"height\":-1}\n",
    ] {
        let err = replayer().run(script.as_bytes(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidStep { .. }), "got {err}");
    }
}

#[test]
fn rejected_resize_reports_line_and_field() {
    let script = "{\"op\":\"add\"}\n{\"op\":\"resize_stage\",\"width\":200,\"height\":0}\n";
    let err = replayer().run(script.as_bytes(), &mut Vec::new()).unwrap_err();
    let ReplayError::InvalidStep { line, reason } = err else {
        panic!("expected InvalidStep");
    };
    assert_eq!(line, 2);
    assert!(reason.contains("height"));
}

#[test]
fn same_seed_same_strokes() {
    let script = "{\"op\":\"add\"}\n{\"op\":\"add\"}\n";
    let a = replay(script);
    let b = replay(script);
    let strokes = |lines: &[Value]| -> Vec<Value> { final_rects(lines).iter().map(|r| r["stroke"].clone()).collect() };
    assert_eq!(strokes(&a), strokes(&b));
}

#[test]
fn summary_counts_steps_and_actions() {
    let mut out = Vec::new();
    let summary = replayer().run("{\"op\":\"add\"}\n\n{\"op\":\"hover\",\"x\":0,\"y\":0}\n".as_bytes(), &mut out).unwrap();
    assert_eq!(summary, ReplaySummary { steps: 2, actions: 2 });
}
