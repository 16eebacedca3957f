//! Integration tests for layout files

use std::path::PathBuf;

use spacerocks_core::{LayoutLoadError, LayoutValidator, WorldLayout, WorldMap};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spacerocks_{}_{}.ron", name, std::process::id()))
}

#[test]
fn test_save_and_load_default_layout() {
    let path = temp_path("default_layout");
    let layout = WorldLayout::default();
    layout.save(&path).expect("save should succeed");

    let loaded = WorldLayout::load(&path).expect("load should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, layout);
    assert_eq!(loaded.to_world_map(), WorldMap::default_layout());
}

#[test]
fn test_shipped_layout_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/space_rocks.ron");
    let layout = WorldLayout::load(path).expect("shipped layout should parse");
    let errors = LayoutValidator::validate(&layout);
    assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    assert_eq!(layout.to_world_map(), WorldMap::default_layout());
}

#[test]
fn test_invalid_ron_is_a_parse_error() {
    let path = temp_path("broken_layout");
    std::fs::write(&path, "WorldLayout(name: ").unwrap();
    let result = WorldLayout::load(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(LayoutLoadError::Parse(_))));
}

#[test]
fn test_invalid_layout_falls_back_to_default() {
    let path = temp_path("invalid_layout");
    let mut layout = WorldLayout::new("Broken", 2, 2);
    layout.frames.truncate(1);
    layout.save(&path).unwrap();

    let loaded = WorldLayout::load_or_default(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, WorldLayout::default());
}
