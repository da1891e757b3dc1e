use std::path::Path;

use crate::config::{ConfigError, LineStyle, MapConfig};

#[test]
fn defaults_match_the_plotting_conventions() {
    let cfg = MapConfig::default();
    assert_eq!(cfg.active_edge_color, "k");
    assert_eq!(cfg.node_color, "#1f78b4");
    assert_eq!(cfg.sink_color, "green");
    assert_eq!(cfg.node_size, 1500);
    assert_eq!(cfg.font_size, 10);
    assert_eq!(cfg.inactive_edge_color, "gray");
    assert_eq!(cfg.inactive_edge_style, LineStyle::Dotted);
    assert_eq!(cfg.active_edge_style, LineStyle::Solid);
    assert_eq!(cfg.active_edge_alpha, 0.9);
    assert_eq!(cfg.inactive_edge_alpha, 0.2);
}

#[test]
fn partial_config_overlays_defaults() {
    let cfg = MapConfig::from_json_str(r#"{ "sink_color": "red", "inactive_edge_style": "dashed" }"#).unwrap();
    assert_eq!(cfg.sink_color, "red");
    assert_eq!(cfg.inactive_edge_style, LineStyle::Dashed);
    assert_eq!(cfg.node_color, MapConfig::default().node_color);
}

#[test]
fn invalid_value_falls_back_per_key() {
    let cfg = MapConfig::from_json_str(r#"{ "node_size": "huge", "font_size": 14, "active_edge_style": "wavy" }"#).unwrap();
    assert_eq!(cfg.node_size, 1500);
    assert_eq!(cfg.font_size, 14);
    assert_eq!(cfg.active_edge_style, LineStyle::Solid);
}

#[test]
fn non_object_config_is_rejected() {
    assert!(matches!(MapConfig::from_json_str("[1, 2]"), Err(ConfigError::NotAnObject)));
    assert!(matches!(MapConfig::from_json_str("{"), Err(ConfigError::Json(_))));
}

#[test]
fn missing_file_means_defaults() {
    let cfg = MapConfig::load_or_default(Some(Path::new("/nonexistent/map_config.json")));
    assert_eq!(cfg, MapConfig::default());
    assert_eq!(MapConfig::load_or_default(None), MapConfig::default());
}
