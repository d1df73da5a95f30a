use mykomap_core::detection::StrategyKind;
use mykomap_core::error::MykoError;
use mykomap_core::pipeline::{PipelineConfig, PipelineStage};

#[test]
fn test_empty_toml_gives_defaults() {
    let config: PipelineConfig = toml::from_str("").unwrap();
    assert_eq!(config, PipelineConfig::default());
    assert_eq!(config.storage.max_frames, 4);
    assert_eq!(config.aggregation.weights, vec![0.4, 0.3, 0.2, 0.1]);
    assert_eq!(config.render.darken_floor, 0.75);
    assert_eq!(config.clustering.eps, 30.0);
    assert_eq!(config.clustering.min_samples, 3);
    assert_eq!(config.clustering.skip_threshold, 3);
    assert_eq!(config.detection.effective_min_area(), 10);
    assert!(config.crop.is_noop());
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_config_toml_roundtrip() {
    let config = PipelineConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: PipelineConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_sections_override_defaults() {
    let text = r#"
        [storage]
        root = "/var/lib/mykomap"

        [crop]
        left = 12
        bottom = 40

        [bounds]
        north = 50.0
        south = 49.0
        east = 15.0
        west = 14.0
    "#;
    let config: PipelineConfig = toml::from_str(text).unwrap();
    assert_eq!(config.storage.root.to_str(), Some("/var/lib/mykomap"));
    assert_eq!(config.storage.max_frames, 4);
    assert_eq!(config.crop.left, 12);
    assert_eq!(config.crop.right, 0);
    assert_eq!(config.crop.bottom, 40);
    assert_eq!(config.bounds.west, 14.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_highlight_class_is_invalid() {
    let mut config = PipelineConfig::default();
    config.render.highlight_class = "extreme".into();
    assert!(matches!(config.validate(), Err(MykoError::InvalidConfig(_))));
}

#[test]
fn test_zero_retention_is_invalid() {
    let mut config = PipelineConfig::default();
    config.storage.max_frames = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_render_settings_are_validated() {
    let mut config = PipelineConfig::default();
    config.render.darken_floor = 1.5;
    assert!(matches!(config.validate(), Err(MykoError::InvalidConfig(_))));

    config.render.darken_floor = -0.1;
    assert!(config.validate().is_err());

    config.render.darken_floor = 0.5;
    config.render.highlight_threshold = f32::NAN;
    assert!(config.validate().is_err());

    config.render.highlight_threshold = 0.6;
    assert!(config.validate().is_ok());
}

#[test]
fn test_tolerance_parses_as_double() {
    let config: PipelineConfig = toml::from_str("[aggregation]\ntolerance = 0.03\n").unwrap();
    assert_eq!(config.aggregation.tolerance, 0.03_f64);
}

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", PipelineStage::Loading), "Loading frames");
    assert_eq!(format!("{}", PipelineStage::Compositing), "Building composite");
    assert_eq!(format!("{}", PipelineStage::Publishing), "Publishing artifacts");
}

#[test]
fn test_strategy_display() {
    assert_eq!(StrategyKind::Highlight.to_string(), "highlight");
    assert_eq!(StrategyKind::BlueDominant.to_string(), "blue_dominant");
}
