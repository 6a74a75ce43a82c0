use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn empty_document_is_the_default() {
    let cfg = PipelineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PipelineConfig::default());
    assert_eq!(cfg.opts.scale_width, 1080);
    assert_eq!(cfg.opts.codec, "libx264");
    assert_eq!(cfg.opts.pixel_format, "yuv420p");
    assert_eq!(cfg.timeline.slide_in_start, 30);
    assert_eq!(cfg.layout.bio_card.top, 1095);
    assert_eq!(cfg.layout.logo_card.top, 1355);
    cfg.validate().unwrap();
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = PipelineConfig::from_json_str(
        r#"{ "opts": { "threading": { "parallel": true, "threads": 2 } },
             "layout": { "card_opacity": 0.5 } }"#,
    )
    .unwrap();
    assert!(cfg.opts.threading.parallel);
    assert_eq!(cfg.opts.threading.threads, Some(2));
    assert_eq!(cfg.opts.threading.chunk_size, 64);
    assert_eq!(cfg.layout.card_opacity, 0.5);
    assert_eq!(cfg.layout.bio_card.avatar_height, 138);
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = PipelineConfig::from_json_str("{ opts: ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn odd_scale_width_is_rejected() {
    let mut cfg = PipelineConfig::default();
    cfg.opts.scale_width = 1081;
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn zero_threads_is_rejected() {
    let mut cfg = PipelineConfig::default();
    cfg.opts.threading.threads = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn out_of_range_opacity_is_rejected() {
    let mut cfg = PipelineConfig::default();
    cfg.layout.card_opacity = 1.5;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, r#"{ "opts": { "codec": "libx265" } }"#).unwrap();
    assert_eq!(PipelineConfig::from_path(&path).unwrap().opts.codec, "libx265");
    assert!(PipelineConfig::from_path(&dir.path().join("missing.json")).is_err());
}

#[test]
fn loading_validates() {
    let err = PipelineConfig::from_json_str(r#"{ "opts": { "scale_width": 7 } }"#).unwrap_err();
    assert!(err.to_string().contains("scale_width"));
}

#[test]
fn escaping_workspace_names_are_rejected() {
    for temp_dir in ["", "/var/tmp", "../temp", "."] {
        let mut cfg = PipelineConfig::default();
        cfg.workspace.temp_dir = temp_dir.to_string();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{temp_dir:?}");
    }
}
