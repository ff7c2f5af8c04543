use super::*;

#[test]
fn defaults_match_the_page() {
    let cfg = MotionConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.field.count, 50);
    assert_eq!(cfg.reveal.interval_ms, 100);
    assert_eq!(cfg.page.hero_delays_ms, [200, 400, 800, 1_200, 1_600]);
    assert_eq!(cfg.page.title_ms, 1_000);
    assert_eq!(cfg.fps, Fps::default());
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = MotionConfig::from_json_str(
        r#"{ "field": { "count": 12 }, "page": { "logo_stiffness": 250.0 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.field.count, 12);
    assert_eq!(cfg.field.size, FieldConfig::default().size);
    assert_eq!(cfg.page.logo_stiffness, 250.0);
    assert_eq!(cfg.page.nav_base_ms, 500);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(MotionConfig::from_json_str(r#"{ "fps": { "num": 60, "den": 0 } }"#).is_err());
    assert!(MotionConfig::from_json_str(r#"{ "reveal": { "interval_ms": 0 } }"#).is_err());
    assert!(
        MotionConfig::from_json_str(r#"{ "field": { "size": { "min": 5.0, "max": 1.0 } } }"#)
            .is_err()
    );
    assert!(MotionConfig::from_json_str(r#"{ "page": { "cta_press_scale": 0.0 } }"#).is_err());
    assert!(MotionConfig::from_json_str(r#"{ "page": { "title_ms": 0 } }"#).is_err());
    assert!(
        MotionConfig::from_json_str(r#"{ "field": { "x": { "min": -1e308, "max": 1e308 } } }"#)
            .is_err()
    );
}

#[test]
fn wrong_types_are_serde_errors() {
    let err = MotionConfig::from_json_str(r#"{ "field": { "count": "many" } }"#).unwrap_err();
    assert!(matches!(err, PagefxError::Serde(_)));
}
