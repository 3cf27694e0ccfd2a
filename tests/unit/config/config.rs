use super::*;

#[test]
fn defaults_expose_named_constants() {
    let cfg = DiaryConfig::default();
    assert_eq!(cfg.max_canvas, Canvas::new(800, 600));
    assert_eq!(cfg.eraser_multiplier, 5);
    assert_eq!(cfg.fill_tolerance, 50);
    assert_eq!(cfg.noise.probability, 0.10);
    assert_eq!(cfg.grid_cols, 13);
    assert_eq!(cfg.grid_cell_px, 40);
    assert_eq!(cfg.export.rows, RowPolicy::Fixed { rows: 10 });
    cfg.validate().unwrap();
}

#[test]
fn empty_json_object_is_the_default() {
    assert_eq!(DiaryConfig::from_json_str("{}").unwrap(), DiaryConfig::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = DiaryConfig::from_json_str(
        r##"{
            "grid_cols": 20,
            "noise": { "seed": 7 },
            "export": { "rows": { "mode": "fit_content", "min_rows": 4 }, "background": "#FFFFFF" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.grid_cols, 20);
    assert_eq!(cfg.noise.seed, Some(7));
    assert_eq!(cfg.noise.alpha, NoiseConfig::default().alpha);
    assert_eq!(cfg.export.rows, RowPolicy::FitContent { min_rows: 4 });
    assert_eq!(cfg.export.background, Rgba8::WHITE);
}

#[test]
fn unknown_fields_and_bad_json_are_serde_errors() {
    let err = DiaryConfig::from_json_str(r#"{ "gird_cols": 3 }"#).unwrap_err();
    assert!(matches!(err, DiaryError::Serde(_)));
    let err = DiaryConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, DiaryError::Serde(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let cases: Vec<Box<dyn Fn(&mut DiaryConfig)>> = vec![
        Box::new(|c: &mut DiaryConfig| c.max_canvas = Canvas::new(0, 600)),
        Box::new(|c: &mut DiaryConfig| c.eraser_multiplier = 0),
        Box::new(|c: &mut DiaryConfig| c.fill_tolerance = 0),
        Box::new(|c: &mut DiaryConfig| c.fill_tolerance = 300),
        Box::new(|c: &mut DiaryConfig| c.noise.probability = 1.5),
        Box::new(|c: &mut DiaryConfig| c.grid_cols = 0),
        Box::new(|c: &mut DiaryConfig| c.grid_cell_px = 0),
        Box::new(|c: &mut DiaryConfig| c.grid_cell_px = 1025),
        Box::new(|c: &mut DiaryConfig| c.stylize.edge_offset_px = 65),
        Box::new(|c: &mut DiaryConfig| c.stylize.edge_offset_px = i32::MIN),
        Box::new(|c: &mut DiaryConfig| c.stylize.color_bleed_px = 1025),
        Box::new(|c: &mut DiaryConfig| c.stylize.color_bleed_px = u32::MAX),
        Box::new(|c: &mut DiaryConfig| c.stylize.blur_px = 1e9),
        Box::new(|c: &mut DiaryConfig| c.stylize.color_downsample = 0),
        Box::new(|c: &mut DiaryConfig| c.stylize.blur_px = f32::NAN),
        Box::new(|c: &mut DiaryConfig| c.export.glyph_px = 0.0),
        Box::new(|c: &mut DiaryConfig| c.export.rows = RowPolicy::Fixed { rows: 0 }),
    ];
    for (i, mutate) in cases.iter().enumerate() {
        let mut cfg = DiaryConfig::default();
        mutate(&mut cfg);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, DiaryError::Validation(_)), "case {i}: {err}");
    }
}

#[test]
fn validate_accepts_limits_inclusive() {
    let mut cfg = DiaryConfig::default();
    cfg.grid_cell_px = MAX_GRID_CELL_PX;
    cfg.stylize.edge_offset_px = -64;
    cfg.stylize.color_bleed_px = MAX_COLOR_BLEED_PX;
    cfg.stylize.blur_px = MAX_BLUR_PX;
    cfg.validate().unwrap();
}

#[test]
fn row_policy_rows_for() {
    assert_eq!(RowPolicy::Fixed { rows: 10 }.rows_for(25), 10);
    assert_eq!(RowPolicy::FitContent { min_rows: 3 }.rows_for(1), 3);
    assert_eq!(RowPolicy::FitContent { min_rows: 3 }.rows_for(7), 7);
}

#[test]
fn load_reports_missing_file() {
    let err = DiaryConfig::load(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read config"));
}
