use super::*;

#[test]
fn defaults_match_classic_caption_look() {
    let s = RenderStyle::default();
    assert_eq!(s.size_px, 70.0);
    assert_eq!(s.fill, Rgba8::rgb(255, 255, 255));
    assert_eq!(s.shadow, Rgba8 { r: 0, g: 0, b: 0, a: 128 });
    assert_eq!(s.shadow_offset, Vec2::new(2.0, 2.0));
    assert_eq!(s.line_spacing, 1.5);
    assert_eq!(s.margin_px, 20);
    assert_eq!(s.bottom_offset_px, 80);
    assert!(s.validate().is_ok());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let s = RenderStyle::from_json_str(r#"{ "size_px": 24, "align": "left" }"#).unwrap();
    assert_eq!(s.size_px, 24.0);
    assert_eq!(s.align, TextAlign::Left);
    assert_eq!(s.margin_px, 20);
    assert_eq!(s.font_path, PathBuf::from("assets/fonts/DejaVuSans-Bold.ttf"));
}

#[test]
fn json_rejects_unknown_fields_and_bad_values() {
    assert!(RenderStyle::from_json_str(r#"{ "sizepx": 24 }"#).is_err());
    assert!(RenderStyle::from_json_str(r#"{ "size_px": 0 }"#).is_err());
    assert!(RenderStyle::from_json_str(r#"{ "line_spacing": -1 }"#).is_err());
    assert!(RenderStyle::from_json_str(r#"{ "anchor": { "x": 1.5, "y": 0.5 } }"#).is_err());
}

#[test]
fn max_width_subtracts_both_margins() {
    let s = RenderStyle::default();
    assert_eq!(s.max_width(500), 460.0);
}

#[test]
fn place_lines_centers_block_on_fixed_bottom_anchor() {
    let s = RenderStyle {
        size_px: 20.0,
        line_spacing: 1.5,
        margin_px: 10,
        bottom_offset_px: 40,
        ..RenderStyle::default()
    };
    // Box is 80px wide, block is 2 * 30 - 10 = 50px tall around y = 60.
    let origins = s.place_lines(&[40.0, 20.0], 20.0, 100, 100);
    assert_eq!(origins, vec![Vec2::new(30.0, 35.0), Vec2::new(40.0, 65.0)]);
}

#[test]
fn vertical_anchor_ignores_frame_height_scale() {
    let s = RenderStyle::default();
    let small = s.place_lines(&[10.0], 80.0, 300, 200);
    let tall = s.place_lines(&[10.0], 80.0, 300, 400);
    assert_eq!(tall[0].y - small[0].y, 200.0);
}

#[test]
fn place_lines_respects_alignment() {
    let base = RenderStyle {
        margin_px: 0,
        ..RenderStyle::default()
    };
    let left = RenderStyle {
        align: TextAlign::Left,
        ..base.clone()
    };
    let right = RenderStyle {
        align: TextAlign::Right,
        ..base
    };
    assert_eq!(left.place_lines(&[30.0], 70.0, 100, 100)[0].x, 0.0);
    assert_eq!(right.place_lines(&[30.0], 70.0, 100, 100)[0].x, 70.0);
}

#[test]
fn line_step_follows_shaped_line_height() {
    let s = RenderStyle {
        size_px: 20.0,
        line_spacing: 1.5,
        margin_px: 0,
        bottom_offset_px: 0,
        ..RenderStyle::default()
    };
    // Lines 24px tall step 36px; block is 2 * 36 - 12 = 60px tall around y = 100.
    let origins = s.place_lines(&[10.0, 10.0], 24.0, 100, 100);
    assert_eq!(origins[0].y, 70.0);
    assert_eq!(origins[1].y - origins[0].y, 36.0);
}
