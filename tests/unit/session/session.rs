use super::*;
use crate::grid::CellContent;

fn seeded() -> DiaryConfig {
    let mut cfg = DiaryConfig::default();
    cfg.noise.seed = Some(42);
    cfg
}

fn small_session() -> Session {
    let mut cfg = seeded();
    cfg.max_canvas = Canvas::new(64, 48);
    Session::new(cfg).unwrap()
}

#[test]
fn new_session_is_white_at_max_canvas() {
    let s = Session::new(seeded()).unwrap();
    assert_eq!(s.surface().canvas(), Canvas::new(800, 600));
    assert_eq!(s.surface().get(799, 599), Some(Rgba8::WHITE));
    assert_eq!(s.brush(), BrushState::default());
}

#[test]
fn missing_font_path_fails_construction() {
    let mut cfg = seeded();
    cfg.export.font_path = Some("no/such/font.ttf".into());
    assert!(Session::new(cfg).is_err());
}

#[test]
fn brush_stroke_lifecycle() {
    let mut s = small_session();
    let effect = s.dispatch(InputEvent::PointerDown(Point::new(10.0, 10.0))).unwrap();
    assert!(matches!(effect, Effect::Stroked { .. }));
    assert!(s.is_stroking());

    let effect = s.dispatch(InputEvent::PointerMove(Point::new(30.0, 10.0))).unwrap();
    let Effect::Stroked { dirty } = effect else {
        panic!("expected a stroke, got {effect:?}");
    };
    assert!(dirty.x <= 10 && dirty.x + dirty.width as i32 >= 30);
    assert!(s.surface().get(20, 10).unwrap().r < 64);

    assert_eq!(s.dispatch(InputEvent::PointerUp).unwrap(), Effect::None);
    assert!(!s.is_stroking());
    let before = s.surface().clone();
    assert_eq!(
        s.dispatch(InputEvent::PointerMove(Point::new(40.0, 40.0))).unwrap(),
        Effect::None
    );
    assert_eq!(s.surface(), &before);
}

#[test]
fn eraser_paints_white_over_strokes() {
    let mut s = small_session();
    s.dispatch(InputEvent::PointerDown(Point::new(20.0, 20.0))).unwrap();
    s.dispatch(InputEvent::PointerUp).unwrap();
    assert!(s.surface().get(20, 20).unwrap().r < 64);

    s.set_tool(Tool::Eraser);
    s.dispatch(InputEvent::PointerDown(Point::new(20.0, 20.0))).unwrap();
    s.dispatch(InputEvent::PointerUp).unwrap();
    assert_eq!(s.surface().get(20, 20), Some(Rgba8::WHITE));
    assert_eq!(s.guide_diameter(1.0), 25.0);
}

#[test]
fn fill_tool_floods_with_brush_color() {
    let mut s = small_session();
    s.set_tool(Tool::Fill);
    s.set_color(Rgba8::rgb(0, 122, 255));
    let effect = s.dispatch(InputEvent::PointerDown(Point::new(3.7, 5.2))).unwrap();
    assert_eq!(
        effect,
        Effect::Filled {
            pixels: 64 * 48,
            dirty: PixelRect::new(0, 0, 64, 48)
        }
    );
    assert!(!s.is_stroking());
    assert_eq!(s.surface().get(63, 47), Some(Rgba8::rgb(0, 122, 255)));

    // Same color again is a no-op.
    let effect = s.dispatch(InputEvent::PointerDown(Point::new(1.0, 1.0))).unwrap();
    assert_eq!(effect, Effect::None);
    assert_eq!(s.guide_diameter(1.0), 0.0);
}

#[test]
fn pointer_outside_surface_changes_nothing() {
    let mut s = small_session();
    let before = s.surface().clone();
    assert_eq!(
        s.dispatch(InputEvent::PointerDown(Point::new(-100.0, 5.0))).unwrap(),
        Effect::None
    );
    s.set_tool(Tool::Fill);
    assert_eq!(
        s.dispatch(InputEvent::PointerDown(Point::new(500.0, 5.0))).unwrap(),
        Effect::None
    );
    assert_eq!(s.surface(), &before);
}

#[test]
fn text_changes_produce_a_grid() {
    let mut s = small_session();
    let Effect::Grid(cells) = s.dispatch(InputEvent::TextChanged("hi".into())).unwrap() else {
        panic!("expected a grid");
    };
    assert_eq!(cells.len(), 13);
    assert_eq!(cells[1].content, CellContent::Glyph("i".into()));
}

#[test]
fn brush_size_zero_is_rejected() {
    let mut s = small_session();
    let err = s.set_brush_size(0).unwrap_err();
    assert!(matches!(err, DiaryError::InvalidInput(_)));
    s.set_brush_size(12).unwrap();
    assert_eq!(s.brush().size, 12);
}

#[test]
fn load_image_replaces_surface_and_bad_bytes_keep_it() {
    let mut s = small_session();
    s.dispatch(InputEvent::PointerDown(Point::new(5.0, 5.0))).unwrap();
    let drawn = s.surface().clone();

    assert!(s.load_image(b"not an image").is_err());
    assert_eq!(s.surface(), &drawn);
    assert!(s.is_stroking());

    let photo = Surface::filled(128, 48, Rgba8::rgb(200, 180, 160)).to_png().unwrap();
    let size = s.load_image(&photo).unwrap();
    assert_eq!(size, Canvas::new(64, 24));
    assert_eq!(s.surface().canvas(), size);
    assert!(!s.is_stroking());
}

#[test]
fn clear_keeps_size() {
    let mut s = small_session();
    let photo = Surface::filled(32, 32, Rgba8::BLACK).to_png().unwrap();
    s.load_image(&photo).unwrap();
    s.clear();
    assert_eq!(s.surface().canvas(), Canvas::new(32, 32));
    assert!(s.surface().data().iter().all(|&b| b == 255));
}

#[test]
fn save_exports_a_page() {
    let mut s = small_session();
    let out = s.save(&DiaryEntry::default()).unwrap();
    assert_eq!(out.file_name, "diary_today.png");
    assert_eq!(out.width, 64 + 80);
}

#[test]
fn stroke_survives_a_nan_pointer_move() {
    let mut s = small_session();
    s.dispatch(InputEvent::PointerDown(Point::new(10.0, 10.0))).unwrap();
    assert_eq!(
        s.dispatch(InputEvent::PointerMove(Point::new(f64::NAN, 10.0))).unwrap(),
        Effect::None
    );
    let effect = s.dispatch(InputEvent::PointerMove(Point::new(50.0, 10.0))).unwrap();
    assert!(matches!(effect, Effect::Stroked { .. }), "{effect:?}");
    assert!(s.surface().get(30, 10).unwrap().r < 64);
}
