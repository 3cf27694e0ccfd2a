use super::*;
use crate::foundation::core::Rgba8;

fn single(color: Rgba8) -> Surface {
    Surface::filled(1, 1, color)
}

#[test]
fn grayscale_uses_luma_weights_and_keeps_alpha() {
    let mut s = single(Rgba8::new(255, 0, 0, 77));
    grayscale(&mut s);
    assert_eq!(s.get(0, 0), Some(Rgba8::new(54, 54, 54, 77)));
}

#[test]
fn invert_flips_rgb_only() {
    let mut s = single(Rgba8::new(0, 100, 255, 10));
    invert(&mut s);
    assert_eq!(s.get(0, 0), Some(Rgba8::new(255, 155, 0, 10)));
}

#[test]
fn contrast_pushes_away_from_mid_gray() {
    let mut s = Surface::new(2, 1);
    s.put(0, 0, Rgba8::rgb(100, 100, 100));
    s.put(1, 0, Rgba8::rgb(200, 200, 200));
    contrast(&mut s, 5.0);
    assert_eq!(s.get(0, 0), Some(Rgba8::rgb(0, 0, 0)));
    assert_eq!(s.get(1, 0), Some(Rgba8::rgb(255, 255, 255)));
}

#[test]
fn unit_factors_are_identity() {
    let original = single(Rgba8::rgb(12, 150, 201));
    let mut s = original.clone();
    contrast(&mut s, 1.0);
    saturate(&mut s, 1.0);
    brightness(&mut s, 1.0);
    assert_eq!(s, original);
}

#[test]
fn saturate_zero_is_gray_and_boost_widens_spread() {
    let mut gray = single(Rgba8::rgb(200, 100, 50));
    saturate(&mut gray, 0.0);
    let px = gray.get(0, 0).unwrap();
    assert!(px.r.abs_diff(px.g) <= 1 && px.g.abs_diff(px.b) <= 1);

    let mut vivid = single(Rgba8::rgb(200, 100, 50));
    saturate(&mut vivid, 1.5);
    let px = vivid.get(0, 0).unwrap();
    assert!(px.r > 200);
    assert!(px.b < 50);
}

#[test]
fn blur_zero_sigma_is_identity() {
    let mut s = Surface::new(2, 2);
    s.put(0, 0, Rgba8::rgb(255, 0, 0));
    let before = s.clone();
    blur(&mut s, 0.0).unwrap();
    assert_eq!(s, before);
}

#[test]
fn blur_constant_image_is_identity() {
    let mut s = Surface::filled(6, 5, Rgba8::rgb(10, 20, 30));
    let before = s.clone();
    blur(&mut s, 2.0).unwrap();
    assert_eq!(s, before);
}

#[test]
fn blur_spreads_a_dark_dot() {
    let mut s = Surface::filled(9, 9, Rgba8::WHITE);
    s.put(4, 4, Rgba8::BLACK);
    blur(&mut s, 1.0).unwrap();
    let center = s.get(4, 4).unwrap();
    let neighbor = s.get(5, 4).unwrap();
    assert!(center.r > 0);
    assert!(neighbor.r < 255);
    assert_eq!(center.a, 255);
}

#[test]
fn blur_spreads_evenly_on_both_axes_of_a_wide_image() {
    let mut s = Surface::filled(11, 5, Rgba8::WHITE);
    s.put(5, 2, Rgba8::BLACK);
    blur(&mut s, 0.8).unwrap();
    assert_eq!(s.get(4, 2), s.get(6, 2));
    assert_eq!(s.get(5, 1), s.get(5, 3));
    assert!(s.get(4, 2).unwrap().r < 255);
    assert_eq!(s.get(0, 0), Some(Rgba8::WHITE));
}

#[test]
fn blur_with_vanishing_sigma_keeps_pixels() {
    let mut s = Surface::filled(3, 3, Rgba8::WHITE);
    s.put(1, 1, Rgba8::rgb(200, 10, 60));
    let before = s.clone();
    blur(&mut s, 1e-30).unwrap();
    assert_eq!(s, before);
}

#[test]
fn blur_rejects_negative_sigma() {
    let mut s = Surface::filled(2, 2, Rgba8::WHITE);
    assert!(blur(&mut s, -1.0).is_err());
    assert!(blur(&mut s, f32::NAN).is_err());
}

#[test]
fn resize_changes_dimensions_and_keeps_flat_color() {
    let s = Surface::filled(16, 8, Rgba8::rgb(90, 180, 30));
    let small = resize(&s, 2, 1).unwrap();
    assert_eq!((small.width(), small.height()), (2, 1));
    let px = small.get(1, 0).unwrap();
    assert!(px.r.abs_diff(90) <= 1 && px.g.abs_diff(180) <= 1 && px.b.abs_diff(30) <= 1);
    assert_eq!(px.a, 255);
    assert!(resize(&s, 0, 1).is_err());
}
