use super::*;

#[test]
fn resize_to_height_keeps_aspect_ratio() {
    let img = PremulImage::filled(400, 200, [10, 10, 10, 255]);
    let out = resize_to_height(&img, 138).unwrap();
    assert_eq!((out.width, out.height), (276, 138));
    assert_eq!(out.data.len(), 276 * 138 * 4);
}

#[test]
fn resize_exact_preserves_constant_color() {
    let img = PremulImage::filled(8, 8, [40, 80, 120, 255]);
    let out = resize_exact(&img, 3, 5).unwrap();
    assert_eq!((out.width, out.height), (3, 5));
    assert!(out.data.chunks_exact(4).all(|px| px == [40, 80, 120, 255]));
}

#[test]
fn resize_rejects_zero_target() {
    let img = PremulImage::filled(2, 2, [0, 0, 0, 255]);
    assert!(resize_exact(&img, 0, 2).is_err());
}
