use super::*;
use crate::overlay::layout::{BioCardLayout, LogoCardLayout};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn compositor() -> OverlayCompositor {
    let layout = OverlayLayout {
        bio_card: BioCardLayout {
            top: 2,
            slide_width: 10.0,
            ..BioCardLayout::default()
        },
        logo_card: LogoCardLayout {
            top: 6,
            slide_width: 10.0,
            ..LogoCardLayout::default()
        },
        ..OverlayLayout::default()
    };
    OverlayCompositor::from_cards(
        PremulImage::filled(10, 2, RED),
        PremulImage::filled(10, 2, BLUE),
        layout,
        AnimationTimeline::default(),
    )
}

fn frame() -> PremulImage {
    PremulImage::filled(20, 10, BLACK)
}

#[test]
fn hidden_frames_are_untouched() {
    let c = compositor();
    for f in [1, 29, 121, 150] {
        let mut img = frame();
        assert!(!c.annotate(&mut img, FrameIndex(f)));
        assert_eq!(img, frame());
    }
}

#[test]
fn frame_30_places_cards_fully_off_canvas() {
    let c = compositor();
    let mut img = frame();
    assert!(c.annotate(&mut img, FrameIndex(30)));
    assert_eq!(img, frame());
}

#[test]
fn resting_frames_show_both_cards() {
    let c = compositor();
    let mut img = frame();
    assert!(c.annotate(&mut img, FrameIndex(75)));
    assert_eq!(img.pixel(0, 2), RED);
    assert_eq!(img.pixel(9, 3), RED);
    assert_eq!(img.pixel(10, 2), BLACK);
    assert_eq!(img.pixel(0, 6), BLUE);
    assert_eq!(img.pixel(9, 7), BLUE);
    assert_eq!(img.pixel(0, 4), BLACK);
}

#[test]
fn sliding_frame_is_partially_visible() {
    let c = compositor();
    let mut img = frame();
    c.annotate(&mut img, FrameIndex(35));
    assert_eq!(img.pixel(4, 2), RED);
    assert_eq!(img.pixel(5, 2), BLACK);
    assert_eq!(img.pixel(4, 6), BLUE);
}

#[test]
fn hidden_frame_file_is_copied_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.png");
    let dst = dir.path().join("dst.png");
    std::fs::write(&src, b"raw bytes, never decoded").unwrap();

    compositor().annotate_file(&src, &dst, FrameIndex(5)).unwrap();
    assert_eq!(std::fs::read(&dst).unwrap(), b"raw bytes, never decoded");
}

#[test]
fn visible_frame_file_is_annotated() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.png");
    let dst = dir.path().join("dst.png");
    save_png(&frame(), &src).unwrap();

    compositor().annotate_file(&src, &dst, FrameIndex(60)).unwrap();
    let out = load_image(&dst).unwrap();
    assert_eq!(out.pixel(0, 2), RED);
    assert_eq!(out.pixel(19, 9), BLACK);
}
