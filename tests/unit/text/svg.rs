use super::*;

fn span(text: &str, y: f32) -> TextSpan<'_> {
    TextSpan {
        text,
        x: 250.0,
        y,
        size_px: 32.0,
    }
}

#[test]
fn svg_escapes_markup_in_text() {
    let svg = text_layer_svg(100, 50, &[span("Tom & <Jerry> \"quoted\"", 10.0)], [255, 255, 255]);
    assert!(svg.contains("Tom &amp; &lt;Jerry&gt; &quot;quoted&quot;"));
    assert!(!svg.contains("<Jerry>"));
    assert!(svg.contains("fill=\"#ffffff\""));
    assert!(svg.contains("width=\"100\" height=\"50\""));
}

#[test]
fn svg_skips_blank_spans() {
    let svg = text_layer_svg(10, 10, &[span("first ", 112.0), span("", 150.0)], [0, 0, 0]);
    assert_eq!(svg.matches("<text").count(), 1);
    assert!(svg.contains("y=\"112\""));
}

#[test]
fn svg_output_parses_with_usvg() {
    let svg = text_layer_svg(64, 32, &[span("hi", 0.0)], [255, 255, 255]);
    let opts = usvg::Options::default();
    assert!(usvg::Tree::from_str(&svg, &opts).is_ok());
}

#[test]
fn blank_layer_is_fully_transparent() {
    let renderer = TextRenderer::new(&[]);
    let layer = renderer.render_layer(8, 4, &[span("   ", 0.0)], [255, 255, 255]).unwrap();
    assert_eq!((layer.width, layer.height), (8, 4));
    assert!(layer.data.iter().all(|&b| b == 0));
}

#[test]
fn text_layer_has_card_dimensions() {
    let renderer = TextRenderer::new(&[]);
    let layer = renderer
        .render_layer(
            120,
            60,
            &[TextSpan {
                x: 4.0,
                ..span("Alex", 4.0)
            }],
            [255, 255, 255],
        )
        .unwrap();
    assert_eq!((layer.width, layer.height), (120, 60));
    assert_eq!(layer.data.len(), 120 * 60 * 4);
    if renderer.face_count() > 0 {
        assert!(layer.data.chunks_exact(4).any(|px| px[3] > 0));
    }
}
