use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!((i32::from(*got) - i32::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 128);
}
