use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
}

#[test]
fn premultiply_half_alpha() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn premultiply_transparent_zeroes_color() {
    let mut px = vec![10u8, 20, 30, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 1, 2, 3, 255]);
}

#[test]
fn unpremultiply_inverts_within_one_step() {
    let straight = [100u8, 50, 200, 128];
    let mut px = straight.to_vec();
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for i in 0..3 {
        assert!(px[i].abs_diff(straight[i]) <= 1, "channel {i}: {}", px[i]);
    }
    assert_eq!(px[3], 128);
}

#[test]
fn unpremultiply_leaves_opaque_and_transparent() {
    let mut px = vec![1u8, 2, 3, 255, 0, 0, 0, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![1, 2, 3, 255, 0, 0, 0, 0]);
}
