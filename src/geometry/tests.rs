use super::*;

#[test]
fn test_dip_conversion_scales_by_density() {
    assert_eq!(to_pixels(10, Unit::Dip, 2.0), 20);
    assert_eq!(to_pixels(100, Unit::Dip, 3.0), 300);
    assert_eq!(to_pixels(0, Unit::Dip, 2.0), 0);
}

#[test]
fn test_dip_conversion_truncates_toward_zero() {
    assert_eq!(to_pixels(15, Unit::Dip, 1.5), 22);
    assert_eq!(to_pixels(7, Unit::Dip, 2.625), 18);
}

#[test]
fn test_px_conversion_is_identity() {
    assert_eq!(to_pixels(1080, Unit::Px, 2.0), 1080);
    assert_eq!(to_pixels(0, Unit::Px, 3.5), 0);
}

#[test]
fn test_unspecified_size_covers_full_display() {
    let rect = resolve(PlacementRequest::default(), 2.0, (1080, 1920));

    assert_eq!(
        rect,
        PreviewRect {
            x: 0,
            y: 0,
            width: 1080,
            height: 1920,
        }
    );
}

#[test]
fn test_explicit_size_converts_and_subtracts_padding() {
    let request = PlacementRequest {
        x: 10,
        y: 20,
        width: 100,
        height: 200,
        padding_bottom: 30,
    };

    let rect = resolve(request, 2.0, (1080, 1920));

    assert_eq!(rect.x, 20);
    assert_eq!(rect.y, 40);
    assert_eq!(rect.width, 200);
    // Padding comes out of the height only
    assert_eq!(rect.height, 340);
}

#[test]
fn test_padding_applies_to_default_height() {
    let request = PlacementRequest {
        padding_bottom: 30,
        ..Default::default()
    };

    let rect = resolve(request, 2.0, (1080, 1920));

    assert_eq!(rect.width, 1080);
    assert_eq!(rect.height, 1920 - 60);
}

#[test]
fn test_zero_padding_is_not_converted() {
    let request = PlacementRequest {
        width: 50,
        height: 50,
        ..Default::default()
    };

    let rect = resolve(request, 2.0, (1080, 1920));

    assert_eq!(rect.width, 100);
    assert_eq!(rect.height, 100);
}

#[test]
fn test_fractional_density_display() {
    let request = PlacementRequest {
        x: 3,
        y: 5,
        width: 11,
        height: 13,
        padding_bottom: 0,
    };

    let rect = resolve(request, 2.625, (1440, 3120));

    assert_eq!(rect.x, 7);
    assert_eq!(rect.y, 13);
    assert_eq!(rect.width, 28);
    assert_eq!(rect.height, 34);
}
