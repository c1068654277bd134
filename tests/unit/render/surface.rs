use super::*;

#[test]
fn resize_reallocates_and_clears() {
    let mut s = Surface::new(Size::new(4, 4)).unwrap();
    s.data_mut().fill(200);
    s.resize(Size::new(8, 2)).unwrap();
    assert_eq!(s.size(), Size::new(8, 2));
    assert_eq!(s.data().len(), 8 * 2 * 4);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn zero_and_oversized_dimensions_are_rejected() {
    assert!(Surface::new(Size::new(0, 4)).is_err());
    assert!(Surface::new(Size::new(70_000, 4)).is_err());
}

#[test]
fn pixel_reads_are_bounds_checked() {
    let mut s = Surface::new(Size::new(2, 2)).unwrap();
    s.data_mut()[12..16].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(s.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(s.pixel(2, 0), None);
}

#[test]
fn registry_take_moves_surface_out() {
    let mut reg = SurfaceRegistry::new();
    reg.insert("videoCanvas", Surface::new(Size::new(2, 2)).unwrap());
    assert!(reg.contains("videoCanvas"));
    assert!(reg.take("videoCanvas").is_ok());
    assert!(matches!(
        reg.take("videoCanvas"),
        Err(FramepaceError::Config(_))
    ));
}

#[test]
fn snapshot_is_premultiplied_copy() {
    let s = Surface::new(Size::new(3, 1)).unwrap();
    let snap = s.snapshot();
    assert_eq!((snap.width, snap.height), (3, 1));
    assert!(snap.premultiplied);
    assert_eq!(snap.data.len(), 12);
}
