use backdrop_wasm::{pointer_readout, Viewport};

#[test]
fn full_hd_at_unit_ratio_is_one_to_one() {
    let vp = Viewport::new(1920.0, 1080.0, 1.0);
    assert_eq!(vp.backing_size(), (1920, 1080));
    assert_eq!(vp.transform(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(vp.css_size(), ("1920px".to_string(), "1080px".to_string()));
}

#[test]
fn retina_doubles_backing_store_only() {
    let vp = Viewport::new(1440.0, 900.0, 2.0);
    assert_eq!(vp.backing_size(), (2880, 1800));
    assert_eq!(vp.css_size(), ("1440px".to_string(), "900px".to_string()));
    // readout is in logical pixels regardless of the ratio
    assert_eq!(pointer_readout(720.0, 900.0, &vp), "0.500 / 1.000");
}
