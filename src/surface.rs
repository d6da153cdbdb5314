//! Viewport geometry and the CSS-pixel to backing-store mapping.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical (CSS pixel) width.
    pub width: f64,
    /// Logical (CSS pixel) height.
    pub height: f64,
    /// Device pixel ratio.
    pub dpr: f64,
}

impl Viewport {
    /// Builds a viewport, treating a missing or nonsensical ratio as 1.
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    /// Physical size of the drawing surface's backing store.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor() as u32,
            (self.height * self.dpr).floor() as u32,
        )
    }

    /// Context transform `(a, b, c, d, e, f)` mapping CSS pixels onto the backing store.
    pub fn transform(&self) -> [f64; 6] {
        [self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0]
    }

    /// CSS size strings for the element's style.
    pub fn css_size(&self) -> (String, String) {
        (format!("{}px", self.width), format!("{}px", self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Textual pointer readout, normalized to the viewport: `"0.123 / 0.456"`.
pub fn pointer_readout(client_x: f64, client_y: f64, viewport: &Viewport) -> String {
    format!(
        "{:.3} / {:.3}",
        client_x / viewport.width,
        client_y / viewport.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidpi_backing_store() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.backing_size(), (1600, 1200));
        assert_eq!(vp.transform(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn fractional_ratio_truncates() {
        let vp = Viewport::new(333.0, 101.0, 1.5);
        assert_eq!(vp.backing_size(), (499, 151));
    }

    #[test]
    fn bad_ratio_falls_back() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).dpr, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).dpr, 1.0);
    }

    #[test]
    fn readout_has_three_decimals() {
        let vp = Viewport::new(1000.0, 500.0, 1.0);
        assert_eq!(pointer_readout(123.0, 250.0, &vp), "0.123 / 0.500");
        assert_eq!(vp.css_size(), ("1000px".to_string(), "500px".to_string()));
    }
}
