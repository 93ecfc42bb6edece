//! Activation band — the viewport strip that decides which heading is
//! "current" while scrolling.
//!
//! The band is the viewport with its top edge pulled down by `offset − 1`
//! px and its bottom edge pulled up by `viewport_height − offset` px: a
//! 1 px tripwire at the configured offset. A heading becomes the active
//! one when it enters this strip. Integer math only.

/// Insets shrinking the viewport down to the tracked strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationBand {
    top_inset: u32,
    bottom_inset: u32,
}

impl ActivationBand {
    /// Compute the band for a viewport. Degenerate viewports (height at or
    /// under the offset) clamp the bottom inset to zero rather than fail.
    #[must_use]
    pub fn new(offset_px: u32, viewport_height: u32) -> Self {
        Self {
            top_inset: offset_px.saturating_sub(1),
            bottom_inset: viewport_height.saturating_sub(offset_px),
        }
    }

    /// Observer margin string: negative insets, same order the original
    /// rootMargin used.
    #[must_use]
    pub fn margin(&self) -> String {
        format!("-{}px 0px -{}px 0px", self.top_inset, self.bottom_inset)
    }

    /// Whether an element spanning `top..=bottom` (viewport-relative px)
    /// overlaps the band strip inside the given viewport.
    #[must_use]
    pub fn intersects(&self, viewport_height: u32, top: i64, bottom: i64) -> bool {
        let band_top = i64::from(self.top_inset);
        let band_bottom = i64::from(viewport_height.saturating_sub(self.bottom_inset));
        if band_bottom < band_top {
            return false;
        }
        top <= band_bottom && bottom >= band_top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_matches_observer_arithmetic() {
        // offset 100, viewport 900 → strip between y=99 and y=100
        let band = ActivationBand::new(100, 900);
        assert_eq!(band.margin(), "-99px 0px -800px 0px");
    }

    #[test]
    fn degenerate_viewport_clamps() {
        let band = ActivationBand::new(100, 50);
        assert_eq!(band.margin(), "-99px 0px -0px 0px");
    }

    #[test]
    fn intersects_tripwire() {
        let band = ActivationBand::new(100, 900);
        assert!(band.intersects(900, 40, 120)); // spans the strip
        assert!(band.intersects(900, 100, 400)); // top edge on the wire
        assert!(!band.intersects(900, 200, 400)); // below the strip
        assert!(!band.intersects(900, -300, 50)); // scrolled past
    }

    #[test]
    fn zero_offset_band_starts_at_top() {
        let band = ActivationBand::new(0, 600);
        assert_eq!(band.margin(), "-0px 0px -600px 0px");
        assert!(!band.intersects(600, 10, 20)); // strip collapses to y=0, element sits below it
    }
}
