use serde::{Deserialize, Serialize};

/// The rectangular complex-plane region currently mapped onto the
/// framebuffer, plus the framebuffer's pixel dimensions.
///
/// The renderer reads a copy of this once per frame; only the controller
/// functions in [`crate::controller`] produce new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Pixel dimensions of the render target. Mutated only on resize.
    pub framebuffer_size: (u32, u32),
    /// Vertical extent (min, max) of the visible region, min < max.
    pub imag: (f64, f64),
    /// Horizontal extent (min, max) of the visible region, min < max.
    pub real: (f64, f64),
}

impl ViewportState {
    /// Default region for a fresh framebuffer: imaginary axis [-2, 2],
    /// real axis centered on zero with the span the aspect ratio demands.
    pub fn initial(width: u32, height: u32) -> Self {
        let aspect = width as f64 / height as f64;
        Self {
            framebuffer_size: (width, height),
            imag: (-2.0, 2.0),
            real: (-2.0 * aspect, 2.0 * aspect),
        }
    }

    pub fn imag_span(&self) -> f64 {
        self.imag.1 - self.imag.0
    }

    pub fn real_span(&self) -> f64 {
        self.real.1 - self.real.0
    }

    /// Framebuffer width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.framebuffer_size.0 as f64 / self.framebuffer_size.1 as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_satisfies_aspect_invariant() {
        let state = ViewportState::initial(800, 600);
        let expected = state.imag_span() * state.aspect_ratio();
        assert!((state.real_span() - expected).abs() < 1e-9);
    }

    #[test]
    fn initial_real_range_is_centered() {
        let state = ViewportState::initial(800, 600);
        let midpoint = (state.real.0 + state.real.1) / 2.0;
        assert!(midpoint.abs() < 1e-12);
        // 4 * 800/600 = 16/3
        assert!((state.real_span() - 16.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn initial_imag_range_is_fixed_reference() {
        let state = ViewportState::initial(1920, 1080);
        assert_eq!(state.imag, (-2.0, 2.0));
    }

    #[test]
    fn spans_are_positive() {
        let state = ViewportState::initial(1280, 720);
        assert!(state.imag_span() > 0.0);
        assert!(state.real_span() > 0.0);
    }
}
