use crate::ViewportState;

/// Wheel zoom direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

const ZOOM_IN_FACTOR: f64 = 0.95;
const ZOOM_OUT_FACTOR: f64 = 1.05;

/// Re-derive the real extent so the region's proportions match the
/// framebuffer's, keeping the real midpoint where it was.
fn fix_aspect(mut state: ViewportState) -> ViewportState {
    let old_span = state.real_span();
    let new_span = state.imag_span() * state.aspect_ratio();
    state.real.0 -= (new_span - old_span) / 2.0;
    state.real.1 = state.real.0 + new_span;
    state
}

/// New framebuffer dimensions. Holds the imaginary extent fixed and
/// restores the aspect invariant around the previous real midpoint, so a
/// resize never pans the view.
pub fn resize(state: &ViewportState, width: u32, height: u32) -> ViewportState {
    let mut next = *state;
    next.framebuffer_size = (width, height);
    fix_aspect(next)
}

/// Scale the imaginary span by 0.95 (in) or 1.05 (out), anchored at
/// `imag.min`, then re-derive the real extent. Zoom is anchored at the
/// top edge of the view, not the cursor.
pub fn zoom(state: &ViewportState, direction: ZoomDirection) -> ViewportState {
    let factor = match direction {
        ZoomDirection::In => ZOOM_IN_FACTOR,
        ZoomDirection::Out => ZOOM_OUT_FACTOR,
    };
    let mut next = *state;
    next.imag.1 = next.imag.0 + next.imag_span() * factor;
    fix_aspect(next)
}

/// Shift the region by a pixel-space drag delta. Dragging right reveals
/// content to the left, hence the sign inversion on the real axis.
/// Without the primary button held this returns the state unchanged.
pub fn pan(state: &ViewportState, dx_px: f64, dy_px: f64, primary_held: bool) -> ViewportState {
    if !primary_held {
        return *state;
    }
    let (width, height) = state.framebuffer_size;
    let imag_delta = dy_px / height as f64 * state.imag_span();
    let real_delta = dx_px / width as f64 * state.real_span();

    let mut next = *state;
    next.imag.0 += imag_delta;
    next.imag.1 += imag_delta;
    next.real.0 -= real_delta;
    next.real.1 -= real_delta;
    fix_aspect(next)
}
