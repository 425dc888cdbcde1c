use crate::ViewportState;
use crate::controller::{ZoomDirection, pan, resize, zoom};

/// A platform input event, reduced to what the viewport math needs.
///
/// The host event loop maps raw window events onto these; the controller
/// consumes them, never raw events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Framebuffer dimensions changed.
    Resize { width: u32, height: u32 },
    /// One wheel step in the given direction.
    Zoom(ZoomDirection),
    /// Pointer moved by a pixel delta, with the primary button state.
    Pan { dx: f64, dy: f64, primary_held: bool },
}

/// Apply one event to the current state, returning the next state.
pub fn apply(state: &ViewportState, event: InputEvent) -> ViewportState {
    match event {
        InputEvent::Resize { width, height } => resize(state, width, height),
        InputEvent::Zoom(direction) => zoom(state, direction),
        InputEvent::Pan {
            dx,
            dy,
            primary_held,
        } => pan(state, dx, dy, primary_held),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_dispatches_resize() {
        let state = ViewportState::initial(800, 600);
        let next = apply(
            &state,
            InputEvent::Resize {
                width: 1600,
                height: 600,
            },
        );
        assert_eq!(next.framebuffer_size, (1600, 600));
        assert_eq!(next, resize(&state, 1600, 600));
    }

    #[test]
    fn apply_dispatches_zoom() {
        let state = ViewportState::initial(800, 600);
        let next = apply(&state, InputEvent::Zoom(ZoomDirection::In));
        assert_eq!(next, zoom(&state, ZoomDirection::In));
    }

    #[test]
    fn apply_dispatches_pan() {
        let state = ViewportState::initial(800, 600);
        let next = apply(
            &state,
            InputEvent::Pan {
                dx: 12.0,
                dy: -8.0,
                primary_held: true,
            },
        );
        assert_eq!(next, pan(&state, 12.0, -8.0, true));
    }

    #[test]
    fn released_pan_event_leaves_state_unchanged() {
        let state = ViewportState::initial(800, 600);
        let next = apply(
            &state,
            InputEvent::Pan {
                dx: 12.0,
                dy: -8.0,
                primary_held: false,
            },
        );
        assert_eq!(next, state);
    }
}
