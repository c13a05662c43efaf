//! Converts raw pointer events into chart actions.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position,
//! press location, drag detection). It is the only thing that sits between
//! raw window events and a chart's [`pointer`](crate::charts::Chart::pointer)
//! method.

use glam::DVec2;

use super::event::{InputEvent, MouseButton};

/// Squared distance the cursor may travel between press and release for the
/// gesture to still count as a click.
const DRAG_THRESHOLD_SQ: f64 = 9.0;

/// What a chart should do in response to pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Cursor is at this position.
    Hover(DVec2),
    /// Primary button clicked at this position.
    Click(DVec2),
    /// Cursor left the chart.
    Leave,
}

/// Converts raw pointer events into [`PointerAction`]s.
///
/// # Usage
///
/// ```ignore
/// for event in events {
///     if let Some(action) = processor.handle_event(event) {
///         chart.pointer(action);
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last known cursor position.
    cursor: DVec2,
    /// Where the primary button went down, while held.
    pressed_at: Option<DVec2>,
    /// Whether the cursor moved too far since the press.
    dragging: bool,
}

impl InputProcessor {
    /// Processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Process a raw input event and return zero or one actions.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<PointerAction> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = DVec2::new(x, y);
                if let Some(origin) = self.pressed_at {
                    if origin.distance_squared(self.cursor) > DRAG_THRESHOLD_SQ {
                        self.dragging = true;
                    }
                }
                Some(PointerAction::Hover(self.cursor))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::CursorLeft => {
                self.pressed_at = None;
                self.dragging = false;
                Some(PointerAction::Leave)
            }
        }
    }

    /// Mouse button press/release: only a primary release that did not
    /// drag produces a click.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<PointerAction> {
        if button != MouseButton::Left {
            return None;
        }
        if pressed {
            self.pressed_at = Some(self.cursor);
            self.dragging = false;
            return None;
        }
        let was_pressed = self.pressed_at.take().is_some();
        let was_dragging = std::mem::take(&mut self.dragging);
        (was_pressed && !was_dragging).then_some(PointerAction::Click(self.cursor))
    }
}
