use serde::{Deserialize, Serialize};

use crate::core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// What a pointer move means for the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMove {
    /// No drag in progress; only the crosshair follows the pointer.
    Hover(Point),
    /// Pixel delta since the previous drag point.
    Drag { dx: f64, dy: f64 },
}

/// Pointer state machine of one diagram.
///
/// `Idle -> down -> Dragging -> up/leave -> Idle`. The drag anchor moves with
/// every drag event, so deltas are always relative to the previous event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    last_point: Option<Point>,
    crosshair: Option<Point>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            last_point: None,
            crosshair: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    #[must_use]
    pub fn last_point(self) -> Option<Point> {
        self.last_point
    }

    /// Hover point of the crosshair, if visible.
    #[must_use]
    pub fn crosshair(self) -> Option<Point> {
        self.crosshair
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.mode = InteractionMode::Dragging;
        self.last_point = Some(point);
    }

    pub fn on_pointer_move(&mut self, point: Point) -> PointerMove {
        match (self.mode, self.last_point) {
            (InteractionMode::Dragging, Some(last)) => {
                self.last_point = Some(point);
                PointerMove::Drag {
                    dx: point.x - last.x,
                    dy: point.y - last.y,
                }
            }
            _ => {
                self.crosshair = Some(point);
                PointerMove::Hover(point)
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
        self.last_point = None;
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
        self.crosshair = None;
    }
}
