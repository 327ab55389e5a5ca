//! Drag gesture state machine
//!
//! ```text
//! Idle ──PointerDown──▶ Armed ──PointerMove (> activation)──▶ Dragging
//!   ▲                    │                                      │
//!   └──── Up / Cancel ───┘          PointerUp{over} (Reordering)│
//!   └───────────────────────────────────────────────────────────┘
//! ```
//!
//! `Reordering` is not a resting state: releasing over a different item
//! yields a [`Reorder`] and the machine is back in `Idle` immediately.

use serde::{Deserialize, Serialize};

/// Pointer travel required before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed but not yet past the activation distance
    Armed { id: String, origin: Point },
    Dragging { active_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    PointerDown { id: String, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// `over` is the item under the pointer on release, if any
    PointerUp { over: Option<String> },
    Cancel,
}

/// A completed move request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder {
    pub active_id: String,
    pub over_id: String,
}

#[derive(Debug, Clone)]
pub struct DragGesture {
    state: DragState,
    activation_distance: f64,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl DragGesture {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            activation_distance: activation_distance.max(0.0),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    /// Id of the item following the pointer, once the drag is active
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active_id } => Some(active_id),
            _ => None,
        }
    }

    /// Feed one pointer event. Returns a move only on a release over a
    /// different item while dragging.
    pub fn handle(&mut self, event: DragEvent) -> Option<Reorder> {
        let state = std::mem::take(&mut self.state);
        let (next, reorder) = match (state, event) {
            (DragState::Idle, DragEvent::PointerDown { id, x, y }) => (
                DragState::Armed {
                    id,
                    origin: Point::new(x, y),
                },
                None,
            ),
            (DragState::Armed { id, origin }, DragEvent::PointerMove { x, y }) => {
                if origin.distance_to(&Point::new(x, y)) > self.activation_distance {
                    tracing::trace!(id = %id, "Drag activated");
                    (DragState::Dragging { active_id: id }, None)
                } else {
                    (DragState::Armed { id, origin }, None)
                }
            }
            (DragState::Dragging { active_id }, DragEvent::PointerUp { over }) => {
                let reorder = over
                    .filter(|over_id| *over_id != active_id)
                    .map(|over_id| Reorder { active_id, over_id });
                (DragState::Idle, reorder)
            }
            (DragState::Armed { .. }, DragEvent::PointerUp { .. })
            | (_, DragEvent::Cancel) => (DragState::Idle, None),
            (state, _) => (state, None),
        };
        self.state = next;
        reorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(id: &str) -> DragEvent {
        DragEvent::PointerDown {
            id: id.into(),
            x: 0.0,
            y: 0.0,
        }
    }

    fn up(over: Option<&str>) -> DragEvent {
        DragEvent::PointerUp {
            over: over.map(str::to_string),
        }
    }

    #[test]
    fn test_press_move_release_yields_reorder() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.handle(down("a")), None);
        assert!(matches!(gesture.state(), DragState::Armed { .. }));

        gesture.handle(DragEvent::PointerMove { x: 0.0, y: 20.0 });
        assert_eq!(gesture.active_id(), Some("a"));

        let reorder = gesture.handle(up(Some("c")));
        assert_eq!(
            reorder,
            Some(Reorder {
                active_id: "a".into(),
                over_id: "c".into()
            })
        );
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn test_small_moves_do_not_activate() {
        let mut gesture = DragGesture::new(8.0);
        gesture.handle(down("a"));
        gesture.handle(DragEvent::PointerMove { x: 3.0, y: 4.0 });
        assert!(gesture.active_id().is_none());

        // click without drag is not a move
        assert_eq!(gesture.handle(up(Some("b"))), None);
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn test_release_over_self_or_nothing_is_not_a_move() {
        let mut gesture = DragGesture::new(0.0);
        gesture.handle(down("a"));
        gesture.handle(DragEvent::PointerMove { x: 1.0, y: 0.0 });
        assert_eq!(gesture.handle(up(Some("a"))), None);

        gesture.handle(down("a"));
        gesture.handle(DragEvent::PointerMove { x: 1.0, y: 0.0 });
        assert_eq!(gesture.handle(up(None)), None);
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut gesture = DragGesture::new(0.0);
        gesture.handle(down("a"));
        gesture.handle(DragEvent::PointerMove { x: 5.0, y: 5.0 });
        assert_eq!(gesture.handle(DragEvent::Cancel), None);
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.handle(up(Some("a"))), None);
        gesture.handle(DragEvent::PointerMove { x: 100.0, y: 0.0 });
        assert_eq!(gesture.state(), &DragState::Idle);

        // second press while armed keeps the first item
        gesture.handle(down("a"));
        gesture.handle(down("b"));
        assert!(matches!(gesture.state(), DragState::Armed { id, .. } if id == "a"));
    }
}
