//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// Minimum horizontal travel, in viewport units, before a drag counts
/// as a page-turn swipe.
pub const SWIPE_THRESHOLD: f64 = 80.0;

/// A drag is horizontal enough to turn a page when |dx / dy| exceeds this.
pub const HORIZONTAL_DOMINANCE: f64 = 2.0;

/// Above this zoom scale a one-finger drag pans the page instead of
/// turning it, so swipe classification is suppressed.
pub const PAN_ZOOM_CUTOFF: f64 = 1.05;

//
// ─── TOUCH POINTS ──────────────────────────────────────────────────────────────
//

/// One finger's position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    x: f64,
    y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    fn distance_to(&self, other: TouchPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// Which way a swipe asks to turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// Leftward swipe, towards the following page.
    Next,
    /// Rightward swipe, back towards the previous page.
    Previous,
}

/// What a touch stream is asking the reader to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    PageTurn(PageDirection),
    /// Current inter-finger distance over the distance when the pinch
    /// began. Applied multiplicatively to the zoom at gesture start.
    Pinch { ratio: f64 },
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Classifies raw touch events into page-turn and pinch intents.
///
/// The tracker is pure gesture bookkeeping: it never touches page or
/// zoom state itself, it only reports what the fingers meant. Callers
/// feed it the three platform touch events and apply the returned
/// intents to their own state.
#[derive(Debug, Default)]
pub struct GestureTracker {
    state: TrackerState,
}

#[derive(Debug, Default)]
enum TrackerState {
    #[default]
    Idle,
    Swiping {
        start: TouchPoint,
    },
    Pinching {
        initial_distance: f64,
    },
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a gesture from the full set of active touches.
    ///
    /// One finger arms a swipe, two fingers arm a pinch anchored at the
    /// current inter-finger distance. Other counts leave the tracker as
    /// it was.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [point] => {
                self.state = TrackerState::Swiping { start: *point };
            }
            [first, second] => {
                self.state = TrackerState::Pinching {
                    initial_distance: first.distance_to(*second),
                };
            }
            _ => {}
        }
    }

    /// Classifies a movement of the active touches.
    ///
    /// `zoom_scale` is the reader's current zoom. Beyond
    /// [`PAN_ZOOM_CUTOFF`] a one-finger drag is a pan, so no page-turn
    /// is reported and the platform's own scrolling takes over.
    ///
    /// At most one page-turn is reported per touch; the swipe disarms
    /// itself once it fires and stays quiet until the next
    /// [`touch_start`](Self::touch_start).
    pub fn touch_move(&mut self, touches: &[TouchPoint], zoom_scale: f64) -> Option<GestureIntent> {
        match (touches, &mut self.state) {
            ([point], TrackerState::Swiping { start }) => {
                if zoom_scale > PAN_ZOOM_CUTOFF {
                    return None;
                }

                let dx = point.x - start.x;
                let dy = point.y - start.y;

                // A perfectly horizontal drag divides by zero; the
                // resulting infinity counts as dominant.
                if dx.abs() > SWIPE_THRESHOLD && (dx / dy).abs() > HORIZONTAL_DOMINANCE {
                    self.state = TrackerState::Idle;
                    let direction = if dx < 0.0 {
                        PageDirection::Next
                    } else {
                        PageDirection::Previous
                    };
                    return Some(GestureIntent::PageTurn(direction));
                }
                None
            }
            ([first, second], TrackerState::Pinching { initial_distance }) => {
                let distance = first.distance_to(*second);
                if *initial_distance <= 0.0 {
                    *initial_distance = distance.max(f64::EPSILON);
                    return Some(GestureIntent::Pinch { ratio: 1.0 });
                }
                Some(GestureIntent::Pinch {
                    ratio: distance / *initial_distance,
                })
            }
            ([first, second], _) => {
                // Two fingers moving without a recorded start; anchor
                // the pinch here so the first report is a no-op ratio.
                self.state = TrackerState::Pinching {
                    initial_distance: first.distance_to(*second).max(f64::EPSILON),
                };
                Some(GestureIntent::Pinch { ratio: 1.0 })
            }
            _ => None,
        }
    }

    /// Ends the gesture when a finger lifts.
    pub fn touch_end(&mut self) {
        self.state = TrackerState::Idle;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    #[test]
    fn swipe_left_turns_to_next_page() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(200.0, 100.0)]);
        let intent = tracker.touch_move(&[point(100.0, 100.0)], 1.0);
        assert_eq!(intent, Some(GestureIntent::PageTurn(PageDirection::Next)));
    }

    #[test]
    fn swipe_right_turns_to_previous_page() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(100.0, 100.0)]);
        let intent = tracker.touch_move(&[point(250.0, 110.0)], 1.0);
        assert_eq!(
            intent,
            Some(GestureIntent::PageTurn(PageDirection::Previous))
        );
    }

    #[test]
    fn short_drag_is_not_a_swipe() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(100.0, 100.0)]);
        assert_eq!(tracker.touch_move(&[point(160.0, 100.0)], 1.0), None);
    }

    #[test]
    fn diagonal_drag_is_not_a_swipe() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(200.0, 100.0)]);
        // dx = -100, dy = 60: long enough but not horizontal enough.
        assert_eq!(tracker.touch_move(&[point(100.0, 160.0)], 1.0), None);
    }

    #[test]
    fn swipe_fires_at_most_once_per_touch() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(300.0, 100.0)]);
        assert!(tracker.touch_move(&[point(100.0, 100.0)], 1.0).is_some());
        assert_eq!(tracker.touch_move(&[point(50.0, 100.0)], 1.0), None);

        tracker.touch_end();
        tracker.touch_start(&[point(300.0, 100.0)]);
        assert!(tracker.touch_move(&[point(100.0, 100.0)], 1.0).is_some());
    }

    #[test]
    fn zoomed_page_pans_instead_of_turning() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(300.0, 100.0)]);
        assert_eq!(tracker.touch_move(&[point(100.0, 100.0)], 1.5), None);

        // The cutoff itself still turns; only beyond it pans.
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(300.0, 100.0)]);
        assert!(tracker.touch_move(&[point(100.0, 100.0)], 1.05).is_some());
    }

    #[test]
    fn pinch_reports_distance_ratio() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(100.0, 100.0), point(200.0, 100.0)]);

        let intent = tracker.touch_move(&[point(75.0, 100.0), point(225.0, 100.0)], 1.0);
        let Some(GestureIntent::Pinch { ratio }) = intent else {
            panic!("expected a pinch, got {intent:?}");
        };
        assert!((ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn pinch_halving_reports_half_ratio() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(100.0, 100.0), point(300.0, 100.0)]);

        let intent = tracker.touch_move(&[point(150.0, 100.0), point(250.0, 100.0)], 1.0);
        let Some(GestureIntent::Pinch { ratio }) = intent else {
            panic!("expected a pinch, got {intent:?}");
        };
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn pinch_without_start_anchors_at_current_distance() {
        let mut tracker = GestureTracker::new();
        let intent = tracker.touch_move(&[point(100.0, 100.0), point(200.0, 100.0)], 1.0);
        assert_eq!(intent, Some(GestureIntent::Pinch { ratio: 1.0 }));

        let intent = tracker.touch_move(&[point(100.0, 100.0), point(300.0, 100.0)], 1.0);
        let Some(GestureIntent::Pinch { ratio }) = intent else {
            panic!("expected a pinch, got {intent:?}");
        };
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn second_finger_cancels_swipe() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(300.0, 100.0)]);
        tracker.touch_start(&[point(300.0, 100.0), point(400.0, 100.0)]);

        // Back to one finger without a new touch start: no swipe.
        assert_eq!(tracker.touch_move(&[point(100.0, 100.0)], 1.0), None);
    }

    #[test]
    fn pinch_ignores_pan_cutoff() {
        let mut tracker = GestureTracker::new();
        tracker.touch_start(&[point(100.0, 100.0), point(200.0, 100.0)]);
        let intent = tracker.touch_move(&[point(50.0, 100.0), point(250.0, 100.0)], 2.5);
        assert!(matches!(intent, Some(GestureIntent::Pinch { .. })));
    }
}
