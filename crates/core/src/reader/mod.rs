//! Interactive state for the reading view.
//!
//! [`ReadingSession`] owns one visit's page, zoom and page-jump state;
//! [`GestureTracker`] turns raw touch streams into page-turn and pinch
//! intents for it. Both are synchronous and free of I/O, so the whole
//! reading interaction can be unit tested without a renderer or a
//! network.

mod gesture;
mod session;

pub use gesture::{
    GestureIntent, GestureTracker, PageDirection, TouchPoint, HORIZONTAL_DOMINANCE,
    PAN_ZOOM_CUTOFF, SWIPE_THRESHOLD,
};
pub use session::{
    DocumentStatus, ReadingSession, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
