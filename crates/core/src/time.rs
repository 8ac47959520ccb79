use chrono::{DateTime, Utc};

/// Where timestamps come from.
///
/// The in-memory backend stamps progress records and reviews through
/// this, so tests can pin the clock and assert exact `last_read_at`
/// values instead of sampling `Utc::now()` twice and hoping.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Real wall-clock time.
    #[default]
    Default,
    /// Always the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock pinned at the given instant.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
///
/// # Panics
///
/// Panics if the timestamp cannot be represented, which it always can.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).expect("timestamp is representable")
}

/// A [`Clock`] pinned at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
