use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::ReviewId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReviewError {
    #[error("rating must be between 1 and 5 stars")]
    InvalidRating,
}

//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// A star rating, always between one and five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Creates a new Rating.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidRating` outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self, ReviewError> {
        if !(1..=5).contains(&stars) {
            return Err(ReviewError::InvalidRating);
        }
        Ok(Self(stars))
    }

    /// Forces an untrusted star count into range instead of rejecting
    /// it, for numbers that arrived over the wire.
    #[must_use]
    pub fn saturating(stars: u8) -> Self {
        Self(stars.clamp(1, 5))
    }

    #[must_use]
    pub fn stars(&self) -> u8 {
        self.0
    }

    /// All ratings from five stars down to one, the order rating
    /// breakdowns are listed in.
    #[must_use]
    pub fn descending() -> [Rating; 5] {
        [Rating(5), Rating(4), Rating(3), Rating(2), Rating(1)]
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// One reader's published review of a book.
///
/// Rows arrive pre-scoped to a book, so this carries only what the
/// review list shows. The text is optional; a bare star rating is a
/// valid review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: ReviewId,
    reviewer: String,
    rating: Rating,
    text: Option<String>,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new Review. Blank text collapses to no text.
    #[must_use]
    pub fn new(
        id: ReviewId,
        reviewer: impl Into<String>,
        rating: Rating,
        text: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let text = text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());

        Self {
            id,
            reviewer: reviewer.into().trim().to_owned(),
            rating,
            text,
            created_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// Display name of whoever wrote the review.
    #[must_use]
    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── STATISTICS ────────────────────────────────────────────────────────────────
//

/// Aggregated rating numbers for one book.
///
/// The server computes these, so construction only sanitizes rather than
/// recomputes. The per-star counts are stored five down to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStatistics {
    average_rating: f64,
    total_reviews: u32,
    star_counts: [u32; 5],
}

impl ReviewStatistics {
    /// Creates statistics from server-reported numbers.
    ///
    /// A non-finite average becomes zero; the average is clamped into
    /// `0.0..=5.0`. `star_counts` is ordered five stars first.
    #[must_use]
    pub fn new(average_rating: f64, total_reviews: u32, star_counts: [u32; 5]) -> Self {
        let average_rating = if average_rating.is_finite() {
            average_rating.clamp(0.0, 5.0)
        } else {
            0.0
        };

        Self {
            average_rating,
            total_reviews,
            star_counts,
        }
    }

    /// Statistics for a book with no reviews yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0.0, 0, [0; 5])
    }

    #[must_use]
    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    /// Average formatted to one decimal place, e.g. `"4.3"`.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_rating)
    }

    /// Average rounded to whole stars for the summary star row.
    #[must_use]
    pub fn average_stars(&self) -> u8 {
        self.average_rating.round().clamp(0.0, 5.0) as u8
    }

    #[must_use]
    pub fn total_reviews(&self) -> u32 {
        self.total_reviews
    }

    /// How many reviews awarded the given rating.
    #[must_use]
    pub fn count_for(&self, rating: Rating) -> u32 {
        self.star_counts[usize::from(5 - rating.stars())]
    }

    /// Fraction of reviews at the given rating, as a percentage for
    /// breakdown bar widths. Zero when there are no reviews.
    #[must_use]
    pub fn share_for(&self, rating: Rating) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        f64::from(self.count_for(rating)) / f64::from(self.total_reviews) * 100.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
