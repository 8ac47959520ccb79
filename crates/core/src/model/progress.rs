use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::BookId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("total pages must be > 0")]
    InvalidTotalPages,
}

//
// ─── READING PROGRESS ──────────────────────────────────────────────────────────
//

/// A reader's position in one book.
///
/// The stored position may have been written against an older copy of the
/// document, so `current_page` is only guaranteed to sit inside the page
/// count recorded here. Callers reconciling against a freshly opened
/// document clamp again via [`clamped_page`](Self::clamped_page).
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingProgress {
    book_id: BookId,
    current_page: u32,
    total_pages: u32,
    last_read_at: Option<DateTime<Utc>>,
}

impl ReadingProgress {
    /// Creates a new ReadingProgress.
    ///
    /// `current_page` is clamped into `1..=total_pages`; a stored page of
    /// zero becomes page one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidTotalPages` if `total_pages` is zero.
    pub fn new(
        book_id: BookId,
        current_page: u32,
        total_pages: u32,
        last_read_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if total_pages == 0 {
            return Err(ProgressError::InvalidTotalPages);
        }

        Ok(Self {
            book_id,
            current_page: current_page.clamp(1, total_pages),
            total_pages,
            last_read_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn last_read_at(&self) -> Option<DateTime<Utc>> {
        self.last_read_at
    }

    /// Stored page reconciled against a live document's page count.
    #[must_use]
    pub fn clamped_page(&self, live_total_pages: u32) -> u32 {
        self.current_page.clamp(1, live_total_pages.max(1))
    }

    /// Whole-number completion percentage, rounded to nearest.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.current_page, self.total_pages)
    }
}

/// Rounded completion percentage for a page position.
///
/// Returns zero when `total_pages` is zero instead of dividing by it.
#[must_use]
pub fn percent_of(current_page: u32, total_pages: u32) -> u8 {
    if total_pages == 0 {
        return 0;
    }
    let pct = (f64::from(current_page) / f64::from(total_pages) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

//
// ─── PROGRESS OVERVIEW ─────────────────────────────────────────────────────────
//

/// One row of the continue-reading shelf.
///
/// A server-computed join of book metadata and the reader's position,
/// consumed as-is for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOverview {
    book_id: BookId,
    title: String,
    author: String,
    category: Option<String>,
    cover_path: Option<String>,
    current_page: u32,
    total_pages: u32,
    progress_percentage: f64,
    last_read_at: Option<DateTime<Utc>>,
}

impl ProgressOverview {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        book_id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        category: Option<String>,
        cover_path: Option<String>,
        current_page: u32,
        total_pages: u32,
        progress_percentage: f64,
        last_read_at: Option<DateTime<Utc>>,
    ) -> Self {
        let progress_percentage = if progress_percentage.is_finite() {
            progress_percentage.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            book_id,
            title: title.into(),
            author: author.into(),
            category,
            cover_path,
            current_page,
            total_pages,
            progress_percentage,
            last_read_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn cover_path(&self) -> Option<&str> {
        self.cover_path.as_deref()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }

    #[must_use]
    pub fn last_read_at(&self) -> Option<DateTime<Utc>> {
        self.last_read_at
    }

    /// True once the reader has reached the final page.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress_percentage >= 100.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn progress_new_rejects_zero_total() {
        let err = ReadingProgress::new(BookId::new(1), 1, 0, None).unwrap_err();
        assert_eq!(err, ProgressError::InvalidTotalPages);
    }

    #[test]
    fn progress_clamps_stored_page_into_range() {
        let p = ReadingProgress::new(BookId::new(1), 0, 10, None).unwrap();
        assert_eq!(p.current_page(), 1);

        let p = ReadingProgress::new(BookId::new(1), 42, 10, None).unwrap();
        assert_eq!(p.current_page(), 10);
    }

    #[test]
    fn progress_clamped_page_against_live_total() {
        // Stored against an older copy with more pages than the live one.
        let p = ReadingProgress::new(BookId::new(1), 7, 7, Some(fixed_now())).unwrap();
        assert_eq!(p.clamped_page(5), 5);
        assert_eq!(p.clamped_page(7), 7);
        assert_eq!(p.clamped_page(100), 7);
    }

    #[test]
    fn progress_percent_rounds() {
        let p = ReadingProgress::new(BookId::new(1), 1, 3, None).unwrap();
        assert_eq!(p.percent(), 33);

        let p = ReadingProgress::new(BookId::new(1), 2, 3, None).unwrap();
        assert_eq!(p.percent(), 67);

        let p = ReadingProgress::new(BookId::new(1), 3, 3, None).unwrap();
        assert_eq!(p.percent(), 100);
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent_of(5, 0), 0);
    }

    #[test]
    fn overview_sanitizes_percentage() {
        let row = ProgressOverview::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            None,
            None,
            3,
            10,
            f64::NAN,
            None,
        );
        assert!((row.progress_percentage() - 0.0).abs() < f64::EPSILON);

        let row = ProgressOverview::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            None,
            None,
            10,
            10,
            130.0,
            None,
        );
        assert!((row.progress_percentage() - 100.0).abs() < f64::EPSILON);
        assert!(row.is_complete());
    }
}
