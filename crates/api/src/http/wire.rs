//! Wire payloads for the catalog server, kept separate from the domain
//! types so server quirks stay at the boundary.
//!
//! The server is loose in places this client is not. Decimal columns may
//! arrive as JSON strings, categories come as either a list or a single
//! `category` field, and reviewer names fall back to the account email.
//! Each DTO here absorbs one of those quirks before handing over a
//! validated domain value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use shelf_core::model::{
    Book, BookId, ProgressOverview, Rating, ReadingProgress, Review, ReviewId, ReviewStatistics,
    UserId, UserProfile, UserRole,
};

use crate::stores::{ApiError, BookReviews};

fn bad<E: std::fmt::Display>(e: E) -> ApiError {
    ApiError::Serialization(e.to_string())
}

/// Accepts a number, a numeric string, or null, since decimal columns
/// serialize differently across server versions.
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => n,
        Some(Raw::Text(t)) => t.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

//
// ─── BOOKS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct BookDto {
    id: u64,
    title: String,
    author: String,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    cover_path: Option<String>,
    #[serde(default)]
    pdf_path: Option<String>,
}

impl BookDto {
    /// Older rows carry a single `category` column instead of the
    /// `categories` list.
    pub(crate) fn into_book(self) -> Result<Book, ApiError> {
        let categories = match self.categories {
            Some(list) => list,
            None => self.category.into_iter().collect(),
        };

        Book::new(
            BookId::new(self.id),
            self.title,
            self.author,
            categories,
            self.cover_path,
            self.pdf_path,
        )
        .map_err(bad)
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressEnvelope {
    #[serde(rename = "hasProgress")]
    has_progress: bool,
    #[serde(default)]
    progress: Option<ProgressDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressDto {
    current_page: u32,
    total_pages: u32,
    #[serde(default)]
    last_read_at: Option<DateTime<Utc>>,
}

impl ProgressEnvelope {
    /// The payload does not repeat the book id, so the caller supplies it.
    pub(crate) fn into_progress(
        self,
        book_id: BookId,
    ) -> Result<Option<ReadingProgress>, ApiError> {
        if !self.has_progress {
            return Ok(None);
        }
        let Some(dto) = self.progress else {
            return Ok(None);
        };

        ReadingProgress::new(book_id, dto.current_page, dto.total_pages, dto.last_read_at)
            .map(Some)
            .map_err(bad)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveProgressBody {
    pub(crate) book_id: u64,
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverviewRowDto {
    book_id: u64,
    title: String,
    author: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    cover_path: Option<String>,
    current_page: u32,
    total_pages: u32,
    #[serde(default, deserialize_with = "flexible_f64")]
    progress_percentage: f64,
    #[serde(default)]
    last_read_at: Option<DateTime<Utc>>,
}

impl OverviewRowDto {
    pub(crate) fn into_row(self) -> ProgressOverview {
        ProgressOverview::new(
            BookId::new(self.book_id),
            self.title,
            self.author,
            self.category,
            self.cover_path,
            self.current_page,
            self.total_pages,
            self.progress_percentage,
            self.last_read_at,
        )
    }
}

//
// ─── REVIEWS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct BookReviewsDto {
    #[serde(default)]
    reviews: Vec<ReviewDto>,
    #[serde(default)]
    statistics: Option<StatisticsDto>,
}

impl BookReviewsDto {
    pub(crate) fn into_book_reviews(self) -> BookReviews {
        let reviews = self.reviews.into_iter().map(ReviewDto::into_review).collect();
        let statistics = self
            .statistics
            .map_or_else(ReviewStatistics::empty, StatisticsDto::into_statistics);

        BookReviews {
            reviews,
            statistics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewDto {
    id: u64,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    rating: u8,
    #[serde(default)]
    review_text: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReviewDto {
    /// Reviewer display name prefers the username and falls back to the
    /// account email.
    pub(crate) fn into_review(self) -> Review {
        let reviewer = self
            .username
            .filter(|name| !name.trim().is_empty())
            .or(self.email)
            .unwrap_or_default();

        Review::new(
            ReviewId::new(self.id),
            reviewer,
            Rating::saturating(self.rating),
            self.review_text,
            self.created_at,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsDto {
    #[serde(default, deserialize_with = "flexible_f64")]
    average_rating: f64,
    #[serde(default)]
    total_reviews: u32,
    #[serde(default)]
    five_star: u32,
    #[serde(default)]
    four_star: u32,
    #[serde(default)]
    three_star: u32,
    #[serde(default)]
    two_star: u32,
    #[serde(default)]
    one_star: u32,
}

impl StatisticsDto {
    pub(crate) fn into_statistics(self) -> ReviewStatistics {
        ReviewStatistics::new(
            self.average_rating,
            self.total_reviews,
            [
                self.five_star,
                self.four_star,
                self.three_star,
                self.two_star,
                self.one_star,
            ],
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserReviewEnvelope {
    #[serde(rename = "hasReview")]
    has_review: bool,
    #[serde(default)]
    review: Option<ReviewDto>,
}

impl UserReviewEnvelope {
    pub(crate) fn into_review(self) -> Option<Review> {
        if !self.has_review {
            return None;
        }
        self.review.map(ReviewDto::into_review)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveReviewBody {
    pub(crate) book_id: u64,
    pub(crate) rating: u8,
    pub(crate) review_text: String,
}

//
// ─── IDENTITY ──────────────────────────────────────────────────────────────────
//

/// A user id that may arrive as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Num(u64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeDto {
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    uid: Option<WireId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl MeDto {
    /// A display name is required downstream, so this falls back through
    /// `name`, `username`, then the local part of the email.
    pub(crate) fn into_profile(self) -> Result<UserProfile, ApiError> {
        let id = self
            .id
            .or(self.uid)
            .ok_or_else(|| ApiError::Serialization("user payload missing id".into()))?;

        let email = self.email.unwrap_or_default();
        let name = self
            .name
            .or(self.username)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_owned());
        let role = UserRole::from_wire(self.role.as_deref().unwrap_or_default());

        UserProfile::new(UserId::new(id.into_string()), name, email, role).map_err(bad)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
