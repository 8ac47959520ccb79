use shelf_core::model::{Rating, Review, ReviewId, ReviewStatistics};

use crate::vm::time_fmt::format_date;

/// Filled and hollow stars for a whole-star rating, e.g. `★★★★☆`.
#[must_use]
pub fn star_row(stars: u8) -> String {
    (1..=5)
        .map(|star| if star <= stars { '\u{2605}' } else { '\u{2606}' })
        .collect()
}

/// One review in a book's review list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewCardVm {
    pub id: ReviewId,
    pub reviewer: String,
    pub stars_label: String,
    pub date_label: String,
    pub text: Option<String>,
}

impl From<&Review> for ReviewCardVm {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id(),
            reviewer: review.reviewer().to_string(),
            stars_label: star_row(review.rating().stars()),
            date_label: format_date(review.created_at()),
            text: review.text().map(str::to_string),
        }
    }
}

#[must_use]
pub fn map_review_cards(reviews: &[Review]) -> Vec<ReviewCardVm> {
    reviews.iter().map(ReviewCardVm::from).collect()
}

/// One row of the five-to-one-star breakdown chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakdownBarVm {
    pub stars: u8,
    pub count: u32,
    pub percent: f64,
}

#[must_use]
pub fn map_breakdown_bars(statistics: &ReviewStatistics) -> Vec<BreakdownBarVm> {
    Rating::descending()
        .iter()
        .map(|rating| BreakdownBarVm {
            stars: rating.stars(),
            count: statistics.count_for(*rating),
            percent: statistics.share_for(*rating),
        })
        .collect()
}
