use shelf_core::model::{BookId, ProgressOverview};
use shelf_services::resolve_asset_url;

use crate::vm::time_fmt::format_date;

/// One book on the continue-reading shelf.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressCardVm {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub cover_url: Option<String>,
    pub page_label: String,
    pub percent_label: String,
    /// Bar width in percent, kept inside `0..=100` for the style attribute.
    pub percent_width: f64,
    pub last_read_label: Option<String>,
    pub complete: bool,
}

impl ProgressCardVm {
    #[must_use]
    pub fn initial(&self) -> String {
        self.title
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

#[must_use]
pub fn map_progress_card(row: &ProgressOverview, api_url: &str) -> ProgressCardVm {
    let percent = row.progress_percentage().clamp(0.0, 100.0);

    ProgressCardVm {
        book_id: row.book_id(),
        title: row.title().to_string(),
        author: row.author().to_string(),
        category: row.category().map(str::to_string),
        cover_url: row
            .cover_path()
            .map(|path| resolve_asset_url(api_url, path)),
        page_label: format!("Page {} of {}", row.current_page(), row.total_pages()),
        percent_label: format!("{percent:.0}%"),
        percent_width: percent,
        last_read_label: row.last_read_at().map(format_date),
        complete: row.is_complete(),
    }
}

#[must_use]
pub fn map_progress_cards(rows: &[ProgressOverview], api_url: &str) -> Vec<ProgressCardVm> {
    rows.iter().map(|row| map_progress_card(row, api_url)).collect()
}
