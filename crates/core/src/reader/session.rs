use crate::model::BookId;

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.25;

//
// ─── DOCUMENT STATUS ───────────────────────────────────────────────────────────
//

/// Where the session stands with the page document.
///
/// `Unavailable` is terminal: once the renderer reports failure the
/// session shows a placeholder for the rest of the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    #[default]
    Loading,
    Ready,
    Unavailable,
}

//
// ─── READING SESSION ───────────────────────────────────────────────────────────
//

/// View state for one visit to one book's reading view.
///
/// Owns the current page, the zoom scale and the free-text page jump
/// field, and reconciles a previously stored position against the
/// freshly opened document. One instance per visit; navigation away
/// drops it.
///
/// All operations are synchronous transitions. Out-of-range page
/// requests are silently ignored rather than treated as errors, so the
/// page invariant `1 <= current_page <= total_pages` holds whenever the
/// page count is known. Persistence is a caller concern; mutating
/// operations report whether the page actually changed so callers know
/// when a save is worth scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSession {
    book_id: BookId,
    status: DocumentStatus,
    current_page: u32,
    total_pages: Option<u32>,
    zoom_scale: f64,
    page_input: String,
}

impl ReadingSession {
    /// Opens a session on page one at default zoom, waiting for the
    /// document to load.
    #[must_use]
    pub fn new(book_id: BookId) -> Self {
        Self {
            book_id,
            status: DocumentStatus::Loading,
            current_page: 1,
            total_pages: None,
            zoom_scale: DEFAULT_ZOOM,
            page_input: "1".to_owned(),
        }
    }

    // Accessors
    #[must_use]
    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    #[must_use]
    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    #[must_use]
    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.current_page < total)
    }

    /// Completion percentage for the progress bar, zero until the page
    /// count is known.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        match self.total_pages {
            Some(total) if total > 0 => f64::from(self.current_page) / f64::from(total) * 100.0,
            _ => 0.0,
        }
    }

    // ─── Document lifecycle ────────────────────────────────────────────────

    /// Records the renderer's reported page count and reconciles the
    /// current page against it.
    ///
    /// A stored position adopted before the document finished loading
    /// may exceed a document whose page count shrank; it is clamped
    /// here. A zero page count means there is nothing to read, which
    /// the session treats the same as a failed load.
    pub fn document_loaded(&mut self, total_pages: u32) {
        if self.status == DocumentStatus::Unavailable {
            return;
        }
        if total_pages == 0 {
            self.status = DocumentStatus::Unavailable;
            return;
        }

        self.total_pages = Some(total_pages);
        self.status = DocumentStatus::Ready;
        self.current_page = self.current_page.clamp(1, total_pages);
        self.sync_page_input();
    }

    /// Marks the document as unrenderable for the rest of the visit.
    pub fn document_failed(&mut self) {
        self.status = DocumentStatus::Unavailable;
    }

    /// Adopts a previously stored page position.
    ///
    /// Clamped into range when the page count is already known;
    /// otherwise taken as-is and clamped later by
    /// [`document_loaded`](Self::document_loaded). Returns whether the
    /// current page changed.
    pub fn adopt_progress(&mut self, stored_page: u32) -> bool {
        if self.status == DocumentStatus::Unavailable {
            return false;
        }

        let page = match self.total_pages {
            Some(total) => stored_page.clamp(1, total),
            None => stored_page.max(1),
        };
        if page == self.current_page {
            return false;
        }

        self.current_page = page;
        self.sync_page_input();
        true
    }

    // ─── Page navigation ───────────────────────────────────────────────────

    /// Jumps to the given page if it is within the document.
    ///
    /// Returns whether the current page changed; out-of-range requests
    /// (and requests before the page count is known) leave the state
    /// untouched.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let Some(total) = self.total_pages else {
            return false;
        };
        if page < 1 || page > total || page == self.current_page {
            return false;
        }

        self.current_page = page;
        self.sync_page_input();
        true
    }

    /// Moves forward or back by the given number of pages.
    pub fn change_page(&mut self, delta: i32) -> bool {
        let target = i64::from(self.current_page) + i64::from(delta);
        match u32::try_from(target) {
            Ok(page) => self.go_to_page(page),
            Err(_) => false,
        }
    }

    // ─── Zoom ──────────────────────────────────────────────────────────────

    /// Sets the zoom scale, rounded to two decimals and clamped into
    /// `[MIN_ZOOM, MAX_ZOOM]`. Non-finite input is ignored.
    pub fn set_zoom(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let rounded = (scale * 100.0).round() / 100.0;
        self.zoom_scale = rounded.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom_scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom_scale - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_scale = DEFAULT_ZOOM;
    }

    /// Applies a pinch gesture: the inter-finger distance ratio scales
    /// the zoom captured when the gesture began.
    pub fn apply_pinch(&mut self, base_scale: f64, ratio: f64) {
        self.set_zoom(base_scale * ratio);
    }

    // ─── Page jump field ───────────────────────────────────────────────────

    /// Mirrors typing into the page jump field.
    pub fn set_page_input(&mut self, text: impl Into<String>) {
        self.page_input = text.into();
    }

    /// Submits the page jump field.
    ///
    /// A parseable in-range number navigates there; anything else
    /// reverts the field to the current page without committing. Returns
    /// whether the current page changed.
    pub fn submit_page_input(&mut self) -> bool {
        match self.parsed_page_input() {
            Some(page) => self.go_to_page(page),
            None => {
                self.sync_page_input();
                false
            }
        }
    }

    /// Reverts the field to the current page when focus leaves it with
    /// an invalid value. Valid text is left alone.
    pub fn blur_page_input(&mut self) {
        if self.parsed_page_input().is_none() {
            self.sync_page_input();
        }
    }

    /// The field's value as an in-range page number, if it is one.
    fn parsed_page_input(&self) -> Option<u32> {
        let page = self.page_input.trim().parse::<u32>().ok()?;
        let total = self.total_pages?;
        (1..=total).contains(&page).then_some(page)
    }

    fn sync_page_input(&mut self) {
        self.page_input = self.current_page.to_string();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
