use shelf_core::model::BookId;
use shelf_core::reader::{
    DocumentStatus, GestureIntent, GestureTracker, PageDirection, ReadingSession, TouchPoint,
};
use shelf_services::OpenedBook;

/// Everything the reader surface can ask for, funneled through one
/// dispatch point so page changes are observed in a single place.
#[derive(Clone, Debug, PartialEq)]
pub enum ReaderIntent {
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    PageInput(String),
    SubmitPageInput,
    BlurPageInput,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd,
}

/// Reading session plus the gesture bookkeeping for one visit.
///
/// `apply` reports whether the current page changed so the view knows
/// when to feed the autosave driver; zoom and input edits report no
/// change.
#[derive(Debug)]
pub struct ReaderVm {
    session: ReadingSession,
    tracker: GestureTracker,
    /// Zoom scale captured when the current touch began; pinch ratios
    /// multiply this, not the live scale.
    pinch_base: Option<f64>,
}

impl ReaderVm {
    #[must_use]
    pub fn new(book_id: BookId) -> Self {
        Self {
            session: ReadingSession::new(book_id),
            tracker: GestureTracker::new(),
            pinch_base: None,
        }
    }

    /// Feeds the loaded book into the session: page count, then the
    /// stored position.
    ///
    /// Returns the corrected `(page, total)` when adopting the stored
    /// position moved the current page, which is exactly what the
    /// autosave driver wants echoed back to the server.
    pub fn open(&mut self, opened: &OpenedBook) -> Option<(u32, u32)> {
        match opened.page_count {
            Some(pages) => self.session.document_loaded(pages),
            None => self.session.document_failed(),
        }

        let adopted = opened
            .stored_progress
            .as_ref()
            .is_some_and(|stored| self.session.adopt_progress(stored.current_page()));
        if !adopted {
            return None;
        }
        self.session
            .total_pages()
            .map(|total| (self.session.current_page(), total))
    }

    /// Applies one intent; true means the current page moved.
    pub fn apply(&mut self, intent: ReaderIntent) -> bool {
        match intent {
            ReaderIntent::NextPage => self.session.change_page(1),
            ReaderIntent::PreviousPage => self.session.change_page(-1),
            ReaderIntent::FirstPage => self.session.go_to_page(1),
            ReaderIntent::LastPage => match self.session.total_pages() {
                Some(total) => self.session.go_to_page(total),
                None => false,
            },
            ReaderIntent::PageInput(text) => {
                self.session.set_page_input(text);
                false
            }
            ReaderIntent::SubmitPageInput => self.session.submit_page_input(),
            ReaderIntent::BlurPageInput => {
                self.session.blur_page_input();
                false
            }
            ReaderIntent::ZoomIn => {
                self.session.zoom_in();
                false
            }
            ReaderIntent::ZoomOut => {
                self.session.zoom_out();
                false
            }
            ReaderIntent::ResetZoom => {
                self.session.reset_zoom();
                false
            }
            ReaderIntent::TouchStart(points) => {
                self.tracker.touch_start(&points);
                self.pinch_base = Some(self.session.zoom_scale());
                false
            }
            ReaderIntent::TouchMove(points) => self.touch_move(&points),
            ReaderIntent::TouchEnd => {
                self.tracker.touch_end();
                self.pinch_base = None;
                false
            }
        }
    }

    fn touch_move(&mut self, points: &[TouchPoint]) -> bool {
        match self.tracker.touch_move(points, self.session.zoom_scale()) {
            Some(GestureIntent::PageTurn(PageDirection::Next)) => self.session.change_page(1),
            Some(GestureIntent::PageTurn(PageDirection::Previous)) => self.session.change_page(-1),
            Some(GestureIntent::Pinch { ratio }) => {
                let base = *self
                    .pinch_base
                    .get_or_insert(self.session.zoom_scale());
                self.session.apply_pinch(base, ratio);
                false
            }
            None => false,
        }
    }

    // Accessors
    #[must_use]
    pub fn status(&self) -> DocumentStatus {
        self.session.status()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.session.current_page()
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.session.total_pages()
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.session.zoom_scale()
    }

    /// Zoom as a whole percentage for the toolbar label.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{:.0}%", self.session.zoom_scale() * 100.0)
    }

    #[must_use]
    pub fn page_input(&self) -> &str {
        self.session.page_input()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.session.can_go_previous()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.session.can_go_next()
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.session.progress_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shelf_core::model::{Book, ReadingProgress};

    fn opened(page_count: Option<u32>, stored_page: Option<u32>) -> OpenedBook {
        let book = Book::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            vec!["Novel".into()],
            None,
            Some("books/bumi.pdf".into()),
        )
        .unwrap();
        let stored_progress = stored_page
            .map(|page| ReadingProgress::new(BookId::new(1), page, 40, None).unwrap());
        OpenedBook {
            book,
            page_count,
            stored_progress,
        }
    }

    fn point(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    #[test]
    fn open_adopts_the_stored_position() {
        let mut vm = ReaderVm::new(BookId::new(1));
        let correction = vm.open(&opened(Some(40), Some(12)));

        assert_eq!(vm.status(), DocumentStatus::Ready);
        assert_eq!(vm.current_page(), 12);
        assert_eq!(correction, Some((12, 40)));
    }

    #[test]
    fn open_without_stored_position_reports_no_correction() {
        let mut vm = ReaderVm::new(BookId::new(1));
        assert_eq!(vm.open(&opened(Some(40), None)), None);
        assert_eq!(vm.current_page(), 1);
    }

    #[test]
    fn open_clamps_a_position_past_the_end() {
        let mut vm = ReaderVm::new(BookId::new(1));
        let correction = vm.open(&opened(Some(5), Some(9)));

        assert_eq!(vm.current_page(), 5);
        assert_eq!(correction, Some((5, 5)));
    }

    #[test]
    fn open_without_a_document_is_unavailable() {
        let mut vm = ReaderVm::new(BookId::new(1));
        let correction = vm.open(&opened(None, Some(12)));

        assert_eq!(vm.status(), DocumentStatus::Unavailable);
        assert_eq!(correction, None);
        assert_eq!(vm.current_page(), 1);
    }

    #[test]
    fn nav_intents_report_page_changes() {
        let mut vm = ReaderVm::new(BookId::new(1));
        vm.open(&opened(Some(10), None));

        assert!(vm.apply(ReaderIntent::NextPage));
        assert!(vm.apply(ReaderIntent::LastPage));
        assert_eq!(vm.current_page(), 10);
        assert!(!vm.apply(ReaderIntent::NextPage));
        assert!(vm.apply(ReaderIntent::FirstPage));

        assert!(!vm.apply(ReaderIntent::ZoomIn));
        assert!(!vm.apply(ReaderIntent::PageInput("7".into())));
        assert!(vm.apply(ReaderIntent::SubmitPageInput));
        assert_eq!(vm.current_page(), 7);
    }

    #[test]
    fn swipe_left_turns_the_page() {
        let mut vm = ReaderVm::new(BookId::new(1));
        vm.open(&opened(Some(10), None));

        assert!(!vm.apply(ReaderIntent::TouchStart(vec![point(300.0, 100.0)])));
        assert!(vm.apply(ReaderIntent::TouchMove(vec![point(100.0, 100.0)])));
        assert_eq!(vm.current_page(), 2);
    }

    #[test]
    fn pinch_scales_from_the_zoom_at_touch_start() {
        let mut vm = ReaderVm::new(BookId::new(1));
        vm.open(&opened(Some(10), None));
        vm.apply(ReaderIntent::ZoomIn);
        vm.apply(ReaderIntent::ZoomIn);
        let base = vm.zoom_scale();

        vm.apply(ReaderIntent::TouchStart(vec![
            point(100.0, 100.0),
            point(300.0, 100.0),
        ]));
        // Two reports from one gesture both scale the starting zoom.
        vm.apply(ReaderIntent::TouchMove(vec![
            point(150.0, 100.0),
            point(250.0, 100.0),
        ]));
        vm.apply(ReaderIntent::TouchMove(vec![
            point(140.0, 100.0),
            point(260.0, 100.0),
        ]));
        assert!((vm.zoom_scale() - base * 0.6).abs() < 1e-9);

        vm.apply(ReaderIntent::TouchEnd);
    }

    #[test]
    fn zoom_label_is_a_whole_percentage() {
        let mut vm = ReaderVm::new(BookId::new(1));
        vm.open(&opened(Some(10), None));
        assert_eq!(vm.zoom_label(), "100%");
        vm.apply(ReaderIntent::ZoomIn);
        assert_eq!(vm.zoom_label(), "125%");
    }
}
