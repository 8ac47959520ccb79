use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use shelf_core::model::{
    Book, BookId, ProgressOverview, Rating, ReadingProgress, Review, ReviewId, ReviewStatistics,
    UserProfile, percent_of,
};
use shelf_core::time::Clock;

use crate::stores::{
    Api, ApiError, BookCatalog, BookReviews, ProgressStore, ReviewStore, SessionGateway,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex
        .lock()
        .map_err(|e| ApiError::Connection(e.to_string()))
}

/// Backend served from in-process maps, for tests and offline
/// development.
///
/// Handles are cheap clones sharing the same state, so a test can keep
/// one for seeding and inspection while the app talks to another
/// through [`Api`]. Every progress save is recorded in a log so tests
/// can assert how often, and with what, the client actually wrote.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    books: Arc<Mutex<HashMap<BookId, Book>>>,
    progress: Arc<Mutex<HashMap<BookId, ReadingProgress>>>,
    reviews: Arc<Mutex<HashMap<BookId, Vec<Review>>>>,
    mine: Arc<Mutex<HashMap<BookId, ReviewId>>>,
    next_review_id: Arc<Mutex<u64>>,
    profile: Arc<Mutex<Option<UserProfile>>>,
    save_log: Arc<Mutex<Vec<(BookId, u32, u32)>>>,
    offline: Arc<AtomicBool>,
    clock: Clock,
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Wraps this backend in the [`Api`] bundle the app consumes.
    #[must_use]
    pub fn into_api(self) -> Api {
        let books: Arc<dyn BookCatalog> = Arc::new(self.clone());
        let progress: Arc<dyn ProgressStore> = Arc::new(self.clone());
        let reviews: Arc<dyn ReviewStore> = Arc::new(self.clone());
        let session: Arc<dyn SessionGateway> = Arc::new(self);
        Api {
            books,
            progress,
            reviews,
            session,
        }
    }

    // ─── Seeding and inspection ────────────────────────────────────────────

    pub fn put_book(&self, book: Book) {
        if let Ok(mut books) = self.books.lock() {
            books.insert(book.id(), book);
        }
    }

    pub fn put_progress(&self, progress: ReadingProgress) {
        if let Ok(mut map) = self.progress.lock() {
            map.insert(progress.book_id(), progress);
        }
    }

    /// Seeds a review by another reader.
    pub fn put_review(&self, book_id: BookId, review: Review) {
        if let Ok(mut map) = self.reviews.lock() {
            map.entry(book_id).or_default().push(review);
        }
    }

    pub fn sign_in(&self, profile: UserProfile) {
        if let Ok(mut slot) = self.profile.lock() {
            *slot = Some(profile);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.profile.lock() {
            *slot = None;
        }
    }

    /// Makes every call fail with a connection error, as if the network
    /// dropped.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Every `save` call made so far, in order.
    #[must_use]
    pub fn saved_progress(&self) -> Vec<(BookId, u32, u32)> {
        self.save_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    // ─── Internals ─────────────────────────────────────────────────────────

    fn ensure_online(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(ApiError::Connection("offline".into()));
        }
        Ok(())
    }

    fn current_profile(&self) -> Result<UserProfile, ApiError> {
        lock(&self.profile)?
            .clone()
            .ok_or(ApiError::Unauthenticated)
    }

    fn allocate_review_id(&self) -> Result<ReviewId, ApiError> {
        let mut next = lock(&self.next_review_id)?;
        *next += 1;
        Ok(ReviewId::new(*next))
    }

    fn statistics_for(reviews: &[Review]) -> ReviewStatistics {
        if reviews.is_empty() {
            return ReviewStatistics::empty();
        }

        let mut counts = [0u32; 5];
        let mut sum = 0u32;
        for review in reviews {
            let stars = review.rating().stars();
            counts[usize::from(5 - stars)] += 1;
            sum += u32::from(stars);
        }

        let total = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
        let average = f64::from(sum) / f64::from(total);
        ReviewStatistics::new(average, total, counts)
    }
}

#[async_trait]
impl BookCatalog for InMemoryApi {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.ensure_online()?;
        let books = lock(&self.books)?;
        let mut all: Vec<Book> = books.values().cloned().collect();
        all.sort_by_key(Book::id);
        Ok(all)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        self.ensure_online()?;
        let books = lock(&self.books)?;
        books.get(&id).cloned().ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl ProgressStore for InMemoryApi {
    async fn fetch(&self, book_id: BookId) -> Result<Option<ReadingProgress>, ApiError> {
        self.ensure_online()?;
        self.current_profile()?;
        let map = lock(&self.progress)?;
        Ok(map.get(&book_id).cloned())
    }

    async fn save(
        &self,
        book_id: BookId,
        current_page: u32,
        total_pages: u32,
    ) -> Result<(), ApiError> {
        self.ensure_online()?;
        self.current_profile()?;

        let record =
            ReadingProgress::new(book_id, current_page, total_pages, Some(self.clock.now()))
                .map_err(|e| ApiError::Serialization(e.to_string()))?;

        lock(&self.save_log)?.push((book_id, current_page, total_pages));
        lock(&self.progress)?.insert(book_id, record);
        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> Result<(), ApiError> {
        self.ensure_online()?;
        self.current_profile()?;
        lock(&self.progress)?
            .remove(&book_id)
            .map(|_| ())
            .ok_or(ApiError::NotFound)
    }

    async fn overview(&self) -> Result<Vec<ProgressOverview>, ApiError> {
        self.ensure_online()?;
        self.current_profile()?;

        let books = lock(&self.books)?;
        let progress = lock(&self.progress)?;

        let mut rows: Vec<ProgressOverview> = progress
            .values()
            .filter_map(|record| {
                let book = books.get(&record.book_id())?;
                Some(ProgressOverview::new(
                    book.id(),
                    book.title(),
                    book.author(),
                    book.primary_category().map(str::to_owned),
                    book.cover_path().map(str::to_owned),
                    record.current_page(),
                    record.total_pages(),
                    f64::from(percent_of(record.current_page(), record.total_pages())),
                    record.last_read_at(),
                ))
            })
            .collect();

        rows.sort_by_key(|row| Reverse(row.last_read_at()));
        Ok(rows)
    }
}

#[async_trait]
impl ReviewStore for InMemoryApi {
    async fn book_reviews(&self, book_id: BookId) -> Result<BookReviews, ApiError> {
        self.ensure_online()?;
        let map = lock(&self.reviews)?;
        let mut reviews = map.get(&book_id).cloned().unwrap_or_default();
        reviews.sort_by_key(|r| Reverse(r.created_at()));

        let statistics = Self::statistics_for(&reviews);
        Ok(BookReviews {
            reviews,
            statistics,
        })
    }

    async fn my_review(&self, book_id: BookId) -> Result<Option<Review>, ApiError> {
        self.ensure_online()?;
        self.current_profile()?;

        let mine = lock(&self.mine)?;
        let Some(id) = mine.get(&book_id).copied() else {
            return Ok(None);
        };

        let map = lock(&self.reviews)?;
        Ok(map
            .get(&book_id)
            .and_then(|list| list.iter().find(|r| r.id() == id))
            .cloned())
    }

    async fn save_review(
        &self,
        book_id: BookId,
        rating: Rating,
        text: Option<String>,
    ) -> Result<(), ApiError> {
        self.ensure_online()?;
        let profile = self.current_profile()?;

        let mut mine = lock(&self.mine)?;
        let id = match mine.get(&book_id) {
            Some(id) => *id,
            None => self.allocate_review_id()?,
        };
        let review = Review::new(id, profile.name(), rating, text, self.clock.now());

        let mut map = lock(&self.reviews)?;
        let list = map.entry(book_id).or_default();
        match list.iter_mut().find(|r| r.id() == id) {
            Some(existing) => *existing = review,
            None => list.push(review),
        }
        mine.insert(book_id, id);
        Ok(())
    }

    async fn delete_review(&self, id: ReviewId) -> Result<(), ApiError> {
        self.ensure_online()?;
        self.current_profile()?;

        // Release the review map before touching the ownership map so
        // the two locks are never held together.
        let removed = {
            let mut map = lock(&self.reviews)?;
            let mut removed = false;
            for list in map.values_mut() {
                let before = list.len();
                list.retain(|r| r.id() != id);
                removed |= list.len() != before;
            }
            removed
        };
        if !removed {
            return Err(ApiError::NotFound);
        }

        lock(&self.mine)?.retain(|_, mine_id| *mine_id != id);
        Ok(())
    }
}

#[async_trait]
impl SessionGateway for InMemoryApi {
    async fn me(&self) -> Result<UserProfile, ApiError> {
        self.ensure_online()?;
        self.current_profile()
    }
}
