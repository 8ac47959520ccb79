mod book;
mod ids;
mod progress;
mod review;
mod user;

pub use book::{Book, BookError};
pub use ids::{BookId, ParseIdError, ReviewId, UserId};
pub use progress::{ProgressError, ProgressOverview, ReadingProgress, percent_of};
pub use review::{Rating, Review, ReviewError, ReviewStatistics};
pub use user::{UserError, UserProfile, UserRole};
