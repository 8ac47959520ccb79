mod book_vm;
mod progress_vm;
mod reader_vm;
mod review_vm;
mod time_fmt;

pub use book_vm::{BookCardVm, map_book_card};
pub use progress_vm::{ProgressCardVm, map_progress_card, map_progress_cards};
pub use reader_vm::{ReaderIntent, ReaderVm};
pub use review_vm::{
    BreakdownBarVm, ReviewCardVm, map_breakdown_bars, map_review_cards, star_row,
};
