//! Reader-side orchestration: opening a book and keeping the reader's
//! position written back.

mod autosave;
mod flow;
mod sync;

pub use autosave::{ProgressAutosave, SAVE_DEBOUNCE};
pub use flow::{OpenedBook, ReadingFlow};
pub use sync::{SyncCommand, SyncMachine, SyncPhase};
