use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use shelf_api::ProgressStore;
use shelf_core::model::BookId;

use crate::reading::sync::{SyncCommand, SyncMachine};

/// Delay between the last page turn and the write that persists it.
pub const SAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Drives [`SyncMachine`] with real timers and writes.
///
/// One instance per reader visit. Arming spawns a sleeper task and
/// aborts the previous one, so a burst of page turns ends in a single
/// write. Failed writes are logged and dropped; the position goes out
/// again on the next page turn rather than surfacing to the reader.
pub struct ProgressAutosave {
    book_id: BookId,
    progress: Arc<dyn ProgressStore>,
    debounce: Duration,
    machine: Arc<Mutex<SyncMachine>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl ProgressAutosave {
    #[must_use]
    pub fn new(book_id: BookId, progress: Arc<dyn ProgressStore>) -> Self {
        Self::with_debounce(book_id, progress, SAVE_DEBOUNCE)
    }

    /// Same driver with a custom delay.
    #[must_use]
    pub fn with_debounce(
        book_id: BookId,
        progress: Arc<dyn ProgressStore>,
        debounce: Duration,
    ) -> Self {
        Self {
            book_id,
            progress,
            debounce,
            machine: Arc::new(Mutex::new(SyncMachine::new())),
            timer: Mutex::new(None),
        }
    }

    /// The stored position has been fetched and reconciled. `adopted`
    /// carries the position when adoption moved the reader to a
    /// different page, which schedules a write of the corrected value.
    pub fn load_settled(&self, adopted: Option<(u32, u32)>) {
        let command = self
            .machine
            .lock()
            .ok()
            .and_then(|mut machine| machine.load_settled(adopted));
        self.run(command);
    }

    /// The reader landed on a new page.
    pub fn page_changed(&self, current_page: u32, total_pages: u32) {
        let command = self
            .machine
            .lock()
            .ok()
            .and_then(|mut machine| machine.page_changed(current_page, total_pages));
        self.run(command);
    }

    /// Abandon any armed save, on leaving the reader.
    pub fn cancel(&self) {
        if let Ok(mut machine) = self.machine.lock() {
            machine.cancelled();
        }
        if let Ok(mut slot) = self.timer.lock() {
            if let Some(armed) = slot.take() {
                armed.abort();
            }
        }
    }

    fn run(&self, command: Option<SyncCommand>) {
        match command {
            Some(SyncCommand::Arm { .. }) => self.arm(),
            // The machine only emits Save from a fired timer, which the
            // sleeper task handles itself.
            Some(SyncCommand::Save { .. }) | None => {}
        }
    }

    fn arm(&self) {
        let machine = Arc::clone(&self.machine);
        let progress = Arc::clone(&self.progress);
        let book_id = self.book_id;
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let command = machine
                .lock()
                .ok()
                .and_then(|mut machine| machine.timer_fired());
            if let Some(SyncCommand::Save {
                current_page,
                total_pages,
            }) = command
            {
                if let Err(e) = progress.save(book_id, current_page, total_pages).await {
                    tracing::warn!(error = %e, book = book_id.value(), "Progress save failed");
                }
            }
        });

        if let Ok(mut slot) = self.timer.lock() {
            if let Some(previous) = slot.replace(handle) {
                previous.abort();
            }
        }
    }
}
