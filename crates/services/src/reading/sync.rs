//! Decides when the reader's position gets written back.
//!
//! Pure transitions, no timers. Each event returns at most one
//! [`SyncCommand`] for the caller to execute, so the whole policy is
//! testable without a clock: page turns arm a save, the armed save fires
//! once input settles, and nothing is written until the stored position
//! has been fetched and reconciled.

/// Where the machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// The stored position has not been reconciled yet. Writing now could
    /// clobber a fresher remote page with the local default.
    #[default]
    AwaitingLoad,
    /// Reconciled, nothing waiting to be written.
    Idle,
    /// A position is armed and waiting out the debounce delay.
    PendingSave,
}

/// What the driver must do after feeding an event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCommand {
    /// Start the save timer for this position, replacing any armed timer.
    Arm { current_page: u32, total_pages: u32 },
    /// Write this position now.
    Save { current_page: u32, total_pages: u32 },
}

#[derive(Debug, Default)]
pub struct SyncMachine {
    phase: SyncPhase,
    pending: Option<(u32, u32)>,
}

impl SyncMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The load attempt resolved, successfully or not.
    ///
    /// `adopted` carries the reconciled position when adoption moved the
    /// reader off the page they were on, which schedules a write of the
    /// corrected value. Ignored unless the machine is still waiting on
    /// the load.
    pub fn load_settled(&mut self, adopted: Option<(u32, u32)>) -> Option<SyncCommand> {
        if self.phase != SyncPhase::AwaitingLoad {
            return None;
        }

        match adopted {
            Some((current_page, total_pages)) => {
                self.phase = SyncPhase::PendingSave;
                self.pending = Some((current_page, total_pages));
                Some(SyncCommand::Arm {
                    current_page,
                    total_pages,
                })
            }
            None => {
                self.phase = SyncPhase::Idle;
                None
            }
        }
    }

    /// The reader landed on a new page.
    ///
    /// Re-arms the timer when one is already pending, so bursts of page
    /// turns collapse into a single write of the last page visited.
    /// Ignored before the load has settled.
    pub fn page_changed(&mut self, current_page: u32, total_pages: u32) -> Option<SyncCommand> {
        if self.phase == SyncPhase::AwaitingLoad {
            return None;
        }

        self.phase = SyncPhase::PendingSave;
        self.pending = Some((current_page, total_pages));
        Some(SyncCommand::Arm {
            current_page,
            total_pages,
        })
    }

    /// The armed timer ran out. Stale timers (fired after a cancel or a
    /// re-arm already replaced them) are ignored.
    pub fn timer_fired(&mut self) -> Option<SyncCommand> {
        if self.phase != SyncPhase::PendingSave {
            return None;
        }

        self.phase = SyncPhase::Idle;
        let (current_page, total_pages) = self.pending.take()?;
        Some(SyncCommand::Save {
            current_page,
            total_pages,
        })
    }

    /// Abandon any armed save, on leaving the reader.
    pub fn cancelled(&mut self) {
        if self.phase == SyncPhase::PendingSave {
            self.phase = SyncPhase::Idle;
        }
        self.pending = None;
    }
}
