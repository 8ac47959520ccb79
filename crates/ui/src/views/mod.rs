mod home;
mod progress;
mod reader;
mod reviews;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use progress::ProgressView;
pub use reader::ReaderView;
pub use reviews::ReviewSection;
pub use state::{ViewError, ViewState, view_state_from_resource};
