//! Controller layer: view state, UI events, reducer transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod state;

pub use events::{Prompt, UiAction, UiEvent};
pub use orchestration::Controller;
pub use state::ViewState;
