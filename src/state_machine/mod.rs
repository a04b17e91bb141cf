//! State machines for app-level state management.

pub mod page_sm;

pub use page_sm::{PageEvent, PageMachine, State as PageState};
