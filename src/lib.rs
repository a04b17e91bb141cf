//! glint-search: a GPU-rendered demo of an AI-augmented search interface.
//!
//! The interesting machinery is the progressive text reveal in [`reveal`]:
//! the AI answer is chunked at sentence boundaries and typed out over a fixed
//! timeline, recomputed from the wall clock every frame. Everything else
//! (pages, mock corpus, tooltips, the history sidebar) exists to give that
//! animation a believable product around it.

pub mod app;
pub mod hit;
pub mod home_screen;
pub mod logging;
pub mod mock;
pub mod model;
pub mod paths;
pub mod results_screen;
pub mod reveal;
pub mod search_bar;
pub mod sidebar;
pub mod state_machine;
pub mod text;
pub mod theme;
pub mod tooltip;
