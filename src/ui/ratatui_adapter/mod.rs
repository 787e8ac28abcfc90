//! Ratatui front end for the snippet browser
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           SearchRunner                      │
//! │  (terminal setup, event loop, preview cache)│
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │  Session   │ │  render   │ │ Crossterm │
//! │  (states)  │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! [`Session`] is independent of the terminal: it takes events and
//! produces state, so it is tested without one. [`render::draw`] turns
//! that state into a frame and [`SearchRunner`] ties both to a real
//! terminal.

pub mod layout;
pub mod render;
mod runner;
pub mod session;
pub mod state;
pub mod styled_preview;
mod theme;
pub mod widgets;

pub use runner::{PreviewCache, SearchRunner};
pub use session::{Outcome, Session, SessionSettings};
pub use styled_preview::{Highlighter, default_highlighter};
pub use theme::Theme;
