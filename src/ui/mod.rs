//! User interface layer
//!
//! The interactive browser lives in [`ratatui_adapter`]; it only talks to
//! the outside world through two traits, so it runs the same against the
//! sled store and the system clipboard as against in-memory test doubles.
//!
//! # Core Traits
//!
//! - **`SnippetStore`** (in `crate::store`) - load, delete, update, record usage
//! - **`OutputSink`** - where the chosen snippet's code goes
//! - **`UserInput`** - prompts for the `add` command
//! - **`OutputWriter`** - status messages of the non-interactive commands
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Commands (search, add, list, lang) │
//! └────────────────┬────────────────────────┘
//!                  │ Uses traits
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  SnippetStore, OutputSink, UserInput,   │
//! │  OutputWriter                           │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Database      │  │ ClipboardSink     │
//! │ (sled)        │  │ StdoutSink        │
//! │               │  │ DialoguerInput    │
//! │               │  │ StdoutWriter      │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Output Messages
//!
//! ```
//! use zeno::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::new(false);
//! output.success("Saved");
//! output.info("3 snippets");
//! ```

pub mod clipboard;
mod error;
pub mod input;
pub mod output;
pub mod ratatui_adapter;

pub use clipboard::{ClipboardSink, OutputSink, SinkError, StdoutSink, TextSource};
pub use error::{Result, UiError};
pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};
