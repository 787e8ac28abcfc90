//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the database.

pub mod add;
pub mod config;
pub mod lang;
pub mod list;
pub mod search;

pub use add::execute as add;
pub use config::execute as config;
pub use lang::execute as lang;
pub use list::execute as list;
pub use search::execute as search;
