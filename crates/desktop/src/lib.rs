//! `stockroom-desktop`
//!
//! **Responsibility:** the user-facing surface of the product list.
//!
//! This crate provides:
//! - [`AdminSession`]: the product table plus the selected row, with the
//!   search / add stock / delete stock / add product operations
//! - [`Shell`]: an interactive prompt loop over the session
//! - table rendering and user-facing messages
//!
//! Persistence and validation live in the lower crates; this is a thin shell.

pub mod messages;
pub mod render;
pub mod session;
pub mod shell;
pub mod types;

pub use messages::describe_error;
pub use session::AdminSession;
pub use shell::{ParseCommandError, Shell, ShellCommand};
pub use types::{SearchOutcome, StatusMessage};
