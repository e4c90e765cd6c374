//! Domain vocabulary for the admin terminal and audit trail.

#![forbid(unsafe_code)]

mod audit;
mod terminal;

pub use audit::AdminAction;
pub use terminal::TerminalCommand;
