//! Tab and history state machine.
//!
//! [`Session`] owns every [`Tab`], the bookmark set and the current
//! [`ViewMode`]. All state changes go through its named operations.

pub mod command;
pub mod config;
pub mod session;
pub mod tab;
pub mod views;

pub use command::Command;
pub use config::BrowserConfig;
pub use session::{Applied, BookmarkOutcome, Session, ViewMode};
pub use tab::{LoadStats, Tab, TabStatus, TabTicket};
