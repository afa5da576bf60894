//! Library side of the `ecoinspect` command-line tool.

pub mod access;
pub mod inspect;
pub mod listing;
pub mod logging;
pub mod script;
pub mod settings;
