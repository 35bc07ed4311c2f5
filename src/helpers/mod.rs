//! Helper functions
//!
//! Small utilities shared by the loader and the commands: date parsing
//! and formatting, and URL construction for remote content roots.

mod date;
mod url;

pub use date::*;
pub use url::*;
