//! CLI command implementations.

pub mod browse;
pub mod list;
pub mod lookup;

pub use browse::{BrowseCommand, BrowseRequest};
pub use list::{ListCommand, Listing};
pub use lookup::{Lookup, LookupCommand};
