pub mod loader;
pub mod report;
pub mod store;

pub use loader::{RosterLoader, RosterLoaderError, RosterRecord};
pub use report::{RunReport, TextReport, parse_selection};
pub use store::{open_repository, repository_registry};
