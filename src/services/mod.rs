pub mod explorer;
pub mod freshness;

pub use explorer::{ExplorerError, ExplorerService};
pub use freshness::{Category, Freshness};
