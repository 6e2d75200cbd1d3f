//! Catalog Sync - TCGplayer catalog mirror
//!
//! Incrementally synchronizes card sets, cards, printings, conditions,
//! rarities and SKUs from the TCGplayer catalog API into a SQLite database.
//! A set is refreshed only when its remote modified date is newer than the
//! stored copy; cards and SKUs are fetched only for those sets.

pub mod database;
pub mod error;
pub mod models;
pub mod paginate;
pub mod repository;
pub mod sync;
pub mod tcgplayer;

pub use error::{Result, SyncError};
pub use paginate::{paginate, Pagination};
pub use repository::CatalogRepository;
pub use sync::{SyncSummary, SyncWorker};
pub use tcgplayer::TcgPlayerClient;
