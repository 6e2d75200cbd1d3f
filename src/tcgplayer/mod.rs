//! TCGplayer catalog API client and wire records

mod client;
pub mod records;

pub use client::TcgPlayerClient;
