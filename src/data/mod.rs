//! External data sources
//!
//! Currently only the live satellite position feed.

pub mod feed;

pub use feed::WhereTheIssClient;
