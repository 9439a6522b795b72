//! Series codename resolution backed by distro-info data
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Parser    │────▶│    Table    │
//! │ (read csv)  │     │ (records)   │     │ (snapshot)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │    Cache    │
//!                                         │ (refresh)   │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: `SeriesVersionCache` with the one-time automatic refresh policy
//! - [`error`]: Error types for lookups and source access
//! - [`parser`]: distro-info CSV parsing into `SeriesRecord`s
//! - [`source`]: `MetadataSource` trait and the file-backed implementation
//! - [`table`]: Immutable codename-keyed snapshot

pub mod cache;
pub mod error;
pub mod parser;
pub mod source;
pub mod table;

pub use cache::SeriesVersionCache;
pub use error::SeriesError;
pub use parser::SeriesRecord;
