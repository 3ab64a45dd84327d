//! Document Loader: turns uploaded JSON documents into [`Record`]s.
//!
//! [`Record`]: crate::models::record::Record

pub mod loader;
