//! Collects a feelunique.com product and its paginated reviews into
//! timestamped JSON files.

pub mod collect;
pub mod config;
pub mod extractors;
pub mod pagination;
pub mod record;
pub mod session;
pub mod storage;
pub mod utilities;
