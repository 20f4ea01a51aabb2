pub mod walker;

pub use walker::{collect_all_pages, ItemExtractor, PageLayout, StopReason, WalkOptions, WalkReport};
