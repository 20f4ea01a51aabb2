pub mod feelunique;
pub mod field_extractor;

pub use field_extractor::{extract, FieldRule, Source, Transform};
