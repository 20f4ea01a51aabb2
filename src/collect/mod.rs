pub mod collect_product;
pub mod collect_reviews;

pub use collect_product::collect_product;
pub use collect_reviews::collect_reviews;
