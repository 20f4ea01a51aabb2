//! Locators for feelunique.com product pages and their Bazaarvoice review list.

use super::FieldRule;
use crate::pagination::PageLayout;

/// Cookie consent button shown on first load.
pub const COOKIE_CONSENT: &str = "#notice-ok";

pub const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::text("product_name", r#"h1[class="fn"]"#),
    FieldRule::text("product_information", r#"div[class="Layout-golden-main"]"#),
    FieldRule::attribute("mean_rating", r#"span[class="Rating-average"]"#, "data-aggregate-rating"),
    FieldRule::text("product_price", r#"span[class="Price"]"#),
    FieldRule::text("n_reviews", r#"span[class="Rating-count"]"#),
    FieldRule::page_url("product_url"),
];

pub const REVIEW_RULES: &[FieldRule] = &[
    FieldRule::attribute("review_rating", r#"meta[itemprop="ratingValue"]"#, "content"),
    FieldRule::text("review_title", r#"h3[class="bv-content-title"]"#),
    FieldRule::text("review_author", r#"span[class="bv-author"]"#),
    FieldRule::text("review_text", r#"div[class="bv-content-summary-body-text"]"#),
    FieldRule::trimmed_text("review_date", r#"span[class="bv-content-datetime-stamp"]"#),
];

pub const REVIEW_PAGES: PageLayout = PageLayout {
    list_selector: r#"ol[class*="bv-content-list-reviews"] > li"#,
    next_selector: r#"li[class*="buttons-item-next"] > a[class*="bv-content-btn-pages-active"]"#,
};
