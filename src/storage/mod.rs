use anyhow::Result;
use chrono::{DateTime, TimeZone};

use crate::record::Record;

pub mod json_file_sink;

pub use json_file_sink::{load_records, JsonFileSink};

pub const PRODUCT_SUFFIX: &str = "product";
pub const REVIEWS_SUFFIX: &str = "reviews_test";

const RUN_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Destination of a record set. Each call replaces the previous snapshot with
/// the full set passed in.
pub trait RecordSink {
    fn persist(&mut self, records: &[Record]) -> Result<()>;
}

/// `<YYYY_MM_DD_HH_MM_SS>_<suffix>.json`, stamped with the run's start time.
pub fn run_file_name<Tz>(started: &DateTime<Tz>, suffix: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.json", started.format(RUN_TIMESTAMP_FORMAT), suffix)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn file_name_uses_start_timestamp() {
        let started = Utc.with_ymd_and_hms(2021, 11, 4, 9, 5, 3).unwrap();

        assert_eq!(run_file_name(&started, PRODUCT_SUFFIX), "2021_11_04_09_05_03_product.json");
        assert_eq!(
            run_file_name(&started, REVIEWS_SUFFIX),
            "2021_11_04_09_05_03_reviews_test.json"
        );
    }
}
