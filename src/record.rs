use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Format of the `collect_date` field written on every review.
pub const COLLECT_DATE_FORMAT: &str = "%Y_%m_%d";

/// Value a declared field holds until an extractor overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Null,
    /// Local date of extraction, formatted with [`COLLECT_DATE_FORMAT`].
    CollectDate,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateField {
    pub name: &'static str,
    pub default: FieldDefault,
}

const fn null(name: &'static str) -> TemplateField {
    TemplateField { name, default: FieldDefault::Null }
}

/// Fixed, ordered shape of a record. Every record built from a template carries
/// exactly these keys, in this order.
#[derive(Debug)]
pub struct RecordTemplate {
    pub name: &'static str,
    pub fields: &'static [TemplateField],
}

pub static PRODUCT_TEMPLATE: RecordTemplate = RecordTemplate {
    name: "product",
    fields: &[
        null("product_name"),
        null("product_information"),
        null("mean_rating"),
        null("product_price"),
        null("n_reviews"),
        null("product_url"),
    ],
};

pub static REVIEW_TEMPLATE: RecordTemplate = RecordTemplate {
    name: "review",
    fields: &[
        null("review_rating"),
        null("review_title"),
        null("review_author"),
        null("review_date"),
        null("review_text"),
        TemplateField { name: "collect_date", default: FieldDefault::CollectDate },
    ],
};

impl RecordTemplate {
    /// Builds an empty record dated with today's local date.
    pub fn instantiate(&self) -> Record {
        self.instantiate_on(Local::now().date_naive())
    }

    pub fn instantiate_on(&self, today: NaiveDate) -> Record {
        let mut values = Map::with_capacity(self.fields.len());
        for field in self.fields {
            let value = match field.default {
                FieldDefault::Null => Value::Null,
                FieldDefault::CollectDate => {
                    Value::String(today.format(COLLECT_DATE_FORMAT).to_string())
                }
            };
            values.insert(field.name.to_string(), value);
        }
        Record(values)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }
}

/// One extracted product or review.
///
/// Missing data is kept as `null`, never dropped, so the serialized object
/// always has the template's keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Overwrites a declared field. Returns `false` for keys the template does
    /// not declare; those are ignored.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        match self.0.get_mut(field) {
            Some(slot) => {
                *slot = Value::String(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
