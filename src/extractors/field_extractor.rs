use log::debug;

use crate::record::{Record, RecordTemplate};
use crate::session::{BrowserSession, SessionError};

/// Where a field's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Visible text of the matched element.
    Text,
    /// Named attribute of the matched element.
    Attribute(&'static str),
    /// URL of the loaded page; the rule's selector is not used.
    PageUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Raw,
    Trim,
}

impl Transform {
    fn apply(self, value: String) -> String {
        match self {
            Transform::Raw => value,
            Transform::Trim => value.trim().to_string(),
        }
    }
}

/// How to read one field of a record from a page.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub source: Source,
    pub transform: Transform,
}

impl FieldRule {
    pub const fn text(field: &'static str, selector: &'static str) -> Self {
        Self { field, selector, source: Source::Text, transform: Transform::Raw }
    }

    pub const fn trimmed_text(field: &'static str, selector: &'static str) -> Self {
        Self { field, selector, source: Source::Text, transform: Transform::Trim }
    }

    pub const fn attribute(
        field: &'static str,
        selector: &'static str,
        attribute: &'static str,
    ) -> Self {
        Self { field, selector, source: Source::Attribute(attribute), transform: Transform::Raw }
    }

    pub const fn page_url(field: &'static str) -> Self {
        Self { field, selector: "", source: Source::PageUrl, transform: Transform::Raw }
    }
}

/// Builds one record from `scope` (or the whole page when `None`).
///
/// Every rule is tried on its own: a field that cannot be located or read
/// keeps the template default and the remaining fields are still extracted.
pub async fn extract<S: BrowserSession>(
    session: &S,
    scope: Option<&S::Element>,
    template: &RecordTemplate,
    rules: &[FieldRule],
) -> Record {
    let mut record = template.instantiate();

    for rule in rules {
        match read_field(session, scope, rule).await {
            Ok(Some(value)) => {
                if !record.set(rule.field, value) {
                    debug!("Field '{}' is not declared by the {} template", rule.field, template.name);
                }
            }
            Ok(None) => debug!("Field '{}' not found with '{}'", rule.field, rule.selector),
            Err(e) => debug!("Field '{}' could not be read: {}", rule.field, e),
        }
    }

    record
}

async fn read_field<S: BrowserSession>(
    session: &S,
    scope: Option<&S::Element>,
    rule: &FieldRule,
) -> Result<Option<String>, SessionError> {
    let raw = match rule.source {
        Source::PageUrl => Some(session.current_url().await?),
        Source::Text => match session.find(scope, rule.selector).await? {
            Some(element) => Some(session.text(&element).await?),
            None => None,
        },
        Source::Attribute(name) => match session.find(scope, rule.selector).await? {
            Some(element) => session.attribute(&element, name).await?,
            None => None,
        },
    };

    Ok(raw.map(|value| rule.transform.apply(value)))
}
