//! Company record type.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for one company in the dataset.
///
/// The type is always present. Name and brand name are optional, and an
/// empty string is stored as absent.
///
/// # Examples
///
/// ```
/// use company_lookup::CompanyRecord;
///
/// let google = CompanyRecord::new(
///     "Google",
///     Some("Google Inc.".to_string()),
///     Some("Google".to_string()),
/// );
/// assert_eq!(google.company_type(), "Google");
/// assert_eq!(google.name(), Some("Google Inc."));
/// assert_eq!(google.brand_name(), Some("Google"));
///
/// // Empty strings are treated as absent
/// let canonical = CompanyRecord::new("Canonical", Some("Canonical Foundation".into()), Some(String::new()));
/// assert_eq!(canonical.brand_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct CompanyRecord {
    #[serde(rename = "type")]
    company_type: String,

    name: Option<String>,

    #[serde(rename = "brandname")]
    brand_name: Option<String>,
}

impl CompanyRecord {
    /// Create a new record.
    pub fn new(
        company_type: impl Into<String>,
        name: Option<String>,
        brand_name: Option<String>,
    ) -> Self {
        Self {
            company_type: company_type.into(),
            name: non_empty(name),
            brand_name: non_empty(brand_name),
        }
    }

    /// The type identifier of the company.
    pub fn company_type(&self) -> &str {
        &self.company_type
    }

    /// The human-readable company name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The brand the company trades under, if known.
    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name.as_deref()
    }
}

/// Wire form of a record, normalized through [`CompanyRecord::new`].
#[derive(Deserialize)]
struct RecordFields {
    #[serde(rename = "type")]
    company_type: String,

    name: Option<String>,

    #[serde(rename = "brandname")]
    brand_name: Option<String>,
}

impl From<RecordFields> for CompanyRecord {
    fn from(fields: RecordFields) -> Self {
        Self::new(fields.company_type, fields.name, fields.brand_name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getters() {
        let record = CompanyRecord::new(
            "CompanyType",
            Some("TestCompany".into()),
            Some("TestBrand".into()),
        );

        assert_eq!(record.company_type(), "CompanyType");
        assert_eq!(record.name(), Some("TestCompany"));
        assert_eq!(record.brand_name(), Some("TestBrand"));
    }

    #[test]
    fn absent_fields() {
        let record = CompanyRecord::new("Unknown", None, None);
        assert_eq!(record.name(), None);
        assert_eq!(record.brand_name(), None);
    }

    #[test]
    fn empty_strings_become_absent() {
        let record = CompanyRecord::new("Empty", Some(String::new()), Some(String::new()));
        assert_eq!(record.name(), None);
        assert_eq!(record.brand_name(), None);
    }

    #[test]
    fn deserialized_empty_strings_become_absent() {
        let record: CompanyRecord =
            serde_json::from_str(r#"{"type":"X","name":"","brandname":null}"#).unwrap();
        assert_eq!(record, CompanyRecord::new("X", None, None));

        let record: CompanyRecord = serde_json::from_str(r#"{"type":"X","brandname":""}"#).unwrap();
        assert_eq!(record.name(), None);
        assert_eq!(record.brand_name(), None);
    }

    #[test]
    fn serialized_field_names() {
        let record = CompanyRecord::new("Google", Some("Google Inc.".into()), None);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "Google",
                "name": "Google Inc.",
                "brandname": null,
            })
        );
    }
}
