//! Parsing the company JSON into an immutable dataset.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::company::CompanyRecord;

use super::error::ParseError;

/// One company value as it appears in the source.
///
/// `type` is only present in the legacy layout, where it repeats the key.
#[derive(Debug, Deserialize)]
struct RawCompany {
    #[serde(rename = "type", default)]
    company_type: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(rename = "brandname", default)]
    brand_name: Option<String>,
}

impl RawCompany {
    fn into_record(self, key: &str) -> CompanyRecord {
        let company_type = self
            .company_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| key.to_string());

        CompanyRecord::new(company_type, self.name, self.brand_name)
    }
}

/// Top-level entries in source order, duplicates included.
///
/// Deserializing into a map would silently keep the last duplicate, so the
/// entries are collected as a list and checked when the dataset is built.
struct RawEntries(Vec<(String, RawCompany)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping company keys to company records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, company)) = map.next_entry::<String, RawCompany>()? {
                    entries.push((key, company));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The parsed company dataset.
///
/// Records are kept in source order alongside a key → position index.
/// A dataset is never modified after it is built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<(String, CompanyRecord)>,
    positions: HashMap<String, usize>,
}

impl Dataset {
    /// Parse a dataset from its JSON source.
    ///
    /// Fails on malformed JSON, on duplicate keys and on empty keys. A
    /// failure never yields a partial dataset.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let RawEntries(raw) = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(raw.len());
        let mut positions = HashMap::with_capacity(raw.len());

        for (key, company) in raw {
            if key.is_empty() {
                return Err(ParseError::EmptyKey);
            }
            if positions.contains_key(&key) {
                return Err(ParseError::DuplicateKey { key });
            }

            let record = company.into_record(&key);
            positions.insert(key.clone(), entries.len());
            entries.push((key, record));
        }

        Ok(Self { entries, positions })
    }

    /// Look up a record by company key.
    pub fn get(&self, key: &str) -> Option<&CompanyRecord> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Whether the dataset contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Iterate over `(key, record)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompanyRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Iterate over company keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Key of the first record, in source order, whose `field` is exactly `value`.
    ///
    /// Matching is case-sensitive with no normalization. Absent fields never match.
    pub fn find_first<F>(&self, field: F, value: &str) -> Option<&str>
    where
        F: Fn(&CompanyRecord) -> Option<&str>,
    {
        self.iter()
            .find(|(_, record)| field(record) == Some(value))
            .map(|(key, _)| key)
    }

    /// Number of companies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset has no companies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "A6Corp": {"name": "A6 Corp", "brandname": "A6 Corp"},
        "Google Inc.": {"name": "Google Inc.", "brandname": "Google"}
    }"#;

    #[test]
    fn parses_canonical_layout() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();

        assert_eq!(dataset.len(), 2);
        let a6 = dataset.get("A6Corp").unwrap();
        assert_eq!(a6.company_type(), "A6Corp");
        assert_eq!(a6.name(), Some("A6 Corp"));
        assert_eq!(a6.brand_name(), Some("A6 Corp"));
    }

    #[test]
    fn preserves_source_order() {
        let json = r#"{"Zte": {"name": "Z"}, "Acer": {"name": "A"}, "Lg": {"name": "L"}}"#;
        let dataset = Dataset::from_json(json).unwrap();

        let keys: Vec<&str> = dataset.keys().collect();
        assert_eq!(keys, vec!["Zte", "Acer", "Lg"]);
    }

    #[test]
    fn legacy_type_field_is_honoured() {
        let json = r#"{
            "Google": {"type": "Google", "name": "Google Inc.", "brandname": "Google"},
            "Alphabet": {"type": "Google", "name": "Alphabet Inc.", "brandname": null}
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.get("Google").unwrap().company_type(), "Google");
        assert_eq!(dataset.get("Alphabet").unwrap().company_type(), "Google");
    }

    #[test]
    fn null_or_empty_type_falls_back_to_key() {
        let json = r#"{
            "Nokia": {"type": null, "name": "Nokia Corporation", "brandname": "Nokia"},
            "Sony": {"type": "", "name": "Sony Corporation", "brandname": "Sony"}
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.get("Nokia").unwrap().company_type(), "Nokia");
        assert_eq!(dataset.get("Sony").unwrap().company_type(), "Sony");
    }

    #[test]
    fn null_missing_and_empty_fields_are_absent() {
        let json = r#"{
            "Unknown": {"name": null, "brandname": null},
            "Bare": {},
            "Blank": {"name": "", "brandname": ""}
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        for key in ["Unknown", "Bare", "Blank"] {
            let record = dataset.get(key).unwrap();
            assert_eq!(record.name(), None, "{key}");
            assert_eq!(record.brand_name(), None, "{key}");
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let json = r#"{
            "Google": {"name": "Google Inc.", "brandname": "Google"},
            "Google": {"name": "Alphabet Inc.", "brandname": "Google"}
        }"#;

        match Dataset::from_json(json) {
            Err(ParseError::DuplicateKey { key }) => assert_eq!(key, "Google"),
            other => panic!("expected duplicate key error, got {other:?}"),
        }
    }

    #[test]
    fn empty_key_is_rejected() {
        let json = r#"{"": {"name": "Nobody", "brandname": null}}"#;
        assert!(matches!(Dataset::from_json(json), Err(ParseError::EmptyKey)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Dataset::from_json(r#"{"Google": {"name": "Google Inc.""#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(
            Dataset::from_json(r#"["Google"]"#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(
            Dataset::from_json(r#"{"Google": "Google Inc."}"#),
            Err(ParseError::Json(_))
        ));
        assert!(matches!(
            Dataset::from_json(r#"{"Google": {"name": 42}}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn absent_fields_never_match() {
        let json = r#"{"Unknown": {"name": null, "brandname": null}}"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.find_first(CompanyRecord::name, ""), None);
        assert_eq!(dataset.find_first(CompanyRecord::brand_name, ""), None);
    }

    #[test]
    fn empty_object_is_an_empty_dataset() {
        let dataset = Dataset::from_json("{}").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn find_returns_first_match_in_source_order() {
        let json = r#"{
            "Second": {"name": "Shared", "brandname": "Brand"},
            "First": {"name": "Shared", "brandname": "Brand"}
        }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.find_first(CompanyRecord::name, "Shared"), Some("Second"));
        assert_eq!(dataset.find_first(CompanyRecord::brand_name, "Brand"), Some("Second"));
        assert_eq!(dataset.find_first(CompanyRecord::name, "shared"), None);
    }

    #[test]
    fn find_is_exact_match() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();

        let by_name = |value| dataset.find_first(CompanyRecord::name, value);
        assert_eq!(by_name("Google Inc."), Some("Google Inc."));
        assert_eq!(by_name("Google Inc"), None);
        assert_eq!(by_name("google inc."), None);

        let by_brand = |value| dataset.find_first(CompanyRecord::brand_name, value);
        assert_eq!(by_brand("Google"), Some("Google Inc."));
        assert_eq!(by_brand(" Google"), None);
    }
}
