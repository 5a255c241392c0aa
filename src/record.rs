//! Skill records - input documents and the rows they become
//!
//! A `SkillRecord` is one object of the `skills.json` array as it was read.
//! A `SkillRow` is the same record after validation, with defaults applied
//! and the list-valued fields encoded as JSON text ready for storage.

use crate::storage::schema::Column;
use crate::{Error, Result};
use rusqlite::ToSql;
use serde::{Deserialize, Deserializer, Serialize};

/// One skill as described by the catalog source.
///
/// `id` and `name` are required but kept optional here so that a missing
/// field is reported with the record's position instead of a generic
/// deserialization error. Every other field falls back to its default when
/// absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_zh: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description_zh: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_description_zh: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Popularity count; absent stays absent (stored as NULL)
    pub popularity: Option<i64>,
    pub popularity_label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail_url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SkillRecord {
    /// Create a record with only the required fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A validated record, shaped like a row of the `skills` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRow {
    pub id: String,
    pub name: String,
    pub name_zh: String,
    pub short_description: String,
    pub short_description_zh: String,
    pub long_description: String,
    pub long_description_zh: String,
    pub category: String,
    /// JSON array text, `[]` when the record had none
    pub platforms: String,
    /// JSON array text, `[]` when the record had none
    pub tags: String,
    pub popularity: Option<i64>,
    pub popularity_label: Option<String>,
    pub source_name: String,
    pub source_url: String,
    pub detail_url: String,
}

impl SkillRow {
    /// Validate a record and encode it for storage.
    ///
    /// `index` is the record's position in the input array and is only used
    /// for error reporting.
    pub fn from_record(index: usize, record: &SkillRecord) -> Result<Self> {
        let id = record
            .id
            .clone()
            .ok_or(Error::MissingField { index, field: "id" })?;
        let name = record
            .name
            .clone()
            .ok_or(Error::MissingField { index, field: "name" })?;

        Ok(Self {
            id,
            name,
            name_zh: record.name_zh.clone(),
            short_description: record.short_description.clone(),
            short_description_zh: record.short_description_zh.clone(),
            long_description: record.long_description.clone(),
            long_description_zh: record.long_description_zh.clone(),
            category: record.category.clone(),
            platforms: serde_json::to_string(&record.platforms)?,
            tags: serde_json::to_string(&record.tags)?,
            popularity: record.popularity,
            popularity_label: record.popularity_label.clone(),
            source_name: record.source_name.clone(),
            source_url: record.source_url.clone(),
            detail_url: record.detail_url.clone(),
        })
    }

    /// The value bound to `column` when this row is inserted
    pub fn value(&self, column: Column) -> &dyn ToSql {
        match column {
            Column::Id => &self.id,
            Column::Name => &self.name,
            Column::NameZh => &self.name_zh,
            Column::ShortDescription => &self.short_description,
            Column::ShortDescriptionZh => &self.short_description_zh,
            Column::LongDescription => &self.long_description,
            Column::LongDescriptionZh => &self.long_description_zh,
            Column::Category => &self.category,
            Column::Platforms => &self.platforms,
            Column::Tags => &self.tags,
            Column::Popularity => &self.popularity,
            Column::PopularityLabel => &self.popularity_label,
            Column::SourceName => &self.source_name,
            Column::SourceUrl => &self.source_url,
            Column::DetailUrl => &self.detail_url,
        }
    }
}

/// Validate every record before anything is written.
///
/// Fails on the first record that lacks a required field.
pub fn prepare_rows(records: &[SkillRecord]) -> Result<Vec<SkillRow>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| SkillRow::from_record(index, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_absent_fields() {
        let record: SkillRecord = serde_json::from_str(r#"{"id":"s1","name":"Sort"}"#).unwrap();
        let row = SkillRow::from_record(0, &record).unwrap();

        assert_eq!(row.short_description, "");
        assert_eq!(row.platforms, "[]");
        assert_eq!(row.tags, "[]");
        assert_eq!(row.popularity, None);
        assert_eq!(row.popularity_label, None);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let record: SkillRecord = serde_json::from_str(
            r#"{"id":"s1","name":"Sort","category":null,"tags":null,"popularity":null}"#,
        )
        .unwrap();

        assert_eq!(record.category, "");
        assert!(record.tags.is_empty());
        assert_eq!(record.popularity, None);
    }

    #[test]
    fn test_arrays_encode_compact_and_unescaped() {
        let mut record = SkillRecord::new("s1", "Sort");
        record.tags = vec!["algo".into(), "cs".into()];
        record.platforms = vec!["网页".into()];

        let row = SkillRow::from_record(0, &record).unwrap();
        assert_eq!(row.tags, r#"["algo","cs"]"#);
        assert_eq!(row.platforms, r#"["网页"]"#);
    }

    #[test]
    fn test_missing_id_reports_position() {
        let records = vec![
            SkillRecord::new("s1", "Sort"),
            SkillRecord { name: Some("Search".into()), ..Default::default() },
        ];

        match prepare_rows(&records) {
            Err(Error::MissingField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "id");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_name() {
        let record = SkillRecord { id: Some("s1".into()), ..Default::default() };
        let err = SkillRow::from_record(3, &record).unwrap_err();
        assert!(matches!(err, Error::MissingField { index: 3, field: "name" }));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record: SkillRecord =
            serde_json::from_str(r#"{"id":"s1","name":"Sort","stars":12}"#).unwrap();
        assert_eq!(record, SkillRecord::new("s1", "Sort"));
    }
}
