//! Database schema definitions
//!
//! The `skills` table is described by a declared column list. Both schema
//! variants are generated from the same list, so their shared columns can
//! never drift apart.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the single table in the catalog database
pub const TABLE_NAME: &str = "skills";

/// A column of the `skills` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    NameZh,
    ShortDescription,
    ShortDescriptionZh,
    LongDescription,
    LongDescriptionZh,
    Category,
    Platforms,
    Tags,
    Popularity,
    PopularityLabel,
    SourceName,
    SourceUrl,
    DetailUrl,
}

/// All columns in table order
const ALL_COLUMNS: &[Column] = &[
    Column::Id,
    Column::Name,
    Column::NameZh,
    Column::ShortDescription,
    Column::ShortDescriptionZh,
    Column::LongDescription,
    Column::LongDescriptionZh,
    Column::Category,
    Column::Platforms,
    Column::Tags,
    Column::Popularity,
    Column::PopularityLabel,
    Column::SourceName,
    Column::SourceUrl,
    Column::DetailUrl,
];

impl Column {
    /// Column name as it appears in SQL
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::NameZh => "name_zh",
            Column::ShortDescription => "short_description",
            Column::ShortDescriptionZh => "short_description_zh",
            Column::LongDescription => "long_description",
            Column::LongDescriptionZh => "long_description_zh",
            Column::Category => "category",
            Column::Platforms => "platforms",
            Column::Tags => "tags",
            Column::Popularity => "popularity",
            Column::PopularityLabel => "popularity_label",
            Column::SourceName => "source_name",
            Column::SourceUrl => "source_url",
            Column::DetailUrl => "detail_url",
        }
    }

    /// Column definition used in `CREATE TABLE`
    pub fn definition(&self) -> &'static str {
        match self {
            Column::Id => "TEXT PRIMARY KEY",
            Column::Popularity => "INTEGER",
            _ => "TEXT",
        }
    }

    /// Whether the column only exists in the bilingual variant
    pub fn is_translation(&self) -> bool {
        matches!(
            self,
            Column::NameZh | Column::ShortDescriptionZh | Column::LongDescriptionZh
        )
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which column set the catalog is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// English and Chinese text columns (15 columns)
    #[default]
    Bilingual,
    /// English text columns only (12 columns)
    Monolingual,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Bilingual => "bilingual",
            SchemaVariant::Monolingual => "monolingual",
        }
    }

    /// Columns of this variant, in table order
    pub fn columns(&self) -> Vec<Column> {
        ALL_COLUMNS
            .iter()
            .copied()
            .filter(|c| *self == SchemaVariant::Bilingual || !c.is_translation())
            .collect()
    }

    /// Guess the variant from a table's column names
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Self {
        let has_translations = columns
            .iter()
            .any(|c| c.as_ref() == Column::NameZh.as_str());
        if has_translations {
            SchemaVariant::Bilingual
        } else {
            SchemaVariant::Monolingual
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bilingual" | "zh" | "en-zh" => Ok(SchemaVariant::Bilingual),
            "monolingual" | "en" => Ok(SchemaVariant::Monolingual),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SQL to create the skills table
pub fn create_table_sql(variant: SchemaVariant) -> String {
    let columns: Vec<String> = variant
        .columns()
        .iter()
        .map(|c| format!("    {} {}", c.as_str(), c.definition()))
        .collect();
    format!("CREATE TABLE {} (\n{}\n)", TABLE_NAME, columns.join(",\n"))
}

/// SQL to insert one row, with one numbered parameter per column
pub fn insert_sql(variant: SchemaVariant) -> String {
    let columns = variant.columns();
    let names: Vec<&str> = columns.iter().map(Column::as_str).collect();
    let params: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE_NAME,
        names.join(", "),
        params.join(", ")
    )
}

/// Column list for SELECT statements
pub fn select_columns(variant: SchemaVariant) -> String {
    variant
        .columns()
        .iter()
        .map(Column::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
