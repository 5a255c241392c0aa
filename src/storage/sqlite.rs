//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension, Row, ToSql};
use crate::{Result, Error};
use crate::record::{SkillRecord, SkillRow};
use super::schema::{self, Column, SchemaVariant, TABLE_NAME};

/// SQLite-backed storage for the skill catalog
pub struct SkillStore {
    conn: Connection,
    variant: SchemaVariant,
}

impl SkillStore {
    /// Create the catalog table in a new database file.
    ///
    /// The file is created if it doesn't exist. The caller is expected to
    /// have removed any previous catalog first.
    pub fn create(path: &Path, variant: SchemaVariant) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn, variant };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory(variant: SchemaVariant) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, variant };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing catalog read-only, detecting its variant
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let columns = table_columns(&conn)?;
        if columns.is_empty() {
            return Err(Error::TableNotFound(TABLE_NAME));
        }
        let variant = SchemaVariant::detect(columns.as_slice());
        Ok(Self { conn, variant })
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(&schema::create_table_sql(self.variant), [])?;
        Ok(())
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    // ========== Writes ==========

    /// Insert all rows, in order, inside a single transaction.
    ///
    /// Nothing is committed unless every row is accepted. A primary-key
    /// violation is reported as `Error::DuplicateKey` with the offending id.
    pub fn insert_all(&mut self, rows: &[SkillRow]) -> Result<usize> {
        let columns = self.variant.columns();
        let sql = schema::insert_sql(self.variant);

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in rows {
                let params: Vec<&dyn ToSql> = columns.iter().map(|c| row.value(*c)).collect();
                stmt.execute(params.as_slice())
                    .map_err(|e| insert_error(e, &row.id))?;
                tracing::trace!("Inserted skill {}", row.id);
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }

    // ========== Reads ==========

    /// Count all skills
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All ids, in insertion order
    pub fn ids(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM skills ORDER BY rowid")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    /// Get a skill by id
    pub fn get(&self, id: &str) -> Result<Option<SkillRecord>> {
        let sql = format!(
            "SELECT {} FROM skills WHERE id = ?1",
            schema::select_columns(self.variant)
        );
        self.conn
            .query_row(&sql, [id], |row| self.row_to_record(row))
            .optional()
            .map_err(Into::into)
    }

    /// Load every skill, in insertion order
    pub fn load_all(&self) -> Result<Vec<SkillRecord>> {
        let sql = format!(
            "SELECT {} FROM skills ORDER BY rowid",
            schema::select_columns(self.variant)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], |row| self.row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Get catalog statistics
    pub fn stats(&self) -> Result<CatalogStats> {
        let (skills, categories, sources): (i64, i64, i64) = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COUNT(DISTINCT NULLIF(category, '')),
                   COUNT(DISTINCT NULLIF(source_name, ''))
            FROM skills
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let platforms: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT p.value) FROM skills, json_each(skills.platforms) AS p",
            [],
            |row| row.get(0),
        )?;

        Ok(CatalogStats {
            skills: skills as usize,
            categories: categories as usize,
            sources: sources as usize,
            platforms: platforms as usize,
        })
    }

    /// Helper to convert a row to a SkillRecord
    fn row_to_record(&self, row: &Row) -> rusqlite::Result<SkillRecord> {
        let mut record = SkillRecord::default();
        for (idx, column) in self.variant.columns().into_iter().enumerate() {
            match column {
                Column::Id => record.id = row.get(idx)?,
                Column::Name => record.name = row.get(idx)?,
                Column::NameZh => record.name_zh = text(row, idx)?,
                Column::ShortDescription => record.short_description = text(row, idx)?,
                Column::ShortDescriptionZh => record.short_description_zh = text(row, idx)?,
                Column::LongDescription => record.long_description = text(row, idx)?,
                Column::LongDescriptionZh => record.long_description_zh = text(row, idx)?,
                Column::Category => record.category = text(row, idx)?,
                Column::Platforms => record.platforms = list(row, idx)?,
                Column::Tags => record.tags = list(row, idx)?,
                Column::Popularity => record.popularity = row.get(idx)?,
                Column::PopularityLabel => record.popularity_label = row.get(idx)?,
                Column::SourceName => record.source_name = text(row, idx)?,
                Column::SourceUrl => record.source_url = text(row, idx)?,
                Column::DetailUrl => record.detail_url = text(row, idx)?,
            }
        }
        Ok(record)
    }
}

fn text(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn list(row: &Row, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        }),
    }
}

fn table_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([TABLE_NAME], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
}

fn insert_error(err: rusqlite::Error, id: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Error::DuplicateKey(id.to_string())
        }
        _ => Error::Storage(err),
    }
}

/// Catalog statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub skills: usize,
    pub categories: usize,
    pub sources: usize,
    pub platforms: usize,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog Statistics:")?;
        writeln!(f, "  Skills: {}", self.skills)?;
        writeln!(f, "  Categories: {}", self.categories)?;
        writeln!(f, "  Sources: {}", self.sources)?;
        writeln!(f, "  Platforms: {}", self.platforms)
    }
}
