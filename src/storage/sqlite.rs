//! SQLite storage implementation

use std::path::Path;
use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use serde::Serialize;
use crate::model::{CraftResult, RarityMix, RarityTier, Relic, RelicDocument};
use crate::{Error, Result};
use super::schema;

/// SQLite-backed store of relics and craft results
#[derive(Debug)]
pub struct RelicStore {
    conn: Connection,
}

impl RelicStore {
    /// Create a new database file. The caller is responsible for making sure
    /// nothing stale already lives at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an existing database for reading
    pub fn open_read_only(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the schema, insert the whole document and build indexes as a
    /// single transaction. Any failure rolls everything back.
    pub fn populate(&mut self, document: &RelicDocument) -> Result<()> {
        let tx = self.conn.transaction()?;

        for stmt in schema::table_statements() {
            tx.execute(stmt, [])?;
        }

        insert_craft_results(&tx, &document.relic_craft_results)?;
        tracing::debug!("Inserted {} craft results", document.relic_craft_results.len());

        insert_relics(&tx, &document.relics)?;
        tracing::debug!("Inserted {} relics", document.relics.len());

        for stmt in schema::CREATE_INDEXES {
            tx.execute(stmt, [])?;
        }

        tx.commit()?;
        Ok(())
    }

    // ========== Relic Operations ==========

    /// Get a relic by its unique name
    pub fn get_relic(&self, name: &str) -> Result<Option<Relic>> {
        self.conn
            .query_row(
                r#"SELECT name, "group", rarity, image, description FROM relics WHERE name = ?1"#,
                [name],
                row_to_relic,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All relics in insertion order
    pub fn all_relics(&self) -> Result<Vec<Relic>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT name, "group", rarity, image, description FROM relics ORDER BY id"#,
        )?;
        let relics = stmt
            .query_map([], row_to_relic)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(relics)
    }

    pub fn count_relics(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM relics", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Relic counts per rarity, most common first
    pub fn count_by_rarity(&self) -> Result<Vec<CategoryCount>> {
        self.count_by_column("rarity")
    }

    /// Relic counts per group, most common first
    pub fn count_by_group(&self) -> Result<Vec<CategoryCount>> {
        self.count_by_column(r#""group""#)
    }

    fn count_by_column(&self, column: &str) -> Result<Vec<CategoryCount>> {
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM relics GROUP BY {column} ORDER BY COUNT(*) DESC, {column} ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let counts = stmt
            .query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok(CategoryCount { name: row.get(0)?, count: count as usize })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }

    // ========== Craft Result Operations ==========

    /// All craft results in insertion order
    pub fn all_craft_results(&self) -> Result<Vec<CraftResult>> {
        let mut stmt = self.conn.prepare(
            "SELECT comp_rare, comp_epic, comp_legendary, comp_mythical,
                    result_rare, result_epic, result_legendary, result_mythical
             FROM relic_craft_results ORDER BY id",
        )?;
        let crafts = stmt
            .query_map([], |row| {
                Ok(CraftResult {
                    composition: RarityMix::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?),
                    result: RarityMix::new(row.get(4)?, row.get(5)?, row.get(6)?, row.get(7)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(crafts)
    }

    pub fn count_craft_results(&self) -> Result<usize> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM relic_craft_results", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Compositions with the highest yield of `tier`, best first
    pub fn top_compositions(&self, tier: RarityTier, limit: usize) -> Result<Vec<CompositionYield>> {
        let column = tier.result_column();
        let sql = format!(
            "SELECT comp_rare, comp_epic, comp_legendary, comp_mythical, {column}
             FROM relic_craft_results
             ORDER BY {column} DESC
             LIMIT ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok(CompositionYield {
                    composition: RarityMix::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?),
                    tier,
                    yield_pct: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ========== Maintenance ==========

    /// Names of the secondary indexes present in the database
    pub fn index_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            relics: self.count_relics()?,
            craft_results: self.count_craft_results()?,
        })
    }
}

fn insert_craft_results(conn: &Connection, crafts: &[CraftResult]) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO relic_craft_results
        (comp_rare, comp_epic, comp_legendary, comp_mythical,
         result_rare, result_epic, result_legendary, result_mythical)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )?;
    for craft in crafts {
        let (comp, res) = (&craft.composition, &craft.result);
        stmt.execute(params![
            comp.rare, comp.epic, comp.legendary, comp.mythical,
            res.rare, res.epic, res.legendary, res.mythical,
        ])?;
    }
    Ok(())
}

fn insert_relics(conn: &Connection, relics: &[Relic]) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO relics (name, "group", rarity, image, description)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for relic in relics {
        stmt.execute(params![
            relic.name,
            relic.group,
            relic.rarity,
            relic.image,
            relic.description,
        ])
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _) if err.code == ErrorCode::ConstraintViolation => {
                Error::ConstraintViolation(format!("duplicate relic name '{}'", relic.name))
            }
            other => Error::Storage(other),
        })?;
    }
    Ok(())
}

fn row_to_relic(row: &rusqlite::Row) -> rusqlite::Result<Relic> {
    let description: Option<String> = row.get(4)?;
    Ok(Relic {
        name: row.get(0)?,
        group: row.get(1)?,
        rarity: row.get(2)?,
        image: row.get(3)?,
        description: description.unwrap_or_default(),
    })
}

/// Number of relics sharing a rarity or group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// A craft composition and the yield it produced for one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionYield {
    pub composition: RarityMix,
    pub tier: RarityTier,
    pub yield_pct: f64,
}

impl std::fmt::Display for CompositionYield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Input shares are truncated, the yield is shown as stored
        let c = &self.composition;
        write!(
            f,
            "R:{}% E:{}% L:{}% M:{}% -> {}: {}%",
            c.rare as i64,
            c.epic as i64,
            c.legendary as i64,
            c.mythical as i64,
            self.tier.label(),
            self.yield_pct
        )
    }
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub relics: usize,
    pub craft_results: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Relics: {}", self.relics)?;
        writeln!(f, "  Craft results: {}", self.craft_results)
    }
}
