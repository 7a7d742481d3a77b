mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::{name_key, Planet};
use crate::repository::{PlanetRepository, RepositoryError, RepositoryResult};

/// SQLite-backed planet store.
///
/// Cloning is cheap; clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "planet-api")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("planets.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

// ============================================================
// Planet operations
// ============================================================

type PlanetRow = (String, String, Option<String>);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlanetRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn planet_from_row((id, name, description): PlanetRow) -> RepositoryResult<Planet> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| RepositoryError::CorruptRow(format!("invalid id '{}': {}", id, e)))?;
    Planet::new(id, name, description)
        .map_err(|e| RepositoryError::CorruptRow(format!("planet {}: {}", id, e)))
}

impl PlanetRepository for Database {
    fn save(&self, planet: Planet) -> RepositoryResult<Planet> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO planets (id, name, name_key, description) VALUES (?, ?, ?, ?)",
            (
                planet.id().to_string(),
                planet.name(),
                planet.name_key(),
                planet.description(),
            ),
        )?;
        Ok(planet)
    }

    fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Planet>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, name, description FROM planets WHERE id = ?",
                [id.to_string()],
                read_row,
            )
            .optional()?;
        row.map(planet_from_row).transpose()
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Planet>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, name, description FROM planets
                 WHERE name_key = ? ORDER BY id LIMIT 1",
                [name_key(name)],
                read_row,
            )
            .optional()?;
        row.map(planet_from_row).transpose()
    }

    fn find_all(&self) -> RepositoryResult<Vec<Planet>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM planets ORDER BY name_key, id")?;

        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(planet_from_row).collect()
    }

    fn update(&self, planet: Planet) -> RepositoryResult<Planet> {
        let conn = self.lock()?;
        let rows = conn.execute(
            "UPDATE planets SET name = ?, name_key = ?, description = ? WHERE id = ?",
            (
                planet.name(),
                planet.name_key(),
                planet.description(),
                planet.id().to_string(),
            ),
        )?;

        if rows == 0 {
            return Err(RepositoryError::NotFound(planet.id()));
        }
        Ok(planet)
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM planets WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}
