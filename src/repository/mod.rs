//! Storage abstraction for planets.
//!
//! Two implementations share one contract:
//!
//! - [`InMemoryPlanetRepository`]: a lock-guarded map owned by whoever builds it.
//! - [`crate::db::Database`]: the SQLite-backed store.
//!
//! Both order [`PlanetRepository::find_all`] by case-insensitive name (ties by
//! id) and both report an update of an unknown id as
//! [`RepositoryError::NotFound`]. Neither enforces name uniqueness; that is the
//! service's job.

mod memory;

pub use memory::InMemoryPlanetRepository;

use thiserror::Error;
use uuid::Uuid;

use crate::models::Planet;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Planet with id {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt planet row: {0}")]
    CorruptRow(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait PlanetRepository: Send + Sync {
    /// Store a new planet keyed by its id.
    fn save(&self, planet: Planet) -> RepositoryResult<Planet>;

    fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Planet>>;

    /// Case-insensitive lookup by name.
    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Planet>>;

    fn find_all(&self) -> RepositoryResult<Vec<Planet>>;

    /// Overwrite the planet stored under `planet.id()`.
    fn update(&self, planet: Planet) -> RepositoryResult<Planet>;

    /// Returns `true` if a planet was removed.
    fn delete(&self, id: Uuid) -> RepositoryResult<bool>;
}
