//! Business rules for planets.
//!
//! [`PlanetService`] sits between the HTTP handlers and a [`PlanetRepository`].
//! It owns the case-insensitive name uniqueness rule and turns storage
//! outcomes into [`PlanetError`] values.
//!
//! Every check-then-write pair runs under an internal write lock, so two
//! requests in the same process cannot both pass the uniqueness check for the
//! same name. Reads never take that lock.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{InvalidPlanet, Planet};
use crate::repository::{PlanetRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum PlanetError {
    #[error(transparent)]
    Invalid(#[from] InvalidPlanet),

    #[error("No planet found with id: {0}")]
    NotFound(Uuid),

    #[error("A planet with name '{0}' already exists")]
    DuplicateName(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for PlanetError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

pub type PlanetResult<T> = Result<T, PlanetError>;

pub struct PlanetService {
    repository: Arc<dyn PlanetRepository>,
    write_lock: Mutex<()>,
}

impl PlanetService {
    pub fn new(repository: Arc<dyn PlanetRepository>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Create and store a new planet.
    ///
    /// Fails with [`PlanetError::DuplicateName`] if any stored planet has the
    /// same name ignoring case.
    pub fn create_planet(&self, name: &str, description: Option<String>) -> PlanetResult<Planet> {
        let planet = Planet::create(name, description)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if self.repository.find_by_name(name)?.is_some() {
            tracing::debug!("Rejected duplicate planet name: {}", name);
            return Err(PlanetError::DuplicateName(name.to_string()));
        }

        let saved = self.repository.save(planet)?;
        tracing::info!("Created planet {} ({})", saved.name(), saved.id());
        Ok(saved)
    }

    pub fn get_planet(&self, id: Uuid) -> PlanetResult<Option<Planet>> {
        Ok(self.repository.find_by_id(id)?)
    }

    /// Case-insensitive lookup by name.
    pub fn get_planet_by_name(&self, name: &str) -> PlanetResult<Option<Planet>> {
        Ok(self.repository.find_by_name(name)?)
    }

    pub fn get_all_planets(&self) -> PlanetResult<Vec<Planet>> {
        Ok(self.repository.find_all()?)
    }

    /// Replace the name and description of an existing planet.
    ///
    /// The uniqueness check only runs when the name actually changes, and it
    /// ignores the planet being updated, so re-casing a planet's own name is
    /// allowed.
    pub fn update_planet(
        &self,
        id: Uuid,
        name: &str,
        description: Option<String>,
    ) -> PlanetResult<Planet> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let existing = self
            .repository
            .find_by_id(id)?
            .ok_or(PlanetError::NotFound(id))?;

        if name != existing.name() {
            if let Some(other) = self.repository.find_by_name(name)? {
                if other.id() != id {
                    tracing::debug!("Rejected rename of {} to duplicate name {}", id, name);
                    return Err(PlanetError::DuplicateName(name.to_string()));
                }
            }
        }

        let updated = existing.with_details(name, description)?;
        let saved = self.repository.update(updated)?;
        tracing::info!("Updated planet {} ({})", saved.name(), saved.id());
        Ok(saved)
    }

    /// Returns `true` if a planet was removed.
    pub fn delete_planet(&self, id: Uuid) -> PlanetResult<bool> {
        let deleted = self.repository.delete(id)?;
        if deleted {
            tracing::info!("Deleted planet {}", id);
        }
        Ok(deleted)
    }
}
