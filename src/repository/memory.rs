use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::{PlanetRepository, RepositoryError, RepositoryResult};
use crate::models::{name_key, Planet};

/// Planet store backed by a map in process memory.
///
/// Each call takes the lock once, so single-key operations are atomic.
#[derive(Debug, Default)]
pub struct InMemoryPlanetRepository {
    planets: RwLock<HashMap<Uuid, Planet>>,
}

impl InMemoryPlanetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every planet.
    pub fn clear(&self) -> RepositoryResult<()> {
        self.planets
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

impl PlanetRepository for InMemoryPlanetRepository {
    fn save(&self, planet: Planet) -> RepositoryResult<Planet> {
        let mut planets = self
            .planets
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        planets.insert(planet.id(), planet.clone());
        Ok(planet)
    }

    fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Planet>> {
        let planets = self
            .planets
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(planets.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Planet>> {
        let key = name_key(name);
        let planets = self
            .planets
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        // Case variants share a key, so the lowest id is first in list order.
        Ok(planets
            .values()
            .filter(|p| p.name_key() == key)
            .min_by_key(|p| p.id())
            .cloned())
    }

    fn find_all(&self) -> RepositoryResult<Vec<Planet>> {
        let planets = self
            .planets
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut all: Vec<Planet> = planets.values().cloned().collect();
        all.sort_by_cached_key(|p| (p.name_key(), p.id()));
        Ok(all)
    }

    fn update(&self, planet: Planet) -> RepositoryResult<Planet> {
        let mut planets = self
            .planets
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        match planets.get_mut(&planet.id()) {
            Some(slot) => {
                *slot = planet.clone();
                Ok(planet)
            }
            None => Err(RepositoryError::NotFound(planet.id())),
        }
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut planets = self
            .planets
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(planets.remove(&id).is_some())
    }
}
