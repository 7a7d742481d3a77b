use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum planet name length, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum planet description length, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// A planet known to the system.
///
/// Planets are immutable values. The `id` is assigned once by [`Planet::create`]
/// and never changes; edits produce a new value via [`Planet::with_details`].
/// Construction always validates the name, so a `Planet` in hand is known to
/// carry a non-blank name of at most [`MAX_NAME_LENGTH`] characters.
///
/// Name uniqueness (case-insensitive) is a service-level rule and is not
/// checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    id: Uuid,
    name: String,
    description: Option<String>,
}

/// Reasons a planet value cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPlanet {
    #[error("Planet name cannot be blank")]
    BlankName,

    #[error("Planet name cannot be longer than 100 characters")]
    NameTooLong,
}

impl Planet {
    /// Build a planet with an existing identifier, validating the name.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidPlanet> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id,
            name,
            description,
        })
    }

    /// Build a brand new planet with a freshly generated identifier.
    pub fn create(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidPlanet> {
        Self::new(Uuid::new_v4(), name, description)
    }

    /// Replace name and description, keeping the identifier.
    pub fn with_details(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidPlanet> {
        Self::new(self.id, name, description)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Key used for case-insensitive name comparison.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Normalize a planet name for case-insensitive comparison.
///
/// Folds one character at a time (upper then lower), so context-sensitive
/// rules such as the Greek final sigma never split two names apart.
pub fn name_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

fn validate_name(name: &str) -> Result<(), InvalidPlanet> {
    if name.trim().is_empty() {
        return Err(InvalidPlanet::BlankName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(InvalidPlanet::NameTooLong);
    }
    Ok(())
}

/// Wire representation of a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Planet> for PlanetResponse {
    fn from(planet: Planet) -> Self {
        Self {
            id: planet.id,
            name: planet.name,
            description: planet.description,
        }
    }
}

/// Envelope wrapping every successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
