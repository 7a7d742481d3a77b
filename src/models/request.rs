use serde::{Deserialize, Serialize};

use super::planet::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

/// Request body for creating or updating a planet.
///
/// A missing `name` deserializes as an empty string so that it is reported
/// as a field violation rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PlanetRequest {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }

    /// Check field constraints. An empty list means the request is acceptable.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "must not be blank"));
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            violations.push(FieldViolation::new(
                "name",
                format!("size must be between 0 and {}", MAX_NAME_LENGTH),
            ));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                violations.push(FieldViolation::new(
                    "description",
                    format!("size must be between 0 and {}", MAX_DESCRIPTION_LENGTH),
                ));
            }
        }

        violations
    }
}

/// Query string for `GET /api/planets/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}
