//! Domain models for the planet service.
//!
//! - [`Planet`]: the single entity, validated on construction.
//! - [`PlanetRequest`]: create/update body with explicit field validation.
//! - [`PlanetResponse`] and [`SuccessResponse`]: the success envelope `{data: ...}`.

mod planet;
mod request;

pub use planet::*;
pub use request::*;
