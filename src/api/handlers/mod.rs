use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::problem::Problem;
use super::AppState;
use crate::models::*;
use crate::service::PlanetError;

const ENTITY_TYPE: &str = "Planet";

type ApiResult<T> = Result<T, Problem>;

// ============================================================
// Error Handling
// ============================================================

/// Translate a service error into a problem response.
///
/// Storage failures are logged in full server-side; clients only see a
/// generic internal error.
fn service_error(state: &AppState, err: PlanetError) -> Problem {
    match err {
        PlanetError::NotFound(id) => state.problems.not_found(ENTITY_TYPE, id.to_string(), None),
        PlanetError::DuplicateName(_) | PlanetError::Invalid(_) => {
            tracing::warn!("Rejected planet request: {}", err);
            state.problems.bad_request(err.to_string())
        }
        PlanetError::Repository(e) => {
            tracing::error!("Internal error: {}", e);
            state.problems.internal_error()
        }
    }
}

fn planet_id(state: &AppState, id: Result<Path<Uuid>, PathRejection>) -> ApiResult<Uuid> {
    id.map(|Path(id)| id)
        .map_err(|rejection| state.problems.bad_request(rejection.body_text()))
}

/// Unwrap and validate a request body before any business rule runs.
fn planet_request(
    state: &AppState,
    payload: Result<Json<PlanetRequest>, JsonRejection>,
) -> ApiResult<PlanetRequest> {
    let Json(request) =
        payload.map_err(|rejection| state.problems.bad_request(rejection.body_text()))?;

    let violations = request.validate();
    if !violations.is_empty() {
        tracing::debug!("Request failed validation: {:?}", violations);
        return Err(state.problems.constraint_violation(violations));
    }
    Ok(request)
}

fn envelope(planet: Planet) -> Json<SuccessResponse<PlanetResponse>> {
    Json(SuccessResponse::new(planet.into()))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Fallbacks
// ============================================================

pub async fn no_route(State(state): State<AppState>, uri: Uri) -> Problem {
    tracing::debug!("No route for {}", uri.path());
    state.problems.no_route(uri.path())
}

pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Problem {
    state.problems.method_not_allowed(method.as_str(), uri.path())
}

// ============================================================
// Planets
// ============================================================

pub async fn list_planets(
    State(state): State<AppState>,
) -> ApiResult<Json<SuccessResponse<Vec<PlanetResponse>>>> {
    let planets = state
        .planets
        .get_all_planets()
        .map_err(|e| service_error(&state, e))?;

    Ok(Json(SuccessResponse::new(
        planets.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_planet(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<SuccessResponse<PlanetResponse>>> {
    let id = planet_id(&state, id)?;

    state
        .planets
        .get_planet(id)
        .map_err(|e| service_error(&state, e))?
        .map(envelope)
        .ok_or_else(|| state.problems.not_found(ENTITY_TYPE, id.to_string(), None))
}

pub async fn search_planet(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<SuccessResponse<PlanetResponse>>> {
    let Query(query) =
        query.map_err(|rejection| state.problems.bad_request(rejection.body_text()))?;

    state
        .planets
        .get_planet_by_name(&query.name)
        .map_err(|e| service_error(&state, e))?
        .map(envelope)
        .ok_or_else(|| {
            state.problems.not_found(
                ENTITY_TYPE,
                query.name.clone(),
                Some(format!("Planet not found with name: {}", query.name)),
            )
        })
}

pub async fn create_planet(
    State(state): State<AppState>,
    payload: Result<Json<PlanetRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = planet_request(&state, payload)?;

    let planet = state
        .planets
        .create_planet(&request.name, request.description)
        .map_err(|e| service_error(&state, e))?;

    let location = format!("/api/planets/{}", planet.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        envelope(planet),
    ))
}

pub async fn update_planet(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PlanetRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse<PlanetResponse>>> {
    let id = planet_id(&state, id)?;
    let request = planet_request(&state, payload)?;

    state
        .planets
        .update_planet(id, &request.name, request.description)
        .map(envelope)
        .map_err(|e| service_error(&state, e))
}

pub async fn delete_planet(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = planet_id(&state, id)?;

    if state
        .planets
        .delete_planet(id)
        .map_err(|e| service_error(&state, e))?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(state.problems.not_found(ENTITY_TYPE, id.to_string(), None))
    }
}
