//! CRUD REST service for planets.
//!
//! Requests flow `api` → `service` → `repository`, where the repository is
//! either [`repository::InMemoryPlanetRepository`] or the SQLite-backed
//! [`db::Database`].

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod repository;
pub mod service;
