//! REST API server: routes, JWT authentication, CORS, DTOs and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod cors;
pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
