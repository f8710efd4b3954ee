//! HealLink Server - HTTP REST API for mentor matching
//!
//! Exposes the user directory, mentor matching, icebreakers and the profile
//! form catalog over JSON.
//!
//! # Features
//!
//! - **Authentication**: API key (`X-API-Key` or `Authorization: Bearer`) with
//!   per-key rate limiting, enforced when keys are configured
//! - **Middleware**: compression, CORS, request ids, structured logging
//! - **Configuration**: `server.{toml,yaml,json}` plus `HEALLINK_SERVER__*`
//!   environment overrides, `.env` via dotenvy
//! - **Errors**: JSON envelope `{"error": {"code", "message"}}`
//! - **Metrics**: Prometheus exposition on `/metrics`
//!
//! # API Endpoints
//!
//! ## Public
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Protected
//!
//! - `POST /api/v1/users` - Create a profile (signup)
//! - `GET /api/v1/users` - List profiles
//! - `GET /api/v1/users/{id}` - Get a profile
//! - `GET /api/v1/users/by-email/{email}` - Look a profile up by email
//! - `PUT /api/v1/users/{id}` - Replace a profile
//! - `DELETE /api/v1/users/{id}` - Delete a profile
//! - `POST /api/v1/match` - Ranked mentors for a seeker
//! - `POST /api/v1/icebreaker` - Opener for a seeker/mentor pair
//! - `GET /api/v1/catalog` - Profile form option lists

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
