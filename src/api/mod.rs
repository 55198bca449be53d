//! HTTP API for the health demo service.
//!
//! ## Endpoints
//!
//! - `GET /bmi?weight_kg=<float>&height_m=<float>` - BMI with WHO assessment
//! - `GET /api/health` - Service health check
//! - `GET /api/tools` - Tool-discovery listing for external agent frameworks

pub mod health;
mod routes;

pub use routes::{router, serve};
