//! # lumina-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive **input events** from input devices
//!   (`POST /api/lights/{name}/input`), in the controllers' native format
//! - Receive **schedule callbacks** issued by the controllers' schedulers
//!   (`GET|POST /api/lights/{name}/schedule/{TAG}`)
//! - Serve the latest **status snapshot** of every light
//!   (`GET /api/lights`, `GET /api/lights/{name}`)
//! - Map application errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `lumina-app` (for the light registry) and `lumina-domain`
//! (for domain types used in request/response mapping). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
