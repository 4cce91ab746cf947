//! HTTP gateway for the hashlink URL shortener.
//!
//! Translates `POST /shorten` and `GET /{code}` into calls on a shared
//! [`MappingCoordinator`](hashlink_coordinator::MappingCoordinator). No
//! mapping logic lives here; handlers only parse, validate and render.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
