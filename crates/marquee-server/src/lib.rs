//! Marquee HTTP server: catalog browsing, metadata lookups and generated
//! analyses behind a JSON API.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
