pub mod handlers;
pub mod routes;

pub use routes::{build_router, AppState};
