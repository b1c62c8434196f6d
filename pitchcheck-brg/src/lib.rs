pub mod api;
pub mod auth;
pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{router, AppState};
