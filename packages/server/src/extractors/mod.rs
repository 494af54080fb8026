mod auth;
mod json;
mod params;

pub use auth::AuthUser;
pub use json::AppJson;
pub use params::{AppPath, AppQuery};
