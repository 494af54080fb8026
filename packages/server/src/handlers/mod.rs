pub mod auth;
pub mod comment;
pub mod dish_type;
pub mod recipe;
pub mod user;
