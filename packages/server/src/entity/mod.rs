//! Entity Store schema.
//!
//! Referential policies are declared on each `belongs_to`:
//!
//! | child              | parent    | on delete |
//! |--------------------|-----------|-----------|
//! | `recipe.author`    | `user`    | set null  |
//! | `comment.author`   | `user`    | set null  |
//! | `comment.recipe`   | `recipe`  | cascade   |
//! | `recipe_dish_type` | `recipe`  | cascade   |
//! | `recipe_dish_type` | `dish_type` | cascade |
//!
//! [`crate::store::EntityStore`] applies the same policies explicitly as well.

pub mod comment;
pub mod dish_type;
pub mod recipe;
pub mod recipe_dish_type;
pub mod user;
