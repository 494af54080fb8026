use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{auth, comment, dish_type, recipe, user};
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/recipes", recipe_routes())
        .nest("/comments", comment_routes())
        .nest("/dish-types", dish_type_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(user::me, user::update_me, user::delete_me))
}

fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(recipe::list_recipes, recipe::create_recipe))
        .routes(routes!(recipe::search_recipes))
        .routes(routes!(recipe::list_recipes_by_author))
        .routes(routes!(recipe::list_recipes_by_dish_type))
        .routes(routes!(
            recipe::get_recipe,
            recipe::update_recipe,
            recipe::delete_recipe
        ))
        .routes(routes!(recipe::list_recipe_comments))
}

fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(comment::list_comments, comment::create_comment))
        .routes(routes!(
            comment::get_comment,
            comment::update_comment,
            comment::delete_comment
        ))
}

fn dish_type_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            dish_type::list_dish_types,
            dish_type::create_dish_type
        ))
        .routes(routes!(
            dish_type::get_dish_type,
            dish_type::update_dish_type,
            dish_type::delete_dish_type
        ))
}
