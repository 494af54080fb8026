use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn created_recipe_is_returned_as_a_raw_record() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "title": "  Chocolate Cake ",
                    "summary": "Rich",
                    "ingredients": ["flour", "cocoa"],
                    "instructions": ["Mix", "Bake"],
                    "ready_in_minutes": 60,
                    "servings": 8,
                    "dish_type_ids": [dessert],
                }),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Chocolate Cake");
        assert_eq!(res.body["author_id"], alice.id.as_str());
        assert_eq!(res.body["dish_type_ids"], json!([dessert]));
        assert_eq!(res.body["ingredients"], json!(["flour", "cocoa"]));
        assert_eq!(res.body["instructions"], json!(["Mix", "Bake"]));
    }

    #[tokio::test]
    async fn explicit_author_must_exist() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Ghost Soup", "author_id": "no-such-user"}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "REFERENCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn cannot_create_a_recipe_on_behalf_of_another_user() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Not Mine", "author_id": alice.id}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let all = app.get_without_token(routes::RECIPES).await;
        assert_eq!(all.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_dish_type_leaves_no_recipe_behind() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Half Baked", "dish_type_ids": [dessert, 999]}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "REFERENCE_NOT_FOUND");

        let all = app.get_without_token(routes::RECIPES).await;
        assert_eq!(all.body, json!([]));
    }

    #[tokio::test]
    async fn duplicate_dish_type_ids_are_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Twice", "dish_type_ids": [dessert, dessert]}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_title_and_negative_servings_are_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;

        let blank = app
            .post_with_token(routes::RECIPES, &json!({"title": "  "}), &alice.token)
            .await;
        assert_eq!(blank.status, 400);

        let negative = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Soup", "servings": -1}),
                &alice.token,
            )
            .await;
        assert_eq!(negative.status, 400);
        assert_eq!(negative.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn creating_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::RECIPES, &json!({"title": "Soup"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod reading {
    use super::*;

    #[tokio::test]
    async fn register_create_read_then_delete_author() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let main = app.create_dish_type(&alice.token, "Main").await;
        let dinner = app.create_dish_type(&alice.token, "Dinner").await;

        let created = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "title": "Lasagne",
                    "author_id": alice.id,
                    "dish_type_ids": [main, dinner],
                }),
                &alice.token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        let recipe_id = created.id();

        let res = app.get_without_token(&routes::recipe(recipe_id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["dish_type_names"], json!(["Main", "Dinner"]));
        assert_eq!(res.body["author_name"], "Alice Tester");

        assert_eq!(app.delete_with_token(routes::ME, &alice.token).await.status, 204);

        let res = app.get_without_token(&routes::recipe(recipe_id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Lasagne");
        assert_eq!(res.body["dish_type_names"], json!(["Main", "Dinner"]));
        assert!(res.body["author_name"].is_null());
    }

    #[tokio::test]
    async fn missing_recipe_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::recipe(42)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/api/v1/recipes/not-a-number").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn list_returns_every_recipe_in_id_order() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let first = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        let second = app.create_recipe(&alice.token, "Waffles", &["flour"], &[]).await;

        let res = app.get_without_token(routes::RECIPES).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64, second as i64]);
        assert_eq!(res.body[0]["dish_type_names"], json!([]));
    }

    #[tokio::test]
    async fn listing_by_author_requires_a_token_but_no_ownership() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        app.create_recipe(&bob.token, "Stew", &["beef"], &[]).await;

        let anonymous = app
            .get_without_token(&routes::recipes_by_author(&alice.id))
            .await;
        assert_eq!(anonymous.status, 401);

        let res = app
            .get_with_token(&routes::recipes_by_author(&alice.id), &bob.token)
            .await;
        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Pancakes"]);
        assert_eq!(res.body[0]["author_name"], "Alice Tester");
    }

    #[tokio::test]
    async fn listing_by_dish_type_returns_tagged_recipes() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let cake = app.create_recipe(&alice.token, "Cake", &["sugar"], &[dessert]).await;
        app.create_recipe(&alice.token, "Stew", &["beef"], &[]).await;

        let res = app
            .get_without_token(&routes::recipes_by_dish_type(dessert))
            .await;

        assert_eq!(res.status, 200);
        let recipes = res.body.as_array().unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0]["id"], cake);
        assert_eq!(recipes[0]["dish_type_ids"], json!([dessert]));
    }

    #[tokio::test]
    async fn dish_type_without_recipes_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;

        let empty = app
            .get_without_token(&routes::recipes_by_dish_type(dessert))
            .await;
        assert_eq!(empty.status, 404);

        let missing = app.get_without_token(&routes::recipes_by_dish_type(999)).await;
        assert_eq!(missing.status, 404);
        assert_ne!(empty.body["message"], missing.body["message"]);
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn matches_title_and_ingredients_case_insensitively() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let cake = app
            .create_recipe(&alice.token, "Chocolate Cake", &["flour", "cocoa"], &[])
            .await;
        let cookies = app
            .create_recipe(&alice.token, "Cookies", &["butter", "chocolate chips"], &[])
            .await;
        app.create_recipe(&alice.token, "Stew", &["beef"], &[]).await;

        let res = app.get_without_token(&routes::search("CHOC")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![cake as i64, cookies as i64]);
        assert!(res.body[0]["dish_type_ids"].is_array());
    }

    #[tokio::test]
    async fn blank_term_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let empty = app.get_without_token(&routes::search("")).await;
        assert_eq!(empty.status, 400);
        assert_eq!(empty.body["code"], "VALIDATION_ERROR");

        let spaces = app.get_without_token(&routes::search("%20%20")).await;
        assert_eq!(spaces.status, 400);

        let absent = app.get_without_token("/api/v1/recipes/search").await;
        assert_eq!(absent.status, 400);
    }

    #[tokio::test]
    async fn no_match_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let res = app.get_without_token(&routes::search("xyz-no-match")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod updating {
    use super::*;

    #[tokio::test]
    async fn title_only_update_keeps_everything_else() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let id = app
            .create_recipe(&alice.token, "Cake", &["flour", "sugar"], &[dessert])
            .await;

        let res = app
            .patch_with_token(&routes::recipe(id), &json!({"title": "New Title"}), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "New Title");
        assert_eq!(res.body["servings"], 4);
        assert_eq!(res.body["ready_in_minutes"], 45);
        assert_eq!(res.body["ingredients"], json!(["flour", "sugar"]));
        assert_eq!(res.body["dish_type_ids"], json!([dessert]));
    }

    #[tokio::test]
    async fn explicit_zero_overwrites() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let id = app.create_recipe(&alice.token, "Salad", &["lettuce"], &[]).await;

        let res = app
            .patch_with_token(
                &routes::recipe(id),
                &json!({"ready_in_minutes": 0}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["ready_in_minutes"], 0);
        assert_eq!(res.body["servings"], 4);
    }

    #[tokio::test]
    async fn empty_dish_type_list_clears_associations() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let snack = app.create_dish_type(&alice.token, "Snack").await;
        let id = app
            .create_recipe(&alice.token, "Brownies", &["cocoa"], &[dessert, snack])
            .await;

        let res = app
            .patch_with_token(&routes::recipe(id), &json!({"dish_type_ids": []}), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["dish_type_ids"], json!([]));

        let by_type = app.get_without_token(&routes::recipes_by_dish_type(dessert)).await;
        assert_eq!(by_type.status, 404);
    }

    #[tokio::test]
    async fn dish_type_list_replaces_the_set() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let snack = app.create_dish_type(&alice.token, "Snack").await;
        let id = app.create_recipe(&alice.token, "Brownies", &["cocoa"], &[dessert]).await;

        let res = app
            .patch_with_token(
                &routes::recipe(id),
                &json!({"dish_type_ids": [snack]}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["dish_type_ids"], json!([snack]));
    }

    #[tokio::test]
    async fn failed_relink_rolls_back_the_whole_update() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let id = app.create_recipe(&alice.token, "Brownies", &["cocoa"], &[dessert]).await;

        let res = app
            .patch_with_token(
                &routes::recipe(id),
                &json!({"title": "Blondies", "dish_type_ids": [999]}),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "REFERENCE_NOT_FOUND");

        let after = app.get_without_token(&routes::recipe(id)).await;
        assert_eq!(after.body["title"], "Brownies");
        assert_eq!(after.body["dish_type_names"], json!(["Dessert"]));
    }

    #[tokio::test]
    async fn empty_patch_returns_the_stored_recipe() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let id = app.create_recipe(&alice.token, "Toast", &["bread"], &[]).await;

        let res = app
            .patch_with_token(&routes::recipe(id), &json!({}), &alice.token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Toast");
    }

    #[tokio::test]
    async fn updating_a_missing_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;

        let res = app
            .patch_with_token(&routes::recipe(404), &json!({"title": "x"}), &alice.token)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn only_the_author_may_update() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let id = app.create_recipe(&alice.token, "Toast", &["bread"], &[]).await;

        let res = app
            .patch_with_token(&routes::recipe(id), &json!({"title": "Bob's Toast"}), &bob.token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn orphaned_recipe_may_be_curated_by_anyone() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let id = app.create_recipe(&alice.token, "Toast", &["bread"], &[]).await;
        assert_eq!(app.delete_with_token(routes::ME, &alice.token).await.status, 204);

        let res = app
            .patch_with_token(&routes::recipe(id), &json!({"title": "Better Toast"}), &bob.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["author_id"].is_null());
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_removes_comments_but_keeps_dish_types_and_users() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let dessert = app.create_dish_type(&alice.token, "Dessert").await;
        let id = app.create_recipe(&alice.token, "Cake", &["flour"], &[dessert]).await;
        let comment = app.create_comment(&bob.token, id, "Yum").await;

        let res = app.delete_with_token(&routes::recipe(id), &alice.token).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get_without_token(&routes::recipe(id)).await.status, 404);
        assert_eq!(app.get_without_token(&routes::comment(comment)).await.status, 404);
        assert_eq!(app.get_without_token(&routes::dish_type(dessert)).await.status, 200);
        assert_eq!(app.get_with_token(routes::ME, &bob.token).await.status, 200);
    }

    #[tokio::test]
    async fn deleting_a_missing_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;

        let res = app.delete_with_token(&routes::recipe(7), &alice.token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn only_the_author_may_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let id = app.create_recipe(&alice.token, "Cake", &["flour"], &[]).await;

        let res = app.delete_with_token(&routes::recipe(id), &bob.token).await;

        assert_eq!(res.status, 403);
        assert_eq!(app.get_without_token(&routes::recipe(id)).await.status, 200);
    }
}
