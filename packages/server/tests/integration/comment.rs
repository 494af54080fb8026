use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn comment_is_stamped_by_the_server() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({
                    "recipe_id": recipe_id,
                    "content": "Fluffy!",
                    "created_at": "1999-01-01T00:00:00Z",
                }),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["content"], "Fluffy!");
        assert_eq!(res.body["author_id"], bob.id.as_str());
        assert_eq!(res.body["author_name"], "Bob Tester");
        let created_at = res.body["created_at"].as_str().unwrap();
        assert!(!created_at.starts_with("1999"), "client timestamp was kept: {created_at}");
    }

    #[tokio::test]
    async fn unknown_recipe_is_rejected_and_nothing_is_inserted() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;

        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({"recipe_id": 999, "content": "Hello?"}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "REFERENCE_NOT_FOUND");

        let all = app.get_without_token(routes::COMMENTS).await;
        assert_eq!(all.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_author_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({"recipe_id": recipe_id, "content": "Hi", "author_id": "ghost"}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "REFERENCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn cannot_comment_on_behalf_of_another_user() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({"recipe_id": recipe_id, "content": "Says Alice", "author_id": alice.id}),
                &bob.token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let all = app.get_without_token(routes::COMMENTS).await;
        assert_eq!(all.body, json!([]));
    }

    #[tokio::test]
    async fn blank_content_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({"recipe_id": recipe_id, "content": "   "}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn commenting_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::COMMENTS, &json!({"recipe_id": 1, "content": "Hi"}))
            .await;

        assert_eq!(res.status, 401);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn comments_on_a_recipe_come_oldest_first() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let pancakes = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        let waffles = app.create_recipe(&alice.token, "Waffles", &["flour"], &[]).await;
        let first = app.create_comment(&bob.token, pancakes, "First").await;
        app.create_comment(&bob.token, waffles, "Elsewhere").await;
        let second = app.create_comment(&alice.token, pancakes, "Second").await;

        let res = app.get_without_token(&routes::recipe_comments(pancakes)).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64, second as i64]);

        let all = app.get_without_token(routes::COMMENTS).await;
        assert_eq!(all.body.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn recipe_without_comments_is_distinguishable_from_missing_recipe() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;

        let empty = app.get_without_token(&routes::recipe_comments(recipe_id)).await;
        let missing = app.get_without_token(&routes::recipe_comments(999)).await;

        assert_eq!(empty.status, 404);
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["message"], "Recipe not found");
        assert_ne!(empty.body["message"], missing.body["message"]);
    }

    #[tokio::test]
    async fn missing_comment_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::comment(5)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod editing {
    use super::*;

    #[tokio::test]
    async fn author_can_edit_content() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        let id = app.create_comment(&alice.token, recipe_id, "Tpyo").await;
        let before = app.get_without_token(&routes::comment(id)).await;

        let res = app
            .patch_with_token(&routes::comment(id), &json!({"content": "Typo"}), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["content"], "Typo");
        assert_eq!(res.body["created_at"], before.body["created_at"]);
    }

    #[tokio::test]
    async fn others_cannot_edit_or_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let bob = app.create_user("bob", "Bob").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        let id = app.create_comment(&alice.token, recipe_id, "Mine").await;

        let edit = app
            .patch_with_token(&routes::comment(id), &json!({"content": "Ours"}), &bob.token)
            .await;
        assert_eq!(edit.status, 403);
        assert_eq!(edit.body["code"], "PERMISSION_DENIED");

        let delete = app.delete_with_token(&routes::comment(id), &bob.token).await;
        assert_eq!(delete.status, 403);
    }

    #[tokio::test]
    async fn author_can_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice", "Alice").await;
        let recipe_id = app.create_recipe(&alice.token, "Pancakes", &["flour"], &[]).await;
        let id = app.create_comment(&alice.token, recipe_id, "Mine").await;

        let res = app.delete_with_token(&routes::comment(id), &alice.token).await;
        assert_eq!(res.status, 204);

        let again = app.delete_with_token(&routes::comment(id), &alice.token).await;
        assert_eq!(again.status, 404);
    }
}
