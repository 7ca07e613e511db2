//! HTTP-level integration tests for likes and the novel like counter.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, register_user, seed_novel, test_app,
};

#[tokio::test]
async fn like_toggle_moves_counter_once() {
    let (app, storage) = test_app();
    let novel_id = seed_novel(storage.as_ref(), "Beloved").await;
    let json = register_user(app.clone(), "superfan").await;
    let token = json["accessToken"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "novelId": novel_id });
    let response = post_json_auth(app.clone(), "/api/likes", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), &format!("/api/novels/{novel_id}")).await;
    assert_eq!(body_json(response).await["likes"], 1);

    // Liking again is accepted but does not double-count.
    let response = post_json_auth(app.clone(), "/api/likes", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = get(app.clone(), &format!("/api/novels/{novel_id}")).await;
    assert_eq!(body_json(response).await["likes"], 1);

    let response = get_auth(
        app.clone(),
        &format!("/api/novels/{novel_id}/is-liked"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["isLiked"], true);

    // Unlike drops the counter back to zero.
    let response = delete_auth(app.clone(), &format!("/api/likes/{novel_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app.clone(), &format!("/api/novels/{novel_id}")).await;
    assert_eq!(body_json(response).await["likes"], 0);

    // A second unlike is a 404 and the counter stays put.
    let response = delete_auth(app.clone(), &format!("/api/likes/{novel_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app, &format!("/api/novels/{novel_id}")).await;
    assert_eq!(body_json(response).await["likes"], 0);
}

#[tokio::test]
async fn likes_list_includes_novels() {
    let (app, storage) = test_app();
    let first = seed_novel(storage.as_ref(), "First Love").await;
    let second = seed_novel(storage.as_ref(), "Second Wind").await;
    let json = register_user(app.clone(), "lister").await;
    let token = json["accessToken"].as_str().unwrap().to_string();

    for novel_id in [first, second] {
        let body = serde_json::json!({ "novelId": novel_id });
        post_json_auth(app.clone(), "/api/likes", body, &token).await;
    }

    let response = get_auth(app, "/api/likes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let likes = body_json(response).await;
    assert_eq!(likes.as_array().unwrap().len(), 2);
    assert!(likes[0]["novel"]["title"].is_string());
}

#[tokio::test]
async fn liking_missing_novel_returns_404() {
    let (app, _storage) = test_app();
    let json = register_user(app.clone(), "shouter").await;
    let token = json["accessToken"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "novelId": 31337 });
    let response = post_json_auth(app, "/api/likes", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
