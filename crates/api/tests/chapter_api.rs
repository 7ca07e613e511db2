//! HTTP-level integration tests for chapter endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_json_auth, put_json_auth, seed_admin, seed_chapter,
    seed_novel, test_app,
};

fn chapter_body(number: i32) -> serde_json::Value {
    serde_json::json!({
        "title": format!("Chapter {number}"),
        "content": "It was a dark and stormy night.",
        "chapterNumber": number,
    })
}

#[tokio::test]
async fn create_and_list_chapters_in_order() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;
    let novel_id = seed_novel(storage.as_ref(), "Serial").await;

    // Create out of order; listing sorts by chapter number.
    for number in [2, 1, 3] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/novels/{novel_id}/chapters"),
            chapter_body(number),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, &format!("/api/novels/{novel_id}/chapters")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let chapters = body_json(response).await;
    let numbers: Vec<i64> = chapters
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["chapterNumber"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn create_chapter_on_missing_novel_returns_404() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;

    let response =
        post_json_auth(app, "/api/novels/9999/chapters", chapter_body(1), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_chapter_requires_admin() {
    let (app, storage) = test_app();
    let novel_id = seed_novel(storage.as_ref(), "Guarded").await;
    let json = common::register_user(app.clone(), "reader").await;
    let token = json["accessToken"].as_str().unwrap().to_string();

    let response = post_json_auth(
        app,
        &format!("/api/novels/{novel_id}/chapters"),
        chapter_body(1),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn get_update_delete_chapter() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;
    let novel_id = seed_novel(storage.as_ref(), "Editable").await;
    let chapter_id = seed_chapter(storage.as_ref(), novel_id, 1).await;

    let response = get(app.clone(), &format!("/api/chapters/{chapter_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let chapter = body_json(response).await;
    assert_eq!(chapter["novelId"], novel_id);

    let body = serde_json::json!({ "title": "Revised" });
    let response =
        put_json_auth(app.clone(), &format!("/api/chapters/{chapter_id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Revised");

    let response = delete_auth(app.clone(), &format!("/api/chapters/{chapter_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/chapters/{chapter_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chapter_validation_rejects_zero_number() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;
    let novel_id = seed_novel(storage.as_ref(), "Strict").await;

    let response = post_json_auth(
        app,
        &format!("/api/novels/{novel_id}/chapters"),
        chapter_body(0),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
