//! HTTP-level integration tests for the novel catalog endpoints.

mod common;

use axum::http::StatusCode;
use novelverse_db::Storage;
use common::{
    body_json, delete_auth, get, post_json_auth, put_json_auth, register_user, seed_admin,
    seed_chapter, seed_novel, test_app,
};

fn novel_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "author": "Ana Author",
        "description": "An epic.",
        "genre": "Fantasy",
        "tags": ["dragons", "war"],
    })
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_novel_requires_token() {
    let (app, _storage) = test_app();
    let response = common::post_json(app, "/api/novels", novel_body("Nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_novel_requires_admin() {
    let (app, _storage) = test_app();
    let json = register_user(app.clone(), "plainreader").await;
    let token = json["accessToken"].as_str().unwrap().to_string();

    let response = post_json_auth(app, "/api/novels", novel_body("Nope"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_creates_and_reads_novel() {
    let (app, storage) = test_app();
    let (admin, token) = seed_admin(storage.as_ref()).await;

    let response = post_json_auth(app.clone(), "/api/novels", novel_body("Emberfall"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["title"], "Emberfall");
    assert_eq!(created["createdBy"], admin.id);
    assert_eq!(created["rating"], 0);
    assert_eq!(created["likes"], 0);

    let id = created["id"].as_i64().unwrap();
    let response = get(app, &format!("/api/novels/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["title"], "Emberfall");
    assert_eq!(fetched["genre"], "Fantasy");
}

#[tokio::test]
async fn get_unknown_novel_returns_404() {
    let (app, _storage) = test_app();
    let response = get(app, "/api/novels/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_novel_validates_title() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;

    let mut body = novel_body("x");
    body["title"] = serde_json::json!("");
    let response = post_json_auth(app, "/api/novels", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_novel_is_partial() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;
    let id = seed_novel(storage.as_ref(), "Before").await;

    let body = serde_json::json!({ "title": "After", "isFeatured": true });
    let response = put_json_auth(app, &format!("/api/novels/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "After");
    assert_eq!(json["isFeatured"], true);
    assert_eq!(json["author"], "Seed Author");
}

#[tokio::test]
async fn delete_novel_cascades_and_404s_after() {
    let (app, storage) = test_app();
    let (_admin, token) = seed_admin(storage.as_ref()).await;
    let id = seed_novel(storage.as_ref(), "Doomed").await;
    let chapter_id = seed_chapter(storage.as_ref(), id, 1).await;

    let response = delete_auth(app.clone(), &format!("/api/novels/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/novels/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app.clone(), &format!("/api/chapters/{chapter_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is a 404, not a silent success.
    let response = delete_auth(app, &format!("/api/novels/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listings and search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_novels_filters_by_genre() {
    let (app, storage) = test_app();
    seed_novel(storage.as_ref(), "Fantasy One").await;
    seed_novel(storage.as_ref(), "Fantasy Two").await;
    {
        use novelverse_db::models::novel::{CreateNovel, Genre};
        storage
            .create_novel(CreateNovel {
                title: "Spacers".to_string(),
                author: "Seed Author".to_string(),
                cover_image: None,
                description: "Seeded for tests.".to_string(),
                genre: Genre::ScienceFiction,
                tags: vec![],
                is_featured: false,
                is_trending: false,
                created_by: None,
            })
            .await
            .unwrap();
    }

    let response = get(app.clone(), "/api/novels").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

    let response = get(app.clone(), "/api/novels?genre=Fantasy").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(app, "/api/novels?genre=Fantasy&limit=1").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rails_default_to_four_results() {
    let (app, storage) = test_app();
    for i in 0..6 {
        use novelverse_db::models::novel::{CreateNovel, Genre};
        storage
            .create_novel(CreateNovel {
                title: format!("Featured {i}"),
                author: "Seed Author".to_string(),
                cover_image: None,
                description: "Seeded for tests.".to_string(),
                genre: Genre::Fantasy,
                tags: vec![],
                is_featured: true,
                is_trending: true,
                created_by: None,
            })
            .await
            .unwrap();
    }

    for uri in ["/api/novels/featured", "/api/novels/trending"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);
    }

    let response = get(app, "/api/novels/recent?limit=2").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_requires_query() {
    let (app, _storage) = test_app();

    let response = get(app.clone(), "/api/novels/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/novels/search?query=%20%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_matches_title_and_tags() {
    let (app, storage) = test_app();
    {
        use novelverse_db::models::novel::{CreateNovel, Genre};
        storage
            .create_novel(CreateNovel {
                title: "Wings of Ember".to_string(),
                author: "Seed Author".to_string(),
                cover_image: None,
                description: "Seeded for tests.".to_string(),
                genre: Genre::Fantasy,
                tags: vec!["Dragons".to_string()],
                is_featured: false,
                is_trending: false,
                created_by: None,
            })
            .await
            .unwrap();
    }
    seed_novel(storage.as_ref(), "Quiet Streets").await;

    let response = get(app.clone(), "/api/novels/search?query=drag").await;
    assert_eq!(response.status(), StatusCode::OK);
    let hits = body_json(response).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["title"], "Wings of Ember");

    let response = get(app, "/api/novels/search?query=zeppelin").await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}
