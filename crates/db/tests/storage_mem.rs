//! Behavioral tests for the in-memory storage implementation.
//!
//! These pin down the storage contract (aggregate maintenance, idempotent
//! toggles, cascades, upserts) that the PostgreSQL implementation mirrors.

use assert_matches::assert_matches;
use novelverse_db::models::bookmark::CreateBookmark;
use novelverse_db::models::chapter::CreateChapter;
use novelverse_db::models::comment::CreateComment;
use novelverse_db::models::like::CreateLike;
use novelverse_db::models::novel::{CreateNovel, Genre, NovelFilter, UpdateNovel};
use novelverse_db::models::reading_history::CreateReadingHistory;
use novelverse_db::models::session::CreateSession;
use novelverse_db::models::user::CreateUser;
use novelverse_db::models::user_settings::UpdateUserSettings;
use novelverse_db::{MemStorage, Storage};

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        email: format!("{username}@example.com"),
        avatar: None,
        bio: None,
        is_admin: false,
    }
}

fn new_novel(title: &str, genre: Genre) -> CreateNovel {
    CreateNovel {
        title: title.to_string(),
        author: "Test Author".to_string(),
        cover_image: None,
        description: "A story worth reading.".to_string(),
        genre,
        tags: vec![],
        is_featured: false,
        is_trending: false,
        created_by: None,
    }
}

fn new_chapter(novel_id: i64, number: i32) -> CreateChapter {
    CreateChapter {
        novel_id,
        title: format!("Chapter {number}"),
        content: "Lorem ipsum.".to_string(),
        chapter_number: number,
    }
}

fn new_comment(novel_id: i64, user_id: i64, rating: i32) -> CreateComment {
    CreateComment {
        novel_id,
        user_id,
        content: "Thoughts on the latest arc.".to_string(),
        rating,
    }
}

#[tokio::test]
async fn comment_ratings_drive_novel_aggregates() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Dune Reborn", Genre::ScienceFiction))
        .await
        .unwrap();
    assert_eq!(novel.rating, 0);
    assert_eq!(novel.review_count, 0);

    storage
        .create_comment(new_comment(novel.id, user.id, 4))
        .await
        .unwrap();
    storage
        .create_comment(new_comment(novel.id, user.id, 2))
        .await
        .unwrap();
    // Unrated comment counts toward reviews but not the mean.
    storage
        .create_comment(new_comment(novel.id, user.id, 0))
        .await
        .unwrap();

    let novel = storage.get_novel(novel.id).await.unwrap().unwrap();
    assert_eq!(novel.rating, 3);
    assert_eq!(novel.review_count, 3);
}

#[tokio::test]
async fn deleting_last_rated_comment_resets_rating() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Ashfall", Genre::Fantasy))
        .await
        .unwrap();
    let comment = storage
        .create_comment(new_comment(novel.id, user.id, 5))
        .await
        .unwrap();
    assert_eq!(storage.get_novel(novel.id).await.unwrap().unwrap().rating, 5);

    assert!(storage.delete_comment(comment.id).await.unwrap());
    let novel = storage.get_novel(novel.id).await.unwrap().unwrap();
    assert_eq!(novel.rating, 0);
    assert_eq!(novel.review_count, 0);
}

#[tokio::test]
async fn like_toggle_is_idempotent_and_clamped() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("fan")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Starling", Genre::Drama))
        .await
        .unwrap();

    storage
        .create_like(CreateLike {
            user_id: user.id,
            novel_id: novel.id,
        })
        .await
        .unwrap();
    assert_eq!(storage.get_novel(novel.id).await.unwrap().unwrap().likes, 1);

    // Second like from the same user does not bump the counter.
    storage
        .create_like(CreateLike {
            user_id: user.id,
            novel_id: novel.id,
        })
        .await
        .unwrap();
    assert_eq!(storage.get_novel(novel.id).await.unwrap().unwrap().likes, 1);
    assert!(storage.is_liked(user.id, novel.id).await.unwrap());

    assert!(storage.delete_like(user.id, novel.id).await.unwrap());
    assert_eq!(storage.get_novel(novel.id).await.unwrap().unwrap().likes, 0);
    assert!(!storage.is_liked(user.id, novel.id).await.unwrap());

    // Second unlike reports nothing removed and the counter stays at 0.
    assert!(!storage.delete_like(user.id, novel.id).await.unwrap());
    assert_eq!(storage.get_novel(novel.id).await.unwrap().unwrap().likes, 0);
}

#[tokio::test]
async fn bookmark_upsert_repoints_chapter() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("The Long Road", Genre::Adventure))
        .await
        .unwrap();
    let ch1 = storage.create_chapter(new_chapter(novel.id, 1)).await.unwrap();
    let ch2 = storage.create_chapter(new_chapter(novel.id, 2)).await.unwrap();

    let first = storage
        .create_bookmark(CreateBookmark {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: Some(ch1.id),
        })
        .await
        .unwrap();
    let second = storage
        .create_bookmark(CreateBookmark {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: Some(ch2.id),
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.chapter_id, Some(ch2.id));

    let bookmarks = storage.get_bookmarks(user.id).await.unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].novel.id, novel.id);
}

#[tokio::test]
async fn deleting_novel_cascades_everywhere() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Doomed", Genre::Horror))
        .await
        .unwrap();
    let chapter = storage.create_chapter(new_chapter(novel.id, 1)).await.unwrap();
    storage
        .create_comment(new_comment(novel.id, user.id, 4))
        .await
        .unwrap();
    storage
        .create_bookmark(CreateBookmark {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: Some(chapter.id),
        })
        .await
        .unwrap();
    storage
        .create_like(CreateLike {
            user_id: user.id,
            novel_id: novel.id,
        })
        .await
        .unwrap();
    storage
        .update_reading_history(CreateReadingHistory {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: chapter.id,
            progress: 40,
        })
        .await
        .unwrap();

    assert!(storage.delete_novel(novel.id).await.unwrap());

    assert!(storage.get_novel(novel.id).await.unwrap().is_none());
    assert!(storage.get_chapter(chapter.id).await.unwrap().is_none());
    assert!(storage.get_comments(novel.id).await.unwrap().is_empty());
    assert!(storage.get_bookmarks(user.id).await.unwrap().is_empty());
    assert!(storage.get_likes(user.id).await.unwrap().is_empty());
    assert!(storage.get_reading_history(user.id).await.unwrap().is_empty());
    assert!(!storage.delete_novel(novel.id).await.unwrap());
}

#[tokio::test]
async fn reading_history_upserts_per_chapter() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Chronicle", Genre::Historical))
        .await
        .unwrap();
    let chapter = storage.create_chapter(new_chapter(novel.id, 1)).await.unwrap();

    let first = storage
        .update_reading_history(CreateReadingHistory {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: chapter.id,
            progress: 20,
        })
        .await
        .unwrap();
    let second = storage
        .update_reading_history(CreateReadingHistory {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: chapter.id,
            progress: 80,
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.progress, 80);

    let history = storage.get_reading_history(user.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].history.progress, 80);
    assert_eq!(history[0].chapter.id, chapter.id);
    assert_eq!(history[0].novel.id, novel.id);
}

#[tokio::test]
async fn search_matches_tags_case_insensitively() {
    let storage = MemStorage::new();
    let mut input = new_novel("Wings of Ember", Genre::Fantasy);
    input.tags = vec!["Dragons".to_string(), "war".to_string()];
    let novel = storage.create_novel(input).await.unwrap();
    storage
        .create_novel(new_novel("Quiet Streets", Genre::Mystery))
        .await
        .unwrap();

    let hits = storage.search_novels("drag").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, novel.id);

    // Genre text is searchable too.
    let hits = storage.search_novels("mystery").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Quiet Streets");

    assert!(storage.search_novels("zeppelin").await.unwrap().is_empty());
}

#[tokio::test]
async fn novel_listing_filters_by_genre_with_paging() {
    let storage = MemStorage::new();
    for i in 0..3 {
        storage
            .create_novel(new_novel(&format!("Fantasy {i}"), Genre::Fantasy))
            .await
            .unwrap();
    }
    storage
        .create_novel(new_novel("Noir", Genre::Mystery))
        .await
        .unwrap();

    let all = storage.get_novels(NovelFilter::default()).await.unwrap();
    assert_eq!(all.len(), 4);

    let fantasy = storage
        .get_novels(NovelFilter {
            genre: Some(Genre::Fantasy),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(fantasy.len(), 3);

    let page = storage
        .get_novels(NovelFilter {
            genre: Some(Genre::Fantasy),
            limit: Some(2),
            offset: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn featured_sorts_by_rating_then_freshness() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("critic")).await.unwrap();

    let mut low = new_novel("Mid List", Genre::Fantasy);
    low.is_featured = true;
    let low = storage.create_novel(low).await.unwrap();
    storage
        .create_comment(new_comment(low.id, user.id, 2))
        .await
        .unwrap();

    let mut high = new_novel("Front Page", Genre::Fantasy);
    high.is_featured = true;
    let high = storage.create_novel(high).await.unwrap();
    storage
        .create_comment(new_comment(high.id, user.id, 5))
        .await
        .unwrap();

    storage
        .create_novel(new_novel("Unfeatured", Genre::Fantasy))
        .await
        .unwrap();

    let featured = storage.get_featured_novels(4).await.unwrap();
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0].id, high.id);
    assert_eq!(featured[1].id, low.id);
}

#[tokio::test]
async fn chapter_mutations_refresh_novel_updated_at() {
    let storage = MemStorage::new();
    let novel = storage
        .create_novel(new_novel("Serial", Genre::Thriller))
        .await
        .unwrap();
    let before = storage.get_novel(novel.id).await.unwrap().unwrap().updated_at;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    storage.create_chapter(new_chapter(novel.id, 1)).await.unwrap();

    let after = storage.get_novel(novel.id).await.unwrap().unwrap().updated_at;
    assert!(after > before);
}

#[tokio::test]
async fn deleting_chapter_scrubs_pointers() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    let novel = storage
        .create_novel(new_novel("Two Parter", Genre::Romance))
        .await
        .unwrap();
    let ch1 = storage.create_chapter(new_chapter(novel.id, 1)).await.unwrap();
    let ch2 = storage.create_chapter(new_chapter(novel.id, 2)).await.unwrap();
    storage
        .create_bookmark(CreateBookmark {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: Some(ch1.id),
        })
        .await
        .unwrap();
    storage
        .update_reading_history(CreateReadingHistory {
            user_id: user.id,
            novel_id: novel.id,
            chapter_id: ch1.id,
            progress: 10,
        })
        .await
        .unwrap();

    assert!(storage.delete_chapter(ch1.id).await.unwrap());

    assert!(storage.get_bookmarks(user.id).await.unwrap().is_empty());
    assert!(storage.get_reading_history(user.id).await.unwrap().is_empty());
    let remaining = storage.get_chapters(novel.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ch2.id);
}

#[tokio::test]
async fn settings_upsert_fills_defaults_then_patches() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    assert!(storage.get_user_settings(user.id).await.unwrap().is_none());

    let created = storage
        .update_user_settings(
            user.id,
            UpdateUserSettings {
                font_size: Some(22),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.font_size, 22);
    assert_eq!(created.theme, "dark");
    assert_eq!(created.font_family, "serif");
    assert_eq!(created.line_spacing, 150);

    let patched = storage
        .update_user_settings(
            user.id,
            UpdateUserSettings {
                theme: Some("light".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.theme, "light");
    // Untouched fields survive the patch.
    assert_eq!(patched.font_size, 22);
}

#[tokio::test]
async fn sessions_expire_and_revoke() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();

    let live = storage
        .create_session(CreateSession {
            user_id: user.id,
            refresh_token_hash: "digest-live".to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::days(30),
        })
        .await
        .unwrap();
    storage
        .create_session(CreateSession {
            user_id: user.id,
            refresh_token_hash: "digest-expired".to_string(),
            expires_at: chrono::Utc::now() - chrono::Duration::hours(1),
        })
        .await
        .unwrap();

    assert_matches!(
        storage
            .find_session_by_token_hash("digest-live")
            .await
            .unwrap(),
        Some(session) if session.user_id == user.id
    );
    assert_matches!(
        storage
            .find_session_by_token_hash("digest-expired")
            .await
            .unwrap(),
        None
    );

    assert!(storage.revoke_session(live.id).await.unwrap());
    assert_matches!(
        storage
            .find_session_by_token_hash("digest-live")
            .await
            .unwrap(),
        None
    );
    // Already revoked.
    assert!(!storage.revoke_session(live.id).await.unwrap());
}

#[tokio::test]
async fn revoking_all_sessions_counts_only_live_ones() {
    let storage = MemStorage::new();
    let user = storage.create_user(new_user("reader")).await.unwrap();
    for i in 0..3 {
        storage
            .create_session(CreateSession {
                user_id: user.id,
                refresh_token_hash: format!("digest-{i}"),
                expires_at: chrono::Utc::now() + chrono::Duration::days(30),
            })
            .await
            .unwrap();
    }

    assert_eq!(storage.revoke_all_sessions_for_user(user.id).await.unwrap(), 3);
    assert_eq!(storage.revoke_all_sessions_for_user(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn novel_update_is_partial() {
    let storage = MemStorage::new();
    let novel = storage
        .create_novel(new_novel("Draft", Genre::Poetry))
        .await
        .unwrap();

    let updated = storage
        .update_novel(
            novel.id,
            UpdateNovel {
                title: Some("Final".to_string()),
                views: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.views, 7);
    assert_eq!(updated.author, novel.author);
    assert_eq!(updated.genre, Genre::Poetry);

    assert!(storage
        .update_novel(9999, UpdateNovel::default())
        .await
        .unwrap()
        .is_none());
}
