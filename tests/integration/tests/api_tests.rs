//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn register(server: &TestServer, prefix: &str) -> AuthResponse {
    let request = RegisterRequest::named(prefix);
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_post(server: &TestServer, token: &str, title: &str) -> PostResponse {
    let response = server
        .post_auth("/posts", token, &CreatePostRequest::titled(title))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn follow(server: &TestServer, token: &str, user_id: &str) -> FollowToggleResponse {
    let response = server
        .post_auth(
            &format!("/users/{user_id}/follow"),
            token,
            &FollowToggleRequest {
                is_following: false,
            },
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.full_name, request.full_name);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "short".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["password"].is_array());
}

#[tokio::test]
async fn test_login_and_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, register_req.username);

    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post("/auth/refresh", &refresh_req).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);
    assert!(!refreshed.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, "refresh").await;

    let response = server
        .post(
            "/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.access_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_followed_post_reaches_feed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alex = register(&server, "alex").await;
    let sarah = register(&server, "sarah").await;

    // Warm alex's cached first page so the post below must invalidate it
    let response = server.get_auth("/feed", &alex.access_token).await.unwrap();
    let before: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(before.is_empty());

    let followed = follow(&server, &alex.access_token, &sarah.user.id).await;
    assert!(followed.following);

    let post = create_post(&server, &sarah.access_token, "Hamilton").await;
    assert_eq!(post.profile.username, sarah.user.username);
    assert_eq!(post.likes_count, 0);
    assert!(!post.user_has_liked);

    let response = server.get_auth("/feed", &alex.access_token).await.unwrap();
    let feed: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let hamilton = feed
        .iter()
        .find(|p| p.id == post.id)
        .expect("followed author's post missing from feed");
    assert_eq!(hamilton.title, "Hamilton");
    assert_eq!(hamilton.user_id, sarah.user.id);
    assert_eq!(hamilton.profile.username, sarah.user.username);

    let response = server.get("/feed").await.unwrap();
    let anonymous: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(anonymous.is_empty());
}

#[tokio::test]
async fn test_feed_excludes_unfollowed_authors_and_is_newest_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let viewer = register(&server, "viewer").await;
    let friend = register(&server, "friend").await;
    let stranger = register(&server, "stranger").await;

    follow(&server, &viewer.access_token, &friend.user.id).await;

    let own = create_post(&server, &viewer.access_token, "Own Show").await;
    let friends = create_post(&server, &friend.access_token, "Friend Show").await;
    let strangers = create_post(&server, &stranger.access_token, "Stranger Show").await;

    let response = server.get_auth("/feed", &viewer.access_token).await.unwrap();
    let feed: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let ids: Vec<&str> = feed.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains(&own.id.as_str()));
    assert!(ids.contains(&friends.id.as_str()));
    assert!(!ids.contains(&strangers.id.as_str()));
    assert!(feed
        .iter()
        .all(|p| p.user_id == viewer.user.id || p.user_id == friend.user.id));
    assert!(feed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_feed_pagination_cursor() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, "pager").await;

    for title in ["First", "Second", "Third"] {
        create_post(&server, &user.access_token, title).await;
    }

    let response = server
        .get_auth("/feed?limit=2", &user.access_token)
        .await
        .unwrap();
    let first: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].title, "Third");

    let response = server
        .get_auth(
            &format!("/feed?limit=2&before={}", first[1].id),
            &user.access_token,
        )
        .await
        .unwrap();
    let second: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].title, "First");
}

#[tokio::test]
async fn test_feed_rejects_invalid_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_auth("/feed", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post / Like / Comment Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/posts", &CreatePostRequest::titled("Wicked"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server, "author").await;
    let fan = register(&server, "fan").await;
    let post = create_post(&server, &author.access_token, "Les Mis").await;
    let like_path = format!("/posts/{}/like", post.id);

    let response = server
        .post_auth(&like_path, &fan.access_token, &LikeToggleRequest { is_liked: false })
        .await
        .unwrap();
    let liked: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    // A duplicate "like" from a stale client keeps exactly one row
    let response = server
        .post_auth(&like_path, &fan.access_token, &LikeToggleRequest { is_liked: false })
        .await
        .unwrap();
    let again: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(again.liked);
    assert_eq!(again.likes_count, 1);

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &fan.access_token)
        .await
        .unwrap();
    let detail: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(detail.user_has_liked);
    assert_eq!(detail.likes_count, 1);

    let response = server
        .post_auth(&like_path, &fan.access_token, &LikeToggleRequest { is_liked: true })
        .await
        .unwrap();
    let unliked: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.likes_count, 0);
}

#[tokio::test]
async fn test_like_unknown_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, "liker").await;

    let response = server
        .post_auth("/posts/1/like", &user.access_token, &LikeToggleRequest { is_liked: false })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server, "poster").await;
    let commenter = register(&server, "commenter").await;
    let post = create_post(&server, &author.access_token, "Cats").await;
    let comments_path = format!("/posts/{}/comments", post.id);

    let response = server
        .post_auth(
            &comments_path,
            &commenter.access_token,
            &CreateCommentRequest {
                content: "   ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    for content in ["  Loved it  ", "Second act dragged"] {
        let response = server
            .post_auth(
                &comments_path,
                &commenter.access_token,
                &CreateCommentRequest {
                    content: content.to_string(),
                },
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get(&comments_path).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Loved it");
    assert_eq!(comments[1].content, "Second act dragged");
    assert_eq!(comments[0].profile.username, commenter.user.username);

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &author.access_token)
        .await
        .unwrap();
    let detail: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.comments_count, 2);
}

// ============================================================================
// Profile / Follow Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, "me").await;

    let response = server
        .get_auth("/users/@me", &auth.access_token)
        .await
        .unwrap();
    let user: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.username, auth.user.username);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_profile_settings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, "settings").await;

    let update = UpdateProfileRequest {
        bio: Some("Front row or nothing".to_string()),
        avatar_url: Some("https://images.example.com/me.png".to_string()),
        ..UpdateProfileRequest::default()
    };
    let response = server
        .patch_auth("/users/@me", &auth.access_token, &update)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Front row or nothing"));
    assert_eq!(profile.username, auth.user.username);

    let clear = UpdateProfileRequest {
        bio: Some(String::new()),
        ..UpdateProfileRequest::default()
    };
    let response = server
        .patch_auth("/users/@me", &auth.access_token, &clear)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(profile.bio.is_none());
    assert!(profile.avatar_url.is_some());
}

#[tokio::test]
async fn test_follow_toggle_and_profile_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alex = register(&server, "alex").await;
    let sarah = register(&server, "sarah").await;

    let followed = follow(&server, &alex.access_token, &sarah.user.id).await;
    assert!(followed.following);
    assert_eq!(
        followed.stats,
        FollowStatsResponse {
            followers: 1,
            following: 0
        }
    );

    let response = server
        .get_auth(&format!("/users/{}", sarah.user.id), &alex.access_token)
        .await
        .unwrap();
    let page: ProfilePageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.is_following);
    assert_eq!(page.profile.username, sarah.user.username);
    assert_eq!(page.stats.followers, 1);

    let response = server
        .get(&format!("/users/{}/followers", sarah.user.id))
        .await
        .unwrap();
    let followers: Vec<UserSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, alex.user.id);

    let response = server
        .get(&format!("/users/{}/following", alex.user.id))
        .await
        .unwrap();
    let following: Vec<UserSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].username, sarah.user.username);

    let response = server
        .post_auth(
            &format!("/users/{}/follow", sarah.user.id),
            &alex.access_token,
            &FollowToggleRequest { is_following: true },
        )
        .await
        .unwrap();
    let unfollowed: FollowToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!unfollowed.following);
    assert_eq!(unfollowed.stats.followers, 0);

    let response = server
        .get(&format!("/users/{}/follow-stats", sarah.user.id))
        .await
        .unwrap();
    let stats: FollowStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.followers, 0);
}

#[tokio::test]
async fn test_self_follow_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, "narcissus").await;

    let response = server
        .post_auth(
            &format!("/users/{}/follow", auth.user.id),
            &auth.access_token,
            &FollowToggleRequest {
                is_following: false,
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_FOLLOW_SELF");

    let response = server
        .get(&format!("/users/{}/follow-stats", auth.user.id))
        .await
        .unwrap();
    let stats: FollowStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.followers, 0);
    assert_eq!(stats.following, 0);
}

#[tokio::test]
async fn test_user_posts_and_my_tickets() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, "ticketholder").await;
    let post = create_post(&server, &auth.access_token, "Phantom").await;

    let response = server
        .get_auth("/users/@me/posts", &auth.access_token)
        .await
        .unwrap();
    let mine: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, post.id);

    let response = server
        .get(&format!("/users/{}/posts", auth.user.id))
        .await
        .unwrap();
    let public: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.len(), 1);
    assert!(!public[0].user_has_liked);
}

#[tokio::test]
async fn test_unknown_user_and_bad_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/1").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_USER");

    let response = server.get("/users/not-a-number/posts").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}
