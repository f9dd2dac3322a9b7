mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn register_missing_field_creates_no_row() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let email = common::unique_email();

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "first_name": "A", "email": email, "password": "pw" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter all required fields");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.db)
        .await?;
    assert_eq!(rows, 0);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let first = app.register().await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "first_name": "Other",
                "last_name": "Person",
                "email": first.email.to_uppercase(),
                "password": "another",
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&first.email)
        .fetch_one(&app.db)
        .await?;
    assert_eq!(rows, 1);
    Ok(())
}

#[tokio::test]
async fn login_token_resolves_to_same_user() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let user = app.register().await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": "correct horse battery" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["user"].get("password_hash").is_none());
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, me) = app.call(Method::GET, "/api/auth/me", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["user"]["id"].as_i64(), Some(user.id));
    Ok(())
}

#[tokio::test]
async fn wrong_password_gets_no_token() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let user = app.register().await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": "nope" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn profile_update_is_self_only() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let alice = app.register().await?;
    let bob = app.register().await?;

    let update = json!({ "first_name": "Bobby", "last_name": "Tables", "email": bob.email });
    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}", bob.id),
            Some(&alice.token),
            Some(update.clone()),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}", bob.id),
            Some(&bob.token),
            Some(update),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Bobby");

    let taken = json!({ "first_name": "Bob", "last_name": "B", "email": alice.email });
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}", bob.id),
            Some(&bob.token),
            Some(taken),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already in use");
    Ok(())
}

#[tokio::test]
async fn token_of_deleted_user_is_rejected() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let user = app.register().await?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id as i32)
        .execute(&app.db)
        .await?;

    let (status, body) = app
        .call(Method::GET, "/api/auth/me", Some(&user.token), None)
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not authorized, user not found");
    Ok(())
}
