//! Harness for end-to-end tests against a real PostgreSQL.
//!
//! Set `TEST_DATABASE_URL` to run them; without it every test returns early.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mipripity::{
    app::build_app,
    config::{AppConfig, JwtConfig},
    db,
    prospects::analysis::RandomAnalyzer,
    state::AppState,
};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: PgPool,
}

pub struct Registered {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// `None` when `TEST_DATABASE_URL` is not set.
pub async fn app() -> Result<Option<TestApp>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return Ok(None);
    };

    let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
    db::run_migrations(&pool).await?;

    let config = Arc::new(AppConfig {
        database_url: url,
        db_max_connections: 5,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: None,
        jwt: JwtConfig {
            secret: "integration-secret".into(),
            issuer: "mipripity-test".into(),
            audience: "mipripity-test-users".into(),
            ttl_minutes: 10,
        },
    });
    let state = AppState::from_parts(pool.clone(), config, Arc::new(RandomAnalyzer));

    Ok(Some(TestApp {
        router: build_app(state),
        db: pool,
    }))
}

pub fn unique_email() -> String {
    let tag: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    format!("user-{}@example.com", tag.to_lowercase())
}

impl TestApp {
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let res = self.router.clone().oneshot(req.body(body)?).await?;
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    pub async fn register(&self) -> Result<Registered> {
        let email = unique_email();
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "first_name": "Test",
                    "last_name": "User",
                    "email": email,
                    "password": "correct horse battery",
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {body}");
        Ok(Registered {
            id: body["data"]["user"]["id"].as_i64().unwrap_or_default(),
            email,
            token: body["data"]["token"].as_str().unwrap_or_default().to_string(),
        })
    }

    pub async fn category_id(&self, name: &str) -> Result<i32> {
        Ok(sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_one(&self.db)
            .await?)
    }

    pub async fn create_property(&self, token: &str, category_id: i32) -> Result<Value> {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/properties",
                Some(token),
                Some(json!({
                    "title": "Two-bed flat",
                    "description": "Quiet street",
                    "location": "Ikeja",
                    "category_id": category_id,
                    "current_worth": 85000.5,
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create failed: {body}");
        Ok(body["data"].clone())
    }
}
