mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn option_id(app: &common::TestApp, category_id: i32, name: &str) -> Result<i32> {
    Ok(
        sqlx::query_scalar("SELECT id FROM vote_options WHERE category_id = $1 AND name = $2")
            .bind(category_id)
            .bind(name)
            .fetch_one(&app.db)
            .await?,
    )
}

#[tokio::test]
async fn second_vote_is_rejected() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let voter = app.register().await?;
    let residential = app.category_id("Residential").await?;
    let property = app.create_property(&owner.token, residential).await?;
    let buy = option_id(&app, residential, "Buy").await?;
    let hold = option_id(&app, residential, "Hold").await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/votes",
            Some(&voter.token),
            Some(json!({ "property_id": property["id"], "vote_option_id": buy })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["vote_option_id"], buy);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/votes",
            Some(&voter.token),
            Some(json!({ "property_id": property["id"], "vote_option_id": hold })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already voted for this property");

    let (_, votes) = app
        .call(
            Method::GET,
            &format!("/api/votes/property/{}", property["id"]),
            Some(&voter.token),
            None,
        )
        .await?;
    assert_eq!(votes["count"], 1);
    assert_eq!(votes["data"][0]["voter_name"], "Test User");
    assert_eq!(votes["data"][0]["vote_option_name"], "Buy");
    Ok(())
}

#[tokio::test]
async fn vote_for_missing_property_is_validation_error() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let voter = app.register().await?;
    let land = app.category_id("Land").await?;
    let farm = option_id(&app, land, "Farm").await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/votes",
            Some(&voter.token),
            Some(json!({ "property_id": 2147483000, "vote_option_id": farm })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn stats_without_votes_are_all_zero() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let land = app.category_id("Land").await?;
    let property = app.create_property(&owner.token, land).await?;

    let (status, body) = app
        .call(Method::GET, &format!("/api/properties/{}/stats", property["id"]), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_votes"], 0);
    let stats = body["data"]["statistics"].as_array().unwrap();
    assert_eq!(stats.len(), 4);
    assert!(stats.iter().all(|s| s["percentage"] == 0.0));
    Ok(())
}

#[tokio::test]
async fn stats_percentages_sum_to_hundred() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let commercial = app.category_id("Commercial").await?;
    let property = app.create_property(&owner.token, commercial).await?;
    let choices = ["Invest", "Lease", "Invest"];

    for name in choices {
        let voter = app.register().await?;
        let option = option_id(&app, commercial, name).await?;
        let (status, _) = app
            .call(
                Method::POST,
                "/api/votes",
                Some(&voter.token),
                Some(json!({ "property_id": property["id"], "vote_option_id": option })),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app
        .call(Method::GET, &format!("/api/properties/{}/stats", property["id"]), None, None)
        .await?;
    assert_eq!(body["data"]["total_votes"], 3);
    let stats = body["data"]["statistics"].as_array().unwrap();
    assert_eq!(stats[0]["option_name"], "Invest");
    assert_eq!(stats[0]["percentage"], 66.67);
    let sum: f64 = stats.iter().filter_map(|s| s["percentage"].as_f64()).sum();
    assert!((sum - 100.0).abs() <= 0.05, "sum was {sum}");
    Ok(())
}

#[tokio::test]
async fn stats_for_missing_property_is_404() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let (status, _) = app
        .call(Method::GET, "/api/properties/2147483000/stats", None, None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn platform_stats_report_recent_activity() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let residential = app.category_id("Residential").await?;
    app.create_property(&owner.token, residential).await?;

    let (status, body) = app.call(Method::GET, "/api/stats/platform", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["total_users"].as_i64().unwrap() >= 1);
    assert!(body["data"]["total_properties"].as_i64().unwrap() >= 1);
    let recent = body["data"]["recent_activity"].as_array().unwrap();
    assert!(!recent.is_empty() && recent.len() <= 5);
    assert_eq!(recent[0]["type"], "property_added");
    Ok(())
}
