mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn only_owner_can_update() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let other = app.register().await?;
    let residential = app.category_id("Residential").await?;
    let created = app.create_property(&owner.token, residential).await?;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/properties/{id}");

    let change = json!({
        "title": "Renovated flat",
        "description": "Quiet street, new kitchen",
        "location": "Ikeja",
        "category_id": residential,
        "current_worth": 99000.0,
    });

    let (status, body) = app
        .call(Method::PUT, &uri, Some(&other.token), Some(change.clone()))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to update this property");

    let (_, unchanged) = app.call(Method::GET, &uri, None, None).await?;
    assert_eq!(unchanged["data"]["title"], "Two-bed flat");

    let (status, body) = app
        .call(Method::PUT, &uri, Some(&owner.token), Some(change))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Renovated flat");
    assert_eq!(body["data"]["current_worth"], 99000.0);
    assert_ne!(body["data"]["updated_at"], created["updated_at"]);
    Ok(())
}

#[tokio::test]
async fn update_validates_required_fields() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let land = app.category_id("Land").await?;
    let created = app.create_property(&owner.token, land).await?;

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/properties/{}", created["id"]),
            Some(&owner.token),
            Some(json!({ "title": "Only a title" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please include all required fields");
    Ok(())
}

#[tokio::test]
async fn deleting_missing_property_is_404() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let user = app.register().await?;

    let (status, body) = app
        .call(Method::DELETE, "/api/properties/2147483000", Some(&user.token), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");
    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_delete() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let intruder = app.register().await?;
    let residential = app.category_id("Residential").await?;
    let created = app.create_property(&owner.token, residential).await?;
    let id = created["id"].as_i64().unwrap() as i32;

    let (status, body) = app
        .call(Method::DELETE, &format!("/api/properties/{id}"), Some(&intruder.token), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to delete this property");

    let still_there: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1)")
        .bind(id)
        .fetch_one(&app.db)
        .await?;
    assert!(still_there);
    Ok(())
}

#[tokio::test]
async fn owner_delete_cascades() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let commercial = app.category_id("Commercial").await?;
    let created = app.create_property(&owner.token, commercial).await?;
    let id = created["id"].as_i64().unwrap() as i32;

    sqlx::query("INSERT INTO property_images (property_id, image_url, is_primary) VALUES ($1, $2, TRUE)")
        .bind(id)
        .bind("https://cdn.example.com/p.jpg")
        .execute(&app.db)
        .await?;

    let (status, body) = app
        .call(Method::DELETE, &format!("/api/properties/{id}"), Some(&owner.token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Property deleted successfully");

    let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM property_images WHERE property_id = $1")
        .bind(id)
        .fetch_one(&app.db)
        .await?;
    assert_eq!(images, 0);
    Ok(())
}

#[tokio::test]
async fn listing_filters_by_owner_and_shows_details() -> Result<()> {
    let Some(app) = common::app().await? else {
        return Ok(());
    };
    let owner = app.register().await?;
    let material = app.category_id("Material").await?;
    let first = app.create_property(&owner.token, material).await?;
    let second = app.create_property(&owner.token, material).await?;

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/properties?user_id={}&category=material", owner.id),
            None,
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], second["id"]);
    assert_eq!(body["data"][1]["id"], first["id"]);
    assert_eq!(body["data"][0]["owner_name"], "Test User");
    assert_eq!(body["data"][0]["images"], json!([]));

    let (_, page) = app
        .call(
            Method::GET,
            &format!("/api/properties?user_id={}&limit=1&offset=1", owner.id),
            None,
            None,
        )
        .await?;
    assert_eq!(page["count"], 1);
    assert_eq!(page["data"][0]["id"], first["id"]);

    let (status, detail) = app
        .call(Method::GET, &format!("/api/properties/{}", first["id"]), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["category_name"], "Material");
    assert_eq!(detail["data"]["vote_options"].as_array().map(Vec::len), Some(4));
    Ok(())
}
