mod common;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::{header::LOCATION, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn create_plant_returns_location() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    let res = server.create_plant(&token, "Oleander").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();

    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Oleander");
    assert!(body["lastWateredAt"].is_null());
    assert_eq!(location, format!("/api/plants/{}", body["id"].as_str().unwrap_or_default()));

    // The location resolves to the same plant
    let res = server.client.get(server.url(&location)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, body);
    Ok(())
}

#[tokio::test]
async fn duplicate_plant_name_conflicts() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    assert_eq!(server.create_plant(&token, "Oleander").await?.status(), StatusCode::CREATED);

    let res = server.create_plant(&token, "Oleander").await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Plant 'Oleander' already exists");
    Ok(())
}

#[tokio::test]
async fn blank_plant_name_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    for name in ["", "   "] {
        let res = server.create_plant(&token, name).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = server
        .client
        .post(server.url("/api/plants"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(server.plant_names(&token, None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_sorts_by_name() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    for name in ["Paproć", "Mięta", "Oleander"] {
        server.plant(&token, name).await?;
    }

    assert_eq!(server.plant_names(&token, None).await?, ["Mięta", "Oleander", "Paproć"]);
    assert_eq!(server.plant_names(&token, Some("name,asc")).await?, ["Mięta", "Oleander", "Paproć"]);
    assert_eq!(server.plant_names(&token, Some("name,desc")).await?, ["Paproć", "Oleander", "Mięta"]);
    assert_eq!(server.plant_names(&token, Some("name")).await?, ["Mięta", "Oleander", "Paproć"]);
    assert_eq!(server.plant_names(&token, Some("name,DESC")).await?, ["Paproć", "Oleander", "Mięta"]);
    Ok(())
}

#[tokio::test]
async fn list_sorts_by_last_watered() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    let fern = server.plant(&token, "Fern").await?;
    server.plant(&token, "Cactus").await?;
    let mint = server.plant(&token, "Mint").await?;

    for id in [&mint, &fern] {
        let res = server
            .client
            .patch(server.url(&format!("/api/plants/{}/last-watered", id)))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Never-watered plants go last ascending and first descending
    assert_eq!(server.plant_names(&token, Some("lastWateredAt,asc")).await?, ["Mint", "Fern", "Cactus"]);
    assert_eq!(server.plant_names(&token, Some("last_watered_at,desc")).await?, ["Cactus", "Fern", "Mint"]);
    Ok(())
}

#[tokio::test]
async fn invalid_sort_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    for sort in ["color", "name,sideways", "password_hash,asc"] {
        let res = server.list_plants(&token, Some(sort)).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "sort={}", sort);

        let body: Value = res.json().await?;
        assert!(body["field_errors"].get("sort").is_some());
    }
    Ok(())
}

#[tokio::test]
async fn water_sets_server_time() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;
    let id = server.plant(&token, "Oleander").await?;

    let before = Utc::now();
    let res = server
        .client
        .patch(server.url(&format!("/api/plants/{}/last-watered", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let after = Utc::now();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    let watered: DateTime<Utc> = body["lastWateredAt"].as_str().unwrap_or_default().parse()?;
    assert!(watered >= before && watered <= after, "{} not in [{}, {}]", watered, before, after);
    Ok(())
}

#[tokio::test]
async fn water_unknown_plant_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;
    let id = uuid::Uuid::new_v4();

    let res = server
        .client
        .patch(server.url(&format!("/api/plants/{}/last-watered", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["message"], format!("Plant with id '{}' does not exist", id));
    Ok(())
}

#[tokio::test]
async fn rename_plant() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;
    let id = server.plant(&token, "Oleander").await?;
    server.plant(&token, "Monstera").await?;

    let rename = |name: &'static str| {
        server
            .client
            .patch(server.url(&format!("/api/plants/{}/name", id)))
            .bearer_auth(&token)
            .json(&json!({ "name": name }))
            .send()
    };

    let res = rename("Ficus").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Ficus");
    assert_eq!(body["id"], id.as_str());

    assert_eq!(rename("Monstera").await?.status(), StatusCode::CONFLICT);
    assert_eq!(rename("Ox").await?.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rename("   ").await?.status(), StatusCode::BAD_REQUEST);

    assert_eq!(server.plant_names(&token, None).await?, ["Ficus", "Monstera"]);
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;
    let id = server.plant(&token, "Oleander").await?;
    let url = server.url(&format!("/api/plants/{}", id));

    let first = server.client.delete(&url).bearer_auth(&token).send().await?;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = server.client.delete(&url).bearer_auth(&token).send().await?;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let get = server.client.get(&url).bearer_auth(&token).send().await?;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_uuid_id_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("alice@example.com", "alice").await?;

    let res = server
        .client
        .delete(server.url("/api/plants/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .get(server.url("/api/plants/42"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
