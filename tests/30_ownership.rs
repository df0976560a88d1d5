mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

/// Alice owns one plant; Bob tries everything against it.
async fn setup() -> Result<(TestServer, String, String, String)> {
    let server = TestServer::spawn().await?;
    let alice = server.signup("alice@example.com", "alice").await?;
    let bob = server.signup("bob@example.com", "bobby").await?;
    let id = server.plant(&alice, "Oleander").await?;
    Ok((server, alice, bob, id))
}

#[tokio::test]
async fn foreign_plant_is_invisible() -> Result<()> {
    let (server, _alice, bob, id) = setup().await?;

    let res = server
        .client
        .get(server.url(&format!("/api/plants/{}", id)))
        .bearer_auth(&bob)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["message"], format!("Plant with id '{}' does not exist", id));
    assert!(body.get("name").is_none());

    assert!(server.plant_names(&bob, None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn foreign_plant_cannot_be_modified() -> Result<()> {
    let (server, alice, bob, id) = setup().await?;

    let water = server
        .client
        .patch(server.url(&format!("/api/plants/{}/last-watered", id)))
        .bearer_auth(&bob)
        .send()
        .await?;
    assert_eq!(water.status(), StatusCode::NOT_FOUND);

    let rename = server
        .client
        .patch(server.url(&format!("/api/plants/{}/name", id)))
        .bearer_auth(&bob)
        .json(&json!({ "name": "Stolen" }))
        .send()
        .await?;
    assert_eq!(rename.status(), StatusCode::NOT_FOUND);

    let delete = server
        .client
        .delete(server.url(&format!("/api/plants/{}", id)))
        .bearer_auth(&bob)
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    // Alice's plant is untouched
    let res = server
        .client
        .get(server.url(&format!("/api/plants/{}", id)))
        .bearer_auth(&alice)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Oleander");
    assert!(body["lastWateredAt"].is_null());
    Ok(())
}

#[tokio::test]
async fn plant_names_are_scoped_per_owner() -> Result<()> {
    let (server, alice, bob, _id) = setup().await?;

    let res = server.create_plant(&bob, "Oleander").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(server.plant_names(&alice, None).await?, ["Oleander"]);
    assert_eq!(server.plant_names(&bob, None).await?, ["Oleander"]);
    Ok(())
}
