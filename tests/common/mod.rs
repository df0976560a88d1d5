#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use plant_tracker::config::AppConfig;
use plant_tracker::database::Store;
use plant_tracker::{app, AppState};

pub const PASSWORD: &str = "password123";

/// The real router over a fresh in-memory store, one per test.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::for_tests();
        config.server.port = port;

        let listener = TcpListener::bind(config.bind_addr())
            .await
            .context("failed to bind test listener")?;
        let router = app(AppState::new(config, Store::memory()));

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "email": email, "username": username, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    /// Register a user and return its token.
    pub async fn signup(&self, email: &str, username: &str) -> Result<String> {
        let res = self.register(email, username, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body: Value = res.json().await?;
        body["jwt"]
            .as_str()
            .map(str::to_string)
            .context("register response has no jwt")
    }

    pub async fn create_plant(&self, token: &str, name: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/api/plants"))
            .bearer_auth(token)
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Ok(res)
    }

    /// Create a plant and return its id.
    pub async fn plant(&self, token: &str, name: &str) -> Result<String> {
        let res = self.create_plant(token, name).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());

        let body: Value = res.json().await?;
        body["id"].as_str().map(str::to_string).context("plant has no id")
    }

    pub async fn list_plants(&self, token: &str, sort: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url("/api/plants")).bearer_auth(token);
        if let Some(sort) = sort {
            req = req.query(&[("sort", sort)]);
        }
        Ok(req.send().await?)
    }

    pub async fn plant_names(&self, token: &str, sort: Option<&str>) -> Result<Vec<String>> {
        let res = self.list_plants(token, sort).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());

        let body: Vec<Value> = res.json().await?;
        Ok(body
            .iter()
            .filter_map(|p| p["name"].as_str().map(str::to_string))
            .collect())
    }
}
