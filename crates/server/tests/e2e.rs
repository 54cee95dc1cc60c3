use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::pal::repository::mock::MockPalRepository;
use service::pal::{PalRepository, PalServiceConfig};

struct TestApp {
    base_url: String,
    repo: Arc<MockPalRepository>,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server_with(cfg: PalServiceConfig) -> anyhow::Result<TestApp> {
    let repo = Arc::new(MockPalRepository::default());
    let dyn_repo: Arc<dyn PalRepository> = repo.clone();
    let state = ServerState::new(dyn_repo, cfg);

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, repo })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(PalServiceConfig::default()).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_is_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["paths"]["/api/v1/pals/insertOne"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_insert_then_find_and_list() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/api/v1/pals/insertOne"))
        .json(&json!({ "name": "tkubm1760", "attribute": "grass", "sid": "42", "_id": "forged" }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "insert success");
    assert_eq!(body["body"]["sid"], "1");
    assert_eq!(body["body"]["attribute"], "grass");
    assert_ne!(body["body"]["_id"], "forged");

    let res = c.post(app.url("/api/v1/pals/insertOne"))
        .json(&json!({ "name": "tkuim0002" }))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["body"]["sid"], "2");
    assert_eq!(body["body"]["workCompatibility"], "");

    let res = c.get(app.url("/api/v1/pals/findByName"))
        .query(&[("name", "tkubm1760")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "find success");
    assert_eq!(body["body"]["name"], "tkubm1760");

    let res = c.get(app.url("/api/v1/pals/findAll")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["body"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn e2e_insert_next_to_existing_sid() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.repo.seed("tkuim0001", 5);

    let res = client().post(app.url("/api/v1/pals/insertOne"))
        .json(&json!({ "name": "tkubm1760" }))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["body"]["sid"], "6");
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_usernames_are_forbidden() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.repo.seed("tkuim1760", 1);
    let c = client();

    let cases = [
        ("tku12", "student name format is incorrect"),
        ("ntubm1760", "school name must be tku"),
        ("tkubm17x0", "seat number format is incorrect"),
        ("tkubm1760", "seat number already exists"),
    ];
    for (name, msg) in cases {
        let res = c.post(app.url("/api/v1/pals/insertOne"))
            .json(&json!({ "name": name }))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::FORBIDDEN, "{name}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], 403);
        assert!(body["message"].as_str().unwrap_or_default().starts_with(msg), "{name}: {body}");
        assert!(body.get("body").is_none());
    }
    assert_eq!(app.repo.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_full_roster_is_forbidden() -> anyhow::Result<()> {
    let app = start_server_with(PalServiceConfig { capacity: 2 }).await?;
    app.repo.seed("tkuim0001", 1);
    app.repo.seed("tkuim0002", 2);

    let res = client().post(app.url("/api/v1/pals/insertOne"))
        .json(&json!({ "name": "tkubm1760" }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "student list is full");
    Ok(())
}

#[tokio::test]
async fn e2e_missing_names_are_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/api/v1/pals/findByName")).query(&[("name", "tkubm1760")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "code": 404, "message": "user not found" }));

    let res = c.delete(app.url("/api/v1/pals/deleteByName")).query(&[("name", "tkubm1760")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.put(app.url("/api/v1/pals/updateByName"))
        .query(&[("name", "tkubm1760")])
        .json(&json!({ "attribute": "dark" }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert!(body.get("body").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_name_query_is_required() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api/v1/pals/findByName")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "name query parameter is required");
    Ok(())
}

#[tokio::test]
async fn e2e_repeated_name_query_is_an_envelope() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.repo.seed("tkuim0001", 1);

    let res = client().get(app.url("/api/v1/pals/findByName?name=tkuim0001&name=tkuim0002")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], 403);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(body.get("body").is_none());

    let res = client().delete(app.url("/api/v1/pals/deleteByName?name=a&name=b")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    assert_eq!(app.repo.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_update_ignores_identity_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let seeded = app.repo.seed("tkuim0001", 3);

    let res = client().put(app.url("/api/v1/pals/updateByName"))
        .query(&[("name", "tkuim0001")])
        .json(&json!({ "_id": "forged", "sid": "99", "image": "https://img.example/1.png" }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "update success");
    assert_eq!(body["body"]["_id"], seeded.id.as_str());
    assert_eq!(body["body"]["sid"], "3");
    assert_eq!(body["body"]["image"], "https://img.example/1.png");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_by_name() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.repo.seed("tkuim0001", 1);

    let res = client().delete(app.url("/api/v1/pals/deleteByName"))
        .query(&[("name", "tkuim0001")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["body"], json!({ "acknowledged": true, "deletedCount": 1 }));
    assert!(app.repo.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_storage_failure_is_a_generic_500() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.repo.set_failing(true);
    let c = client();

    let res = c.get(app.url("/api/v1/pals/findAll")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "code": 500, "message": "server error" }));

    let res = c.post(app.url("/api/v1/pals/insertOne"))
        .json(&json!({ "name": "tkubm1760" }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(app.url("/api/v1/pals/insertOne"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], 403);
    assert!(app.repo.is_empty());
    Ok(())
}
