#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, InferenceConfig, MediaConfig, ServerConfig,
};
use server::state::AppState;
use server::utils::jwt;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const SIGN_UPLOAD: &str = "/api/v1/sign-upload";
    pub const VIDEOS: &str = "/api/v1/videos";
    pub const VIDEO_UPLOAD: &str = "/api/v1/video-upload";
    pub const ASK_QUESTION: &str = "/api/v1/ai/ask-question";

    pub fn video(id: &str) -> String {
        format!("/api/v1/videos/{id}")
    }
}

/// Behavior knobs and call records for the stub CDN + inference upstream.
#[derive(Clone, Default)]
pub struct StubUpstream {
    /// Frame offsets (seconds) that should fail with a 500.
    pub fail_frame_offsets: Arc<Mutex<HashSet<u32>>>,
    /// `public_id`s the stub received destroy requests for.
    pub destroys: Arc<Mutex<Vec<String>>>,
    /// Frame offsets the stub served successfully.
    pub frame_hits: Arc<Mutex<Vec<u32>>>,
}

impl StubUpstream {
    pub fn fail_offsets(&self, offsets: &[u32]) {
        let mut set = self.fail_frame_offsets.lock().unwrap();
        set.clear();
        set.extend(offsets.iter().copied());
    }
}

#[derive(serde::Deserialize)]
struct DestroyForm {
    public_id: String,
}

async fn stub_destroy(
    State(stub): State<StubUpstream>,
    Form(form): Form<DestroyForm>,
) -> impl IntoResponse {
    stub.destroys.lock().unwrap().push(form.public_id);
    axum::Json(serde_json::json!({"result": "ok"}))
}

async fn stub_frame(
    State(stub): State<StubUpstream>,
    Path((_cloud, transform, _rest)): Path<(String, String, String)>,
) -> impl IntoResponse {
    // Transform looks like "so_40,w_400,c_fill,q_auto,f_jpg".
    let offset: u32 = transform
        .strip_prefix("so_")
        .and_then(|rest| rest.split(',').next())
        .and_then(|s| s.parse().ok())
        .expect("frame URL should carry an offset");

    if stub.fail_frame_offsets.lock().unwrap().contains(&offset) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Vec::new());
    }

    stub.frame_hits.lock().unwrap().push(offset);
    (StatusCode::OK, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

/// Answers with the number of inline image parts it received, so tests can
/// assert how many frames survived the fan-out.
async fn stub_generate(axum::Json(payload): axum::Json<Value>) -> impl IntoResponse {
    let image_parts = payload["contents"][0]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter(|p| p.get("inlineData").is_some())
                .count()
        })
        .unwrap_or(0);

    axum::Json(serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": format!("answer from {image_parts} frames")}]}
        }]
    }))
}

async fn spawn_stub(stub: StubUpstream) -> SocketAddr {
    let router = axum::Router::new()
        .route("/{cloud}/video/destroy", post(stub_destroy))
        .route("/{cloud}/video/upload/{transform}/{*rest}", get(stub_frame))
        .route("/models/{model}", post(stub_generate))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A running test server with its stub upstream.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub stub: StubUpstream,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

async fn connect_test_db() -> DatabaseConnection {
    // One connection: each pooled connection to sqlite::memory: would
    // otherwise see its own empty database.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to open in-memory database");
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await
        .expect("Failed to sync schema");
    db
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with a hook to adjust the config (e.g. drop the inference key).
    pub async fn spawn_with(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let db = connect_test_db().await;

        let stub = StubUpstream::default();
        let stub_addr = spawn_stub(stub.clone()).await;
        let stub_base = format!("http://{stub_addr}");

        let mut config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
            },
            media: MediaConfig {
                cloud_name: "test-cloud".to_string(),
                api_key: "test-api-key".to_string(),
                api_secret: "test-api-secret".to_string(),
                upload_folder: "video-uploads".to_string(),
                api_base: stub_base.clone(),
                delivery_base: stub_base.clone(),
            },
            inference: InferenceConfig {
                api_key: Some("test-inference-key".to_string()),
                model: "test-model".to_string(),
                base_url: stub_base,
            },
        };
        adjust(&mut config);

        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build outbound client");

        let state = AppState { db, http, config };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            stub,
        }
    }

    /// Mint a token for a principal, as the identity provider would.
    pub fn token(&self, user_id: &str) -> String {
        jwt::sign(user_id, JWT_SECRET).expect("Failed to sign test token")
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a video record via the API and return its `id`.
    pub async fn create_video(&self, token: &str, title: &str, duration: f64) -> String {
        let res = self
            .post_with_token(
                routes::VIDEO_UPLOAD,
                &serde_json::json!({
                    "title": title,
                    "description": "Test video",
                    "publicId": format!("video-uploads/{}", title.to_lowercase().replace(' ', "-")),
                    "originalSize": 52428800u64,
                    "compressedSize": 31457280u64,
                    "duration": duration,
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_video failed: {}", res.text);
        res.body["id"]
            .as_str()
            .expect("response body should contain 'id'")
            .to_string()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}
