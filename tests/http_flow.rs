// file: tests/http_flow.rs
// description: end-to-end HTTP flow through the axum router

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use campus_qa::config::{DatasetConfig, RouterConfig, ServerConfig};
use campus_qa::{
    AdminCredentials, AppState, CompletionClient, DatasetStore, FallbackResponder, FixedPhrasing,
    LecturerRecord, RectorRecord, ResolutionRouter, ResponseComposer, SessionStore, hash_password,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "rahasia-undip";
const AI_REPLY: &str = "Jawaban dari model";

struct StubClient;

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _system_prompt: &str, _user_message: &str) -> campus_qa::Result<String> {
        Ok(AI_REPLY.to_string())
    }
}

fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 5000,
        session_lifetime_minutes: 120,
        permissive_cors: false,
        max_sessions: 100,
    }
}

fn build_state(datasets: DatasetStore) -> AppState {
    let fallback = FallbackResponder::new(Some(Arc::new(StubClient)), "persona");
    let resolver = ResolutionRouter::new(
        Arc::new(datasets),
        ResponseComposer::new(Arc::new(FixedPhrasing(0))),
        fallback,
        RouterConfig::default(),
    )
    .with_reference_year(2026);

    AppState::new(
        resolver,
        SessionStore::with_lifetime_minutes(120),
        AdminCredentials::new("admin", Some(hash_password(ADMIN_PASSWORD))),
    )
}

fn sample_app() -> Router {
    let datasets = DatasetStore::from_records(
        vec![
            LecturerRecord::new("Dr. Budi Santoso", "198501012010121001"),
            LecturerRecord::new("Prof. Siti Rahmawati", "196803151993032002"),
        ],
        vec![
            RectorRecord::new("Prof. Yos Johan Utama", "2015-2024", ""),
            RectorRecord::new("Prof. Suharnomo", "2024-2029", ""),
        ],
    );
    campus_qa::server::build_router(Arc::new(build_state(datasets)), &server_config())
}

/// Minimal cookie-carrying client over `oneshot`.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn post_json(&mut self, uri: &str, body: Value) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn solve_captcha(&mut self) {
        let response = self.get("/captcha.svg").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );

        let svg = body_text(response).await;
        let glyph = Regex::new(r">([A-Za-z0-9])</text>").unwrap();
        let answer: String = glyph.captures_iter(&svg).map(|c| c[1].to_string()).collect();
        assert_eq!(answer.len(), 5);

        let response = self
            .post_form("/submit_captcha", &format!("captcha={}", answer))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/main");
    }

    async fn login(&mut self) {
        let response = self
            .post_form(
                "/login",
                &format!("username=admin&password={}", ADMIN_PASSWORD),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin");
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn ask_requires_captcha() {
    let mut client = Client::new(sample_app());

    let response = client
        .post_json("/ask", json!({"message": "siapa rektor sekarang"}))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await,
        json!({"reply": "Silakan lewati CAPTCHA di root (/) dulu."})
    );

    let response = client.get("/main").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn wrong_captcha_is_rejected_and_consumed() {
    let mut client = Client::new(sample_app());
    client.get("/captcha.svg").await;

    let response = client.post_form("/submit_captcha", "captcha=wrong").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("CAPTCHA salah"));

    let response = client
        .post_json("/ask", json!({"message": "halo"}))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn verified_session_gets_dataset_and_ai_answers() {
    let mut client = Client::new(sample_app());
    client.solve_captcha().await;

    let response = client.get("/main").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post_json("/ask", json!({"message": "Siapa rektor UNDIP sekarang?"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
    assert!(reply.contains("Prof. Suharnomo"));
    assert!(reply.contains("2024-2029"));

    let response = client
        .post_json("/ask", json!({"message": "nip 196803151993032002 itu dosen siapa"}))
        .await;
    assert_eq!(
        body_json(response).await,
        json!({"reply": "NIP dari Prof. Siti Rahmawati itu adalah 196803151993032002"})
    );

    let response = client
        .post_json("/ask", json!({"message": "kapan jadwal krs dibuka"}))
        .await;
    assert_eq!(body_json(response).await, json!({"reply": AI_REPLY}));
}

#[tokio::test]
async fn admin_panel_counts_questions() {
    let mut client = Client::new(sample_app());
    client.solve_captcha().await;

    for message in ["halo", "dosen budi santoso"] {
        let response = client.post_json("/ask", json!({"message": message})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = client.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

    client.login().await;

    let response = client.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let panel = body_json(response).await;
    assert_eq!(panel["question_count"], json!(2));
    assert_eq!(panel["question_history"][0]["count"], json!(2));
    assert_eq!(panel["dataset_dosen_status"]["status"], json!("loaded"));
    assert_eq!(panel["dataset_rektor_status"]["count"], json!(2));

    let response = client.get("/logout").await;
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    let response = client.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn login_requires_captcha_and_valid_password() {
    let mut client = Client::new(sample_app());

    let response = client.get("/login").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    client.solve_captcha().await;
    let response = client
        .post_form("/login", "username=admin&password=salah")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Login gagal"));
}

#[tokio::test]
async fn admin_endpoints_reject_without_login() {
    let mut client = Client::new(sample_app());
    client.solve_captcha().await;

    for uri in ["/admin/reload_dataset_dosen", "/admin/reload_dataset_rektor"] {
        let response = client.post_form(uri, "").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "message": "Akses ditolak"})
        );
    }

    for uri in ["/admin/dataset_dosen_status", "/admin/dataset_rektor_status"] {
        let response = client.get(uri).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn failed_reload_keeps_previous_dataset() {
    let temp = TempDir::new().unwrap();
    let lecturer_path = temp.path().join("dataset_dosen.json");
    let rector_path = temp.path().join("dataset_rektor.json");
    fs::write(
        &lecturer_path,
        r#"{"data_dosen": [{"nama_dosen": "Dr. Budi Santoso", "nip": "198501012010121001"}]}"#,
    )
    .unwrap();
    fs::write(
        &rector_path,
        r#"[{"nama": "Prof. Suharnomo", "periode": "2024-2029", "keterangan": ""}]"#,
    )
    .unwrap();

    let datasets = DatasetStore::new(&DatasetConfig {
        lecturer_path: lecturer_path.clone(),
        rector_path,
    });
    datasets.load_all().await;
    let app = campus_qa::server::build_router(Arc::new(build_state(datasets)), &server_config());

    let mut client = Client::new(app);
    client.solve_captcha().await;
    client.login().await;

    let response = client.post_form("/admin/reload_dataset_dosen", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Dataset dosen berhasil dimuat ulang"));

    fs::write(&lecturer_path, "{ not json").unwrap();
    let response = client.post_form("/admin/reload_dataset_dosen", "").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Gagal memuat dataset dosen"));
    assert_eq!(body["status"]["status"], json!("loaded"));
    assert_eq!(body["status"]["count"], json!(1));

    let response = client
        .post_json("/ask", json!({"message": "nip 198501012010121001 dosen siapa"}))
        .await;
    let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
    assert!(reply.contains("Dr. Budi Santoso"));
}

#[tokio::test]
async fn health_reports_components() {
    let mut client = Client::new(sample_app());
    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["checks"].as_array().unwrap().len(), 3);
}
