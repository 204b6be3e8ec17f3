// file: src/server/routes.rs
// description: HTTP handlers for the captcha flow, chat endpoint and admin panel
// reference: https://docs.rs/axum

use crate::dataset::{Dataset, DatasetRecord, DatasetStatus};
use crate::pipeline::DailyCount;
use crate::server::captcha::{self, CAPTCHA_LENGTH};
use crate::server::pages;
use crate::server::session::SessionContext;
use crate::server::state::AppState;
use crate::utils::Validator;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

type AppStateArc = Arc<AppState>;

const CAPTCHA_REQUIRED_MESSAGE: &str = "Silakan lewati CAPTCHA di root (/) dulu.";
const CAPTCHA_WRONG_MESSAGE: &str = "CAPTCHA salah, coba lagi.";
const LOGIN_FAILED_MESSAGE: &str = "Login gagal! Username atau password salah.";
const ACCESS_DENIED_MESSAGE: &str = "Akses ditolak";
const HISTORY_DAYS: usize = 7;

// ============================================================================
// Captcha Routes
// ============================================================================

pub fn captcha_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(show_captcha_page))
        .route("/captcha.svg", get(captcha_image))
        .route("/submit_captcha", post(submit_captcha))
        .route("/main", get(main_app))
}

#[derive(Debug, Deserialize)]
pub struct CaptchaForm {
    #[serde(default)]
    captcha: String,
}

async fn show_captcha_page(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    session.respond(Html(pages::captcha_page(None)))
}

async fn captcha_image(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;

    let (text, svg) = {
        let mut rng = rand::thread_rng();
        let text = captcha::random_text(&mut rng, CAPTCHA_LENGTH);
        let svg = captcha::render_svg(&mut rng, &text);
        (text, svg)
    };

    state
        .sessions
        .update(session.id, |s| s.captcha_text = Some(text))
        .await;

    session.respond((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        ],
        svg,
    ))
}

async fn submit_captcha(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Form(form): Form<CaptchaForm>,
) -> Response {
    let session = state.sessions.attach(&headers).await;

    let passed = state
        .sessions
        .update(session.id, |s| {
            let expected = s.captcha_text.take();
            let passed = captcha::verify(expected.as_deref(), &form.captcha);
            if passed {
                s.passed_captcha = true;
            }
            passed
        })
        .await
        .unwrap_or(false);

    if passed {
        info!("Session passed captcha");
        session.respond(Redirect::to("/main"))
    } else {
        session.respond((
            StatusCode::BAD_REQUEST,
            Html(pages::captcha_page(Some(CAPTCHA_WRONG_MESSAGE))),
        ))
    }
}

async fn main_app(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    let verified = state
        .sessions
        .get(session.id)
        .await
        .is_some_and(|s| s.passed_captcha);

    if verified {
        session.respond(Html(pages::chat_page()))
    } else {
        session.respond(Redirect::to("/"))
    }
}

// ============================================================================
// Chat Routes
// ============================================================================

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/ask", post(ask))
}

#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
}

async fn ask(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    payload: Option<Json<AskRequest>>,
) -> Response {
    let session = state.sessions.attach(&headers).await;

    let Some(access) = state.sessions.get(session.id).await.and_then(|s| s.verified()) else {
        return session.respond((
            StatusCode::FORBIDDEN,
            Json(AskResponse {
                reply: CAPTCHA_REQUIRED_MESSAGE.to_string(),
            }),
        ));
    };

    let message = payload.map(|Json(req)| req.message).unwrap_or_default();
    let today = state.questions.record().await;
    info!(
        "Question #{} today: {}",
        today,
        Validator::truncate_text(&message, 80)
    );

    let answer = state.resolver.respond(access, &message).await;
    info!("Answer source: {:?}", answer.source);

    session.respond(Json(AskResponse {
        reply: answer.reply,
    }))
}

// ============================================================================
// Admin Routes
// ============================================================================

pub fn admin_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/admin", get(admin_panel))
        .route("/admin/reload_dataset_dosen", post(reload_lecturers))
        .route("/admin/reload_dataset_rektor", post(reload_rectors))
        .route("/admin/dataset_dosen_status", get(lecturer_status))
        .route("/admin/dataset_rektor_status", get(rector_status))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DatasetStatus>,
}

#[derive(Debug, Serialize)]
pub struct AdminPanel {
    pub question_count: u64,
    pub question_history: Vec<DailyCount>,
    pub dataset_dosen_status: DatasetStatus,
    pub dataset_rektor_status: DatasetStatus,
}

async fn passed_captcha(state: &AppState, session: SessionContext) -> bool {
    state
        .sessions
        .get(session.id)
        .await
        .is_some_and(|s| s.passed_captcha)
}

async fn is_admin(state: &AppState, session: SessionContext) -> bool {
    state
        .sessions
        .get(session.id)
        .await
        .is_some_and(|s| s.logged_in)
}

fn access_denied() -> (StatusCode, Json<ReloadResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(ReloadResponse {
            success: false,
            message: ACCESS_DENIED_MESSAGE.to_string(),
            status: None,
        }),
    )
}

async fn login_page(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !passed_captcha(&state, session).await {
        return session.respond(Redirect::to("/"));
    }
    session.respond(Html(pages::login_page(None)))
}

async fn login(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !passed_captcha(&state, session).await {
        return session.respond(Redirect::to("/"));
    }

    if state.admin.verify(&form.username, &form.password) {
        state.sessions.update(session.id, |s| s.logged_in = true).await;
        info!("Admin {} logged in", form.username);
        session.respond(Redirect::to("/admin"))
    } else {
        warn!("Failed admin login for {}", form.username);
        session.respond((
            StatusCode::UNAUTHORIZED,
            Html(pages::login_page(Some(LOGIN_FAILED_MESSAGE))),
        ))
    }
}

async fn logout(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    state.sessions.update(session.id, |s| s.logged_in = false).await;
    session.respond(Redirect::to("/login"))
}

async fn admin_panel(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !is_admin(&state, session).await {
        return session.respond(Redirect::to("/login"));
    }

    let panel = AdminPanel {
        question_count: state.questions.today().await,
        question_history: state.questions.history(HISTORY_DAYS).await,
        dataset_dosen_status: state.datasets().lecturers.status().await,
        dataset_rektor_status: state.datasets().rectors.status().await,
    };
    session.respond(Json(panel))
}

async fn reload_dataset<R: DatasetRecord>(dataset: &Dataset<R>) -> Response {
    match dataset.reload().await {
        Ok(count) => {
            info!("Admin reloaded dataset {} ({} records)", R::LABEL, count);
            Json(ReloadResponse {
                success: true,
                message: format!("Dataset {} berhasil dimuat ulang", R::LABEL),
                status: Some(dataset.status().await),
            })
            .into_response()
        }
        Err(e) => {
            warn!("Admin reload of dataset {} failed: {}", R::LABEL, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ReloadResponse {
                    success: false,
                    message: format!("Gagal memuat dataset {}", R::LABEL),
                    status: Some(dataset.status().await),
                }),
            )
                .into_response()
        }
    }
}

async fn reload_lecturers(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !is_admin(&state, session).await {
        return session.respond(access_denied());
    }
    session.respond(reload_dataset(&state.datasets().lecturers).await)
}

async fn reload_rectors(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !is_admin(&state, session).await {
        return session.respond(access_denied());
    }
    session.respond(reload_dataset(&state.datasets().rectors).await)
}

async fn lecturer_status(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !is_admin(&state, session).await {
        return session.respond(access_denied());
    }
    session.respond(Json(state.datasets().lecturers.status().await))
}

async fn rector_status(State(state): State<AppStateArc>, headers: HeaderMap) -> Response {
    let session = state.sessions.attach(&headers).await;
    if !is_admin(&state, session).await {
        return session.respond(access_denied());
    }
    session.respond(Json(state.datasets().rectors.status().await))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Response {
    Json(state.health().await).into_response()
}
