#![allow(dead_code)]

//! Microservicios falsos y helpers compartidos por los tests de integración

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use climbhelp_gateway::config::EnvironmentConfig;
use climbhelp_gateway::create_app;
use climbhelp_gateway::state::AppState;

pub const JWT_SECRET: &str = "integration-secret";

/// Lo que los microservicios falsos han recibido
#[derive(Clone, Default)]
pub struct Upstream {
    pub created_voies: Arc<Mutex<Vec<Value>>>,
    pub seances: Arc<Mutex<Vec<Value>>>,
    pub batches: Arc<Mutex<Vec<Value>>>,
    pub exchanges: Arc<Mutex<Vec<Value>>>,
    pub payment_intents: Arc<Mutex<Vec<Value>>>,
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn salles() -> Value {
    json!([
        { "id": 1, "nom": "Vertical'Art", "description": "Grenoble", "localisation": { "latitude": 45.18, "longitude": 5.72 } },
        { "id": 2, "nom": "Climb Up", "description": "Annecy", "localisation": [{ "latitude": 45.9, "longitude": 6.12 }] }
    ])
}

fn voies() -> Value {
    json!([
        { "id": 1, "salle_id": 1, "nom": "Dalle", "cotation": "6a", "ouvreur": "Luc", "type_de_voie": "ouverte" },
        { "id": 2, "salle_id": 1, "nom": "Toit", "cotation": "5c", "ouvreur": "Marie", "type_de_voie": "fermee" },
        { "id": 3, "salle_id": 1, "nom": "Arête", "cotation": "6a+", "ouvreur": "Luc", "type_de_voie": "ouverte" },
        { "id": 4, "salle_id": 1, "nom": "Projet", "ouvreur": "Marie", "type_de_voie": "maintenance" }
    ])
}

async fn list_salles() -> Json<Value> {
    envelope(salles())
}

async fn get_salle(Path(id): Path<i64>) -> impl IntoResponse {
    match salles().as_array().and_then(|s| s.iter().find(|s| s["id"] == id).cloned()) {
        Some(salle) => (StatusCode::OK, envelope(salle)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Salle introuvable" })),
        ),
    }
}

async fn list_voies(Path(id): Path<i64>) -> Json<Value> {
    if id == 1 {
        envelope(voies())
    } else {
        envelope(json!([]))
    }
}

async fn create_voie(State(upstream): State<Upstream>, Json(mut body): Json<Value>) -> impl IntoResponse {
    body["id"] = json!(100);
    upstream.created_voies.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, envelope(body))
}

async fn delete_voie(Path(id): Path<i64>) -> StatusCode {
    if id <= 4 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_seance(State(upstream): State<Upstream>, Json(mut body): Json<Value>) -> Json<Value> {
    body["id"] = json!(500);
    upstream.seances.lock().unwrap().push(body.clone());
    envelope(body)
}

async fn batch(State(upstream): State<Upstream>, Json(body): Json<Value>) -> Json<Value> {
    upstream.batches.lock().unwrap().push(body);
    Json(json!({ "success": true }))
}

async fn user_seances(Path(_user_id): Path<i64>) -> Json<Value> {
    // Respuesta sin envoltorio
    Json(json!([
        { "id": 10, "user_id": 7, "salle_id": 2, "date": "2024-01-05", "voie": [{ "id": 1 }] },
        { "id": 11, "user_id": 7, "salle_id": 1, "date": "2024-02-20", "voie": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] }
    ]))
}

async fn user_stats(Path(_user_id): Path<i64>) -> Json<Value> {
    envelope(json!({ "ascensions": 42, "sallesVisitees": 3, "niveauMax": "6c", "joursGrimpe": 12 }))
}

async fn conversation(State(upstream): State<Upstream>, Path(uid): Path<String>) -> impl IntoResponse {
    let exchanges: Vec<Value> = upstream
        .exchanges
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e["conversation_uid"] == uid.as_str())
        .cloned()
        .collect();
    if exchanges.is_empty() {
        return (StatusCode::NOT_FOUND, Json(json!({ "success": false, "error": "Conversation introuvable" })));
    }
    (StatusCode::OK, envelope(Value::Array(exchanges)))
}

async fn save_exchange(State(upstream): State<Upstream>, Json(mut body): Json<Value>) -> StatusCode {
    let mut exchanges = upstream.exchanges.lock().unwrap();
    body["id"] = json!(exchanges.len() + 1);
    exchanges.push(body);
    StatusCode::CREATED
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "marie@example.com" && body["password"] == "secret1" {
        (
            StatusCode::OK,
            envelope(json!({
                "token": "token-marie",
                "user": { "id": 7, "username": "marie", "email": "marie@example.com" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Identifiants invalides" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        envelope(json!({ "id": 8, "username": body["username"], "email": body["email"] })),
    )
}

async fn ai_chat(Json(body): Json<Value>) -> Json<Value> {
    let history = body["conversationHistory"].as_array().map(Vec::len).unwrap_or(0);
    Json(json!({ "response": { "content": format!("Conseil #{}", history + 1) } }))
}

async fn payment_intent(State(upstream): State<Upstream>, Json(body): Json<Value>) -> Json<Value> {
    upstream.payment_intents.lock().unwrap().push(body);
    Json(json!({ "clientSecret": "pi_secret", "paymentIntentId": "pi_1" }))
}

/// Arranca los microservicios falsos en un puerto efímero
pub async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let router = Router::new()
        .route("/api/salles", get(list_salles))
        .route("/api/salles/:id", get(get_salle))
        .route("/api/salles/:id/voies", get(list_voies))
        .route("/api/voies", post(create_voie))
        .route("/api/voies/:id", delete(delete_voie))
        .route("/api/seances", post(create_seance))
        .route("/api/voie-seances/batch", post(batch))
        .route("/api/seances/user/:id", get(user_seances))
        .route("/api/seances/user/:id/stats", get(user_stats))
        .route("/chat-conversations", post(save_exchange))
        .route("/chat-conversations/session/:uid", get(conversation))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/api/test", get(|| async { Json(json!({ "message": "ok" })) }))
        .route("/api/users/login", post(login))
        .route("/api/users", post(register))
        .route("/auth/logout", post(|| async { StatusCode::OK }))
        .route("/chat", post(ai_chat))
        .route("/create-payment-intent", post(payment_intent))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), upstream)
}

pub fn config_for(base_url: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        jwt_secret: JWT_SECRET.to_string(),
        rate_limit_requests: 1_000,
        http_timeout_secs: 5,
        bdd_service_url: base_url.to_string(),
        auth_service_url: base_url.to_string(),
        ai_service_url: base_url.to_string(),
        payment_service_url: base_url.to_string(),
        google_auth_url: format!("{}/auth/google", base_url),
        ..EnvironmentConfig::default()
    }
}

/// App del gateway apuntando a los microservicios falsos
pub async fn test_app() -> (Router, Upstream) {
    let (base_url, upstream) = spawn_upstream().await;
    let state = AppState::new(config_for(&base_url)).unwrap();
    (create_app(state), upstream)
}

pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

/// Login de la usuaria de prueba; devuelve el token de sesión
pub async fn login_marie(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "marie@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}
