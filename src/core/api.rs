//! HTTP host for the persona engine
//!
//! Endpoints:
//! - GET    /health                    - Health check
//! - POST   /conversation/new          - Start conversation (optional persisted state)
//! - GET    /conversation/:id          - Current state blob
//! - PUT    /conversation/:id/state    - Merge a full or partial state
//! - POST   /conversation/:id/before   - Pre-generation hook (user message)
//! - POST   /conversation/:id/after    - Post-generation hook (bot message)
//! - GET    /conversation/:id/status   - Status panel
//! - DELETE /conversation/:id          - End conversation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::core::{Conversation, PersonaEngine};
use crate::types::{HookResponse, LoadResponse, PersonaState, PersonaStatePatch, StatusPanel};
use crate::PersonaError;

/// App state
pub struct AppState {
    pub engine: PersonaEngine,
    pub conversations: RwLock<HashMap<String, Conversation>>,
    next_id: AtomicU64,
}

/// Start conversation request
#[derive(Debug, Default, Deserialize)]
pub struct NewConversationRequest {
    pub state: Option<PersonaState>,
}

/// Start conversation response
#[derive(Debug, Serialize)]
pub struct NewConversationResponse {
    pub conversation_id: String,
    pub load: LoadResponse,
    pub state: PersonaState,
}

/// Message passed to either hook
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub conversations_active: usize,
}

/// Create the API router
pub fn create_router(engine: PersonaEngine) -> Router {
    let state = Arc::new(AppState {
        engine,
        conversations: RwLock::new(HashMap::new()),
        next_id: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/conversation/new", post(create_conversation))
        .route("/conversation/:id", get(get_conversation).delete(end_conversation))
        .route("/conversation/:id/state", put(replace_state))
        .route("/conversation/:id/before", post(before_generation))
        .route("/conversation/:id/after", post(after_generation))
        .route("/conversation/:id/status", get(get_status))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let conversations = state.conversations.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        conversations_active: conversations.len(),
    })
}

/// Start a conversation
async fn create_conversation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewConversationRequest>,
) -> Json<NewConversationResponse> {
    let seq = state.next_id.fetch_add(1, Ordering::Relaxed);
    let conversation_id = generate_conversation_id(seq);
    let restored = req.state.is_some();
    let conversation = Conversation::new(state.engine.clone(), req.state);
    let persona = conversation.state().clone();

    state
        .conversations
        .write()
        .await
        .insert(conversation_id.clone(), conversation);
    info!(id = %conversation_id, restored, "conversation started");

    Json(NewConversationResponse {
        conversation_id,
        load: state.engine.load(),
        state: persona,
    })
}

/// Current state blob
async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PersonaState>, StatusCode> {
    let conversations = state.conversations.read().await;
    let conversation = conversations.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(conversation.state().clone()))
}

/// Merge host-pushed state
async fn replace_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<PersonaStatePatch>,
) -> Result<Json<PersonaState>, StatusCode> {
    let mut conversations = state.conversations.write().await;
    let conversation = conversations.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(conversation.replace_state(patch).clone()))
}

/// Pre-generation hook
async fn before_generation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<HookResponse>, StatusCode> {
    let mut conversations = state.conversations.write().await;
    let conversation = conversations.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(conversation.user_turn(&req.content)))
}

/// Post-generation hook
async fn after_generation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<HookResponse>, StatusCode> {
    let mut conversations = state.conversations.write().await;
    let conversation = conversations.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(conversation.bot_turn(&req.content)))
}

/// Status panel
async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StatusPanel>, StatusCode> {
    let conversations = state.conversations.read().await;
    let conversation = conversations.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(conversation.status()))
}

/// Discard a conversation
async fn end_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let removed = state.conversations.write().await.remove(&id);
    match removed {
        Some(conversation) => {
            info!(id = %id, count = conversation.state().manipulation_count, "conversation ended");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Generate conversation ID
fn generate_conversation_id(seq: u64) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format_conversation_id(nanos, seq)
}

fn format_conversation_id(nanos: u128, seq: u64) -> String {
    format!("conv_{:x}_{}", nanos, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, engine: PersonaEngine) -> crate::Result<()> {
    let router = create_router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "persona API listening");
    println!("🧠 Persona API running on {}", addr);
    println!("  POST   /conversation/new         - Start conversation");
    println!("  GET    /conversation/:id         - Get state");
    println!("  PUT    /conversation/:id/state   - Merge state");
    println!("  POST   /conversation/:id/before  - User turn");
    println!("  POST   /conversation/:id/after   - Bot turn");
    println!("  GET    /conversation/:id/status  - Status panel");
    println!("  DELETE /conversation/:id         - End conversation");
    println!("  GET    /health                   - Health check");
    axum::serve(listener, router)
        .await
        .map_err(|e| PersonaError::Server(e.to_string()))?;
    Ok(())
}
