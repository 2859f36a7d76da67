//! HTTP boundary for the options query extraction service.
//!
//! Routes:
//! - `POST /extract` - extract index/strike/option-side from a query
//! - `GET /health`   - readiness of the recognizer and lexicons
//! - `GET /`         - service information

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use options_ner_core::{
    extract_options_data,
    lexicon::{default_index_lexicon, default_option_lexicon},
    Lexicon, LexiconRecognizer, LexiconSet, OptionsData, Recognizer,
};

// Application state
#[derive(Clone)]
pub struct AppState {
    pub lexicons: Arc<LexiconSet>,
    pub recognizer: Arc<dyn Recognizer>,
}

// API types
#[derive(Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "options_ner_server=info,options_ner_core=info".into()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let lexicon_dir = std::env::var("OPTIONS_NER_LEXICON_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models/lexicon"));

    info!("Loading lexicons from {}", lexicon_dir.display());
    let lexicons = Arc::new(load_lexicons(&lexicon_dir));
    let recognizer: Arc<dyn Recognizer> = Arc::new(LexiconRecognizer::new(lexicons.clone()));

    let app_state = AppState {
        lexicons,
        recognizer,
    };

    let app = create_router(app_state);

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/extract", post(extract))
        .route("/health", get(health_check))
        .route("/", get(root))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Load one lexicon file, falling back to the built-in table.
fn load_lexicon_or(path: &Path, fallback: fn() -> Lexicon, what: &str) -> Lexicon {
    match Lexicon::from_json_file(path) {
        Ok(lexicon) => {
            info!("Loaded {} {} entries from {}", lexicon.len(), what, path.display());
            lexicon
        }
        Err(e) => {
            warn!("Falling back to built-in {} table: {}", what, e);
            fallback()
        }
    }
}

fn load_lexicons(dir: &Path) -> LexiconSet {
    LexiconSet {
        index: load_lexicon_or(&dir.join("index_mapper.json"), default_index_lexicon, "index"),
        option: load_lexicon_or(&dir.join("option_mapper.json"), default_option_lexicon, "option"),
    }
}

// Extract options entities from a query
async fn extract(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<OptionsData>, (StatusCode, Json<ErrorResponse>)> {
    let query = request.query.trim();

    if query.is_empty() {
        warn!("Rejected empty query");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                detail: "Query cannot be empty".to_string(),
            }),
        ));
    }

    info!("Received query: {}", query);
    let spans = state.recognizer.recognize(&request.query);
    let result = extract_options_data(&request.query, &spans, &state.lexicons);
    info!(
        index = result.index.as_deref(),
        strike_price = result.strike_price,
        strike_type = result.strike_type.as_deref(),
        "extraction finished"
    );

    Ok(Json(result))
}

// Health check endpoint
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<ErrorResponse>)> {
    if state.lexicons.index.is_empty() || state.lexicons.option.is_empty() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                detail: "Model not loaded".to_string(),
            }),
        ));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: true,
    }))
}

// Root endpoint with service information
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Options NER API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Extract structured data from options trading queries",
        "endpoints": {
            "/extract": "POST - Extract entities from query",
            "/health": "GET - Check API health"
        }
    }))
}
