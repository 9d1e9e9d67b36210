/*!
geomap REST API Server

Provides HTTP endpoints that render map descriptions for a provider.

## Usage

```bash
geomap-rest --host 127.0.0.1 --port 3000 --config geomap.toml
```

## Endpoints

- `POST /api/v1/render` - Render a map description (returns HTML)
- `GET /api/v1/includes/:provider` - Library <script> tags for a provider
- `GET /api/v1/providers` - Available providers
- `GET /api/v1/health` - Health check
- `GET /api/v1/version` - Version information
*/

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geomap::config::{GeomapConfig, CONFIG_ENV};
use geomap::renderer::{render_page, RendererRegistry};
use geomap::{GeomapError, MapDescription, VERSION};

/// CLI arguments for the REST API server
#[derive(Parser)]
#[command(name = "geomap-rest")]
#[command(about = "geomap REST API Server")]
#[command(version = VERSION)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(long, default_value = "3335")]
    port: u16,

    /// CORS allowed origins (comma-separated)
    #[arg(long, default_value = "*")]
    cors_origin: String,

    /// Provider configuration file (TOML)
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    /// Renderers are immutable, so one registry serves every request
    registry: Arc<RendererRegistry>,
    /// Provider used when a request names none
    default_provider: String,
}

impl AppState {
    fn from_config(config: &GeomapConfig) -> Self {
        Self {
            registry: Arc::new(RendererRegistry::from_config(config)),
            default_provider: config.default_provider().to_string(),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for /api/v1/render endpoint
#[derive(Debug, Deserialize)]
struct RenderRequest {
    /// Provider key (optional, default: configured default provider)
    #[serde(default)]
    provider: Option<String>,
    /// The map to render
    map: MapDescription,
    /// Prepend the provider's library <script> tags
    #[serde(default)]
    include_js: bool,
}

/// Successful API response
#[derive(Debug, Serialize)]
struct ApiSuccess<T> {
    status: String,
    data: T,
}

impl<T> ApiSuccess<T> {
    fn new(data: T) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            data,
        })
    }
}

/// Error API response
#[derive(Debug, Serialize)]
struct ApiError {
    status: String,
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

/// Rendered markup for one provider
#[derive(Debug, Serialize)]
struct HtmlResult {
    provider: String,
    html: String,
}

#[derive(Debug, Serialize)]
struct ProvidersResult {
    providers: Vec<String>,
    default: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Version response
#[derive(Debug, Serialize)]
struct VersionResponse {
    version: String,
    providers: Vec<String>,
}

// ============================================================================
// Error Handling
// ============================================================================

/// Custom error type for API responses
struct ApiErrorResponse {
    status: StatusCode,
    error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let json = Json(self.error);
        (self.status, json).into_response()
    }
}

impl From<GeomapError> for ApiErrorResponse {
    fn from(err: GeomapError) -> Self {
        let (status, error_type) = match &err {
            GeomapError::UnknownProvider(_) => (StatusCode::NOT_FOUND, "UnknownProvider"),
            GeomapError::ConfigError(_) => (StatusCode::BAD_REQUEST, "ConfigError"),
            GeomapError::InputError(_) => (StatusCode::BAD_REQUEST, "InputError"),
        };

        ApiErrorResponse {
            status,
            error: ApiError {
                status: "error".to_string(),
                error: ErrorDetails {
                    message: err.to_string(),
                    error_type: error_type.to_string(),
                },
            },
        }
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

/// POST /api/v1/render - Render a map description
async fn render_handler(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<HtmlResult>>, ApiErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        GeomapError::InputError(format!("Invalid render request: {}", rejection.body_text()))
    })?;
    let provider = request
        .provider
        .as_deref()
        .unwrap_or(state.default_provider.as_str());
    let renderer = state.registry.get(provider)?;
    info!(
        "Rendering map '{}' with {} ({} markers)",
        request.map.var_name,
        renderer.name(),
        request.map.markers.len()
    );

    let html = if request.include_js {
        render_page(renderer.as_ref(), std::slice::from_ref(&request.map))
    } else {
        renderer.render(&request.map)
    };

    Ok(ApiSuccess::new(HtmlResult {
        provider: renderer.name().to_string(),
        html,
    }))
}

/// GET /api/v1/includes/:provider - Library <script> tags
async fn includes_handler(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ApiSuccess<HtmlResult>>, ApiErrorResponse> {
    let renderer = state.registry.get(&provider)?;
    Ok(ApiSuccess::new(HtmlResult {
        provider: renderer.name().to_string(),
        html: renderer.render_javascript_includes(),
    }))
}

/// GET /api/v1/providers - Available providers
async fn providers_handler(State(state): State<AppState>) -> Json<ApiSuccess<ProvidersResult>> {
    ApiSuccess::new(ProvidersResult {
        providers: state.registry.providers().map(String::from).collect(),
        default: state.default_provider.clone(),
    })
}

/// GET /api/v1/health - Health check
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/v1/version - Version information
async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: VERSION.to_string(),
        providers: state.registry.providers().map(String::from).collect(),
    })
}

/// Root handler
async fn root_handler() -> &'static str {
    "geomap REST API Server - See /api/v1/health for status"
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/render", post(render_handler))
        .route("/api/v1/includes/:provider", get(includes_handler))
        .route("/api/v1/providers", get(providers_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/version", get(version_handler))
        .with_state(state)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geomap=info,geomap_rest=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading provider configuration from {}", path.display());
            GeomapConfig::from_file(path)?
        }
        None => {
            info!("No configuration given; providers start without options");
            GeomapConfig::default()
        }
    };
    let state = AppState::from_config(&config);

    // Configure CORS
    let cors = if cli.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    } else {
        let origins: Vec<_> = cli
            .cors_origin
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    };

    let app = router(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;

    info!("Starting geomap REST API server on {}", addr);
    info!("API documentation:");
    info!("  POST /api/v1/render              - Render a map description");
    info!("  GET  /api/v1/includes/:provider  - Provider library <script> tags");
    info!("  GET  /api/v1/providers           - Available providers");
    info!("  GET  /api/v1/health              - Health check");
    info!("  GET  /api/v1/version             - Version info");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
