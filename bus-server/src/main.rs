use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bus_server::cache::{CachedSuggester, SuggestCacheConfig};
use bus_server::catalog::RouteCatalog;
use bus_server::gemini::{ConnectionSuggester, GeminiClient, GeminiConfig, MockSuggester};
use bus_server::resolve::{RoutePlanner, SearchSession};
use bus_server::web::{AppState, create_router};

/// Default location of the route catalog document.
const DEFAULT_CATALOG_PATH: &str = "data/bus-routes.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load the route catalog (fail fast: the catalog is a boot invariant)
    let catalog_path =
        std::env::var("BUS_ROUTES_FILE").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    let catalog = RouteCatalog::load(&catalog_path)
        .unwrap_or_else(|e| panic!("Failed to load route catalog from {catalog_path}: {e}"));
    println!("Loaded {} bus routes from {catalog_path}", catalog.len());

    // Pick the suggester: canned responses when a mock file is configured,
    // otherwise the real Gemini client.
    let suggester: Arc<dyn ConnectionSuggester> =
        match std::env::var("MOCK_SUGGESTIONS_FILE").ok() {
            Some(path) => {
                println!("Using mock suggestions from {path}");
                Arc::new(
                    MockSuggester::from_file(&path)
                        .unwrap_or_else(|e| panic!("Failed to load mock suggestions: {e}")),
                )
            }
            None => {
                let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
                    eprintln!("Warning: GEMINI_API_KEY not set. Suggestion calls will fail.");
                    String::new()
                });

                let mut config = GeminiConfig::new(&api_key);
                if let Ok(model) = std::env::var("GEMINI_MODEL") {
                    config = config.with_model(model);
                }

                let client =
                    GeminiClient::new(config).expect("Failed to create Gemini client");
                Arc::new(client)
            }
        };

    // Cache suggestions: identical searches within the TTL skip the model
    let cached = CachedSuggester::new(suggester, &SuggestCacheConfig::default());

    // Build the pipeline and app state
    let planner = RoutePlanner::new(Arc::new(catalog), Arc::new(cached));
    let state = AppState::new(planner, SearchSession::new());

    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    println!("Bus route resolver listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health             - Health check");
    println!("  GET  /api/routes         - List the route catalog");
    println!("  POST /api/route/resolve  - Resolve a route");
    println!("  GET  /api/route/current  - Current session state");
    println!("  POST /api/route/clear    - Clear the displayed route");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
