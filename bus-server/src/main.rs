use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use bus_server::catalog::{RouteCodeTable, StopCatalog};
use bus_server::ebus::{EbusClient, EbusConfig};
use bus_server::render::MapRenderer;
use bus_server::web::{AppState, create_router};

/// Default path of the stop catalog CSV.
const DEFAULT_STOP_CATALOG: &str = "data/bus_stops.csv";

/// Default path of the route name → code CSV.
const DEFAULT_ROUTE_CODES: &str = "data/route_codes.csv";

/// Default directory for rendered segment maps.
const DEFAULT_MAPS_DIR: &str = "maps";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog_path =
        std::env::var("BUS_STOP_CATALOG").unwrap_or_else(|_| DEFAULT_STOP_CATALOG.to_string());
    let codes_path =
        std::env::var("BUS_ROUTE_CODES").unwrap_or_else(|_| DEFAULT_ROUTE_CODES.to_string());
    let maps_dir = std::env::var("BUS_MAPS_DIR").unwrap_or_else(|_| DEFAULT_MAPS_DIR.to_string());

    // Load the reference tables (fail fast if unavailable)
    let catalog = StopCatalog::load(&catalog_path).expect("Failed to load stop catalog");
    println!(
        "Loaded {} stop poles under {} names from {}",
        catalog.len(),
        catalog.name_count(),
        catalog_path
    );

    let codes = RouteCodeTable::load(&codes_path).expect("Failed to load route code table");
    println!("Loaded {} route codes from {}", codes.len(), codes_path);

    // Create eBus client
    let mut ebus_config = EbusConfig::new();
    if let Ok(base_url) = std::env::var("EBUS_BASE_URL") {
        ebus_config = ebus_config.with_base_url(&base_url);
    }
    let ebus = EbusClient::new(ebus_config).expect("Failed to create eBus client");

    // Create map renderer
    let renderer = MapRenderer::new(&maps_dir).expect("Failed to create maps directory");

    // Build app state
    let state = AppState::new(ebus, catalog, codes, renderer);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Taipei Direct Bus server listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET /health               - Health check");
    println!("  GET /api/stops/candidates - List candidate poles for a stop name");
    println!("  GET /api/direct           - Find direct routes between two stops");
    println!("  GET /maps/<file>          - Rendered segment maps");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
