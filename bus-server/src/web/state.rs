//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::{RouteCodeTable, StopCatalog};
use crate::ebus::EbusClient;
use crate::render::MapRenderer;

/// Shared application state.
///
/// Contains all the services needed to handle requests. The catalog
/// and code table are loaded once at startup; queries only read them.
#[derive(Clone)]
pub struct AppState {
    /// eBus site client
    pub ebus: Arc<EbusClient>,

    /// Stop catalog (display name → candidate poles)
    pub catalog: Arc<StopCatalog>,

    /// Route display name → code table
    pub codes: Arc<RouteCodeTable>,

    /// Segment map renderer
    pub renderer: Arc<MapRenderer>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        ebus: EbusClient,
        catalog: StopCatalog,
        codes: RouteCodeTable,
        renderer: MapRenderer,
    ) -> Self {
        Self {
            ebus: Arc::new(ebus),
            catalog: Arc::new(catalog),
            codes: Arc::new(codes),
            renderer: Arc::new(renderer),
        }
    }
}
