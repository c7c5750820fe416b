use finance_tracker_core::{ChartService, PortfolioService, QuoteService};

use crate::config::Config;

/// Shared application state, injected into handlers via axum's `State`
/// extractor (wrapped in an `Arc` at startup).
///
/// Note what is NOT here: a store handle. Each request opens its own
/// connection and drops it when the request ends.
pub struct AppState {
    pub config: Config,
    pub quotes: QuoteService,
    pub portfolio: PortfolioService,
    pub charts: ChartService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let charts = ChartService::new(config.static_dir.clone());
        Self {
            config,
            quotes: QuoteService::new_with_defaults(),
            portfolio: PortfolioService::new(),
            charts,
        }
    }
}
