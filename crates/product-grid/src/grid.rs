//! The product grid component.

use std::rc::Rc;
use std::time::Instant;

use edge_core::GridConfig;
use edge_observability::StructuredLogger;
use turbo_commerce::{CartService, ProductId};

use crate::card::{self, CardOptions, ClickEvent};
use crate::debounce::{debounce, DebounceInput, Debounced};
use crate::error::GridError;
use crate::labels;
use crate::render;
use crate::source::ProductSource;
use crate::state::ViewState;

const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Clears `loading` when a fetch resolves or its future is dropped.
struct LoadingGuard<'a> {
    state: &'a mut ViewState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.loading = false;
    }
}

/// Storefront grid of product cards.
///
/// Owns its view state. Loading takes `&mut self`, so at most one fetch is
/// in flight per grid and nothing can write to a grid after it is dropped.
pub struct ProductGrid {
    state: ViewState,
    source: Rc<dyn ProductSource>,
    cart: Rc<dyn CartService>,
    logger: StructuredLogger,
    options: CardOptions,
    search_input: DebounceInput<String>,
    search: Debounced<String>,
}

impl ProductGrid {
    /// Create an idle grid with default card options.
    pub fn new(
        source: Rc<dyn ProductSource>,
        cart: Rc<dyn CartService>,
        logger: StructuredLogger,
    ) -> Self {
        let (search_input, search) = debounce(
            String::new(),
            std::time::Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        );
        Self {
            state: ViewState::new(),
            source,
            cart,
            logger: logger.with_component("product-grid"),
            options: CardOptions::default(),
            search_input,
            search,
        }
    }

    /// Create an idle grid using the currency, detail route and debounce
    /// period from `config`.
    pub fn from_config(
        source: Rc<dyn ProductSource>,
        cart: Rc<dyn CartService>,
        logger: StructuredLogger,
        config: &GridConfig,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(source, cart, logger);
        grid.options = CardOptions::from_config(config)?;
        let (search_input, search) = debounce(String::new(), config.debounce());
        grid.search_input = search_input;
        grid.search = search;
        Ok(grid)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// First load after the grid is shown.
    pub async fn mount(&mut self) -> Result<usize, GridError> {
        self.logger.debug("Mounting product grid");
        self.load_products().await
    }

    /// Load again after a failure.
    pub async fn retry(&mut self) -> Result<usize, GridError> {
        self.logger.info("Retrying product load");
        self.load_products().await
    }

    /// Reload while showing products.
    pub async fn refresh(&mut self) -> Result<usize, GridError> {
        self.logger.debug("Refreshing product grid");
        self.load_products().await
    }

    /// Fetch the catalog and replace the displayed products.
    ///
    /// On failure the previous products stay in state, `error` holds the
    /// generic message and the cause is logged. Returns the number of
    /// products loaded.
    pub async fn load_products(&mut self) -> Result<usize, GridError> {
        let started = Instant::now();
        self.state.begin_load();
        let mut guard = LoadingGuard {
            state: &mut self.state,
        };

        match self.source.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                guard.state.finish_ok(products);
                self.logger
                    .info_builder("Products loaded")
                    .field_i64("count", count as i64)
                    .duration_ms("duration_ms", started.elapsed())
                    .emit();
                Ok(count)
            }
            Err(e) => {
                guard.state.finish_err(labels::LOAD_ERROR);
                let mut entry = self
                    .logger
                    .error_builder("Product load failed")
                    .field("error", e.to_string())
                    .duration_ms("duration_ms", started.elapsed());
                if let Some(status) = e.status() {
                    entry = entry.field_i64("status", status as i64);
                }
                entry.emit();
                Err(e)
            }
        }
    }

    /// Handle a click on a card's add-to-cart control.
    ///
    /// Navigation is cancelled in every case. Returns whether one unit was
    /// handed to the cart.
    pub fn on_add_to_cart(
        &self,
        product_id: &ProductId,
        event: &mut ClickEvent,
    ) -> Result<bool, GridError> {
        event.prevent_default();
        let product = self
            .state
            .product(product_id)
            .ok_or_else(|| GridError::UnknownProduct(product_id.clone()))?;

        match card::add_to_cart(self.cart.as_ref(), product, event) {
            Ok(added) => {
                if added {
                    self.logger
                        .info_builder("Added to cart")
                        .field("product_id", product_id.as_str())
                        .emit();
                }
                Ok(added)
            }
            Err(e) => {
                self.logger
                    .warn_builder("Cart rejected item")
                    .field("product_id", product_id.as_str())
                    .field("error", e.to_string())
                    .emit();
                Err(e.into())
            }
        }
    }

    /// Record raw search text. The settled term follows after the quiet period.
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.search_input = text.clone();
        self.search_input.set(text);
    }

    /// Handle for feeding search text from elsewhere.
    pub fn search_handle(&self) -> DebounceInput<String> {
        self.search_input.clone()
    }

    /// Wait for the search text to settle and store it as the search term.
    pub async fn settle_search(&mut self) -> Option<String> {
        let term = self.search.settled().await?;
        self.state.search_term = term.clone();
        Some(term)
    }

    /// HTML for the current state.
    pub fn render(&self) -> String {
        render::render_grid(&self.state, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryProductSource;
    use crate::state::Phase;
    use chrono::{TimeZone, Utc};
    use edge_core::RequestId;
    use edge_observability::{LogLevel, LogSink};
    use std::time::Duration;
    use turbo_commerce::{Currency, InMemoryCart, Product};

    fn product(id: &str, day: u32, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {}", id),
            price: 20.0,
            images: Vec::new(),
            stock,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            average_rating: None,
            review_count: None,
        }
    }

    struct Fixture {
        grid: ProductGrid,
        source: Rc<MemoryProductSource>,
        cart: Rc<InMemoryCart>,
        sink: LogSink,
    }

    fn fixture(products: Vec<Product>) -> Fixture {
        let source = Rc::new(MemoryProductSource::new(products, Vec::new()));
        let cart = Rc::new(InMemoryCart::new(Currency::USD));
        let sink = LogSink::memory();
        let logger = StructuredLogger::new(RequestId::from_string("req-test")).with_sink(sink.clone());
        let grid = ProductGrid::new(source.clone(), cart.clone(), logger);
        Fixture {
            grid,
            source,
            cart,
            sink,
        }
    }

    #[tokio::test]
    async fn test_mount_loads_newest_first() {
        let mut f = fixture(vec![product("a", 1, 1), product("b", 2, 1)]);
        assert_eq!(f.grid.state().phase(), Phase::Idle);

        assert_eq!(f.grid.mount().await.unwrap(), 2);

        let state = f.grid.state();
        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.loading);
        assert_eq!(state.products[0].id.as_str(), "b");
    }

    #[tokio::test]
    async fn test_failure_keeps_products_and_logs_cause() {
        let mut f = fixture(vec![product("a", 1, 1)]);
        f.grid.mount().await.unwrap();

        f.source.set_failure(Some("connection reset"));
        assert!(f.grid.refresh().await.is_err());

        let state = f.grid.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Error al cargar los productos"));
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.phase(), Phase::Error);

        let entries = f.sink.entries();
        let failure = entries
            .iter()
            .find(|e| e.level == LogLevel::Error)
            .expect("failure logged");
        assert!(failure.field_str("error").unwrap().contains("connection reset"));
        assert_eq!(failure.component.as_deref(), Some("product-grid"));
    }

    #[tokio::test]
    async fn test_retry_clears_error() {
        let mut f = fixture(vec![product("a", 1, 1)]);
        f.source.set_failure(Some("offline"));
        assert!(f.grid.mount().await.is_err());
        assert!(f.grid.render().contains("Reintentar"));

        f.source.set_failure(None);
        assert_eq!(f.grid.retry().await.unwrap(), 1);
        assert!(f.grid.state().error.is_none());
        assert_eq!(f.source.fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_clears_loading() {
        let source = Rc::new(
            MemoryProductSource::new(vec![product("a", 1, 1)], Vec::new())
                .with_latency(Duration::from_secs(5)),
        );
        let logger = StructuredLogger::new(RequestId::from_string("req-test")).with_sink(LogSink::memory());
        let mut grid = ProductGrid::new(source, Rc::new(InMemoryCart::new(Currency::USD)), logger);

        let outcome = tokio::time::timeout(Duration::from_secs(1), grid.load_products()).await;
        assert!(outcome.is_err());
        assert!(!grid.state().loading);
        assert!(grid.state().products.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_fetch_in_flight() {
        let source = Rc::new(
            MemoryProductSource::new(vec![product("a", 1, 1)], Vec::new())
                .with_latency(Duration::from_secs(5)),
        );
        let logger = StructuredLogger::new(RequestId::from_string("req-test")).with_sink(LogSink::memory());
        let mut grid = ProductGrid::new(source.clone(), Rc::new(InMemoryCart::new(Currency::USD)), logger);

        let mut load = Box::pin(grid.load_products());
        let outcome = tokio::time::timeout(Duration::from_secs(1), load.as_mut()).await;
        assert!(outcome.is_err());
        // Leaked so the in-flight state is not reset on drop.
        std::mem::forget(load);

        assert_eq!(source.fetch_count(), 1);
        let state = grid.state();
        assert!(state.loading);
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.products.is_empty());
        assert!(grid.render().contains(r#"class="spinner""#));
    }

    #[tokio::test]
    async fn test_add_to_cart_only_when_in_stock() {
        let mut f = fixture(vec![product("in", 1, 2), product("out", 2, 0)]);
        f.grid.mount().await.unwrap();

        let mut click = ClickEvent::new();
        assert!(f.grid.on_add_to_cart(&ProductId::new("in"), &mut click).unwrap());
        assert!(click.default_prevented());

        let mut click = ClickEvent::new();
        assert!(!f.grid.on_add_to_cart(&ProductId::new("out"), &mut click).unwrap());
        assert!(click.default_prevented());

        let cart = f.cart.snapshot();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get_item_by_product(&ProductId::new("in")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let f = fixture(Vec::new());
        let mut click = ClickEvent::new();
        let err = f.grid.on_add_to_cart(&ProductId::new("ghost"), &mut click).unwrap_err();
        assert!(matches!(err, GridError::UnknownProduct(_)));
        assert!(click.default_prevented());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_settles_into_state() {
        let mut f = fixture(Vec::new());
        f.grid.set_search_input("t");
        f.grid.set_search_input("taz");
        assert_eq!(f.grid.state().search_input, "taz");
        assert_eq!(f.grid.state().search_term, "");

        assert_eq!(f.grid.settle_search().await.as_deref(), Some("taz"));
        assert_eq!(f.grid.state().search_term, "taz");
    }

    #[test]
    fn test_from_config_rejects_unknown_currency() {
        let mut config = GridConfig::new(edge_core::StoreConfig::new("https://demo.supabase.co", ""));
        config.currency = "ZZZ".to_string();
        let result = ProductGrid::from_config(
            Rc::new(MemoryProductSource::default()),
            Rc::new(InMemoryCart::new(Currency::USD)),
            StructuredLogger::new(RequestId::generate()),
            &config,
        );
        assert!(matches!(result, Err(GridError::Config(_))));
    }
}
