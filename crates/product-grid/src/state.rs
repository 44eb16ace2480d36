//! Grid view state.

use turbo_commerce::{CategoryId, Product, ProductId};

/// Lifecycle phase derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no fetch started yet.
    Idle,
    Loading,
    Ready,
    Error,
}

/// Sort order offered by the grid.
///
/// Only `Newest` is implemented by the loader; the field exists so a
/// sort control can be wired later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

/// Everything the grid renders from.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Last successfully loaded products, newest first.
    pub products: Vec<Product>,
    /// True between the start of a fetch and its resolution.
    pub loading: bool,
    /// User-facing message of the last failed fetch.
    pub error: Option<String>,
    /// Raw text of the search box.
    pub search_input: String,
    /// Search text after the debounce settled. Not applied to the fetch.
    pub search_term: String,
    /// Declared but not applied to the fetch.
    pub selected_category: Option<CategoryId>,
    /// Declared but not populated.
    pub categories: Vec<CategoryId>,
    pub sort_by: SortBy,
    loaded: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.loaded {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Look up a loaded product.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub(crate) fn begin_load(&mut self) {
        self.error = None;
        self.loading = true;
    }

    pub(crate) fn finish_ok(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loaded = true;
    }

    pub(crate) fn finish_err(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut state = ViewState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.sort_by, SortBy::Newest);

        state.begin_load();
        assert_eq!(state.phase(), Phase::Loading);

        state.finish_err("boom");
        state.loading = false;
        assert_eq!(state.phase(), Phase::Error);

        state.begin_load();
        assert!(state.error.is_none());
        state.finish_ok(Vec::new());
        state.loading = false;
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.products.is_empty());
    }
}
