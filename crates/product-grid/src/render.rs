//! HTML for each grid phase.

use crate::card::{CardOptions, ProductCard};
use crate::labels;
use crate::state::{Phase, ViewState};

/// Render the grid section for the current state.
pub fn render_grid(state: &ViewState, options: &CardOptions) -> String {
    match state.phase() {
        Phase::Idle | Phase::Loading => render_loading(),
        Phase::Error => render_error(state.error.as_deref().unwrap_or(labels::LOAD_ERROR)),
        Phase::Ready => render_products(state, options),
    }
}

pub fn render_loading() -> String {
    format!(
        r#"<section class="product-grid-section loading" data-section="product-grid">
    <div class="spinner" role="status" aria-label="{}"></div>
</section>"#,
        labels::LOADING
    )
}

/// Error message with a retry control.
pub fn render_error(message: &str) -> String {
    format!(
        r#"<section class="product-grid-section error" data-section="product-grid">
    <div class="error-state">
        <p class="error-message">{}</p>
        <button type="button" class="retry" data-action="retry" onclick="location.reload()">{}</button>
    </div>
</section>"#,
        escape_html(message),
        labels::RETRY
    )
}

fn render_products(state: &ViewState, options: &CardOptions) -> String {
    let cards: String = state
        .products
        .iter()
        .map(|p| ProductCard::new(p, options).render())
        .collect();

    format!(
        r#"<section class="product-grid-section" data-section="product-grid">
    {}
    <div class="product-grid">
        {}
    </div>
</section>"#,
        render_search(state),
        cards
    )
}

/// Search box. Submitted text is shown back but does not filter the grid.
pub fn render_search(state: &ViewState) -> String {
    format!(
        r#"<form class="grid-search" method="GET" role="search">
        <input type="search" name="q" value="{}" placeholder="{}" aria-label="{}">
    </form>"#,
        escape_html(&state.search_input),
        labels::SEARCH_PLACEHOLDER,
        labels::SEARCH_PLACEHOLDER
    )
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
