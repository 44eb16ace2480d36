//! Catalog page actions: view the grid, or add one unit of a product to the cart.

use product_grid::labels;
use product_grid::prelude::*;
use product_grid::ADD_TO_CART_FIELD;

use crate::page;

/// What the visitor asked the catalog page to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PageRequest {
    /// Show the grid, echoing the search text when present.
    View { search: Option<String> },
    /// Submit of a card's add-to-cart form.
    AddToCart { product_id: ProductId },
}

impl PageRequest {
    /// Parse an add-to-cart form body. `None` when the product id is missing.
    pub fn from_form(body: &[u8]) -> Option<Self> {
        let body = String::from_utf8_lossy(body);
        page::query_param(&body, ADD_TO_CART_FIELD)
            .filter(|id| !id.is_empty())
            .map(|id| PageRequest::AddToCart {
                product_id: ProductId::new(id),
            })
    }
}

/// Rendered answer to a [`PageRequest`].
#[derive(Debug)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Mount the grid and carry out the request.
///
/// A store failure answers 502 with the error section. Add-to-cart answers
/// 200 when a unit reached the cart, 409 when the product is out of stock or
/// the cart refused it, and 404 when the product is not in the catalog.
pub async fn serve(grid: &mut ProductGrid, request: PageRequest) -> PageResponse {
    if let PageRequest::View {
        search: Some(term),
    } = &request
    {
        grid.set_search_input(term.clone());
    }

    if grid.mount().await.is_err() {
        return PageResponse {
            status: 502,
            body: page::render_page(None, &grid.render()),
        };
    }

    let (status, notice) = match request {
        PageRequest::View { .. } => (200, None),
        PageRequest::AddToCart { product_id } => {
            match grid.on_add_to_cart(&product_id, &mut ClickEvent::new()) {
                Ok(true) => (200, Some(labels::ADDED_TO_CART)),
                Ok(false) => (409, Some(labels::OUT_OF_STOCK)),
                Err(GridError::UnknownProduct(_)) => (404, Some(labels::PRODUCT_NOT_FOUND)),
                Err(_) => (409, Some(labels::CART_ERROR)),
            }
        }
    };

    PageResponse {
        status,
        body: page::render_page(notice, &grid.render()),
    }
}
