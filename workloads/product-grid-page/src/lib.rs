//! Storefront catalog page.
//!
//! Renders the product grid server-side: loads the catalog from the hosted
//! store on every request and answers with a complete HTML page. A POST from
//! a card's add-to-cart form adds one unit of that product to the cart.

mod catalog;
mod page;

use std::rc::Rc;

use spin_sdk::http::{Method, Request, Response};
use spin_sdk::{http_component, variables};

use edge_core::{GridConfig, RequestId};
use edge_observability::StructuredLogger;
use product_grid::prelude::*;

use catalog::PageRequest;

/// Catalog page handler.
#[http_component]
async fn handle_catalog(req: Request) -> anyhow::Result<Response> {
    let request = match req.method() {
        Method::Get => PageRequest::View {
            search: page::query_param(req.query(), "q"),
        },
        Method::Post => match PageRequest::from_form(req.body()) {
            Some(request) => request,
            None => {
                return Ok(Response::builder()
                    .status(400)
                    .body("Missing product_id")
                    .build())
            }
        },
        _ => {
            return Ok(Response::builder()
                .status(405)
                .header("allow", "GET, POST")
                .body("Method Not Allowed")
                .build())
        }
    };

    let request_id = RequestId::generate();
    let logger = StructuredLogger::new(request_id.clone()).with_component("product-grid-page");

    let config = GridConfig::from_lookup(|key| variables::get(key).ok())?;
    let currency = Currency::from_code(&config.currency).unwrap_or_default();

    let source = Rc::new(StoreProductSource::from_config(&config.store));
    // Carts are not persisted; each request starts empty.
    let cart = Rc::new(InMemoryCart::new(currency));
    let mut grid = ProductGrid::from_config(source, cart, logger.clone(), &config)?;

    let response = catalog::serve(&mut grid, request).await;
    logger
        .info_builder("Catalog rendered")
        .field_i64("status", response.status as i64)
        .field_i64("products", grid.state().products.len() as i64)
        .emit();

    Ok(Response::builder()
        .status(response.status)
        .header("content-type", "text/html; charset=utf-8")
        .header("cache-control", "no-store")
        .header("x-request-id", request_id.as_str())
        .body(response.body)
        .build())
}
