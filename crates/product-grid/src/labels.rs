//! Storefront copy. The storefront is Spanish-language; strings are kept verbatim.

/// Generic message shown when the catalog cannot be loaded.
pub const LOAD_ERROR: &str = "Error al cargar los productos";
/// Retry action label.
pub const RETRY: &str = "Reintentar";
/// Add-to-cart action label.
pub const ADD_TO_CART: &str = "Agregar al carrito";
/// Confirmation after one unit was added to the cart.
pub const ADDED_TO_CART: &str = "Agregado al carrito";
/// Shown when the cart rejected the item.
pub const CART_ERROR: &str = "No se pudo agregar al carrito";
/// Shown when an action names a product that is not in the catalog.
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
/// Shown instead of the action when stock is zero.
pub const OUT_OF_STOCK: &str = "Agotado";
/// Shown instead of the rating summary when there are no reviews.
pub const NO_RATINGS: &str = "Sin calificaciones";
/// Placeholder text for the search box.
pub const SEARCH_PLACEHOLDER: &str = "Buscar productos";
/// Accessible label of the loading indicator.
pub const LOADING: &str = "Cargando";

/// "reseña" for exactly one review, "reseñas" otherwise.
pub fn review_noun(count: u32) -> &'static str {
    if count == 1 {
        "reseña"
    } else {
        "reseñas"
    }
}

/// Rating summary text, e.g. "(4.5) 2 reseñas", or [`NO_RATINGS`].
pub fn rating_summary(average: Option<f64>, count: Option<u32>) -> String {
    match count.unwrap_or(0) {
        0 => NO_RATINGS.to_string(),
        n => format!("({:.1}) {} {}", average.unwrap_or(0.0), n, review_noun(n)),
    }
}
