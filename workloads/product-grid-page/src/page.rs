//! Page shell around the grid section.

const PAGE_STYLES: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, sans-serif; color: #1f2937; background: #f9fafb; }
main { max-width: 1200px; margin: 0 auto; padding: 24px 16px; }
.grid-search input { width: 100%; padding: 10px 14px; border: 1px solid #d1d5db; border-radius: 8px; margin-bottom: 24px; }
.product-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 24px; }
.product-card { background: #fff; border-radius: 12px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.product-link { display: block; color: inherit; text-decoration: none; }
.product-image img, .image-placeholder { width: 100%; aspect-ratio: 1; object-fit: cover; background: #e5e7eb; }
.product-info { padding: 16px; display: flex; flex-direction: column; gap: 8px; }
.product-title { font-size: 1rem; font-weight: 600; }
.product-price { font-size: 1.125rem; font-weight: 700; }
.stars .star { color: #d1d5db; }
.stars .star.full { color: #f59e0b; }
.stars .star.half { background: linear-gradient(90deg, #f59e0b 50%, #d1d5db 50%); -webkit-background-clip: text; background-clip: text; color: transparent; }
.rating-summary { font-size: .875rem; color: #6b7280; margin-left: 4px; }
.add-to-cart-form { padding: 0 16px 16px; }
.add-to-cart { padding: 8px 12px; border: 0; border-radius: 8px; background: #2563eb; color: #fff; cursor: pointer; }
.out-of-stock { display: block; padding: 0 16px 16px; color: #dc2626; font-weight: 600; }
.cart-notice { padding: 12px 16px; margin-bottom: 24px; border-radius: 8px; background: #eff6ff; color: #1e40af; }
.loading { display: flex; justify-content: center; padding: 64px 0; }
.spinner { width: 40px; height: 40px; border: 4px solid #e5e7eb; border-top-color: #2563eb; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.error-state { text-align: center; padding: 64px 0; }
.error-message { color: #dc2626; margin-bottom: 16px; }
.retry { padding: 8px 16px; border: 1px solid #d1d5db; border-radius: 8px; background: #fff; cursor: pointer; }
"#;

/// Wrap the grid section in a full document, with an optional cart notice above it.
pub fn render_page(notice: Option<&str>, grid_html: &str) -> String {
    let notice = notice
        .map(|text| format!("<p class=\"cart-notice\" role=\"status\">{}</p>\n", text))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Productos</title>
    <style>{}</style>
</head>
<body>
<main>
{}{}
</main>
</body>
</html>"#,
        PAGE_STYLES, notice, grid_html
    )
}

/// First value of `name` in a query string, form-decoded.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| form_decode(value))
}

fn form_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("q=taza+roja&page=2", "q").as_deref(), Some("taza roja"));
        assert_eq!(query_param("page=2&q=caf%C3%A9", "q").as_deref(), Some("café"));
        assert_eq!(query_param("page=2", "q"), None);
        assert_eq!(query_param("q", "q").as_deref(), Some(""));
    }

    #[test]
    fn test_form_decode_keeps_malformed_escapes() {
        assert_eq!(form_decode("100%"), "100%");
        assert_eq!(form_decode("%zz"), "%zz");
    }

    #[test]
    fn test_render_page_wraps_section() {
        let html = render_page(None, "<section>grid</section>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<main>\n<section>grid</section>\n</main>"));
        assert!(!html.contains("cart-notice\""));
    }

    #[test]
    fn test_render_page_shows_notice_above_grid() {
        let html = render_page(Some("Agregado al carrito"), "<section>grid</section>");
        assert!(html.contains(
            "<main>\n<p class=\"cart-notice\" role=\"status\">Agregado al carrito</p>\n<section>grid</section>"
        ));
    }

    #[test]
    fn test_half_star_styled_apart_from_full() {
        let rule = |selector: &str| {
            PAGE_STYLES
                .lines()
                .find(|line| line.starts_with(selector))
                .map(str::to_string)
        };
        let full = rule(".stars .star.full {").unwrap();
        let half = rule(".stars .star.half {").unwrap();

        assert!(full.contains("color: #f59e0b"));
        assert!(half.contains("linear-gradient(90deg, #f59e0b 50%, #d1d5db 50%)"));
        assert!(half.contains("background-clip: text"));
        assert!(!PAGE_STYLES.contains(".star.full, .stars .star.half"));
    }
}
