//! Five-star rating visual.

/// Number of stars in the visual.
pub const STAR_COUNT: usize = 5;

/// One star position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarGlyph {
    Full,
    Half,
    Empty,
}

impl StarGlyph {
    fn class(self) -> &'static str {
        match self {
            StarGlyph::Full => "full",
            StarGlyph::Half => "half",
            StarGlyph::Empty => "empty",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            StarGlyph::Full | StarGlyph::Half => "★",
            StarGlyph::Empty => "☆",
        }
    }
}

/// Glyphs for a rating in `[0, 5]`.
///
/// `floor(r)` full stars, then one half star when the fractional part is at
/// least 0.5, then empty stars. Out-of-range input is clamped and NaN reads
/// as zero.
pub fn star_glyphs(rating: f64) -> [StarGlyph; STAR_COUNT] {
    let rating = clamp_rating(rating);

    let full = rating.floor() as usize;
    let half = rating < STAR_COUNT as f64 && rating.fract() >= 0.5;

    let mut glyphs = [StarGlyph::Empty; STAR_COUNT];
    for glyph in glyphs.iter_mut().take(full) {
        *glyph = StarGlyph::Full;
    }
    if half {
        glyphs[full] = StarGlyph::Half;
    }
    glyphs
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, STAR_COUNT as f64)
    }
}

/// Render the glyphs for `rating`. A missing rating renders as zero.
pub fn render_stars(rating: Option<f64>) -> String {
    let rating = clamp_rating(rating.unwrap_or(0.0));
    let mut html = format!(
        r#"<span class="stars" aria-label="{:.1} / {}">"#,
        rating, STAR_COUNT
    );
    for glyph in star_glyphs(rating) {
        html.push_str(&format!(
            r#"<span class="star {}">{}</span>"#,
            glyph.class(),
            glyph.symbol()
        ));
    }
    html.push_str("</span>");
    html
}
