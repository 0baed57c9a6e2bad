//! Canvas2D style strings for core draw styles.
//!
//! Kept free of `web_sys` so the conversions are testable off-wasm.

use cellscope_core::{Color, FontWeight, LineCap, LineJoin, TextAnchor, TextStyle};

/// `rgba(...)` string for a color.
#[must_use]
pub fn color(color: &Color) -> String {
    format!(
        "rgba({},{},{},{})",
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8,
        color.a
    )
}

/// `font` shorthand for a text style.
#[must_use]
pub fn font(style: &TextStyle) -> String {
    let weight = match style.weight {
        FontWeight::Normal => "normal",
        FontWeight::Semibold => "600",
        FontWeight::Bold => "bold",
    };
    format!("{weight} {}px sans-serif", style.size)
}

/// `textAlign` value for an anchor.
#[must_use]
pub const fn text_align(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "center",
        TextAnchor::End => "end",
    }
}

/// `lineCap` value.
#[must_use]
pub const fn line_cap(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

/// `lineJoin` value.
#[must_use]
pub const fn line_join(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellscope_core::palette;

    #[test]
    fn test_color_rgba() {
        assert_eq!(color(&palette::BLUE), "rgba(59,130,246,1)");
        assert_eq!(color(&Color::WHITE.with_alpha(0.5)), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn test_font_weight() {
        let style = TextStyle::new(11.0, palette::GRAY_800).weight(FontWeight::Semibold);
        assert_eq!(font(&style), "600 11px sans-serif");
        assert_eq!(font(&TextStyle::default()), "normal 12px sans-serif");
    }

    #[test]
    fn test_anchor_and_stroke_keywords() {
        assert_eq!(text_align(TextAnchor::Middle), "center");
        assert_eq!(line_cap(LineCap::Round), "round");
        assert_eq!(line_join(LineJoin::Bevel), "bevel");
    }
}
