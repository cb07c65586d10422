//! HTML serialisation of the view types.

use std::fmt::Write as _;

use crate::detail::DetailView;
use crate::grid::{GridView, Tile};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn loading_indicator(text: &str) -> String {
    format!(r#"<div class="loading-indicator">{}</div>"#, escape(text))
}

pub fn error_indicator(text: &str) -> String {
    format!(r#"<div class="loading-indicator error">{}</div>"#, escape(text))
}

/// Inner HTML of a grid container.
pub fn grid(view: &GridView) -> String {
    let mut out = String::new();
    for tile in &view.tiles {
        match tile {
            Tile::Placeholder { text } => out.push_str(&loading_indicator(text)),
            Tile::Item(t) => {
                let _ = write!(
                    out,
                    r#"<div class="product-item" data-id="{id}" data-category="{cat}"><img class="product-image" src="{src}" alt="{alt}" data-fallback="{fallback}"><div class="product-title">{alt}</div></div>"#,
                    id = escape(&t.id),
                    cat = view.category.slug(),
                    src = escape(&t.thumbnail_src),
                    alt = escape(&t.alt),
                    fallback = escape(&t.fallback_src),
                );
            }
        }
    }
    out
}

/// Inner HTML of a modal's detail container.
pub fn detail(view: &DetailView) -> String {
    let mut out = String::from(r#"<div class="carousel-container">"#);
    for (i, img) in view.carousel.images().iter().enumerate() {
        let display = if i == view.carousel.index() { "block" } else { "none" };
        let _ = write!(
            out,
            r#"<img class="carousel-image" src="{}" alt="{}" style="display: {display};" data-index="{i}">"#,
            escape(&img.src),
            escape(&img.alt),
        );
    }
    out.push_str(r#"<button class="carousel-button prev">&larr;</button><button class="carousel-button next">&rarr;</button></div>"#);
    let _ = write!(out, r#"<h2 class="product-detail-title">{}</h2>"#, escape(&view.title));
    out.push_str(r#"<div class="product-detail-specs">"#);
    for spec in &view.specs {
        let _ = write!(
            out,
            r#"<div class="spec-item"><div class="spec-label">{}</div><div class="spec-value">{}</div></div>"#,
            escape(&spec.label),
            escape(&spec.value),
        );
    }
    out.push_str("</div>");
    let _ = write!(out, r#"<p class="product-detail-description">{}</p>"#, escape(&view.description));
    out
}
