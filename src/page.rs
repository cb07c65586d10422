use std::collections::HashSet;
use std::fmt::Write as _;

use crate::catalog::CatalogStore;
use crate::category::Category;
use crate::error::PageError;
use crate::html;
use crate::ui::{Chrome, ModalState, UiController};

/// Section scaffolding of the page, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    sections: Vec<Category>,
}

impl Layout {
    /// Every category needs exactly one section; order is free.
    pub fn new(sections: &[Category]) -> Result<Self, PageError> {
        if sections.is_empty() { return Err(PageError::NoSections); }
        let mut seen = HashSet::new();
        for c in sections {
            if !seen.insert(*c) {
                return Err(PageError::DuplicateContainer(c.info().grid_id.to_string()));
            }
        }
        if let Some(missing) = Category::ALL.into_iter().find(|c| !seen.contains(c)) {
            return Err(PageError::MissingSection(missing));
        }
        Ok(Self { sections: sections.to_vec() })
    }

    pub fn sections(&self) -> &[Category] { &self.sections }
}

/// Render the whole page. Without a store the grids show their loading state.
pub fn render(layout: &Layout, store: Option<&CatalogStore>, ui: &UiController) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Storefront</title><link rel=\"stylesheet\" href=\"/styles.css\"></head>\n");
    let chrome = ui.chrome();
    let _ = writeln!(out, "<body class=\"{}\">", body_classes(&chrome));
    let _ = writeln!(
        out,
        "<nav class=\"{}\"><details class=\"sidebar-details\"{}><summary>Menu</summary><ul id=\"dynamic-sidebar\"></ul></details></nav>",
        sidebar_classes(&chrome),
        if ui.sidebar_open() { " open" } else { "" },
    );
    out.push_str("<main>\n");
    for (n, category) in layout.sections().iter().enumerate() {
        section(&mut out, n + 1, *category, store, ui);
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

/// Page shown instead of the storefront when scaffolding is broken.
pub fn render_error(err: &PageError) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Storefront</title></head>\n<body>{}<!-- {} --></body>\n</html>\n",
        html::error_indicator(err.user_message()),
        html::escape(&err.to_string()),
    )
}

fn section(out: &mut String, n: usize, category: Category, store: Option<&CatalogStore>, ui: &UiController) {
    let info = category.info();
    let _ = writeln!(
        out,
        "<section class=\"section-container\" id=\"section{n}\"><details class=\"section-details\"{}><summary class=\"section-summary\">{}</summary><div class=\"section-content\">",
        if ui.section_expanded(category) { " open" } else { "" },
        html::escape(info.section_title),
    );
    if let Some(msg) = ui.inline_error(category) {
        out.push_str(&html::error_indicator(msg));
    }
    if category == Category::Gaijin {
        let (link, svg) = match store {
            Some(s) => (s.external_link(), s.external_svg()),
            None => (crate::config::DEFAULT_EXTERNAL_LINK, crate::config::DEFAULT_EXTERNAL_SVG),
        };
        let link = html::escape(link);
        let _ = write!(
            out,
            "<p><a href=\"{link}\" target=\"_blank\" rel=\"noopener noreferrer\">SKIPT SKOOL</a></p><div class=\"svg-container\"><a href=\"{link}\" target=\"_blank\" rel=\"noopener noreferrer\"><img src=\"{}\" alt=\"SKIPT SKOOL Logo\" class=\"svg-image\"></a></div>",
            html::escape(svg),
        );
    } else {
        let _ = write!(out, "<p>{}</p>", html::escape(info.section_blurb));
    }

    let grid = match ui.grid(category) {
        Some(view) => html::grid(view),
        None => html::loading_indicator("Loading..."),
    };
    let _ = write!(
        out,
        "<div class=\"product-scroll-container\"><div class=\"product-grid\" id=\"{}\">{grid}</div></div>",
        info.grid_id,
    );

    let (display, detail) = match ui.modal(category) {
        ModalState::Open(view) => ("flex", html::detail(view)),
        ModalState::Closed => ("none", String::new()),
    };
    let _ = writeln!(
        out,
        "<div class=\"product-modal\" id=\"{}\" style=\"display: {display};\"><div class=\"modal-content\"><span class=\"close-modal\">&times;</span><div class=\"product-detail-container\">{detail}</div></div></div>",
        info.modal_id,
    );
    out.push_str("</div></details></section>\n");
}

fn body_classes(c: &Chrome) -> String {
    let mut classes = Vec::new();
    if c.root_menu_expanded { classes.push("menu-expanded"); }
    if c.root_submenu_expanded { classes.push("submenu-expanded"); }
    classes.join(" ")
}

fn sidebar_classes(c: &Chrome) -> String {
    let mut classes = vec!["sidebar-container"];
    if c.container_expanded { classes.push("expanded"); }
    if c.container_submenu_expanded { classes.push("submenu-expanded"); }
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::MemoryProvider;
    use crate::ui::Command;

    #[test]
    fn layout_requires_every_category_once() {
        assert!(Layout::new(&Category::ALL).is_ok());
        assert_eq!(Layout::new(&[]), Err(PageError::NoSections));
        assert_eq!(
            Layout::new(&[Category::Kotatsu, Category::Anime]),
            Err(PageError::MissingSection(Category::Ktruck))
        );
        let mut doubled = Category::ALL.to_vec();
        doubled.push(Category::Anime);
        assert_eq!(Layout::new(&doubled), Err(PageError::DuplicateContainer("anime-grid".into())));

        let mut reversed = Category::ALL.to_vec();
        reversed.reverse();
        assert_eq!(Layout::new(&reversed).unwrap().sections()[0], Category::Wsskate);
    }

    #[test]
    fn shell_renders_before_catalog_with_loading_grids() {
        let layout = Layout::new(&Category::ALL).unwrap();
        let ui = UiController::new(0);
        let html = render(&layout, None, &ui);
        assert_eq!(html.matches("<div class=\"loading-indicator\">Loading...</div>").count(), 6);
        assert!(html.contains("id=\"ktrucks-grid\""));
        assert!(html.contains("id=\"wsskate-modal\" style=\"display: none;\""));
    }

    #[tokio::test]
    async fn populated_page_shows_tiles_and_open_modal() {
        let store = CatalogStore::load_all(&MemoryProvider::new(), &Config::default()).await;
        let layout = Layout::new(&Category::ALL).unwrap();
        let mut ui = UiController::new(0);
        ui.populate_grids(&store);
        ui.dispatch(&store, Command::ShowDetail { category: Category::Kotatsu, id: "kotatsu-4".into() });
        ui.dispatch(&store, Command::ShowDetail { category: Category::Anime, id: "anime-99".into() });

        let html = render(&layout, Some(&store), &ui);
        assert_eq!(html.matches("class=\"product-item\"").count(), 25);
        assert!(html.contains("No ktruck items available."));
        assert!(html.contains("id=\"kotatsu-modal\" style=\"display: flex;\""));
        assert!(html.contains("<div class=\"spec-value\">Sample heater 4</div>"));
        assert!(html.contains("<div class=\"loading-indicator error\">anime details not found.</div>"));
        assert!(html.contains(crate::config::DEFAULT_EXTERNAL_SVG));
    }

    #[test]
    fn error_page_has_page_level_message() {
        let html = render_error(&PageError::MissingSection(Category::Gaijin));
        assert!(html.contains("Failed to initialize application."));
        assert!(!html.contains("product-grid"));
    }
}
