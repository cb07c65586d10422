use crate::category::Category;
use crate::error::TileError;
use crate::types::MediaItem;
use crate::ui::Command;

/// One clickable grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTile {
    pub id: String,
    pub thumbnail_src: String,
    /// Shown if the thumbnail fails to load.
    pub fallback_src: String,
    pub alt: String,
    pub on_activate: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    Item(ItemTile),
    /// Stands in for an empty collection.
    Placeholder { text: String },
}

/// Projection of one category's media items into tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub category: Category,
    pub tiles: Vec<Tile>,
    /// Items that could not be rendered, in source order.
    pub skipped: Vec<TileError>,
}

impl GridView {
    pub fn item_tiles(&self) -> impl Iterator<Item = &ItemTile> {
        self.tiles.iter().filter_map(|t| match t {
            Tile::Item(i) => Some(i),
            Tile::Placeholder { .. } => None,
        })
    }

    pub fn is_placeholder(&self) -> bool { matches!(self.tiles.as_slice(), [Tile::Placeholder { .. }]) }
}

/// One tile per item, in feed order. An empty collection yields exactly one
/// placeholder tile; invalid items are skipped and reported.
pub fn render_grid(category: Category, items: &[MediaItem]) -> GridView {
    tracing::debug!(%category, count = items.len(), "rendering grid");
    if items.is_empty() {
        tracing::warn!(%category, "no items available");
        return GridView {
            category,
            tiles: vec![Tile::Placeholder { text: format!("No {category} items available.") }],
            skipped: Vec::new(),
        };
    }

    let mut tiles = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match build_tile(category, index, item) {
            Ok(tile) => tiles.push(Tile::Item(tile)),
            Err(e) => {
                tracing::error!(error = %e, id = %item.id, "skipping tile");
                skipped.push(e);
            }
        }
    }
    GridView { category, tiles, skipped }
}

fn build_tile(category: Category, index: usize, item: &MediaItem) -> Result<ItemTile, TileError> {
    let missing = |field: &'static str| TileError::MissingField { category, index, field };
    if item.thumbnail_url.trim().is_empty() { return Err(missing("thumbnailUrl")); }
    if item.alt.trim().is_empty() { return Err(missing("alt")); }
    if item.id.trim().is_empty() { return Err(missing("id")); }

    Ok(ItemTile {
        id: item.id.clone(),
        thumbnail_src: rooted(&item.thumbnail_url),
        fallback_src: format!("https://via.placeholder.com/200x150?text={}", item.id),
        alt: item.alt.clone(),
        on_activate: Command::ShowDetail { category, id: item.id.clone() },
    })
}

/// Absolute URLs pass through; anything else is made root-relative.
fn rooted(url: &str) -> String {
    if url.starts_with("http") || url.starts_with('/') { url.to_string() } else { format!("/{url}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::placeholder_media;

    fn item(id: &str, thumb: &str, alt: &str) -> MediaItem {
        MediaItem { id: id.into(), thumbnail_url: thumb.into(), alt: alt.into(), ..MediaItem::default() }
    }

    #[test]
    fn empty_collection_renders_single_placeholder() {
        let grid = render_grid(Category::Anime, &[]);
        assert_eq!(grid.tiles, vec![Tile::Placeholder { text: "No anime items available.".into() }]);
        assert!(grid.is_placeholder());
        assert!(grid.skipped.is_empty());
    }

    #[test]
    fn tiles_follow_feed_order_and_carry_activation() {
        let items = placeholder_media(Category::Kotatsu, 5);
        let grid = render_grid(Category::Kotatsu, &items);
        let ids: Vec<_> = grid.item_tiles().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["kotatsu-1", "kotatsu-2", "kotatsu-3", "kotatsu-4", "kotatsu-5"]);
        let first = grid.item_tiles().next().unwrap();
        assert_eq!(first.on_activate, Command::ShowDetail { category: Category::Kotatsu, id: "kotatsu-1".into() });
    }

    #[test]
    fn invalid_items_are_skipped_not_fatal() {
        let items = vec![
            item("a", "/assets/a.png", "A"),
            item("b", "", "B"),
            item("c", "/assets/c.png", ""),
            item("", "/assets/d.png", "D"),
            item("e", "assets/e.png", "E"),
        ];
        let grid = render_grid(Category::Jstore, &items);
        let ids: Vec<_> = grid.item_tiles().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "e"]);
        assert_eq!(
            grid.skipped,
            vec![
                TileError::MissingField { category: Category::Jstore, index: 1, field: "thumbnailUrl" },
                TileError::MissingField { category: Category::Jstore, index: 2, field: "alt" },
                TileError::MissingField { category: Category::Jstore, index: 3, field: "id" },
            ]
        );
        assert!(!grid.is_placeholder());
    }

    #[test]
    fn thumbnail_sources_are_rooted() {
        let grid = render_grid(
            Category::Gaijin,
            &[item("a", "assets/a.png", "A"), item("b", "https://cdn.test/b.png", "B"), item("c", "/assets/c.png", "C")],
        );
        let srcs: Vec<_> = grid.item_tiles().map(|t| t.thumbnail_src.as_str()).collect();
        assert_eq!(srcs, ["/assets/a.png", "https://cdn.test/b.png", "/assets/c.png"]);
        assert_eq!(grid.item_tiles().next().unwrap().fallback_src, "https://via.placeholder.com/200x150?text=a");
    }
}
