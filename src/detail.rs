use crate::catalog::Entry;
use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselImage {
    pub src: String,
    pub alt: String,
}

/// Ordered, non-empty image sequence with exactly one visible image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    images: Vec<CarouselImage>,
    index: usize,
}

impl Carousel {
    /// `None` for an empty sequence. Image alts are `"<alt> - <n>"`, 1-based.
    pub fn new(urls: Vec<String>, alt: &str) -> Option<Self> {
        (!urls.is_empty()).then(|| Self::build(urls, alt))
    }

    /// The gallery when it has images, otherwise just `cover`.
    pub fn with_cover(cover: String, gallery: Vec<String>, alt: &str) -> Self {
        if gallery.is_empty() { Self::build(vec![cover], alt) } else { Self::build(gallery, alt) }
    }

    fn build(urls: Vec<String>, alt: &str) -> Self {
        let images = urls
            .into_iter()
            .enumerate()
            .map(|(i, src)| CarouselImage { src, alt: format!("{alt} - {}", i + 1) })
            .collect();
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize { self.images.len() }

    pub fn is_empty(&self) -> bool { self.images.is_empty() }

    pub fn index(&self) -> usize { self.index }

    pub fn images(&self) -> &[CarouselImage] { &self.images }

    pub fn current(&self) -> &CarouselImage { &self.images[self.index] }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.images.len();
        self.index
    }

    pub fn prev(&mut self) -> usize {
        let len = self.images.len();
        self.index = (self.index + len - 1) % len;
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

/// Everything the detail modal shows for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub category: Category,
    pub id: String,
    pub title: String,
    pub description: String,
    pub carousel: Carousel,
    pub specs: Vec<SpecEntry>,
}

/// Build the detail view for a resolved entry. The carousel uses the item's
/// gallery when it has one, otherwise the single main image.
pub fn present(category: Category, entry: Entry<'_>) -> DetailView {
    let Entry { item, description } = entry;
    let carousel = Carousel::with_cover(item.image_url.clone(), item.gallery.clone().unwrap_or_default(), &item.alt);
    let specs = description
        .spec_entries()
        .map(|(label, value)| SpecEntry { label: label.to_string(), value })
        .collect();
    DetailView {
        category,
        id: item.id.clone(),
        title: description.title.clone(),
        description: description.description.clone(),
        carousel,
        specs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Description, MediaItem};
    use serde_json::json;

    fn urls(n: usize) -> Vec<String> { (0..n).map(|i| format!("/assets/{i}.png")).collect() }

    #[test]
    fn cover_is_used_only_without_gallery() {
        let single = Carousel::with_cover("/assets/main.png".into(), Vec::new(), "Oak");
        assert_eq!(single.images(), [CarouselImage { src: "/assets/main.png".into(), alt: "Oak - 1".into() }]);
        let gallery = Carousel::with_cover("/assets/main.png".into(), urls(2), "Oak");
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.current().src, "/assets/0.png");
        assert!(Carousel::new(Vec::new(), "Oak").is_none());
    }

    #[test]
    fn next_applied_len_times_is_identity() {
        for len in 1..=6 {
            for start in 0..len {
                let mut c = Carousel::new(urls(len), "x").unwrap();
                for _ in 0..start { c.next(); }
                assert_eq!(c.index(), start);
                for _ in 0..len { c.next(); }
                assert_eq!(c.index(), start, "len {len} start {start}");
            }
        }
    }

    #[test]
    fn prev_inverts_next() {
        for len in 1..=5 {
            for start in 0..len {
                let mut c = Carousel::new(urls(len), "x").unwrap();
                for _ in 0..start { c.next(); }
                c.next();
                assert_eq!(c.prev(), start);
                c.prev();
                assert_eq!(c.next(), start);
            }
        }
    }

    #[test]
    fn prev_from_zero_wraps_to_last() {
        let mut c = Carousel::new(urls(3), "Truck").unwrap();
        assert_eq!(c.prev(), 2);
        assert_eq!(c.current().alt, "Truck - 3");
    }

    #[test]
    fn single_image_navigation_is_noop() {
        let mut c = Carousel::new(urls(1), "x").unwrap();
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 0);
        assert_eq!(c.current().src, "/assets/0.png");
    }

    #[test]
    fn empty_sequence_has_no_carousel() {
        assert!(Carousel::new(Vec::new(), "x").is_none());
    }

    #[test]
    fn present_uses_gallery_and_filters_reserved_fields() {
        let item = MediaItem {
            id: "t1".into(),
            image_url: "/assets/main.png".into(),
            thumbnail_url: "/assets/t.png".into(),
            alt: "Truck".into(),
            gallery: Some(vec!["/assets/g1.png".into(), "/assets/g2.png".into()]),
        };
        let description: Description = serde_json::from_value(json!({
            "id": "t1", "title": "Carry", "mileage": "40k", "description": "Nice", "year": "1998"
        }))
        .unwrap();
        let view = present(Category::Ktruck, Entry { item: &item, description: &description });

        assert_eq!(view.title, "Carry");
        assert_eq!(view.description, "Nice");
        assert_eq!(view.carousel.len(), 2);
        assert_eq!(view.carousel.index(), 0);
        assert_eq!(view.carousel.current().src, "/assets/g1.png");
        let labels: Vec<_> = view.specs.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["mileage", "year"]);
    }

    #[test]
    fn present_without_gallery_shows_main_image_only() {
        let item = MediaItem { id: "t1".into(), image_url: "/assets/main.png".into(), alt: "A".into(), ..MediaItem::default() };
        let description = Description { id: "t1".into(), ..Description::default() };
        let view = present(Category::Ktruck, Entry { item: &item, description: &description });
        assert_eq!(view.carousel.images(), [CarouselImage { src: "/assets/main.png".into(), alt: "A - 1".into() }]);
        assert!(view.specs.is_empty());

        let with_empty_gallery = MediaItem { gallery: Some(Vec::new()), ..item };
        let view = present(Category::Ktruck, Entry { item: &with_empty_gallery, description: &description });
        assert_eq!(view.carousel.len(), 1);
    }
}
