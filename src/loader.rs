use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::category::{Category, Fallback};
use crate::error::FetchError;
use crate::provider::{expect_array, ContentProvider};
use crate::types::{Description, MediaItem};

/// Which path produced a category collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Fetched,
    /// The fetch failed and synthetic records were generated.
    Placeholder { reason: String },
    /// The fetch failed and the category's policy is to show nothing.
    Empty { reason: String },
}

impl LoadOutcome {
    pub fn is_fetched(&self) -> bool { matches!(self, LoadOutcome::Fetched) }
}

/// One collection plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub outcome: LoadOutcome,
    /// Array elements that were not records and got discarded.
    pub dropped: usize,
}

/// Everything one category contributes to the catalog.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub category: Category,
    pub media: Loaded<MediaItem>,
    pub descriptions: Loaded<Description>,
}

/// Fetches and normalizes one category's media and description collections.
pub struct CategoryLoader<'a> {
    provider: &'a dyn ContentProvider,
    asset_root: &'a str,
    placeholder_count: usize,
}

impl<'a> CategoryLoader<'a> {
    pub fn new(provider: &'a dyn ContentProvider, asset_root: &'a str, placeholder_count: usize) -> Self {
        Self { provider, asset_root: asset_root.trim_end_matches('/'), placeholder_count }
    }

    /// Never fails: fetch errors are logged and replaced per the category's fallback.
    pub async fn load(&self, category: Category) -> CategoryData {
        let info = category.info();
        let (media, descriptions) = futures::join!(
            fetch_records::<MediaItem>(self.provider, info.media_resource),
            fetch_records::<Description>(self.provider, info.description_resource),
        );

        let mut media = match media {
            Ok((records, dropped)) => Loaded { records, outcome: LoadOutcome::Fetched, dropped },
            Err(e) => self.fallback(category, &e, placeholder_media),
        };
        let descriptions = match descriptions {
            Ok((records, dropped)) => Loaded { records, outcome: LoadOutcome::Fetched, dropped },
            Err(e) => self.fallback(category, &e, placeholder_descriptions),
        };

        for item in &mut media.records {
            normalize_media_paths(item, self.asset_root);
        }

        CategoryData { category, media, descriptions }
    }

    fn fallback<T>(&self, category: Category, err: &FetchError, generate: fn(Category, usize) -> Vec<T>) -> Loaded<T> {
        let reason = err.to_string();
        match category.info().fallback {
            Fallback::Placeholder => {
                tracing::warn!(%category, error = %err, count = self.placeholder_count, "fetch failed, generating placeholder data");
                Loaded { records: generate(category, self.placeholder_count), outcome: LoadOutcome::Placeholder { reason }, dropped: 0 }
            }
            Fallback::Empty => {
                tracing::warn!(%category, error = %err, "fetch failed, leaving collection empty");
                Loaded { records: Vec::new(), outcome: LoadOutcome::Empty { reason }, dropped: 0 }
            }
        }
    }
}

async fn fetch_records<T: DeserializeOwned>(
    provider: &dyn ContentProvider,
    resource: &str,
) -> Result<(Vec<T>, usize), FetchError> {
    let items = expect_array(resource, provider.fetch_json(resource).await?)?;
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| decode_record(resource, i, v))
        .collect();
    let dropped = total - records.len();
    Ok((records, dropped))
}

fn decode_record<T: DeserializeOwned>(resource: &str, index: usize, v: Value) -> Option<T> {
    if !v.is_object() {
        tracing::warn!(resource, index, "skipping non-object record");
        return None;
    }
    match serde_json::from_value(v) {
        Ok(r) => Some(r),
        Err(e) => {
            tracing::warn!(resource, index, error = %e, "skipping undecodable record");
            None
        }
    }
}

/// Rewrites a relative image path that does not already point into an asset
/// directory to `<asset_root>/<basename>`. Absolute `http` URLs are untouched.
pub fn normalize_asset_path(url: &str, asset_root: &str) -> String {
    let root = asset_root.trim_end_matches('/');
    let under_root = !root.is_empty()
        && url.strip_prefix(root).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    let qualified = url.contains("assets") || under_root;
    if url.is_empty() || qualified || url.starts_with("http") {
        return url.to_string();
    }
    let basename = url.rsplit('/').next().unwrap_or(url);
    format!("{root}/{basename}")
}

pub fn normalize_media_paths(item: &mut MediaItem, asset_root: &str) {
    item.image_url = normalize_asset_path(&item.image_url, asset_root);
    item.thumbnail_url = normalize_asset_path(&item.thumbnail_url, asset_root);
}

/// Synthetic media items `<category>-1..=count`.
pub fn placeholder_media(category: Category, count: usize) -> Vec<MediaItem> {
    let slug = category.slug();
    let label = category.label();
    (1..=count)
        .map(|n| MediaItem {
            id: format!("{slug}-{n}"),
            image_url: format!("https://via.placeholder.com/800x500?text={slug}+Item+{n}"),
            thumbnail_url: format!("https://via.placeholder.com/200x150?text={slug}+Item+{n}"),
            alt: format!("{label} Item {n}"),
            gallery: None,
        })
        .collect()
}

/// Synthetic descriptions matching [`placeholder_media`], with the category's
/// spec fields filled as `Sample <field> <n>`.
pub fn placeholder_descriptions(category: Category, count: usize) -> Vec<Description> {
    let slug = category.slug();
    let label = category.label();
    (1..=count)
        .map(|n| {
            let mut d = Description {
                id: format!("{slug}-{n}"),
                title: format!("{label} Item {n}"),
                description: format!(
                    "This is a detailed description for {slug} item {n}. It includes all the important information that a customer might want to know before making a purchase."
                ),
                ..Description::default()
            };
            for field in category.info().placeholder_fields {
                let value = format!("Sample {field} {n}");
                match *field {
                    "title" => d.title = value,
                    "description" => d.description = value,
                    "id" => {}
                    other => {
                        d.fields.insert(other.to_string(), Value::String(value));
                    }
                }
            }
            d
        })
        .collect()
}
