use std::collections::{BTreeMap, HashSet};
use std::fmt;

use futures::future::join_all;

use crate::category::Category;
use crate::config::Config;
use crate::error::{LookupError, Missing};
use crate::loader::{CategoryData, CategoryLoader, LoadOutcome, Loaded};
use crate::provider::ContentProvider;
use crate::types::{Description, Links, MediaItem};

pub const LINKS_RESOURCE: &str = "links.json";

/// A media item joined with its description.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub item: &'a MediaItem,
    pub description: &'a Description,
}

/// In-memory catalog for one page view. Built once by [`CatalogStore::load_all`],
/// then only read.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    categories: BTreeMap<Category, CategoryData>,
    external_link: String,
    external_svg: String,
    links_outcome: LoadOutcome,
}

impl CatalogStore {
    /// Load every category and the links resource concurrently. Individual
    /// failures degrade to the category's fallback; the load as a whole never fails.
    pub async fn load_all(provider: &dyn ContentProvider, cfg: &Config) -> Self {
        tracing::info!("loading catalog");
        let loader = CategoryLoader::new(provider, cfg.asset_root(), cfg.placeholder_count);
        let (data, links) = futures::join!(
            join_all(Category::ALL.into_iter().map(|c| loader.load(c))),
            fetch_links(provider),
        );
        let store = Self::from_parts(data, links, cfg);
        for line in store.report().rows {
            tracing::info!(
                category = %line.category,
                media = line.media_count,
                descriptions = line.description_count,
                media_source = line.media_source(),
                description_source = line.description_source(),
                "category loaded"
            );
        }
        store
    }

    /// Assemble a store from already-loaded parts. Categories missing from
    /// `data` get empty collections.
    pub fn from_parts(data: Vec<CategoryData>, links: Result<Links, String>, cfg: &Config) -> Self {
        let mut categories: BTreeMap<Category, CategoryData> = data.into_iter().map(|d| (d.category, d)).collect();
        for c in Category::ALL {
            categories.entry(c).or_insert_with(|| CategoryData {
                category: c,
                media: Loaded { records: Vec::new(), outcome: LoadOutcome::Empty { reason: "not loaded".into() }, dropped: 0 },
                descriptions: Loaded { records: Vec::new(), outcome: LoadOutcome::Empty { reason: "not loaded".into() }, dropped: 0 },
            });
        }

        let mut external_link = cfg.external_link.clone();
        let mut external_svg = cfg.external_svg.clone();
        let links_outcome = match links {
            Ok(links) => {
                if let Some(l) = links.external_link.filter(|s| !s.trim().is_empty()) { external_link = l; }
                if let Some(s) = links.external_svg.filter(|s| !s.trim().is_empty()) { external_svg = s; }
                LoadOutcome::Fetched
            }
            Err(reason) => LoadOutcome::Empty { reason },
        };

        Self { categories, external_link, external_svg, links_outcome }
    }

    pub fn data(&self, category: Category) -> Option<&CategoryData> { self.categories.get(&category) }

    pub fn media(&self, category: Category) -> &[MediaItem] {
        self.categories.get(&category).map(|d| d.media.records.as_slice()).unwrap_or(&[])
    }

    pub fn descriptions(&self, category: Category) -> &[Description] {
        self.categories.get(&category).map(|d| d.descriptions.records.as_slice()).unwrap_or(&[])
    }

    pub fn external_link(&self) -> &str { &self.external_link }
    pub fn external_svg(&self) -> &str { &self.external_svg }
    pub fn links_outcome(&self) -> &LoadOutcome { &self.links_outcome }

    /// Both halves of the entry, or which half is missing. A detail view is
    /// never built from one half alone.
    pub fn lookup(&self, category: Category, id: &str) -> Result<Entry<'_>, LookupError> {
        let item = self.media(category).iter().find(|m| m.id == id);
        let description = self.descriptions(category).iter().find(|d| d.id == id);
        match (item, description) {
            (Some(item), Some(description)) => Ok(Entry { item, description }),
            (None, None) => Err(not_found(category, id, Missing::Both)),
            (None, Some(_)) => Err(not_found(category, id, Missing::Media)),
            (Some(_), None) => Err(not_found(category, id, Missing::Description)),
        }
    }

    /// Ids that appear in only one of the category's collections.
    pub fn integrity(&self, category: Category) -> Integrity {
        let media_ids: HashSet<&str> = self.media(category).iter().map(|m| m.id.as_str()).collect();
        let desc_ids: HashSet<&str> = self.descriptions(category).iter().map(|d| d.id.as_str()).collect();
        Integrity {
            media_only: self
                .media(category)
                .iter()
                .filter(|m| !desc_ids.contains(m.id.as_str()))
                .map(|m| m.id.clone())
                .collect(),
            description_only: self
                .descriptions(category)
                .iter()
                .filter(|d| !media_ids.contains(d.id.as_str()))
                .map(|d| d.id.clone())
                .collect(),
        }
    }

    pub fn report(&self) -> LoadReport {
        let rows = self
            .categories
            .values()
            .map(|d| CategoryReport {
                category: d.category,
                media_count: d.media.records.len(),
                description_count: d.descriptions.records.len(),
                media_outcome: d.media.outcome.clone(),
                description_outcome: d.descriptions.outcome.clone(),
                dropped: d.media.dropped + d.descriptions.dropped,
                integrity: self.integrity(d.category),
            })
            .collect();
        LoadReport { rows, links_outcome: self.links_outcome.clone() }
    }
}

fn not_found(category: Category, id: &str, missing: Missing) -> LookupError {
    LookupError::NotFound { category, id: id.to_string(), missing }
}

async fn fetch_links(provider: &dyn ContentProvider) -> Result<Links, String> {
    let doc = match provider.fetch_json(LINKS_RESOURCE).await {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "links unavailable, keeping defaults");
            return Err(e.to_string());
        }
    };
    serde_json::from_value(doc).map_err(|e| {
        tracing::warn!(error = %e, "links payload ignored");
        e.to_string()
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Integrity {
    pub media_only: Vec<String>,
    pub description_only: Vec<String>,
}

impl Integrity {
    pub fn is_clean(&self) -> bool { self.media_only.is_empty() && self.description_only.is_empty() }
}

#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: Category,
    pub media_count: usize,
    pub description_count: usize,
    pub media_outcome: LoadOutcome,
    pub description_outcome: LoadOutcome,
    pub dropped: usize,
    pub integrity: Integrity,
}

impl CategoryReport {
    pub fn media_source(&self) -> &'static str { source_label(&self.media_outcome) }
    pub fn description_source(&self) -> &'static str { source_label(&self.description_outcome) }
}

fn source_label(o: &LoadOutcome) -> &'static str {
    match o {
        LoadOutcome::Fetched => "fetched",
        LoadOutcome::Placeholder { .. } => "placeholder",
        LoadOutcome::Empty { .. } => "empty",
    }
}

/// Per-category summary of a catalog load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub rows: Vec<CategoryReport>,
    pub links_outcome: LoadOutcome,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.rows {
            write!(
                f,
                "{:<8} media {:>3} ({}) descriptions {:>3} ({})",
                r.category.slug(),
                r.media_count,
                r.media_source(),
                r.description_count,
                r.description_source()
            )?;
            if r.dropped > 0 { write!(f, " dropped {}", r.dropped)?; }
            if !r.integrity.is_clean() {
                write!(
                    f,
                    " orphans {}/{}",
                    r.integrity.media_only.len(),
                    r.integrity.description_only.len()
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "links    ({})", source_label(&self.links_outcome))
    }
}
