use crate::category::Category;

/// A content resource could not be turned into JSON.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {resource} failed: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{resource} answered HTTP {status}")]
    Status { resource: String, status: u16 },
    #[error("reading {resource} failed: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{resource} is not valid JSON: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{resource} returned {found}, expected an array")]
    Shape { resource: String, found: &'static str },
    #[error("invalid resource url {resource}: {source}")]
    Url {
        resource: String,
        #[source]
        source: url::ParseError,
    },
}

/// Which half of a catalog entry a lookup could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Media,
    Description,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{category} data not found for id {id} (missing {missing:?})")]
    NotFound { category: Category, id: String, missing: Missing },
}

impl LookupError {
    /// Text shown inline in the category's content region.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound { category, .. } => format!("{category} details not found."),
        }
    }
}

/// Why a media item could not become a grid tile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    #[error("invalid {category} item at position {index}: missing {field}")]
    MissingField { category: Category, index: usize, field: &'static str },
}

/// Scaffolding problems that stop the page from being built at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("section container for {0} is missing")]
    MissingSection(Category),
    #[error("container id `{0}` is declared twice")]
    DuplicateContainer(String),
    #[error("page layout has no sections")]
    NoSections,
}

impl PageError {
    pub fn user_message(&self) -> &'static str { "Failed to initialize application." }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
