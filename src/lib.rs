pub mod catalog;
pub mod category;
pub mod config;
pub mod detail;
pub mod error;
pub mod grid;
pub mod html;
pub mod loader;
pub mod page;
pub mod provider;
pub mod types;
pub mod ui;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{CatalogStore, Entry, LoadReport};
    pub use crate::category::Category;
    pub use crate::config::Config;
    pub use crate::detail::{Carousel, DetailView};
    pub use crate::grid::{GridView, Tile};
    pub use crate::provider::{ContentProvider, DirProvider, HttpProvider, MemoryProvider};
    pub use crate::types::{Description, MediaItem};
    pub use crate::ui::{Command, Effect, Key, UiController};
    pub use crate::{Session, Storefront};
}

use std::path::PathBuf;

use anyhow::Result;

use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::PageError;
use crate::page::Layout;
use crate::provider::{ContentProvider, DirProvider, HttpProvider};
use crate::ui::{Command, Effect, UiController};

/// Library entry point. Owns the configuration and the content provider.
pub struct Storefront {
    cfg: Config,
    provider: Box<dyn ContentProvider>,
}

impl Storefront {
    pub fn new(cfg: Config, provider: Box<dyn ContentProvider>) -> Self { Self { cfg, provider } }

    /// Fetch content over HTTP from `cfg.base_url`.
    pub fn over_http(cfg: Config) -> Result<Self> {
        let provider = HttpProvider::from_config(&cfg)?;
        Ok(Self::new(cfg, Box::new(provider)))
    }

    /// Read content from a local directory instead of the network.
    pub fn from_dir(cfg: Config, dir: impl Into<PathBuf>) -> Self {
        Self::new(cfg, Box::new(DirProvider::new(dir)))
    }

    pub fn config(&self) -> &Config { &self.cfg }

    pub async fn load(&self) -> CatalogStore { CatalogStore::load_all(self.provider.as_ref(), &self.cfg).await }

    /// Validate the scaffolding, load the catalog and render every grid.
    /// Scaffolding errors halt before anything is fetched.
    pub async fn open(&self) -> Result<Session, PageError> {
        let layout = Layout::new(&self.cfg.sections).inspect_err(|e| {
            tracing::error!(error = %e, "page initialization failed");
        })?;
        let mut ui = UiController::new(self.cfg.sidebar_menus);
        let store = self.load().await;
        ui.populate_grids(&store);
        tracing::info!("storefront ready");
        Ok(Session { layout, store, ui })
    }
}

/// One page view: the loaded catalog plus its interactive state.
pub struct Session {
    pub layout: Layout,
    pub store: CatalogStore,
    pub ui: UiController,
}

impl Session {
    pub fn dispatch(&mut self, cmd: Command) -> Effect { self.ui.dispatch(&self.store, cmd) }

    pub fn render(&self) -> String { page::render(&self.layout, Some(&self.store), &self.ui) }
}
