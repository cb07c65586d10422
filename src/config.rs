//! Runtime configuration: built-in defaults, an optional TOML file, then
//! `STOREFRONT_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::category::Category;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/data/";
pub const DEFAULT_ASSET_ROOT: &str = "/assets";
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 5;
pub const DEFAULT_EXTERNAL_LINK: &str = "https://skiptskool.onrender.com/";
pub const DEFAULT_EXTERNAL_SVG: &str = "./assets/SKPTSKL-T1.svg";
pub const DEFAULT_USER_AGENT: &str = "storefront/0.1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root the content resources are resolved against.
    pub base_url: String,
    /// Directory relative image paths are rewritten into.
    pub asset_root: String,
    /// Synthetic records generated per category when a fetch fails.
    pub placeholder_count: usize,
    pub external_link: String,
    pub external_svg: String,
    pub user_agent: String,
    /// Per-request timeout; unset means the client default (no limit).
    pub request_timeout_ms: Option<u64>,
    /// Page sections in display order.
    pub sections: Vec<Category>,
    /// Submenus in the sidebar. Independent of `sections`: the menu entries come
    /// from the sidebar copy, not from the catalog categories.
    pub sidebar_menus: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            placeholder_count: DEFAULT_PLACEHOLDER_COUNT,
            external_link: DEFAULT_EXTERNAL_LINK.to_string(),
            external_svg: DEFAULT_EXTERNAL_SVG.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_ms: None,
            sections: Category::ALL.to_vec(),
            sidebar_menus: 0,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Parse { path: origin.display().to_string(), source })
    }

    /// Resolve the configuration. An explicit `path` must exist; otherwise the
    /// platform config file is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        let mut cfg = match file {
            Some(p) => {
                let raw = fs::read_to_string(&p)
                    .map_err(|source| ConfigError::Read { path: p.display().to_string(), source })?;
                Self::from_toml_str(&raw, &p)?
            }
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `STOREFRONT_*` overrides read through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where F: Fn(&str) -> Option<String> {
        let get = |k: &str| var(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("STOREFRONT_BASE_URL") { self.base_url = v; }
        if let Some(v) = get("STOREFRONT_ASSET_ROOT") { self.asset_root = v; }
        if let Some(v) = get("STOREFRONT_EXTERNAL_LINK") { self.external_link = v; }
        if let Some(v) = get("STOREFRONT_EXTERNAL_SVG") { self.external_svg = v; }
        if let Some(v) = get("STOREFRONT_USER_AGENT") { self.user_agent = v; }
        if let Some(v) = get("STOREFRONT_PLACEHOLDER_COUNT") {
            self.placeholder_count = v
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "STOREFRONT_PLACEHOLDER_COUNT", value: v.clone() })?;
        }
        if let Some(v) = get("STOREFRONT_SIDEBAR_MENUS") {
            self.sidebar_menus = v
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "STOREFRONT_SIDEBAR_MENUS", value: v.clone() })?;
        }
        if let Some(v) = get("STOREFRONT_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = Some(
                v.parse()
                    .map_err(|_| ConfigError::Invalid { key: "STOREFRONT_REQUEST_TIMEOUT_MS", value: v.clone() })?,
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.asset_root.trim().is_empty() {
            return Err(ConfigError::Invalid { key: "asset_root", value: self.asset_root.clone() });
        }
        Ok(())
    }

    /// `base_url` parsed, with a trailing slash so resources join beneath it.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') { raw.push('/'); }
        Url::parse(&raw).map_err(|_| ConfigError::Invalid { key: "base_url", value: self.base_url.clone() })
    }

    /// Asset root without a trailing slash.
    pub fn asset_root(&self) -> &str { self.asset_root.trim_end_matches('/') }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "storefront").map(|d| d.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.placeholder_count, 5);
        assert_eq!(cfg.asset_root(), "/assets");
        assert_eq!(cfg.sections, Category::ALL.to_vec());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let cfg = Config::from_toml_str(
            r#"
            base_url = "https://shop.test/api/data"
            placeholder_count = 3
            sections = ["kotatsu", "anime"]
            "#,
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(cfg.placeholder_count, 3);
        assert_eq!(cfg.base_url().unwrap().as_str(), "https://shop.test/api/data/");
        assert_eq!(cfg.sections, vec![Category::Kotatsu, Category::Anime]);
        assert_eq!(cfg.external_link, DEFAULT_EXTERNAL_LINK);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("colour = \"red\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_apply_and_validate() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_ASSET_ROOT", "/static/img/"),
            ("STOREFRONT_PLACEHOLDER_COUNT", "2"),
            ("STOREFRONT_REQUEST_TIMEOUT_MS", "1500"),
            ("STOREFRONT_SIDEBAR_MENUS", "4"),
            ("STOREFRONT_EXTERNAL_LINK", "  "),
        ]);
        let mut cfg = Config::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.asset_root(), "/static/img");
        assert_eq!(cfg.placeholder_count, 2);
        assert_eq!(cfg.request_timeout_ms, Some(1500));
        assert_eq!(cfg.sidebar_menus, 4);
        assert_eq!(cfg.external_link, DEFAULT_EXTERNAL_LINK);

        let mut bad = Config::default();
        let err = bad
            .apply_env(|k| (k == "STOREFRONT_PLACEHOLDER_COUNT").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOREFRONT_PLACEHOLDER_COUNT", .. }));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        fs::write(&path, "asset_root = \"/img\"\n").unwrap();
        let cfg = Config::load(Some(path.as_path())).unwrap();
        assert!(cfg.asset_root.starts_with('/'));

        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(missing.as_path())), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn bad_base_url_fails_validation() {
        let cfg = Config { base_url: "not a url".into(), ..Config::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { key: "base_url", .. })));
    }
}
