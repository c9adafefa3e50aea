//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use panel_cache::FileStore;
use panel_commerce::prelude::*;

use crate::config::PanelConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["panel.toml", ".panel.toml", "panel.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: PanelConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            let root = path
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (PanelConfig::load(&path)?, root)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (PanelConfig::default(), cwd.clone()))
        };

        Ok(Self {
            config,
            output,
            root,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PanelConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = PanelConfig::load(&config_path) {
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a configured path against the config root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        }
    }

    /// Storage key of the cart, namespaced per shopper when one is given.
    pub fn cart_key(&self, user: Option<&str>) -> String {
        let base = self.config.storage.cart_key.as_str();
        match user {
            Some(user) => panel_cache::cache_key!(base, user),
            None => base.to_string(),
        }
    }

    /// Open the persisted cart.
    pub fn open_cart(&self, user: Option<&str>) -> CartStore<FileStore> {
        let dir = self.resolve_path(&self.config.storage.dir);
        let key = self.cart_key(user);
        self.output
            .debug(&format!("cart {} in {}", key, dir.display()));
        CartStore::open(FileStore::new(dir), key)
    }

    /// Load the product catalog. A missing file gives an empty catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        if !path.exists() {
            self.output
                .debug(&format!("no catalog at {}", path.display()));
            return Ok(Catalog::default());
        }
        Catalog::load(&path).with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    /// Fetch the price table. Failure leaves the resolver unavailable so
    /// every lookup turns into a quote request.
    pub async fn load_prices(&self) -> PriceResolver {
        let path = self.resolve_path(&self.config.pricing.table);
        let mut resolver = PriceResolver::new();
        if let PriceTableState::Unavailable = resolver.load(&JsonFileSource::new(&path)).await {
            self.output.warn(&format!(
                "price table {} unavailable; prices will show as quote requests",
                path.display()
            ));
        }
        resolver
    }

    /// Catalog product by id, with a useful error when it is missing.
    pub fn product(&self, catalog: &Catalog, id: &str) -> Result<Product> {
        catalog
            .get(&ProductId::new(id))
            .cloned()
            .with_context(|| format!("Unknown product '{}' (catalog has {} products)", id, catalog.len()))
    }
}
