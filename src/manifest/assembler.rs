//! Manifest assembly: product metadata + install location + component tree

use crate::config::PackageConfig;
use crate::error::PackageError;
use crate::manifest::document::{ManifestDocument, ProductInfo};
use crate::manifest::guid::GuidGenerator;
use crate::manifest::location::{DirectoryChain, InstallScope};
use crate::tree::walker::WalkerConfig;
use crate::tree::{ComponentBuilder, ComponentTree, ShortcutAttacher};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};

/// Builds a [`ManifestDocument`] from a validated package configuration
pub struct ManifestAssembler<'a> {
    config: &'a PackageConfig,
    guids: Box<dyn GuidGenerator>,
}

impl<'a> ManifestAssembler<'a> {
    /// Assembler using the GUID generator selected by the configuration
    pub fn new(config: &'a PackageConfig) -> Self {
        Self {
            config,
            guids: config.guids.generator(config.upgrade_code),
        }
    }

    /// Replace the GUID generator
    pub fn with_guid_generator(mut self, guids: Box<dyn GuidGenerator>) -> Self {
        self.guids = guids;
        self
    }

    /// Walk the source root and assemble the full document
    #[instrument(skip(self), fields(product = %self.config.name))]
    pub fn assemble(&self) -> Result<ManifestDocument, PackageError> {
        let product = self.product()?;
        let tree = self.component_builder().build()?;
        self.assemble_with(product, tree)
    }

    /// Assemble the document around an already-built component tree
    pub fn assemble_tree(&self, tree: ComponentTree) -> Result<ManifestDocument, PackageError> {
        let product = self.product()?;
        self.assemble_with(product, tree)
    }

    /// Component builder configured for this package
    pub fn component_builder(&self) -> ComponentBuilder {
        let shortcuts = ShortcutAttacher::new(
            self.config.executable.clone(),
            self.config.name.clone(),
            self.config.description.clone(),
            &self.config.manufacturer,
        );
        ComponentBuilder::new(self.config.source.clone())
            .with_walker_config(WalkerConfig {
                entry_policy: self.config.entry_policy,
                ignore_names: self.config.ignore.clone(),
            })
            .with_shortcuts(shortcuts)
    }

    /// Product metadata, failing if a required field is empty
    pub fn product(&self) -> Result<ProductInfo, PackageError> {
        let config = self.config;
        for (field, value) in [
            ("name", &config.name),
            ("manufacturer", &config.manufacturer),
            ("version", &config.version),
            ("install_dir", &config.install_dir),
        ] {
            if value.trim().is_empty() {
                return Err(PackageError::Assembly(format!(
                    "product metadata is missing '{}'",
                    field
                )));
            }
        }

        Ok(ProductInfo {
            name: config.name.clone(),
            version: config.version.clone(),
            manufacturer: config.manufacturer.clone(),
            description: config.description.clone(),
            upgrade_code: config.upgrade_code,
            arch: config.arch,
            scope: InstallScope::from_local(config.local),
            icon: config.icon.clone(),
        })
    }

    fn assemble_with(
        &self,
        product: ProductInfo,
        tree: ComponentTree,
    ) -> Result<ManifestDocument, PackageError> {
        let file_count = tree.root.file_count();
        if tree.component_ids.len() != file_count {
            return Err(PackageError::Assembly(format!(
                "{} component references for {} files",
                tree.component_ids.len(),
                file_count
            )));
        }
        let mut seen = HashSet::with_capacity(file_count);
        if let Some(duplicate) = tree.component_ids.iter().find(|id| !seen.insert(*id)) {
            return Err(PackageError::Assembly(format!(
                "component '{}' is referenced twice",
                duplicate
            )));
        }

        let directories = DirectoryChain::resolve(
            self.config.local,
            self.config.arch,
            self.config.root_install,
            &self.config.install_dir,
        );

        let component_guids: HashMap<_, _> = tree
            .component_ids
            .iter()
            .map(|id| (id.clone(), self.guids.component_guid(id)))
            .collect();

        info!(
            components = file_count,
            shortcuts = tree.shortcut_count(),
            install_chain = ?directories.ids(),
            scope = product.scope.as_str(),
            "Manifest assembled"
        );

        Ok(ManifestDocument {
            product,
            directories,
            tree,
            component_guids,
        })
    }
}
