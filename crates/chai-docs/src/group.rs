//! Loaded documentation groups.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chai_storage::{Storage, StorageError};

use crate::builder::build_navigation;
use crate::error::ContentError;
use crate::layout::GroupSpec;
use crate::navigation::Navigation;
use crate::position::Position;

/// A documentation group with its prebuilt navigation.
pub struct DocGroup {
    spec: GroupSpec,
    navigation: Navigation,
    storage: Arc<dyn Storage>,
}

impl DocGroup {
    /// Build the group's navigation from `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the content tree is invalid.
    pub fn load(storage: Arc<dyn Storage>, spec: GroupSpec) -> Result<Self, ContentError> {
        let navigation = build_navigation(storage.as_ref(), &spec)?;
        Ok(Self {
            spec,
            navigation,
            storage,
        })
    }

    /// Group description.
    #[must_use]
    pub fn spec(&self) -> &GroupSpec {
        &self.spec
    }

    /// Group slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.spec.slug
    }

    /// Navigation tree.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Markdown source of the page at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the document can't be read. Positions the
    /// layout has no document for report a not-found storage error.
    pub fn page_source(&self, position: Position) -> Result<String, ContentError> {
        let Some(path) = self.spec.document_path(position) else {
            let path = self.spec.dir().join(position.tail());
            return Err(ContentError::Storage {
                source: StorageError::not_found(&path),
                path,
            });
        };
        self.storage
            .read(&path)
            .map_err(ContentError::storage(&path))
    }

    /// Attachments of the page at `position`, keyed by file stem.
    ///
    /// Only configured attachments that exist are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if an existing attachment can't be read.
    pub fn attachments(&self, position: Position) -> Result<BTreeMap<String, String>, ContentError> {
        let mut found = BTreeMap::new();
        let Some(dir) = self.spec.attachment_dir(position) else {
            return Ok(found);
        };

        for name in &self.spec.attachments {
            let path = dir.join(name);
            if !self.storage.exists(&path) {
                continue;
            }
            let content = self
                .storage
                .read(&path)
                .map_err(ContentError::storage(&path))?;
            found.insert(attachment_key(name), content);
        }
        Ok(found)
    }
}

impl std::fmt::Debug for DocGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocGroup")
            .field("spec", &self.spec)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

/// Key for an attachment: the file name up to its last extension.
fn attachment_key(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map_or_else(|| name.to_owned(), |stem| stem.to_string_lossy().into_owned())
}

/// Every documentation group of the site, built once at startup.
#[derive(Debug, Default)]
pub struct DocsCatalog {
    groups: Vec<Arc<DocGroup>>,
}

impl DocsCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every group, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] encountered.
    pub fn load(
        storage: &Arc<dyn Storage>,
        specs: impl IntoIterator<Item = GroupSpec>,
    ) -> Result<Self, ContentError> {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.insert(DocGroup::load(Arc::clone(storage), spec)?);
        }
        tracing::info!(groups = catalog.groups.len(), "Loaded documentation groups");
        Ok(catalog)
    }

    /// Build every group and collect all errors instead of stopping early.
    #[must_use]
    pub fn check(
        storage: &dyn Storage,
        specs: impl IntoIterator<Item = GroupSpec>,
    ) -> Vec<(GroupSpec, Result<Navigation, ContentError>)> {
        specs
            .into_iter()
            .map(|spec| {
                let result = build_navigation(storage, &spec);
                (spec, result)
            })
            .collect()
    }

    /// Add a group, replacing any group with the same slug.
    pub fn insert(&mut self, group: DocGroup) {
        let group = Arc::new(group);
        if let Some(existing) = self.groups.iter_mut().find(|g| g.slug() == group.slug()) {
            *existing = group;
        } else {
            self.groups.push(group);
        }
    }

    /// Group by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Arc<DocGroup>> {
        self.groups.iter().find(|group| group.slug() == slug)
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Arc<DocGroup>> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if the catalog has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
