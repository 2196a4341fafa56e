//! Shared template registry.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tasty_ontology::Schema;
use tracing::debug;
use uuid::Uuid;

use crate::entity::EntityTemplate;
use crate::error::{Result, TemplateError};
use crate::point_group::PointGroupTemplate;

#[derive(Debug, Default)]
struct Inner {
    entities: HashSet<Arc<EntityTemplate>>,
    point_groups: Vec<Arc<PointGroupTemplate>>,
    ids: HashSet<Uuid>,
}

/// Interned entity templates, registered point groups and claimed ids.
///
/// One `RwLock` guards everything: lookups take read locks, interning and
/// registration take the write lock.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    inner: RwLock<Inner>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared instance equal to `candidate`, registering it first
    /// if it is new.
    pub fn intern(&self, candidate: EntityTemplate) -> Arc<EntityTemplate> {
        if let Some(existing) = self.read().entities.get(&candidate) {
            return Arc::clone(existing);
        }
        let mut inner = self.write();
        if let Some(existing) = inner.entities.get(&candidate) {
            return Arc::clone(existing);
        }
        let interned = Arc::new(candidate);
        inner.entities.insert(Arc::clone(&interned));
        interned
    }

    /// Records a template id.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::DuplicateIdentity`] if the id was already claimed.
    pub fn claim_id(&self, id: Uuid) -> Result<()> {
        if self.write().ids.insert(id) {
            Ok(())
        } else {
            Err(TemplateError::DuplicateIdentity { id })
        }
    }

    /// Gives up a claimed id; returns `false` if it was not claimed.
    pub fn release_id(&self, id: &Uuid) -> bool {
        self.write().ids.remove(id)
    }

    /// Returns `true` if the id has been claimed.
    #[must_use]
    pub fn is_claimed(&self, id: &Uuid) -> bool {
        self.read().ids.contains(id)
    }

    /// Registers a resolved point group under its (symbol, schema, version).
    pub fn register_point_group(&self, template: Arc<PointGroupTemplate>) {
        debug!(symbol = template.symbol(), id = %template.id(), "registered point group");
        self.write().point_groups.push(template);
    }

    /// Every registered point group with this symbol, schema and version.
    #[must_use]
    pub fn find_point_groups(
        &self,
        symbol: &str,
        schema: Schema,
        version: &str,
    ) -> Vec<Arc<PointGroupTemplate>> {
        self.read()
            .point_groups
            .iter()
            .filter(|pg| pg.symbol() == symbol && pg.schema() == schema && pg.version() == version)
            .cloned()
            .collect()
    }

    /// Number of interned entity templates.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.read().entities.len()
    }

    /// Number of registered point groups.
    #[must_use]
    pub fn point_group_count(&self) -> usize {
        self.read().point_groups.len()
    }

    /// Forgets everything.
    pub fn clear(&self) {
        *self.write() = Inner::default();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
