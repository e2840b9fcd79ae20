use super::entities::Gesture;
use super::error::Result;
use super::record::{self, TemplateRecord};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// The trained and loaded templates of one engine session.
///
/// Templates are only ever appended. Reads hand out a snapshot, so a
/// recognition pass sees either all of a concurrent `add` or none of it.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: RwLock<Vec<Arc<Gesture>>>,
}

impl TemplateStore {
    pub fn new() -> TemplateStore {
        TemplateStore::default()
    }

    // Writers only push whole Arcs, so a poisoned lock still guards a valid list
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Gesture>>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Gesture>>> {
        self.templates.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Names `gesture` and appends it.
    pub fn add(&self, gesture: Gesture, name: &str) -> Arc<Gesture> {
        let template = Arc::new(gesture.with_name(name));
        let count = {
            let mut templates = self.write();
            templates.push(Arc::clone(&template));
            templates.len()
        };
        info!(name, count, "gesture template added");
        template
    }

    /// Rebuilds a template from a stored record and appends it.
    pub fn load_one(&self, record: &TemplateRecord) -> Result<Arc<Gesture>> {
        let template = Arc::new(Gesture::from_record(record)?);
        self.write().push(Arc::clone(&template));
        info!(name = %record.gesture_name, "gesture template loaded");
        Ok(template)
    }

    /// Loads every template of a bincode bundle. Nothing is added if any record is bad.
    pub fn load_bundle(&self, bytes: &[u8]) -> Result<usize> {
        let records = record::decode_bundle(bytes)?;
        let gestures = records
            .iter()
            .map(Gesture::from_record)
            .collect::<Result<Vec<Gesture>>>()?;
        let count = gestures.len();
        self.write().extend(gestures.into_iter().map(Arc::new));
        info!(count, "gesture bundle loaded");
        Ok(count)
    }

    pub fn size(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the templates in insertion order.
    pub fn list(&self) -> Vec<Arc<Gesture>> {
        self.read().clone()
    }
}
