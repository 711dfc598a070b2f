//! Error and metadata store shared between views of one outcome

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

/// A value that can be attached to an outcome as metadata.
///
/// Implemented for every `'static` type with a `Debug` representation;
/// the `Debug` output is what reports and logs show.
pub trait MetadataValue: Any + fmt::Debug {
    /// Upcast for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug> MetadataValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct Ledger {
    pub(crate) errors: Vec<Error>,
    metadata: BTreeMap<String, Box<dyn MetadataValue>>,
}

impl Ledger {
    /// First write wins: returns `false` and drops `value` if `key` is taken.
    pub(crate) fn insert_metadata(&mut self, key: String, value: Box<dyn MetadataValue>) -> bool {
        if self.metadata.contains_key(&key) {
            return false;
        }
        self.metadata.insert(key, value);
        true
    }

    pub(crate) fn metadata<V: Any + Clone>(&self, key: &str) -> Option<V> {
        self.metadata
            .get(key)
            .and_then(|value| (**value).as_any().downcast_ref::<V>())
            .cloned()
    }

    pub(crate) fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    pub(crate) fn metadata_keys(&self) -> Vec<String> {
        self.metadata.keys().cloned().collect()
    }

    pub(crate) fn rendered_metadata(&self) -> BTreeMap<String, String> {
        self.metadata
            .iter()
            .map(|(key, value)| (key.clone(), format!("{:?}", value)))
            .collect()
    }

    pub(crate) fn purge_errors(&mut self) -> usize {
        let cleared = self.errors.len();
        self.errors.clear();
        cleared
    }
}
