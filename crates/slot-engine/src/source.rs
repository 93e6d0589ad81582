//! Data-access seam.
//!
//! The calculator never loads anything itself. A [`SnapshotSource`] hands it an
//! already-loaded [`ServiceSnapshot`]; load failures are reported as
//! [`SlotError::Upstream`] so callers can tell them apart from "no slots".

use std::collections::HashMap;

use crate::error::{Result, SlotError};
use crate::model::ServiceSnapshot;

/// Supplies service snapshots by id.
pub trait SnapshotSource {
    fn load(&self, service_id: &str) -> Result<ServiceSnapshot>;
}

/// Snapshots held in memory, keyed by service id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: HashMap<String, ServiceSnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: ServiceSnapshot) {
        self.snapshots.insert(snapshot.service_id.clone(), snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FromIterator<ServiceSnapshot> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = ServiceSnapshot>>(iter: I) -> Self {
        let mut source = Self::new();
        for snapshot in iter {
            source.insert(snapshot);
        }
        source
    }
}

impl SnapshotSource for InMemorySource {
    fn load(&self, service_id: &str) -> Result<ServiceSnapshot> {
        self.snapshots
            .get(service_id)
            .cloned()
            .ok_or_else(|| SlotError::UnknownService(service_id.to_string()))
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn load(&self, service_id: &str) -> Result<ServiceSnapshot> {
        (**self).load(service_id)
    }
}
