//! Persistence seam for the dataset.
//!
//! Every mutating operation follows the same shape: load the full dataset,
//! mutate it in memory, save the full dataset. [`UnitOfWork`] makes that
//! boundary explicit; the file-backed implementation lives in
//! `elearn-store`.

use std::sync::Mutex;

use crate::error::StorageError;
use crate::model::Dataset;

/// Whole-document storage for a [`Dataset`].
pub trait DomainStore {
    /// Read the entire persisted dataset.
    fn load(&self) -> Result<Dataset, StorageError>;

    /// Replace the entire persisted dataset.
    fn save(&self, dataset: &Dataset) -> Result<(), StorageError>;
}

/// A loaded dataset waiting to be committed back to its store.
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] discards
/// every change made through it.
pub struct UnitOfWork<'s, S: DomainStore + ?Sized> {
    store: &'s S,
    dataset: Dataset,
}

impl<'s, S: DomainStore + ?Sized> UnitOfWork<'s, S> {
    /// Load the current dataset from `store`.
    pub fn begin(store: &'s S) -> Result<Self, StorageError> {
        let dataset = store.load()?;
        Ok(Self { store, dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    /// Write the dataset back and hand it to the caller.
    pub fn commit(self) -> Result<Dataset, StorageError> {
        self.store.save(&self.dataset)?;
        tracing::debug!("dataset committed");
        Ok(self.dataset)
    }
}

/// In-memory store for tests and dry runs.
pub struct MemoryStore {
    dataset: Mutex<Dataset>,
    saves: Mutex<u32>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> u32 {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the currently stored dataset.
    pub fn snapshot(&self) -> Dataset {
        self.dataset
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DomainStore for MemoryStore {
    fn load(&self) -> Result<Dataset, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        *self.dataset.lock().unwrap_or_else(|e| e.into_inner()) = dataset.clone();
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;

    #[test]
    fn commit_persists_changes() {
        let store = MemoryStore::new(Dataset::default());
        let mut uow = UnitOfWork::begin(&store).unwrap();
        uow.dataset_mut()
            .insert_student(Student::new("S001", "alice", "pw"));
        uow.commit().unwrap();

        assert_eq!(store.save_count(), 1);
        assert!(store.snapshot().student("S001").is_some());
    }

    #[test]
    fn dropped_unit_of_work_discards_changes() {
        let store = MemoryStore::new(Dataset::default());
        {
            let mut uow = UnitOfWork::begin(&store).unwrap();
            uow.dataset_mut()
                .insert_student(Student::new("S001", "alice", "pw"));
        }
        assert_eq!(store.save_count(), 0);
        assert!(store.snapshot().students().is_empty());
    }

    #[test]
    fn save_of_load_is_identity() {
        let mut ds = Dataset::default();
        ds.insert_student(Student::new("S001", "alice", "pw"));
        let store = MemoryStore::new(ds.clone());
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(store.snapshot(), ds);
    }
}
