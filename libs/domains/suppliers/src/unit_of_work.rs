//! Staged changes applied together by [`crate::SupplierRepository::commit`].

use uuid::Uuid;

use crate::models::Supplier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Insert(Supplier),
    /// Overwrite the row with the same id
    Update(Supplier),
    Remove(Uuid),
}

/// Ordered list of pending changes. Nothing reaches storage until commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, supplier: Supplier) -> &mut Self {
        self.changes.push(Change::Insert(supplier));
        self
    }

    pub fn update(&mut self, supplier: Supplier) -> &mut Self {
        self.changes.push(Change::Update(supplier));
        self
    }

    pub fn remove(&mut self, supplier: &Supplier) -> &mut Self {
        self.changes.push(Change::Remove(supplier.id));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
