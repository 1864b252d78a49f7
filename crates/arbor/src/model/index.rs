//! Model index for addressing items in hierarchical models.
//!
//! [`ModelIndex`] is the fundamental way to reference items within an
//! [`ItemModel`]: a cheap, copyable cursor carrying a row, a column, an
//! opaque handle, and a back-reference to the model that minted it.
//!
//! # Index validity
//!
//! Indexes should be used immediately and not stored long-term. After a
//! structural mutation (removal, move), previously obtained indexes may be
//! *stale*: they still compare and hash consistently, but dereferencing them
//! through the model is unspecified, and staleness detection is
//! best-effort. Change signals, not held indexes, are the authoritative
//! notifier of structural change.

use std::hash::{Hash, Hasher};

use super::role::{ItemData, ItemRole};
use super::traits::ItemModel;

/// A cursor identifying one cell in some model.
///
/// Four fields make up an index: row and column within its parent, an
/// opaque handle only the minting model interprets, and the back-reference
/// to that model. The *invalid* index — the parent of all top-level items —
/// has row = column = −1, handle = 0, and no model.
///
/// Only a model can mint a possibly-valid index (via its implementor-side
/// factory); the public surface constructs only the invalid one. The model
/// back-reference is a shared borrow: the compiler keeps every index within
/// the lifetime of the model it was observed through, but *not* within the
/// lifetime of the item it points at.
///
/// # Example
///
/// ```ignore
/// // Get a top-level item
/// let index = model.index(0, 0, ModelIndex::invalid());
///
/// // Navigate from it
/// let child = index.child(0, 0);
/// let sibling = index.sibling(1, 0);
/// ```
#[derive(Clone, Copy)]
pub struct ModelIndex<'m> {
    row: i32,
    column: i32,
    handle: usize,
    model: Option<&'m (dyn ItemModel + 'm)>,
}

impl Default for ModelIndex<'_> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<'m> ModelIndex<'m> {
    /// Creates the invalid index.
    ///
    /// The invalid index represents the root of a model (as a parent
    /// reference), a non-existent or out-of-bounds item, or an
    /// uninitialised cursor.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: -1,
            column: -1,
            handle: 0,
            model: None,
        }
    }

    /// Creates a possibly-valid index stamped with its owning model.
    ///
    /// Reachable only through the implementor-side factory.
    #[inline]
    pub(crate) fn minted(
        row: i32,
        column: i32,
        handle: usize,
        model: &'m (dyn ItemModel + 'm),
    ) -> Self {
        Self {
            row,
            column,
            handle,
            model: Some(model),
        }
    }

    /// Row relative to [`parent`](Self::parent).
    ///
    /// The invalid index reports −1.
    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Column relative to [`parent`](Self::parent).
    ///
    /// The invalid index reports −1.
    #[inline]
    pub fn column(&self) -> i32 {
        self.column
    }

    /// The model this index belongs to, if any.
    #[inline]
    pub fn model(&self) -> Option<&'m (dyn ItemModel + 'm)> {
        self.model
    }

    /// Opaque handle identifying the physical item.
    ///
    /// Interpreted only by the minting model; callers should treat it as
    /// identity. The invalid index reports 0.
    #[inline]
    pub fn handle(&self) -> usize {
        self.handle
    }

    /// Reinterprets the handle as a typed pointer.
    ///
    /// For models whose factory encodes node pointers as handles. The
    /// returned pointer is only meaningful to the minting model, and only
    /// while the pointed-at item exists.
    #[inline]
    pub fn handle_as_ptr<T>(&self) -> *const T {
        self.handle as *const T
    }

    /// Index of the parent item.
    ///
    /// Returns the invalid index when this index has no model.
    pub fn parent(&self) -> ModelIndex<'m> {
        match self.model {
            Some(m) => m.parent(*self),
            None => ModelIndex::invalid(),
        }
    }

    /// A child of the same parent at (`row`, `column`).
    pub fn sibling(&self, row: i32, column: i32) -> ModelIndex<'m> {
        match self.model {
            Some(m) => m.index(row, column, m.parent(*self)),
            None => ModelIndex::invalid(),
        }
    }

    /// A child of this index at (`row`, `column`).
    pub fn child(&self, row: i32, column: i32) -> ModelIndex<'m> {
        match self.model {
            Some(m) => m.index(row, column, *self),
            None => ModelIndex::invalid(),
        }
    }

    /// Data of the item at this index for the given role.
    ///
    /// Returns the empty datum when this index has no model.
    pub fn data(&self, role: ItemRole) -> ItemData {
        match self.model {
            Some(m) => m.data(*self, role),
            None => ItemData::None,
        }
    }

    /// Number of child rows under this index.
    pub fn row_count(&self) -> i32 {
        match self.model {
            Some(m) => m.row_count(*self),
            None => 0,
        }
    }

    /// Number of child columns under this index.
    pub fn column_count(&self) -> i32 {
        match self.model {
            Some(m) => m.column_count(*self),
            None => 0,
        }
    }

    /// Whether this index belongs to a model and points at an actual item.
    ///
    /// Some operations may leave behind stale indexes that are still
    /// reported valid; see the module docs.
    pub fn is_valid(&self) -> bool {
        match self.model {
            Some(m) => m.is_valid(*self),
            None => false,
        }
    }

    /// Whether this index was minted by `model`, compared by identity.
    pub(crate) fn belongs_to(&self, model: &dyn ItemModel) -> bool {
        match self.model {
            Some(m) => std::ptr::addr_eq(m, model),
            None => false,
        }
    }

    fn model_addr(&self) -> usize {
        match self.model {
            Some(m) => m as *const (dyn ItemModel + 'm) as *const () as usize,
            None => 0,
        }
    }
}

impl PartialEq for ModelIndex<'_> {
    /// Structural comparison on all four fields; the model field compares
    /// by referent identity.
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
            && self.column == other.column
            && self.handle == other.handle
            && self.model_addr() == other.model_addr()
    }
}

impl Eq for ModelIndex<'_> {}

impl Hash for ModelIndex<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.column.hash(state);
        self.handle.hash(state);
        self.model_addr().hash(state);
    }
}

impl std::fmt::Debug for ModelIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.model.is_none() {
            write!(f, "ModelIndex(invalid)")
        } else {
            f.debug_struct("ModelIndex")
                .field("row", &self.row)
                .field("column", &self.column)
                .field("handle", &self.handle)
                .finish()
        }
    }
}

static_assertions::assert_impl_all!(ModelIndex<'static>: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(index: &ModelIndex<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        index.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn default_is_invalid() {
        let index = ModelIndex::default();
        assert_eq!(index.row(), -1);
        assert_eq!(index.column(), -1);
        assert_eq!(index.handle(), 0);
        assert!(index.model().is_none());
        assert!(!index.is_valid());
    }

    #[test]
    fn invalid_indexes_are_equal() {
        assert_eq!(ModelIndex::invalid(), ModelIndex::invalid());
        assert_eq!(ModelIndex::invalid(), ModelIndex::default());
        assert_eq!(
            hash_of(&ModelIndex::invalid()),
            hash_of(&ModelIndex::default())
        );
    }

    #[test]
    fn unmodeled_navigation_yields_nothing() {
        let index = ModelIndex::invalid();
        assert_eq!(index.parent(), ModelIndex::invalid());
        assert_eq!(index.sibling(0, 0), ModelIndex::invalid());
        assert_eq!(index.child(0, 0), ModelIndex::invalid());
        assert!(index.data(ItemRole::Value).is_none());
        assert_eq!(index.row_count(), 0);
        assert_eq!(index.column_count(), 0);
    }

    #[test]
    fn unmodeled_handle_pointer_is_null() {
        let index = ModelIndex::invalid();
        assert!(index.handle_as_ptr::<u32>().is_null());
    }

    #[test]
    fn debug_formats_invalid_specially() {
        assert_eq!(format!("{:?}", ModelIndex::invalid()), "ModelIndex(invalid)");
    }
}
