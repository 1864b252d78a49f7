//! The hierarchical item model at the heart of Arbor.
//!
//! This module defines the contract between concrete data providers and the
//! view components that consume them: a forest of two-dimensional grids,
//! addressed by lightweight indexes and read through roles.
//!
//! # Core types
//!
//! - [`ModelIndex`]: a value-typed cursor identifying one cell in a model
//! - [`ItemRole`]: selects which facet of an item's data is addressed
//! - [`ItemData`]: type-erased payload with a distinguished empty state
//! - [`ItemModel`]: the validating surface consumers call
//! - [`ItemModelImpl`]: the hook surface concrete models implement
//! - [`ModelBase`]: per-model state (signals, move status) implementors embed
//! - [`ModelSignals`]: change notifications views subscribe to
//!
//! # Architecture overview
//!
//! ```text
//! ┌───────────────┐ validates  ┌───────────────┐ state/emit ┌──────────────┐
//! │   ItemModel   │───────────▶│ ItemModelImpl │───────────▶│  ModelBase   │
//! │  (consumers)  │  forwards  │ (implementor) │            │ ModelSignals │
//! └───────────────┘            └───────────────┘            └──────────────┘
//!         ▲                            │ mints
//!         │ delegates                  ▼
//!         └────────────────────── ModelIndex ◀─── views/observers
//! ```
//!
//! Every public operation on [`ItemModel`] validates its arguments, invokes
//! the implementor hook, and emits the matching signal on success. A
//! structural move is observed as a single `rows_moved`/`columns_moved`
//! event: the componentwise remove emissions inside the move are suppressed
//! by the model's move-in-progress state.
//!
//! # Example
//!
//! ```
//! use arbor::model::{ItemData, ItemModel, ItemModelImpl, ItemRole, ModelBase, ModelIndex};
//!
//! struct Checklist {
//!     base: ModelBase,
//!     entries: Vec<String>,
//! }
//!
//! impl ItemModelImpl for Checklist {
//!     fn base(&self) -> &ModelBase {
//!         &self.base
//!     }
//!
//!     fn on_row_count(&self, parent: ModelIndex<'_>) -> i32 {
//!         if parent.is_valid() { 0 } else { self.entries.len() as i32 }
//!     }
//!
//!     fn on_column_count(&self, parent: ModelIndex<'_>) -> i32 {
//!         if parent.is_valid() { 0 } else { 1 }
//!     }
//!
//!     fn on_data(&self, index: ModelIndex<'_>, role: ItemRole) -> ItemData {
//!         match (role, self.entries.get(index.row() as usize)) {
//!             (ItemRole::Value, Some(entry)) => ItemData::from(entry.as_str()),
//!             _ => ItemData::None,
//!         }
//!     }
//! }
//!
//! let model = Checklist {
//!     base: ModelBase::new(),
//!     entries: vec!["water the plants".into(), "prune the hedge".into()],
//! };
//!
//! let index = model.index(1, 0, ModelIndex::invalid());
//! assert_eq!(model.data(index, ItemRole::Value).as_str(), Some("prune the hedge"));
//! ```

mod index;
mod role;
mod traits;

pub use index::ModelIndex;
pub use role::{ItemData, ItemFlags, ItemRole, USER_ROLE};
pub use traits::{
    DataChangedSlot, ItemModel, ItemModelImpl, ModelBase, ModelSignals, SectionMovedSlot,
    SectionSlot,
};
