//! Arbor — a hierarchical item-model foundation.
//!
//! This is the main umbrella crate. It hosts the item-model protocol in
//! [`model`] and re-exports the core plumbing from `arbor-core`.
//!
//! # Example
//!
//! ```
//! use arbor::model::{ItemModel, ItemRole, ModelIndex};
//! # use arbor::model::{ItemData, ItemModelImpl, ModelBase};
//! # struct Rows { base: ModelBase }
//! # impl ItemModelImpl for Rows {
//! #     fn base(&self) -> &ModelBase { &self.base }
//! #     fn on_row_count(&self, parent: ModelIndex<'_>) -> i32 {
//! #         if parent.is_valid() { 0 } else { 2 }
//! #     }
//! #     fn on_column_count(&self, parent: ModelIndex<'_>) -> i32 {
//! #         if parent.is_valid() { 0 } else { 1 }
//! #     }
//! #     fn on_data(&self, index: ModelIndex<'_>, _role: ItemRole) -> ItemData {
//! #         ItemData::from(index.row() as i64)
//! #     }
//! # }
//! # let model = Rows { base: ModelBase::new() };
//! let root = ModelIndex::invalid();
//! for row in 0..model.row_count(root) {
//!     let index = model.index(row, 0, root);
//!     println!("{:?}", model.data(index, ItemRole::Value));
//! }
//! ```

pub mod model;

pub use arbor_core::*;
