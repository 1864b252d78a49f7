//! Data roles and payloads for item models.
//!
//! A role selects which *facet* of an item is being read or written. Each
//! item can carry several pieces of data distinguished by role: its primary
//! value, its interaction flags, a human-readable description, and any
//! number of model-defined facets above [`USER_ROLE`].

use std::any::Any;

/// First role tag available for model-specific data.
///
/// Tags below this value are reserved for the core; `ItemRole::User(n)`
/// maps to `USER_ROLE + n`.
pub const USER_ROLE: u32 = 0xf0;

/// Standard roles for addressing the facets of an item's data.
///
/// When querying a model via `data()`, the role specifies what information
/// is being requested.
///
/// # Example
///
/// ```ignore
/// // Primary payload
/// let value = model.data(index, ItemRole::Value);
///
/// // Model-specific facet
/// let extra = model.data(index, ItemRole::User(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemRole {
    /// The primary payload of the item.
    #[default]
    Value,

    /// Permitted interactions for the item. Should return [`ItemFlags`].
    Flags,

    /// Human-readable description text. Should return a string.
    Description,

    /// Model-specific data. `User(n)` addresses tag `USER_ROLE + n`.
    User(u32),
}

impl ItemRole {
    /// Returns `true` if this is a model-defined role.
    #[inline]
    pub fn is_user_role(&self) -> bool {
        matches!(self, ItemRole::User(_))
    }

    /// Returns the numeric tag of this role.
    ///
    /// Standard roles have fixed tags below [`USER_ROLE`]; user roles have
    /// tags at or above it.
    pub fn value(&self) -> u32 {
        match self {
            ItemRole::Value => 0,
            ItemRole::Flags => 1,
            ItemRole::Description => 2,
            ItemRole::User(n) => USER_ROLE + n,
        }
    }

    /// Creates an `ItemRole` from a numeric tag.
    ///
    /// Returns `None` for reserved but undefined tags (3 up to, but not
    /// including, [`USER_ROLE`]).
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(ItemRole::Value),
            1 => Some(ItemRole::Flags),
            2 => Some(ItemRole::Description),
            v if v < USER_ROLE => None,
            n => Some(ItemRole::User(n - USER_ROLE)),
        }
    }
}

/// Flags indicating what interactions are permitted on an item.
///
/// This is the payload behind [`ItemRole::Flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    /// Item can be selected.
    pub selectable: bool,
    /// Item can be edited.
    pub editable: bool,
    /// Item is enabled (can interact).
    pub enabled: bool,
}

impl ItemFlags {
    /// Creates flags with the common defaults (selectable and enabled).
    pub fn new() -> Self {
        Self {
            selectable: true,
            enabled: true,
            ..Default::default()
        }
    }

    /// Creates flags for a disabled item.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Creates flags for an editable item.
    pub fn editable() -> Self {
        Self {
            selectable: true,
            editable: true,
            enabled: true,
        }
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the editable flag.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Type-erased container for item data.
///
/// `ItemData` is the *datum* carried by every read and write in the model
/// protocol. Its concrete type is model-defined per (index, role); the core
/// treats it as opaque with one distinguished empty state,
/// [`ItemData::None`]. Typed access goes through the `as_*` methods and the
/// generic [`downcast`](ItemData::downcast).
///
/// # Example
///
/// ```
/// use arbor::model::ItemData;
///
/// let data = ItemData::from("hello");
/// assert_eq!(data.as_str(), Some("hello"));
/// assert!(data.as_int().is_none());
///
/// let data = ItemData::new(42u32);
/// assert_eq!(data.downcast::<u32>(), Some(&42));
/// ```
#[derive(Debug, Default)]
pub enum ItemData {
    /// No data.
    #[default]
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
    /// Interaction flags (for [`ItemRole::Flags`]).
    Flags(ItemFlags),
    /// Model-specific data (type-erased).
    Custom(Box<dyn Any + Send + Sync>),
}

impl Clone for ItemData {
    fn clone(&self) -> Self {
        match self {
            ItemData::None => ItemData::None,
            ItemData::String(s) => ItemData::String(s.clone()),
            ItemData::Int(n) => ItemData::Int(*n),
            ItemData::Float(n) => ItemData::Float(*n),
            ItemData::Bool(b) => ItemData::Bool(*b),
            ItemData::Flags(f) => ItemData::Flags(*f),
            // Type-erased payloads are not clonable.
            ItemData::Custom(_) => ItemData::None,
        }
    }
}

impl ItemData {
    /// Creates custom data from any type.
    pub fn new<T: Any + Send + Sync + 'static>(value: T) -> Self {
        ItemData::Custom(Box::new(value))
    }

    /// Returns `true` if this is the empty datum.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Returns `true` if this carries some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to view the data as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to take the data as an owned string.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ItemData::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the data as interaction flags.
    pub fn as_flags(&self) -> Option<ItemFlags> {
        match self {
            ItemData::Flags(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to downcast custom data to the given type.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            ItemData::Custom(data) => data.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Attempts to downcast and take ownership of custom data.
    pub fn downcast_into<T: Any>(self) -> Option<T> {
        match self {
            ItemData::Custom(data) => data.downcast::<T>().ok().map(|b| *b),
            _ => None,
        }
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<i64> for ItemData {
    fn from(n: i64) -> Self {
        ItemData::Int(n)
    }
}

impl From<i32> for ItemData {
    fn from(n: i32) -> Self {
        ItemData::Int(n as i64)
    }
}

impl From<f64> for ItemData {
    fn from(n: f64) -> Self {
        ItemData::Float(n)
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Bool(b)
    }
}

impl From<ItemFlags> for ItemData {
    fn from(f: ItemFlags) -> Self {
        ItemData::Flags(f)
    }
}

impl From<Option<String>> for ItemData {
    fn from(opt: Option<String>) -> Self {
        match opt {
            Some(s) => ItemData::String(s),
            None => ItemData::None,
        }
    }
}
