#![forbid(unsafe_code)]

//! Typed field keys.
//!
//! A concrete state names its fields with a small enum implementing
//! [`FieldKey`]. Change events, handler tables, and field descriptors are all
//! keyed by that enum instead of by property-name strings. The string name is
//! still available for logging and for matching fields across two different
//! state shapes.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifies one field of a state.
///
/// # Example
///
/// ```
/// use vista_core::FieldKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum RosterField {
///     IsLoading,
///     Title,
/// }
///
/// impl FieldKey for RosterField {
///     const IS_LOADING: Self = Self::IsLoading;
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::IsLoading => "is_loading",
///             Self::Title => "title",
///         }
///     }
/// }
///
/// assert_eq!(RosterField::Title.name(), "title");
/// assert!(RosterField::IsLoading.is_loading());
/// ```
pub trait FieldKey: Copy + Eq + Hash + Debug + 'static {
    /// Key of the loading flag every state carries.
    const IS_LOADING: Self;

    /// Stable field name. Two state shapes are copy-compatible on the fields
    /// whose names match.
    fn name(self) -> &'static str;

    /// Whether this key is the loading flag.
    #[must_use]
    fn is_loading(self) -> bool {
        self == Self::IS_LOADING
    }
}
