#![forbid(unsafe_code)]

//! Marker for field values that must never be aliased across two states.

/// A mutable container that emits its own change notifications.
///
/// Ordered copy never writes a source container handle into a destination.
/// It writes `duplicate()` instead: fresh storage holding the same elements.
/// Implementors clone their elements shallowly.
pub trait ObservableContainer: Clone + PartialEq + 'static {
    /// A new container with independent storage and the same elements.
    #[must_use]
    fn duplicate(&self) -> Self;
}
