#![forbid(unsafe_code)]

//! Reactive building blocks for state fields.
//!
//! - [`ObservableList`]: a shared list that reports item-level changes.
//! - [`ObservableContainer`]: values that ordered copy duplicates instead of
//!   aliasing.
//! - [`Shared`]: a plain shared reference, copied by handle.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//!
//! # Architecture
//!
//! Everything here is single-threaded (`Rc<RefCell<..>>`). Subscribers are
//! held weakly and pruned lazily during notification.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Cloning a container or a `Shared` handle aliases it; only
//!    [`ObservableContainer::duplicate`] produces independent storage.
//! 3. Container and `Shared` equality is identity, never contents.

pub mod container;
pub mod list;
pub mod shared;
pub(crate) mod subscription;

pub use container::ObservableContainer;
pub use list::{ListChange, ObservableList};
pub use shared::Shared;
pub use subscription::Subscription;
