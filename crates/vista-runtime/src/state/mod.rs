#![forbid(unsafe_code)]

//! Observable state objects.
//!
//! A concrete state is a plain struct that embeds a [`StateCore`], declares
//! its fields with getter/setter pairs, and implements [`ObservableState`]
//! to describe those fields. Everything else (change notification, handler
//! dispatch, commands, ordered copy, clone, reload) comes from here.
//!
//! # Example
//!
//! ```
//! use vista_core::FieldKey;
//! use vista_runtime::{
//!     ChangeHandlers, CommandMap, FieldSet, ObservableList, ObservableState, StateCore,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum CrewField { IsLoading, Station, Members }
//!
//! impl FieldKey for CrewField {
//!     const IS_LOADING: Self = Self::IsLoading;
//!     fn name(self) -> &'static str {
//!         match self {
//!             Self::IsLoading => "is_loading",
//!             Self::Station => "station",
//!             Self::Members => "members",
//!         }
//!     }
//! }
//!
//! struct CrewState {
//!     core: StateCore<CrewField>,
//!     station: String,
//!     members: ObservableList<String>,
//! }
//!
//! impl CrewState {
//!     fn set_station(&mut self, station: String) {
//!         self.core.assign(&mut self.station, station, CrewField::Station);
//!     }
//!     fn set_members(&mut self, members: ObservableList<String>) {
//!         self.core.assign(&mut self.members, members, CrewField::Members);
//!     }
//! }
//!
//! impl ObservableState for CrewState {
//!     type Field = CrewField;
//!
//!     fn core(&self) -> &StateCore<CrewField> { &self.core }
//!     fn core_mut(&mut self) -> &mut StateCore<CrewField> { &mut self.core }
//!
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.value(CrewField::Station, |s| &s.station, Self::set_station);
//!         fields.container(CrewField::Members, |s| &s.members, Self::set_members);
//!     }
//!
//!     fn sibling(core: StateCore<CrewField>) -> Self {
//!         Self { core, station: String::new(), members: ObservableList::new() }
//!     }
//! }
//!
//! let mut source = CrewState::sibling(StateCore::new(ChangeHandlers::new(), CommandMap::new()));
//! source.set_station("SLC".into());
//! source.members.push("ramp".into());
//!
//! let copy = source.duplicate();
//! source.members.push("gate".into());
//!
//! assert_eq!(copy.station, "SLC");
//! assert_eq!(copy.members.to_vec(), vec!["ramp".to_string()]);
//! ```

pub mod base;
pub mod command;
pub(crate) mod copy;
pub mod event;
pub mod fields;
pub mod handlers;

use tracing::debug;
use vista_core::{CopyError, FieldKey};

use crate::reactive::Subscription;

pub use self::base::StateCore;
pub use self::command::{Command, CommandMap, CommandTable};
pub use self::event::ChangeEvent;
pub use self::fields::{FieldEntry, FieldInfo, FieldKind, FieldSet};
pub use self::handlers::ChangeHandlers;

/// A state whose fields can be observed, copied in order, cloned, and
/// reloaded.
///
/// Implementors expose the embedded [`StateCore`], describe their fields, and
/// know how to wrap a bare core into an empty instance. Everything else is
/// provided.
pub trait ObservableState: Sized + 'static {
    /// Typed key naming this state's fields.
    type Field: FieldKey;

    /// The embedded base.
    fn core(&self) -> &StateCore<Self::Field>;

    /// The embedded base, mutably.
    fn core_mut(&mut self) -> &mut StateCore<Self::Field>;

    /// Register every copyable field, in declaration order.
    ///
    /// The loading flag is registered before this runs and must not be
    /// described again.
    fn describe(fields: &mut FieldSet<Self>);

    /// A state with default field values wrapped around `core`.
    fn sibling(core: StateCore<Self::Field>) -> Self;

    /// The descriptor list for this shape.
    #[must_use]
    fn field_set() -> FieldSet<Self> {
        let mut fields = FieldSet::new();
        Self::describe(&mut fields);
        fields
    }

    /// Field descriptions in the order a copy writes them.
    #[must_use]
    fn ordered_fields() -> Vec<FieldInfo<Self::Field>> {
        Self::field_set().infos()
    }

    /// Whether the state is mid-reload or was marked loading by a caller.
    #[must_use]
    fn is_loading(&self) -> bool {
        self.core().is_loading()
    }

    /// Set the loading flag, notifying on change.
    fn set_loading(&mut self, loading: bool) -> bool {
        self.core_mut().set_loading(loading)
    }

    /// Subscribe to the generic change event.
    fn subscribe(&self, callback: impl Fn(Self::Field) + 'static) -> Subscription {
        self.core().subscribe(callback)
    }

    /// Ordered copy of every writable field into `destination`.
    ///
    /// Containers are duplicated, other values are assigned. Writes go
    /// through the destination's setters, so its observers see one change
    /// per field that actually differed, in rank order.
    fn copy_to<'d>(&self, destination: &'d mut Self) -> &'d mut Self {
        copy::copy_same(self, destination, copy::Scope::All);
        destination
    }

    /// Ordered copy into a state of another shape, matching fields by name.
    /// Returns the destination.
    ///
    /// # Errors
    ///
    /// [`CopyError::ShapeMismatch`] when `destination` lacks a field,
    /// [`CopyError::KindMismatch`] or [`CopyError::TypeMismatch`] when a
    /// field resolves to an incompatible one. Validation completes before the
    /// first write, so on error `destination` is unchanged.
    fn copy_into<'d, D: ObservableState>(
        &self,
        destination: &'d mut D,
    ) -> Result<&'d mut D, CopyError> {
        copy::copy_across(self, destination)?;
        Ok(destination)
    }

    /// A new instance holding a field-by-field copy of this one.
    ///
    /// The clone shares the handler and command tables, starts with no
    /// subscribers, and is populated without raising notifications.
    #[must_use]
    fn duplicate(&self) -> Self {
        let mut twin = Self::sibling(self.core().sibling());
        twin.core_mut().set_muted(true);
        self.copy_to(&mut twin);
        twin.core_mut().set_muted(false);
        twin
    }

    /// Refresh in place: raise the loading flag, copy the state onto itself,
    /// lower the flag.
    ///
    /// Scalars compare equal to themselves and stay silent; every container
    /// field is swapped for a fresh duplicate and notifies.
    fn reload(&mut self) {
        debug!(state = std::any::type_name::<Self>(), "reload");
        self.set_loading(true);
        copy::copy_onto_self(self);
        self.set_loading(false);
    }

    /// Refresh from a newer snapshot: raise the loading flag, ordered-copy
    /// `source` into this state (loading flag excluded), lower the flag.
    fn reload_from(&mut self, source: &Self) {
        debug!(state = std::any::type_name::<Self>(), "reload from snapshot");
        self.set_loading(true);
        copy::copy_same(source, self, copy::Scope::ExceptLoading);
        self.set_loading(false);
    }
}
