#![forbid(unsafe_code)]

//! Field descriptors.
//!
//! A concrete state lists its copyable fields once, in
//! [`ObservableState::describe`]. Each entry pairs a typed key with a getter,
//! an optional setter, ordering metadata, and a copy policy:
//!
//! | Constructor   | Policy on copy                                   |
//! |---------------|--------------------------------------------------|
//! | `value`       | clone the value into the destination setter      |
//! | `container`   | write `duplicate()` of the source container      |
//! | `read_only`   | enumerated, never written                        |
//!
//! Declaration positions are assigned in call order. The loading flag is
//! always registered first, at position 0.
//!
//! [`ObservableState::describe`]: super::ObservableState::describe

use std::any::{Any, TypeId, type_name};
use std::fmt;

use vista_core::{FieldKey, Order};

use super::ObservableState;
use crate::reactive::ObservableContainer;

/// How a field's value travels during a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Assigned directly. Reference-typed values end up aliased.
    Value,
    /// An [`ObservableContainer`]: duplicated, never aliased.
    Container,
}

type Reader<S> = Box<dyn Fn(&S) -> Box<dyn Any>>;
type Writer<S> = Box<dyn Fn(&mut S, Box<dyn Any>) -> bool>;

/// One described field of a state `S`.
pub(crate) struct FieldDescriptor<S: ObservableState> {
    key: S::Field,
    order: Order,
    kind: FieldKind,
    value_type: TypeId,
    type_name: &'static str,
    read: Reader<S>,
    write: Option<Writer<S>>,
}

impl<S: ObservableState> FieldDescriptor<S> {
    pub(crate) fn key(&self) -> S::Field {
        self.key
    }

    pub(crate) fn name(&self) -> &'static str {
        self.key.name()
    }

    pub(crate) fn order(&self) -> Order {
        self.order
    }

    pub(crate) fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn value_type(&self) -> TypeId {
        self.value_type
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    /// The value this field contributes to a copy: a clone for plain values,
    /// a fresh duplicate for containers.
    pub(crate) fn transfer_value(&self, state: &S) -> Box<dyn Any> {
        (self.read)(state)
    }

    /// Write a transfer value through the setter. Returns `false` for
    /// read-only fields or a value of the wrong type.
    pub(crate) fn apply(&self, state: &mut S, value: Box<dyn Any>) -> bool {
        match &self.write {
            Some(write) => write(state, value),
            None => false,
        }
    }

    fn info(&self) -> FieldInfo<S::Field> {
        FieldInfo {
            key: self.key,
            name: self.name(),
            order: self.order,
            kind: self.kind,
            writable: self.is_writable(),
            type_name: self.type_name,
        }
    }
}

/// Public description of a field, as reported by
/// [`ObservableState::ordered_fields`](super::ObservableState::ordered_fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo<K> {
    pub key: K,
    pub name: &'static str,
    pub order: Order,
    pub kind: FieldKind,
    pub writable: bool,
    pub type_name: &'static str,
}

/// The descriptor list for a state type.
pub struct FieldSet<S: ObservableState> {
    fields: Vec<FieldDescriptor<S>>,
}

impl<S: ObservableState> FieldSet<S> {
    /// A set holding only the loading flag, at position 0.
    pub(crate) fn new() -> Self {
        let mut set = Self { fields: Vec::new() };
        set.value(S::Field::IS_LOADING, loading_flag::<S>, store_loading_flag::<S>);
        set
    }

    /// Describe a plain field. Copies clone the value and pass it to `set`.
    pub fn value<T: Clone + 'static>(
        &mut self,
        key: S::Field,
        get: fn(&S) -> &T,
        set: fn(&mut S, T),
    ) -> FieldEntry<'_, S> {
        let read: Reader<S> = Box::new(move |s| Box::new(get(s).clone()));
        self.push(key, FieldKind::Value, typed::<T>(), read, Some(writer(set)))
    }

    /// Describe an observable container field. Copies pass `set` a
    /// duplicate of the source container, never the source handle.
    pub fn container<C: ObservableContainer>(
        &mut self,
        key: S::Field,
        get: fn(&S) -> &C,
        set: fn(&mut S, C),
    ) -> FieldEntry<'_, S> {
        let read: Reader<S> = Box::new(move |s| Box::new(get(s).duplicate()));
        self.push(
            key,
            FieldKind::Container,
            typed::<C>(),
            read,
            Some(writer(set)),
        )
    }

    /// Describe a field the copy reads but never writes on this shape.
    pub fn read_only<T: Clone + 'static>(
        &mut self,
        key: S::Field,
        get: fn(&S) -> &T,
    ) -> FieldEntry<'_, S> {
        let read: Reader<S> = Box::new(move |s| Box::new(get(s).clone()));
        self.push(key, FieldKind::Value, typed::<T>(), read, None)
    }

    /// Describe a read-only observable container field.
    pub fn read_only_container<C: ObservableContainer>(
        &mut self,
        key: S::Field,
        get: fn(&S) -> &C,
    ) -> FieldEntry<'_, S> {
        let read: Reader<S> = Box::new(move |s| Box::new(get(s).duplicate()));
        self.push(key, FieldKind::Container, typed::<C>(), read, None)
    }

    /// Number of described fields, loading flag included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: the loading flag is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors sorted by rank, ties broken by declaration position.
    pub(crate) fn sorted(&self) -> Vec<&FieldDescriptor<S>> {
        let mut sorted: Vec<&FieldDescriptor<S>> = self.fields.iter().collect();
        sorted.sort_by_key(|d| d.order.sort_key());
        sorted
    }

    /// Public descriptions in copy order.
    pub(crate) fn infos(&self) -> Vec<FieldInfo<S::Field>> {
        self.sorted().into_iter().map(FieldDescriptor::info).collect()
    }

    /// Ordinary field whose name is `name`. The loading flag is reached only
    /// through [`FieldSet::loading`].
    pub(crate) fn find(&self, name: &str) -> Option<&FieldDescriptor<S>> {
        self.fields
            .iter()
            .find(|d| !d.key.is_loading() && d.name() == name)
    }

    /// Descriptor for the loading flag.
    pub(crate) fn loading(&self) -> Option<&FieldDescriptor<S>> {
        self.fields.iter().find(|d| d.key.is_loading())
    }

    fn push(
        &mut self,
        key: S::Field,
        kind: FieldKind,
        (value_type, type_name): (TypeId, &'static str),
        read: Reader<S>,
        write: Option<Writer<S>>,
    ) -> FieldEntry<'_, S> {
        let position = u32::try_from(self.fields.len()).unwrap_or(u32::MAX);
        // A later description of the same key replaces the earlier one but
        // keeps its declaration position.
        let index = match self.fields.iter().position(|d| d.key == key) {
            Some(index) => {
                let position = self.fields[index].order.position();
                self.fields[index] = FieldDescriptor {
                    key,
                    order: Order::declared(position),
                    kind,
                    value_type,
                    type_name,
                    read,
                    write,
                };
                index
            }
            None => {
                self.fields.push(FieldDescriptor {
                    key,
                    order: Order::declared(position),
                    kind,
                    value_type,
                    type_name,
                    read,
                    write,
                });
                self.fields.len() - 1
            }
        };
        FieldEntry {
            descriptor: &mut self.fields[index],
        }
    }
}

impl<S: ObservableState> fmt::Debug for FieldSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.infos()).finish()
    }
}

/// Handle returned by the describe methods, for overriding the rank.
pub struct FieldEntry<'a, S: ObservableState> {
    descriptor: &'a mut FieldDescriptor<S>,
}

impl<S: ObservableState> FieldEntry<'_, S> {
    /// Give the field an explicit rank.
    pub fn rank(self, rank: i64) -> Self {
        self.descriptor.order = self.descriptor.order.with_rank(rank);
        self
    }

    /// Replace the ordering metadata, keeping the declaration position.
    ///
    /// `entry.order(Order::here())` ranks the field by the source line of
    /// the call.
    pub fn order(self, order: Order) -> Self {
        self.descriptor.order = order.at_position(self.descriptor.order.position());
        self
    }
}

fn loading_flag<S: ObservableState>(state: &S) -> &bool {
    state.core().loading_flag()
}

fn store_loading_flag<S: ObservableState>(state: &mut S, loading: bool) {
    state.core_mut().set_loading(loading);
}

fn typed<T: 'static>() -> (TypeId, &'static str) {
    (TypeId::of::<T>(), type_name::<T>())
}

fn writer<S: ObservableState, T: 'static>(set: fn(&mut S, T)) -> Writer<S> {
    Box::new(move |s, value| match value.downcast::<T>() {
        Ok(value) => {
            set(s, *value);
            true
        }
        Err(_) => false,
    })
}
