#![forbid(unsafe_code)]

//! Ordered copy.
//!
//! Every copy walks the descriptors sorted by `(rank, position)` and, for
//! each writable field, reads its transfer value from the source and writes
//! it through the destination's setter before moving on. Plain values are
//! cloned; containers are duplicated into fresh storage.
//!
//! A field is read only after every earlier-ranked field has been written.
//! When a state copies onto itself (reload), a setter's side effects on
//! later-ranked fields are visible to those fields' reads.
//!
//! Cross-shape copies resolve every field first ([`plan_across`]) and write
//! nothing if any field fails to resolve.

use std::any::Any;

use tracing::{debug, debug_span, trace};
use vista_core::{CopyError, FieldKey};

use super::ObservableState;
use super::fields::{FieldDescriptor, FieldSet};

/// Write one transfer value through `descriptor`'s setter.
fn write_field<D: ObservableState>(
    descriptor: &FieldDescriptor<D>,
    destination: &mut D,
    value: Box<dyn Any>,
) -> bool {
    trace!(
        field = descriptor.name(),
        rank = descriptor.order().rank(),
        kind = ?descriptor.kind(),
        "copy field"
    );
    let applied = descriptor.apply(destination, value);
    debug_assert!(applied, "transfer value rejected by {}", descriptor.name());
    applied
}

/// Which fields a same-shape copy skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Every writable field, the loading flag included.
    All,
    /// Every writable field except the loading flag.
    ExceptLoading,
}

/// Copy `source` into `destination`, both of shape `S`.
pub(crate) fn copy_same<S: ObservableState>(source: &S, destination: &mut S, scope: Scope) -> usize {
    let fields = S::field_set();
    let _span = debug_span!("ordered_copy", fields = fields.len()).entered();
    let mut written = 0;
    for descriptor in writable(&fields, scope) {
        if write_field(descriptor, destination, descriptor.transfer_value(source)) {
            written += 1;
        }
    }
    debug!(written, "ordered copy complete");
    written
}

/// Copy `state` onto itself, skipping the loading flag.
pub(crate) fn copy_onto_self<S: ObservableState>(state: &mut S) -> usize {
    let fields = S::field_set();
    let _span = debug_span!("reload_copy", fields = fields.len()).entered();
    let mut written = 0;
    for descriptor in writable(&fields, Scope::ExceptLoading) {
        let value = descriptor.transfer_value(&*state);
        if write_field(descriptor, state, value) {
            written += 1;
        }
    }
    debug!(written, "in-place copy complete");
    written
}

fn writable<S: ObservableState>(fields: &FieldSet<S>, scope: Scope) -> Vec<&FieldDescriptor<S>> {
    fields
        .sorted()
        .into_iter()
        .filter(|d| d.is_writable())
        .filter(|d| scope == Scope::All || !d.key().is_loading())
        .collect()
}

/// Copy `source` into a destination of another shape, matching fields by
/// name. The loading flags always correspond, whatever they are named.
///
/// # Errors
///
/// Returns the first incompatibility found, in copy order. Nothing is
/// written to `destination` unless every field resolves.
pub(crate) fn copy_across<S: ObservableState, D: ObservableState>(
    source: &S,
    destination: &mut D,
) -> Result<usize, CopyError> {
    let source_fields = S::field_set();
    let destination_fields = D::field_set();
    let _span = debug_span!(
        "ordered_copy_across",
        fields = source_fields.len(),
        source = std::any::type_name::<S>(),
        destination = std::any::type_name::<D>(),
    )
    .entered();

    let plan = plan_across(&source_fields, &destination_fields).inspect_err(|err| {
        debug!(error = %err, "ordered copy rejected");
    })?;
    let mut written = 0;
    for (from, to) in plan {
        if write_field(to, destination, from.transfer_value(source)) {
            written += 1;
        }
    }
    debug!(written, "ordered copy complete");
    Ok(written)
}

/// Resolve every source field against the destination, in source copy order.
fn plan_across<'s, 'd, S: ObservableState, D: ObservableState>(
    source_fields: &'s FieldSet<S>,
    destination_fields: &'d FieldSet<D>,
) -> Result<Vec<(&'s FieldDescriptor<S>, &'d FieldDescriptor<D>)>, CopyError> {
    let mut plan = Vec::new();
    for from in source_fields.sorted() {
        let target = if from.key().is_loading() {
            destination_fields.loading()
        } else {
            destination_fields.find(from.name())
        };
        let Some(to) = target else {
            return Err(CopyError::ShapeMismatch { field: from.name() });
        };
        if !to.is_writable() {
            continue;
        }
        if to.kind() != from.kind() {
            return Err(CopyError::KindMismatch { field: from.name() });
        }
        if to.value_type() != from.value_type() {
            return Err(CopyError::TypeMismatch {
                field: from.name(),
                expected: to.type_name(),
                found: from.type_name(),
            });
        }
        plan.push((from, to));
    }
    Ok(plan)
}
