//! Property-based invariant tests for notification and ordered copy.
//!
//! 1. A setter raises exactly one event per value change and none for an
//!    equal value.
//! 2. Ordered copy writes fields in non-decreasing rank order, ties in
//!    declaration order.
//! 3. A copied container never observes later mutations of the source.
//! 4. Reload raises the loading flag before the first field event and lowers
//!    it after the last.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{ShiftBoard, record};
use proptest::prelude::*;
use vista_runtime::{
    ChangeHandlers, FieldEntry, FieldKey, FieldSet, ObservableList, ObservableState, StateCore,
};

// ── A state whose ranks are chosen per test case ───────────────────────

thread_local! {
    static RANKS: RefCell<[Option<i64>; 4]> = const { RefCell::new([None; 4]) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SlotField {
    IsLoading,
    A,
    B,
    C,
    D,
}

impl SlotField {
    const SLOTS: [SlotField; 4] = [Self::A, Self::B, Self::C, Self::D];
}

impl FieldKey for SlotField {
    const IS_LOADING: Self = Self::IsLoading;

    fn name(self) -> &'static str {
        match self {
            Self::IsLoading => "is_loading",
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

struct SlotState {
    core: StateCore<SlotField>,
    slots: [u32; 4],
}

impl SlotState {
    fn new() -> Self {
        Self::sibling(StateCore::with_handlers(ChangeHandlers::new()))
    }

    fn set(&mut self, index: usize, value: u32) {
        self.core
            .assign(&mut self.slots[index], value, SlotField::SLOTS[index]);
    }
}

impl ObservableState for SlotState {
    type Field = SlotField;

    fn core(&self) -> &StateCore<SlotField> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<SlotField> {
        &mut self.core
    }

    fn describe(fields: &mut FieldSet<Self>) {
        let ranks = RANKS.with(|r| *r.borrow());
        ranked(fields.value(SlotField::A, |s| &s.slots[0], |s, v| s.set(0, v)), ranks[0]);
        ranked(fields.value(SlotField::B, |s| &s.slots[1], |s, v| s.set(1, v)), ranks[1]);
        ranked(fields.value(SlotField::C, |s| &s.slots[2], |s, v| s.set(2, v)), ranks[2]);
        ranked(fields.value(SlotField::D, |s| &s.slots[3], |s, v| s.set(3, v)), ranks[3]);
    }

    fn sibling(core: StateCore<SlotField>) -> Self {
        Self {
            core,
            slots: [0; 4],
        }
    }
}

fn ranked(entry: FieldEntry<'_, SlotState>, rank: Option<i64>) {
    if let Some(rank) = rank {
        entry.rank(rank);
    }
}

fn rank_strategy() -> impl Strategy<Value = [Option<i64>; 4]> {
    proptest::array::uniform4(proptest::option::of(-5i64..=10))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. One event per actual change
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn one_event_per_actual_change(values in proptest::collection::vec(0u32..4, 0..40)) {
        let mut board = ShiftBoard::plain();
        let (events, _sub) = record(&board);

        let mut expected = 0usize;
        let mut current = board.headcount();
        for value in values {
            if value != current {
                expected += 1;
                current = value;
            }
            board.set_headcount(value);
        }

        prop_assert_eq!(events.borrow().len(), expected);
        prop_assert!(events.borrow().iter().all(|e| e == "event:headcount"));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Copy order follows rank
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn copy_writes_in_rank_order(ranks in rank_strategy()) {
        RANKS.with(|r| *r.borrow_mut() = ranks);

        let mut source = SlotState::new();
        for index in 0..4 {
            source.set(index, index as u32 + 1);
        }
        let mut destination = SlotState::new();
        let written = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&written);
        let _sub = destination.subscribe(move |k| sink.borrow_mut().push(k));

        source.copy_to(&mut destination);

        let fields = SlotState::ordered_fields();
        let rank_of = |key: SlotField| {
            fields
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.order.sort_key())
        };
        let keys = written.borrow().clone();
        prop_assert_eq!(keys.len(), 4);
        for pair in keys.windows(2) {
            prop_assert!(rank_of(pair[0]) < rank_of(pair[1]));
        }
        prop_assert_eq!(destination.slots, [1, 2, 3, 4]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Container non-aliasing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn copied_container_never_sees_source_mutation(
        initial in proptest::collection::vec(any::<u32>(), 0..16),
        appended in proptest::collection::vec(any::<u32>(), 1..8),
    ) {
        let mut source = ShiftBoard::plain();
        source.set_crew(ObservableList::from_vec(initial.clone()));
        let mut destination = ShiftBoard::plain();
        source.copy_to(&mut destination);

        for value in appended {
            source.crew().push(value);
        }
        source.crew().remove(0);

        prop_assert_eq!(destination.crew().to_vec(), initial);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Reload bracket
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reload_brackets_every_field_event(headcount in 0u32..50, station in "[A-Z]{3}") {
        let mut source = ShiftBoard::populated();
        source.set_headcount(headcount);
        source.set_station(station);
        let mut board = ShiftBoard::plain();
        let (events, _sub) = record(&board);

        board.reload_from(&source);

        let events = events.borrow();
        prop_assert!(events.len() >= 3);
        prop_assert_eq!(events.first().map(String::as_str), Some("event:is_loading"));
        prop_assert_eq!(events.last().map(String::as_str), Some("event:is_loading"));
        let inner = &events[1..events.len() - 1];
        prop_assert!(inner.iter().all(|e| e != "event:is_loading"));
        prop_assert!(!board.is_loading());
    }
}
