//! Shift-board states shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vista_runtime::{
    ChangeHandlers, CommandMap, FieldKey, FieldSet, ObservableList, ObservableState, Shared,
    StateCore, Subscription,
};

// ── Full board ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardField {
    IsLoading,
    Station,
    Headcount,
    Crew,
    Roster,
    Summary,
}

impl FieldKey for BoardField {
    const IS_LOADING: Self = Self::IsLoading;

    fn name(self) -> &'static str {
        match self {
            Self::IsLoading => "is_loading",
            Self::Station => "station",
            Self::Headcount => "headcount",
            Self::Crew => "crew",
            Self::Roster => "roster",
            Self::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub lead: String,
    pub shifts: Vec<String>,
}

/// Headcount carries rank 100, so it is written after every other field.
pub struct ShiftBoard {
    core: StateCore<BoardField>,
    station: String,
    headcount: u32,
    crew: ObservableList<u32>,
    roster: Shared<Roster>,
    summary: String,
}

impl ShiftBoard {
    pub fn new(handlers: ChangeHandlers<BoardField>, commands: CommandMap) -> Self {
        Self::sibling(StateCore::new(handlers, commands))
    }

    pub fn plain() -> Self {
        Self::new(ChangeHandlers::new(), CommandMap::new())
    }

    /// A board with every field set to a non-default value.
    pub fn populated() -> Self {
        let mut board = Self::plain();
        board.set_station("SLC".into());
        board.set_headcount(12);
        board.set_crew(ObservableList::from_vec(vec![1, 2, 3]));
        board.set_roster(Shared::new(Roster {
            lead: "Ortega".into(),
            shifts: vec!["AM".into()],
        }));
        board.publish_summary("12 on shift at SLC");
        board
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn set_station(&mut self, station: String) {
        self.core.assign(&mut self.station, station, BoardField::Station);
    }

    pub fn headcount(&self) -> u32 {
        self.headcount
    }

    pub fn set_headcount(&mut self, headcount: u32) {
        self.core
            .assign(&mut self.headcount, headcount, BoardField::Headcount);
    }

    pub fn crew(&self) -> &ObservableList<u32> {
        &self.crew
    }

    pub fn set_crew(&mut self, crew: ObservableList<u32>) {
        self.core.assign(&mut self.crew, crew, BoardField::Crew);
    }

    pub fn roster(&self) -> &Shared<Roster> {
        &self.roster
    }

    pub fn set_roster(&mut self, roster: Shared<Roster>) {
        self.core.assign(&mut self.roster, roster, BoardField::Roster);
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Summary has no copy setter; only the board itself publishes it.
    pub fn publish_summary(&mut self, summary: &str) {
        self.core
            .assign(&mut self.summary, summary.to_string(), BoardField::Summary);
    }
}

impl ObservableState for ShiftBoard {
    type Field = BoardField;

    fn core(&self) -> &StateCore<BoardField> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<BoardField> {
        &mut self.core
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields.value(BoardField::Station, |s| &s.station, Self::set_station);
        fields
            .value(BoardField::Headcount, |s| &s.headcount, Self::set_headcount)
            .rank(100);
        fields.container(BoardField::Crew, |s| &s.crew, Self::set_crew);
        fields.value(BoardField::Roster, |s| &s.roster, Self::set_roster);
        fields.read_only(BoardField::Summary, |s| &s.summary);
    }

    fn sibling(core: StateCore<BoardField>) -> Self {
        Self {
            core,
            station: String::new(),
            headcount: 0,
            crew: ObservableList::new(),
            roster: Shared::default(),
            summary: String::new(),
        }
    }
}

// ── Lite board: subset of fields, writable summary ─────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteField {
    Loading,
    Station,
    Headcount,
    Crew,
    Summary,
}

impl FieldKey for LiteField {
    const IS_LOADING: Self = Self::Loading;

    fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Station => "station",
            Self::Headcount => "headcount",
            Self::Crew => "crew",
            Self::Summary => "summary",
        }
    }
}

pub struct LiteBoard {
    core: StateCore<LiteField>,
    pub station: String,
    pub headcount: u32,
    pub crew: ObservableList<u32>,
    pub summary: String,
}

impl LiteBoard {
    pub fn plain() -> Self {
        Self::sibling(StateCore::with_handlers(ChangeHandlers::new()))
    }

    fn set_station(&mut self, station: String) {
        self.core.assign(&mut self.station, station, LiteField::Station);
    }

    fn set_headcount(&mut self, headcount: u32) {
        self.core
            .assign(&mut self.headcount, headcount, LiteField::Headcount);
    }

    fn set_crew(&mut self, crew: ObservableList<u32>) {
        self.core.assign(&mut self.crew, crew, LiteField::Crew);
    }

    fn set_summary(&mut self, summary: String) {
        self.core.assign(&mut self.summary, summary, LiteField::Summary);
    }
}

impl ObservableState for LiteBoard {
    type Field = LiteField;

    fn core(&self) -> &StateCore<LiteField> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<LiteField> {
        &mut self.core
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields.value(LiteField::Station, |s| &s.station, Self::set_station);
        fields.value(LiteField::Headcount, |s| &s.headcount, Self::set_headcount);
        fields.container(LiteField::Crew, |s| &s.crew, Self::set_crew);
        fields.value(LiteField::Summary, |s| &s.summary, Self::set_summary);
    }

    fn sibling(core: StateCore<LiteField>) -> Self {
        Self {
            core,
            station: String::new(),
            headcount: 0,
            crew: ObservableList::new(),
            summary: String::new(),
        }
    }
}

// ── Mismatched shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OddField {
    IsLoading,
    Station,
    Headcount,
    Crew,
}

impl FieldKey for OddField {
    const IS_LOADING: Self = Self::IsLoading;

    fn name(self) -> &'static str {
        match self {
            Self::IsLoading => "is_loading",
            Self::Station => "station",
            Self::Headcount => "headcount",
            Self::Crew => "crew",
        }
    }
}

/// Same names as [`LiteBoard`] for the shared fields, but `headcount` is a
/// string and `crew` is a plain vector.
pub struct OddBoard {
    core: StateCore<OddField>,
    pub station: String,
    pub headcount: String,
    pub crew: Vec<u32>,
}

impl OddBoard {
    pub fn plain() -> Self {
        Self::sibling(StateCore::with_handlers(ChangeHandlers::new()))
    }

    fn set_station(&mut self, station: String) {
        self.core.assign(&mut self.station, station, OddField::Station);
    }

    fn set_headcount(&mut self, headcount: String) {
        self.core
            .assign(&mut self.headcount, headcount, OddField::Headcount);
    }

    fn set_crew(&mut self, crew: Vec<u32>) {
        self.core.assign(&mut self.crew, crew, OddField::Crew);
    }
}

impl ObservableState for OddBoard {
    type Field = OddField;

    fn core(&self) -> &StateCore<OddField> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<OddField> {
        &mut self.core
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields.value(OddField::Station, |s| &s.station, Self::set_station);
        fields.value(OddField::Headcount, |s| &s.headcount, Self::set_headcount);
        fields.value(OddField::Crew, |s| &s.crew, Self::set_crew);
    }

    fn sibling(core: StateCore<OddField>) -> Self {
        Self {
            core,
            station: String::new(),
            headcount: String::new(),
            crew: Vec::new(),
        }
    }
}

// ── Recording helpers ───────────────────────────────────────────────────

pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Record every generic change event as `"event:<name>"`.
pub fn record<S: ObservableState>(state: &S) -> (EventLog, Subscription) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let sub = state.subscribe(move |key: S::Field| {
        sink.borrow_mut().push(format!("event:{}", key.name()));
    });
    (log, sub)
}

/// Handler table that records `"handler:<name>"` for each listed key.
pub fn recording_handlers<K: FieldKey>(log: &EventLog, keys: &[K]) -> ChangeHandlers<K> {
    keys.iter().fold(ChangeHandlers::new(), |handlers, &key| {
        let sink = Rc::clone(log);
        handlers.on(key, move |k: K| {
            sink.borrow_mut().push(format!("handler:{}", k.name()));
        })
    })
}
