//! Drag selection over a slot grid
//!
//! A gesture starts on pointer-down (or touch-start), paints over every cell
//! the pointer enters, and ends on pointer-up, on leaving the grid, or on
//! touch-end. The first cell fixes the gesture's mode: starting on a selected
//! cell removes, starting on an unselected cell adds. The mode never flips
//! mid-gesture, so dragging across mixed cells has a predictable result.
//!
//! The controller owns only the ephemeral gesture state. The selection itself
//! belongs to a [`SelectionOwner`], which receives the complete new set every
//! time a toggle actually changes it.

use chrono::{Datelike, NaiveDate};
use meetgrid_domain::{MeetgridError, Result, Slot, SlotSet, ToggleMode};

use crate::conflict::RangeMembership;

/// Decides which grid cells cannot be painted.
pub trait SlotGate {
    fn is_disabled(&self, slot: &Slot) -> bool;
}

impl<F> SlotGate for F
where
    F: Fn(&Slot) -> bool,
{
    fn is_disabled(&self, slot: &Slot) -> bool {
        self(slot)
    }
}

/// Gate that disables nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl SlotGate for OpenGate {
    fn is_disabled(&self, _slot: &Slot) -> bool {
        false
    }
}

/// Host painting: cells outside the constraint are disabled.
impl SlotGate for RangeMembership<'_> {
    fn is_disabled(&self, slot: &Slot) -> bool {
        !self.is_within(slot)
    }
}

/// Participant painting: only host-proposed candidates are enabled.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGate<'a> {
    candidates: &'a SlotSet,
}

impl<'a> CandidateGate<'a> {
    pub const fn new(candidates: &'a SlotSet) -> Self {
        Self { candidates }
    }
}

impl SlotGate for CandidateGate<'_> {
    fn is_disabled(&self, slot: &Slot) -> bool {
        !self.candidates.contains(slot)
    }
}

/// Explicitly locked cells.
#[derive(Debug, Clone, Default)]
pub struct LockedSlots(pub SlotSet);

impl SlotGate for LockedSlots {
    fn is_disabled(&self, slot: &Slot) -> bool {
        self.0.contains(slot)
    }
}

/// Receiver of selection changes.
pub trait SelectionOwner {
    /// The selection as the owner currently sees it.
    fn selection(&self) -> &SlotSet;

    /// Called with the full new selection after a change.
    fn selection_changed(&mut self, selection: SlotSet);
}

impl SelectionOwner for SlotSet {
    fn selection(&self) -> &SlotSet {
        self
    }

    fn selection_changed(&mut self, selection: SlotSet) {
        *self = selection;
    }
}

/// Point in grid container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resolves a touch point to the slot underneath it, supplied by whatever
/// renders the grid.
pub trait SlotHitTester {
    fn slot_at(&self, point: GridPoint) -> Option<Slot>;
}

/// Hit tester for a grid of equally sized cells, laid out row-major from
/// `origin`. Padding cells hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGridHitTester {
    origin: GridPoint,
    cell_width: f64,
    cell_height: f64,
    rows: Vec<Vec<Option<Slot>>>,
}

impl UniformGridHitTester {
    pub fn new(
        origin: GridPoint,
        cell_width: f64,
        cell_height: f64,
        rows: Vec<Vec<Option<Slot>>>,
    ) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(cell_width) || !valid(cell_height) {
            return Err(MeetgridError::InvalidInput(format!(
                "cell size must be positive, got {cell_width}x{cell_height}"
            )));
        }
        Ok(Self { origin, cell_width, cell_height, rows })
    }

    /// Week view: one column per date, one row per hour.
    pub fn week_hours(
        origin: GridPoint,
        cell_width: f64,
        cell_height: f64,
        dates: &[NaiveDate],
        hours: &[u8],
    ) -> Result<Self> {
        let rows = hours
            .iter()
            .map(|&hour| {
                dates
                    .iter()
                    .map(|&date| Slot::hour(date, hour).map(Some))
                    .collect::<Result<Vec<Option<Slot>>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(origin, cell_width, cell_height, rows)
    }

    /// Month view: seven columns starting on Sunday, leading cells padded so
    /// the first date sits under its weekday.
    pub fn month_days(
        origin: GridPoint,
        cell_width: f64,
        cell_height: f64,
        dates: &[NaiveDate],
    ) -> Result<Self> {
        let lead = dates
            .first()
            .map_or(0, |first| first.weekday().num_days_from_sunday() as usize);
        let cells: Vec<Option<Slot>> = std::iter::repeat(None)
            .take(lead)
            .chain(dates.iter().map(|&date| Some(Slot::day(date))))
            .collect();
        let rows = cells.chunks(7).map(<[Option<Slot>]>::to_vec).collect();
        Self::new(origin, cell_width, cell_height, rows)
    }

    fn index(offset: f64, size: f64) -> Option<usize> {
        if offset < 0.0 || !offset.is_finite() {
            return None;
        }
        // non-negative and finite, so truncation is the floor
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some((offset / size).floor() as usize)
    }
}

impl SlotHitTester for UniformGridHitTester {
    fn slot_at(&self, point: GridPoint) -> Option<Slot> {
        let column = Self::index(point.x - self.origin.x, self.cell_width)?;
        let row = Self::index(point.y - self.origin.y, self.cell_height)?;
        self.rows.get(row)?.get(column).copied().flatten()
    }
}

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { mode: ToggleMode, last_touched: Slot },
}

/// Per-grid gesture state machine.
///
/// Event methods return `true` when the owner's selection changed. No event
/// ever fails; events that do not apply are ignored.
#[derive(Debug, Clone, Default)]
pub struct DragSelectionController<G> {
    gate: G,
    state: DragState,
    view: Option<String>,
}

impl<G: SlotGate> DragSelectionController<G> {
    pub fn new(gate: G) -> Self {
        Self { gate, state: DragState::Idle, view: None }
    }

    pub const fn state(&self) -> DragState {
        self.state
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub const fn gate(&self) -> &G {
        &self.gate
    }

    /// Replace the gate (e.g. after the host edits the constraint). Any
    /// gesture in progress is abandoned.
    pub fn set_gate(&mut self, gate: G) {
        self.gate = gate;
        self.state = DragState::Idle;
    }

    /// Start a gesture on `slot`.
    pub fn pointer_down<O>(&mut self, slot: Slot, owner: &mut O) -> bool
    where
        O: SelectionOwner + ?Sized,
    {
        if self.gate.is_disabled(&slot) {
            self.state = DragState::Idle;
            return false;
        }
        let mode =
            if owner.selection().contains(&slot) { ToggleMode::Remove } else { ToggleMode::Add };
        self.state = DragState::Dragging { mode, last_touched: slot };
        apply(owner, &slot, mode)
    }

    /// Pointer moved onto `slot` while the gesture is active.
    pub fn pointer_enter<O>(&mut self, slot: Slot, owner: &mut O) -> bool
    where
        O: SelectionOwner + ?Sized,
    {
        let DragState::Dragging { mode, last_touched } = self.state else {
            return false;
        };
        if slot == last_touched || self.gate.is_disabled(&slot) {
            return false;
        }
        self.state = DragState::Dragging { mode, last_touched: slot };
        apply(owner, &slot, mode)
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer left the grid container.
    pub fn pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }

    /// Start a gesture at a touch point; points outside any cell are ignored.
    pub fn touch_start<O, H>(&mut self, point: GridPoint, hit: &H, owner: &mut O) -> bool
    where
        O: SelectionOwner + ?Sized,
        H: SlotHitTester + ?Sized,
    {
        hit.slot_at(point).is_some_and(|slot| self.pointer_down(slot, owner))
    }

    /// Touch moved; resolved through the hit tester and handled like
    /// [`pointer_enter`](Self::pointer_enter).
    pub fn touch_move<O, H>(&mut self, point: GridPoint, hit: &H, owner: &mut O) -> bool
    where
        O: SelectionOwner + ?Sized,
        H: SlotHitTester + ?Sized,
    {
        hit.slot_at(point).is_some_and(|slot| self.pointer_enter(slot, owner))
    }

    pub fn touch_end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop gesture state when the grid starts showing a different view.
    /// Returns whether `view` differed from the previous one.
    pub fn reset_for_view(&mut self, view: &str) -> bool {
        if self.view.as_deref() == Some(view) {
            return false;
        }
        self.view = Some(view.to_owned());
        self.state = DragState::Idle;
        true
    }
}

fn apply<O>(owner: &mut O, slot: &Slot, mode: ToggleMode) -> bool
where
    O: SelectionOwner + ?Sized,
{
    let current = owner.selection();
    let changes = match mode {
        ToggleMode::Add => !current.contains(slot),
        ToggleMode::Remove => current.contains(slot),
    };
    if changes {
        let next = current.toggle(slot, mode);
        owner.selection_changed(next);
    }
    changes
}
