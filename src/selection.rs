//! Two-endpoint date-range selection state and its tap-driven controller.
//!
//! ## Usage
//!
//! Construct a [`SelectionController`] once per calendar, register the day
//! cells the host mounts, then feed it tap events and imperative selection
//! changes. Every mutation returns the exact set of cells whose status
//! changed, so a retained- or immediate-mode renderer can apply minimal
//! updates.
use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::date::{CalendarDate, DateRange};

/// Visual selection status of a single day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStatus {
    /// Not part of the current selection.
    #[default]
    None,
    /// The only selected date.
    SingleChosen,
    /// First date of a multi-day range.
    RangeBeginChosen,
    /// Interior date of a multi-day range.
    RangeMiddleChosen,
    /// Last date of a multi-day range.
    RangeEndChosen,
}

/// How taps advance the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every tap selects exactly the tapped date.
    Single,
    /// Taps build up a start/end range one endpoint at a time.
    #[default]
    Range,
}

/// The current selection of a calendar.
///
/// `Single` is an anchor with an unresolved end (a range in progress);
/// `Range` is a completed selection with `start <= end`. A completed range
/// may have equal endpoints, which renders exactly like a single chosen
/// date but reacts differently to the next tap: any tap on a completed
/// range starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Empty,
    /// One date chosen, end still open.
    Single(CalendarDate),
    /// Completed range, endpoints inclusive.
    Range {
        /// First selected date.
        start: CalendarDate,
        /// Last selected date.
        end: CalendarDate,
    },
}

impl SelectionState {
    /// Builds a state from optional endpoints.
    ///
    /// An end without a start is treated as the start (kept for
    /// compatibility with the widget this crate drives); an inverted pair
    /// is swapped so the `start <= end` invariant always holds.
    pub fn from_endpoints(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        match (start, end) {
            (None, None) => SelectionState::Empty,
            (Some(start), None) => SelectionState::Single(start),
            (None, Some(end)) => SelectionState::Single(end),
            (Some(start), Some(end)) if start <= end => SelectionState::Range { start, end },
            (Some(start), Some(end)) => SelectionState::Range {
                start: end,
                end: start,
            },
        }
    }

    /// Returns the `(start, end)` endpoints as the host observes them.
    pub fn endpoints(&self) -> (Option<CalendarDate>, Option<CalendarDate>) {
        match *self {
            SelectionState::Empty => (None, None),
            SelectionState::Single(start) => (Some(start), None),
            SelectionState::Range { start, end } => (Some(start), Some(end)),
        }
    }

    /// Returns the status `date` renders with under this selection.
    pub fn status_for(&self, date: CalendarDate) -> SelectionStatus {
        match *self {
            SelectionState::Empty => SelectionStatus::None,
            SelectionState::Single(start) => {
                if date == start {
                    SelectionStatus::SingleChosen
                } else {
                    SelectionStatus::None
                }
            }
            SelectionState::Range { start, end } if start == end => {
                if date == start {
                    SelectionStatus::SingleChosen
                } else {
                    SelectionStatus::None
                }
            }
            SelectionState::Range { start, end } => {
                if date == start {
                    SelectionStatus::RangeBeginChosen
                } else if date == end {
                    SelectionStatus::RangeEndChosen
                } else if start < date && date < end {
                    SelectionStatus::RangeMiddleChosen
                } else {
                    SelectionStatus::None
                }
            }
        }
    }

    /// Returns every selected date in chronological order.
    pub fn dates(&self) -> Vec<CalendarDate> {
        match *self {
            SelectionState::Empty => Vec::new(),
            SelectionState::Single(start) => vec![start],
            SelectionState::Range { start, end } => {
                DateRange::new_unchecked(start, end).days().collect()
            }
        }
    }
}

/// A status change for one day cell, produced by every selection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// The cell's date.
    pub date: CalendarDate,
    /// The status the cell must now render with.
    pub status: SelectionStatus,
}

/// Handle to a mounted day cell, owned by the rendering collaborator.
///
/// The controller never constructs or destroys these; it only dispatches
/// status and availability updates through them.
pub trait DayCellHandle: Send + Sync {
    /// Updates the cell's selection status.
    fn set_status(&self, status: SelectionStatus);

    /// Updates the cell's availability flag.
    fn set_available(&self, available: bool);
}

/// Callback observing every selection change as `(start, end)` endpoints.
pub type SelectionChanged = Arc<dyn Fn(Option<CalendarDate>, Option<CalendarDate>) + Send + Sync>;

/// Configuration for [`SelectionController::new`].
#[derive(Clone, Default, derive_setters::Setters)]
pub struct SelectionArgs {
    /// How taps advance the selection.
    pub mode: SelectionMode,
    /// Date initially selected as the range start.
    #[setters(strip_option)]
    pub start_date: Option<CalendarDate>,
    /// Date initially selected as the range end.
    #[setters(strip_option)]
    pub end_date: Option<CalendarDate>,
    /// Dates the user may select; taps outside it are ignored.
    #[setters(strip_option)]
    pub available_range: Option<DateRange>,
    /// Observer notified after every selection mutation.
    #[setters(skip)]
    pub on_selection_changed: Option<SelectionChanged>,
}

impl SelectionArgs {
    /// Sets the selection-changed observer.
    pub fn on_selection_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<CalendarDate>, Option<CalendarDate>) + Send + Sync + 'static,
    {
        self.on_selection_changed = Some(Arc::new(f));
        self
    }

    /// Sets the selection-changed observer from a shared callback.
    pub fn on_selection_changed_shared(mut self, f: SelectionChanged) -> Self {
        self.on_selection_changed = Some(f);
        self
    }
}

/// Owns the selection state of one calendar and restyles mounted cells.
///
/// All operations run synchronously on the calling thread; the controller
/// holds no locks and expects to be driven from the host's single event
/// path.
pub struct SelectionController {
    mode: SelectionMode,
    state: SelectionState,
    available: Option<DateRange>,
    cells: HashMap<CalendarDate, Arc<dyn DayCellHandle>>,
    on_selection_changed: Option<SelectionChanged>,
}

impl SelectionController {
    /// Creates a controller and fires the observer with the normalized
    /// initial selection.
    pub fn new(args: SelectionArgs) -> Self {
        let controller = Self {
            mode: args.mode,
            state: SelectionState::from_endpoints(args.start_date, args.end_date),
            available: args.available_range,
            cells: HashMap::new(),
            on_selection_changed: args.on_selection_changed,
        };
        controller.notify();
        controller
    }

    /// Returns the current selection.
    pub fn selection(&self) -> SelectionState {
        self.state
    }

    /// Returns the tap mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Registers the handle of a mounted day cell.
    ///
    /// Cells registered after a mutation simply render the status the grid
    /// builder computed for them; they are picked up by later mutations.
    pub fn register_cell(&mut self, date: CalendarDate, handle: Arc<dyn DayCellHandle>) {
        self.cells.insert(date, handle);
    }

    /// Overwrites the selection with the given endpoints.
    ///
    /// Endpoints are normalized like the initial selection (end-only
    /// becomes the start, inverted pairs are swapped). Returns the cells
    /// whose status changed: first the old selected dates that cleared to
    /// [`SelectionStatus::None`], then every date of the new run with its
    /// positional status.
    pub fn set_selection(
        &mut self,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Vec<StatusChange> {
        self.transition(SelectionState::from_endpoints(start, end))
    }

    /// Advances the selection by one tap on `date`.
    ///
    /// In [`SelectionMode::Single`] the tapped date becomes the whole
    /// selection. In [`SelectionMode::Range`] the tap either anchors a new
    /// range, completes the pending one (swapping endpoints when the tap
    /// lands before the anchor), or starts over when a completed range
    /// already exists. Taps outside the available window are ignored.
    pub fn on_day_tapped(&mut self, date: CalendarDate) -> Vec<StatusChange> {
        if let Some(window) = self.available
            && !window.contains(date)
        {
            debug!(%date, "ignoring tap outside available window");
            return Vec::new();
        }

        let next = match self.mode {
            SelectionMode::Single => SelectionState::Range {
                start: date,
                end: date,
            },
            SelectionMode::Range => Self::advance(self.state, date),
        };
        self.transition(next)
    }

    /// Replaces the available window and updates every registered cell's
    /// availability flag.
    ///
    /// A single endpoint is treated as a one-day window; two endpoints in
    /// the wrong order are swapped; two absent endpoints leave the window
    /// untouched and return nothing. Selection state is never affected.
    /// Returns the `(date, available)` flag applied to each registered
    /// cell, in date order.
    pub fn set_available_range(
        &mut self,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Vec<(CalendarDate, bool)> {
        let window = match (start, end) {
            (None, None) => return Vec::new(),
            (Some(start), None) => DateRange::single(start),
            (None, Some(end)) => DateRange::single(end),
            (Some(start), Some(end)) if start <= end => DateRange::new_unchecked(start, end),
            (Some(start), Some(end)) => DateRange::new_unchecked(end, start),
        };
        debug!(start = %window.start(), end = %window.end(), "available window replaced");
        self.available = Some(window);

        let mut flags: Vec<_> = self
            .cells
            .iter()
            .map(|(date, handle)| {
                let inside = window.contains(*date);
                handle.set_available(inside);
                (*date, inside)
            })
            .collect();
        flags.sort_by_key(|(date, _)| *date);
        flags
    }

    fn advance(state: SelectionState, date: CalendarDate) -> SelectionState {
        match state {
            SelectionState::Empty => SelectionState::Single(date),
            SelectionState::Single(anchor) if date < anchor => SelectionState::Range {
                start: date,
                end: anchor,
            },
            // Re-affirming the anchor completes a one-day range; a later
            // date completes the pending range.
            SelectionState::Single(anchor) => SelectionState::Range {
                start: anchor,
                end: date,
            },
            SelectionState::Range { .. } => SelectionState::Single(date),
        }
    }

    fn transition(&mut self, next: SelectionState) -> Vec<StatusChange> {
        let old_dates = self.state.dates();
        self.state = next;
        let new_dates = next.dates();

        let mut changes = Vec::with_capacity(old_dates.len() + new_dates.len());
        for date in old_dates {
            if next.status_for(date) == SelectionStatus::None {
                changes.push(StatusChange {
                    date,
                    status: SelectionStatus::None,
                });
            }
        }
        for date in new_dates {
            changes.push(StatusChange {
                date,
                status: next.status_for(date),
            });
        }

        for change in &changes {
            if let Some(handle) = self.cells.get(&change.date) {
                handle.set_status(change.status);
            }
        }

        debug!(state = ?self.state, affected = changes.len(), "selection changed");
        self.notify();
        changes
    }

    fn notify(&self) {
        if let Some(observer) = &self.on_selection_changed {
            let (start, end) = self.state.endpoints();
            observer(start, end);
        }
    }
}
