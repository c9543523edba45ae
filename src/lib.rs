//! Calendar grid data and range-selection state for scrollable date pickers.
//!
//! This crate is the render-agnostic core of a scrolling date-range picker:
//! it turns a visible date window, an available-date window, and a
//! selection into a flat sequence of calendar cells, and it owns the
//! tap-driven start/end selection state, reporting exactly which cells must
//! be restyled after every change. Drawing, scrolling, and gesture capture
//! stay with the host.
//!
//! # Example
//!
//! ```
//! use calendar_list::{
//!     date::{CalendarDate, DateRange},
//!     grid::{CalendarGridArgs, build_calendar_grid},
//!     selection::{SelectionArgs, SelectionController},
//! };
//!
//! let date = |m, d| CalendarDate::new(2022, m, d).unwrap();
//! let full = DateRange::new(date(1, 1), date(3, 31)).unwrap();
//!
//! // Built once; only day-cell status and availability change afterwards.
//! let grid = build_calendar_grid(
//!     &CalendarGridArgs::default()
//!         .full_range(full)
//!         .start_date(date(2, 16))
//!         .end_date(date(2, 20))
//!         .today(date(1, 10)),
//! )
//! .unwrap();
//! assert_eq!(grid.len(), 154);
//!
//! let mut controller = SelectionController::new(
//!     SelectionArgs::default()
//!         .start_date(date(2, 16))
//!         .end_date(date(2, 20)),
//! );
//!
//! // Tapping restarts the completed range: five cells clear, one selects.
//! let changes = controller.on_day_tapped(date(2, 10));
//! assert_eq!(changes.len(), 6);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod date;
pub mod grid;
pub mod selection;
