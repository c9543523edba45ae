//! Render-ready calendar cell sequences for a scrolling month list.
//!
//! ## Usage
//!
//! Configure a [`CalendarGridArgs`] and call [`build_calendar_grid`] once;
//! the returned cells are laid out in 7-wide rows in order. The grid's
//! month/day shape never changes afterwards — only each day cell's
//! selection status and availability flag are meant to mutate, driven by
//! [`SelectionController`](crate::selection::SelectionController) output.
use derive_setters::Setters;
use tracing::debug;

use crate::{
    date::{CalendarDate, CalendarError, DateRange, Weekday, YearMonth},
    selection::{SelectionState, SelectionStatus},
};

/// Layout defaults shared with hosts that precompute scroll offsets.
pub struct CalendarListDefaults;

impl CalendarListDefaults {
    /// Cells per row.
    pub const COLUMNS: usize = 7;
    /// Main-axis extent of every cell row.
    pub const CELL_EXTENT: f32 = 40.0;
    /// Gap between successive rows.
    pub const CELL_SPACING: f32 = 4.0;
    /// Months shown past the current one when no window is configured.
    pub const MAX_MONTHS: u32 = 3;
    /// English full month names, January first.
    pub const MONTH_NAMES: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    /// English weekday abbreviations, Sunday first.
    pub const WEEKDAY_NAMES: [&'static str; 7] =
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    /// Returns the scroll offset of the row containing `cell_index`.
    ///
    /// Every row has the same extent, so hosts can position a virtualized
    /// list without measuring cells.
    pub fn row_offset(cell_index: usize) -> f32 {
        (cell_index / Self::COLUMNS) as f32 * (Self::CELL_EXTENT + Self::CELL_SPACING)
    }
}

/// Accent class of a weekday column.
///
/// The two end-of-week columns carry distinct accents so a renderer can
/// color them apart; every other column shares the default class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayAccent {
    /// Ordinary weekday column.
    #[default]
    Default,
    /// The Saturday column.
    Saturday,
    /// The Sunday column.
    Sunday,
}

impl WeekdayAccent {
    /// Returns the accent class for `weekday`.
    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Saturday => WeekdayAccent::Saturday,
            Weekday::Sunday => WeekdayAccent::Sunday,
            _ => WeekdayAccent::Default,
        }
    }
}

/// Render data of one selectable day.
///
/// Everything except `status` and `available` is fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// The day this cell renders.
    pub date: CalendarDate,
    /// Whether the user may select this day.
    pub available: bool,
    /// Accent class of the cell's weekday column.
    pub accent: WeekdayAccent,
    /// Whether this day is the configured today.
    pub is_today: bool,
    /// Current selection status.
    pub status: SelectionStatus,
}

/// One cell of the flat calendar sequence, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// First cell of a month block, carrying the "<month> <year>" title.
    MonthTitle {
        /// The month this block covers.
        month: YearMonth,
        /// Resolved display title.
        title: String,
    },
    /// Continuation cell completing the month-title row.
    MonthTitleSpan,
    /// Weekday column header.
    DayTitle {
        /// Short weekday label.
        label: String,
        /// Accent class of the column.
        accent: WeekdayAccent,
    },
    /// A selectable day.
    Day(DayCell),
    /// Filler keeping day cells aligned to their weekday columns.
    Blank,
}

/// Configuration for [`build_calendar_grid`].
///
/// Every field is optional in spirit: the defaults reproduce a
/// three-month window anchored at today.
#[derive(Clone, Setters)]
pub struct CalendarGridArgs {
    /// Date initially selected as the range start.
    #[setters(strip_option)]
    pub start_date: Option<CalendarDate>,
    /// Date initially selected as the range end.
    #[setters(strip_option)]
    pub end_date: Option<CalendarDate>,
    /// The full span of dates to render.
    #[setters(strip_option)]
    pub full_range: Option<DateRange>,
    /// The span of dates the user may select.
    #[setters(strip_option)]
    pub available_range: Option<DateRange>,
    /// Full month names, January first.
    pub month_names: [String; 12],
    /// Short weekday names, Sunday first; reindexed by `first_day_of_week`.
    pub weekday_names: [String; 7],
    /// Months shown past the current one when no window is given.
    pub max_months: u32,
    /// Weekday rendered in the leftmost column.
    pub first_day_of_week: Weekday,
    /// The date treated as today; explicit so hosts and tests can pin it.
    pub today: CalendarDate,
}

impl Default for CalendarGridArgs {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            full_range: None,
            available_range: None,
            month_names: CalendarListDefaults::MONTH_NAMES.map(String::from),
            weekday_names: CalendarListDefaults::WEEKDAY_NAMES.map(String::from),
            max_months: CalendarListDefaults::MAX_MONTHS,
            first_day_of_week: Weekday::Monday,
            today: CalendarDate::today(),
        }
    }
}

/// Builds the flat cell sequence covering every month of the visible
/// window.
///
/// Each month block is emitted as one [`CalendarCell::MonthTitle`] plus six
/// [`CalendarCell::MonthTitleSpan`] continuations, seven rotated
/// [`CalendarCell::DayTitle`] headers, leading blanks aligning the first
/// emitted day under its weekday column, the day cells, and trailing
/// blanks padding the block to full rows.
///
/// Fails with [`CalendarError::InvertedRange`] when the resolved visible
/// window is inverted, which can only happen when the configured available
/// window ends before the current month.
pub fn build_calendar_grid(args: &CalendarGridArgs) -> Result<Vec<CalendarCell>, CalendarError> {
    let (visible, available) = resolve_windows(args)?;
    let selection = SelectionState::from_endpoints(args.start_date, args.end_date);
    debug!(
        visible_start = %visible.start(),
        visible_end = %visible.end(),
        available_start = %available.start(),
        available_end = %available.end(),
        "building calendar grid"
    );

    let mut months: Vec<(YearMonth, Vec<CalendarCell>)> = Vec::new();
    for date in visible.days() {
        let month = YearMonth::of(date);
        let day = CalendarCell::Day(DayCell {
            date,
            available: available.contains(date),
            accent: WeekdayAccent::for_weekday(date.weekday()),
            is_today: date == args.today,
            status: selection.status_for(date),
        });
        match months.last_mut() {
            Some((current, cells)) if *current == month => cells.push(day),
            _ => {
                let offset = (date.weekday().index_from_monday()
                    - args.first_day_of_week.index_from_monday())
                .rem_euclid(7) as usize;
                let mut cells: Vec<CalendarCell> =
                    (0..offset).map(|_| CalendarCell::Blank).collect();
                cells.push(day);
                months.push((month, cells));
            }
        }
    }

    let mut grid = Vec::new();
    for (month, mut cells) in months {
        let pad = (7 - cells.len() % 7) % 7;
        cells.extend((0..pad).map(|_| CalendarCell::Blank));

        let name = &args.month_names[(month.month() - 1) as usize];
        grid.push(CalendarCell::MonthTitle {
            month,
            title: format!("{} {}", name, month.year()),
        });
        grid.extend((0..6).map(|_| CalendarCell::MonthTitleSpan));
        for column in 0..7 {
            let weekday =
                Weekday::from_sunday_index(args.first_day_of_week.index_from_sunday() + column);
            grid.push(CalendarCell::DayTitle {
                label: args.weekday_names[weekday.index_from_sunday() as usize].clone(),
                accent: WeekdayAccent::for_weekday(weekday),
            });
        }
        grid.append(&mut cells);
    }
    Ok(grid)
}

/// Resolves the visible and available windows from partial configuration.
fn resolve_windows(args: &CalendarGridArgs) -> Result<(DateRange, DateRange), CalendarError> {
    let today = args.today;
    // "max_months ahead" counts the current month, so a value of 3 shows
    // today's month plus the next two.
    let months_ahead = args.max_months.max(1) as i32 - 1;
    let default_available =
        || DateRange::new(today, YearMonth::of(today).add_months(months_ahead).last_day());

    match (args.full_range, args.available_range) {
        (Some(full), Some(available)) => Ok((full, available)),
        (Some(full), None) => Ok((full, default_available()?)),
        (None, Some(available)) => {
            let visible = DateRange::new(
                today.first_of_month(),
                YearMonth::of(available.end()).last_day(),
            )?;
            Ok((visible, available))
        }
        (None, None) => {
            let available = default_available()?;
            let visible = DateRange::new(today.first_of_month(), available.end())?;
            Ok((visible, available))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid test date")
    }

    fn range(start: CalendarDate, end: CalendarDate) -> DateRange {
        DateRange::new(start, end).expect("valid test range")
    }

    /// Args for the example scenario: Jan-Mar 2022 visible, February
    /// onwards available, Feb 16-20 selected.
    fn scenario_args() -> CalendarGridArgs {
        CalendarGridArgs::default()
            .full_range(range(d(2022, 1, 1), d(2022, 3, 31)))
            .available_range(range(d(2022, 2, 1), d(2022, 3, 31)))
            .start_date(d(2022, 2, 16))
            .end_date(d(2022, 2, 20))
            .today(d(2022, 1, 10))
    }

    fn day_cells(grid: &[CalendarCell]) -> Vec<&DayCell> {
        grid.iter()
            .filter_map(|cell| match cell {
                CalendarCell::Day(day) => Some(day),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_completeness() {
        let grid = build_calendar_grid(&scenario_args()).expect("valid grid");
        let days = day_cells(&grid);
        assert_eq!(days.len(), 90);

        let expected: Vec<_> = range(d(2022, 1, 1), d(2022, 3, 31)).days().collect();
        let actual: Vec<_> = days.iter().map(|day| day.date).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_month_block_shape() {
        let grid = build_calendar_grid(&scenario_args()).expect("valid grid");

        // January 2022: title row, weekday row, 5 leading blanks (Jan 1 is
        // a Saturday, Monday-first columns), 31 days, 6 trailing blanks.
        assert_eq!(
            grid[0],
            CalendarCell::MonthTitle {
                month: YearMonth::new(2022, 1).expect("valid month"),
                title: "January 2022".to_string(),
            }
        );
        assert!(grid[1..7].iter().all(|c| *c == CalendarCell::MonthTitleSpan));
        let labels: Vec<_> = grid[7..14]
            .iter()
            .map(|cell| match cell {
                CalendarCell::DayTitle { label, .. } => label.as_str(),
                other => panic!("expected weekday header, got {other:?}"),
            })
            .collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert!(grid[14..19].iter().all(|c| *c == CalendarCell::Blank));
        assert!(matches!(
            grid[19],
            CalendarCell::Day(DayCell { date, .. }) if date == d(2022, 1, 1)
        ));
        assert!(grid[50..56].iter().all(|c| *c == CalendarCell::Blank));

        // February block starts right after: Feb 1 2022 is a Tuesday, so
        // one leading blank.
        assert_eq!(
            grid[56],
            CalendarCell::MonthTitle {
                month: YearMonth::new(2022, 2).expect("valid month"),
                title: "February 2022".to_string(),
            }
        );
        assert_eq!(grid[70], CalendarCell::Blank);
        assert!(matches!(
            grid[71],
            CalendarCell::Day(DayCell { date, .. }) if date == d(2022, 2, 1)
        ));

        // Every month's day section fills whole rows.
        assert_eq!(grid.len(), 56 + 49 + 49);
    }

    #[test]
    fn test_blank_padding_follows_first_day_of_week() {
        // With Sunday-first columns, January 2022 (starting Saturday)
        // needs 6 leading blanks.
        let args = scenario_args().first_day_of_week(Weekday::Sunday);
        let grid = build_calendar_grid(&args).expect("valid grid");
        assert!(grid[14..20].iter().all(|c| *c == CalendarCell::Blank));
        assert!(matches!(
            grid[20],
            CalendarCell::Day(DayCell { date, .. }) if date == d(2022, 1, 1)
        ));

        let labels: Vec<_> = grid[7..14]
            .iter()
            .map(|cell| match cell {
                CalendarCell::DayTitle { label, accent } => (label.as_str(), *accent),
                other => panic!("expected weekday header, got {other:?}"),
            })
            .collect();
        assert_eq!(labels[0], ("Sun", WeekdayAccent::Sunday));
        assert_eq!(labels[6], ("Sat", WeekdayAccent::Saturday));
        assert_eq!(labels[3], ("Wed", WeekdayAccent::Default));
    }

    #[test]
    fn test_scenario_statuses_and_availability() {
        let grid = build_calendar_grid(&scenario_args()).expect("valid grid");
        for day in day_cells(&grid) {
            let expected = if day.date == d(2022, 2, 16) {
                SelectionStatus::RangeBeginChosen
            } else if day.date == d(2022, 2, 20) {
                SelectionStatus::RangeEndChosen
            } else if day.date > d(2022, 2, 16) && day.date < d(2022, 2, 20) {
                SelectionStatus::RangeMiddleChosen
            } else {
                SelectionStatus::None
            };
            assert_eq!(day.status, expected, "status of {}", day.date);
            assert_eq!(day.available, day.date >= d(2022, 2, 1), "avail of {}", day.date);
            assert_eq!(day.is_today, day.date == d(2022, 1, 10));
            assert_eq!(day.accent, WeekdayAccent::for_weekday(day.date.weekday()));
        }
    }

    #[test]
    fn test_single_selection_status() {
        let args = scenario_args().end_date(d(2022, 2, 16));
        let grid = build_calendar_grid(&args).expect("valid grid");
        for day in day_cells(&grid) {
            let expected = if day.date == d(2022, 2, 16) {
                SelectionStatus::SingleChosen
            } else {
                SelectionStatus::None
            };
            assert_eq!(day.status, expected);
        }
    }

    #[test]
    fn test_default_window_resolution() {
        let args = CalendarGridArgs::default().today(d(2022, 1, 15));
        let grid = build_calendar_grid(&args).expect("valid grid");
        let days = day_cells(&grid);
        assert_eq!(days[0].date, d(2022, 1, 1));
        assert_eq!(days[days.len() - 1].date, d(2022, 3, 31));

        // Default availability runs from today to the window end.
        for day in &days {
            assert_eq!(day.available, day.date >= d(2022, 1, 15));
        }
    }

    #[test]
    fn test_available_range_drives_visible_end() {
        let args = CalendarGridArgs::default()
            .today(d(2022, 1, 15))
            .available_range(range(d(2022, 2, 1), d(2022, 2, 10)));
        let grid = build_calendar_grid(&args).expect("valid grid");
        let days = day_cells(&grid);
        assert_eq!(days[0].date, d(2022, 1, 1));
        assert_eq!(days[days.len() - 1].date, d(2022, 2, 28));
    }

    #[test]
    fn test_past_available_window_is_a_configuration_error() {
        let args = CalendarGridArgs::default()
            .today(d(2022, 5, 10))
            .available_range(range(d(2022, 1, 1), d(2022, 2, 28)));
        assert_eq!(
            build_calendar_grid(&args),
            Err(CalendarError::InvertedRange {
                start: d(2022, 5, 1),
                end: d(2022, 2, 28),
            })
        );
    }

    #[test]
    fn test_mid_month_window_offsets_from_first_visible_day() {
        // A window starting mid-month aligns its first day, not the 1st:
        // 2022-01-15 is a Saturday, so Monday-first columns need 5 blanks.
        let args = CalendarGridArgs::default()
            .full_range(range(d(2022, 1, 15), d(2022, 1, 31)))
            .today(d(2022, 1, 15));
        let grid = build_calendar_grid(&args).expect("valid grid");
        assert!(grid[14..19].iter().all(|c| *c == CalendarCell::Blank));
        assert!(matches!(
            grid[19],
            CalendarCell::Day(DayCell { date, .. }) if date == d(2022, 1, 15)
        ));
    }

    #[test]
    fn test_row_offset() {
        assert_eq!(CalendarListDefaults::row_offset(0), 0.0);
        assert_eq!(CalendarListDefaults::row_offset(6), 0.0);
        assert_eq!(CalendarListDefaults::row_offset(7), 44.0);
        assert_eq!(CalendarListDefaults::row_offset(15), 88.0);
    }
}
