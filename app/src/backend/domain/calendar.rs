//! Calendar domain logic for the booking widget.
//!
//! Builds the fixed 6x7 month grid the page renders, decides which days can be
//! booked, and owns the month cursor arithmetic. "Today" always comes from the
//! caller so the grid is a pure function of its inputs.

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::{CalendarDayType, CalendarMonth, CurrentDateResponse, DaySlot};

/// Number of cells in a rendered month (6 rows of 7 days)
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 0 and 11")]
    InvalidMonth(u32),
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// The month currently shown by the widget (month is zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Cursor on the month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self { year: self.year - 1, month: 11 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self { year: self.year + 1, month: 0 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Generate the 42-cell grid for `year`/`month` (zero-based) relative to `today`
    pub fn generate_calendar_month(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<CalendarMonth, CalendarError> {
        let cursor = CalendarCursor::new(year, month)?;
        let first_day = self.first_day_of_month(year, month)?;
        let days_in_month = self.days_in_month(year, month)?;
        let previous = cursor.previous();
        let days_in_previous = self.days_in_month(previous.year, previous.month)?;

        debug!(
            "Generating calendar for {} {} (first weekday {}, {} days)",
            self.month_name(month), year, first_day, days_in_month
        );

        let mut days = Vec::with_capacity(GRID_CELLS);

        for offset in (0..first_day).rev() {
            days.push(Self::padding_day(days_in_previous - offset, CalendarDayType::PaddingBefore));
        }

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month + 1, day)
                .ok_or(CalendarError::InvalidDate { year, month, day })?;
            let is_past = date < today;
            days.push(DaySlot {
                day_number: day,
                day_type: CalendarDayType::MonthDay,
                in_current_month: true,
                is_today: date == today,
                is_past,
                is_selectable: !is_past,
                is_selected: false,
                iso_date: Some(date.format("%Y-%m-%d").to_string()),
            });
        }

        let trailing = GRID_CELLS - days.len();
        for day in 1..=trailing as u32 {
            days.push(Self::padding_day(day, CalendarDayType::PaddingAfter));
        }

        Ok(CalendarMonth {
            year,
            month,
            title: self.month_title(cursor),
            first_day_of_week: first_day,
            days,
        })
    }

    /// Check whether a concrete day may be booked given `today`
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today
    }

    /// Resolve a (year, zero-based month, day) triple into a date
    pub fn resolve_date(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month + 1, day).ok_or(CalendarError::InvalidDate { year, month, day })
    }

    /// Get the number of days in a given month (zero-based)
    pub fn days_in_month(&self, year: i32, month: u32) -> Result<u32, CalendarError> {
        match month {
            1 => Ok(if self.is_leap_year(year) { 29 } else { 28 }),
            3 | 5 | 8 | 10 => Ok(30),
            0 | 2 | 4 | 6 | 7 | 9 | 11 => Ok(31),
            _ => Err(CalendarError::InvalidMonth(month)),
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Weekday index of day 1 (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, year: i32, month: u32) -> Result<u32, CalendarError> {
        let first = self.resolve_date(year, month, 1)?;
        Ok(first.weekday().num_days_from_sunday())
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES.get(month as usize).copied().unwrap_or("Invalid Month")
    }

    /// e.g. "February 2024"
    pub fn month_title(&self, cursor: CalendarCursor) -> String {
        format!("{} {}", self.month_name(cursor.month), cursor.year)
    }

    /// e.g. "Thursday, February 1, 2024"
    pub fn format_long_date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} {}, {}",
            date.format("%A"),
            self.month_name(date.month0()),
            date.day(),
            date.year()
        )
    }

    /// US numeric form used in booking emails, e.g. "2/1/2024"
    pub fn format_us_date(&self, date: NaiveDate) -> String {
        format!("{}/{}/{}", date.month(), date.day(), date.year())
    }

    pub fn current_date(&self, today: NaiveDate) -> CurrentDateResponse {
        CurrentDateResponse {
            year: today.year(),
            month: today.month0(),
            day: today.day(),
            formatted_date: format!("{} {}, {}", self.month_name(today.month0()), today.day(), today.year()),
            iso_date: today.format("%Y-%m-%d").to_string(),
        }
    }

    fn padding_day(day_number: u32, day_type: CalendarDayType) -> DaySlot {
        DaySlot {
            day_number,
            day_type,
            in_current_month: false,
            is_today: false,
            is_past: false,
            is_selectable: false,
            is_selected: false,
            iso_date: None,
        }
    }
}
