use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use log::debug;

use crate::day::CalendarDay;
use crate::error::{Error, ErrorKind, Result};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const CELLS_PER_GRID: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

pub fn days_of_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|f| f.checked_add_months(Months::new(1)));

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Cells preceding the 1st. A month starting on the first column still gets
/// a whole week of the previous month, so this is always in `1..=7`.
fn leading_days(first: NaiveDate, week_start: Weekday) -> u32 {
    let offset = (first.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;

    if offset == 0 {
        DAYS_PER_WEEK as u32
    } else {
        offset
    }
}

/// Builds the 6x7 cell layout for one displayed month.
///
/// "Today" is injected once and used for the whole construction pass, so a
/// grid never ends up with two (or zero) today cells because the clock
/// ticked past midnight in between.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first: NaiveDate,
    start: NaiveDate,
    week_start: Weekday,
    today: NaiveDate,
    selected: Option<NaiveDate>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32, today: NaiveDate) -> Result<Self> {
        let week_start = Weekday::Mon;
        let (first, start) = Self::bounds(year, month, week_start)?;

        Ok(MonthGrid {
            first,
            start,
            week_start,
            today,
            selected: None,
        })
    }

    pub fn containing(date: NaiveDate, today: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month(), today)
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        // Only the leading offset changes and `bounds` covered a full week.
        self.start = self.first
            - Duration::days(i64::from(leading_days(self.first, week_start)));
        self
    }

    pub fn with_selection(mut self, selected: Option<NaiveDate>) -> Self {
        self.selected = selected;
        self
    }

    fn bounds(year: i32, month: u32, week_start: Weekday) -> Result<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidDate,
                &format!("{:04}-{:02} is not a valid month", year, month),
            )
        })?;

        // Checked for the widest possible lead so any week start fits later.
        let widest = first.checked_sub_signed(Duration::days(DAYS_PER_WEEK as i64));
        let end = first.checked_add_signed(Duration::days(CELLS_PER_GRID as i64));

        match (widest, end) {
            (Some(_), Some(_)) => Ok((
                first,
                first - Duration::days(i64::from(leading_days(first, week_start))),
            )),
            _ => Err(Error::new(
                ErrorKind::InvalidDate,
                &format!("{:04}-{:02} is out of the supported range", year, month),
            )),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Weekdays in column order.
    pub fn weekdays(&self) -> Vec<Weekday> {
        std::iter::successors(Some(self.week_start), |wd| Some(wd.succ()))
            .take(DAYS_PER_WEEK)
            .collect()
    }

    pub fn days(&self) -> Vec<CalendarDay> {
        let (year, month) = (self.year(), self.month());

        let days: Vec<CalendarDay> = self
            .start
            .iter_days()
            .take(CELLS_PER_GRID)
            .map(|date| {
                CalendarDay::new(
                    date,
                    date.year() == year && date.month() == month,
                    date == self.today,
                    self.selected == Some(date),
                )
            })
            .collect();

        debug!(
            "Built grid for {:04}-{:02}: {} cells starting {}",
            year,
            month,
            days.len(),
            self.start
        );

        days
    }

    pub fn weeks(&self) -> Vec<Vec<CalendarDay>> {
        self.days()
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect()
    }

    pub fn next_month(&mut self) -> Result<()> {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        self.goto(year, month)
    }

    pub fn prev_month(&mut self) -> Result<()> {
        let (year, month) = if self.month() == 1 {
            (self.year() - 1, 12)
        } else {
            (self.year(), self.month() - 1)
        };
        self.goto(year, month)
    }

    pub fn goto(&mut self, year: i32, month: u32) -> Result<()> {
        let (first, start) = Self::bounds(year, month, self.week_start)?;
        self.first = first;
        self.start = start;
        Ok(())
    }

    /// Selecting the already selected date clears the selection.
    pub fn select(&mut self, date: NaiveDate) {
        if self.selected == Some(date) {
            self.selected = None;
        } else {
            self.selected = Some(date);
        }
    }

    pub fn select_day(&mut self, day: &CalendarDay) {
        self.select(day.date())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }
}
