use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A single cell of a month grid.
///
/// The flags are stored exactly as handed in by whoever builds the grid and
/// are never derived from the date. In particular a `CalendarDay` does not
/// know what "today" is; that has to be injected.
#[derive(Debug, Clone)]
pub struct CalendarDay {
    id: Uuid,
    date: NaiveDate,
    is_current_month: bool,
    is_today: bool,
    is_selected: bool,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, is_current_month: bool, is_today: bool, is_selected: bool) -> Self {
        CalendarDay {
            id: Uuid::new_v4(),
            date,
            is_current_month,
            is_today,
            is_selected,
        }
    }

    pub fn unselected(date: NaiveDate, is_current_month: bool, is_today: bool) -> Self {
        Self::new(date, is_current_month, is_today, false)
    }

    /// Uses the calendar day of `datetime` in its own timezone.
    pub fn from_datetime<Tz: TimeZone>(
        datetime: &DateTime<Tz>,
        is_current_month: bool,
        is_today: bool,
        is_selected: bool,
    ) -> Self {
        Self::new(
            datetime.date_naive(),
            is_current_month,
            is_today,
            is_selected,
        )
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_current_month(&self) -> bool {
        self.is_current_month
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub fn select(&mut self) {
        self.is_selected = true;
    }

    pub fn unselect(&mut self) {
        self.is_selected = false;
    }

    /// Day of month without padding, e.g. `"7"` for the 7th.
    pub fn number(&self) -> String {
        self.date.day().to_string()
    }
}

impl PartialEq for CalendarDay {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CalendarDay {}

impl Hash for CalendarDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.day())
    }
}
