pub mod config;
pub mod day;
pub mod error;
pub mod grid;
pub mod tz;

pub use day::CalendarDay;
pub use grid::MonthGrid;
