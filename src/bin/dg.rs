extern crate daygrid as lib;

use chrono::{NaiveDate, Weekday};
use flexi_logger::{FileSpec, Logger};
use lib::config::load_suitable_config;
use lib::day::CalendarDay;
use lib::grid::MonthGrid;
use log::debug;
use std::path::PathBuf;
use structopt::StructOpt;

fn parse_month(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

#[derive(Debug, StructOpt)]
#[structopt(name = "dg", about = "Prints a month grid.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show as YYYY-MM (default: current month)",
        parse(try_from_str = parse_month)
    )]
    pub month: Option<NaiveDate>,

    #[structopt(
        short = "s",
        long = "select",
        help = "date to mark as selected, YYYY-MM-DD",
        parse(try_from_str = parse_date)
    )]
    pub select: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

const CELL_WIDTH: usize = 5;

fn cell(day: &CalendarDay) -> String {
    let mut label = day.number();
    if day.is_today() {
        label.push('*');
    }

    if day.is_selected() {
        format!("[{}]", label)
    } else if !day.is_current_month() {
        format!("({})", label)
    } else {
        label
    }
}

fn weekday_label(weekday: Weekday) -> String {
    let name = weekday.to_string();
    name[..2].to_owned()
}

fn render(grid: &MonthGrid) -> String {
    let width = CELL_WIDTH * grid.weekdays().len();
    let mut out = format!("{:^width$}\n", grid.title(), width = width);

    for weekday in grid.weekdays() {
        out.push_str(&format!("{:>w$}", weekday_label(weekday), w = CELL_WIDTH));
    }
    out.push('\n');

    for week in grid.weeks() {
        for day in &week {
            out.push_str(&format!("{:>w$}", cell(day), w = CELL_WIDTH));
        }
        out.push('\n');
    }

    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        println!("daygrid ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = load_suitable_config(args.configfile.as_deref())?;
    debug!("Using {:?}", config);

    // Read once so every cell of this pass agrees on the date.
    let today = config.timezone.today();
    let shown = args.month.unwrap_or(today);

    let grid = MonthGrid::containing(shown, today)?
        .with_week_start(config.week_start)
        .with_selection(args.select);

    print!("{}", render(&grid));

    Ok(())
}
