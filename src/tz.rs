use chrono::{DateTime, Local, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Timezone the grid is displayed in. Determines which date counts as today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tz {
    Local,
    Iana(chrono_tz::Tz),
}

impl Default for Tz {
    fn default() -> Self {
        Tz::Local
    }
}

impl Tz {
    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            Tz::Local => instant.with_timezone(&Local).date_naive(),
            Tz::Iana(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    /// Reads the system clock.
    pub fn today(&self) -> NaiveDate {
        self.date_of(&Utc::now())
    }
}

impl FromStr for Tz {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();

        if matches!(lowercase.as_str(), "localtime" | "local") {
            Ok(Tz::Local)
        } else if let Ok(tz) = s.parse::<chrono_tz::Tz>() {
            Ok(Tz::Iana(tz))
        } else {
            Err(Error::new(
                ErrorKind::Timezone,
                &format!("Timezone '{}' not recognized", s),
            ))
        }
    }
}

impl fmt::Display for Tz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tz::Local => write!(f, "local"),
            Tz::Iana(tz) => write!(f, "{}", tz.name()),
        }
    }
}
