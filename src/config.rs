use chrono::Weekday;
use log::{info, warn};
use serde::Deserialize;
use std::convert::TryFrom;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};
use crate::tz::Tz;

const CONFIG_PATH_ENV_VAR: &str = "DAYGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(dir).join("daygrid").join("config.toml")
    } else {
        home.join(".config").join("daygrid").join("config.toml")
    };

    let mut locations = vec![config_xdg, home.join(".daygrid.toml")];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    week_start: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub week_start: Weekday,
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            week_start: Weekday::Mon,
            timezone: Tz::Local,
        }
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = Error;
    fn try_from(file: ConfigFile) -> Result<Config> {
        let mut config = Config::default();

        if let Some(week_start) = file.week_start {
            config.week_start = week_start.parse::<Weekday>().map_err(|_| {
                Error::new(
                    ErrorKind::ConfigParse,
                    &format!("'{}' is not a weekday", week_start),
                )
            })?;
        }

        if let Some(timezone) = file.timezone {
            config.timezone = timezone.parse()?;
        }

        Ok(config)
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        Config::try_from(toml::from_str::<ConfigFile>(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|err| {
            let msg = match &err.message {
                Some(msg) => format!("{}: {}", path.display(), msg),
                None => path.display().to_string(),
            };
            err.with_msg(&msg)
        })
    }
}

/// Loads `path` if given, otherwise the first existing file among the
/// default locations, falling back to the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        return Config::from_path(path);
    }

    let locations = match find_configfile_locations() {
        Ok(locations) => locations,
        Err(err) => {
            warn!("{}, using default config", err);
            return Ok(Config::default());
        }
    };

    match locations.iter().find(|p| p.is_file()) {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_path(path)
        }
        None => {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn parse_all_keys() {
        let config = Config::from_toml(
            r#"
            week_start = "sunday"
            timezone = "Asia/Tokyo"
            "#,
        )
        .unwrap();

        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.timezone, Tz::Iana(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn short_weekday_names() {
        let config = Config::from_toml(r#"week_start = "Sat""#).unwrap();
        assert_eq!(config.week_start, Weekday::Sat);
    }

    #[test]
    fn bad_weekday() {
        let err = Config::from_toml(r#"week_start = "someday""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn bad_timezone() {
        let err = Config::from_toml(r#"timezone = "Nowhere/Town""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Timezone));
    }

    #[test]
    fn unknown_key() {
        let err = Config::from_toml(r#"colour = "red""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn missing_explicit_file() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/daygrid.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }

    #[test]
    fn error_names_file_once() {
        let path = env::temp_dir().join(format!("daygrid-tz-{}.toml", std::process::id()));
        fs::write(&path, "timezone = \"Nowhere/Town\"\n").unwrap();

        let err = Config::from_path(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err.kind, ErrorKind::Timezone));
        assert_eq!(
            err.to_string(),
            format!(
                "unknown timezone: {}: Timezone 'Nowhere/Town' not recognized",
                path.display()
            )
        );
    }

    // Everything touching the environment lives in this one test, other
    // tests run in parallel.
    #[test]
    fn configfile_search_order() {
        let vars = ["HOME", "XDG_CONFIG_HOME", CONFIG_PATH_ENV_VAR];
        let saved: Vec<_> = vars.iter().map(|v| env::var_os(v)).collect();

        env::set_var("HOME", "/home/tester");
        env::remove_var("XDG_CONFIG_HOME");
        env::remove_var(CONFIG_PATH_ENV_VAR);
        let without_xdg = find_configfile_locations().unwrap();

        env::set_var("XDG_CONFIG_HOME", "/xdg");
        let with_xdg = find_configfile_locations().unwrap();

        env::set_var(CONFIG_PATH_ENV_VAR, "/etc/daygrid.toml");
        let with_override = find_configfile_locations().unwrap();

        for (var, value) in vars.iter().zip(saved) {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }

        assert_eq!(
            without_xdg,
            vec![
                PathBuf::from("/home/tester/.config/daygrid/config.toml"),
                PathBuf::from("/home/tester/.daygrid.toml"),
            ]
        );
        assert_eq!(
            with_xdg,
            vec![
                PathBuf::from("/xdg/daygrid/config.toml"),
                PathBuf::from("/home/tester/.daygrid.toml"),
            ]
        );
        assert_eq!(
            with_override,
            vec![
                PathBuf::from("/etc/daygrid.toml"),
                PathBuf::from("/xdg/daygrid/config.toml"),
                PathBuf::from("/home/tester/.daygrid.toml"),
            ]
        );
    }

    #[test]
    fn explicit_file_is_read() {
        let path = env::temp_dir().join(format!("daygrid-{}.toml", std::process::id()));
        fs::write(&path, "week_start = \"wed\"\n").unwrap();

        let config = load_suitable_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.week_start, Weekday::Wed);
        assert_eq!(config.timezone, Tz::Local);
    }
}
