use crate::errors::CliError;
use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};
use miette::Result;
use regex::Regex;

pub mod config;
pub mod logging;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

pub fn is_valid_slug(name: impl AsRef<str>) -> bool {
    Regex::new(r"^[[:word:]-]+$")
        .map(|re| re.is_match(name.as_ref()))
        .unwrap_or(false)
}

pub fn validate_mod_name(name: impl AsRef<str>) -> Result<()> {
    let name_str = name.as_ref();
    if !is_valid_slug(name_str) {
        return Err(CliError::invalid_mod_name(name_str.to_string(), None).into());
    }

    Ok(())
}

/// The game from `--game`, falling back to the configured default.
pub fn resolve_game(flag: Option<&str>, default_game: Option<GameType>) -> Result<GameType> {
    match flag {
        Some(value) => value.parse::<GameType>().map_err(|_| {
            CliError::UnknownGame {
                value: value.to_string(),
            }
            .into()
        }),
        None => default_game.ok_or_else(|| CliError::GameNotSet.into()),
    }
}

pub fn require_dir(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if !path.is_dir() {
        return Err(CliError::directory_not_found(path.to_path_buf()).into());
    }
    Ok(path.to_path_buf())
}

/// Human readable byte count using binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
