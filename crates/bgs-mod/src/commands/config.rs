use crate::errors::CliError;
use crate::utils::config::{self, AppConfig};
use bgs_game::GameType;
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::Result;

fn save(update: impl FnOnce(&mut AppConfig)) -> Result<()> {
    config::update_config(update)
        .map(|_| ())
        .map_err(|source| CliError::ConfigSave { source }.into())
}

/// Print a config path entry with status indicator
fn print_path_config(
    name: &str,
    path: Option<&Utf8PathBuf>,
    validator: impl Fn(&Utf8PathBuf) -> bool,
) {
    match path {
        Some(p) => {
            let status = if validator(p) {
                "✓".bright_green()
            } else {
                "✗".bright_red()
            };
            println!("  {} {} {}", format!("{}:", name).bright_white(), p, status);
        }
        None => print_unset(name),
    }
}

fn print_value_config(name: &str, value: Option<String>) {
    match value {
        Some(value) => println!("  {} {}", format!("{}:", name).bright_white(), value),
        None => print_unset(name),
    }
}

fn print_unset(name: &str) {
    println!(
        "  {} {}",
        format!("{}:", name).bright_white(),
        "(not set)".bright_yellow()
    );
}

pub fn show_config() -> Result<()> {
    let cfg = config::load_config();
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    println!();
    println!("  {} {}", "config_file:".bright_white(), config_path);

    print_path_config("archiver_path", cfg.archiver_path.as_ref(), |p| p.is_file());
    print_value_config("archiver_launcher", cfg.archiver_launcher.clone());
    print_path_config("esp_template_dir", cfg.esp_template_dir.as_ref(), |p| {
        p.is_dir()
    });
    print_value_config(
        "default_game",
        cfg.default_game
            .map(|game| format!("{} ({})", game.id(), game.display_name())),
    );
    print_value_config(
        "max_chunk_size_gb",
        cfg.max_chunk_size_gb.map(|gb| gb.to_string()),
    );
    print_value_config("thread_count", cfg.thread_count.map(|n| n.to_string()));

    println!();
    Ok(())
}

pub fn set_archiver(path: String) -> Result<()> {
    let path = Utf8PathBuf::from(path);
    if !path.is_file() {
        eprintln!(
            "  {}",
            "The path must point to the BSArch executable.".bright_yellow()
        );
        return Err(miette::miette!("Archiver not found: {}", path));
    }

    save(|cfg| cfg.archiver_path = Some(path.clone()))?;
    print_updated("Archiver", path.as_str());
    Ok(())
}

pub fn set_launcher(launcher: String) -> Result<()> {
    save(|cfg| cfg.archiver_launcher = Some(launcher.clone()))?;
    print_updated("Launcher", &launcher);
    Ok(())
}

pub fn set_templates(dir: String) -> Result<()> {
    let dir = Utf8PathBuf::from(dir);
    if !dir.is_dir() {
        return Err(CliError::directory_not_found(dir).into());
    }

    save(|cfg| cfg.esp_template_dir = Some(dir.clone()))?;
    print_updated("Template directory", dir.as_str());
    Ok(())
}

pub fn set_game(game: String) -> Result<()> {
    let parsed = game
        .parse::<GameType>()
        .map_err(|_| CliError::UnknownGame { value: game })?;

    save(|cfg| cfg.default_game = Some(parsed))?;
    print_updated("Default game", parsed.display_name());
    Ok(())
}

pub fn reset_config() -> Result<()> {
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    config::save_config(&AppConfig::default())
        .map_err(|source| CliError::ConfigSave { source })?;

    println!(
        "{}",
        "✓ Configuration reset to defaults".bright_green().bold()
    );
    println!();
    println!("  {} {}", "Config file:".bright_white().bold(), config_path);
    println!();

    Ok(())
}

fn print_updated(what: &str, value: &str) {
    println!(
        "{}",
        format!("✓ {} set successfully!", what).bright_green().bold()
    );
    println!();
    println!("  {} {}", "Value:".bright_white().bold(), value.bright_green());
}
