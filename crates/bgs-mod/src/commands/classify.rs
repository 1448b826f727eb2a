use crate::errors::CliError;
use crate::utils::{self, config, format_size, require_dir};
use crate::println_pad;
use bgs_classify::{ClassificationReport, Classifier, DEFAULT_THREAD_COUNT};
use bgs_game::{known_directory_names, scan_data_directory, GameType};
use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use std::io::Write;

/// File the classification report is written to inside the output directory.
pub const REPORT_FILE_NAME: &str = "classification.json";

#[derive(Debug)]
pub struct ClassifyArgs {
    pub source: String,
    pub generated: String,
    pub output_dir: Option<String>,
    pub game: Option<String>,
    pub threads: Option<usize>,
    pub json: bool,
}

pub fn classify_mod_files(args: ClassifyArgs) -> Result<()> {
    let cfg = config::load_config();
    let game = utils::resolve_game(args.game.as_deref(), cfg.default_game)?;
    let source = require_dir(Utf8Path::new(&args.source))?;
    let generated = require_dir(Utf8Path::new(&args.generated))?;
    let threads = args.threads.or(cfg.thread_count).unwrap_or(DEFAULT_THREAD_COUNT);

    if !args.json {
        println!(
            "{} {} {}",
            "🔍 Classifying".bright_blue().bold(),
            generated.as_str().bright_cyan().bold(),
            format!("against {} ({})", source, game.display_name()).bright_white()
        );
    }

    let outputs = args.output_dir.as_deref().map(|dir| {
        let dir = Utf8PathBuf::from(dir);
        (dir.join("pack"), dir.join("loose"))
    });
    let report = run_classification(&source, &generated, game, threads, outputs, !args.json)?;

    if let Some(dir) = &args.output_dir {
        let path = Utf8Path::new(dir).join(REPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        std::fs::write(&path, json).into_diagnostic()?;
        tracing::info!("Report written to {}", path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Known data directory names for `game`, extended by the live `Data` listing.
pub(crate) fn known_dirs(game: GameType, source: &Utf8Path) -> HashSet<String> {
    let mut known = known_directory_names(game);
    match scan_data_directory(source) {
        Ok(scanned) => known.extend(scanned),
        Err(err) => tracing::warn!("Could not scan {} for data directories: {}", source, err),
    }
    known
}

/// Classify `generated` against `source`, copying into `outputs` when given.
pub(crate) fn run_classification(
    source: &Utf8Path,
    generated: &Utf8Path,
    game: GameType,
    threads: usize,
    outputs: Option<(Utf8PathBuf, Utf8PathBuf)>,
    show_progress: bool,
) -> Result<ClassificationReport> {
    let mut classifier = Classifier::new(source.to_path_buf(), generated.to_path_buf())
        .with_threads(threads)
        .with_known_dirs(known_dirs(game, source));

    if let Some((pack_dir, loose_dir)) = outputs {
        classifier = classifier.with_outputs(pack_dir, loose_dir);
    }
    if show_progress {
        classifier = classifier.with_progress(|progress| {
            if progress.current % 100 == 0 || progress.current == progress.total {
                eprint!("\r    [{}/{}]", progress.current, progress.total);
                if progress.current == progress.total {
                    eprintln!();
                }
                let _ = std::io::stderr().flush();
            }
        });
    }

    classifier.classify().map_err(|err| CliError::from(err).into())
}

pub(crate) fn print_summary(report: &ClassificationReport) {
    println!();
    println_pad!(
        "{} {} files ({})",
        "pack: ".bright_green().bold(),
        report.pack.len(),
        format_size(report.pack_size_bytes())
    );
    println_pad!(
        "{} {} files ({})",
        "loose:".bright_yellow().bold(),
        report.loose.len(),
        format_size(report.loose_size_bytes())
    );
    println_pad!("{} {} files", "skip: ".bright_white().bold(), report.skip.len());
    println_pad!("{} {} files", "fail: ".bright_red().bold(), report.failed.len());

    for failed in &report.failed {
        println_pad!(
            "  {} {}: {}",
            "✗".bright_red(),
            failed.relative_path,
            failed.message
        );
    }
    println!();
}
