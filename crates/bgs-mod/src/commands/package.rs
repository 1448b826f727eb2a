use crate::commands::classify::{print_summary, run_classification};
use crate::commands::plan::max_chunk_size_gb;
use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{self, config, require_dir, validate_mod_name};
use bgs_archive::{
    gb_to_bytes, BsarchTool, FileBucket, PackageAssembler, PackageProgress, PackageStage,
    TemplateEspFactory, ZipCompressor,
};
use bgs_classify::DEFAULT_THREAD_COUNT;
use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;

/// Directory below the output directory that holds the classified buckets.
const STAGE_DIR: &str = ".stage";

#[derive(Debug)]
pub struct PackageArgs {
    pub source: String,
    pub generated: String,
    pub mod_name: String,
    pub output_dir: String,
    pub game: Option<String>,
    pub archiver: Option<String>,
    pub launcher: Option<String>,
    pub templates: Option<String>,
    pub max_chunk_size_gb: Option<f64>,
    pub threads: Option<usize>,
    pub compress_archives: bool,
}

pub fn package_mod(args: PackageArgs) -> Result<()> {
    validate_mod_name(&args.mod_name)?;

    let cfg = config::load_config();
    let game = utils::resolve_game(args.game.as_deref(), cfg.default_game)?;
    let source = require_dir(Utf8Path::new(&args.source))?;
    let generated = require_dir(Utf8Path::new(&args.generated))?;
    let threads = args.threads.or(cfg.thread_count).unwrap_or(DEFAULT_THREAD_COUNT);
    let max_gb = max_chunk_size_gb(args.max_chunk_size_gb, cfg.max_chunk_size_gb);
    if gb_to_bytes(max_gb).is_none() {
        return Err(CliError::InvalidChunkSize { value: max_gb }.into());
    }

    let archiver = args
        .archiver
        .map(Utf8PathBuf::from)
        .or(cfg.archiver_path)
        .ok_or(CliError::ArchiverNotSet)?;
    let launcher = args.launcher.or(cfg.archiver_launcher);
    let templates = args
        .templates
        .map(Utf8PathBuf::from)
        .or(cfg.esp_template_dir)
        .ok_or(CliError::TemplatesNotSet)?;

    let output_dir = Utf8PathBuf::from(&args.output_dir);
    let stage_dir = output_dir.join(STAGE_DIR).join(&args.mod_name);
    if stage_dir.exists() {
        std::fs::remove_dir_all(&stage_dir).into_diagnostic()?;
    }
    let pack_dir = stage_dir.join("pack");
    let loose_dir = stage_dir.join("loose");

    println!(
        "{} {} {}",
        "📦 Packaging".bright_blue().bold(),
        args.mod_name.bright_cyan().bold(),
        format!("for {}", game.display_name()).bright_white()
    );

    let report = run_classification(
        &source,
        &generated,
        game,
        threads,
        Some((pack_dir.clone(), loose_dir.clone())),
        true,
    )?;
    print_summary(&report);
    if !report.failed.is_empty() {
        println_pad!(
            "{} {} file(s) could not be classified and are left out of the package",
            "warning:".bright_yellow().bold(),
            report.failed.len()
        );
    }

    let pack = FileBucket::from_dir(pack_dir).into_diagnostic()?;
    let loose = FileBucket::from_dir(loose_dir).into_diagnostic()?;

    let mut tool = BsarchTool::new(archiver).with_compression(args.compress_archives);
    if let Some(launcher) = launcher {
        tool = tool.with_launcher(launcher);
    }

    let assembler = PackageAssembler::new(
        Arc::new(tool),
        Arc::new(ZipCompressor),
        Arc::new(TemplateEspFactory::new(templates)),
        game,
    )
    .with_max_chunk_size_gb(max_gb)
    .with_progress(print_progress);

    let result = assembler.assemble(&pack, &loose, &args.mod_name, &output_dir);

    for message in &result.manifest.messages {
        println_pad!("{} {}", "✗".bright_red(), message);
    }
    if !result.success {
        return Err(CliError::PackageIncomplete {
            mod_name: args.mod_name,
        }
        .into());
    }

    if let Err(err) = std::fs::remove_dir_all(&stage_dir) {
        tracing::warn!("Failed to remove {}: {}", stage_dir, err);
    }
    let _ = std::fs::remove_dir(output_dir.join(STAGE_DIR));

    println!(
        "{}\n{} {}",
        "✅ Package created successfully!".bright_green().bold(),
        "📍 Path:".bright_green(),
        result.package_path.as_str().bright_white().bold()
    );
    for name in result
        .manifest
        .archives
        .iter()
        .chain(&result.manifest.plugins)
        .chain(&result.manifest.loose_bundle)
        .map(|file| &file.name)
    {
        println_pad!("{}", name);
    }

    Ok(())
}

fn print_progress(progress: PackageProgress) {
    match progress.stage {
        PackageStage::Archiving if progress.total > 0 => {
            println_pad!("Creating archive {}/{}", progress.current, progress.total)
        }
        PackageStage::CreatingPlugin => println_pad!("Creating plugin descriptors"),
        PackageStage::CompressingLoose => println_pad!("Compressing loose files"),
        PackageStage::Finalizing => println_pad!("Finalizing package"),
        _ => {}
    }
}
