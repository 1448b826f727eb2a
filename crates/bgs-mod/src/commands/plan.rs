use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{self, config, format_size, require_dir, validate_mod_name};
use bgs_archive::{
    archive_file_name, descriptor_name, gb_to_bytes, pack_chunks, ChunkPlan, FileBucket,
};
use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

#[derive(Debug)]
pub struct PlanArgs {
    pub pack_dir: String,
    pub mod_name: String,
    pub game: Option<String>,
    pub max_chunk_size_gb: Option<f64>,
}

/// Preview how a pack directory would be split into archives.
pub fn plan_archives(args: PlanArgs) -> Result<()> {
    validate_mod_name(&args.mod_name)?;
    let cfg = config::load_config();
    let game = utils::resolve_game(args.game.as_deref(), cfg.default_game)?;
    let max_gb = max_chunk_size_gb(args.max_chunk_size_gb, cfg.max_chunk_size_gb);
    let max_bytes = gb_to_bytes(max_gb).ok_or(CliError::InvalidChunkSize { value: max_gb })?;

    let pack_dir = require_dir(Utf8Path::new(&args.pack_dir))?;
    let bucket = FileBucket::from_dir(pack_dir.clone()).into_diagnostic()?;

    let sized = bucket
        .files()
        .iter()
        .map(|file| -> Result<(Utf8PathBuf, u64)> {
            let size = std::fs::metadata(file).into_diagnostic()?.len();
            Ok((file.clone(), size))
        })
        .collect::<Result<Vec<_>>>()?;

    let chunks = if sized.iter().map(|(_, size)| size).sum::<u64>() <= max_bytes {
        // Fits in one archive; the tool packs the directory directly
        pack_chunks(sized, u64::MAX)
    } else {
        pack_chunks(sized, max_bytes)
    };
    let plan = ChunkPlan::summarize(&chunks, max_bytes);

    println!(
        "{} {} {}",
        "📐 Archive plan for".bright_blue().bold(),
        args.mod_name.bright_cyan().bold(),
        format!("({}, max {} per archive)", game.display_name(), format_size(max_bytes))
            .bright_white()
    );
    println!();

    let extension = game.archive_extension();
    for (index, chunk) in chunks.iter().enumerate() {
        let marker = if chunk.total_size_bytes > max_bytes {
            " oversized".bright_red().to_string()
        } else {
            String::new()
        };
        println_pad!(
            "{}  {} files, {}{}  → {}.esp",
            archive_file_name(&args.mod_name, index, extension).bright_green(),
            chunk.files.len(),
            format_size(chunk.total_size_bytes),
            marker,
            descriptor_name(&args.mod_name, index)
        );
        for file in &chunk.files {
            let relative = file.strip_prefix(&pack_dir).unwrap_or(file.as_path());
            tracing::debug!("  {} {}", index, relative);
        }
    }

    println!();
    println_pad!(
        "{} {} archive(s), {} files, {}",
        "total:".bright_white().bold(),
        plan.chunk_count,
        plan.file_count,
        format_size(plan.total_size_bytes)
    );
    if plan.oversized_count > 0 {
        println_pad!(
            "{} {} file(s) exceed the limit and get an archive of their own",
            "warning:".bright_yellow().bold(),
            plan.oversized_count
        );
    }

    Ok(())
}

pub(crate) fn max_chunk_size_gb(flag: Option<f64>, configured: Option<f64>) -> f64 {
    flag.or(configured)
        .unwrap_or(bgs_archive::package::DEFAULT_MAX_CHUNK_SIZE_GB)
}
