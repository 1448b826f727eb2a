use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    classify_mod_files, package_mod, plan_archives, ClassifyArgs, PackageArgs, PlanArgs,
};
use miette::{IntoDiagnostic, Result};

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort generated files into pack, loose and skip buckets
    Classify {
        /// The game's Data directory (or its installation directory)
        #[arg(short, long)]
        source: String,

        /// The directory containing the generated files
        #[arg(short = 'i', long)]
        generated: String,

        /// Copy files into <output-dir>/pack and <output-dir>/loose and write a report.
        /// Without it, files are only classified
        #[arg(short, long)]
        output_dir: Option<String>,

        /// The game: tes4, fo3, fnv, tes5, sse, fo4 or sf1
        #[arg(short, long)]
        game: Option<String>,

        /// Number of worker threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Preview how a pack directory would be split into archives
    Plan {
        /// The directory with the files to archive
        #[arg(short, long)]
        pack_dir: String,

        /// The mod name used for archive and plugin names
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        game: Option<String>,

        /// Maximum size of one archive in GB
        #[arg(long)]
        max_chunk_size_gb: Option<f64>,
    },
    /// Classify generated files and build a distributable package
    Package {
        #[arg(short, long)]
        source: String,

        #[arg(short = 'i', long)]
        generated: String,

        /// The mod name
        #[arg(short, long)]
        name: String,

        /// The directory to create the package in
        #[arg(short, long, default_value = "dist")]
        output_dir: String,

        #[arg(short, long)]
        game: Option<String>,

        /// Path to the BSArch executable
        #[arg(long)]
        archiver: Option<String>,

        /// Program used to run the archiver, e.g. wine
        #[arg(long)]
        launcher: Option<String>,

        /// Directory with plugin templates
        #[arg(long)]
        templates: Option<String>,

        /// Maximum size of one archive in GB
        #[arg(long)]
        max_chunk_size_gb: Option<f64>,

        #[arg(short, long)]
        threads: Option<usize>,

        /// Compress archive contents
        #[arg(long)]
        compress: bool,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set the path to the BSArch executable
    SetArchiver { path: String },
    /// Set the program used to run the archiver (e.g. wine)
    SetLauncher { launcher: String },
    /// Set the plugin template directory
    SetTemplates { dir: String },
    /// Set the default game
    SetGame { game: String },
    /// Reset the configuration to defaults
    Reset,
}

fn parse_args() -> Result<Args> {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).into_diagnostic()
}

fn main() -> Result<()> {
    let args = parse_args()?;
    utils::logging::init_logging(args.verbose);

    match args.command {
        Commands::Classify {
            source,
            generated,
            output_dir,
            game,
            threads,
            json,
        } => classify_mod_files(ClassifyArgs {
            source,
            generated,
            output_dir,
            game,
            threads,
            json,
        }),
        Commands::Plan {
            pack_dir,
            name,
            game,
            max_chunk_size_gb,
        } => plan_archives(PlanArgs {
            pack_dir,
            mod_name: name,
            game,
            max_chunk_size_gb,
        }),
        Commands::Package {
            source,
            generated,
            name,
            output_dir,
            game,
            archiver,
            launcher,
            templates,
            max_chunk_size_gb,
            threads,
            compress,
        } => package_mod(PackageArgs {
            source,
            generated,
            mod_name: name,
            output_dir,
            game,
            archiver,
            launcher,
            templates,
            max_chunk_size_gb,
            threads,
            compress_archives: compress,
        }),
        Commands::Config { action } => match action {
            ConfigCommands::Show => commands::show_config(),
            ConfigCommands::SetArchiver { path } => commands::set_archiver(path),
            ConfigCommands::SetLauncher { launcher } => commands::set_launcher(launcher),
            ConfigCommands::SetTemplates { dir } => commands::set_templates(dir),
            ConfigCommands::SetGame { game } => commands::set_game(game),
            ConfigCommands::Reset => commands::reset_config(),
        },
    }
}
