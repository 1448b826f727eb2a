use camino::Utf8PathBuf;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Invalid mod name: {name}")]
    #[diagnostic(
        code(package::invalid_name),
        help("Mod names must be alphanumeric and may contain '-' and '_' but no spaces")
    )]
    InvalidModName {
        name: String,
        #[label("invalid mod name")]
        span: Option<SourceSpan>,
    },

    #[error("Unknown game: {value}")]
    #[diagnostic(
        code(game::unknown),
        help("Use one of: tes4, fo3, fnv, tes5, sse, fo4, sf1")
    )]
    UnknownGame { value: String },

    #[error("No game selected")]
    #[diagnostic(
        code(game::missing),
        help("Pass --game or run 'bgs-mod config set-game <game>'")
    )]
    GameNotSet,

    #[error("Directory not found: {path}")]
    #[diagnostic(
        code(fs::directory_missing),
        help("Make sure the directory exists and the path is correct")
    )]
    DirectoryNotFound { path: Utf8PathBuf },

    #[error("Archiver not configured")]
    #[diagnostic(
        code(config::archiver_missing),
        help("Pass --archiver or run 'bgs-mod config set-archiver <path-to-bsarch>'")
    )]
    ArchiverNotSet,

    #[error("Plugin template directory not configured")]
    #[diagnostic(
        code(config::templates_missing),
        help("Pass --templates or run 'bgs-mod config set-templates <dir>'")
    )]
    TemplatesNotSet,

    #[error("Invalid maximum chunk size: {value} GB")]
    #[diagnostic(
        code(config::invalid_chunk_size),
        help("The maximum chunk size must be a positive number of gigabytes")
    )]
    InvalidChunkSize { value: f64 },

    #[error("Classification failed")]
    #[diagnostic(code(classify::failed))]
    Classification {
        #[source]
        source: bgs_classify::Error,
    },

    #[error("Package '{mod_name}' is incomplete")]
    #[diagnostic(
        code(package::incomplete),
        help("See the messages above; partial output was kept in the .build directory")
    )]
    PackageIncomplete { mod_name: String },

    #[error("Failed to save config")]
    #[diagnostic(code(config::save_failed))]
    ConfigSave {
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn invalid_mod_name(name: String, span: Option<SourceSpan>) -> Self {
        Self::InvalidModName { name, span }
    }

    pub fn directory_not_found(path: Utf8PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }
}

impl From<bgs_classify::Error> for CliError {
    fn from(source: bgs_classify::Error) -> Self {
        Self::Classification { source }
    }
}
