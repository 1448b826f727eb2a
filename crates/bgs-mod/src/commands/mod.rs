mod classify;
mod config;
mod package;
mod plan;

pub use classify::{classify_mod_files, ClassifyArgs};
pub use config::{reset_config, set_archiver, set_game, set_launcher, set_templates, show_config};
pub use package::{package_mod, PackageArgs};
pub use plan::{plan_archives, PlanArgs};
