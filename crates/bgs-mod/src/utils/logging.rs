use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "bgs_mod=info,bgs_classify=info,bgs_archive=info";
const VERBOSE_FILTER: &str = "bgs_mod=debug,bgs_classify=debug,bgs_archive=debug";

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
