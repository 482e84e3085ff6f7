use std::io;

use anyhow::Context;
use tracing::error;

use lloyd_lab::{
    app,
    config::{Config, ConfigError},
    observability,
};

fn main() -> anyhow::Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<String>()
                    .map(String::as_str)
            })
            .unwrap_or("unknown panic payload");

        if let Some(location) = panic_info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                column = location.column(),
                message,
                "panic occurred"
            );
        } else {
            error!(message, "panic occurred without location information");
        }
    }));

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        // --help / --version and usage errors are printed by clap itself
        Err(ConfigError::Cli(error)) => error.exit(),
        Err(error) => return Err(error).context("failed to load configuration"),
    };
    observability::init(config.log_format).context("failed to initialize tracing")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(&config, stdin.lock(), stdout.lock())
}
