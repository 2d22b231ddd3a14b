use std::{env, process::ExitCode, time::Instant};

use clx::{config::Config, format_error, source::SourceFile};
use tracing::info;

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!("usage: clx [PATH] [--error-mode <halt|skip>] [--recover]");
            return ExitCode::from(2);
        }
    };

    let source = match SourceFile::load(&config.path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut count = 0;
    let mut failed = false;

    for result in source.scanner().with_error_mode(config.error_mode) {
        match result {
            Ok(token) => {
                println!("{}", token);
                count += 1;
            }
            Err(error) => {
                eprintln!("{}", format_error(&error, source.text()));
                failed = true;
            }
        }
    }

    info!(tokens = count, elapsed = ?start.elapsed(), "tokenized {}", source.name());

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=clx=trace` to see every token as it is scanned.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
