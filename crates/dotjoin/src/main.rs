//! dotjoin: connect coloured dots on a black image with straight lines.
//!
//! Loads an image, finds every non-black pixel, draws a line between each
//! pair of them and saves the result next to the input (or to `--output`).
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin dotjoin -- [OPTIONS] [IMAGE_PATH]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dotjoin_pipeline::{Color, ConnectConfig, LineAlgorithm};

/// Connects coloured dots on a black image with lines.
#[derive(Parser)]
#[command(name = "dotjoin", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    #[arg(default_value = "data/three_dots.png")]
    image_path: PathBuf,

    /// Output image path. Defaults to `<stem>_connected_<algorithm>.<ext>`
    /// next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Line rasterization algorithm.
    #[arg(long, value_enum, default_value_t = Algorithm::Bresenham)]
    algorithm: Algorithm,

    /// Color of the connecting lines as three values: R G B.
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"], default_values_t = [255u8, 255, 255])]
    line_color: Vec<u8>,

    /// Also recolor the two dots at the ends of each diagonal line.
    #[arg(long)]
    inpaint_endpoints: bool,

    /// Full connect config as a JSON string.
    ///
    /// When provided, `--algorithm`, `--line-color` and
    /// `--inpaint-endpoints` are ignored. The JSON must be a valid
    /// `ConnectConfig` serialization; missing fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,

    /// Also write log output to this file (its directory is created).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug messages (coordinates found, every line drawn).
    #[arg(short, long)]
    verbose: bool,
}

/// Line algorithm selection.
#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Slope-based, one pixel per column (sparse for steep lines).
    Naive,
    /// Integer-only Bresenham (gap-free).
    Bresenham,
}

impl From<Algorithm> for LineAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Naive => Self::Naive,
            Algorithm::Bresenham => Self::Bresenham,
        }
    }
}

/// Build a [`ConnectConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ConnectConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    let color = match cli.line_color[..] {
        [r, g, b] => Color::new(r, g, b),
        _ => {
            return Err(format!(
                "--line-color takes exactly 3 values, got {}",
                cli.line_color.len()
            ));
        }
    };

    Ok(ConnectConfig {
        algorithm: cli.algorithm.into(),
        color,
        inpaint_endpoints: cli.inpaint_endpoints,
    })
}

/// Writes every log line to stderr and to a file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Install the global logger.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// with `--verbose`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - [{}]  {}",
            buf.timestamp(),
            record.target(),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    }

    builder.init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error opening log file: {e}");
        return ExitCode::FAILURE;
    }

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Starting program.");
    log::debug!("Config: {config:?}");

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| dotjoin_io::output_path(&cli.image_path, config.algorithm));

    match dotjoin_io::process(&cli.image_path, &output, &config) {
        Ok(_) => {
            log::info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

/// Render an error and all of its sources on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
