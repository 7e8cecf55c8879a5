//! Interactive terminal photo editor.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use photo_filters::filters::EdgeDetector;
use photo_filters::io::load_image;
use photo_filters::session::{FilePreview, LogPreview, Preview, Session};
use photo_filters::{Result, SessionConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Apply classic pixel filters to an image, one command at a time")]
struct Cli {
    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image to load before the first prompt
    #[arg(short, long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Extension appended to saved file names
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Edge detector: classic, better, classic-legacy, better-legacy
    #[arg(long, value_name = "NAME")]
    edge_detector: Option<EdgeDetector>,

    /// Write the current image here after every change
    #[arg(short, long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Seed for scatter
    #[arg(long)]
    seed: Option<u64>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(ext) = &self.extension {
            config.save_extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(detector) = self.edge_detector {
            config.edge_detector = detector;
        }
        if let Some(path) = &self.preview {
            config.preview_path = Some(path.clone());
        }
        if self.seed.is_some() {
            config.scatter_seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.session_config()?;

    let preview: Box<dyn Preview> = match &config.preview_path {
        Some(path) => Box::new(FilePreview::new(path)),
        None => Box::new(LogPreview),
    };

    let stdin = io::stdin();
    let mut session = Session::new(config, stdin.lock(), io::stdout(), preview);
    if let Some(path) = &cli.image {
        session = session.with_image(load_image(path)?);
    }
    session.run()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "photo editor stopped");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
