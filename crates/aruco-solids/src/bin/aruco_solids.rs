use aruco_solids::bitmap::list_dictionaries;
use aruco_solids::{generate_markers, CornerStyle, GenerateConfig, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::error::Error;
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(name = "aruco-solids")]
#[command(version, about = "Generate 3D-printable two-color ArUco markers as STL files")]
struct Cli {
    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Emit structured JSON log lines.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate marker STL files (the default when no subcommand is given).
    Generate(GenerateArgs),
    /// List built-in dictionaries.
    Dictionaries,
    /// Write a default JSON config to edit and pass to `generate --config`.
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Flags override values loaded from `--config`.
#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dictionary name, e.g. DICT_4X4_50 or 5x5_100.
    #[arg(short, long)]
    dictionary: Option<String>,

    #[arg(long)]
    first_id: Option<u32>,

    /// Number of consecutive ids starting at --first-id.
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Explicit comma-separated ids.
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["first_id", "count"])]
    ids: Option<Vec<u32>>,

    /// Marker side in mm, black border included.
    #[arg(long)]
    side_length: Option<f64>,

    #[arg(long)]
    total_thickness: Option<f64>,

    /// White rim around the marker in mm.
    #[arg(long)]
    margin: Option<f64>,

    #[arg(long)]
    black_thickness: Option<f64>,

    #[arg(long)]
    white_thickness: Option<f64>,

    #[arg(long)]
    border_bits: Option<usize>,

    #[arg(long, conflicts_with = "corner_segments")]
    square_corners: bool,

    /// Chords per rounded plate corner.
    #[arg(long)]
    corner_segments: Option<usize>,

    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write ASCII instead of binary STL.
    #[arg(long)]
    ascii: bool,

    /// Also write one STL per color part.
    #[arg(long)]
    split_parts: bool,
}

impl GenerateArgs {
    fn into_config(self) -> Result<GenerateConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => GenerateConfig::load_json(path)?,
            None => GenerateConfig::default(),
        };

        if let Some(d) = self.dictionary {
            cfg.dictionary = d;
        }
        if let Some(ids) = self.ids {
            cfg.ids = Some(ids);
        }
        if self.first_id.is_some() || self.count.is_some() {
            cfg.ids = None;
        }
        if let Some(v) = self.first_id {
            cfg.first_id = v;
        }
        if let Some(v) = self.count {
            cfg.count = v;
        }

        let g = &mut cfg.geometry;
        if let Some(v) = self.side_length {
            g.side_length = v;
        }
        if let Some(v) = self.total_thickness {
            g.total_thickness = v;
        }
        if let Some(v) = self.margin {
            g.margin = v;
        }
        if let Some(v) = self.black_thickness {
            g.black_cell_thickness = v;
        }
        if let Some(v) = self.white_thickness {
            g.white_cell_thickness = v;
        }
        if let Some(v) = self.border_bits {
            g.border_bits = v;
        }
        if self.square_corners {
            g.corner_style = CornerStyle::Square;
        } else if let Some(segments) = self.corner_segments {
            g.corner_style = CornerStyle::Rounded { segments };
        }

        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if self.ascii {
            cfg.format = OutputFormat::Ascii;
        }
        if self.split_parts {
            cfg.split_parts = true;
        }
        Ok(cfg)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command.unwrap_or(Command::Generate(GenerateArgs::default())) {
        Command::Generate(args) => run_generate(args),
        Command::Dictionaries => {
            println!("{:<24} {:>5} {:>6}", "name", "bits", "ids");
            for info in list_dictionaries() {
                println!(
                    "{:<24} {:>5} {:>6}",
                    info.name, info.marker_size, info.marker_count
                );
            }
            Ok(())
        }
        Command::InitConfig { path, force } => {
            if path.exists() && !force {
                return Err(format!("{} exists (pass --force to overwrite)", path.display()).into());
            }
            GenerateConfig::default().write_json(&path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let cfg = args.into_config()?;
    let markers = generate_markers(&cfg)?;
    let files: usize = markers.iter().map(|m| m.paths.len()).sum();
    println!(
        "wrote {} markers ({} files) to {}",
        markers.len(),
        files,
        cfg.output_dir.display()
    );
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init_with_filter(cli.log_level.into());
        aruco_solids::core::init_tracing(cli.log_json, cli.log_level.into());
        Ok(())
    }
    #[cfg(not(feature = "tracing"))]
    {
        aruco_solids::core::init_with_level(cli.log_level.into())?;
        Ok(())
    }
}
