use crate::export::{IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::models::editor::Button;
use crate::models::point::Channel;
use crate::sampler::DEFAULT_STOP_COUNT;
use crate::table::Column;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub session: PathBuf,
    pub stop_count: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session: PathBuf::from("gradient.json"),
            stop_count: DEFAULT_STOP_COUNT,
            image_width: IMAGE_WIDTH,
            image_height: IMAGE_HEIGHT,
            verbose: false,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "gradcurve",
    version,
    about = "Design piecewise-linear RGB gradients over a 0-4095 signal axis"
)]
pub struct Cli {
    /// JSON file holding the curve between invocations
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Number of stops kept when serializing the gradient (2 to 1000)
    #[arg(
        long,
        global = true,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(2..=1000)
    )]
    pub stops: Option<usize>,

    /// Log model edits (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PointerButton {
    Left,
    Right,
}

impl From<PointerButton> for Button {
    fn from(b: PointerButton) -> Self {
        match b {
            PointerButton::Left => Button::Left,
            PointerButton::Right => Button::Right,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Restore the default two-point curve
    Reset,
    /// Print the point table and a colour bar
    Show,
    /// Add a point at the same signal in all channels
    Insert {
        #[arg(allow_negative_numbers = true)]
        signal: i32,
        #[arg(allow_negative_numbers = true)]
        level: i32,
    },
    /// Remove point INDEX from one channel
    Remove {
        #[arg(value_enum)]
        channel: Channel,
        index: usize,
    },
    /// Set the level of the point closest to (SIGNAL, LEVEL)
    Move {
        #[arg(value_enum)]
        channel: Channel,
        #[arg(allow_negative_numbers = true)]
        signal: i32,
        #[arg(allow_negative_numbers = true)]
        level: i32,
        #[arg(allow_negative_numbers = true)]
        new_level: i32,
    },
    /// Replay a pointer gesture: press at (SIGNAL, LEVEL), drag to each --to level, release
    Drag {
        #[arg(value_enum)]
        channel: Channel,
        #[arg(long, value_enum, default_value = "left")]
        button: PointerButton,
        #[arg(allow_negative_numbers = true)]
        signal: i32,
        #[arg(allow_negative_numbers = true)]
        level: i32,
        #[arg(long = "to", allow_negative_numbers = true)]
        to: Vec<i32>,
    },
    /// Type TEXT into a cell of the point table
    Edit {
        row: usize,
        #[arg(value_enum)]
        column: Column,
        text: String,
    },
    /// Print colour and luminance at the given signals
    Sample {
        #[arg(required = true)]
        signals: Vec<u16>,
    },
    /// Print the reduced gradient-stop string
    Gradient {
        /// Wrap the stops in a qlineargradient fill
        #[arg(long)]
        fill: bool,
    },
    /// Write the ThemeNamed* array literals
    ExportPoints {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the gradient to a PNG
    ExportPng {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Write the point table as CSV
    ExportCsv {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        let defaults = Config::default();
        let (image_width, image_height) = match cli.command {
            Command::ExportPng { width, height, .. } => (
                width.unwrap_or(defaults.image_width),
                height.unwrap_or(defaults.image_height),
            ),
            _ => (defaults.image_width, defaults.image_height),
        };
        Config {
            session: cli.session.clone().unwrap_or(defaults.session),
            stop_count: cli.stops.unwrap_or(defaults.stop_count),
            image_width,
            image_height,
            verbose: cli.verbose,
        }
    }
}
