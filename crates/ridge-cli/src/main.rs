//! Ridge CLI - Headless driver for the Ridge terrain streamer

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, explore, fragment, heightmap};

#[derive(Parser)]
#[command(name = "ridge")]
#[command(about = "Stream procedural terrain around a moving viewpoint", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a terrain config file (defaults to ./ridge.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the noise seed
    #[arg(long, global = true)]
    seed: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the viewpoint across the terrain and report streaming activity
    Explore {
        /// Number of movement steps
        #[arg(long, default_value = "20")]
        steps: u32,

        /// Movement along X per step
        #[arg(long, default_value = "25.0", allow_hyphen_values = true)]
        dx: f32,

        /// Movement along Z per step
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        dz: f32,

        /// Heading in degrees applied before moving
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        yaw: f32,
    },

    /// Generate one fragment and print its statistics
    Fragment {
        /// Fragment column
        #[arg(allow_hyphen_values = true)]
        x: i32,

        /// Fragment row
        #[arg(allow_hyphen_values = true)]
        y: i32,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export a fragment heightmap as a 16-bit grayscale PNG
    Heightmap {
        /// Fragment column
        #[arg(allow_hyphen_values = true)]
        x: i32,

        /// Fragment row
        #[arg(allow_hyphen_values = true)]
        y: i32,

        /// Output image path
        #[arg(short, long, default_value = "heightmap.png")]
        output: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let terrain_config = commands::load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Explore { steps, dx, dz, yaw } => explore::run(
            terrain_config,
            explore::ExploreArgs { steps, dx, dz, yaw },
        ),
        Commands::Fragment { x, y, format } => fragment::run(terrain_config, x, y, &format),
        Commands::Heightmap { x, y, output } => heightmap::run(terrain_config, x, y, &output),
        Commands::Config => config::run(&terrain_config),
    }
}
