/// Pinhole Terminal Demo - Spinning Cube
///
/// Projects the vertices of a scene mesh through a pinhole camera and plots
/// them as terminal cells.
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - Q/ESC: Quit
use clap::Parser;
use log::info;
use pinhole_core::{RenderResult, SceneConfig};
use pinhole_terminal::{default_log_filter, run_headless, Scene, TerminalApp};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pinhole-terminal")]
#[command(about = "Point-projection renderer in the terminal")]
struct Cli {
    /// Scene file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render an STL mesh instead of the configured cube
    #[arg(long, value_name = "FILE")]
    stl: Option<PathBuf>,

    /// Override the camera view half-extent
    #[arg(long)]
    size: Option<f32>,

    /// Render this many frames off-screen and print statistics
    #[arg(long, value_name = "N")]
    frames: Option<usize>,
}

fn main() -> RenderResult<()> {
    let cli = Cli::parse();
    let filter = default_log_filter(cli.frames.is_none());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = match &cli.config {
        Some(path) => {
            info!("loading scene {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };
    if let Some(size) = cli.size {
        config.camera.size = size;
    }

    let scene = Scene::new(config, cli.stl.as_deref())?;

    if let Some(frames) = cli.frames {
        for (i, stats) in run_headless(&scene, 80, 40, frames)?.iter().enumerate() {
            println!(
                "frame {i}: {} drawn, {} clipped, {} faces skipped",
                stats.points_drawn, stats.points_clipped, stats.faces_skipped
            );
        }
        return Ok(());
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
