#![deny(unsafe_code)]
//! CLI binary for the shadeview shader-preview runner.
//!
//! Renders a vertex/fragment shader pair onto a full-screen quad in a
//! fixed-size window, at one-eighth resolution upscaled with
//! nearest-neighbor sampling. Exits on Escape or window close.
//!
//! Usage: `shadeview <vertex> <fragment>`

mod error;
mod window;

use clap::Parser;
use error::CliError;
use shadeview_core::runner::Previewer;
use std::path::PathBuf;
use std::process;
use window::{PreviewWindow, WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Parser)]
#[command(
    name = "shadeview",
    about = "Real-time GLSL shader preview with pixelated upscaling"
)]
struct Cli {
    /// Vertex shader source path.
    vertex: PathBuf,

    /// Fragment shader source path.
    fragment: PathBuf,
}

fn run(cli: &Cli) -> Result<(), CliError> {
    log::info!("GLFW version: {}", glfw::get_version_string());

    let mut window = PreviewWindow::new(WINDOW_WIDTH, WINDOW_HEIGHT, "shadeview")?;
    let gl = window.load_gl();

    let mut previewer = Previewer::new(
        &gl,
        &cli.vertex,
        &cli.fragment,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    )?;

    let result = previewer.run(&gl, &mut window);

    // Release GPU objects before the window and context go away.
    previewer.destroy(&gl);
    result?;

    log::info!("clean shutdown");
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
