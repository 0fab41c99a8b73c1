mod app;
mod config;
mod data;
mod dataset;
mod gui;

use anyhow::anyhow;
use app::ChartSession;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, ValueEnum)]
enum GuiRendererChoice {
    Auto,
    Wgpu,
    Glow,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "NiftyChart: historical stock prices with precomputed prediction overlays"
)]
struct Args {
    /// GUI renderer backend (auto|wgpu|glow). Useful for RDP compatibility.
    #[arg(long, value_enum, default_value_t = GuiRendererChoice::Wgpu)]
    gui_renderer: GuiRendererChoice,

    /// Enable GUI safe mode for remote desktop (disables vsync/MSAA and hardware acceleration).
    #[arg(long)]
    gui_safe_mode: bool,
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("niftychart=info,wgpu_core=error,wgpu_hal=error"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config::WINDOW_WIDTH, config::WINDOW_HEIGHT])
            .with_title("Stock Prediction App"),
        ..Default::default()
    };
    options.renderer = match args.gui_renderer {
        GuiRendererChoice::Auto => eframe::Renderer::Wgpu,
        GuiRendererChoice::Wgpu => eframe::Renderer::Wgpu,
        GuiRendererChoice::Glow => eframe::Renderer::Glow,
    };

    if args.gui_safe_mode {
        options.vsync = false;
        options.multisampling = 0;
        options.depth_buffer = 0;
        options.stencil_buffer = 0;
        options.hardware_acceleration = eframe::HardwareAcceleration::Off;
    }

    info!(
        "Launching GUI with renderer: {:?}, safe_mode={}",
        args.gui_renderer, args.gui_safe_mode
    );

    eframe::run_native(
        "Stock Prediction App",
        options,
        Box::new(|_cc| Ok(Box::new(gui::GuiApp::new(ChartSession::new())))),
    )
    .map_err(|e| anyhow!("GUI exited with error: {e}"))
}
