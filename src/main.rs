mod app;
mod data;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Relation dataset to visualize (JSON).
    #[arg(long)]
    data: PathBuf,

    /// Entity id to center the graph on at startup.
    #[arg(long)]
    focus: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "stackgraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::StackGraphApp::new(
                cc,
                args.data.clone(),
                args.focus.clone(),
            )))
        }),
    )
}
