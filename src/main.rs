mod app;
mod config;
mod error;
mod listing;
mod models;
mod session;
mod tool;
mod ui;
mod utils;

use app::ArchiveShell;
use config::{ICON_FILE_NAME, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use utils::resolve_resource_path;

use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    // Initialize logging with reasonable defaults
    tracing_subscriber::fmt::init();

    info!("Starting {}", WINDOW_TITLE);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_drag_and_drop(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        vsync: true,
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ArchiveShell::new(cc)))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let path = resolve_resource_path(ICON_FILE_NAME);
    let bytes = std::fs::read(&path).ok()?;
    match eframe::icon_data::from_png_bytes(&bytes) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!("Ignoring unreadable icon {:?}: {}", path, e);
            None
        }
    }
}
