use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use arboard::{Clipboard, ImageData};
use druid::widget::{Flex, Label};
use druid::{AppLauncher, Env, WidgetExt, WindowDesc};
use image::RgbaImage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use region_select::widget::{RegionSelectWidget, SelectionStatus};
use region_select::{SelectionController, SelectorConfig};

const CONFIG_ENV: &str = "REGION_SELECT_CONFIG";

// Clipboard helper
fn copy_image_to_clipboard(image: &RgbaImage) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    let image_data = ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: image.as_raw().into(),
    };
    clipboard.set_image(image_data)?;
    Ok(())
}

fn load_config() -> Result<SelectorConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(SelectorConfig::load(Path::new(&path))?),
        None => Ok(SelectorConfig::default()),
    }
}

fn pick_image() -> Result<PathBuf> {
    if let Some(arg) = std::env::args_os().nth(1) {
        return Ok(PathBuf::from(arg));
    }
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
        .pick_file()
        .ok_or_else(|| anyhow!("no image selected"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let path = pick_image()?;

    let mut controller = SelectionController::from_config(&config)?;
    controller.try_set_image_from_path(&path)?;
    controller.on_selection_changed(|region| {
        let Some(region) = region else { return };
        match copy_image_to_clipboard(&region.pixels) {
            Ok(()) => info!(width = region.width, height = region.height, "selection copied"),
            Err(err) => warn!(error = %err, "clipboard copy failed"),
        }
    });

    let (w, h) = controller.preferred_size().unwrap_or((400, 300));
    let selector = RegionSelectWidget::new(controller).with_highlight(config.highlight_color()?);
    let root = Flex::column()
        .with_child(selector)
        .with_child(
            Label::dynamic(|data: &SelectionStatus, _env: &Env| data.text.clone()).padding(4.0),
        );

    let window = WindowDesc::new(root)
        .title("Region select")
        .window_size((f64::from(w), f64::from(h) + 32.0));
    AppLauncher::with_window(window).launch(SelectionStatus::default())?;
    Ok(())
}
