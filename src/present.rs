//! On-screen presentation of a rendered chart (eframe/egui window).

use crate::config::ChartConfig;
use crate::viz::{self, ChartScene, PREVIEW_DPI, RgbImage};
use anyhow::{Result, anyhow};
use eframe::egui;
use std::path::Path;

/// Convert a raster to an egui image.
pub fn to_color_image(image: &RgbImage) -> egui::ColorImage {
    egui::ColorImage::from_rgb(
        [image.width as usize, image.height as usize],
        &image.pixels,
    )
}

/// Re-render `scene` at screen resolution and open it in a window. Blocks until closed.
pub fn show(scene: &ChartScene, chart: &ChartConfig, font: Option<&Path>) -> Result<()> {
    let image = viz::render_rgb(scene, chart, PREVIEW_DPI, font)?;
    show_image(&format!("Species Planted - {}", scene.title), &image)
}

/// Open a window showing `image`, scaled down to fit when the window is smaller.
pub fn show_image(title: &str, image: &RgbImage) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([image.width as f32 + 16.0, image.height as f32 + 16.0])
            .with_min_inner_size([400.0, 240.0])
            .with_title(title),
        ..Default::default()
    };
    let pending = to_color_image(image);
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(ChartViewer::new(pending)))),
    )
    .map_err(|e| anyhow!("chart viewer failed: {e}"))
}

/// Single-image viewer; the texture is uploaded on the first frame.
struct ChartViewer {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl ChartViewer {
    fn new(image: egui::ColorImage) -> Self {
        Self {
            pending: Some(image),
            texture: None,
        }
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR));
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.add(egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture)).shrink_to_fit());
            }
        });
    }
}
