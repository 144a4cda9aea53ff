/*!
 * GUI application for species-planted - tree planting charts by species
 *
 * A cross-platform desktop application providing an intuitive interface for:
 * - Choosing a city preset and its planting spreadsheet
 * - Configuring output folder, format and resolution
 * - Rendering the annotated chart and previewing it
 *
 * Platform support: Windows, macOS, Linux
 */

use anyhow::Result;
use eframe::egui;
use species_planted::config::PRESETS;
use species_planted::viz::{self, PREVIEW_DPI};
use species_planted::{CityConfig, present, storage};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Species Planted"),
        ..Default::default()
    };

    eframe::run_native(
        "Species Planted",
        options,
        Box::new(|_cc| Ok(Box::new(PlantingApp::new()))),
    )
}

/// Main application state
struct PlantingApp {
    // Input fields
    city: String,
    input_path: String,

    // Export options
    output_dir: String,
    image_format: ImageFormat,
    dpi: u32,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,
    preview: Option<egui::TextureHandle>,

    // Background operation
    operation_receiver: Option<mpsc::Receiver<OperationResult>>,
}

#[derive(Debug, Clone, PartialEq)]
enum ImageFormat {
    Png,
    Svg,
}

enum OperationResult {
    Success {
        message: String,
        preview: egui::ColorImage,
    },
    Error(String),
}

impl PlantingApp {
    fn new() -> Self {
        // Default to user's home directory for output
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();
        let city = PRESETS[0].to_string();
        let input_path = default_input(&city);

        Self {
            city,
            input_path,
            output_dir: home_dir,
            image_format: ImageFormat::Png,
            dpi: 450,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            preview: None,
            operation_receiver: None,
        }
    }

    fn validate_inputs(&self) -> Result<()> {
        if self.input_path.trim().is_empty() {
            anyhow::bail!("Please choose the planting spreadsheet");
        }
        if self.output_dir.trim().is_empty() {
            anyhow::bail!("Please specify an output directory");
        }
        if !(50..=1200).contains(&self.dpi) {
            anyhow::bail!("Resolution must be between 50 and 1200 DPI");
        }
        Ok(())
    }

    fn start_operation(&mut self) {
        if let Err(err) = self.validate_inputs() {
            self.error_message = format!("Validation error: {}", err);
            return;
        }
        let Some(mut cfg) = CityConfig::preset(&self.city) else {
            self.error_message = format!("Unknown city preset {:?}", self.city);
            return;
        };

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = format!("Rendering {} chart...", cfg.name);

        let (sender, receiver) = mpsc::channel();
        self.operation_receiver = Some(receiver);

        // Clone the data we need for the background thread
        let extension = match self.image_format {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        };
        cfg.input = PathBuf::from(self.input_path.trim());
        cfg.chart.figure.dpi = self.dpi;
        cfg.chart.output = PathBuf::from(self.output_dir.trim())
            .join(format!("Species Planted - {}.{}", cfg.name, extension));

        // Spawn background thread for the operation
        thread::spawn(move || {
            let result = perform_operation(&cfg);
            let _ = sender.send(result);
        });
    }

    fn check_operation_result(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.operation_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.operation_receiver = None;

            match result {
                OperationResult::Success { message, preview } => {
                    self.preview =
                        Some(ctx.load_texture("preview", preview, egui::TextureOptions::LINEAR));
                    self.status_message = message;
                    self.error_message.clear();
                }
                OperationResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }
}

impl eframe::App for PlantingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background operations
        self.check_operation_result(ctx);

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Species Planted");
                ui.add_space(10.0);

                // Main input section
                ui.group(|ui| {
                    ui.label("Data Selection");
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui.label("City:");
                        let before = self.city.clone();
                        egui::ComboBox::from_id_salt("city")
                            .selected_text(&self.city)
                            .show_ui(ui, |ui| {
                                for name in PRESETS {
                                    ui.selectable_value(&mut self.city, name.to_string(), name);
                                }
                            });
                        if self.city != before {
                            self.input_path = default_input(&self.city);
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Spreadsheet:");
                        ui.text_edit_singleline(&mut self.input_path)
                            .on_hover_text("Planting sheet with a Year column and one column per species");
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new()
                                .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods", "csv"])
                                .pick_file()
                        {
                            self.input_path = path.to_string_lossy().to_string();
                        }
                    });
                });

                ui.add_space(10.0);

                // Export options section
                ui.group(|ui| {
                    ui.label("Export Options");
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui.label("Output folder:");
                        ui.text_edit_singleline(&mut self.output_dir);
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.output_dir = path.to_string_lossy().to_string();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Chart format:");
                        ui.radio_value(&mut self.image_format, ImageFormat::Png, "PNG");
                        ui.radio_value(&mut self.image_format, ImageFormat::Svg, "SVG");
                    });

                    ui.horizontal(|ui| {
                        ui.label("Resolution:");
                        ui.add(egui::DragValue::new(&mut self.dpi).range(50..=1200));
                        ui.label("DPI");
                    });
                });

                ui.add_space(15.0);

                // Action buttons
                ui.horizontal(|ui| {
                    if ui.add_enabled(!self.is_loading, egui::Button::new("Render Chart")).clicked() {
                        self.start_operation();
                    }

                    if self.is_loading {
                        ui.spinner();
                        ui.label("Processing...");
                    }
                });

                ui.add_space(10.0);

                // Status messages
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }

                if let Some(texture) = &self.preview {
                    ui.add_space(10.0);
                    ui.add(egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture)).shrink_to_fit());
                }
            });
        });
    }
}

fn default_input(city: &str) -> String {
    CityConfig::preset(city)
        .map(|c| c.input.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn perform_operation(cfg: &CityConfig) -> OperationResult {
    let table = match storage::load_table(&cfg.input) {
        Ok(table) => table,
        Err(err) => return OperationResult::Error(format!("Failed to load data: {}", err)),
    };

    let scene = match viz::prepare(&table, cfg) {
        Ok(scene) => scene,
        Err(err) => return OperationResult::Error(format!("Invalid chart setup: {}", err)),
    };

    if let Err(err) = viz::render_file(&scene, &cfg.chart, &cfg.chart.output, None) {
        return OperationResult::Error(format!("Failed to create chart: {:#}", err));
    }

    let preview = match viz::render_rgb(&scene, &cfg.chart, PREVIEW_DPI, None) {
        Ok(image) => present::to_color_image(&image),
        Err(err) => return OperationResult::Error(format!("Failed to render preview: {:#}", err)),
    };

    let message = format!(
        "Charted {} years of {} planting.\n\nFile created:\n{}",
        scene.table.len(),
        cfg.name,
        cfg.chart.output.display()
    );
    OperationResult::Success { message, preview }
}
