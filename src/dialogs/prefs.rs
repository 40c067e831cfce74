//! Application settings and the preferences window.
//!
//! Settings persist through eframe storage (serde JSON); canvas
//! contents deliberately never do.

use eframe::egui;

/// Application settings
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    // UI
    pub dark_mode: bool,
    pub font_size: f32,
    pub show_tips: bool,
    pub show_status_bar: bool,

    // Canvas
    /// Grid snapping in the Workflow Builder.
    pub snap_enabled: bool,
    /// Ask before Clear Canvas wipes a graph.
    pub confirm_clear: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: 13.0,
            show_tips: true,
            show_status_bar: true,
            snap_enabled: true,
            confirm_clear: false,
        }
    }
}

/// Render the preferences window. Sets `open` to false when dismissed.
pub fn render_settings_window(ctx: &egui::Context, open: &mut bool, settings: &mut AppSettings) {
    let mut keep_open = *open;
    egui::Window::new("Preferences")
        .open(&mut keep_open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("UI");
            ui.add_space(4.0);
            ui.checkbox(&mut settings.dark_mode, "Dark mode");
            ui.horizontal(|ui| {
                ui.label("Font size:");
                ui.add(egui::Slider::new(&mut settings.font_size, 10.0..=20.0).fixed_decimals(0));
            });
            ui.checkbox(&mut settings.show_tips, "Show tips in the sidebar");
            ui.checkbox(&mut settings.show_status_bar, "Show status bar");

            ui.add_space(10.0);
            ui.heading("Canvas");
            ui.add_space(4.0);
            ui.checkbox(&mut settings.snap_enabled, "Snap workflow nodes to grid");
            ui.checkbox(&mut settings.confirm_clear, "Confirm before clearing a canvas");

            ui.add_space(10.0);
            if ui.button("Defaults").clicked() {
                *settings = AppSettings::default();
            }
        });
    *open = keep_open;
}
