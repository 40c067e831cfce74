//! Run Workflow result card - the canned demo response of the Journey
//! Builder. Not an interpreter; it surfaces the journey's trigger and
//! a fixed consultation pitch.

use eframe::egui::{self, RichText, Stroke};

use crate::entities::kinds::{JourneyKind, NodeKind};

/// The canned result produced when the journey runs.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub kind: JourneyKind,
    pub label: String,
    pub content: String,
}

/// Result card dialog. Stateless apart from the outcome it shows.
pub struct RunDialog {
    pub outcome: RunOutcome,
}

impl RunDialog {
    pub fn new(outcome: RunOutcome) -> Self {
        Self { outcome }
    }

    /// Returns false once the dialog was dismissed.
    pub fn render(&self, ctx: &egui::Context) -> bool {
        let mut stay_open = true;

        egui::Window::new("Workflow Started!")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_max_width(360.0);

                // Trigger chip in its kind colors
                egui::Frame::new()
                    .fill(self.outcome.kind.fill())
                    .stroke(Stroke::new(1.0, self.outcome.kind.stroke()))
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::symmetric(8, 4))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.outcome.label).size(12.0));
                    });

                ui.add_space(8.0);
                ui.label(RichText::new(&self.outcome.content).weak());
                ui.add_space(10.0);

                if ui.button("Close").clicked() {
                    stay_open = false;
                }
            });

        stay_open
    }
}
