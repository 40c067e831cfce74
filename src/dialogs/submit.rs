//! Submit Workflow dialog - contact form with a canned acknowledgement.
//!
//! Nothing is sent anywhere; the flow ends in a status-bar message.

use eframe::egui::{self, RichText};

/// What the dialog resolved to this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitAction {
    KeepOpen,
    Cancel,
    Submitted,
}

/// State of the submit form while the dialog is open.
#[derive(Default)]
pub struct SubmitDialog {
    pub email: String,
    pub message: String,
}

impl SubmitDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &egui::Context) -> SubmitAction {
        let mut action = SubmitAction::KeepOpen;

        egui::Window::new("Submit Your Workflow")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.label(RichText::new(
                    "Thank you for designing your workflow! To proceed, please send us \
                     your contact information along with a screenshot of your workflow.",
                ).weak());
                ui.add_space(10.0);

                ui.label("Email");
                ui.add(
                    egui::TextEdit::singleline(&mut self.email)
                        .hint_text("your@email.com")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);

                ui.label("Message (Optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut self.message)
                        .hint_text("Tell us about your project...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = SubmitAction::Cancel;
                    }
                    let can_submit = !self.email.trim().is_empty();
                    if ui
                        .add_enabled(can_submit, egui::Button::new("Submit"))
                        .clicked()
                    {
                        action = SubmitAction::Submitted;
                    }
                });
            });

        action
    }
}
