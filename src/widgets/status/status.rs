//! Bottom status bar - editor summary plus transient advisory messages.
//!
//! Advisories (guard messages like "add a node first") expire on their
//! own after a few seconds; nothing here is an error path.

use eframe::egui;

use crate::widgets::canvas::EditorId;

const MESSAGE_SECS: f64 = 4.0;

/// Snapshot of the active editor for the bar segments.
pub struct EditorStatus {
    pub editor: EditorId,
    pub nodes: usize,
    pub arrows: usize,
    /// Grid snapping state; None for the variant without a grid.
    pub snap: Option<bool>,
    /// Label of the pending connection source, if connect mode is armed.
    pub pending: Option<String>,
}

/// Status bar component
pub struct StatusBar {
    message: Option<(String, f64)>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Show a transient advisory message.
    pub fn set_message(&mut self, text: impl Into<String>, now: f64) {
        self.message = Some((text.into(), now + MESSAGE_SECS));
    }

    /// Drop the message once its deadline passed.
    pub fn update(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        if let Some((_, deadline)) = &self.message {
            if now > *deadline {
                self.message = None;
            } else {
                // Keep repainting so expiry does not wait for input
                ctx.request_repaint_after(std::time::Duration::from_millis(250));
            }
        }
    }

    /// Render status bar at bottom of screen
    pub fn render(&self, ctx: &egui::Context, status: &EditorStatus) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(status.editor.title());

                ui.separator();
                ui.monospace(format!("{} nodes", status.nodes));

                ui.separator();
                ui.monospace(format!("{} arrows", status.arrows));

                if let Some(snap) = status.snap {
                    ui.separator();
                    ui.monospace(if snap { "snap: 20px" } else { "snap: off" });
                }

                if let Some(pending) = &status.pending {
                    ui.separator();
                    ui.monospace(format!("connecting from \"{}\"…", truncated(pending)));
                }

                if let Some((message, _)) = &self.message {
                    ui.separator();
                    ui.monospace(message);
                }
            });
        });
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

fn truncated(s: &str) -> String {
    const MAX: usize = 28;
    if s.chars().count() <= MAX {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_short_passthrough() {
        assert_eq!(truncated("Server API"), "Server API");
    }

    #[test]
    fn test_truncated_long_label() {
        let long = "I feel like missing out on AI, but don't know where to start";
        let t = truncated(long);
        assert!(t.ends_with('…'));
        assert!(t.chars().count() <= 29);
    }
}
