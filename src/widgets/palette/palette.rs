//! Palette rendering - grouped template buttons in their kind colors.
//!
//! Clicking a template emits [`AddNodeEvent`]; the store decides the
//! spawn position, the palette never touches the graph directly.

use eframe::egui::{self, RichText, ScrollArea, Stroke, Ui};

use crate::core::event_bus::BoxedEvent;
use crate::entities::kinds::{NodeKind, PaletteGroup};
use crate::help::HelpEntry;

/// Per-editor palette copy.
#[derive(Clone, Debug)]
pub struct PaletteConfig {
    pub heading: &'static str,
    pub blurb: &'static str,
}

impl PaletteConfig {
    pub fn workflow() -> Self {
        Self {
            heading: "Components",
            blurb: "Build your AI system architecture. Submit it for consultation.",
        }
    }

    pub fn journey() -> Self {
        Self {
            heading: "Building Blocks",
            blurb: "Drag and drop cards to build your user journey. Click connecting dots to draw arrows.",
        }
    }
}

/// Request to add a node from a palette template.
#[derive(Clone, Debug)]
pub struct AddNodeEvent<K> {
    pub kind: K,
    pub label: String,
}

/// Render the palette sidebar. `tips` are the editor's gesture hints,
/// `global_tips` the shared hotkeys appended below them.
pub fn render<K: NodeKind>(
    ui: &mut Ui,
    config: &PaletteConfig,
    groups: &[PaletteGroup<K>],
    tips: &[HelpEntry],
    global_tips: &[HelpEntry],
    show_tips: bool,
    mut dispatch: impl FnMut(BoxedEvent),
) {
    ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(6.0);
        ui.heading(config.heading);
        ui.add_space(4.0);
        ui.label(RichText::new(config.blurb).weak());
        ui.add_space(8.0);

        if show_tips {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(RichText::new("Tips").strong());
                for tip in tips.iter().chain(global_tips) {
                    ui.label(
                        RichText::new(format!("• {}: {}", tip.key, tip.desc))
                            .weak()
                            .size(11.0),
                    );
                }
            });
            ui.add_space(8.0);
        }

        for group in groups {
            ui.add_space(6.0);
            ui.label(
                RichText::new(group.kind.title().to_uppercase())
                    .weak()
                    .size(11.0)
                    .strong(),
            );
            ui.add_space(4.0);

            for &label in group.options {
                let button = egui::Button::new(RichText::new(label).size(12.0))
                    .fill(group.kind.fill())
                    .stroke(Stroke::new(2.0, group.kind.stroke()))
                    .corner_radius(6.0)
                    .min_size(egui::vec2(ui.available_width(), 32.0))
                    .wrap();
                if ui.add(button).clicked() {
                    dispatch(Box::new(AddNodeEvent {
                        kind: group.kind,
                        label: label.to_string(),
                    }));
                }
                ui.add_space(4.0);
            }
        }
    });
}
