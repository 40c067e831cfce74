use flowpad::cli::Args;
use flowpad::config;
use flowpad::core::event_bus::{Event, EventBus};
use flowpad::dialogs::{render_settings_window, AppSettings, RunDialog, SubmitAction, SubmitDialog};
use flowpad::entities::graph::GraphState;
use flowpad::entities::kinds::{
    demo_journey, demo_workflow, BuilderKind, JourneyKind, GRID_UNIT, JOURNEY_PALETTE,
    WORKFLOW_PALETTE,
};
use flowpad::help;
use flowpad::main_events;
use flowpad::widgets::canvas::{
    self, CanvasConfig, CanvasState, ClearCanvasEvent, EditorId, RunJourneyEvent,
    SubmitWorkflowEvent,
};
use flowpad::widgets::palette::{self, PaletteConfig};
use flowpad::widgets::status::{EditorStatus, StatusBar};

use clap::Parser;
use eframe::egui;
use egui_dock::{DockArea, DockState, TabViewer};
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
enum DockTab {
    Workflow,
    Journey,
}

/// One editor tab: its graph store, canvas state and static config.
struct EditorPane<K> {
    graph: GraphState<K>,
    canvas: CanvasState,
    canvas_config: CanvasConfig,
    palette_config: PaletteConfig,
}

impl Default for EditorPane<BuilderKind> {
    fn default() -> Self {
        Self {
            graph: demo_workflow(),
            canvas: CanvasState::default(),
            canvas_config: CanvasConfig::workflow(),
            palette_config: PaletteConfig::workflow(),
        }
    }
}

impl Default for EditorPane<JourneyKind> {
    fn default() -> Self {
        Self {
            graph: demo_journey(),
            canvas: CanvasState::default(),
            canvas_config: CanvasConfig::journey(),
            palette_config: PaletteConfig::journey(),
        }
    }
}

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct FlowpadApp {
    #[serde(skip)]
    workflow: EditorPane<BuilderKind>,
    #[serde(skip)]
    journey: EditorPane<JourneyKind>,
    settings: AppSettings,
    #[serde(default = "FlowpadApp::default_dock_state")]
    dock_state: DockState<DockTab>,
    #[serde(skip)]
    event_bus: EventBus,
    #[serde(skip)]
    status_bar: StatusBar,
    #[serde(skip)]
    show_settings: bool,
    #[serde(skip)]
    submit_dialog: Option<SubmitDialog>,
    #[serde(skip)]
    run_dialog: Option<RunDialog>,
    /// Editor awaiting Clear Canvas confirmation.
    #[serde(skip)]
    pending_clear: Option<EditorId>,
}

impl Default for FlowpadApp {
    fn default() -> Self {
        Self {
            workflow: EditorPane::default(),
            journey: EditorPane::default(),
            settings: AppSettings::default(),
            dock_state: Self::default_dock_state(),
            event_bus: EventBus::new(),
            status_bar: StatusBar::new(),
            show_settings: false,
            submit_dialog: None,
            run_dialog: None,
            pending_clear: None,
        }
    }
}

impl FlowpadApp {
    fn default_dock_state() -> DockState<DockTab> {
        DockState::new(vec![DockTab::Workflow, DockTab::Journey])
    }

    fn active_tab(&mut self) -> DockTab {
        self.dock_state
            .find_active_focused()
            .map(|(_, tab)| tab.clone())
            .unwrap_or(DockTab::Workflow)
    }

    /// Drain the event bus and apply every handled event; deferred
    /// actions (dialogs, status messages) run after the loop.
    fn handle_events(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for event in self.event_bus.poll() {
            let Some(result) = main_events::handle_app_event(
                &event,
                &mut self.workflow.graph,
                &mut self.journey.graph,
                self.settings.confirm_clear,
            ) else {
                debug!("Unhandled event: {}", (*event).type_name());
                continue;
            };

            if let Some(message) = result.message {
                self.status_bar.set_message(message, now);
            }
            if result.open_submit {
                self.submit_dialog = Some(SubmitDialog::new());
            }
            if let Some(outcome) = result.run_result {
                self.run_dialog = Some(RunDialog::new(outcome));
            }
            if let Some(editor) = result.confirm_clear {
                self.pending_clear = Some(editor);
            }
        }
    }

    fn render_workflow_tab(&mut self, ui: &mut egui::Ui) {
        egui::SidePanel::left("workflow_palette")
            .resizable(false)
            .exact_width(230.0)
            .show_inside(ui, |ui| {
                palette::render(
                    ui,
                    &self.workflow.palette_config,
                    WORKFLOW_PALETTE,
                    help::WORKFLOW_HELP,
                    help::GLOBAL_HELP,
                    self.settings.show_tips,
                    |evt| self.event_bus.emit_boxed(evt),
                );
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(EditorId::Workflow.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Submit Workflow").clicked() {
                        self.event_bus.emit(SubmitWorkflowEvent);
                    }
                    if ui.button("Clear Canvas").clicked() {
                        self.event_bus.emit(ClearCanvasEvent {
                            editor: EditorId::Workflow,
                            confirmed: false,
                        });
                    }
                });
            });
            ui.separator();

            let actions = canvas::render(
                ui,
                EditorId::Workflow,
                &mut self.workflow.graph,
                &mut self.workflow.canvas,
                &self.workflow.canvas_config,
            );
            for evt in actions.events {
                self.event_bus.emit_boxed(evt);
            }
        });
    }

    fn render_journey_tab(&mut self, ui: &mut egui::Ui) {
        egui::SidePanel::left("journey_palette")
            .resizable(false)
            .exact_width(230.0)
            .show_inside(ui, |ui| {
                palette::render(
                    ui,
                    &self.journey.palette_config,
                    JOURNEY_PALETTE,
                    help::JOURNEY_HELP,
                    help::GLOBAL_HELP,
                    self.settings.show_tips,
                    |evt| self.event_bus.emit_boxed(evt),
                );
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(EditorId::Journey.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear Canvas").clicked() {
                        self.event_bus.emit(ClearCanvasEvent {
                            editor: EditorId::Journey,
                            confirmed: false,
                        });
                    }
                    if ui.button("Run Workflow").clicked() {
                        self.event_bus.emit(RunJourneyEvent);
                    }
                });
            });
            ui.separator();

            let actions = canvas::render(
                ui,
                EditorId::Journey,
                &mut self.journey.graph,
                &mut self.journey.canvas,
                &self.journey.canvas_config,
            );
            for evt in actions.events {
                self.event_bus.emit_boxed(evt);
            }
        });
    }

    fn editor_status(&mut self) -> EditorStatus {
        match self.active_tab() {
            DockTab::Workflow => {
                let graph = &self.workflow.graph;
                EditorStatus {
                    editor: EditorId::Workflow,
                    nodes: graph.nodes().len(),
                    arrows: graph.arrows().len(),
                    snap: Some(self.settings.snap_enabled),
                    pending: graph
                        .pending_connection()
                        .and_then(|id| graph.node(id))
                        .map(|n| n.label.clone()),
                }
            }
            DockTab::Journey => {
                let graph = &self.journey.graph;
                EditorStatus {
                    editor: EditorId::Journey,
                    nodes: graph.nodes().len(),
                    arrows: graph.arrows().len(),
                    snap: None,
                    pending: graph
                        .pending_connection()
                        .and_then(|id| graph.node(id))
                        .map(|n| n.label.clone()),
                }
            }
        }
    }

    /// Escape walks the dismissal chain before it quits; F1/F12 toggle
    /// tips and preferences. All suppressed while typing.
    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::F1)) {
            self.settings.show_tips = !self.settings.show_tips;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F12)) {
            self.show_settings = !self.show_settings;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.run_dialog.is_some() {
                self.run_dialog = None;
            } else if self.submit_dialog.is_some() {
                self.submit_dialog = None;
            } else if self.pending_clear.is_some() {
                self.pending_clear = None;
            } else if self.show_settings {
                self.show_settings = false;
            } else if self.workflow.graph.pending_connection().is_some()
                || self.journey.graph.pending_connection().is_some()
            {
                self.workflow.graph.cancel_connect();
                self.journey.graph.cancel_connect();
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if self.show_settings {
            render_settings_window(ctx, &mut self.show_settings, &mut self.settings);
        }

        let submit_action = self.submit_dialog.as_mut().map(|dialog| dialog.render(ctx));
        match submit_action {
            Some(SubmitAction::Cancel) => {
                self.submit_dialog = None;
            }
            Some(SubmitAction::Submitted) => {
                let now = ctx.input(|i| i.time);
                self.status_bar
                    .set_message("Workflow submitted! We'll be in touch soon.", now);
                self.submit_dialog = None;
            }
            Some(SubmitAction::KeepOpen) | None => {}
        }

        let run_stays_open = self.run_dialog.as_ref().map(|dialog| dialog.render(ctx));
        if run_stays_open == Some(false) {
            self.run_dialog = None;
        }

        if let Some(editor) = self.pending_clear {
            egui::Window::new("Clear Canvas?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(format!(
                        "Remove every node and arrow from the {}?",
                        editor.title()
                    ));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.pending_clear = None;
                        }
                        if ui.button("Clear").clicked() {
                            self.event_bus.emit(ClearCanvasEvent {
                                editor,
                                confirmed: true,
                            });
                            self.pending_clear = None;
                        }
                    });
                });
        }
    }
}

struct DockTabs<'a> {
    app: &'a mut FlowpadApp,
}

impl<'a> TabViewer for DockTabs<'a> {
    type Tab = DockTab;

    fn title(&mut self, tab: &mut DockTab) -> egui::WidgetText {
        match tab {
            DockTab::Workflow => "Workflow Builder".into(),
            DockTab::Journey => "Journey Builder".into(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut DockTab) {
        match tab {
            DockTab::Workflow => self.app.render_workflow_tab(ui),
            DockTab::Journey => self.app.render_journey_tab(ui),
        }
    }

    fn closeable(&mut self, _tab: &mut DockTab) -> bool {
        false
    }
}

impl eframe::App for FlowpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Apply font size from settings (headings keep a fixed offset)
        let mut style = (*ctx.style()).clone();
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = if *text_style == egui::TextStyle::Heading {
                self.settings.font_size + 5.0
            } else {
                self.settings.font_size
            };
        }
        ctx.set_style(style);

        // Snap toggle feeds straight into the workflow store
        self.workflow.graph.set_grid(if self.settings.snap_enabled {
            Some(GRID_UNIT)
        } else {
            None
        });

        // Process all events queued by widgets last frame
        self.handle_events(ctx);

        // Status bar (bottom panel)
        self.status_bar.update(ctx);
        if self.settings.show_status_bar {
            let status = self.editor_status();
            self.status_bar.render(ctx, &status);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let dock_style = egui_dock::Style::from_egui(ctx.style().as_ref());
            let mut dock_state =
                std::mem::replace(&mut self.dock_state, FlowpadApp::default_dock_state());
            {
                let mut tabs = DockTabs { app: self };
                DockArea::new(&mut dock_state)
                    .style(dock_style)
                    .show_inside(ui, &mut tabs);
            }
            self.dock_state = dock_state;
        });

        // Dispatch events emitted during this frame's rendering
        self.handle_events(ctx);

        self.render_dialogs(ctx);

        // Process keyboard input after panels updated focus state
        self.handle_keyboard_input(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Settings and dock layout persist; canvas contents never do
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!(
                "App state saved: dark={}, font={}, snap={}",
                self.settings.dark_mode, self.settings.font_size, self.settings.snap_enabled
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("flowpad.log", &path_config));

        let file = std::fs::File::create(&log_path)
            .map_err(|e| format!("Failed to create log file {}: {e}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Flowpad canvas editor starting...");
    debug!("Command-line args: {:?}", args);
    info!(
        "Config path: {}",
        config::config_file("flowpad.json", &path_config).display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Flowpad v{} • F1 for tips",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size(egui::vec2(1280.0, 720.0))
            .with_resizable(true)
            .with_maximized(args.fullscreen),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(config::config_file("flowpad.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Flowpad",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: FlowpadApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    FlowpadApp::default()
                });

            if args.empty {
                info!("Starting with empty canvases (--empty)");
                app.workflow.graph.clear();
                app.journey.graph.clear();
            }

            if args.journey {
                if let Some(tab) = app.dock_state.find_tab(&DockTab::Journey) {
                    app.dock_state.set_active_tab(tab);
                }
            }

            Ok(Box::new(app))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
