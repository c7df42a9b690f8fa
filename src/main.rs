use eframe::egui;
use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::Arc;

use orbit_browser::error::BrowseError;
use orbit_browser::model::NodePtr;
use orbit_browser::net::SearchClient;
use orbit_browser::panel::doc::{Block, Inline, LinkAction};
use orbit_browser::panel::{build_panel, Panel};
use orbit_browser::render::paint::paint_scene;
use orbit_browser::render::responsive_scale;
use orbit_browser::wire::{Envelope, StatusReport};

const DEFAULT_SERVER: &str = "http://localhost:8080";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let start_query = args.next();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Orbit Browser",
        options,
        Box::new(move |_cc| Ok(Box::new(OrbitApp::new(&base_url, start_query)))),
    )
    .expect("Failed to start Orbit Browser");
}

/// What a background request thread reports back.
type Completion = Result<Envelope, BrowseError>;

enum Request {
    Initial,
    Search(String),
    /// Deep-link query, passed through the query string like a shared
    /// result URL.
    SearchLink(String),
    OpenNode(NodePtr),
}

/// Interaction collected while rendering one frame of the document.
#[derive(Default)]
struct UiEvents {
    action: Option<LinkAction>,
    marks: Vec<(NodePtr, String)>,
}

struct OrbitApp {
    client: Option<Arc<SearchClient>>,
    query_input: String,
    panel: Option<Panel>,
    ambient: String,
    intent: String,
    error: Option<String>,
    /// Outstanding background requests; the spinner shows while nonzero.
    in_flight: usize,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    status: Option<StatusReport>,
    status_rx: Option<mpsc::Receiver<Result<StatusReport, BrowseError>>>,
    /// Nodes the user ticked as seen this session.
    seen: HashSet<NodePtr>,
    /// Query to run on startup instead of the default landing request.
    start_query: Option<String>,
    started: bool,
}

impl OrbitApp {
    fn new(base_url: &str, start_query: Option<String>) -> OrbitApp {
        // One long-lived completion channel shared by every request
        // thread. Completions are applied in arrival order, so when
        // requests overlap the last one to finish owns the view.
        let (tx, rx) = mpsc::channel();

        let (client, error) = match SearchClient::new(base_url) {
            Ok(client) => (Some(Arc::new(client)), None),
            Err(e) => (None, Some(e.to_string())),
        };

        OrbitApp {
            client,
            query_input: String::new(),
            panel: None,
            ambient: String::new(),
            intent: String::new(),
            error,
            in_flight: 0,
            tx,
            rx,
            status: None,
            status_rx: None,
            seen: HashSet::new(),
            start_query,
            started: false,
        }
    }

    fn issue(&mut self, request: Request, ctx: &egui::Context) {
        let client = match &self.client {
            Some(client) => Arc::clone(client),
            None => return,
        };
        self.in_flight += 1;

        let tx = self.tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = match request {
                Request::Initial => client.initial(),
                Request::Search(query) => client.search(&query),
                Request::SearchLink(query) => client.search_link(&query),
                Request::OpenNode(nptr) => client.open_node(nptr),
            };
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn fetch_status(&mut self, ctx: &egui::Context) {
        let client = match &self.client {
            Some(client) => Arc::clone(client),
            None => return,
        };
        let (tx, rx) = mpsc::channel();
        self.status_rx = Some(rx);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(client.status());
            ctx.request_repaint();
        });
    }

    /// Fire-and-forget progress acknowledgement; failures only warn.
    fn mark_seen(&self, nptr: NodePtr, chapcontext: String) {
        if let Some(client) = &self.client {
            let client = Arc::clone(client);
            std::thread::spawn(move || {
                if let Err(e) = client.mark_seen(nptr, &chapcontext) {
                    log::warn!("progress mark for {} failed: {}", nptr, e);
                }
            });
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Ok(envelope) => {
                self.ambient = envelope.ambient_text().unwrap_or("").to_string();
                self.intent = envelope.intent_text().unwrap_or("").to_string();
                match build_panel(&envelope) {
                    Ok(panel) => {
                        self.panel = Some(panel);
                        self.error = None;
                    }
                    Err(e) => {
                        log::error!("panel build failed: {}", e);
                        self.error = Some(e.to_string());
                    }
                }
            }
            Err(e) => {
                log::error!("request failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn check_completions(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            // Every request completes here; the busy marker never sticks.
            self.in_flight = self.in_flight.saturating_sub(1);
            self.apply(completion);
        }

        if let Some(rx) = &self.status_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(report) => self.status = Some(report),
                    Err(e) => log::warn!("status probe failed: {}", e),
                }
                self.status_rx = None;
            }
        }
    }

    fn act(&mut self, action: LinkAction, ctx: &egui::Context) {
        match action {
            LinkAction::Node(nptr) => {
                self.query_input = nptr.to_string();
                self.issue(Request::OpenNode(nptr), ctx);
            }
            LinkAction::Search(query) => {
                self.query_input = query.clone();
                self.issue(Request::Search(query), ctx);
            }
        }
    }

    fn draw_search_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let response = ui.add_sized(
                [ui.available_width() - 200.0, 24.0],
                egui::TextEdit::singleline(&mut self.query_input)
                    .hint_text("Search the graph...")
                    .font(egui::TextStyle::Monospace),
            );

            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (submitted || ui.button("Go").clicked()) && !self.query_input.is_empty() {
                let query = self.query_input.clone();
                self.issue(Request::Search(query), ctx);
            }

            if self.in_flight > 0 {
                ui.spinner();
            }

            if let Some(status) = &self.status {
                status_dot(ui, "server", &status.server_status);
                status_dot(ui, "database", &status.database_status);
            }
        });
    }

    fn draw_header(&self, ui: &mut egui::Ui) {
        if let Some(panel) = &self.panel {
            ui.heading(&panel.title);
        } else {
            ui.heading("Orbit graph browser");
        }
        if !self.ambient.is_empty() {
            ui.label(egui::RichText::new(&self.ambient).weak());
        }
        if !self.intent.is_empty() {
            ui.label(egui::RichText::new(&self.intent).weak().italics());
        }
    }

    fn draw_canvas(&self, ui: &mut egui::Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        if let Some(panel) = &self.panel {
            paint_scene(
                &ui.painter_at(rect),
                rect,
                &panel.scene,
                responsive_scale(rect.width()),
            );
        }
    }

    fn draw_document(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::RED, format!("An error occurred: {}", error));
            return;
        }

        let panel = match &self.panel {
            Some(panel) => panel,
            None => {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.heading("Orbit Browser");
                        ui.label("Type a query and press Enter");
                    });
                });
                return;
            }
        };

        let mut events = UiEvents::default();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for block in &panel.document.blocks {
                render_block(ui, block, &mut events, &mut self.seen);
            }
        });

        for (nptr, chapcontext) in events.marks {
            self.mark_seen(nptr, chapcontext);
        }
        if let Some(action) = events.action {
            self.act(action, ctx);
        }
    }
}

impl eframe::App for OrbitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_completions();

        if !self.started {
            self.started = true;
            self.fetch_status(ctx);
            match self.start_query.take() {
                Some(query) => {
                    self.query_input = query.clone();
                    self.issue(Request::SearchLink(query), ctx);
                }
                None => self.issue(Request::Initial, ctx),
            }
        }

        egui::TopBottomPanel::top("search").show(ctx, |ui| {
            self.draw_search_bar(ui, ctx);
        });

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.draw_header(ui);
        });

        egui::SidePanel::right("canvas")
            .default_width(560.0)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_document(ui, &ctx_clone);
        });
    }
}

fn status_dot(ui: &mut egui::Ui, name: &str, state: &str) {
    let (color, label) = if state == "OK" {
        (egui::Color32::from_rgb(0, 180, 0), format!("{} OK", name))
    } else {
        (egui::Color32::from_rgb(255, 80, 80), format!("{} down", name))
    };
    ui.colored_label(color, egui::RichText::new(format!("\u{25CF} {}", label)).small());
}

fn render_block(
    ui: &mut egui::Ui,
    block: &Block,
    events: &mut UiEvents,
    seen: &mut HashSet<NodePtr>,
) {
    match block {
        Block::Heading { level, text, action } => {
            let size = match level {
                2 => 22.0,
                _ => 18.0,
            };
            let rich = egui::RichText::new(text).size(size).strong();
            match action {
                Some(action) => {
                    if ui.link(rich).clicked() {
                        events.action = Some(action.clone());
                    }
                }
                None => {
                    ui.heading(rich);
                }
            }
            ui.add_space(6.0);
        }
        Block::Line(inlines) => {
            ui.horizontal_wrapped(|ui| {
                for inline in inlines {
                    render_inline(ui, inline, events, seen);
                }
            });
        }
        Block::Card(inlines) => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical(|ui| {
                    // Paragraph breaks split the card into wrapped rows.
                    for row in inlines.split(|i| matches!(i, Inline::Break)) {
                        if row.is_empty() {
                            continue;
                        }
                        ui.horizontal_wrapped(|ui| {
                            for inline in row {
                                render_inline(ui, inline, events, seen);
                            }
                        });
                    }
                });
            });
            ui.add_space(4.0);
        }
        Block::List { title, items } => {
            ui.label(egui::RichText::new(title).strong());
            for (n, item) in items.iter().enumerate() {
                ui.label(format!("{}. {}", n + 1, item));
            }
            ui.add_space(4.0);
        }
        Block::Placeholder(text) => {
            ui.label(egui::RichText::new(text).weak());
        }
    }
}

fn render_inline(
    ui: &mut egui::Ui,
    inline: &Inline,
    events: &mut UiEvents,
    seen: &mut HashSet<NodePtr>,
) {
    match inline {
        Inline::Text(text) => {
            ui.label(text);
        }
        Inline::Italic(text) => {
            ui.label(egui::RichText::new(text).italics());
        }
        Inline::Small(text) => {
            ui.label(egui::RichText::new(text).small().weak());
        }
        Inline::Pre { text, action } => {
            if ui.link(egui::RichText::new(text).monospace()).clicked() {
                events.action = Some(action.clone());
            }
        }
        Inline::NodeText { text, action, scale } => {
            let rich = egui::RichText::new(text).size(14.0 * scale);
            if ui.link(rich).clicked() {
                events.action = Some(action.clone());
            }
        }
        Inline::ArrowLabel { label, kind } => {
            ui.label(egui::RichText::new(label).weak())
                .on_hover_text(kind.title());
        }
        Inline::SatellitePrefix(prefix) => {
            ui.label(egui::RichText::new(prefix).monospace().weak());
        }
        Inline::Link { label, action } => {
            if ui.link(label).clicked() {
                events.action = Some(action.clone());
            }
        }
        Inline::Url(url) => {
            ui.hyperlink_to(url, url);
        }
        Inline::Image(url) => {
            ui.hyperlink_to(format!("\u{1F5BC} {}", url), url);
        }
        Inline::Break => {}
        Inline::Ditto => {
            ui.label(egui::RichText::new(" . . . .  .   \" . . . . .   ").weak());
        }
        Inline::ContextHint(text) => {
            ui.label(egui::RichText::new(text).italics().weak());
        }
        Inline::ProgressMark { nptr, chapcontext } => {
            let mut checked = seen.contains(nptr);
            if ui.checkbox(&mut checked, "").changed() {
                if checked {
                    seen.insert(*nptr);
                    events.marks.push((*nptr, chapcontext.clone()));
                } else {
                    seen.remove(nptr);
                }
            }
        }
        Inline::HeatChip { label, action, fg, bg } => {
            let button = egui::Button::new(
                egui::RichText::new(label).small().color(*fg),
            )
            .fill(*bg);
            if ui.add(button).clicked() {
                events.action = Some(action.clone());
            }
        }
    }
}
