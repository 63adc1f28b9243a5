use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};
use tracing::{error, info, warn};

use crate::view::{
    CameraCommand, CameraDirector, DetailPayload, EngineConfig, HighlightSet, ViewParameters,
};
use crate::voice::{NodeKind, VoiceGraph, load_voice_graph};

mod camera;
mod graph;
mod physics;
mod render_utils;
mod ui;

use camera::ViewCamera;

type LoadResult = Result<VoiceGraph, String>;

pub struct VoiceGraphApp {
    data_path: PathBuf,
    engine: EngineConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: VoiceGraph,
    mediums: Vec<String>,
    engine: EngineConfig,
    params: ViewParameters,
    highlight: HighlightSet,
    detail: Option<DetailPayload>,
    search: String,
    suggestions: Vec<usize>,
    camera: ViewCamera,
    director: CameraDirector,
    queued_camera: Vec<CameraCommand>,
    awaiting_first_frame: bool,
    live_physics: bool,
    /// Canonical index of the node being dragged.
    dragged_node: Option<usize>,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    visible_node_count: usize,
    visible_link_count: usize,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    /// Simulation heat; reheated on rebuild, cools toward rest.
    alpha: f32,
    links: Vec<RenderLink>,
    index_by_node: HashMap<usize, usize>,
    physics_scratch: PhysicsScratch,
    view_scratch: ViewScratch,
}

struct PhysicsScratch {
    positions: Vec<Vec2>,
    forces: Vec<Vec2>,
    degrees: Vec<u32>,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    visible_indices: Vec<usize>,
}

struct RenderNode {
    node: usize,
    kind: NodeKind,
    world_pos: Vec2,
    velocity: Vec2,
    base_radius: f32,
    /// Held under the pointer; the layout does not move it.
    pinned: bool,
}

/// `source` and `target` index [`RenderGraph::nodes`]; `link` indexes the canonical graph.
struct RenderLink {
    link: usize,
    source: usize,
    target: usize,
}

impl VoiceGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, engine: EngineConfig) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            engine,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_voice_graph(&data_path).map_err(|error| {
                error!("failed to load voice graph: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }

    fn ready(graph: VoiceGraph, engine: EngineConfig) -> AppState {
        if graph.is_empty() {
            warn!("voice graph has no nodes");
        }
        info!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            "voice graph ready"
        );
        AppState::Ready(Box::new(ViewModel::new(graph, engine)))
    }
}

impl eframe::App for VoiceGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(graph)) => transition = Some(Self::ready(graph, self.engine)),
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading voice actor graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the voice actor graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(graph)) => transition = Some(Self::ready(graph, self.engine)),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
