use std::collections::VecDeque;

use tracing::debug;

use super::FitTimerPolicy;

pub const SETTLE_DELAY_SECS: f64 = 0.5;
pub const FIT_DURATION_MS: u32 = 1000;
pub const FIT_PADDING_PX: f32 = 100.0;
pub const FLY_DURATION_MS: u32 = 1000;
pub const CLICK_ZOOM: f32 = 2.0;
pub const SEARCH_ZOOM: f32 = 3.0;

/// Camera operations offered by whatever draws the graph.
pub trait CameraSurface {
    /// Current layout position of a rendered node, if the surface has one.
    fn node_position(&self, node: usize) -> Option<(f32, f32)>;
    fn center_at(&mut self, x: f32, y: f32, duration_ms: u32);
    fn zoom(&mut self, level: f32, duration_ms: u32);
    fn zoom_to_fit(&mut self, duration_ms: u32, padding_px: f32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOrigin {
    Click,
    Search,
}

impl SelectionOrigin {
    fn zoom(self) -> f32 {
        match self {
            Self::Click => CLICK_ZOOM,
            Self::Search => SEARCH_ZOOM,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// A freshly loaded graph, framed like any other change of the visible set.
    DataLoaded,
    FilterChanged,
    FocusChanged,
    NodeSelected {
        node: usize,
        origin: SelectionOrigin,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    FitAll {
        duration_ms: u32,
        padding_px: f32,
    },
    FlyTo {
        node: usize,
        zoom: f32,
        duration_ms: u32,
    },
}

impl CameraCommand {
    pub fn apply(&self, surface: &mut impl CameraSurface) {
        debug!(command = ?self, "camera command");
        match *self {
            Self::FitAll {
                duration_ms,
                padding_px,
            } => surface.zoom_to_fit(duration_ms, padding_px),
            Self::FlyTo {
                node,
                zoom,
                duration_ms,
            } => {
                if let Some((x, y)) = surface.node_position(node) {
                    surface.center_at(x, y, duration_ms);
                }
                surface.zoom(zoom, duration_ms);
            }
        }
    }
}

/// Turns view events into camera commands. Fits wait out the settle delay so
/// the layout has moved nodes into place first; `now` is seconds on any
/// monotonic clock.
#[derive(Clone, Debug)]
pub struct CameraDirector {
    policy: FitTimerPolicy,
    settle_delay_secs: f64,
    pending_fits: VecDeque<f64>,
}

impl CameraDirector {
    pub fn new(policy: FitTimerPolicy) -> Self {
        Self {
            policy,
            settle_delay_secs: SETTLE_DELAY_SECS,
            pending_fits: VecDeque::new(),
        }
    }

    pub fn on_event(&mut self, event: ViewEvent, now: f64) -> Option<CameraCommand> {
        match event {
            ViewEvent::DataLoaded | ViewEvent::FilterChanged | ViewEvent::FocusChanged => {
                if self.policy == FitTimerPolicy::Debounce {
                    self.pending_fits.clear();
                }
                self.pending_fits.push_back(now + self.settle_delay_secs);
                None
            }
            ViewEvent::NodeSelected { node, origin } => Some(CameraCommand::FlyTo {
                node,
                zoom: origin.zoom(),
                duration_ms: FLY_DURATION_MS,
            }),
        }
    }

    /// Fires at most one due fit per call.
    pub fn poll(&mut self, now: f64) -> Option<CameraCommand> {
        let deadline = *self.pending_fits.front()?;
        if now < deadline {
            return None;
        }

        self.pending_fits.pop_front();
        Some(CameraCommand::FitAll {
            duration_ms: FIT_DURATION_MS,
            padding_px: FIT_PADDING_PX,
        })
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending_fits.front().copied()
    }
}
