//! The zoom engine: owns the per-cycle state and runs one tick of
//! trigger → animation → mapping → follow → placement.

use std::time::Duration;

use crate::algorithm::animation::{AnimationState, Direction, Phase, TICK_PERIOD};
use crate::algorithm::follow::FollowTracker;
use crate::algorithm::mapping::map_cursor;
use crate::algorithm::placement::{compute_placement, PlacementInput};
use crate::capture::provider::CaptureProvider;
use crate::input::trigger::{InputEdge, TriggerCommand, TriggerMachine, TriggerState};
use crate::models::geometry::{CanvasSize, ContentPoint, ContentSize};
use crate::models::settings::EngineConfig;
use crate::models::transform::{Alignment, ItemTransform};
use crate::scene::{SceneHost, SceneItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Animating or holding zoom; keep ticking.
    Continue,
    /// Returned to rest and restored the item.
    Deactivated,
    /// The target item disappeared; all cycle state was dropped.
    TargetLost,
}

impl TickOutcome {
    pub fn keeps_ticking(self) -> bool {
        matches!(self, TickOutcome::Continue)
    }
}

pub struct ZoomEngine {
    config: EngineConfig,
    provider: Box<dyn CaptureProvider>,
    trigger: TriggerMachine,
    animation: AnimationState,
    follow: FollowTracker,
    original: Option<ItemTransform>,
    tick_period: Duration,
}

impl ZoomEngine {
    pub fn new(config: EngineConfig, provider: Box<dyn CaptureProvider>) -> Self {
        Self {
            trigger: TriggerMachine::new(config.trigger),
            config,
            provider,
            animation: AnimationState::default(),
            follow: FollowTracker::default(),
            original: None,
            tick_period: TICK_PERIOD,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn progress(&self) -> f64 {
        self.animation.progress()
    }

    pub fn direction(&self) -> Direction {
        self.animation.direction()
    }

    pub fn follow_position(&self) -> Option<ContentPoint> {
        self.follow.position()
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn has_snapshot(&self) -> bool {
        self.original.is_some()
    }

    /// True while a cycle is in flight and the tick loop must run.
    pub fn is_active(&self) -> bool {
        self.animation.direction() != Direction::Idle || self.animation.progress() > 0.0
    }

    /// Feeds a raw edge through the trigger machine and applies the result.
    pub fn handle_edge(&mut self, edge: &InputEdge) -> Option<TriggerCommand> {
        let command = self.trigger.on_edge(edge)?;
        log::debug!("trigger edge {:?} -> {:?}", edge, command);
        self.apply(command);
        Some(command)
    }

    /// An already matched activation edge.
    pub fn trigger_down(&mut self) -> Option<TriggerCommand> {
        let command = self.trigger.press()?;
        log::debug!("trigger down -> {command:?}");
        self.apply(command);
        Some(command)
    }

    /// An already matched release edge.
    pub fn trigger_up(&mut self) -> Option<TriggerCommand> {
        let command = self.trigger.release()?;
        log::debug!("trigger up -> {command:?}");
        self.apply(command);
        Some(command)
    }

    pub fn apply(&mut self, command: TriggerCommand) {
        match command {
            TriggerCommand::StartZoomIn => self.start_zoom_in(),
            TriggerCommand::StartZoomOut => self.start_zoom_out(),
        }
    }

    pub fn start_zoom_in(&mut self) {
        log::info!("zoom in from progress {:.3}", self.animation.progress());
        self.follow.reset();
        self.animation.set_direction(Direction::In);
    }

    pub fn start_zoom_out(&mut self) {
        log::info!("zoom out from progress {:.3}", self.animation.progress());
        self.animation.set_direction(Direction::Out);
    }

    /// Hot reload. Only per-tick constants change; progress, direction and
    /// the follow point are left alone.
    pub fn configuration_changed(&mut self, config: EngineConfig) {
        if config == self.config {
            return;
        }
        log::debug!("configuration changed: {config:?}");
        self.trigger.reconfigure(config.trigger);
        self.config = config;
    }

    pub fn tick(&mut self, scene: &mut dyn SceneHost) -> TickOutcome {
        let canvas = scene.canvas_size().unwrap_or_default();
        let Some(item) = scene.target() else {
            log::warn!("no target item; dropping zoom state");
            self.reset();
            return TickOutcome::TargetLost;
        };

        if self.original.is_none() {
            self.original = Some(item.transform());
            item.set_alignment(Alignment::TOP_LEFT);
        }

        if self.animation.advance(self.tick_period, self.config.timings) == Phase::Deactivated {
            if let Some(original) = self.original.take() {
                item.restore(&original);
            }
            self.reset();
            log::info!("zoom fully deactivated; original transform restored");
            return TickOutcome::Deactivated;
        }

        self.apply_zoom(item, canvas);
        TickOutcome::Continue
    }

    /// Restores the item if a cycle is in flight and clears all state.
    pub fn shutdown(&mut self, scene: &mut dyn SceneHost) {
        if let (Some(original), Some(item)) = (self.original.take(), scene.target()) {
            item.restore(&original);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.animation.reset();
        self.follow.reset();
        self.trigger.reset();
        self.original = None;
    }

    fn apply_zoom(&mut self, item: &mut dyn SceneItem, canvas: CanvasSize) {
        let Some(original) = self.original else {
            return;
        };

        let content = item.content_size();
        if content.is_empty() {
            item.set_position(original.position);
            return;
        }

        let mapped = self.map_cursor(item, content);
        let follow = self
            .follow
            .update(
                mapped,
                self.config.follow_mouse,
                self.config.follow_speed,
                self.tick_period,
            )
            .unwrap_or_else(|| content.center());

        let input = PlacementInput {
            progress: self.animation.progress(),
            zoom_factor: self.config.zoom_factor,
            cover: self.config.cover,
            original_scale: original.scale,
            content,
            crop: item.transform().crop,
            canvas,
            follow,
        };
        if let Some(placement) = compute_placement(&input) {
            item.apply_placement(&placement);
        }
    }

    fn map_cursor(&self, item: &dyn SceneItem, content: ContentSize) -> Option<ContentPoint> {
        let cursor = self.provider.cursor_position()?;
        let region = self.provider.resolve_region(item.capture_source());
        let mapped = map_cursor(cursor, region, content)?;
        if !mapped.inside {
            log::trace!("cursor outside capture region; pinned to edge");
        }
        Some(mapped.position)
    }
}
