//! Runs the engine's periodic tick on a tokio runtime.
//!
//! Commands arrive from the input hook thread, the tick runs on the runtime,
//! and both go through one mutex around the engine and the scene. The tick
//! task is started by the first command that activates a cycle and exits on
//! its own when the engine reports it is done.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::input::trigger::{InputEdge, TriggerCommand};
use crate::models::settings::EngineConfig;
use crate::scene::SceneHost;

use super::controller::{TickOutcome, ZoomEngine};

struct Session<S> {
    engine: ZoomEngine,
    scene: S,
    running: bool,
    /// Bumped per spawned loop so a stale loop never ticks.
    epoch: u64,
    closed: bool,
    task: Option<JoinHandle<()>>,
}

pub struct ZoomRuntime<S: SceneHost + 'static> {
    session: Arc<Mutex<Session<S>>>,
    handle: Handle,
}

impl<S: SceneHost + 'static> ZoomRuntime<S> {
    pub fn new(engine: ZoomEngine, scene: S, handle: Handle) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session {
                engine,
                scene,
                running: false,
                epoch: 0,
                closed: false,
                task: None,
            })),
            handle,
        }
    }

    pub fn handle_edge(&self, edge: &InputEdge) -> Option<TriggerCommand> {
        self.command(|engine| engine.handle_edge(edge))
    }

    pub fn trigger_down(&self) -> Option<TriggerCommand> {
        self.command(ZoomEngine::trigger_down)
    }

    pub fn trigger_up(&self) -> Option<TriggerCommand> {
        self.command(ZoomEngine::trigger_up)
    }

    pub fn configuration_changed(&self, config: EngineConfig) {
        let mut session = self.session.lock();
        session.engine.configuration_changed(config);
    }

    /// Stops ticking, restores the item if a cycle was in flight and ignores
    /// every later command.
    pub fn shutdown(&self) {
        let mut session = self.session.lock();
        if session.closed {
            return;
        }
        let Session { engine, scene, .. } = &mut *session;
        engine.shutdown(scene);
        session.closed = true;
        session.running = false;
        if let Some(task) = session.task.take() {
            task.abort();
        }
        log::info!("zoom runtime shut down");
    }

    pub fn is_ticking(&self) -> bool {
        self.session.lock().running
    }

    pub fn with_engine<R>(&self, f: impl FnOnce(&ZoomEngine) -> R) -> R {
        f(&self.session.lock().engine)
    }

    pub fn with_scene<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.session.lock().scene)
    }

    fn command(
        &self,
        apply: impl FnOnce(&mut ZoomEngine) -> Option<TriggerCommand>,
    ) -> Option<TriggerCommand> {
        let mut session = self.session.lock();
        if session.closed {
            return None;
        }
        let command = apply(&mut session.engine)?;
        if session.engine.is_active() && !session.running {
            self.start_loop(&mut session);
        }
        Some(command)
    }

    fn start_loop(&self, session: &mut Session<S>) {
        session.running = true;
        session.epoch += 1;
        let epoch = session.epoch;
        let period = session.engine.tick_period();
        log::debug!("starting tick loop #{epoch}");
        let task = self
            .handle
            .spawn(tick_loop(Arc::clone(&self.session), epoch, period));
        session.task = Some(task);
    }
}

impl<S: SceneHost + 'static> Drop for ZoomRuntime<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn tick_loop<S: SceneHost + 'static>(
    session: Arc<Mutex<Session<S>>>,
    epoch: u64,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut guard = session.lock();
        if !guard.running || guard.epoch != epoch {
            break;
        }
        let Session { engine, scene, .. } = &mut *guard;
        let outcome = engine.tick(scene);
        if !outcome.keeps_ticking() {
            guard.running = false;
            guard.task = None;
            match outcome {
                TickOutcome::TargetLost => log::warn!("tick loop #{epoch} stopped: target lost"),
                _ => log::debug!("tick loop #{epoch} stopped"),
            }
            break;
        }
    }
}
