//! Periodic tick scheduling.
//!
//! Widgets are plain synchronous state machines. A [`Driver`] owns one widget
//! together with at most one [`RepeatingTask`] that calls `tick()` at the
//! widget's period. The task exists only while the widget is running:
//!
//! - a user action that starts the widget spawns it,
//! - a user action that stops or resets the widget cancels it,
//! - the task ends itself on the tick that completes the widget,
//! - dropping the driver (or the task handle) aborts it.
//!
//! Must be used from within a tokio runtime.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::events::Event;

/// A widget that advances by fixed-period ticks.
pub trait Tickable: Send + 'static {
    /// Time between two ticks.
    fn period(&self) -> Duration;

    /// Advance by one quantum. Returns an event when the tick changed state
    /// in a way observers care about (e.g. completion).
    fn tick(&mut self) -> Option<Event>;

    /// While this is true the driver keeps a tick task alive.
    fn is_running(&self) -> bool;
}

/// Handle to a spawned fixed-period task. Dropping it cancels the task.
#[derive(Debug)]
pub struct RepeatingTask {
    handle: JoinHandle<()>,
}

impl RepeatingTask {
    /// Call `f` every `period`, first after one full period, until it returns
    /// `ControlFlow::Break` or the handle is dropped. Late ticks are delayed
    /// rather than replayed in a burst.
    pub fn spawn<F>(period: Duration, mut f: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if f().is_break() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the task. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owns a widget and keeps its tick task in step with its running flag.
///
/// Events from user actions and from ticks are both forwarded to the
/// receiver returned by [`Driver::new`].
#[derive(Debug)]
pub struct Driver<W: Tickable> {
    widget: Arc<Mutex<W>>,
    task: Option<RepeatingTask>,
    events: mpsc::UnboundedSender<Event>,
}

impl<W: Tickable> Driver<W> {
    pub fn new(widget: W) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let mut driver = Self {
            widget: Arc::new(Mutex::new(widget)),
            task: None,
            events,
        };
        driver.sync_task(false);
        (driver, rx)
    }

    /// Run a user action against the widget, forward its event, then start or
    /// stop the tick task to match the widget's new running state.
    pub fn apply(&mut self, action: impl FnOnce(&mut W) -> Option<Event>) -> Option<Event> {
        let (was_running, event) = {
            let mut widget = lock(&self.widget);
            let was_running = widget.is_running();
            (was_running, action(&mut widget))
        };
        if let Some(ref event) = event {
            // A closed receiver only means nobody is listening.
            let _ = self.events.send(event.clone());
        }
        self.sync_task(was_running);
        event
    }

    /// Read the widget's current state.
    pub fn view<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&lock(&self.widget))
    }

    /// True while a tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// A stopped-to-running change always gets a fresh task: the previous
    /// one may have released the lock for the last time without being
    /// marked finished yet.
    fn sync_task(&mut self, was_running: bool) {
        let (running, period) = {
            let widget = lock(&self.widget);
            (widget.is_running(), widget.period())
        };
        if !running {
            // Dropping the handle aborts the task.
            self.task = None;
        } else if !was_running || !self.is_ticking() {
            tracing::trace!(?period, "spawning tick task");
            // Replacing the handle aborts any stale task.
            self.task = Some(self.spawn_ticker(period));
        }
    }

    fn spawn_ticker(&self, period: Duration) -> RepeatingTask {
        let widget = Arc::clone(&self.widget);
        let events = self.events.clone();
        RepeatingTask::spawn(period, move || {
            let mut widget = lock(&widget);
            if !widget.is_running() {
                return ControlFlow::Break(());
            }
            if let Some(event) = widget.tick() {
                let _ = events.send(event);
            }
            if widget.is_running() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
    }
}

fn lock<W>(widget: &Mutex<W>) -> MutexGuard<'_, W> {
    widget.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
