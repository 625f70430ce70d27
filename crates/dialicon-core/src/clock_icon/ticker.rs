use std::time::Duration;

use chrono::{DateTime, Utc};
use dialicon_proto::config::ClockIconConfig;
use log::debug;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle, time::interval};

use super::HandIndices;

/// Events emitted by the clock ticker.
#[derive(Debug, Clone, Copy)]
pub enum ClockIconEvent {
    Tick(DateTime<Utc>),
}

/// Periodic tick source driving [`ClockIcon::update_angles`].
///
/// The ticker only emits events; applying the tick and deciding whether to
/// repaint stays with the owner of the [`ClockIcon`]. The spawned task stops
/// when the receiver is dropped or [`stop`](ClockTicker::stop) is called.
///
/// [`ClockIcon`]: super::ClockIcon
/// [`ClockIcon::update_angles`]: super::ClockIcon::update_angles
#[derive(Debug)]
pub struct ClockTicker {
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl ClockTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    /// Ticker for `config`, never ticking slower than its hands require.
    ///
    /// The configured interval is capped by [`interval_for_hands`] so a
    /// second hand keeps its 100ms granularity even under the default
    /// one-second interval.
    ///
    /// [`interval_for_hands`]: ClockTicker::interval_for_hands
    pub fn from_config(config: &ClockIconConfig) -> Self {
        let hands = HandIndices::from_config(config);

        Self::new(config.tick_interval.min(Self::interval_for_hands(&hands)))
    }

    /// Interval matching the finest granularity of the configured hands.
    pub fn interval_for_hands(hands: &HandIndices) -> Duration {
        if hands.has_second_hand() {
            // second-hand levels advance in 100ms steps
            Duration::from_millis(100)
        } else {
            Duration::from_secs(1)
        }
    }

    /// Start emitting ticks on `sender`, replacing any running task.
    pub fn start(&mut self, handle: &Handle, sender: mpsc::UnboundedSender<ClockIconEvent>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let tick_interval = self.interval;
        self.task = Some(handle.spawn(async move {
            let mut ticker = interval(tick_interval);

            loop {
                ticker.tick().await;

                if sender.send(ClockIconEvent::Tick(Utc::now())).is_err() {
                    debug!("clock tick receiver dropped, stopping ticker");
                    break;
                }
            }
        }));
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
