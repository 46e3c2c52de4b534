//! Background load-progress notifier.
//!
//! While the load pipeline blocks on `go list`, one worker thread keeps
//! redrawing "stage + spinner frame". Stage updates are fire-and-forget: the
//! worker only ever shows the latest one it has seen when a tick fires.

mod sink;

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub use sink::{ProgressSink, SpinnerSink};

/// Spinner frames cycled on every tick.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stage shown before the first update arrives.
pub const INITIAL_STAGE: &str = "init";

enum Signal {
    Stage(String),
    Done,
}

/// Handle to the running progress worker.
///
/// Dropping the handle stops the worker as well, so an early `?` return in
/// the pipeline never leaves the spinner running.
pub struct ProgressSignal {
    tx: Sender<Signal>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressSignal {
    /// Default redraw interval.
    pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

    /// Spawns the worker, rendering into `sink` every `tick`.
    pub fn start<S: ProgressSink>(sink: S, tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("showdeps-progress".to_string())
            .spawn(move || run_worker(sink, rx, tick));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("progress display unavailable: {err}");
                None
            }
        };

        Self { tx, handle }
    }

    /// Reports the current pipeline stage. Never blocks.
    pub fn set_stage(&self, stage: impl Into<String>) {
        let stage = stage.into();
        debug!(stage = %stage, "load stage");
        // A worker that already exited simply misses the update.
        let _ = self.tx.send(Signal::Stage(stage));
    }

    /// Signals completion and waits for the worker to clear its output.
    pub fn finish(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tx.send(Signal::Done);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("progress worker panicked");
            }
        }
    }
}

impl Drop for ProgressSignal {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker<S: ProgressSink>(mut sink: S, rx: Receiver<Signal>, tick: Duration) {
    let mut stage = INITIAL_STAGE.to_string();
    let mut frames = SPINNER_FRAMES.iter().cycle();
    let mut next_tick = Instant::now() + tick;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(Signal::Stage(latest)) => stage = latest,
            Ok(Signal::Done) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                let frame = frames.next().copied().unwrap_or_default();
                sink.render(&stage, frame);
                next_tick = Instant::now() + tick;
            }
        }
    }

    sink.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        renders: Arc<Mutex<Vec<(String, String)>>>,
        finished: Arc<AtomicBool>,
    }

    impl ProgressSink for RecordingSink {
        fn render(&mut self, stage: &str, frame: &str) {
            self.renders
                .lock()
                .unwrap()
                .push((stage.to_string(), frame.to_string()));
        }

        fn finish(&mut self) {
            self.finished.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_renders_latest_stage() {
        let sink = RecordingSink::default();
        let signal = ProgressSignal::start(sink.clone(), Duration::from_millis(5));

        signal.set_stage("go list");
        thread::sleep(Duration::from_millis(60));
        signal.set_stage("classifications");
        thread::sleep(Duration::from_millis(60));
        signal.finish();

        let renders = sink.renders.lock().unwrap();
        assert!(renders.iter().any(|(stage, _)| stage == "go list"));
        assert_eq!(renders.last().map(|(s, _)| s.as_str()), Some("classifications"));
        assert!(sink.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_frames_cycle() {
        let sink = RecordingSink::default();
        let signal = ProgressSignal::start(sink.clone(), Duration::from_millis(2));
        thread::sleep(Duration::from_millis(60));
        signal.finish();

        let renders = sink.renders.lock().unwrap();
        assert!(renders.len() >= 2);
        assert_eq!(renders[0].1, SPINNER_FRAMES[0]);
        assert_eq!(renders[1].1, SPINNER_FRAMES[1]);
    }

    #[test]
    fn test_finish_before_first_tick() {
        let sink = RecordingSink::default();
        let signal = ProgressSignal::start(sink.clone(), Duration::from_secs(60));
        signal.set_stage("fast");
        signal.finish();

        assert!(sink.renders.lock().unwrap().is_empty());
        assert!(sink.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_stops_worker() {
        let sink = RecordingSink::default();
        {
            let _signal = ProgressSignal::start(sink.clone(), Duration::from_millis(5));
        }
        assert!(sink.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_set_stage_never_blocks() {
        let sink = RecordingSink::default();
        let signal = ProgressSignal::start(sink.clone(), Duration::from_secs(60));
        for i in 0..10_000 {
            signal.set_stage(format!("stage {i}"));
        }
        signal.finish();
    }
}
