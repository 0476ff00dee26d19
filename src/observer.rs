//! Structured observation of a scan.
//!
//! A [`ScanObserver`] is handed to the scanner and receives one [`ScanEvent`]
//! per state transition. [`TracingObserver`] forwards events to `tracing`;
//! a `Vec<ScanEvent>` records them, which is what the tests use.

/// A state transition of the window scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// A window was (re)opened with `begin` bootstrapped.
    WindowOpened { begin: usize, value: i64 },
    /// `key` joined the window on resource `slot`.
    Extended {
        key: usize,
        value: i64,
        slot: usize,
        augmented: bool,
    },
    /// No resource could be found for `key`; the current run ends at `key`.
    Blocked { begin: usize, key: usize, value: i64 },
    /// `key` is not consecutive with the window; scanning restarts there.
    GapRestart { key: usize, value: i64 },
    /// The best run length grew.
    NewBest { length: usize, begin: usize },
    /// The best run reached the theoretical ceiling.
    EarlyExit { length: usize, ceiling: usize },
    /// The scan is over.
    Finished { longest: usize },
}

/// Receiver of scanner events.
pub trait ScanObserver {
    fn record(&mut self, event: &ScanEvent);
}

impl<O: ScanObserver + ?Sized> ScanObserver for &mut O {
    fn record(&mut self, event: &ScanEvent) {
        (**self).record(event);
    }
}

impl ScanObserver for Vec<ScanEvent> {
    fn record(&mut self, event: &ScanEvent) {
        self.push(*event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    #[inline]
    fn record(&mut self, _event: &ScanEvent) {}
}

/// Emits events through `tracing`.
///
/// Per-key transitions go out at `trace`, window-level ones at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn record(&mut self, event: &ScanEvent) {
        match *event {
            ScanEvent::WindowOpened { begin, value } => {
                tracing::debug!(begin, value, "window opened");
            }
            ScanEvent::Extended {
                key,
                value,
                slot,
                augmented,
            } => {
                tracing::trace!(key, value, slot, augmented, "extended");
            }
            ScanEvent::Blocked { begin, key, value } => {
                tracing::debug!(begin, key, value, length = key - begin, "blocked");
            }
            ScanEvent::GapRestart { key, value } => {
                tracing::debug!(key, value, "gap, restarting");
            }
            ScanEvent::NewBest { length, begin } => {
                tracing::trace!(length, begin, "new best");
            }
            ScanEvent::EarlyExit { length, ceiling } => {
                tracing::debug!(length, ceiling, "ceiling reached");
            }
            ScanEvent::Finished { longest } => {
                tracing::debug!(longest, "scan finished");
            }
        }
    }
}
