//! Debounced text input.
//!
//! Raw values go in through a [`DebounceInput`]; a [`Debounced`] yields a
//! value once no new input has arrived for the configured quiet period.
//! Every input restarts the timer, so only the last value of a burst settles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Create a connected input/output pair starting at `initial`.
pub fn debounce<T: Clone>(initial: T, quiet: Duration) -> (DebounceInput<T>, Debounced<T>) {
    let (tx, rx) = watch::channel(initial);
    (
        DebounceInput { tx: Arc::new(tx) },
        Debounced { rx, quiet },
    )
}

/// Write side. Cloning shares the same channel.
#[derive(Debug)]
pub struct DebounceInput<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for DebounceInput<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> DebounceInput<T> {
    /// Record a new raw value and restart the quiet period.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }
}

/// Read side.
#[derive(Debug)]
pub struct Debounced<T> {
    rx: watch::Receiver<T>,
    quiet: Duration,
}

impl<T: Clone> Debounced<T> {
    /// Wait for the next settled value.
    ///
    /// Returns `None` once every input handle is dropped with nothing pending.
    /// A value pending when the inputs go away settles immediately.
    pub async fn settled(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        loop {
            tokio::select! {
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.quiet) => break,
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }

    /// Most recent raw value, settled or not.
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}
