// src/render/signal.rs

//! Coalescing repaint signal.
//!
//! A capacity-one channel of `()`. Requests made while a repaint is already
//! pending are dropped, so any number of row updates between two redraws
//! collapse into one redraw.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Create a connected signal/waiter pair.
pub fn repaint_channel() -> (RepaintSignal, RepaintWaiter) {
    let (tx, rx) = mpsc::channel(1);
    (RepaintSignal { tx }, RepaintWaiter { rx })
}

/// Sending half. Cheap to clone, one per update task.
#[derive(Debug, Clone)]
pub struct RepaintSignal {
    tx: mpsc::Sender<()>,
}

impl RepaintSignal {
    /// Ask for a repaint without blocking.
    ///
    /// Returns `true` if this call queued a repaint, `false` if one was
    /// already pending (or the waiter is gone).
    pub fn request(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) | Err(TrySendError::Closed(())) => false,
        }
    }
}

/// Receiving half, owned by the render loop.
#[derive(Debug)]
pub struct RepaintWaiter {
    rx: mpsc::Receiver<()>,
}

impl RepaintWaiter {
    /// Wait for a pending repaint. `false` once every signal is dropped.
    pub async fn wait(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Consume a pending repaint if there is one.
    #[cfg(test)]
    pub(crate) fn try_take(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }
}
