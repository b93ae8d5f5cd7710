//! Deferred shutdown. Termination signals only leave a request in a channel;
//! the loop looks at it between cycles, so a sleep or transfer in progress
//! always runs to completion.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use simple_signal::Signal;
use std::cell::Cell;

pub const SIGNALS: [Signal; 3] = [Signal::Int, Signal::Quit, Signal::Term];

pub fn channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = bounded(1);
    (
        ShutdownHandle { tx },
        Shutdown {
            rx,
            requested: Cell::new(false),
        },
    )
}

#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        match self.tx.try_send(()) {
            // A request is already pending.
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => log::debug!("shutdown already observed"),
        }
    }
}

#[derive(Debug)]
pub struct Shutdown {
    rx: Receiver<()>,
    requested: Cell<bool>,
}

impl Shutdown {
    /// Routes SIGINT, SIGQUIT and SIGTERM into a shutdown request.
    pub fn install() -> Self {
        let (handle, shutdown) = channel();
        simple_signal::set_handler(&SIGNALS, move |signals| {
            log::info!("received {signals:?}, stopping after the current cycle");
            handle.request();
        });
        shutdown
    }

    /// Once true, stays true.
    pub fn is_requested(&self) -> bool {
        if !self.requested.get() && self.rx.try_recv().is_ok() {
            self.requested.set(true);
        }
        self.requested.get()
    }
}
