//! CarillonHandle: the caller-side interface to the control loop.
//!
//! Owns the command/feedback channels; the components and their ticking
//! live on the loop thread.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender as CrossbeamSender;

use crate::backend::SignalBackend;
use crate::clock::Clock;
use crate::commands::{CarillonCmd, CarillonFeedback};
use crate::loop_thread::{LoopSetup, LoopThread};

pub struct CarillonHandle {
    cmd_tx: CrossbeamSender<CarillonCmd>,
    feedback_rx: Receiver<CarillonFeedback>,
    join_handle: Option<JoinHandle<()>>,
}

impl CarillonHandle {
    /// Spawn the control loop. Playback and blinking begin immediately.
    pub fn spawn(
        setup: LoopSetup,
        clock: Box<dyn Clock + Send>,
        backend: Box<dyn SignalBackend>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();

        let join_handle = thread::spawn(move || {
            LoopThread::new(setup, clock, backend, cmd_rx, feedback_tx).run();
        });

        Self {
            cmd_tx,
            feedback_rx,
            join_handle: Some(join_handle),
        }
    }

    pub fn send(&self, cmd: CarillonCmd) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!(target: "handle", "control loop is gone; dropped {:?}", cmd);
        }
    }

    /// Non-blocking drain of everything the loop has reported so far.
    pub fn drain_feedback(&self) -> Vec<CarillonFeedback> {
        let mut out = Vec::new();
        while let Ok(feedback) = self.feedback_rx.try_recv() {
            out.push(feedback);
        }
        out
    }

    /// Stop the loop and wait for it to exit.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(CarillonCmd::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}
