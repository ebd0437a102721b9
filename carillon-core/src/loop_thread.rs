//! The control loop: one logical thread polling every component.
//!
//! Nothing in here blocks on the components — the only wait is the
//! command-channel timeout that paces the ticks. Within an iteration the
//! update order is fixed: blinker first, then the switcher. The two
//! players inside the switcher share the tone channel; the switcher is
//! what serializes their access, so the loop needs no locking.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};

use carillon_types::{BlinkerConfig, Sequence, SwitchChannel, ToneChannel};

use crate::backend::SignalBackend;
use crate::blinker::PeriodicBlinker;
use crate::clock::Clock;
use crate::commands::{CarillonCmd, CarillonFeedback};
use crate::switcher::{SequenceSwitcher, SwitcherEvent};

/// Everything the loop needs to build its context. Construction order is
/// explicit in `LoopThread::new`: the blinker exists before the players.
pub struct LoopSetup {
    pub tone_channel: ToneChannel,
    pub switch_channel: SwitchChannel,
    pub blink: BlinkerConfig,
    pub tune_a: Arc<Sequence>,
    pub tune_b: Arc<Sequence>,
}

pub(crate) struct LoopThread {
    clock: Box<dyn Clock + Send>,
    backend: Box<dyn SignalBackend>,
    cmd_rx: Receiver<CarillonCmd>,
    feedback_tx: Sender<CarillonFeedback>,
    switch_channel: SwitchChannel,
    blinker: PeriodicBlinker,
    switcher: SequenceSwitcher,
    last_tick: Instant,
}

impl LoopThread {
    pub(crate) fn new(
        setup: LoopSetup,
        clock: Box<dyn Clock + Send>,
        backend: Box<dyn SignalBackend>,
        cmd_rx: Receiver<CarillonCmd>,
        feedback_tx: Sender<CarillonFeedback>,
    ) -> Self {
        let blinker = PeriodicBlinker::new(setup.switch_channel, setup.blink);
        let switcher = SequenceSwitcher::new(setup.tone_channel, setup.tune_a, setup.tune_b);

        Self {
            clock,
            backend,
            cmd_rx,
            feedback_tx,
            switch_channel: setup.switch_channel,
            blinker,
            switcher,
            last_tick: Instant::now(),
        }
    }

    pub(crate) fn run(mut self) {
        const TICK_INTERVAL: Duration = Duration::from_millis(1);

        // Program start is playback start.
        self.switcher.play(self.clock.as_ref(), self.backend.as_mut());

        'outer: loop {
            let remaining = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());
            match self.cmd_rx.recv_timeout(remaining) {
                Ok(cmd) => {
                    if self.handle_cmd(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            while let Ok(cmd) = self.cmd_rx.try_recv() {
                if self.handle_cmd(cmd) {
                    break 'outer;
                }
            }

            if self.last_tick.elapsed() >= TICK_INTERVAL {
                self.last_tick = Instant::now();
                self.tick();
            }
        }

        // Silence both outputs on the way out.
        self.switcher.pause(self.backend.as_mut());
        log::info!(target: "loop", "control loop stopped");
    }

    fn handle_cmd(&mut self, cmd: CarillonCmd) -> bool {
        match cmd {
            CarillonCmd::SetPlaying { playing: true } => {
                self.switcher.play(self.clock.as_ref(), self.backend.as_mut());
            }
            CarillonCmd::SetPlaying { playing: false } => {
                self.switcher.pause(self.backend.as_mut());
            }
            CarillonCmd::Rewind => {
                self.switcher.rewind(self.clock.as_ref(), self.backend.as_mut());
            }
            CarillonCmd::SetBlink { config } => {
                self.blinker = PeriodicBlinker::new(self.switch_channel, config);
            }
            CarillonCmd::Shutdown => return true,
        }
        false
    }

    fn tick(&mut self) {
        if let Some(level) = self.blinker.update(self.clock.as_ref(), self.backend.as_mut()) {
            let _ = self.feedback_tx.send(CarillonFeedback::Toggled { level });
        }

        for event in self.switcher.update(self.clock.as_ref(), self.backend.as_mut()) {
            let feedback = match event {
                SwitcherEvent::StepStarted {
                    slot,
                    index,
                    frequency,
                } => CarillonFeedback::StepStarted {
                    slot,
                    index,
                    frequency,
                },
                SwitcherEvent::TuneFinished { slot } => CarillonFeedback::TuneFinished { slot },
                SwitcherEvent::Switched { active } => CarillonFeedback::Switched { active },
            };
            let _ = self.feedback_tx.send(feedback);
        }
    }
}
