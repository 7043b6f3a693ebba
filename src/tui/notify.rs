//! # Notifier
//!
//! Best-effort feedback outside the frame: terminal bell pulses and an
//! optional speech command. Nothing here may fail the caller; problems are
//! logged and dropped.

use std::io::{Write, stdout};
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::core::config::ResolvedConfig;

/// Haptic stand-in: one bell for a short pulse, two for a long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    Short,
    Long,
}

impl Pulse {
    pub fn bells(self) -> usize {
        match self {
            Pulse::Short => 1,
            Pulse::Long => 2,
        }
    }
}

pub struct Notifier {
    bell: bool,
    speech_command: Option<String>,
}

impl Notifier {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            bell: config.bell,
            speech_command: config.speech_command.clone(),
        }
    }

    pub fn pulse(&self, pulse: Pulse) {
        if !self.bell {
            return;
        }
        let mut out = stdout();
        let result = out
            .write_all("\x07".repeat(pulse.bells()).as_bytes())
            .and_then(|_| out.flush());
        if let Err(e) = result {
            warn!("Bell failed: {}", e);
        }
    }

    /// Speaks `text` on a background thread if a speech command is set.
    pub fn speak(&self, text: &str) {
        let Some(command) = self.speech_command.clone() else {
            return;
        };
        let text = text.to_string();
        std::thread::spawn(move || {
            debug!("Speaking via {}: {}", command, text);
            let status = Command::new(&command)
                .arg(&text)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(s) if s.success() => {}
                Ok(s) => warn!("Speech command {} exited with {}", command, s),
                Err(e) => warn!("Speech command {} failed: {}", command, e),
            }
        });
    }

    /// Rest is over: long pulse plus the spoken cue.
    pub fn rest_complete(&self, workout_finished: bool) {
        self.pulse(Pulse::Long);
        self.speak(if workout_finished {
            "Rest complete. Workout finished."
        } else {
            "Rest complete. Ready for the next set."
        });
    }
}
