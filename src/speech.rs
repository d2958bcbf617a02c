//! Narration back end
//!
//! The cooking session talks to a `Narrator`: start an utterance, cancel
//! it, and poll for completion. At most one utterance is ever active;
//! starting a new one always halts the previous one first.
//!
//! `CommandNarrator` is the production implementation: it spawns the
//! platform speech command as a child process and treats child exit as
//! the completion signal.

use std::process::{Child, Command, Stdio};

pub trait Narrator {
    /// Begin speaking `text`, halting any utterance already in flight.
    fn speak(&mut self, text: &str);

    /// Halt the current utterance immediately. The unspoken remainder is
    /// discarded; there is no resume.
    fn cancel(&mut self);

    /// Poll the completion signal. Returns true once no utterance is
    /// speaking anymore.
    fn finished(&mut self) -> bool;
}

/// Speaks through an external command (`espeak`, `say`, ...), one child
/// process at a time.
pub struct CommandNarrator {
    command: String,
    child: Option<Child>,
}

impl CommandNarrator {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.unwrap_or_else(|| default_speech_command().to_string()),
            child: None,
        }
    }
}

fn default_speech_command() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "say"
    }
    #[cfg(not(target_os = "macos"))]
    {
        "espeak"
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, text: &str) {
        self.cancel();

        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };

        let spawned = Command::new(program)
            .args(parts)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.child = Some(child),
            Err(err) => {
                // Speech is best-effort: a missing command leaves the
                // session usable, the utterance just completes at once.
                eprintln!("speech command '{}' failed: {}", self.command, err);
                self.child = None;
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn finished(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(Some(_)) | Err(_) => {
                    self.child = None;
                    true
                }
                Ok(None) => false,
            },
            None => true,
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel();
    }
}
