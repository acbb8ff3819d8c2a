//! Voice input for the bomb order tool.
//!
//! Speech recognition is an optional capability. A [`Recognizer`] starts
//! listening and returns immediately; its outcomes arrive later over a
//! channel. [`VoiceSession`] tracks the `idle -> listening -> idle` cycle
//! and is polled from the UI event loop.

pub mod command;

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config::SpeechConfig;

pub use command::CommandRecognizer;

/// Something the recognizer reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Best transcript of the utterance
    Transcript(String),
    /// Recognition failed
    Error(String),
    /// Listening stopped without further results
    Ended,
}

/// A platform speech-recognition service.
pub trait Recognizer: Send + Sync {
    /// Starts listening for one utterance.
    ///
    /// Must return without blocking; outcomes are sent on `outcomes`.
    ///
    /// # Errors
    ///
    /// Returns an error if listening could not be started at all.
    fn start(&self, outcomes: Sender<SpeechOutcome>) -> Result<()>;

    /// Short human-readable description shown in the UI.
    fn describe(&self) -> String;
}

/// Whether a voice session is waiting for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListeningState {
    /// Not listening
    #[default]
    Idle,
    /// Waiting for the recognizer
    Listening,
}

/// Voice session state for one tool.
///
/// A second start while listening is rejected. The first outcome of any kind
/// returns the session to idle and drops the channel, so anything else the
/// recognizer sends for that utterance is discarded.
#[derive(Default)]
pub struct VoiceSession {
    state: ListeningState,
    receiver: Option<Receiver<SpeechOutcome>>,
    last_error: Option<String>,
}

impl VoiceSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ListeningState {
        self.state
    }

    /// Whether the session is waiting for the recognizer.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == ListeningState::Listening
    }

    /// Error reported by the last session, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts listening.
    ///
    /// # Errors
    ///
    /// Returns an error if a session is already listening or the recognizer
    /// fails to start. In both cases the state is unchanged or idle.
    pub fn start(&mut self, recognizer: &dyn Recognizer) -> Result<()> {
        if self.is_listening() {
            anyhow::bail!("Already listening");
        }

        let (sender, receiver) = channel();
        recognizer.start(sender)?;

        debug!("Listening with {}", recognizer.describe());
        self.receiver = Some(receiver);
        self.state = ListeningState::Listening;
        self.last_error = None;
        Ok(())
    }

    /// Checks for an outcome without blocking.
    ///
    /// Returns the transcript when one arrived.
    pub fn poll(&mut self) -> Option<String> {
        let receiver = self.receiver.as_ref()?;

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => SpeechOutcome::Ended,
        };

        self.finish();

        match outcome {
            SpeechOutcome::Transcript(text) => {
                debug!("Heard: {text}");
                Some(text)
            }
            SpeechOutcome::Error(message) => {
                warn!("Speech recognition error: {message}");
                self.last_error = Some(message);
                None
            }
            SpeechOutcome::Ended => None,
        }
    }

    fn finish(&mut self) {
        self.receiver = None;
        self.state = ListeningState::Idle;
    }
}

/// Builds the configured recognizer, if voice input is available.
///
/// Returns `None` when no command is configured or the program cannot be
/// found, in which case only manual selection is offered.
#[must_use]
pub fn detect(config: &SpeechConfig) -> Option<CommandRecognizer> {
    let program = config.command.first()?;

    if find_program(program).is_none() {
        debug!("Speech command '{program}' not found, voice input disabled");
        return None;
    }

    Some(CommandRecognizer::new(
        config.command.clone(),
        config.language.clone(),
    ))
}

/// Resolves a program name the way a shell would.
///
/// Names containing a path separator are checked directly, others are
/// searched on `PATH`.
#[must_use]
pub fn find_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .flat_map(|dir| {
            let candidate = dir.join(program);
            let windows = dir.join(format!("{program}.exe"));
            [candidate, windows]
        })
        .find(|candidate| candidate.is_file())
}

/// User agents of handheld devices on which voice input is never offered.
fn excluded_user_agent() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)iPhone|iPad|iPod").unwrap())
}

/// Whether voice input is unsupported for this user agent.
#[must_use]
pub fn is_excluded_user_agent(user_agent: &str) -> bool {
    excluded_user_agent().is_match(user_agent)
}
