//! Speech recognition through an external command.
//!
//! The command records one utterance and prints its transcript on stdout.
//! It runs on a background thread; the result is reported over the channel
//! handed to [`Recognizer::start`].

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;

use super::{Recognizer, SpeechOutcome};

/// Placeholder replaced by the recognition language in command arguments.
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

/// Recognizer backed by an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecognizer {
    command: Vec<String>,
    language: String,
}

impl CommandRecognizer {
    /// Creates a recognizer for a program and its arguments.
    #[must_use]
    pub fn new(command: Vec<String>, language: String) -> Self {
        Self { command, language }
    }

    /// Program and arguments with the language substituted.
    #[must_use]
    pub fn resolved_command(&self) -> Vec<String> {
        self.command
            .iter()
            .map(|arg| arg.replace(LANGUAGE_PLACEHOLDER, &self.language))
            .collect()
    }

    /// Runs the command to completion and returns the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be run or exits unsuccessfully.
    pub fn listen_blocking(&self) -> Result<String> {
        let resolved = self.resolved_command();
        let (program, args) = resolved
            .split_first()
            .context("Speech command is empty")?;

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to execute '{program}'"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().last().unwrap_or("").trim();
            if reason.is_empty() {
                anyhow::bail!("'{program}' exited with {}", output.status);
            }
            anyhow::bail!("'{program}' failed: {reason}");
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim()
            .to_lowercase())
    }
}

impl Recognizer for CommandRecognizer {
    fn start(&self, outcomes: Sender<SpeechOutcome>) -> Result<()> {
        if self.command.is_empty() {
            anyhow::bail!("Speech command is empty");
        }

        let recognizer = self.clone();
        thread::Builder::new()
            .name("speech".to_string())
            .spawn(move || {
                let outcome = match recognizer.listen_blocking() {
                    Ok(transcript) => SpeechOutcome::Transcript(transcript),
                    Err(e) => SpeechOutcome::Error(format!("{e:#}")),
                };
                outcomes.send(outcome).ok();
                outcomes.send(SpeechOutcome::Ended).ok();
            })
            .context("Failed to spawn speech thread")?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.command.first().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    fn recognizer(command: &[&str]) -> CommandRecognizer {
        CommandRecognizer::new(
            command.iter().map(ToString::to_string).collect(),
            "en-GB".to_string(),
        )
    }

    #[test]
    fn test_resolved_command_substitutes_language() {
        let recognizer = recognizer(&["listen", "--lang={lang}", "{lang}"]);
        assert_eq!(
            recognizer.resolved_command(),
            vec!["listen", "--lang=en-GB", "en-GB"]
        );
    }

    #[test]
    fn test_empty_command_fails_to_start() {
        let (sender, _receiver) = channel();
        assert!(recognizer(&[]).start(sender).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_start_reports_transcript_then_end() {
        let (sender, receiver) = channel();
        recognizer(&["echo", "Supply  Beds"]).start(sender).unwrap();

        let first = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, SpeechOutcome::Transcript("supply  beds".to_string()));
        let second = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second, SpeechOutcome::Ended);
    }

    #[cfg(unix)]
    #[test]
    fn test_start_reports_failure() {
        let (sender, receiver) = channel();
        recognizer(&["false"]).start(sender).unwrap();

        let first = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, SpeechOutcome::Error(_)));
    }

    #[test]
    fn test_missing_program_reports_error() {
        let err = recognizer(&["definitely-not-a-speech-tool-xyz"])
            .listen_blocking()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to execute"));
    }
}
