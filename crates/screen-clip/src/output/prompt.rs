use screen_clip_core::FileNamePrompt;

use std::{
    io::{BufRead, IsTerminal, Write},
    time::Duration,
};

use async_trait::async_trait;
use tracing::{debug, warn};

/// How long an unanswered prompt holds up the widget before the default
/// name is taken.
pub(crate) const PROMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Asks for the file name on the controlling terminal.
///
/// Without a terminal (launched from a desktop session) the configured
/// default is used as-is.
pub struct TerminalPrompt {
    default_name: String,
    timeout: Duration,
}

impl TerminalPrompt {
    /// Prompt offering `default_name`; blank falls back to the caller's default.
    pub fn new(default_name: String) -> Self {
        Self {
            default_name,
            timeout: PROMPT_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn fallback<'a>(&'a self, default: &'a str) -> &'a str {
        if self.default_name.trim().is_empty() {
            default
        } else {
            &self.default_name
        }
    }

    /// Run the blocking `read` off the runtime; blank, failed or late
    /// answers become `fallback`.
    pub(crate) async fn read_answer<F>(&self, fallback: String, read: F) -> Option<String>
    where
        F: FnOnce() -> Option<String> + Send + 'static,
    {
        let answer = tokio::time::timeout(self.timeout, tokio::task::spawn_blocking(read)).await;

        let line = match answer {
            Ok(Ok(line)) => line,
            Ok(Err(e)) => {
                warn!(error = ?e, "File name prompt failed");
                return None;
            }
            Err(_) => {
                warn!(
                    timeout = ?self.timeout,
                    file_name = %fallback,
                    "File name prompt unanswered, using default name"
                );
                return Some(fallback);
            }
        };

        match line.as_deref().map(str::trim) {
            Some(line) if !line.is_empty() => Some(line.to_string()),
            _ => Some(fallback),
        }
    }
}

fn read_terminal_line(offered: String) -> Option<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Enter file name [{}]: ", offered).ok()?;
    stdout.flush().ok()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    Some(line)
}

#[async_trait]
impl FileNamePrompt for TerminalPrompt {
    async fn file_name(&self, default: &str) -> Option<String> {
        let fallback = self.fallback(default).to_string();

        if !std::io::stdin().is_terminal() {
            debug!(file_name = %fallback, "No terminal attached, using default name");
            return Some(fallback);
        }

        let offered = fallback.clone();
        self.read_answer(fallback, move || read_terminal_line(offered))
            .await
    }
}
