//! Shared state for the wizard front end: configuration, prompt theme and
//! the stderr status channel.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::config::Config;

/// Kind of status line, which decides its styling and whether `--quiet`
/// suppresses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Info,
    Success,
    Warning,
    Error,
}

pub struct AppContext {
    pub quiet: bool,
    pub config: Config,
    pub theme: ColorfulTheme,
}

impl AppContext {
    pub fn new(quiet: bool, config: Config) -> Self {
        Self {
            quiet,
            config,
            theme: ColorfulTheme::default(),
        }
    }

    /// Ask a yes/no question. `--quiet` trims output only, so this always prompts.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    /// Styled status line, or `None` when quiet mode hides it.
    pub fn status_line(&self, tone: Tone, msg: &str) -> Option<String> {
        if self.quiet && tone != Tone::Error {
            return None;
        }
        let line = match tone {
            Tone::Heading => format!("\n{}", style(msg).bold()),
            Tone::Info => style(msg).cyan().to_string(),
            Tone::Success => style(msg).green().to_string(),
            Tone::Warning => style(msg).yellow().to_string(),
            Tone::Error => style(msg).red().to_string(),
        };
        Some(line)
    }

    /// Status goes to stderr; stdout is reserved for the payload.
    pub fn status(&self, tone: Tone, msg: &str) {
        if let Some(line) = self.status_line(tone, msg) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn context(quiet: bool) -> AppContext {
        AppContext::new(
            quiet,
            Config {
                submit_url: None,
                api_token: None,
                submit_timeout: Duration::from_secs(30),
            },
        )
    }

    #[test]
    fn quiet_mode_keeps_only_errors() {
        let ctx = context(true);
        assert!(ctx.status_line(Tone::Info, "hello").is_none());
        assert!(ctx.status_line(Tone::Warning, "careful").is_none());
        let line = ctx.status_line(Tone::Error, "boom").unwrap();
        assert!(line.contains("boom"));
    }

    #[test]
    fn normal_mode_prints_every_tone() {
        let ctx = context(false);
        for tone in [Tone::Heading, Tone::Info, Tone::Success, Tone::Warning, Tone::Error] {
            assert!(ctx.status_line(tone, "msg").unwrap().contains("msg"));
        }
    }
}
