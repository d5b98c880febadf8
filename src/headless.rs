// Headless mode: the typewriter on a plain terminal line
//
// Used when LUXSCALE_NO_TUI=1. The rotator runs on its own scheduler and
// the current placeholder is redrawn in place on stdout until Ctrl+C.
// Logs go to stderr so they don't fight with the line.

use crate::config::Config;
use crate::rotator::{RotatorTimer, TextRotator};
use crate::scheduler::Scheduler;
use crate::startup::StartupRegistry;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Instant;
use tokio::time::sleep_until;

pub struct Headless {
    rotator: Option<TextRotator>,
    scheduler: Scheduler<RotatorTimer>,
}

impl Headless {
    /// Build the rotator, reporting it to the startup registry
    ///
    /// A missing text is logged and the typewriter is skipped; `run` then
    /// returns straight away.
    pub fn new(config: &Config, registry: &mut StartupRegistry) -> Self {
        let rotator = match TextRotator::new(&config.typewriter) {
            Ok(rotator) => {
                registry.activate("typewriter");
                Some(rotator)
            }
            Err(e) => {
                tracing::error!("{}", e);
                registry.fail("typewriter", e.to_string());
                None
            }
        };
        Self {
            rotator,
            scheduler: Scheduler::new(),
        }
    }

    #[cfg(test)]
    fn has_rotator(&self) -> bool {
        self.rotator.is_some()
    }

    pub async fn run(mut self) -> Result<()> {
        let Some(mut rotator) = self.rotator.take() else {
            tracing::warn!("No typewriter texts, nothing to show");
            return Ok(());
        };

        let origin = Instant::now();
        rotator.start(&mut self.scheduler);
        tracing::info!("Headless typewriter running, Ctrl+C to stop");

        let mut stdout = io::stdout();
        let mut shown = String::new();

        // Start always leaves a step pending, so the queue only empties on a bug
        while let Some(deadline) = self.scheduler.next_deadline() {
            let wake = tokio::time::Instant::from_std(origin + deadline);

            tokio::select! {
                _ = sleep_until(wake) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }

            while let Some(timer) = self.scheduler.next_due(origin.elapsed()) {
                rotator.on_timer(timer, &mut self.scheduler);
            }

            if rotator.placeholder() != shown {
                shown = rotator.placeholder().to_string();
                // Carriage return plus clear-line redraws in place
                write!(stdout, "\r\x1b[2K{}", shown).context("writing to stdout")?;
                stdout.flush().context("flushing stdout")?;
            }
        }

        writeln!(stdout).context("writing to stdout")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::startup::FeatureStatus;

    #[tokio::test]
    async fn test_missing_texts_skip_typewriter_without_error() {
        let mut config = Config::default();
        config.typewriter.texts.clear();
        let mut registry = StartupRegistry::from_config(&config);

        let headless = Headless::new(&config, &mut registry);

        assert!(!headless.has_rotator());
        assert!(matches!(
            registry.status("typewriter"),
            Some(FeatureStatus::Failed(_))
        ));
        assert!(headless.run().await.is_ok());
    }

    #[test]
    fn test_default_texts_build_rotator() {
        let config = Config::default();
        let mut registry = StartupRegistry::from_config(&config);

        let headless = Headless::new(&config, &mut registry);

        assert!(headless.has_rotator());
        assert_eq!(registry.failed_count(), 0);
    }
}
