//! Progress bar for the import and update runs using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

use dayport_core::ProgressSink;

use super::context::UiContext;
use super::theme::spinner_frames;

/// Percentage-driven progress bar drawn on stderr.
///
/// Only animates on a TTY in pretty mode; otherwise it only tracks the last
/// reported percentage.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    last: f64,
}

impl ProgressBar {
    /// Create a new progress bar with the given message.
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        let bar = if ctx.allows_animation() {
            let pb = IndicatifBar::new(100);
            let template = if ctx.unicode {
                "{spinner:.cyan} {msg} [{bar:30.cyan/dim}] {pos:>3}%"
            } else {
                "{spinner} {msg} [{bar:30}] {pos:>3}%"
            };
            let style = ProgressStyle::default_bar()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(if ctx.unicode { "━━─" } else { "=>-" })
                .tick_strings(spinner_frames(ctx.unicode));
            pb.set_style(style);
            pb.set_message(message.to_string());
            Some(pb)
        } else {
            None
        };

        Self { bar, last: 0.0 }
    }

    /// Last reported percentage.
    pub fn percent(&self) -> f64 {
        self.last
    }

    /// Clear the bar from the terminal.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl ProgressSink for ProgressBar {
    fn emit(&mut self, percentage: f64) {
        self.last = percentage.clamp(0.0, 100.0);
        if let Some(bar) = &self.bar {
            bar.set_position(self.last.round() as u64);
        }
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_tracks_percentage_without_terminal() {
        let mut bar = ProgressBar::new(&plain_ctx(), "Importing");
        assert!(bar.bar.is_none());

        bar.emit(25.0);
        bar.emit(50.0);
        assert_eq!(bar.percent(), 50.0);
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let mut bar = ProgressBar::new(&plain_ctx(), "Importing");
        bar.emit(140.0);
        assert_eq!(bar.percent(), 100.0);
        bar.emit(-3.0);
        assert_eq!(bar.percent(), 0.0);
    }
}
