use std::time::{Duration, Instant};

/// How long a flashed message replaces the default status text.
pub const FLASH_DURATION: Duration = Duration::from_millis(2000);

/// The status bar text: a default, occasionally replaced by a short-lived
/// message.
#[derive(Debug, Default)]
pub struct StatusLine {
    flash: Option<(String, Instant)>,
}
impl StatusLine {
    pub fn flash(&mut self, message: impl Into<String>, now: Instant) {
        self.flash = Some((message.into(), now));
    }

    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) < FLASH_DURATION)
    }

    pub fn text<'a>(&'a self, now: Instant, default: &'a str) -> &'a str {
        match &self.flash {
            Some((message, _)) if self.is_flashing(now) => message.as_str(),
            _ => default,
        }
    }
}
