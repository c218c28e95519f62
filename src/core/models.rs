use std::time::{
    Duration,
    Instant,
};

use reqwest::Url;

/// How long the upload bar stays visible after a transfer ends.
pub const UPLOAD_HIDE_DELAY: Duration = Duration::from_millis(1200);

pub const NO_OUTPUT_LABEL: &str = "Keine";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Done,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct UploadProgress {
    pub percent: u8,
    pub phase: UploadPhase,
    hide_at: Option<Instant>,
}

impl UploadProgress {
    pub fn start(&mut self) {
        self.percent = 0;
        self.phase = UploadPhase::Uploading;
        self.hide_at = None;
    }

    pub fn report(&mut self, percent: u8) {
        if self.phase == UploadPhase::Uploading {
            self.percent = percent.min(100);
        }
    }

    pub fn finish(&mut self, phase: UploadPhase, now: Instant) {
        if phase == UploadPhase::Done {
            self.percent = 100;
        }
        self.phase = phase;
        self.hide_at = Some(now + UPLOAD_HIDE_DELAY);
    }

    /// Hides the bar once the display delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(hide_at) = self.hide_at {
            if now >= hide_at {
                *self = Self::default();
            }
        }
    }

    pub fn hide_in(&self, now: Instant) -> Option<Duration> {
        self.hide_at.map(|hide_at| hide_at.saturating_duration_since(now))
    }

    pub fn is_visible(&self) -> bool {
        self.phase != UploadPhase::Idle
    }

    pub fn fraction(&self) -> f32 {
        self.percent as f32 / 100.0
    }

    pub fn label(&self) -> String {
        match self.phase {
            UploadPhase::Idle => String::new(),
            UploadPhase::Uploading if self.percent == 0 => "Upload läuft...".to_string(),
            UploadPhase::Uploading => format!("Upload läuft... ({}%)", self.percent),
            UploadPhase::Done => "Upload abgeschlossen!".to_string(),
            UploadPhase::Error => "Fehler beim Upload!".to_string(),
        }
    }
}

/// Displayed state of one backend job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobDisplay {
    Running,
    Starting,
    Idle,
}

impl JobDisplay {
    pub fn label(&self) -> &'static str {
        match self {
            JobDisplay::Running => "Wird ausgeführt",
            JobDisplay::Starting => "Wird gestartet…",
            JobDisplay::Idle => "Inaktiv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Unknown,
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputView {
    None,
    Link { file_name: String, url: Url },
}

impl OutputView {
    pub fn label(&self) -> &str {
        match self {
            OutputView::None => NO_OUTPUT_LABEL,
            OutputView::Link { file_name, .. } => file_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Hint,
    Error,
}

/// A blocking notification for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn hint(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Hint, title: "Hinweis".to_string(), message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: "Fehler".to_string(), message: message.into() }
    }

    pub fn backend_error(error: &str) -> Self {
        Self::error(format!("Fehler: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_bar_hides_after_delay() {
        let start = Instant::now();
        let mut upload = UploadProgress::default();
        upload.start();
        upload.report(40);
        assert_eq!(upload.label(), "Upload läuft... (40%)");

        upload.finish(UploadPhase::Done, start);
        assert_eq!(upload.label(), "Upload abgeschlossen!");

        upload.tick(start + Duration::from_millis(1000));
        assert!(upload.is_visible());

        upload.tick(start + UPLOAD_HIDE_DELAY);
        assert!(!upload.is_visible());
        assert_eq!(upload.percent, 0);
    }

    #[test]
    fn progress_reports_after_finish_are_ignored() {
        let now = Instant::now();
        let mut upload = UploadProgress::default();
        upload.start();
        upload.finish(UploadPhase::Error, now);
        upload.report(80);
        assert_eq!(upload.percent, 0);
        assert_eq!(upload.label(), "Fehler beim Upload!");
    }

    #[test]
    fn restart_clears_pending_hide() {
        let now = Instant::now();
        let mut upload = UploadProgress::default();
        upload.start();
        upload.finish(UploadPhase::Done, now);
        upload.start();
        upload.tick(now + UPLOAD_HIDE_DELAY * 2);
        assert_eq!(upload.phase, UploadPhase::Uploading);
        assert_eq!(upload.label(), "Upload läuft...");
    }
}
