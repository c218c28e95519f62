use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

pub const MAX_PROGRESS: f32 = 100.0;

/// Job state reported by `GET /api/status`.
///
/// Every field is optional on the wire; older backends omit `output_file`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub training: bool,
    pub synthesizing: bool,
    pub progress: f32,
    pub log: Vec<String>,
    pub output_file: Option<String>,
}

impl StatusSnapshot {
    /// Progress as a 0.0..=1.0 fraction, clamped for out-of-range backend values.
    pub fn progress_fraction(&self) -> f32 {
        if self.progress.is_nan() {
            return 0.0;
        }
        self.progress.clamp(0.0, MAX_PROGRESS) / MAX_PROGRESS
    }

    pub fn progress_percent(&self) -> u8 {
        (self.progress_fraction() * MAX_PROGRESS).round() as u8
    }

    pub fn output_file(&self) -> Option<&str> {
        self.output_file.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleList {
    pub samples: Vec<String>,
}

/// Body of the upload, train and synthesize endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionReply {
    pub error: Option<String>,
    pub message: Option<String>,
    pub sample: Option<String>,
}

impl ActionReply {
    /// Reads a reply from a raw body, tolerating non-string field values.
    /// Returns `None` when the body is not a JSON object.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let Value::Object(fields) = serde_json::from_slice::<Value>(body).ok()? else {
            return None;
        };

        let field = |name: &str| match fields.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        Some(Self { error: field("error"), message: field("message"), sample: field("sample") })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Human readable summary of a successful reply, if the backend sent one.
    pub fn summary(&self) -> Option<String> {
        match (&self.message, &self.sample) {
            (Some(message), _) if !message.is_empty() => Some(message.clone()),
            (_, Some(sample)) if !sample.is_empty() => {
                Some(format!("Sample hochgeladen: {}", sample))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tolerates_missing_fields() {
        let status: StatusSnapshot =
            serde_json::from_str(r#"{"training": true, "progress": 10, "log": []}"#).unwrap();
        assert!(status.training);
        assert!(!status.synthesizing);
        assert_eq!(status.progress_percent(), 10);
        assert_eq!(status.output_file(), None);
    }

    #[test]
    fn progress_is_clamped() {
        let over = StatusSnapshot { progress: 180.0, ..Default::default() };
        let under = StatusSnapshot { progress: -5.0, ..Default::default() };
        let nan = StatusSnapshot { progress: f32::NAN, ..Default::default() };
        assert_eq!(over.progress_fraction(), 1.0);
        assert_eq!(under.progress_fraction(), 0.0);
        assert_eq!(nan.progress_fraction(), 0.0);
    }

    #[test]
    fn empty_output_file_counts_as_none() {
        let status: StatusSnapshot = serde_json::from_str(r#"{"output_file": ""}"#).unwrap();
        assert_eq!(status.output_file(), None);
    }

    #[test]
    fn reply_body_is_read_leniently() {
        let numeric = ActionReply::from_body(br#"{"error": 5, "message": null}"#).unwrap();
        assert_eq!(numeric.error(), Some("5"));
        assert_eq!(numeric.message, None);

        let plain = ActionReply::from_body(br#"{"sample": "a.wav"}"#).unwrap();
        assert_eq!(plain.error(), None);
        assert_eq!(plain.sample.as_deref(), Some("a.wav"));

        assert_eq!(ActionReply::from_body(b"RIFF....WAVE"), None);
        assert_eq!(ActionReply::from_body(b"[1, 2]"), None);
    }

    #[test]
    fn reply_summary_prefers_message() {
        let reply: ActionReply =
            serde_json::from_str(r#"{"message": "Training gestartet"}"#).unwrap();
        assert_eq!(reply.summary().as_deref(), Some("Training gestartet"));
        assert_eq!(reply.error(), None);

        let upload: ActionReply = serde_json::from_str(r#"{"sample": "stimme.wav"}"#).unwrap();
        assert_eq!(upload.summary().as_deref(), Some("Sample hochgeladen: stimme.wav"));
    }
}
