use futures_util::{
    stream,
    StreamExt,
};
use reqwest::Body;

const CHUNK_SIZE: usize = 64 * 1024;

pub type ProgressCallback = Box<dyn Fn(u8) + Send + Sync>;

/// Turns bytes handed to the transport into percentages, reporting each
/// percentage at most once.
pub struct ProgressTracker {
    total: u64,
    sent: u64,
    last_percent: Option<u8>,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    pub fn new(total: u64, callback: Option<ProgressCallback>) -> Self {
        Self { total, sent: 0, last_percent: None, callback }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.sent = (self.sent + bytes).min(self.total);

        let percent = self.percent();
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        if let Some(callback) = &self.callback {
            callback(percent);
        }
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.sent as f64 / self.total as f64) * 100.0).round() as u8
    }
}

/// Wraps `bytes` in a chunked request body that reports progress as the
/// transport pulls each chunk.
pub fn progress_body(bytes: Vec<u8>, callback: Option<ProgressCallback>) -> (Body, u64) {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut tracker = ProgressTracker::new(total, callback);

    let body_stream = stream::iter(chunks).map(move |chunk| {
        tracker.advance(chunk.len() as u64);
        Ok::<_, std::io::Error>(chunk)
    });

    (Body::wrap_stream(body_stream), total)
}
