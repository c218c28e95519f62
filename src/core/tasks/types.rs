use std::{
    fmt,
    path::PathBuf,
};

use crate::{
    backend::{
        ActionReply,
        SampleList,
        StatusSnapshot,
    },
    core::PanelError,
};

/// A unit of network work requested by the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchStatus,
    FetchSamples,
    Upload(PathBuf),
    Train,
    Synthesize(String),
    SaveOutput { file_name: String, destination: PathBuf },
}

/// Cloneable form of [`PanelError`] for crossing the result channel.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestFailure {
    /// The request never completed (connect, timeout, body decode).
    Transport(String),
    /// Non-2xx answer without a usable JSON body.
    Status { status: u16, body: String },
    /// Failed before anything was sent, e.g. reading the upload file.
    Local(String),
}

impl From<PanelError> for RequestFailure {
    fn from(error: PanelError) -> Self {
        match error {
            PanelError::Reqwest(e) => RequestFailure::Transport(e.to_string()),
            PanelError::Status { status, body } => RequestFailure::Status { status, body },
            other => RequestFailure::Local(other.to_string()),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Transport(message) => write!(f, "{}", message),
            RequestFailure::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP {}", status)
            }
            RequestFailure::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            RequestFailure::Local(message) => write!(f, "{}", message),
        }
    }
}

pub type RequestResult<T> = Result<T, RequestFailure>;

#[derive(Debug, Clone)]
pub enum TaskResult {
    Status(RequestResult<StatusSnapshot>),
    Samples(RequestResult<SampleList>),

    UploadProgress(u8),
    Upload(RequestResult<ActionReply>),

    Train(RequestResult<ActionReply>),
    Synthesis(RequestResult<ActionReply>),

    OutputSaved { file_name: String, result: RequestResult<PathBuf> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Status(_) => "status",
            TaskResult::Samples(_) => "samples",
            TaskResult::UploadProgress(_) => "upload_progress",
            TaskResult::Upload(_) => "upload",
            TaskResult::Train(_) => "train",
            TaskResult::Synthesis(_) => "synthesis",
            TaskResult::OutputSaved { .. } => "output_saved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_keep_their_category() {
        let status = RequestFailure::from(PanelError::Status { status: 500, body: String::new() });
        assert_eq!(status, RequestFailure::Status { status: 500, body: String::new() });
        assert_eq!(status.to_string(), "HTTP 500");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "weg");
        assert!(matches!(RequestFailure::from(PanelError::from(io)), RequestFailure::Local(_)));
    }
}
