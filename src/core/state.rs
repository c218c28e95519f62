//! View state of the panel and the rules that turn user actions and backend
//! results into follow-up commands.
//!
//! Nothing here touches the network: every operation returns the
//! [`Command`]s it wants executed and leaves dispatching to the caller.

use std::{
    collections::VecDeque,
    path::PathBuf,
    time::Instant,
};

use chrono::{
    DateTime,
    Local,
};

use super::{
    models::{
        ConnectionState,
        JobDisplay,
        Notice,
        OutputView,
        UploadPhase,
        UploadProgress,
    },
    tasks::{
        Command,
        RequestFailure,
        RequestResult,
        TaskResult,
    },
};
use crate::backend::{
    ActionReply,
    PanelApi,
    StatusSnapshot,
};

pub const NO_FILE_SELECTED: &str = "Bitte wählen Sie eine Datei zum Hochladen aus.";
pub const NO_SYNTHESIS_TEXT: &str = "Bitte geben Sie Text für die Synthese ein.";
pub const UPLOAD_FAILED: &str = "Fehler beim Hochladen der Datei.";

/// Optimistic marker for a job the user just triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingJob {
    /// Trigger sent, no reply yet.
    Requested,
    /// Trigger accepted; waiting for a status poll to confirm.
    Acknowledged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingJobs {
    pub training: Option<PendingJob>,
    pub synthesizing: Option<PendingJob>,
}

impl PendingJobs {
    /// Settles pending markers against an authoritative snapshot.
    fn reconcile(&mut self, status: &StatusSnapshot) {
        settle(&mut self.training, status.training);
        settle(&mut self.synthesizing, status.synthesizing);
    }
}

fn settle(pending: &mut Option<PendingJob>, running: bool) {
    if running || *pending == Some(PendingJob::Acknowledged) {
        *pending = None;
    }
}

fn job_display(running: bool, pending: Option<PendingJob>) -> JobDisplay {
    match (running, pending) {
        (true, _) => JobDisplay::Running,
        (false, Some(_)) => JobDisplay::Starting,
        (false, None) => JobDisplay::Idle,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    Training,
    Synthesis,
}

impl Job {
    fn start_failure_log(&self) -> &'static str {
        match self {
            Job::Training => "Fehler beim Starten des Trainings",
            Job::Synthesis => "Fehler beim Starten der Synthese",
        }
    }
}

#[derive(Debug, Default)]
pub struct PanelState {
    status: StatusSnapshot,
    last_updated: Option<DateTime<Local>>,
    samples: Vec<String>,
    upload: UploadProgress,
    pending: PendingJobs,
    notices: VecDeque<Notice>,
    last_message: Option<String>,
    connection: ConnectionState,

    pub selected_file: Option<PathBuf>,
    pub synthesis_text: String,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial loads besides the first status poll, which the poll schedule issues.
    pub fn startup(&self) -> Vec<Command> {
        vec![Command::FetchSamples]
    }

    pub fn request_upload(&mut self) -> Vec<Command> {
        let Some(path) = self.selected_file.clone() else {
            self.notify(Notice::hint(NO_FILE_SELECTED));
            return Vec::new();
        };

        self.upload.start();
        vec![Command::Upload(path)]
    }

    pub fn request_train(&mut self) -> Vec<Command> {
        self.pending.training = Some(PendingJob::Requested);
        vec![Command::Train]
    }

    pub fn request_synthesis(&mut self) -> Vec<Command> {
        if self.synthesis_text.trim().is_empty() {
            self.notify(Notice::hint(NO_SYNTHESIS_TEXT));
            return Vec::new();
        }

        self.pending.synthesizing = Some(PendingJob::Requested);
        vec![Command::Synthesize(self.synthesis_text.clone())]
    }

    pub fn request_save_output(&mut self, destination: PathBuf) -> Vec<Command> {
        match self.status.output_file() {
            Some(file_name) => {
                vec![Command::SaveOutput { file_name: file_name.to_string(), destination }]
            }
            None => {
                self.notify(Notice::hint("Es ist keine Ausgabedatei vorhanden."));
                Vec::new()
            }
        }
    }

    /// Folds a finished (or progressing) task into the view state.
    pub fn handle(&mut self, result: TaskResult, now: Instant) -> Vec<Command> {
        tracing::trace!("Handling {} result", result.task_type());

        match result {
            TaskResult::Status(Ok(status)) => {
                self.apply_status(status);
                Vec::new()
            }
            TaskResult::Status(Err(failure)) => {
                tracing::error!("Fehler beim Abrufen des Status: {}", failure);
                self.note_failure(&failure);
                Vec::new()
            }

            TaskResult::Samples(Ok(list)) => {
                self.samples = list.samples;
                Vec::new()
            }
            TaskResult::Samples(Err(failure)) => {
                tracing::error!("Fehler beim Abrufen der Beispiele: {}", failure);
                self.note_failure(&failure);
                Vec::new()
            }

            TaskResult::UploadProgress(percent) => {
                self.upload.report(percent);
                Vec::new()
            }
            TaskResult::Upload(result) => self.handle_upload(result, now),

            TaskResult::Train(result) => self.handle_job_reply(Job::Training, result),
            TaskResult::Synthesis(result) => self.handle_job_reply(Job::Synthesis, result),

            TaskResult::OutputSaved { file_name, result } => {
                match result {
                    Ok(path) => {
                        self.last_message = Some(format!("Gespeichert: {}", path.display()));
                    }
                    Err(failure) => {
                        tracing::error!("Fehler beim Speichern von {}: {}", file_name, failure);
                        self.notify(Notice::error(format!(
                            "{} konnte nicht gespeichert werden: {}",
                            file_name, failure
                        )));
                    }
                }
                Vec::new()
            }
        }
    }

    /// Replaces the displayed status with `status` as a whole.
    pub fn apply_status(&mut self, status: StatusSnapshot) {
        self.pending.reconcile(&status);
        self.status = status;
        self.connection = ConnectionState::Online;
        self.last_updated = Some(Local::now());
    }

    fn handle_upload(&mut self, result: RequestResult<ActionReply>, now: Instant) -> Vec<Command> {
        match result {
            Ok(reply) => {
                self.upload.finish(UploadPhase::Done, now);

                if let Some(error) = reply.error() {
                    self.notify(Notice::backend_error(error));
                    return Vec::new();
                }

                if let Some(summary) = reply.summary() {
                    tracing::info!("{}", summary);
                    self.last_message = Some(summary);
                }
                vec![Command::FetchSamples, Command::FetchStatus]
            }
            Err(failure @ RequestFailure::Status { .. }) => {
                self.upload.finish(UploadPhase::Done, now);
                tracing::error!("Upload abgelehnt: {}", failure);
                self.notify(Notice::error(UPLOAD_FAILED));
                Vec::new()
            }
            Err(RequestFailure::Local(message)) => {
                self.upload.finish(UploadPhase::Error, now);
                tracing::error!("Datei konnte nicht gelesen werden: {}", message);
                self.notify(Notice::error(format!("Datei konnte nicht gelesen werden: {}", message)));
                Vec::new()
            }
            Err(failure @ RequestFailure::Transport(_)) => {
                self.upload.finish(UploadPhase::Error, now);
                tracing::error!("Fehler beim Upload: {}", failure);
                self.note_failure(&failure);
                Vec::new()
            }
        }
    }

    /// Train and synthesize share one contract: surface `error`, then refresh
    /// the status whatever the reply said.
    fn handle_job_reply(&mut self, job: Job, result: RequestResult<ActionReply>) -> Vec<Command> {
        let pending = match job {
            Job::Training => &mut self.pending.training,
            Job::Synthesis => &mut self.pending.synthesizing,
        };

        match result {
            Ok(reply) => {
                if let Some(error) = reply.error() {
                    *pending = None;
                    let notice = Notice::backend_error(error);
                    self.notify(notice);
                } else {
                    if *pending == Some(PendingJob::Requested) {
                        *pending = Some(PendingJob::Acknowledged);
                    }
                    if let Some(summary) = reply.summary() {
                        self.last_message = Some(summary);
                    }
                }
                vec![Command::FetchStatus]
            }
            Err(failure @ RequestFailure::Status { .. }) => {
                *pending = None;
                tracing::error!("{}: {}", job.start_failure_log(), failure);
                self.notify(Notice::error(job.start_failure_log()));
                vec![Command::FetchStatus]
            }
            Err(failure) => {
                *pending = None;
                tracing::error!("{}: {}", job.start_failure_log(), failure);
                self.note_failure(&failure);
                Vec::new()
            }
        }
    }

    /// Advances time-based state (the upload bar's hide delay).
    pub fn tick(&mut self, now: Instant) {
        self.upload.tick(now);
    }

    /// Any request that never reached the backend marks it unreachable until
    /// the next successful poll.
    fn note_failure(&mut self, failure: &RequestFailure) {
        if matches!(failure, RequestFailure::Transport(_)) {
            self.connection = ConnectionState::Offline;
        }
    }

    fn notify(&mut self, notice: Notice) {
        tracing::warn!("{}: {}", notice.title, notice.message);
        self.notices.push_back(notice);
    }

    pub fn status(&self) -> &StatusSnapshot {
        &self.status
    }

    pub fn training_display(&self) -> JobDisplay {
        job_display(self.status.training, self.pending.training)
    }

    pub fn synthesis_display(&self) -> JobDisplay {
        job_display(self.status.synthesizing, self.pending.synthesizing)
    }

    pub fn pending(&self) -> &PendingJobs {
        &self.pending
    }

    pub fn log_entries(&self) -> &[String] {
        &self.status.log
    }

    pub fn output_view(&self, api: &PanelApi) -> OutputView {
        let Some(file_name) = self.status.output_file() else {
            return OutputView::None;
        };

        match api.output_url(file_name) {
            Ok(url) => OutputView::Link { file_name: file_name.to_string(), url },
            Err(e) => {
                tracing::warn!("Ungültiger Ausgabedateiname {}: {}", file_name, e);
                OutputView::None
            }
        }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn upload(&self) -> &UploadProgress {
        &self.upload
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }
}
