use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
};

use tokio::runtime::Runtime;

use super::{
    Command,
    RequestFailure,
    TaskResult,
};
use crate::backend::{
    PanelApi,
    ProgressCallback,
};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sends results back to the UI thread and wakes it up.
#[derive(Clone)]
struct ResultSender {
    sender: mpsc::Sender<TaskResult>,
    waker: Option<Waker>,
}

impl ResultSender {
    fn send(&self, result: TaskResult) {
        let _ = self.sender.send(result);
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: ResultSender,
    api: Arc<PanelApi>,
}

impl TaskManager {
    pub fn new(api: Arc<PanelApi>) -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender: ResultSender { sender, waker: None }, api }
    }

    /// Called after every result is queued, typically to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.sender.waker = Some(Arc::new(waker));
        self
    }

    /// Requests started after this call use `api`; in-flight ones finish on the old client.
    pub fn set_api(&mut self, api: Arc<PanelApi>) {
        self.api = api;
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (ResultSender, Arc<PanelApi>) {
        (self.sender.clone(), self.api.clone())
    }

    pub fn run(&self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);

        match command {
            Command::FetchStatus => self.fetch_status(),
            Command::FetchSamples => self.fetch_samples(),
            Command::Upload(path) => self.upload(path),
            Command::Train => self.train(),
            Command::Synthesize(text) => self.synthesize(text),
            Command::SaveOutput { file_name, destination } => {
                self.save_output(file_name, destination)
            }
        }
    }

    fn fetch_status(&self) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let result = api.status().await.map_err(RequestFailure::from);
            sender.send(TaskResult::Status(result));
        });
    }

    fn fetch_samples(&self) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let result = api.samples().await.map_err(RequestFailure::from);
            sender.send(TaskResult::Samples(result));
        });
    }

    fn upload(&self, path: PathBuf) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let progress_sender = sender.clone();
            let progress_callback: ProgressCallback = Box::new(move |percent: u8| {
                progress_sender.send(TaskResult::UploadProgress(percent));
            });

            let result = api
                .upload_sample_file(&path, Some(progress_callback))
                .await
                .map_err(RequestFailure::from);

            sender.send(TaskResult::Upload(result));
        });
    }

    fn train(&self) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let result = api.train().await.map_err(RequestFailure::from);
            sender.send(TaskResult::Train(result));
        });
    }

    fn synthesize(&self, text: String) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let result = api.synthesize(&text).await.map_err(RequestFailure::from);
            sender.send(TaskResult::Synthesis(result));
        });
    }

    fn save_output(&self, file_name: String, destination: PathBuf) {
        let (sender, api) = self.task_context();

        self.runtime.spawn(async move {
            let result = api
                .download_output(&file_name, &destination)
                .await
                .map(|bytes| {
                    tracing::info!(
                        "Saved {} ({} bytes) to {}",
                        file_name,
                        bytes,
                        destination.display()
                    );
                    destination
                })
                .map_err(RequestFailure::from);

            sender.send(TaskResult::OutputSaved { file_name, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{
            AtomicUsize,
            Ordering,
        },
        thread,
        time::{
            Duration,
            Instant,
        },
    };

    use axum::{
        routing::{
            get,
            post,
        },
        Json,
        Router,
    };
    use serde_json::json;

    use super::*;
    use crate::backend::test_support::serve;

    fn collect(manager: &mut TaskManager, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(manager.poll_results());
            thread::sleep(Duration::from_millis(10));
        }
        results
    }

    fn backend() -> (Runtime, Arc<PanelApi>) {
        let router = Router::new()
            .route(
                "/api/status",
                get(|| async { Json(json!({ "training": true, "progress": 5, "log": ["x"] })) }),
            )
            .route("/api/samples", get(|| async { Json(json!({ "samples": ["a.wav"] })) }))
            .route("/api/train", post(|| async { Json(json!({ "error": "disk full" })) }));

        let server_runtime = Runtime::new().unwrap();
        let addr = server_runtime.block_on(serve(router));
        let api =
            Arc::new(PanelApi::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap());
        (server_runtime, api)
    }

    #[test]
    fn delivers_results_and_wakes_ui() {
        let (_server, api) = backend();
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = wakeups.clone();
        let mut manager = TaskManager::new(api).with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.run(Command::FetchStatus);
        manager.run(Command::FetchSamples);
        manager.run(Command::Train);

        let results = collect(&mut manager, 3);
        assert_eq!(results.len(), 3);

        // The waker runs right after each send, so allow it to catch up.
        let deadline = Instant::now() + Duration::from_secs(1);
        while wakeups.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(wakeups.load(Ordering::SeqCst), 3);

        for result in results {
            match result {
                TaskResult::Status(Ok(status)) => assert!(status.training),
                TaskResult::Samples(Ok(list)) => assert_eq!(list.samples, vec!["a.wav"]),
                TaskResult::Train(Ok(reply)) => assert_eq!(reply.error(), Some("disk full")),
                other => panic!("Unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn unreadable_upload_is_reported_as_local_failure() {
        let (_server, api) = backend();
        let mut manager = TaskManager::new(api);

        manager.run(Command::Upload(PathBuf::from("/definitely/not/here.wav")));

        let results = collect(&mut manager, 1);
        assert!(matches!(
            results.as_slice(),
            [TaskResult::Upload(Err(RequestFailure::Local(_)))]
        ));
    }
}
