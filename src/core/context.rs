use std::{
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use super::{
    poll::PollSchedule,
    tasks::{
        Command,
        TaskManager,
        TaskResult,
    },
    PanelError,
};
use crate::backend::PanelApi;

/// Connection parameters for one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

/// Everything the UI needs to talk to the backend, created once at startup.
pub struct ClientContext {
    api: Arc<PanelApi>,
    tasks: TaskManager,
    poll: PollSchedule,
}

impl ClientContext {
    pub fn new(
        config: &ClientConfig,
        waker: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, PanelError> {
        let api = Arc::new(PanelApi::new(&config.base_url, config.request_timeout)?);
        let tasks = TaskManager::new(api.clone()).with_waker(waker);

        tracing::info!("Backend: {}", api.base_url());

        Ok(Self { api, tasks, poll: PollSchedule::new(config.poll_interval) })
    }

    pub fn api(&self) -> &PanelApi {
        &self.api
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll.interval()
    }

    pub fn dispatch(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.tasks.run(command);
        }
    }

    /// Issues a status poll if one is due and returns the time until the next.
    pub fn drive_poll(&mut self, now: Instant) -> Duration {
        if self.poll.due(now) {
            self.tasks.run(Command::FetchStatus);
        }
        self.poll.until_next(now)
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        self.tasks.poll_results()
    }

    /// Points new requests at a different backend. Requests already in flight
    /// complete against the old one and their results are still delivered.
    pub fn reconfigure(&mut self, config: &ClientConfig) -> Result<(), PanelError> {
        let api = Arc::new(PanelApi::new(&config.base_url, config.request_timeout)?);
        tracing::info!("Backend gewechselt: {}", api.base_url());

        self.tasks.set_api(api.clone());
        self.api = api;
        self.poll.set_interval(config.poll_interval);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use axum::{
        routing::get,
        Json,
        Router,
    };
    use serde_json::json;

    use super::*;
    use crate::backend::test_support::serve;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            poll_interval: Duration::from_secs(3),
            request_timeout: Duration::from_secs(2),
        }
    }

    fn wait_for_results(context: &mut ClientContext, count: usize) -> Vec<TaskResult> {
        let mut results = Vec::new();
        for _ in 0..200 {
            results.extend(context.poll_results());
            if results.len() >= count {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        results
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ClientContext::new(&config("ftp://example.com"), || {}).is_err());
        assert!(ClientContext::new(&config("kein url"), || {}).is_err());
    }

    #[test]
    fn polls_on_startup_and_then_on_interval() {
        let server = tokio::runtime::Runtime::new().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/status",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"training": true, "progress": 5})) }
            }),
        );
        let addr = server.block_on(serve(router));

        let mut context = ClientContext::new(&config(&format!("http://{}", addr)), || {}).unwrap();
        let start = Instant::now();

        assert_eq!(context.drive_poll(start), Duration::from_secs(3));
        assert_eq!(context.drive_poll(start + Duration::from_secs(1)), Duration::from_secs(2));

        let results = wait_for_results(&mut context, 1);
        assert!(matches!(&results[..], [TaskResult::Status(Ok(status))] if status.training));

        context.drive_poll(start + Duration::from_secs(3));
        wait_for_results(&mut context, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reconfigure_switches_backend_and_interval() {
        let mut context = ClientContext::new(&config("http://127.0.0.1:9871"), || {}).unwrap();

        let mut next = config("http://192.168.1.20:9000/panel");
        next.poll_interval = Duration::from_secs(10);
        context.reconfigure(&next).unwrap();

        assert_eq!(context.api().base_url().as_str(), "http://192.168.1.20:9000/panel/");
        assert_eq!(context.poll_interval(), Duration::from_secs(10));

        assert!(context.reconfigure(&config("")).is_err());
        assert_eq!(context.api().base_url().as_str(), "http://192.168.1.20:9000/panel/");
    }
}
