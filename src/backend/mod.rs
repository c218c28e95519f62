pub mod api;
pub mod types;
pub mod upload;

pub use api::{
    normalize_base_url,
    PanelApi,
};
pub use types::{
    ActionReply,
    SampleList,
    StatusSnapshot,
};
pub use upload::ProgressCallback;

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;

    use axum::Router;

    /// Serves `router` on an ephemeral local port for the lifetime of the runtime.
    pub async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}
