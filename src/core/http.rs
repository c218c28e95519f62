use std::time::Duration;

use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        USER_AGENT,
    },
    Client,
};

use crate::core::PanelError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn http_client() -> Result<Client, PanelError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("sovits-panel/", env!("CARGO_PKG_VERSION"))),
    );

    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .default_headers(headers)
        .build()
        .map_err(|e| PanelError::Custom(format!("HTTP client build failed: {e}")))
}
