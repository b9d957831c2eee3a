use std::time::Duration;

/// Fixed ceiling for any single upstream request. Not configurable; a slow
/// call fails once and is reported once.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared reqwest client used for every upstream call.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("reqwest client")
}

#[cfg(test)]
mod tests {
    #[test]
    fn client_builds_with_defaults() {
        let _ = super::make_http_client();
        assert_eq!(super::DEFAULT_TIMEOUT.as_secs(), 30);
    }
}
