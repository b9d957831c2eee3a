use reqwest::RequestBuilder;

/// Cookie name the upstream uses for its session credential.
pub const SESSION_COOKIE_NAME: &str = "connect.sid";

/// Render the auth cookie header value for a session credential.
pub fn session_cookie(sid: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={sid}")
}

/// Add the auth cookie and identifying headers to an outgoing request.
pub fn add_standard_headers(builder: RequestBuilder, sid: &str) -> RequestBuilder {
    builder
        .header(reqwest::header::COOKIE, session_cookie(sid))
        .header(
            reqwest::header::USER_AGENT,
            format!("scrapbox-mcp-gateway/{}", env!("CARGO_PKG_VERSION")),
        )
}
