//! Build-time configuration of the web client.

/// Backend used when `ROLLCALL_API_URL` was not set at build time.
pub const DEFAULT_API_URL: &str = "https://attendance-backend-dvcz.onrender.com";

/// Base URL of the attendance backend, without a trailing slash.
pub fn api_base_url() -> &'static str {
    normalize_base_url(option_env!("ROLLCALL_API_URL").unwrap_or(DEFAULT_API_URL))
}

fn normalize_base_url(url: &str) -> &str {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() { DEFAULT_API_URL } else { url }
}
