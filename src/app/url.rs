//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL.
///
/// Adds an `https://` prefix if missing, then checks that the URL parses and
/// uses the http/https scheme. A trailing slash is removed so adapters can
/// append endpoint paths. Logs a warning and returns `None` if the URL is
/// invalid, too long, or uses an unsupported scheme.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    // Check URL length before normalization
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = match url.split_once("://") {
        Some((scheme, _))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            url.to_string()
        }
        Some(_) => {
            warn!("Skipping unsupported URL: {url}");
            return None;
        }
        None => format!("https://{url}"),
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => {
                // Serialize from the parsed form so the scheme comes out lowercase
                Some(parsed.as_str().trim_end_matches('/').to_string())
            }
            _ => {
                warn!("Skipping unsupported URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}
