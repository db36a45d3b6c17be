//! URL well-formedness.

use url::Url;

/// Schemes accepted for URLs sent to Discord. `attachment://` refers to a
/// file uploaded alongside the payload.
const SCHEMES: [&str; 3] = ["http", "https", "attachment"];

/// Whether `value` is an absolute `http`, `https` or `attachment` URL.
pub fn is_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };

    if !SCHEMES.contains(&url.scheme()) {
        return false;
    }

    url.host_str().is_some_and(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::is_url;

    #[test]
    fn accepted() {
        assert!(is_url("https://discord.com/"));
        assert!(is_url("http://127.0.0.1:8080/a?b=c"));
        assert!(is_url("attachment://image.png"));
    }

    #[test]
    fn rejected() {
        assert!(!is_url(""));
        assert!(!is_url("discord.com"));
        assert!(!is_url("ftp://discord.com"));
        assert!(!is_url("https://"));
    }
}
