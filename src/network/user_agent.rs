//! User agent generation

use rand::seq::SliceRandom;

const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0";

/// Generate a random but realistic user agent string
pub fn generate_user_agent() -> String {
    let mut rng = rand::thread_rng();

    let firefox_versions = ["121.0", "122.0", "123.0", "124.0", "125.0"];

    let os_strings = [
        "Windows NT 10.0; Win64; x64",
        "Macintosh; Intel Mac OS X 14_2_1",
        "X11; Linux x86_64",
    ];

    match (os_strings.choose(&mut rng), firefox_versions.choose(&mut rng)) {
        (Some(os), Some(firefox)) => format!(
            "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
            os, firefox, firefox
        ),
        _ => FALLBACK_USER_AGENT.to_string(),
    }
}

/// Standard accept headers for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_user_agent() {
        let ua = generate_user_agent();
        assert!(ua.starts_with("Mozilla/5.0"));
        assert!(ua.contains("Firefox/"));
    }
}
