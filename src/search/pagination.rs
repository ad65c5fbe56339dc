//! Page number and page size resolution

use crate::config::SearchSettings;

/// Resolved page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, 1-indexed
    pub page: u32,
    /// Results per page
    pub per_page: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;

    /// Resolve raw request options. Missing or invalid values fall back to
    /// defaults; page sizes above the configured maximum are clamped.
    pub fn resolve(page: Option<&str>, per_page: Option<&str>, settings: &SearchSettings) -> Self {
        let page = parse_positive(page).unwrap_or(Self::DEFAULT_PAGE);
        let per_page = parse_positive(per_page)
            .unwrap_or(settings.default_per_page)
            .min(settings.max_per_page.max(1));

        Self { page, per_page }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::resolve(None, None, &SearchSettings::default())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&v| v >= 1)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(page: Option<&str>, per_page: Option<&str>) -> Pagination {
        Pagination::resolve(page, per_page, &SearchSettings::default())
    }

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(resolve(None, None), Pagination { page: 1, per_page: 20 });
        assert_eq!(Pagination::default(), resolve(None, None));
    }

    #[test]
    fn test_invalid_values_coerced() {
        assert_eq!(resolve(Some("0"), Some("-5")), Pagination { page: 1, per_page: 20 });
        assert_eq!(resolve(Some("abc"), Some("")), Pagination { page: 1, per_page: 20 });
    }

    #[test]
    fn test_explicit_values() {
        assert_eq!(resolve(Some("3"), Some(" 10 ")), Pagination { page: 3, per_page: 10 });
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        let settings = SearchSettings {
            max_per_page: 50,
            ..Default::default()
        };
        let pagination = Pagination::resolve(Some("2"), Some("500"), &settings);
        assert_eq!(pagination, Pagination { page: 2, per_page: 50 });
    }
}
