use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Origins allowed to call the API from a browser.
///
/// Read from `ALLOWED_ORIGINS` as a comma separated list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::parse(DEFAULT_ALLOWED_ORIGINS)
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        env::var("ALLOWED_ORIGINS")
            .map(|origins| Self::parse(&origins))
            .unwrap_or_default()
    }

    fn parse(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_empty_entries() {
        let config = CorsConfig::parse(" https://a.example , ,https://b.example,");
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::default();
        assert_eq!(config.allowed_origins.len(), 2);
    }
}
