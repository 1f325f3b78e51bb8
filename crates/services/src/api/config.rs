use std::env;

use url::Url;

use crate::error::ApiError;

/// Page size used by the history screen when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Where the reading backend lives and how it is paged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    page_size: u32,
}

impl ApiConfig {
    /// Parse a base URL such as `https://api.example.com/prod`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` when `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url.trim())?;
        // `Url::join` replaces the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Read `READING_API_BASE` and `READING_API_PAGE_SIZE`.
    ///
    /// Returns `Ok(None)` when no base URL is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when either variable is set but malformed.
    pub fn from_env() -> Result<Option<Self>, ApiError> {
        let Some(base) = env::var("READING_API_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
        else {
            return Ok(None);
        };
        let mut config = Self::new(&base)?;
        if let Ok(raw) = env::var("READING_API_PAGE_SIZE") {
            config = config.with_page_size(parse_page_size(&raw)?);
        }
        Ok(Some(config))
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Absolute URL for an endpoint name such as `generateReading`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the joined URL is invalid.
    pub fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(name)?)
    }
}

fn parse_page_size(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ApiError::InvalidPageSize(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_the_base_path() {
        let config = ApiConfig::new("https://api.example.com/prod").unwrap();
        assert_eq!(
            config.endpoint("generateReading").unwrap().as_str(),
            "https://api.example.com/prod/generateReading"
        );

        let config = ApiConfig::new("https://api.example.com/").unwrap();
        assert_eq!(
            config.endpoint("submitResult").unwrap().as_str(),
            "https://api.example.com/submitResult"
        );
    }

    #[test]
    fn rejects_relative_base() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn page_size_defaults_and_clamps() {
        let config = ApiConfig::new("https://api.example.com").unwrap();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.with_page_size(0).page_size(), 1);
    }

    #[test]
    fn page_size_must_be_positive() {
        assert_eq!(parse_page_size(" 50 ").unwrap(), 50);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("many").is_err());
    }
}
