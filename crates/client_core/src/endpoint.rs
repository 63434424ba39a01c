use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid API base url '{raw}': {source}")]
    Parse {
        raw: String,
        source: url::ParseError,
    },
    #[error("API base url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("API base url '{0}' cannot carry path segments")]
    CannotBeABase(String),
    #[error("username '{0}' is a dot segment and cannot be addressed as a path segment")]
    DotSegment(String),
}

/// Root of the user-information API. Lookups are resolved against it as
/// `{base}/users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let base = Url::parse(raw).map_err(|source| EndpointError::Parse {
            raw: raw.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(EndpointError::CannotBeABase(raw.to_string()));
        }
        if !matches!(base.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(raw.to_string()));
        }
        Ok(Self { base })
    }

    pub fn github() -> Result<Self, EndpointError> {
        Self::parse(DEFAULT_API_BASE_URL)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the lookup URL for `username`. The username is pushed as a single
    /// percent-encoded path segment, so `/`, `?` and `#` cannot escape it.
    ///
    /// `.` and `..` are refused: URL parsing removes them as dot segments
    /// (including their `%2e` spellings), which would address `{base}/users`.
    pub fn user_url(&self, username: &str) -> Result<Url, EndpointError> {
        if matches!(username, "." | "..") {
            return Err(EndpointError::DotSegment(username.to_string()));
        }
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| EndpointError::CannotBeABase(self.base.to_string()))?
            .pop_if_empty()
            .push("users")
            .push(username);
        Ok(url)
    }
}
