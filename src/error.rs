use thiserror::Error;

#[derive(Debug, Error)]
pub enum KakaoError {
    #[error("REST API key not configured. Run 'kakao config set auth.rest_api_key YOUR_KEY' or set KAKAO_REST_API_KEY.")]
    NoApiKey,

    #[error("Unsupported sorting order: {0}")]
    UnsupportedSortingOrder(String),

    #[error("Page {page} is out of bound (allowed 1..={max})")]
    PageOutOfBound { page: u32, max: u32 },

    #[error("Page size {size} is out of bound (allowed 1..={max})")]
    SizeOutOfBound { size: u32, max: u32 },

    #[error("Radius {0}m is out of bound (allowed 0..=20000)")]
    RadiusOutOfBound(u32),

    #[error("Unsupported category group code: {0}")]
    UnsupportedCategory(String),

    #[error("Unsupported coordinate system: {0}")]
    UnsupportedCoordSystem(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported search target: {0}")]
    UnsupportedTarget(String),

    #[error("Unsupported analyze type: {0}")]
    UnsupportedAnalyzeType(String),

    #[error("Unsupported response format: {0}")]
    UnsupportedFormat(String),

    #[error("Threshold {0} is out of bound (allowed 0.1..=1.0)")]
    ThresholdOutOfBound(f32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No more pages")]
    EndOfPages,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    ApiError {
        code: String,
        message: String,
        hint: Option<String>,
    },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(String),
}

impl KakaoError {
    /// Create an API error with an optional hint
    pub fn api_error(code: impl Into<String>, message: impl Into<String>, hint: Option<String>) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
            hint,
        }
    }

    /// Errors raised while configuring a builder, before any request is made
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSortingOrder(_)
                | Self::PageOutOfBound { .. }
                | Self::SizeOutOfBound { .. }
                | Self::RadiusOutOfBound(_)
                | Self::UnsupportedCategory(_)
                | Self::UnsupportedCoordSystem(_)
                | Self::UnsupportedLanguage(_)
                | Self::UnsupportedTarget(_)
                | Self::UnsupportedAnalyzeType(_)
                | Self::UnsupportedFormat(_)
                | Self::ThresholdOutOfBound(_)
                | Self::InvalidInput(_)
        )
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoApiKey => Some(
                "Create an application at https://developers.kakao.com and copy its REST API key."
                    .to_string(),
            ),
            Self::ApiError { hint, .. } => hint.clone(),
            Self::Network(_) => Some("Check your internet connection and try again.".to_string()),
            Self::RateLimit => Some("The daily quota may be used up. Please wait a moment.".to_string()),
            Self::EndOfPages => Some("All available pages have been fetched.".to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KakaoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        assert!(KakaoError::PageOutOfBound { page: 0, max: 50 }.is_config_error());
        assert!(KakaoError::UnsupportedSortingOrder("latest".into()).is_config_error());
        assert!(!KakaoError::EndOfPages.is_config_error());
        assert!(!KakaoError::RateLimit.is_config_error());
    }

    #[test]
    fn test_out_of_bound_messages() {
        let err = KakaoError::SizeOutOfBound { size: 81, max: 80 };
        assert_eq!(err.to_string(), "Page size 81 is out of bound (allowed 1..=80)");
    }

    #[test]
    fn test_api_error_keeps_hint() {
        let err = KakaoError::api_error("401", "cannot find appKey", Some("check key".into()));
        assert_eq!(err.hint().as_deref(), Some("check key"));
        assert!(err.to_string().contains("cannot find appKey"));
    }
}
