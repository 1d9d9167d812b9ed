use thiserror::Error;

/// Failures while loading, configuring or evaluating sites.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Site data I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Site CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config or report JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model configuration: {0}")]
    Config(String),

    #[error("Site validation error: {0}")]
    Validation(String),
}

pub type SiteResult<T> = Result<T, SiteError>;

/// Rejects NaN and infinities with a named validation error.
pub fn ensure_finite(name: &str, value: f64) -> SiteResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SiteError::Validation(format!(
            "'{}' must be a finite number, got {}",
            name, value
        )))
    }
}
