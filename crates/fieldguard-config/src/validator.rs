//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Settle delays above this are flagged.
const SETTLE_WARN_MS: u64 = 10_000;

/// Shortest selector bound that still fits a form prefix and a field part.
const MIN_SELECTOR_LEN: usize = 16;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_scan(config, &mut result);
        Self::validate_risk(config, &mut result);
        Self::validate_providers(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.trim().is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_scan(config: &Config, result: &mut ValidationResult) {
        let scan = &config.scan;

        if scan.page_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "scan.page_timeout_ms",
                "page_timeout_ms must be greater than 0",
            ));
        }

        if scan.frame_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "scan.frame_timeout_ms",
                "frame_timeout_ms must be greater than 0",
            ));
        }

        if scan.frame_timeout_ms > scan.page_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "scan.frame_timeout_ms",
                "frame_timeout_ms exceeds page_timeout_ms",
            ));
        }

        if scan.selector_max_len < MIN_SELECTOR_LEN {
            result.add_error(ValidationError::new(
                "scan.selector_max_len",
                format!("selector_max_len must be at least {}", MIN_SELECTOR_LEN),
            ));
        }

        for (path, value) in [
            ("scan.settle_medium_ms", scan.settle_medium_ms),
            ("scan.settle_advanced_ms", scan.settle_advanced_ms),
        ] {
            if value > SETTLE_WARN_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("settle delay is very high (>{} ms), scans will be slow", SETTLE_WARN_MS),
                ));
            }
        }
    }

    fn validate_risk(config: &Config, result: &mut ValidationResult) {
        let risk = &config.scan.risk;

        if risk.medium_at == 0 {
            result.add_error(ValidationError::new(
                "scan.risk.medium_at",
                "medium_at must be greater than 0, zero findings are always low risk",
            ));
        }

        if risk.medium_at >= risk.high_at {
            result.add_error(ValidationError::new(
                "scan.risk.high_at",
                format!(
                    "high_at ({}) must be greater than medium_at ({})",
                    risk.high_at, risk.medium_at
                ),
            ));
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        if config.fetch.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "fetch.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if config.fetch.max_body_bytes == 0 {
            result.add_error(ValidationError::new(
                "fetch.max_body_bytes",
                "max_body_bytes must be greater than 0",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "viewport dimensions must be greater than 0",
            ));
        }

        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "debug_port cannot be 0",
            ));
        }

        if let Some(path) = &config.browser.chrome_path {
            let expanded = shellexpand::tilde(path);
            if !std::path::Path::new(expanded.as_ref()).exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {}", path),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
