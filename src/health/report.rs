// src/health/report.rs
use std::fmt;

/// Outcome of one health evaluation, rendered as the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub healthy: bool,
    pub version: String,
    /// Detail of the first failing probe, if any.
    pub error: Option<String>,
}

impl HealthReport {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "healthy:{}\nversion:{}\n", self.healthy, self.version)?;
        if let Some(error) = &self.error {
            write!(f, "\nError: {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_healthy() {
        let report = HealthReport {
            healthy: true,
            version: "17.06.0-ce-rc4".to_string(),
            error: None,
        };
        assert_eq!(report.render(), "healthy:true\nversion:17.06.0-ce-rc4\n");
    }

    #[test]
    fn test_render_unhealthy_appends_error_block() {
        let report = HealthReport {
            healthy: false,
            version: "error:daemon not running".to_string(),
            error: Some("command failed (exit status: 1): boom".to_string()),
        };
        assert_eq!(
            report.render(),
            "healthy:false\nversion:error:daemon not running\n\nError: command failed (exit status: 1): boom"
        );
    }
}
