//! Status and confirmation messages.

use std::fmt;

/// Confirmation or failure line for operations without a richer result.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Pushed to GitHub".to_string());
        assert_eq!(success.to_string(), "Success: Pushed to GitHub\n");

        let failure = OperationStatus::failure("Model hub unavailable".to_string());
        assert!(failure.to_string().starts_with("Error:"));
    }
}
