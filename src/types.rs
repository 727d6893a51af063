//! Shared types used across the codebase

/// Operations exposed for every resource
/// Used by the handlers for logging and failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Client-facing message for an unexpected failure, e.g. "Error creating product"
    pub fn failure_message(&self, singular: &str, plural: &str) -> String {
        match self {
            Operation::List => format!("Error retrieving {}", plural),
            Operation::Get => format!("Error fetching {}", singular),
            Operation::Create => format!("Error creating {}", singular),
            Operation::Update => format!("Error updating {}", singular),
            Operation::Delete => format!("Error deleting {}", singular),
        }
    }
}
