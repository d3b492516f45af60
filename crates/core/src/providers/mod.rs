pub mod traits;

// Rate provider implementations
pub mod fixed;
pub mod frankfurter;
