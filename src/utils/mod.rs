pub mod error;
pub mod logger;
pub mod shared_checks;
pub mod validation;
