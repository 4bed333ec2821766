pub mod error;
pub mod scanner;

// Re-export the common types for convenience
pub use error::{Diagnostics, ScanError};
pub use scanner::token::{Literal, Span, Token, TokenKind};
