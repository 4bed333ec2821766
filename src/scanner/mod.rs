pub mod intern;
pub mod lexer;
pub mod token;

use crate::error::Diagnostics;
use token::Token;

/// Scan source code into a token list plus the diagnostics of the scan.
/// The token list always ends with a single `Eof` token; malformed lexemes
/// are reported and skipped rather than aborting the scan.
pub fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
    lexer::scan_all(source)
}
