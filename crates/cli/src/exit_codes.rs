//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | CLI usage error (bad args, unreadable config)   |
//! | 3    | Schema error (required column missing)          |
//! | 4    | Ingestion failure (unreadable or corrupt file)  |
//! | 5    | Invalid config (parse, validation, template)    |
//! | 6    | Output write failure                            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use adcheck_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// An input table lacks a required column.
pub const EXIT_SCHEMA: u8 = 3;

/// An input file could not be read or parsed.
pub const EXIT_INGEST: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Result could not be written.
pub const EXIT_OUTPUT: u8 = 6;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::MissingColumn { .. } => EXIT_SCHEMA,
        ReconError::ConfigParse(_)
        | ReconError::ConfigValidation(_)
        | ReconError::InvalidTemplate { .. } => EXIT_INVALID_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcheck_recon::TableKind;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_SCHEMA,
            EXIT_INGEST,
            EXIT_INVALID_CONFIG,
            EXIT_OUTPUT,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn recon_errors_map() {
        let schema = ReconError::MissingColumn {
            table: TableKind::AdGroups,
            column: "Ad state".into(),
        };
        assert_eq!(recon_exit_code(&schema), EXIT_SCHEMA);
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_INVALID_CONFIG);
    }
}
