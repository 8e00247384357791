//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Description                                       |
//! |------|---------------------------------------------------|
//! | 0    | Success: every compared field matched or blank    |
//! | 1    | General error (unspecified)                       |
//! | 2    | CLI usage error (bad args; issued by clap)        |
//! | 3    | Field mismatches found                            |
//! | 4    | Unmatched extract rows (and no mismatches)        |
//! | 5    | Invalid mapping config                            |
//! | 6    | Runtime failure (unreadable input, bad JSON/CSV)  |

/// Field mismatches found. Like `diff(1)`, a nonzero code means "the two
/// sides differ."
pub const EXIT_MISMATCH: u8 = 3;

/// Extract rows with no resolvable truth record, without any field
/// mismatch. Softer than a mismatch: nothing contradicts, data is missing.
pub const EXIT_UNMATCHED: u8 = 4;

/// Mapping config failed to parse or validate.
pub const EXIT_INVALID_MAPPING: u8 = 5;

/// IO or input parse failure.
pub const EXIT_RUNTIME: u8 = 6;
