//! Rule syntax markers and input limits
//!
//! The rule file is a small hand-edited CSV. These constants define the
//! reserved filter forms and the limits applied while loading it.

/// Filter key whose rules apply to every resource that matched another rule.
pub const CATCH_ALL_KEY: &str = "all";

/// Prefix of filters that match on an existing resource tag.
pub const TAG_FILTER_PREFIX: &str = "tag:";

/// Leading marker for substring (partial) matching.
pub const PARTIAL_MARKER: char = '~';

/// Leading marker for comment rows in the Filter column.
pub const COMMENT_MARKER: char = '#';

/// Required rule file extension (without the dot).
pub const RULE_FILE_EXTENSION: &str = "csv";

/// Rule file column holding the filter expression.
pub const FILTER_COLUMN: &str = "Filter";

/// Rule file column holding the tag key to apply.
pub const TAG_KEY_COLUMN: &str = "TagKey";

/// Rule file column holding the tag value to apply.
pub const TAG_VALUE_COLUMN: &str = "TagValue";

/// Columns every rule file header must contain.
pub const REQUIRED_COLUMNS: [&str; 3] = [FILTER_COLUMN, TAG_KEY_COLUMN, TAG_VALUE_COLUMN];

/// Header written at the top of every plan file.
pub const PLAN_HEADER: [&str; 3] = ["ResourceARN", "TagKey", "TagValue"];

/// Maximum size for rule files (1MB)
///
/// Rule files are small configuration tables. Anything larger is almost
/// certainly the wrong file.
pub const MAX_RULE_FILE_SIZE: u64 = 1_048_576; // 1MB
