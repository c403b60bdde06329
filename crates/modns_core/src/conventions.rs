//! Shared resolver conventions (well-known names).

/// Module file extension recognized by default, without the leading dot.
pub const DEFAULT_EXTENSION: &str = "json";

/// File stem of a directory-style module (`widgets/index.json` backs `widgets`).
pub const INDEX_STEM: &str = "index";

/// Prefix marking an access into the utilities bucket (`_helper` reads `utilities.helper`).
pub const UTILITY_PREFIX: char = '_';

/// Separator used inside normalized registry keys, regardless of platform.
pub const KEY_SEPARATOR: char = '/';

/// Separator accepted by the dotted logical-path form (`app.widgets.Button`).
pub const LOGICAL_SEPARATOR: char = '.';

/// Bucket key holding the operations of a backing unit.
pub const OPERATIONS_KEY: &str = "operations";

/// Bucket key holding the definitions of a backing unit.
pub const DEFINITIONS_KEY: &str = "definitions";

/// Bucket key holding the utilities of a backing unit.
pub const UTILITIES_KEY: &str = "utilities";
