//! Shared user-facing messages used by resolver errors and the CLI.
//!
//! Kept here so library diagnostics and command output stay aligned.

/// Help text attached to collision diagnostics.
pub const COLLISION_HELP: &str =
    "rename or move one of the files, or address the module with more leading segments so exactly one file matches";

/// Help text attached to errors raised when navigating past a member value.
pub const NOT_A_NAMESPACE_HELP: &str =
    "only namespace nodes can be navigated further; member values and absent members are terminal";

/// Placeholder printed for an absent member.
pub const ABSENT_DISPLAY: &str = "<absent>";

/// Placeholder printed for the empty logical path of a root node.
pub const ROOT_DISPLAY: &str = "<root>";
