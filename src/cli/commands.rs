//! Command implementations for the modns CLI
//!
//! All commands return `CliResult<ExitCode>` and never call `process::exit`.

use std::fmt::Write as _;
use std::path::Path;

use modns_core::errors::{ABSENT_DISPLAY, ROOT_DISPLAY};

use super::{CliError, CliResult, ExitCode};
use crate::config::ResolverConfig;
use crate::namespace::{Resolved, Resolver, router};
use crate::registry::Registry;

/// Resolve a dotted path under `root` and print the outcome.
pub fn resolve_path(root: &Path, path: &str, config: ResolverConfig) -> CliResult<ExitCode> {
    warn_missing_root(root);
    let ns = Resolver::new().with_config(config).open(root);
    let resolved = ns.lookup(path).map_err(CliError::diagnostic)?;
    println!("{}", render(&resolved)?);
    Ok(ExitCode::SUCCESS)
}

/// Print the registry keys found under `root`, one per line.
pub fn scan_root(root: &Path, config: ResolverConfig) -> CliResult<ExitCode> {
    warn_missing_root(root);
    let registry = Registry::scan(Some(root), &config);
    for entry in registry.entries() {
        println!("{}", entry.key);
    }
    tracing::info!("{} module file(s) under {}", registry.len(), root.display());
    Ok(ExitCode::SUCCESS)
}

/// Render a resolution outcome for display.
///
/// Unbound nodes print as `namespace <path>`, bound nodes as `module <path> -> <file>` followed by the
/// names their exports answer to, values as pretty JSON.
pub fn render(resolved: &Resolved) -> CliResult<String> {
    match resolved {
        Resolved::Node(node) => {
            let path = node.logical_path();
            let path = if path.is_empty() { ROOT_DISPLAY.to_string() } else { path };
            let Some(unit) = node.unit() else {
                return Ok(format!("namespace {path}"));
            };

            let mut out = format!("module {path}");
            if let Some(source) = unit.source() {
                let _ = write!(out, " -> {}", source.display());
            }
            for name in router::exports(unit) {
                let _ = write!(out, "\n  {name}");
            }
            Ok(out)
        }
        Resolved::Value(value) => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::failure(format!("Cannot render value: {}", e))),
        Resolved::Absent => Ok(ABSENT_DISPLAY.to_string()),
    }
}

fn warn_missing_root(root: &Path) {
    if !root.is_dir() {
        tracing::warn!("{} is not a directory; nothing will resolve", root.display());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_render_absent_and_value() {
        assert_eq!(render(&Resolved::Absent).unwrap(), "<absent>");
        assert_eq!(render(&Resolved::Value(json!("x"))).unwrap(), "\"x\"");
    }

    #[test]
    fn test_render_nodes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ui")).unwrap();
        fs::write(
            dir.path().join("ui/button.json"),
            r#"{"definitions": {"size": 1}, "operations": {"click": 0}}"#,
        )
        .unwrap();

        let ns = Resolver::new().open(dir.path());
        assert_eq!(render(&Resolved::Node(ns.clone())).unwrap(), "namespace <root>");
        assert_eq!(render(&ns.lookup("ui").unwrap()).unwrap(), "namespace ui");

        let module = render(&ns.lookup("ui.button").unwrap()).unwrap();
        let file = dir.path().join("ui/button.json");
        assert_eq!(module, format!("module ui.button -> {}\n  Size\n  click", file.display()));
    }

    #[test]
    fn test_resolve_path_reports_collision() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["a/b.json", "x/a/b.json"] {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "{}").unwrap();
        }
        let err = resolve_path(dir.path(), "a.b", ResolverConfig::default()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("collision"));
    }
}
