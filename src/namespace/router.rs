//! Export routing for bound nodes
//!
//! The spelling of a name picks the bucket it is read from: `Thing` reads `definitions.thing`, `run`
//! reads `operations.run`, `_helper` reads `utilities.helper`, and any other name is read directly
//! on the module. A missing bucket or key is [`Resolved::Absent`], never an error.

use modns_core::naming::{self, Bucket, Route, export_name};

use super::Resolved;
use crate::unit::Unit;

/// Read `name` from `unit` according to the naming convention.
pub fn route(unit: &Unit, name: &str) -> Resolved {
    let found = match naming::route(name) {
        Route::Bucket { bucket, key } => unit.bucket(bucket).and_then(|members| members.get(&*key)),
        Route::Direct(name) => unit.member(name),
    };
    found.cloned().map_or(Resolved::Absent, Resolved::Value)
}

/// Every name that reads a member of `unit`, in bucket order and then key order.
///
/// Bucket members whose key no spelling can reach (an operation named `Run`) are left out, as are
/// top-level members shadowed by the convention (`version` routes to `operations.version`).
pub fn exports(unit: &Unit) -> Vec<String> {
    let mut names = Vec::new();
    for bucket in Bucket::ALL {
        if let Some(members) = unit.bucket(bucket) {
            let mut keys: Vec<&String> = members.keys().collect();
            keys.sort();
            names.extend(keys.into_iter().filter_map(|key| export_name(bucket, key)));
        }
    }

    let mut direct: Vec<&String> = unit
        .members()
        .keys()
        .filter(|key| matches!(naming::route(key), Route::Direct(_)))
        .collect();
    direct.sort();
    names.extend(direct.into_iter().cloned());
    names
}
