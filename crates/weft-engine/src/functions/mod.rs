//! The built-in function library, grouped into modules.
//!
//! Every builtin shares one signature: it receives the interpolator (for
//! token writes, the random stream and nested dispatch) plus the evaluated
//! argument values, and yields `Some` result or `None` for "absent".
//! Absent contributes nothing to the surrounding output, which is how
//! malformed input degrades instead of failing.

pub(crate) mod adapters;
mod boolean;
mod map;
mod math;
mod mutators;
mod string;
mod translation;

use crate::interpolator::Interpolator;
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Uniform signature shared by every builtin.
pub(crate) type BuiltinFn = fn(&mut Interpolator, &[Value]) -> Option<Value>;

pub(crate) struct Module {
    pub(crate) name: &'static str,
    pub(crate) functions: &'static [(&'static str, BuiltinFn)],
}

/// Library modules in registration order. A later module overrides earlier
/// entries with the same name; the `map` module relies on this to shadow
/// the `string` versions of its polymorphic functions.
pub(crate) static MODULES: &[Module] = &[
    math::MODULE,
    boolean::MODULE,
    string::MODULE,
    translation::MODULE,
    map::MODULE,
    mutators::MODULE,
];

/// Build the callable table from the include/exclude sets. Either set may
/// name whole modules or individual functions; an include of `None` means
/// every module. Names are stored lowercase and calls are lowercased before
/// lookup, so dispatch is case-insensitive.
pub(crate) fn table(
    include: Option<&HashSet<String>>,
    exclude: &HashSet<String>,
) -> IndexMap<&'static str, BuiltinFn> {
    let mut table = IndexMap::new();
    for module in MODULES {
        for &(name, function) in module.functions {
            let included = match include {
                None => true,
                Some(set) => set.contains(module.name) || set.contains(name),
            };
            if !included || exclude.contains(module.name) || exclude.contains(name) {
                continue;
            }
            table.insert(name, function);
        }
    }
    table
}
