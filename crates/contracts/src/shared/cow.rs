//! Copy-on-write map updates
//!
//! Widget values are trees of `BTreeMap<String, Rc<_>>`. Every change builds
//! a new outer map whose untouched entries point at the same `Rc` as before,
//! so equality/pointer based memoization in the UI stays valid.

use std::collections::BTreeMap;
use std::rc::Rc;

/// Map whose values are shared between successive versions
pub type SharedMap<V> = BTreeMap<String, Rc<V>>;

/// Returns a new map where `key` holds `f(previous)`.
///
/// `f` receives the previous value (if any) and returns the replacement;
/// returning `None` removes the key. All other entries share their
/// allocation with `map`.
pub fn update_at<V>(
    map: &SharedMap<V>,
    key: &str,
    f: impl FnOnce(Option<&V>) -> Option<V>,
) -> SharedMap<V> {
    let mut next = map.clone();
    match f(map.get(key).map(|v| v.as_ref())) {
        Some(value) => {
            next.insert(key.to_string(), Rc::new(value));
        }
        None => {
            next.remove(key);
        }
    }
    next
}
