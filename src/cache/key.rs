//! Cache Key Module
//!
//! Derives the identity key a render node is cached under.

use crate::vdom::ComponentOptions;

/// Separator between constructor id and tag in fallback keys.
const KEY_SEPARATOR: &str = "::";

// == Key Resolution ==
/// Derives the cache key for a node's construction options.
///
/// An explicit key is used verbatim. Otherwise the key combines the
/// constructor's registration id with the local tag when one is present;
/// the same constructor may be registered under different local tags, so
/// the id alone is not unique enough.
///
/// Pure: reads only the options, touches no cache state.
pub fn resolve_key(options: &ComponentOptions) -> String {
    if let Some(key) = &options.explicit_key {
        return key.clone();
    }
    match &options.tag {
        Some(tag) => format!("{}{}{}", options.ctor_id, KEY_SEPARATOR, tag),
        None => options.ctor_id.to_string(),
    }
}
