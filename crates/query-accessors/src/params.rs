//! Read-only access to decoded query parameters.
//!
//! The hosting framework decodes the query string; this crate only looks
//! values up by name.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A key→string mapping of decoded query parameters.
pub trait QueryParams {
    /// The raw value for `name`, or `None` if the parameter is absent.
    fn get_param(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> QueryParams for HashMap<String, String, S> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Ordered pairs as most frameworks expose them. A repeated key yields its
/// last value.
impl<K: AsRef<str>, V: AsRef<str>> QueryParams for [(K, V)] {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryParams for Vec<(K, V)> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.as_slice().get_param(name)
    }
}

impl<T: QueryParams + ?Sized> QueryParams for &T {
    fn get_param(&self, name: &str) -> Option<&str> {
        (**self).get_param(name)
    }
}
