//! Highlight and expansion keys derived from the current path.

use std::collections::BTreeSet;

/// Key highlighted for the root path.
pub const HOME_KEY: &str = "/home";

/// The entry to highlight for `pathname`. The root path highlights [`HOME_KEY`].
pub fn selected_keys(pathname: &str) -> BTreeSet<String> {
    let key = if pathname == "/" { HOME_KEY } else { pathname };
    BTreeSet::from([key.to_string()])
}

/// Ancestor prefixes of `pathname`, excluding the path itself.
///
/// `/a/b/c` opens `/a` and `/a/b`. Single-segment paths open nothing.
pub fn open_keys(pathname: &str) -> BTreeSet<String> {
    let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

    let mut keys = BTreeSet::new();
    let mut prefix = String::new();
    for segment in segments.iter().take(segments.len().saturating_sub(1)) {
        prefix.push('/');
        prefix.push_str(segment);
        keys.insert(prefix.clone());
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_root_selects_home() {
        assert_eq!(selected_keys("/"), set(&["/home"]));
        assert_eq!(selected_keys("/settings"), set(&["/settings"]));
    }

    #[test]
    fn test_open_keys_are_strict_prefixes() {
        assert_eq!(open_keys("/a/b/c"), set(&["/a", "/a/b"]));
        assert_eq!(open_keys("/system/users"), set(&["/system"]));
        assert!(open_keys("/home").is_empty());
        assert!(open_keys("/").is_empty());
        assert!(open_keys("").is_empty());
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(open_keys("/a/b/"), set(&["/a"]));
    }
}
