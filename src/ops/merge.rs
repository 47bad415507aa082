//! Environment merging.

use crate::core::env::{BuildEnvironment, ConfigKey, EnvValue};

/// The keys combined by [`merge`].
pub const MERGE_KEYS: [ConfigKey; 6] = [
    ConfigKey::IncludePath,
    ConfigKey::CompilerFlags,
    ConfigKey::CxxFlags,
    ConfigKey::LibraryPath,
    ConfigKey::Libraries,
    ConfigKey::LinkFlags,
];

/// Merge `source`'s flag lists into `target`.
///
/// For each key in [`MERGE_KEYS`], both values are normalized to lists
/// (a scalar wraps into a single element, an absent key is empty), and
/// every source element not already present in the target is appended in
/// order. The result is written back as a list even where the original
/// value was a scalar. Source values are copied, so mutating `source`
/// afterwards never changes `target`.
///
/// The duplicate scan is linear per element; flag lists are small enough
/// that this never matters.
pub fn merge(target: &mut dyn BuildEnvironment, source: &dyn BuildEnvironment) {
    for key in MERGE_KEYS {
        let mut merged = target.get(key).map(EnvValue::as_list).unwrap_or_default();
        let incoming = source.get(key).map(EnvValue::as_list).unwrap_or_default();

        for item in incoming {
            if !merged.contains(&item) {
                merged.push(item);
            }
        }

        target.set(key, EnvValue::List(merged));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MemoryEnvironment;

    #[test]
    fn test_merge_preserves_order_and_dedups() {
        let mut target = MemoryEnvironment::new();
        target.set(ConfigKey::Libraries, EnvValue::list(["a", "b"]));
        let mut source = MemoryEnvironment::new();
        source.set(ConfigKey::Libraries, EnvValue::list(["b", "c"]));

        merge(&mut target, &source);

        assert_eq!(
            target.get(ConfigKey::Libraries),
            Some(&EnvValue::list(["a", "b", "c"]))
        );
    }

    #[test]
    fn test_merge_normalizes_scalar_to_list() {
        let mut target = MemoryEnvironment::new();
        target.set(ConfigKey::CompilerFlags, EnvValue::scalar("x"));
        let mut source = MemoryEnvironment::new();
        source.set(ConfigKey::CompilerFlags, EnvValue::list(["y"]));

        merge(&mut target, &source);

        assert_eq!(
            target.get(ConfigKey::CompilerFlags),
            Some(&EnvValue::list(["x", "y"]))
        );
    }

    #[test]
    fn test_merge_writes_all_keys_as_lists() {
        let mut target = MemoryEnvironment::new();
        let source = MemoryEnvironment::new();

        merge(&mut target, &source);

        for key in MERGE_KEYS {
            assert_eq!(target.get(key), Some(&EnvValue::List(Vec::new())));
        }
    }

    #[test]
    fn test_merge_never_aliases_source() {
        let mut target = MemoryEnvironment::new();
        let mut source = MemoryEnvironment::new();
        source.set(ConfigKey::IncludePath, EnvValue::list(["/inc"]));

        merge(&mut target, &source);
        source.append(ConfigKey::IncludePath, vec!["/other".to_string()]);

        assert_eq!(
            target.get(ConfigKey::IncludePath),
            Some(&EnvValue::list(["/inc"]))
        );
    }

    #[test]
    fn test_merge_ignores_scalar_shared_keys() {
        let mut target = MemoryEnvironment::new();
        let mut source = MemoryEnvironment::new();
        source.set(ConfigKey::SharedLinkFlags, EnvValue::scalar("-dynamiclib"));

        merge(&mut target, &source);

        assert!(target.get(ConfigKey::SharedLinkFlags).is_none());
    }

    #[test]
    fn test_merge_is_convergent() {
        let mut target = MemoryEnvironment::new();
        let mut source = MemoryEnvironment::new();
        source.set(ConfigKey::LinkFlags, EnvValue::list(["-pthread", "-rdynamic"]));

        merge(&mut target, &source);
        merge(&mut target, &source);

        assert_eq!(
            target.get(ConfigKey::LinkFlags),
            Some(&EnvValue::list(["-pthread", "-rdynamic"]))
        );
    }
}
