//! Localization capability.

/// Label translation supplied by the host.
///
/// `translate` returns `None` when the key has no translation in the given
/// catalog. Some hosts return the key itself instead of a miss; callers that
/// care (the tab-title fallback chain) must treat a result equal to the key
/// as "no translation".
pub trait Localizer {
    /// Resolves `key` in `catalog`, or `None` when untranslated.
    fn translate(&self, key: &str, catalog: &str) -> Option<String>;
}

/// A [`Localizer`] with no catalogs; every lookup misses. Useful during
/// bootstrap and in tests exercising the fallback chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn translate(&self, _key: &str, _catalog: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_localization_always_misses() {
        assert_eq!(NoLocalization.translate("any.key", "any_ext"), None);
    }
}
