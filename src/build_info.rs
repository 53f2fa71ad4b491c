//! Commit hash and build date, baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_shape() {
        // YYYY-MM-DD unless overridden by CI
        assert!(!BUILD_DATE.is_empty());
    }
}
