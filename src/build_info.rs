//! Commit and date stamped in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `shark-runner <version> (<date>, <commit>)`
pub fn version_line() -> String {
    format!(
        "shark-runner {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stamps_present() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_mentions_everything() {
        let line = version_line();
        assert!(line.starts_with("shark-runner "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.contains(BUILD_DATE));
    }
}
