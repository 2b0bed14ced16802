//! Storage-provider detection from URI schemes.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParamError;
use crate::params::types::Provider;

// Schemes are capped at 30 characters; no IANA-registered scheme is longer.
static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

fn scheme_regex() -> &'static Regex {
    SCHEME_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]{0,29})://").expect("SCHEME_REGEX is valid")
    })
}

/// Classify the storage provider owning a URI.
///
/// `gs://` is cloud object storage and `file://` the local filesystem. A URI
/// without a scheme is assumed local; availability of the file or directory
/// is checked later, by whatever does the transfer. Any other
/// recognizable-looking scheme is rejected.
pub fn detect_provider(uri: &str) -> Result<Provider, ParamError> {
    let scheme = match scheme_regex().captures(uri) {
        Some(caps) => caps[1].to_lowercase(),
        None => "file".to_string(),
    };

    match scheme.as_str() {
        "gs" => Ok(Provider::CloudStorage),
        "file" => Ok(Provider::Local),
        other => Err(ParamError::UnsupportedProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cloud_storage() {
        assert_eq!(
            detect_provider("gs://bucket/obj.txt").unwrap(),
            Provider::CloudStorage
        );
        assert_eq!(
            detect_provider("GS://bucket/obj.txt").unwrap(),
            Provider::CloudStorage
        );
    }

    #[test]
    fn detects_local() {
        assert_eq!(detect_provider("file:///tmp/x").unwrap(), Provider::Local);
        assert_eq!(detect_provider("file:/tmp/x").unwrap(), Provider::Local);
        assert_eq!(detect_provider("/tmp/x").unwrap(), Provider::Local);
        assert_eq!(detect_provider("relative/path.txt").unwrap(), Provider::Local);
        assert_eq!(detect_provider("~/data/*.bam").unwrap(), Provider::Local);
    }

    #[test]
    fn rejects_unknown_schemes() {
        for uri in ["s3://bucket/x", "http://example.com/f", "gs+web://x/y"] {
            assert!(matches!(
                detect_provider(uri),
                Err(ParamError::UnsupportedProvider(_))
            ));
        }
    }

    #[test]
    fn overlong_scheme_is_not_a_scheme() {
        // 31 letters before :// exceeds the scheme cap, so the token is
        // treated as a local path (and the policy checker gets to object).
        let uri = format!("{}://x", "a".repeat(31));
        assert_eq!(detect_provider(&uri).unwrap(), Provider::Local);
    }
}
