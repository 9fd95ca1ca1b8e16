//! Identifier sanitization for Terraform block keys.

use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("static pattern"));

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// Used for module keys, resource keys, database names and SSM parameter keys.
pub fn sanitize_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("my bucket!"), "my_bucket_");
        assert_eq!(
            sanitize_name("/apps/dev/shop/s3/uploads/name"),
            "_apps_dev_shop_s3_uploads_name"
        );
        assert_eq!(sanitize_name("already_safe_01"), "already_safe_01");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        // One underscore per character, not per byte
        assert_eq!(sanitize_name("café"), "caf_");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["my bucket!", "a-b.c/d", "ünïcode", "__x__", "/apps/prod/x/irsa/y/arn"] {
            let once = sanitize_name(input);
            assert_eq!(sanitize_name(&once), once);
        }
    }
}
