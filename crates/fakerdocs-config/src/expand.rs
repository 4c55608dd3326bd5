//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` in a URL or
/// path survives. `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("localhost", "server.host").unwrap(), "localhost");
    }

    #[test]
    fn test_expand_default_when_unset() {
        let value = expand_env("${FAKERDOCS_TEST_SURELY_UNSET:-0.0.0.0}", "server.host").unwrap();
        assert_eq!(value, "0.0.0.0");
    }

    #[test]
    fn test_expand_embedded_var_with_default() {
        let value = expand_env(
            "https://${FAKERDOCS_TEST_SURELY_UNSET:-github.com}/faker-api",
            "site.repository_url",
        )
        .unwrap();
        assert_eq!(value, "https://github.com/faker-api");
    }

    #[test]
    fn test_expand_missing_var_reports_field() {
        let err = expand_env("${FAKERDOCS_TEST_SURELY_UNSET}", "site.repository_url").unwrap_err();
        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "site.repository_url");
                assert_eq!(message, "${FAKERDOCS_TEST_SURELY_UNSET} not set");
            }
            other => panic!("Expected EnvVar error, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("$VAR", "theme.store_path").unwrap();
        assert_eq!(result, "$VAR");
    }

    #[test]
    fn test_url_with_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "site.repository_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
