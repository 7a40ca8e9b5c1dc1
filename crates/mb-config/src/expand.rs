//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `${VAR}` errors when the variable is unset; `${VAR:-default}` falls back
/// to the default. `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::env_with_context(value, |name: &str| {
        if let Some((var, default)) = name.split_once(":-") {
            let resolved = std::env::var(var).unwrap_or_else(|_| default.to_owned());
            return Ok(Some(resolved));
        }
        match std::env::var(name) {
            Ok(resolved) => Ok::<_, String>(Some(resolved)),
            Err(_) => Err(format!("${{{name}}} not set")),
        }
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: err.cause,
    })?;

    Ok(expanded.into_owned())
}
