use crate::error::AppError;

use std::env;

pub const ENV_CONNECTION_STRING: &str = "ACS_CONNECTION_STRING";
pub const ENV_TO_PHONE_NUMBER: &str = "TO_PHONE_NUMBER";
pub const ENV_FROM_PHONE_NUMBER: &str = "FROM_PHONE_NUMBER";
pub const ENV_CALLBACK_URI: &str = "CALLBACK_URI";

/// Process configuration for the call initiators, loaded once at startup
/// and passed by reference into whatever needs it.
#[derive(Clone, Debug)]
pub struct CallConfig {
    pub connection_string: String,
    pub to_phone_number: String,
    pub from_phone_number: String,
    /// Optional at load time: the interactive initiator prompts for it
    /// instead of reading the environment.
    pub callback_uri: Option<String>,
}

impl CallConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Presence-only validation: empty counts as missing, format checks
    /// are the provider's job.  Every missing variable is reported, not
    /// just the first.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut missing = Vec::new();
        let connection_string = required(&lookup, ENV_CONNECTION_STRING, &mut missing);
        let to_phone_number = required(&lookup, ENV_TO_PHONE_NUMBER, &mut missing);
        let from_phone_number = required(&lookup, ENV_FROM_PHONE_NUMBER, &mut missing);
        let callback_uri = lookup(ENV_CALLBACK_URI).filter(|value| !value.is_empty());
        if !missing.is_empty() {
            return Err(AppError::MissingEnv(missing));
        }
        Ok(Self {
            connection_string,
            to_phone_number,
            from_phone_number,
            callback_uri,
        })
    }

    pub fn require_callback_uri(&self) -> Result<&str, AppError> {
        self.callback_uri
            .as_deref()
            .ok_or_else(|| AppError::MissingEnv(vec![ENV_CALLBACK_URI]))
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match lookup(name) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name: &str| map.get(name).map(|value| value.to_string())
    }

    #[test]
    fn full_environment_loads() {
        let config = CallConfig::from_lookup(lookup(&[
            (ENV_CONNECTION_STRING, "endpoint=https://x.example;accesskey=a2V5"),
            (ENV_TO_PHONE_NUMBER, "+15550100"),
            (ENV_FROM_PHONE_NUMBER, "+15550199"),
            (ENV_CALLBACK_URI, "https://hooks.example/api/callbacks"),
        ]))
        .unwrap();
        assert_eq!(config.to_phone_number, "+15550100");
        assert_eq!(
            config.require_callback_uri().unwrap(),
            "https://hooks.example/api/callbacks"
        );
    }

    #[test]
    fn every_missing_variable_is_named() {
        let err = CallConfig::from_lookup(lookup(&[(ENV_TO_PHONE_NUMBER, "+15550100")]))
            .unwrap_err();
        match err {
            AppError::MissingEnv(missing) => {
                assert_eq!(missing, vec![ENV_CONNECTION_STRING, ENV_FROM_PHONE_NUMBER]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = CallConfig::from_lookup(lookup(&[
            (ENV_CONNECTION_STRING, ""),
            (ENV_TO_PHONE_NUMBER, "+15550100"),
            (ENV_FROM_PHONE_NUMBER, "+15550199"),
        ]))
        .unwrap_err();
        match err {
            AppError::MissingEnv(missing) => assert_eq!(missing, vec![ENV_CONNECTION_STRING]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn callback_is_optional_until_required() {
        let config = CallConfig::from_lookup(lookup(&[
            (ENV_CONNECTION_STRING, "endpoint=https://x.example;accesskey=a2V5"),
            (ENV_TO_PHONE_NUMBER, "+15550100"),
            (ENV_FROM_PHONE_NUMBER, "+15550199"),
        ]))
        .unwrap();
        assert!(config.callback_uri.is_none());
        let err = config.require_callback_uri().unwrap_err();
        match err {
            AppError::MissingEnv(missing) => assert_eq!(missing, vec![ENV_CALLBACK_URI]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
