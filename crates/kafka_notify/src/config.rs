use std::env;

pub const KEY_OPEN: &str = "open-kafka";
pub const KEY_SERVER: &str = "kafka_server";
pub const KEY_AUTH: &str = "kafka_auth";
pub const KEY_SASL_MECHANISM: &str = "kafka_sasl_mechanism";
pub const KEY_USERNAME: &str = "kafka_username";
pub const KEY_PASSWORD: &str = "kafka_password";
pub const KEY_TLS: &str = "kafka_tls";
pub const KEY_TOPIC: &str = "kafka_topic";
pub const KEY_KEY: &str = "kafka_key";
pub const KEY_MESSAGE_TIMEOUT_MS: &str = "kafka_message_timeout_ms";

/// SASL credentials, copied verbatim from configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct SaslSettings {
    pub mechanism: String,
    pub username: String,
    pub password: String,
    pub tls: bool,
}

// keep the password out of logs
impl std::fmt::Debug for SaslSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaslSettings")
            .field("mechanism", &self.mechanism)
            .field("username", &self.username)
            .field("password", &"***")
            .field("tls", &self.tls)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KafkaSettings {
    pub enabled: bool,
    pub brokers: Vec<String>,
    /// `Some` only when `kafka_auth` is "1".
    pub sasl: Option<SaslSettings>,
    pub topic: String,
    pub key_prefix: String,
    pub message_timeout_ms: Option<String>,
}

/// Only the literal "1" turns a flag on.
fn flag_on(v: &str) -> bool {
    v == "1"
}

/// Split a broker string on commas (when it has any) and trim each address.
pub fn parse_brokers(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = if raw.contains(',') {
        raw.split(',').collect()
    } else {
        vec![raw]
    };

    parts
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Environment variable holding a config key: `open-kafka` -> `OPEN_KAFKA`.
pub fn env_var_name(key: &str) -> String {
    key.replace('-', "_").to_uppercase()
}

impl KafkaSettings {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        let sasl = if flag_on(&get(KEY_AUTH)) {
            Some(SaslSettings {
                mechanism: get(KEY_SASL_MECHANISM),
                username: get(KEY_USERNAME),
                password: get(KEY_PASSWORD),
                tls: flag_on(&get(KEY_TLS)),
            })
        } else {
            None
        };

        let message_timeout_ms = lookup(KEY_MESSAGE_TIMEOUT_MS)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        KafkaSettings {
            enabled: flag_on(&get(KEY_OPEN)),
            brokers: parse_brokers(&get(KEY_SERVER)),
            sasl,
            topic: get(KEY_TOPIC),
            key_prefix: get(KEY_KEY),
            message_timeout_ms,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(env_var_name(key)).ok())
    }

    /// `<prefix>-<logsign>`
    pub fn message_key(&self, logsign: &str) -> String {
        format!("{}-{}", self.key_prefix, logsign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> KafkaSettings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        KafkaSettings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_parse_brokers_trims_each_entry() {
        let brokers = parse_brokers(" a:9092 ,b:9092,  c:9092 ");
        assert_eq!(brokers, vec!["a:9092", "b:9092", "c:9092"]);
    }

    #[test]
    fn test_parse_brokers_single_without_comma() {
        assert_eq!(parse_brokers("  localhost:9092 "), vec!["localhost:9092"]);
    }

    #[test]
    fn test_parse_brokers_drops_empty_entries() {
        assert_eq!(parse_brokers("a:9092,,b:9092"), vec!["a:9092", "b:9092"]);
        assert_eq!(parse_brokers("a:9092, ,b:9092,"), vec!["a:9092", "b:9092"]);
    }

    #[test]
    fn test_parse_brokers_empty() {
        assert!(parse_brokers("").is_empty());
        assert!(parse_brokers(" , ").is_empty());
    }

    #[test]
    fn test_only_literal_one_enables() {
        for v in ["0", "", "yes", "true", " 1", "01"] {
            let s = settings(&[(KEY_OPEN, v), (KEY_AUTH, v)]);
            assert!(!s.enabled, "open-kafka={v:?} must stay disabled");
            assert!(s.sasl.is_none(), "kafka_auth={v:?} must stay off");
        }
        assert!(settings(&[(KEY_OPEN, "1")]).enabled);
    }

    #[test]
    fn test_auth_without_tls() {
        let s = settings(&[
            (KEY_AUTH, "1"),
            (KEY_SASL_MECHANISM, "SCRAM-SHA-256"),
            (KEY_USERNAME, "producer"),
            (KEY_PASSWORD, "secret"),
            (KEY_TLS, "0"),
        ]);
        let sasl = s.sasl.expect("sasl settings");
        assert_eq!(sasl.mechanism, "SCRAM-SHA-256");
        assert_eq!(sasl.username, "producer");
        assert_eq!(sasl.password, "secret");
        assert!(!sasl.tls);
    }

    #[test]
    fn test_tls_ignored_without_auth() {
        let s = settings(&[(KEY_AUTH, "0"), (KEY_TLS, "1")]);
        assert!(s.sasl.is_none());
    }

    #[test]
    fn test_missing_values_default_to_empty() {
        let s = settings(&[(KEY_AUTH, "1")]);
        let sasl = s.sasl.unwrap();
        assert_eq!(sasl.mechanism, "");
        assert_eq!(sasl.username, "");
        assert_eq!(s.topic, "");
        assert_eq!(s.message_timeout_ms, None);
    }

    #[test]
    fn test_message_key() {
        let s = settings(&[(KEY_KEY, "k")]);
        assert_eq!(s.message_key("req42"), "k-req42");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name(KEY_OPEN), "OPEN_KAFKA");
        assert_eq!(env_var_name(KEY_SASL_MECHANISM), "KAFKA_SASL_MECHANISM");
    }

    #[test]
    fn test_debug_hides_password() {
        let s = settings(&[(KEY_AUTH, "1"), (KEY_PASSWORD, "hunter2")]);
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
