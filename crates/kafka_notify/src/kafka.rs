use anyhow::{Result, anyhow};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::Duration;

use crate::config::KafkaSettings;

/// librdkafka's sarama-compatible hash partitioner (FNV-1a on the key).
const PARTITIONER: &str = "fnv1a_random";

/// Used when auth is on but no mechanism is configured. librdkafka would
/// otherwise fall back to GSSAPI.
const DEFAULT_SASL_MECHANISM: &str = "PLAIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: String,
    pub key: String,
    pub value: String,
}

impl OutboundMessage {
    pub fn new(settings: &KafkaSettings, message: &str, logsign: &str) -> Self {
        Self {
            topic: settings.topic.clone(),
            key: settings.message_key(logsign),
            value: message.to_string(),
        }
    }
}

fn security_protocol(settings: &KafkaSettings) -> &'static str {
    match &settings.sasl {
        Some(sasl) if sasl.tls => "sasl_ssl",
        Some(_) => "sasl_plaintext",
        None => "plaintext",
    }
}

pub fn client_config(settings: &KafkaSettings) -> ClientConfig {
    let mut cfg = ClientConfig::new();
    cfg.set("bootstrap.servers", settings.brokers.join(","))
        .set("acks", "all")
        .set("partitioner", PARTITIONER)
        .set("security.protocol", security_protocol(settings));

    if let Some(sasl) = &settings.sasl {
        let mechanism = if sasl.mechanism.is_empty() {
            DEFAULT_SASL_MECHANISM
        } else {
            sasl.mechanism.as_str()
        };
        cfg.set("sasl.mechanism", mechanism)
            .set("sasl.username", &sasl.username)
            .set("sasl.password", &sasl.password);
    }

    if let Some(ms) = &settings.message_timeout_ms {
        cfg.set("message.timeout.ms", ms);
    }

    cfg
}

pub fn create_producer(settings: &KafkaSettings) -> Result<FutureProducer> {
    if settings.brokers.is_empty() {
        return Err(anyhow!("kafka_server is empty"));
    }
    let producer: FutureProducer = client_config(settings).create()?;
    Ok(producer)
}

/// Waits for the broker ack; returns (partition, offset).
pub async fn send_message(producer: &FutureProducer, msg: &OutboundMessage) -> Result<(i32, i64)> {
    let record = FutureRecord::<str, str>::to(&msg.topic)
        .key(&msg.key)
        .payload(&msg.value);

    match producer.send(record, Duration::from_secs(0)).await {
        Ok((partition, offset)) => Ok((partition, offset)),
        Err((e, _)) => Err(e.into()),
    }
}
