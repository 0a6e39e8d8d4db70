pub mod config;
pub mod kafka;
pub mod outcome;
pub mod publish;

pub use config::{KafkaSettings, SaslSettings};
pub use kafka::{OutboundMessage, client_config, create_producer};
pub use outcome::{DISABLED_MESSAGE, FailureKind, PublishOutcome};
pub use publish::{publish, send_kafka};
