use log::{debug, error, info};
use std::time::{Duration, Instant};

use crate::config::KafkaSettings;
use crate::kafka::{self, OutboundMessage};
use crate::outcome::{DISABLED_MESSAGE, FailureKind, PublishOutcome};

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Publish one message and report what happened. Never fails; errors are
/// logged and returned as `PublishOutcome::Failed`.
///
/// The producer lives only for this call and is dropped on every return path.
pub async fn publish(settings: &KafkaSettings, message: &str, logsign: &str) -> PublishOutcome {
    if !settings.enabled {
        info!("{logsign} [kafka] {DISABLED_MESSAGE}");
        return PublishOutcome::Disabled;
    }

    let started = Instant::now();

    let producer = match kafka::create_producer(settings) {
        Ok(p) => p,
        Err(e) => {
            error!("{logsign} [kafka] 创建生产者失败: {e}");
            return PublishOutcome::Failed {
                kind: FailureKind::ProducerCreate,
                message: e.to_string(),
            };
        }
    };

    let msg = OutboundMessage::new(settings, message, logsign);
    let sent = kafka::send_message(&producer, &msg).await;
    let elapsed_ms = elapsed_millis(started.elapsed());
    drop(producer);

    match sent {
        Ok((partition, offset)) => {
            debug!(
                "发送kafka消息: {} 成功, partition: {partition}, offset: {offset}, cost: {elapsed_ms} ms",
                msg.key
            );
            PublishOutcome::Delivered {
                key: msg.key,
                partition,
                offset,
                elapsed_ms,
            }
        }
        Err(e) => {
            error!("{logsign} [kafka] 发送消息失败: {e}");
            PublishOutcome::Failed {
                kind: FailureKind::Delivery,
                message: e.to_string(),
            }
        }
    }
}

/// String form of [`publish`].
pub async fn send_kafka(settings: &KafkaSettings, message: &str, logsign: &str) -> String {
    publish(settings, message, logsign).await.to_string()
}
