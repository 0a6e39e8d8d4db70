use serde::Serialize;
use std::fmt;

pub const DISABLED_MESSAGE: &str = "kafka未配置未开启状态,请先配置open-kafka为1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ProducerCreate,
    Delivery,
}

/// Result of one publish call. `Display` gives the caller-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    Disabled,
    Delivered {
        key: String,
        partition: i32,
        offset: i64,
        elapsed_ms: u64,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl PublishOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PublishOutcome::Failed { .. })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Disabled => f.write_str(DISABLED_MESSAGE),
            PublishOutcome::Delivered { key, .. } => write!(f, "发送kafka消息:{key}成功"),
            PublishOutcome::Failed {
                kind: FailureKind::ProducerCreate,
                message,
            } => write!(f, "创建kafka生产者失败: {message}"),
            PublishOutcome::Failed {
                kind: FailureKind::Delivery,
                message,
            } => write!(f, "发送kafka消息失败: {message}"),
        }
    }
}
