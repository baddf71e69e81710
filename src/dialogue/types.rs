use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One NLU result for a single turn, as produced by the language model.
/// Deserializes directly from the model's extracted JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluUpdate {
    pub intent: String,
    #[serde(default)]
    pub slots: Option<Map<String, Value>>,
}

impl NluUpdate {
    pub fn intent_only(intent: &str) -> Self {
        Self {
            intent: intent.to_string(),
            slots: None,
        }
    }
}

/// Structured record of input the tracker refused.
///
/// Rejections are recoverable: the previous state stands and the
/// conversation continues. These records exist so callers and tests can see
/// what was dropped without scraping log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The NLU named an intent outside the schema; the whole update was
    /// skipped.
    UnknownIntent { intent: String },
    /// A slot value failed its rule; the prior value was retained.
    InvalidSlotValue {
        intent: String,
        slot: String,
        value: String,
    },
}
