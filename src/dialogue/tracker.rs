use std::fmt;

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::dialogue::schema::{IntentSchema, SlotSpec};
use crate::dialogue::types::{Diagnostic, NluUpdate};

/// Accumulated knowledge for one supported intent across a conversation.
#[derive(Debug, Clone)]
pub struct IntentState {
    name: &'static str,
    active: bool,
    slots: Map<String, Value>,
}

impl IntentState {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn slots(&self) -> &Map<String, Value> {
        &self.slots
    }
}

/// The dialogue state tracker: one `IntentState` per schema intent, mutated
/// exclusively through `update` and `reset`.
///
/// One tracker serves one conversation, strictly sequentially; construct a
/// fresh one per session. No operation here performs I/O or blocks.
#[derive(Debug, Clone)]
pub struct DialogueState {
    schema: IntentSchema,
    intents: Vec<IntentState>,
}

impl DialogueState {
    pub fn new(schema: IntentSchema) -> Self {
        let intents = schema
            .intents()
            .map(|spec| IntentState {
                name: spec.name,
                active: false,
                slots: spec.default_slots(),
            })
            .collect();
        Self { schema, intents }
    }

    pub fn schema(&self) -> &IntentSchema {
        &self.schema
    }

    /// Applies one NLU result.
    ///
    /// A bad turn never aborts the conversation: an unknown intent rejects
    /// the update as a whole, and per-slot failures degrade to partial
    /// writes. Everything refused comes back as a `Diagnostic`.
    pub fn update(&mut self, nlu: &NluUpdate) -> Vec<Diagnostic> {
        let (Some(spec), Some(state)) = (
            self.schema.get(&nlu.intent),
            self.intents.iter_mut().find(|s| s.name == nlu.intent),
        ) else {
            warn!(intent = %nlu.intent, "ignoring update for unknown intent");
            return vec![Diagnostic::UnknownIntent {
                intent: nlu.intent.clone(),
            }];
        };

        state.active = true;

        let mut diagnostics = Vec::new();
        let Some(slots) = &nlu.slots else {
            return diagnostics;
        };

        for (slot, value) in slots {
            // Undeclared slots and empty values are skipped outright: the
            // caller may omit or null out slots it knows nothing about, and
            // previously stored values persist.
            let Some(slot_spec) = spec.slot(slot) else {
                continue;
            };
            if is_empty(value) {
                continue;
            }

            if slot == "ingredients" {
                apply_ingredients(state, slot_spec, value, &nlu.intent, &mut diagnostics);
            } else {
                apply_scalar(state, slot_spec, value, &nlu.intent, &mut diagnostics);
            }
        }

        diagnostics
    }

    /// Deactivates and reinitializes every intent not named in
    /// `intents_to_keep`; named intents retain their accumulated slots.
    ///
    /// Called at the start of a turn, this stops stale slots from a
    /// now-irrelevant intent leaking into the turn's output, while a still
    /// relevant intent keeps its context across turns.
    pub fn reset(&mut self, intents_to_keep: &[&str]) {
        for state in &mut self.intents {
            if intents_to_keep.contains(&state.name) {
                continue;
            }
            state.active = false;
            if let Some(spec) = self.schema.get(state.name) {
                state.slots = spec.default_slots();
            }
        }
    }

    /// Live slot view for a known intent.
    ///
    /// # Panics
    ///
    /// Panics if `intent` is not part of the schema. That indicates a
    /// schema/orchestrator mismatch in the calling code, not bad user
    /// input, so it is fatal rather than recovered.
    pub fn get_slots(&self, intent: &str) -> &Map<String, Value> {
        match self.intents.iter().find(|s| s.name == intent) {
            Some(state) => &state.slots,
            None => panic!("intent {intent:?} is not in the dialogue schema"),
        }
    }

    pub fn is_active(&self, intent: &str) -> bool {
        self.intents.iter().any(|s| s.name == intent && s.active)
    }

    pub fn intent_states(&self) -> impl Iterator<Item = &IntentState> {
        self.intents.iter()
    }

    /// Snapshot of every active intent, keyed by name, in schema
    /// declaration order. Inactive intents are omitted entirely.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for state in &self.intents {
            if !state.active {
                continue;
            }
            out.insert(
                state.name.to_string(),
                json!({
                    "intent": state.name,
                    "slots": state.slots,
                }),
            );
        }
        out
    }
}

/// Canonical serialization of `to_dict`, fed back to the language model as
/// conversational memory. Deterministic for a given state.
impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = Value::Object(self.to_dict());
        match serde_json::to_string_pretty(&value) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// Comma-splits string input (list input passes through), then trims,
/// lower-cases and validates each element on its own. Failures are dropped
/// without aborting the rest. The accepted list replaces the stored value;
/// it is never merged with a prior list.
fn apply_ingredients(
    state: &mut IntentState,
    spec: &SlotSpec,
    value: &Value,
    intent: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let elements: Vec<String> = match value {
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        other => {
            warn!(intent, slot = spec.name, value = %other, "ingredients must be a string or a list");
            diagnostics.push(Diagnostic::InvalidSlotValue {
                intent: intent.to_string(),
                slot: spec.name.to_string(),
                value: other.to_string(),
            });
            return;
        }
    };

    let mut accepted = Vec::new();
    for element in elements {
        let element = element.trim().to_lowercase();
        if element.is_empty() {
            continue;
        }
        if spec.rule.validate_str(&element) {
            accepted.push(Value::String(element));
        } else {
            warn!(intent, ingredient = %element, "invalid ingredient");
            diagnostics.push(Diagnostic::InvalidSlotValue {
                intent: intent.to_string(),
                slot: spec.name.to_string(),
                value: element,
            });
        }
    }
    state
        .slots
        .insert(spec.name.to_string(), Value::Array(accepted));
}

/// Lower-cases string input, validates, and overwrites on success. On
/// failure the old value is retained.
fn apply_scalar(
    state: &mut IntentState,
    spec: &SlotSpec,
    value: &Value,
    intent: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let candidate = match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other.clone(),
    };
    if spec.rule.validate(&candidate) {
        state.slots.insert(spec.name.to_string(), candidate);
    } else {
        warn!(intent, slot = spec.name, value = %candidate, "invalid slot value");
        diagnostics.push(Diagnostic::InvalidSlotValue {
            intent: intent.to_string(),
            slot: spec.name.to_string(),
            value: render(&candidate),
        });
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON-level falsiness: null, empty string, empty collection, false, zero.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
