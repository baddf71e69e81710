use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dialogue::schema::{
    IntentSchema, ASK_FOR_INGREDIENTS, ASK_FOR_PROCEDURE, ASK_FOR_TIME, END_CONVERSATION,
    NOT_SUPPORTED, RECIPE_RECOMMENDATION,
};
use crate::dialogue::tracker::DialogueState;
use crate::dialogue::types::{Diagnostic, NluUpdate};
use crate::nlu::extract::extract_json;
use crate::nlu::prompts::Prompts;
use crate::recipes::store::RecipeStore;
use crate::services::llm::client::LanguageModel;

const FALLBACK_REPLY: &str = "Sorry, I had trouble answering that. Could you rephrase?";

/// Result of one user turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub intent: String,
    pub reply: String,
    pub diagnostics: Vec<Diagnostic>,
    pub ended: bool,
}

/// Drives one conversation: NLU, state update, recipe lookup, reply.
///
/// Every fallible step degrades instead of aborting: a failed model call or
/// malformed model output falls back to `not_supported` semantics or an
/// empty result, so a single bad turn cannot take the conversation down.
pub struct TurnOrchestrator<M: LanguageModel, S: RecipeStore> {
    session_id: Uuid,
    model: M,
    store: S,
    prompts: Prompts,
    tracker: DialogueState,
}

impl<M: LanguageModel, S: RecipeStore> TurnOrchestrator<M, S> {
    pub fn new(model: M, store: S, prompts: Prompts) -> Self {
        let schema = IntentSchema::for_store(&store);
        let tracker = DialogueState::new(schema);
        Self {
            session_id: Uuid::new_v4(),
            model,
            store,
            prompts,
            tracker,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn tracker(&self) -> &DialogueState {
        &self.tracker
    }

    pub async fn run_turn(&mut self, user_input: &str) -> TurnOutcome {
        let intent = self.classify_intent(user_input).await;
        info!(session = %self.session_id, intent = %intent, "turn classified");

        let nlu = self.extract_slots(&intent, user_input).await;

        // Drop stale state from intents the turn moved away from, then fold
        // in the new observation.
        self.tracker.reset(&[nlu.intent.as_str()]);
        let diagnostics = self.tracker.update(&nlu);
        for diagnostic in &diagnostics {
            warn!(session = %self.session_id, ?diagnostic, "rejected NLU input");
        }

        let (dm, recipes) = self.dialogue_manager(&nlu.intent).await;
        let reply = self.generate_reply(&nlu.intent, &dm, &recipes).await;

        TurnOutcome {
            ended: nlu.intent == END_CONVERSATION,
            intent: nlu.intent,
            reply,
            diagnostics,
        }
    }

    async fn classify_intent(&self, user_input: &str) -> String {
        let context = turn_context(user_input, &self.tracker);
        let response = match self.model.infer(&self.prompts.nlu_intent, &context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "intent classification failed");
                return NOT_SUPPORTED.to_string();
            }
        };
        let Some(parsed) = extract_json(&response) else {
            warn!(session = %self.session_id, "no JSON in intent classification output");
            return NOT_SUPPORTED.to_string();
        };
        parsed
            .get("intent")
            .and_then(Value::as_str)
            .unwrap_or(NOT_SUPPORTED)
            .to_string()
    }

    async fn extract_slots(&self, intent: &str, user_input: &str) -> NluUpdate {
        let Some(prompt) = self.prompts.nlu_slots(intent) else {
            return NluUpdate::intent_only(intent);
        };
        let context = turn_context(user_input, &self.tracker);
        let response = match self.model.infer(prompt, &context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "slot extraction failed");
                return NluUpdate::intent_only(intent);
            }
        };
        let Some(parsed) = extract_json(&response) else {
            warn!(session = %self.session_id, "no JSON in slot extraction output");
            return NluUpdate::intent_only(intent);
        };
        let slots = parsed.get("slots").and_then(Value::as_object).cloned();
        NluUpdate {
            intent: intent.to_string(),
            slots,
        }
    }

    /// Resolves the turn against the recipe store and decides the action
    /// the reply must perform. Returns the DM record plus the recipe
    /// payload for reply generation.
    async fn dialogue_manager(&self, intent: &str) -> (Value, Value) {
        match intent {
            RECIPE_RECOMMENDATION => {
                let slots = self.tracker.get_slots(RECIPE_RECOMMENDATION);
                let area = slots.get("nationality").and_then(Value::as_str);
                let category = slots.get("category").and_then(Value::as_str);
                let ingredients: Vec<String> = slots
                    .get("ingredients")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();

                let matched = self.store.filter(area, category, &ingredients);
                info!(session = %self.session_id, matches = matched.len(), "filtered recipes");

                let names: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
                let dm_input = json!({
                    "matched_recipes": names,
                    "state": self.tracker.to_dict(),
                });
                let dm = self
                    .infer_dm(&self.prompts.dm_recommendation, &dm_input)
                    .await
                    .unwrap_or_else(|| json!({"action_required": "confirmation_recipe_recommendation"}));
                (dm, json!(matched))
            }
            ASK_FOR_INGREDIENTS | ASK_FOR_PROCEDURE | ASK_FOR_TIME => {
                let slots = self.tracker.get_slots(intent);
                let name = slots.get("recipe_name").and_then(Value::as_str).unwrap_or("");
                let found = if name.is_empty() {
                    Vec::new()
                } else {
                    self.store.by_name(name)
                };
                info!(session = %self.session_id, recipe = name, matches = found.len(), "recipe lookup");

                let action = match intent {
                    ASK_FOR_INGREDIENTS => "provide list of ingredients",
                    ASK_FOR_PROCEDURE => "provide procedure of the recipe",
                    _ => "provide the time needed for the recipe",
                };
                (json!({"action_required": [action]}), json!(found))
            }
            END_CONVERSATION => (json!({"action_required": ["close the conversation"]}), Value::Null),
            _ => {
                let dm_input = json!({"state": self.tracker.to_dict()});
                let dm = self
                    .infer_dm(&self.prompts.dm_not_supported, &dm_input)
                    .await
                    .unwrap_or_else(|| json!({"action_required": "explain what the assistant can do"}));
                (dm, Value::Null)
            }
        }
    }

    async fn infer_dm(&self, prompt: &str, dm_input: &Value) -> Option<Value> {
        match self.model.infer(prompt, &pretty(dm_input)).await {
            Ok(text) => extract_json(&text),
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "dialogue manager call failed");
                None
            }
        }
    }

    async fn generate_reply(&self, intent: &str, dm: &Value, recipes: &Value) -> String {
        let state = self.tracker.to_dict();
        let (prompt, payload) = match intent {
            RECIPE_RECOMMENDATION => (
                &self.prompts.nlg_recommendation,
                json!({"dm": dm, "nlu": state, "recipes": recipes}),
            ),
            ASK_FOR_INGREDIENTS | ASK_FOR_PROCEDURE | ASK_FOR_TIME => (
                &self.prompts.nlg_recipe_information,
                json!({"dm": dm, "nlu": state, "recipe": recipes}),
            ),
            END_CONVERSATION => (
                &self.prompts.nlg_end_conversation,
                json!({"dm": dm, "nlu": state}),
            ),
            _ => (
                &self.prompts.nlg_not_supported,
                json!({"dm": dm, "nlu": state}),
            ),
        };
        match self.model.infer(prompt, &pretty(&payload)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "reply generation failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

fn turn_context(user_input: &str, tracker: &DialogueState) -> String {
    pretty(&json!({
        "user_input": user_input,
        "state_tracker": tracker.to_string(),
    }))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
