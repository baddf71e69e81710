use serde_json::{Map, Value};

use crate::dialogue::rules::Rule;
use crate::recipes::store::RecipeStore;

pub const RECIPE_RECOMMENDATION: &str = "recipe_recommendation";
pub const ASK_FOR_INGREDIENTS: &str = "ask_for_ingredients";
pub const ASK_FOR_PROCEDURE: &str = "ask_for_procedure";
pub const ASK_FOR_TIME: &str = "ask_for_time";
pub const NOT_SUPPORTED: &str = "not_supported";
pub const END_CONVERSATION: &str = "end_conversation";

/// A slot an intent can fill, with the rule gating writes to it.
#[derive(Debug, Clone)]
pub struct SlotSpec {
    pub name: &'static str,
    pub rule: Rule,
}

/// Declaration of one supported intent: its name and its fixed slot set.
#[derive(Debug, Clone)]
pub struct IntentSpec {
    pub name: &'static str,
    pub slots: Vec<SlotSpec>,
}

impl IntentSpec {
    fn new(name: &'static str, slots: Vec<SlotSpec>) -> Self {
        Self { name, slots }
    }

    pub fn slot(&self, name: &str) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Fresh all-null slot map, in declared order.
    pub fn default_slots(&self) -> Map<String, Value> {
        self.slots
            .iter()
            .map(|s| (s.name.to_string(), Value::Null))
            .collect()
    }
}

/// The full intent table, one row per supported intent.
///
/// Declaration order here is the serialization order of the tracker, so it
/// is fixed in one place and nowhere else. Adding an intent is a table
/// edit, not a new type.
#[derive(Debug, Clone)]
pub struct IntentSchema {
    intents: Vec<IntentSpec>,
}

impl IntentSchema {
    /// Builds the schema against the live store contents.
    ///
    /// The allow-lists snapshot the store's distinct categories, areas and
    /// ingredient names, lower-cased; the store must be populated before
    /// this runs. An empty store yields rules that reject every value.
    pub fn for_store(store: &dyn RecipeStore) -> Self {
        let areas = lowered(store.areas());
        let categories = lowered(store.categories());
        let ingredients = lowered(store.ingredient_names());

        Self {
            intents: vec![
                IntentSpec::new(
                    RECIPE_RECOMMENDATION,
                    vec![
                        SlotSpec {
                            name: "nationality",
                            rule: Rule::in_list(areas),
                        },
                        SlotSpec {
                            name: "category",
                            rule: Rule::in_list(categories),
                        },
                        SlotSpec {
                            name: "ingredients",
                            rule: Rule::in_list(ingredients),
                        },
                    ],
                ),
                IntentSpec::new(ASK_FOR_INGREDIENTS, vec![recipe_name_slot()]),
                IntentSpec::new(ASK_FOR_PROCEDURE, vec![recipe_name_slot()]),
                IntentSpec::new(ASK_FOR_TIME, vec![recipe_name_slot()]),
                IntentSpec::new(NOT_SUPPORTED, Vec::new()),
                IntentSpec::new(END_CONVERSATION, Vec::new()),
            ],
        }
    }

    pub fn get(&self, intent: &str) -> Option<&IntentSpec> {
        self.intents.iter().find(|i| i.name == intent)
    }

    pub fn intents(&self) -> impl Iterator<Item = &IntentSpec> {
        self.intents.iter()
    }
}

fn recipe_name_slot() -> SlotSpec {
    SlotSpec {
        name: "recipe_name",
        rule: Rule::IsString,
    }
}

fn lowered(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}
