use crate::dialogue::schema::{
    ASK_FOR_INGREDIENTS, ASK_FOR_PROCEDURE, ASK_FOR_TIME, RECIPE_RECOMMENDATION,
};

/// The prompt template set, built once at startup and passed explicitly to
/// the orchestrator. Nothing else reads these, and nothing mutates them.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub nlu_intent: String,
    pub nlu_slots_recommendation: String,
    pub nlu_slots_recipe_name: String,
    pub dm_recommendation: String,
    pub dm_not_supported: String,
    pub nlg_recommendation: String,
    pub nlg_recipe_information: String,
    pub nlg_not_supported: String,
    pub nlg_end_conversation: String,
}

impl Prompts {
    /// Slot-extraction prompt for an intent, when the intent has slots.
    pub fn nlu_slots(&self, intent: &str) -> Option<&str> {
        match intent {
            RECIPE_RECOMMENDATION => Some(&self.nlu_slots_recommendation),
            ASK_FOR_INGREDIENTS | ASK_FOR_PROCEDURE | ASK_FOR_TIME => {
                Some(&self.nlu_slots_recipe_name)
            }
            _ => None,
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            nlu_intent: r#"You are the natural language understanding module of a recipe assistant.
Classify the intent of the user input as exactly one of:
recipe_recommendation, ask_for_ingredients, ask_for_procedure, ask_for_time, end_conversation, not_supported.
recipe_recommendation: the user is searching for a recipe and may give ingredients, a nationality, or a dish category.
ask_for_ingredients / ask_for_procedure / ask_for_time: the user names a recipe and asks for its ingredients, its preparation steps, or the time it takes.
end_conversation: the user is saying goodbye or closing the conversation.
not_supported: anything else.
You receive the user input together with the current dialogue state.
Reply with a JSON object only: {"intent": "<name>"}."#
                .to_string(),
            nlu_slots_recommendation: r#"You are the natural language understanding module of a recipe assistant.
The intent is recipe_recommendation. Extract the slot values from the user input:
nationality (like italian, mexican, indian), category (like seafood, dessert, vegetarian), ingredients (like tomato, garlic, chicken).
Use null for any slot the user did not mention. Extract only values the user actually wrote; do not invent words.
Reply with a JSON object only: {"slots": {"nationality": ..., "category": ..., "ingredients": ...}}."#
                .to_string(),
            nlu_slots_recipe_name: r#"You are the natural language understanding module of a recipe assistant.
The user is asking about a specific recipe. Extract the recipe name from the user input.
Use null if no recipe name is present. Extract only what the user actually wrote.
Reply with a JSON object only: {"slots": {"recipe_name": ...}}."#
                .to_string(),
            dm_recommendation: r#"You are the dialogue manager of a recipe assistant.
You receive a JSON object with the matched recipes and the dialogue state.
If a slot of recipe_recommendation is null, set action_required to req_info_<slot_name> for the first null slot.
If no slot is null, set action_required to confirmation_recipe_recommendation.
Reply with a JSON object only: {"action_required": "..."}."#
                .to_string(),
            dm_not_supported: r#"You are the dialogue manager of a recipe assistant.
The user asked for something outside the assistant's abilities.
Reply with a JSON object only: {"action_required": "explain what the assistant can do"}."#
                .to_string(),
            nlg_recommendation: r#"You are the response generator of a recipe assistant.
You receive a JSON object with the dialogue manager output, the dialogue state, and the matched recipes.
If the dialogue manager requires more information, ask the user for it.
Otherwise propose the matched recipes. Reply with the message for the user and nothing else."#
                .to_string(),
            nlg_recipe_information: r#"You are the response generator of a recipe assistant.
You receive a JSON object with the dialogue manager output, the dialogue state, and the recipe data.
Answer the user's question about the recipe using only the recipe data.
Reply with the message for the user and nothing else."#
                .to_string(),
            nlg_not_supported: r#"You are the response generator of a recipe assistant.
The user asked for something the assistant cannot do. Briefly say so and mention that you can
recommend recipes and answer questions about their ingredients, procedure, and cooking time.
Reply with the message for the user and nothing else."#
                .to_string(),
            nlg_end_conversation: r#"You are the response generator of a recipe assistant.
The user is closing the conversation. Say goodbye briefly.
Reply with the message for the user and nothing else."#
                .to_string(),
        }
    }
}
