use convivio::dialogue::types::Diagnostic;
use convivio::nlu::prompts::Prompts;
use convivio::orchestrator::TurnOrchestrator;
use convivio::recipes::store::InMemoryRecipeStore;
use convivio::recipes::types::Recipe;
use convivio::services::llm::scripted::ScriptedModel;
use serde_json::json;

fn recipe(id: &str, name: &str, category: &str, area: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        area: Some(area.to_string()),
        instructions: Some("Cook until done.".to_string()),
        thumbnail: None,
        tags: None,
        youtube: None,
        source: None,
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
    }
}

fn seeded_store() -> InMemoryRecipeStore {
    InMemoryRecipeStore::with_recipes(vec![
        recipe("1", "Lasagne", "Pasta", "Italian", &["Tomato", "Garlic", "Beef"]),
        recipe("2", "Beef Tacos", "Beef", "Mexican", &["Beef", "Onion", "Tortilla"]),
    ])
}

fn orchestrator_with(responses: &[&str]) -> TurnOrchestrator<ScriptedModel, InMemoryRecipeStore> {
    let model = ScriptedModel::new(responses.iter().copied());
    TurnOrchestrator::new(model, seeded_store(), Prompts::default())
}

#[tokio::test]
async fn test_recommendation_turn_fills_state_and_replies() {
    // One turn: intent classification, slot extraction, dialogue manager,
    // reply generation.
    let mut orchestrator = orchestrator_with(&[
        r#"{"intent": "recipe_recommendation"}"#,
        r#"{"slots": {"nationality": "Italian", "ingredients": "Tomato, Garlic"}}"#,
        r#"{"action_required": "confirmation_recipe_recommendation"}"#,
        "You could try Lasagne tonight.",
    ]);

    let outcome = orchestrator.run_turn("something italian with tomato and garlic").await;

    assert_eq!(outcome.intent, "recipe_recommendation");
    assert_eq!(outcome.reply, "You could try Lasagne tonight.");
    assert!(!outcome.ended);
    assert!(outcome.diagnostics.is_empty());

    let slots = orchestrator.tracker().get_slots("recipe_recommendation");
    assert_eq!(slots["nationality"], json!("italian"));
    assert_eq!(slots["ingredients"], json!(["tomato", "garlic"]));
}

#[tokio::test]
async fn test_slot_context_survives_across_turns_on_same_intent() {
    let mut orchestrator = orchestrator_with(&[
        // Turn 1: nationality only.
        r#"{"intent": "recipe_recommendation"}"#,
        r#"{"slots": {"nationality": "Italian"}}"#,
        r#"{"action_required": "req_info_ingredients"}"#,
        "Which ingredients do you have?",
        // Turn 2: ingredients only; nationality must persist.
        r#"{"intent": "recipe_recommendation"}"#,
        r#"{"slots": {"ingredients": "tomato"}}"#,
        r#"{"action_required": "confirmation_recipe_recommendation"}"#,
        "Lasagne it is.",
    ]);

    orchestrator.run_turn("I'd like something italian").await;
    orchestrator.run_turn("I have tomatoes").await;

    let slots = orchestrator.tracker().get_slots("recipe_recommendation");
    assert_eq!(slots["nationality"], json!("italian"), "kept intents retain slots across turns");
    assert_eq!(slots["ingredients"], json!(["tomato"]));
}

#[tokio::test]
async fn test_intent_switch_resets_the_abandoned_intent() {
    let mut orchestrator = orchestrator_with(&[
        r#"{"intent": "recipe_recommendation"}"#,
        r#"{"slots": {"nationality": "Mexican"}}"#,
        r#"{"action_required": "req_info_ingredients"}"#,
        "Which ingredients do you have?",
        // The conversation moves on; recommendation state must not leak.
        r#"{"intent": "ask_for_time"}"#,
        r#"{"slots": {"recipe_name": "Beef Tacos"}}"#,
        "Tacos take about half an hour.",
    ]);

    orchestrator.run_turn("something mexican").await;
    let outcome = orchestrator.run_turn("how long do beef tacos take?").await;

    assert_eq!(outcome.intent, "ask_for_time");
    assert_eq!(outcome.reply, "Tacos take about half an hour.");

    let tracker = orchestrator.tracker();
    assert!(!tracker.is_active("recipe_recommendation"));
    assert_eq!(tracker.get_slots("recipe_recommendation")["nationality"], json!(null));
    assert_eq!(tracker.get_slots("ask_for_time")["recipe_name"], json!("beef tacos"));
}

#[tokio::test]
async fn test_unknown_model_intent_degrades_to_diagnostic() {
    let mut orchestrator = orchestrator_with(&[
        r#"{"intent": "made_up_intent"}"#,
        r#"{"action_required": "explain what the assistant can do"}"#,
        "I can only help with recipes.",
    ]);

    let outcome = orchestrator.run_turn("book me a flight").await;

    assert_eq!(outcome.reply, "I can only help with recipes.");
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::UnknownIntent {
            intent: "made_up_intent".to_string()
        }]
    );
    assert!(orchestrator.tracker().to_dict().is_empty(), "a rejected intent activates nothing");
}

#[tokio::test]
async fn test_model_garbage_degrades_to_not_supported() {
    let mut orchestrator = orchestrator_with(&[
        "I am a language model and I refuse to emit JSON today.",
        r#"{"action_required": "explain what the assistant can do"}"#,
        "Sorry, I did not follow that.",
    ]);

    let outcome = orchestrator.run_turn("hello?").await;

    assert_eq!(outcome.intent, "not_supported");
    assert!(!outcome.ended);
    assert!(orchestrator.tracker().is_active("not_supported"));
}

#[tokio::test]
async fn test_end_conversation_turn_ends_the_session() {
    let mut orchestrator = orchestrator_with(&[
        r#"{"intent": "end_conversation"}"#,
        "Goodbye, and enjoy your meal!",
    ]);

    let outcome = orchestrator.run_turn("bye!").await;

    assert!(outcome.ended);
    assert_eq!(outcome.reply, "Goodbye, and enjoy your meal!");
}

#[tokio::test]
async fn test_exhausted_model_still_produces_a_reply() {
    // Only the classification response is scripted; every later call fails.
    let mut orchestrator = orchestrator_with(&[r#"{"intent": "end_conversation"}"#]);

    let outcome = orchestrator.run_turn("bye").await;

    assert!(outcome.ended);
    assert!(!outcome.reply.is_empty(), "a dead model must not leave the user without a reply");
}
