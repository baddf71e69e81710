pub mod config;
pub mod dialogue;
pub mod nlu;
pub mod orchestrator;
pub mod recipes;
pub mod services;

// Re-export specific items if needed for convenient access
pub use dialogue::tracker::DialogueState;
pub use orchestrator::TurnOrchestrator;
