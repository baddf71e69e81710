pub mod rules;
pub mod schema;
pub mod tracker;
pub mod types;
