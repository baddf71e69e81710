pub mod client;
pub mod scripted;
