pub mod generator;
pub mod grading;
pub mod handlers;
pub mod links;
pub mod prompts;
