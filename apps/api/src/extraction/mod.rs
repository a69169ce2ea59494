pub mod analyzer;
pub mod blueprint;
pub mod handlers;
pub mod normalize;
pub mod parser;
pub mod prompts;
