pub mod anthropic;
pub mod error;
pub mod fetch;
pub mod generation;
pub mod openai;
