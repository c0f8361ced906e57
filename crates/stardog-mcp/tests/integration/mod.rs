//! Integration test modules.

mod prompts;
mod tools;
