pub mod chat_builder;
pub mod helpers;
pub mod history;
pub mod openai;
