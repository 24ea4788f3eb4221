#[cfg(test)]
pub mod fake;
pub mod openai;

use std::sync::Arc;

use crate::domain::models::AssistantsHandle;

pub struct AssistantsManager {}

impl AssistantsManager {
    pub fn get() -> AssistantsHandle {
        return Arc::new(openai::OpenAI::default());
    }
}
