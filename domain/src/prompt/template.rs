//! Prompt templates for the judge stage

use crate::fusion::value_objects::ModelResponse;

/// Marker that opens the synthesized answer in the judge's reply
pub const FINAL_ANSWER_MARKER: &str = "FINAL_ANSWER:";

/// Marker that opens the reasoning section in the judge's reply
pub const REASONING_MARKER: &str = "REASONING:";

/// Templates for generating judge prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the judge model
    pub fn judge_system() -> &'static str {
        "You are an expert AI judge that synthesizes multiple AI responses into a single, high-quality answer."
    }

    /// User prompt for the judge: the question followed by every slot's outcome.
    ///
    /// Failed slots are rendered as explicit markers so the judge knows it is
    /// working from degraded input.
    pub fn judge_prompt(question: &str, responses: &[ModelResponse]) -> String {
        let mut prompt = format!(
            r#"You are an expert AI judge tasked with synthesizing responses from multiple AI models.

User Question: {}

Model Responses:
"#,
            question
        );

        for response in responses {
            prompt.push_str(&format!(
                "\n{} ({}): {}\n",
                response.slot,
                response.model_id,
                response.outcome.display_text()
            ));
        }

        prompt.push_str(&format!(
            r#"
Some models may be marked as NO RESPONSE; synthesize from the responses that are available.

Please provide:
1. A final synthesized answer that combines the best aspects of the responses
2. Your reasoning for how you arrived at this synthesis

IMPORTANT: Format your FINAL_ANSWER section using proper HTML markup:
- Use <h1>, <h2>, <h3> for headers
- Use <strong> for bold text instead of **bold**
- Use <em> for italic text instead of *italic*
- Use <ul><li> for bullet lists instead of - bullets
- Use <ol><li> for numbered lists instead of 1. 2. 3.
- Use <p> for paragraphs
- Use <hr> for horizontal rules instead of ---
- Use <blockquote> for quotes instead of >

Format your response as:
{} [Your synthesized response in HTML format here]
{} [Your reasoning process here]"#,
            FINAL_ANSWER_MARKER, REASONING_MARKER
        ));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelSlot;
    use crate::fusion::value_objects::FailureKind;

    #[test]
    fn test_judge_prompt_contains_question_and_slots_in_order() {
        let responses = vec![
            ModelResponse::success(ModelSlot::Primary1, "llama-4", "Answer A"),
            ModelResponse::success(ModelSlot::Primary2, "qwen-3", "Answer B"),
            ModelResponse::success(ModelSlot::Primary3, "gpt-oss", "Answer C"),
        ];
        let prompt = PromptTemplate::judge_prompt("What is Rust?", &responses);

        assert!(prompt.contains("User Question: What is Rust?"));
        let a = prompt.find("MODEL1 (llama-4): Answer A").unwrap();
        let b = prompt.find("MODEL2 (qwen-3): Answer B").unwrap();
        let c = prompt.find("MODEL3 (gpt-oss): Answer C").unwrap();
        assert!(a < b && b < c);
        assert!(prompt.contains(FINAL_ANSWER_MARKER));
        assert!(prompt.contains(REASONING_MARKER));
    }

    #[test]
    fn test_judge_prompt_marks_failed_slot() {
        let responses = vec![
            ModelResponse::success(ModelSlot::Primary1, "llama-4", "Answer A"),
            ModelResponse::failure(
                ModelSlot::Primary2,
                "qwen-3",
                FailureKind::Timeout,
                "no response after 30s",
            ),
            ModelResponse::success(ModelSlot::Primary3, "gpt-oss", "Answer C"),
        ];
        let prompt = PromptTemplate::judge_prompt("What is Rust?", &responses);

        assert!(prompt.contains("MODEL2 (qwen-3): [NO RESPONSE: timeout]"));
        assert!(!prompt.contains("no response after 30s"));
    }
}
