// src/generator/prompt.rs

/// Fixes the output contract the provider has to follow.
pub const SYSTEM_INSTRUCTION: &str = "You are a quiz generator. Respond with a JSON array only. \
Do not wrap it in markdown code fences and do not add any text before or after it. \
Each element must be an object with exactly these fields: \
\"question\" (string), \
\"options\" (array of exactly 4 distinct strings), \
\"correct\" (string copied verbatim from one of the options, never a letter label such as \"A\" or \"B\"), \
\"explanation\" (string explaining why the answer is correct). \
Example: [{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"correct\": \"...\", \"explanation\": \"...\"}]";

/// Builds the user message for one quiz.
pub fn user_prompt(topic: &str, difficulty: &str, num_questions: u32) -> String {
    format!(
        "Generate {} multiple choice questions about {} at {} level.",
        num_questions, topic, difficulty
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_all_parameters() {
        let prompt = user_prompt("Photosynthesis", "easy", 3);
        assert_eq!(
            prompt,
            "Generate 3 multiple choice questions about Photosynthesis at easy level."
        );
    }

    #[test]
    fn system_instruction_forbids_letter_answers_and_fences() {
        assert!(SYSTEM_INSTRUCTION.contains("never a letter label"));
        assert!(SYSTEM_INSTRUCTION.contains("exactly 4"));
        assert!(SYSTEM_INSTRUCTION.contains("code fences"));
    }
}
