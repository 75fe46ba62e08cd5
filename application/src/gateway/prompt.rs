//! Prompt construction for provider calls

use quiz_domain::QuizQuestion;
use std::fmt::Write;

/// System instruction sent with every provider call
pub const SYSTEM_INSTRUCTION: &str = "You are a highly accurate quiz assistant. \
    Always provide clear, confident answers in the requested format.";

/// Build the user prompt embedding the question and lettered options
///
/// Options are lettered by position (A., B., ...). The provider is
/// asked for Answer/Confidence/Reasoning lines, but the reply parser
/// tolerates any prose.
pub fn build_prompt(question: &QuizQuestion) -> String {
    let mut options_text = String::new();
    for (letter, option) in question.lettered_options() {
        let _ = writeln!(options_text, "{}. {}", letter, option);
    }

    format!(
        "You are an expert quiz assistant. Analyze this question carefully and provide the best answer.\n\
         \n\
         Question: {}\n\
         \n\
         Options:\n\
         {}\n\
         Instructions:\n\
         1. Think through each option systematically\n\
         2. Choose the most accurate answer\n\
         3. Provide your confidence level (1-10)\n\
         \n\
         Format your response as:\n\
         Answer: [A/B/C/D]\n\
         Confidence: [1-10]\n\
         Reasoning: [Brief explanation]",
        question.question(),
        options_text
    )
}
