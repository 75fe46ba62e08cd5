//! Console output formatting for evaluation results

use colored::Colorize;
use quiz_application::CacheStats;
use quiz_domain::{Evaluation, ProviderAnswer, QuorumAnswer};

/// Formats evaluation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an evaluation result
    pub fn format(evaluation: &Evaluation) -> String {
        match evaluation {
            Evaluation::Single(answer) => Self::format_single(answer),
            Evaluation::Quorum(quorum) => Self::format_quorum(quorum),
        }
    }

    /// Format as JSON
    pub fn format_json(evaluation: &Evaluation) -> String {
        serde_json::to_string_pretty(evaluation).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format cache occupancy counts
    pub fn format_stats(stats: &CacheStats) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Answer cache".cyan().bold()));
        output.push_str(&format!("  first:  {} entries\n", stats.first));
        output.push_str(&format!("  second: {} entries\n", stats.second));
        output.push_str(&format!("  third:  {} entries\n", stats.third));
        output.push_str(&format!(
            "  total:  {} / {} per slot\n",
            stats.total, stats.capacity
        ));
        output
    }

    fn format_single(answer: &ProviderAnswer) -> String {
        let mut output = String::new();

        let letter = if answer.error {
            answer.answer.to_string().red().bold()
        } else {
            answer.answer.to_string().green().bold()
        };
        output.push_str(&format!("{} {}\n", "Answer:".cyan().bold(), letter));
        output.push_str(&format!(
            "{} {}/10\n",
            "Confidence:".cyan().bold(),
            answer.confidence
        ));
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), answer.provider));

        if answer.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), answer.raw));
        } else if answer.has_substantive_reasoning() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Reasoning:".cyan().bold(),
                answer.reasoning
            ));
        }

        output
    }

    fn format_quorum(quorum: &QuorumAnswer) -> String {
        let mut output = String::new();
        let report = &quorum.report;

        output.push_str(&format!(
            "{} {}\n",
            "Answer:".cyan().bold(),
            quorum.answer.to_string().green().bold()
        ));
        output.push_str(&format!(
            "{} {}/10 (average {:.1})\n",
            "Confidence:".cyan().bold(),
            quorum.confidence,
            report.average_confidence
        ));

        if report.consensus {
            output.push_str(&format!("{}\n", "Consensus reached".green().bold()));
        } else if report.conflicting_answers.is_empty() {
            output.push_str(&format!("{}\n", "No consensus (provider errors)".yellow()));
        } else {
            let letters: Vec<String> = report
                .conflicting_answers
                .iter()
                .map(|l| l.to_string())
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                "No consensus, conflicting answers:".yellow().bold(),
                letters.join(", ")
            ));
        }

        output.push_str(&format!("\n{}\n", "Providers:".cyan().bold()));
        for response in &report.responses {
            if response.error {
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    response.provider.red(),
                    response.answer,
                    "error".red()
                ));
            } else {
                output.push_str(&format!(
                    "  {} {} ({}/10)\n",
                    response.provider.yellow(),
                    response.answer,
                    response.confidence
                ));
            }
        }

        if !quorum.reasoning.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Reasoning:".cyan().bold(),
                quorum.reasoning
            ));
        }

        output
    }
}
