//! Writes a one-line natural-language summary of the expenses for the PDF report.

mod gemini;

use async_trait::async_trait;

use crate::{
    Error,
    expense::{Expense, format_amount},
};

pub use gemini::GeminiClient;

/// The notice used in place of a summary when there are no expenses.
pub const NO_EXPENSES_NOTICE: &str = "No expenses found.";

const PROMPT_INSTRUCTION: &str = "Summarize this expense list in a simple line like \
    'You spent the most on groceries. The total expense is Rs.3,200 across 12 items.'";

const RUPEE_SIGN: char = '₹';
const RUPEE_ABBREVIATION: &str = "Rs.";

/// A service that completes a text prompt, e.g. a large language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    /// Returns [Error::SummaryGenerationFailed] if the service could not be
    /// reached or did not return any text.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// Summarize `expenses` in one line of text using `generator`.
///
/// When `expenses` is empty the generator is not called and
/// [NO_EXPENSES_NOTICE] is returned instead.
///
/// # Errors
/// Returns [Error::SummaryGenerationFailed] if the generator fails.
pub async fn summarize_expenses(
    expenses: &[Expense],
    generator: &dyn TextGenerator,
) -> Result<String, Error> {
    if expenses.is_empty() {
        return Ok(NO_EXPENSES_NOTICE.to_owned());
    }

    let prompt = build_prompt(expenses);
    let summary = generator.generate(&prompt).await?;

    Ok(normalize_summary(&summary))
}

/// Build the prompt asking for a summary, with one line per expense.
fn build_prompt(expenses: &[Expense]) -> String {
    let mut prompt = format!("{PROMPT_INSTRUCTION}\n\n");

    for expense in expenses {
        prompt.push_str(&format!(
            "- {}, Rs.{}, {}, {}\n",
            expense.title,
            format_amount(expense.amount),
            expense.category,
            expense.date
        ));
    }

    prompt
}

/// Trim the generated text and spell out the rupee sign, which the PDF font cannot encode.
fn normalize_summary(summary: &str) -> String {
    summary.trim().replace(RUPEE_SIGN, RUPEE_ABBREVIATION)
}
