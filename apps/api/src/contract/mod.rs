// Output contracts: checks that a model's reply honours the format its prompt asked for.
// Validation never retries. On a violation the caller decides whether to
// re-send the prompt with `reminder` appended.

pub mod cover_letter;
pub mod fit;

use serde::Serialize;

use crate::errors::PromptError;
use crate::templates::OutputContract;

pub use cover_letter::{review_cover_letter, CoverLetterReport};
pub use fit::{validate_fit_verdict, FitVerdict};

/// A model reply that passed its contract.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "contract", rename_all = "snake_case")]
pub enum ValidatedOutput {
    StrictJson { verdict: FitVerdict },
    PlainText { text: String, report: CoverLetterReport },
}

/// Validates `text` against `contract`.
///
/// Plain-text replies are held to the cover-letter rules, the only plain-text
/// template shipped.
pub fn validate_output(
    contract: OutputContract,
    text: &str,
) -> Result<ValidatedOutput, PromptError> {
    match contract {
        OutputContract::StrictJson => {
            validate_fit_verdict(text).map(|verdict| ValidatedOutput::StrictJson { verdict })
        }
        OutputContract::PlainText => {
            let report = review_cover_letter(text);
            if !report.passed {
                return Err(PromptError::ContractViolation {
                    contract: contract.as_str(),
                    reason: report.issues.join("; "),
                });
            }
            Ok(ValidatedOutput::PlainText {
                text: text.trim().to_string(),
                report,
            })
        }
    }
}

/// Corrective note appended to a prompt when re-sending after an off-contract reply.
pub fn reminder(contract: OutputContract) -> &'static str {
    match contract {
        OutputContract::StrictJson => {
            "[System note: Your previous response was not valid. \
            Reply with ONLY the JSON object {\"fit_score\": <number 0-10>, \"reason\": \"<string>\"}. \
            No code fences, no text before or after it.]"
        }
        OutputContract::PlainText => {
            "[System note: Your previous response did not follow the format. \
            Rewrite to ~300 words, keep it factual, include 3 bullet highlights, \
            end with a call to action, and maintain the given brand voice.]"
        }
    }
}

/// `prompt` followed by the contract's corrective note.
pub fn append_reminder(prompt: &str, contract: OutputContract) -> String {
    format!("{prompt}\n\n{}", reminder(contract))
}
