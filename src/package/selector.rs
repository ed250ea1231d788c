//! Asset selection.
//!
//! [`parse_choice`] is the whole validation rule; [`choose`] only repeats the
//! question through a [`Prompter`] until an answer passes it.

use crate::core::GhpmResult;
use crate::di::traits::Prompter;

/// Outcome of asking the operator for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the offered assets.
    Chosen(usize),
    /// Nothing to choose from, or no answer will ever come.
    Cancelled,
}

/// Validate a 1-based answer against `count` options.
///
/// Returns the zero-based index, or `None` for anything that is not an
/// integer in `1..=count`.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Offer `assets` (in the given order) and ask until a valid number is given.
///
/// Invalid answers are re-asked without limit. An empty list is cancelled
/// without asking.
pub fn choose(assets: &[String], prompter: &mut dyn Prompter) -> GhpmResult<Selection> {
    if assets.is_empty() {
        prompter.say("There is no binary asset.")?;
        return Ok(Selection::Cancelled);
    }

    prompter.say("Choose from the following URLs:")?;
    for (idx, url) in assets.iter().enumerate() {
        prompter.say(&format!("{}. {}", idx + 1, url))?;
    }

    loop {
        let Some(answer) =
            prompter.ask("\nInput the number of the URL you want to install: ")?
        else {
            tracing::debug!("input closed before an asset was chosen");
            return Ok(Selection::Cancelled);
        };

        match parse_choice(&answer, assets.len()) {
            Some(index) => return Ok(Selection::Chosen(index)),
            None => prompter.say(&format!(
                "\nInvalid input. Please enter a number between 1 and {}.",
                assets.len()
            ))?,
        }
    }
}
