//! Whitespace-preserving token shuffle.
//!
//! Splits the input on runs of whitespace, shuffles each token on its
//! own, and joins the tokens back with single ASCII spaces. Tabs,
//! newlines and repeated spaces are not kept.

use crate::entropy::SecureRandomIndexSource;
use crate::error::ShuffleError;
use crate::permutation::PermutationEngine;

/// Separator placed between tokens on rejoin.
const TOKEN_SEPARATOR: &str = " ";

/// Shuffles whitespace-delimited tokens independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacePreservingWrapper {
    engine: PermutationEngine,
}

impl SpacePreservingWrapper {
    /// Creates a wrapper around the given engine.
    pub fn new(engine: PermutationEngine) -> Self {
        Self { engine }
    }

    /// Shuffles every token of `input` and rejoins them.
    ///
    /// Input without any whitespace is shuffled as one token. Tokens of
    /// length 0 or 1 pass through unchanged.
    pub fn shuffle<S>(&self, input: &str, source: &mut S) -> Result<String, ShuffleError>
    where
        S: SecureRandomIndexSource + ?Sized,
    {
        if !input.chars().any(char::is_whitespace) {
            return shuffle_token(&self.engine, input, source);
        }

        let tokens = input
            .split_whitespace()
            .map(|token| shuffle_token(&self.engine, token, source))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(tokens = tokens.len(), "Shuffled whitespace-delimited tokens");

        Ok(tokens.join(TOKEN_SEPARATOR))
    }
}

/// Shuffles one run of characters, passing length 0 or 1 through.
pub(crate) fn shuffle_token<S>(
    engine: &PermutationEngine,
    token: &str,
    source: &mut S,
) -> Result<String, ShuffleError>
where
    S: SecureRandomIndexSource + ?Sized,
{
    let mut seq: Vec<char> = token.chars().collect();
    if seq.len() <= 1 {
        return Ok(token.to_owned());
    }

    engine.permute(&mut seq, source)?;
    Ok(seq.into_iter().collect())
}
