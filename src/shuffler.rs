//! Public shuffle entry points.

use crate::entropy::{OsIndexSource, SecureRandomIndexSource};
use crate::error::ShuffleError;
use crate::permutation::{PermutationEngine, SwapTable};
use crate::wrapper::{shuffle_token, SpacePreservingWrapper};

/// Behavior switches for a shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleOptions {
    /// Shuffle whitespace-delimited tokens independently.
    pub preserve_spaces: bool,
    /// Selector-to-swap mapping.
    pub swap_table: SwapTable,
}

/// A shuffle request whose input may be missing.
#[derive(Debug, Clone, Default)]
pub struct ShuffleRequest {
    /// Text to shuffle.
    pub text: Option<String>,
    /// Options for this request.
    pub options: ShuffleOptions,
}

/// Shuffles text with an owned index source.
pub struct Shuffler<S> {
    source: S,
    options: ShuffleOptions,
}

impl<S: SecureRandomIndexSource> Shuffler<S> {
    /// Creates a shuffler over `source`.
    pub fn new(source: S, options: ShuffleOptions) -> Self {
        Self { source, options }
    }

    /// Returns the options in use.
    pub fn options(&self) -> ShuffleOptions {
        self.options
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a shuffled copy of `input`.
    ///
    /// Inputs of length 0 or 1 come back unchanged without touching the
    /// entropy source.
    pub fn shuffle(&mut self, input: &str) -> Result<String, ShuffleError> {
        shuffle_with(input, self.options, &mut self.source)
    }
}

/// Shuffles `input` using `source` for every random decision.
pub fn shuffle_with<S>(
    input: &str,
    options: ShuffleOptions,
    source: &mut S,
) -> Result<String, ShuffleError>
where
    S: SecureRandomIndexSource + ?Sized,
{
    let mut chars = input.chars();
    if chars.next().is_none() || chars.next().is_none() {
        return Ok(input.to_owned());
    }

    let engine = PermutationEngine::new(options.swap_table);
    if options.preserve_spaces {
        SpacePreservingWrapper::new(engine).shuffle(input, source)
    } else {
        shuffle_token(&engine, input, source)
    }
}

/// Shuffles `input` with OS entropy and the default swap table.
///
/// The entropy handle is opened for this call only.
pub fn shuffle(input: &str, preserve_spaces: bool) -> Result<String, ShuffleError> {
    let options = ShuffleOptions {
        preserve_spaces,
        ..Default::default()
    };
    let mut source = OsIndexSource::from_os_entropy();
    shuffle_with(input, options, &mut source)
}

/// Runs a [`ShuffleRequest`] with OS entropy.
///
/// Fails with [`ShuffleError::NullArgument`] before any entropy is
/// consumed when the request carries no text.
pub fn shuffle_request(request: &ShuffleRequest) -> Result<String, ShuffleError> {
    let text = request.text.as_deref().ok_or(ShuffleError::NullArgument)?;
    let mut source = OsIndexSource::from_os_entropy();
    shuffle_with(text, request.options, &mut source)
}

/// Runs a [`ShuffleRequest`] against a caller-supplied source.
pub fn shuffle_request_with<S>(
    request: &ShuffleRequest,
    source: &mut S,
) -> Result<String, ShuffleError>
where
    S: SecureRandomIndexSource + ?Sized,
{
    let text = request.text.as_deref().ok_or(ShuffleError::NullArgument)?;
    shuffle_with(text, request.options, source)
}
