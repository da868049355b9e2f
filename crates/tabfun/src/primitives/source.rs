//! Sample sources backing the interpolation table.
//!
//! ## Purpose
//!
//! This module abstracts where table samples come from. The interpolator asks
//! a [`SampleSource`] for a fresh stream on every lookup and consumes it only
//! as far as it needs to.
//!
//! ## Design notes
//!
//! * **Streaming**: Sources hand out lazy iterators; nothing is bulk-loaded.
//! * **Stateless**: Sources are re-opened per lookup, no caching across calls.
//! * **Injectable**: [`MemorySource`] stands in for a file in tests.
//!
//! ## Key concepts
//!
//! * **File format**: whitespace or newline separated real numbers, read as
//!   consecutive `x y` pairs. A pair may span lines.
//! * **Fused errors**: after a read or parse error the stream ends.
//!
//! ## Invariants
//!
//! * Samples are yielded in source order; ascending `x` is assumed, not checked.
//! * Dropping a stream releases the underlying handle.
//!
//! ## Non-goals
//!
//! * This module does not sort or validate sample ordering.
//! * This module does not write data.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use num_traits::Float;

use crate::primitives::errors::EvalError;
use crate::primitives::sample::Sample;

/// Conventional name of the table file.
pub const DEFAULT_SOURCE: &str = "dat_1.dat";

/// Lazy stream of samples handed out by a source.
pub type SampleStream<'a, T> = Box<dyn Iterator<Item = Result<Sample<T>, EvalError>> + 'a>;

// ============================================================================
// Source Trait
// ============================================================================

/// A named, read-only provider of ordered samples.
pub trait SampleSource<T> {
    /// Human-readable name used in errors and diagnostics.
    fn name(&self) -> &str;

    /// Open a fresh stream over the samples.
    ///
    /// Fails with [`EvalError::SourceUnavailable`] if the backing store cannot
    /// be opened.
    fn open(&self) -> Result<SampleStream<'_, T>, EvalError>;
}

/// Shared sources, so a caller can keep a handle on what an evaluator reads.
impl<T, S: SampleSource<T> + ?Sized> SampleSource<T> for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn open(&self) -> Result<SampleStream<'_, T>, EvalError> {
        (**self).open()
    }
}

// ============================================================================
// Text Reader
// ============================================================================

/// Parses `x y` pairs out of buffered text, one token at a time.
pub struct SampleReader<R, T> {
    reader: R,
    source: String,
    buf: String,
    line: usize,
    tokens: VecDeque<(String, usize)>,
    done: bool,
    _marker: PhantomData<T>,
}

impl<R: BufRead, T: Float> SampleReader<R, T> {
    /// Wrap a buffered reader; `source` names it in errors.
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            buf: String::new(),
            line: 0,
            tokens: VecDeque::new(),
            done: false,
            _marker: PhantomData,
        }
    }

    fn next_token(&mut self) -> Result<Option<(String, usize)>, EvalError> {
        while self.tokens.is_empty() {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|e| EvalError::SourceUnavailable {
                    source: self.source.clone(),
                    reason: e.to_string(),
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let line = self.line;
            self.tokens
                .extend(self.buf.split_whitespace().map(|t| (t.to_owned(), line)));
        }
        Ok(self.tokens.pop_front())
    }

    fn parse(&self, token: &str, line: usize) -> Result<T, EvalError> {
        token
            .parse::<f64>()
            .ok()
            .and_then(T::from)
            .ok_or_else(|| EvalError::MalformedSample {
                source: self.source.clone(),
                line,
                token: token.to_owned(),
            })
    }

    fn read_sample(&mut self) -> Result<Option<Sample<T>>, EvalError> {
        let Some((x_token, x_line)) = self.next_token()? else {
            return Ok(None);
        };
        let x = self.parse(&x_token, x_line)?;
        let Some((y_token, y_line)) = self.next_token()? else {
            return Err(EvalError::MalformedSample {
                source: self.source.clone(),
                line: x_line,
                token: format!("missing y after x = {x_token}"),
            });
        };
        let y = self.parse(&y_token, y_line)?;
        Ok(Some(Sample::new(x, y)))
    }
}

impl<R: BufRead, T: Float> Iterator for SampleReader<R, T> {
    type Item = Result<Sample<T>, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_sample() {
            Ok(Some(sample)) => Some(Ok(sample)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ============================================================================
// File Source
// ============================================================================

/// Samples stored in a text file, re-opened on every lookup.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Source backed by the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE)
    }
}

impl<T: Float + 'static> SampleSource<T> for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<SampleStream<'_, T>, EvalError> {
        let file = File::open(&self.path).map_err(|e| EvalError::SourceUnavailable {
            source: self.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(SampleReader::new(
            BufReader::new(file),
            self.name.clone(),
        )))
    }
}

// ============================================================================
// Memory Source
// ============================================================================

/// In-memory samples with open/read counters.
#[derive(Debug)]
pub struct MemorySource<T> {
    name: String,
    samples: Vec<Sample<T>>,
    opens: AtomicUsize,
    reads: AtomicUsize,
}

impl<T: Float> MemorySource<T> {
    /// Source over `samples`, kept in the given order.
    pub fn new(name: impl Into<String>, samples: Vec<Sample<T>>) -> Self {
        Self {
            name: name.into(),
            samples,
            opens: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    /// Source over `(x, y)` tuples.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(T, T)]) -> Self {
        Self::new(name, pairs.iter().copied().map(Sample::from).collect())
    }

    /// Number of times the source has been opened.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    /// Number of samples handed out across all streams.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl<T: Float> SampleSource<T> for MemorySource<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<SampleStream<'_, T>, EvalError> {
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(self.samples.iter().map(move |s| {
            self.reads.fetch_add(1, Ordering::Relaxed);
            Ok::<_, EvalError>(*s)
        })))
    }
}
