// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the assignment domain.
//!
//! This module turns whitespace-delimited text streams into a validated
//! [`CostMatrix`], so benchmark and test instances can live in plain files.
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string slice.
//! Lines may contain comments introduced by `#`, which are ignored during
//! tokenization. Inputs are read in a straightforward order: the worker and
//! job counts first, then the `rows × cols` cost entries in row-major order.
//! All structural validation (irregularity is impossible in the flat format,
//! but finiteness and shape still apply) is delegated to the matrix
//! constructor, producing descriptive errors that point at the offending
//! entry.

use crate::matrix::{CostMatrix, CostMatrixError};
use num_traits::Float;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum MatrixLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing cost entries).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The declared dimensions are invalid (the worker count must be > 0).
    InvalidDimensions,
    /// Strict mode found leftover tokens after the declared entries.
    TrailingContent(String),
    /// The parsed values did not form a valid cost matrix.
    Matrix(CostMatrixError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for MatrixLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => {
                write!(f, "The worker count must be a positive integer")
            }
            Self::TrailingContent(token) => {
                write!(f, "Unexpected trailing content after instance data: '{}'", token)
            }
            Self::Matrix(e) => write!(f, "Matrix error: {}", e),
        }
    }
}

impl std::error::Error for MatrixLoaderError {}

impl From<std::io::Error> for MatrixLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for MatrixLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<CostMatrixError> for MatrixLoaderError {
    fn from(e: CostMatrixError) -> Self {
        Self::Matrix(e)
    }
}

/// A configurable loader for assignment problem instances.
///
/// The format this parser expects is as follows (whitespace-separated tokens):
///
/// ```raw
/// R C # number of workers, number of jobs
/// c_1_1 ... c_1_|C| (costs of worker 1 on job 1, job 2, ...)
/// ...
/// c_|R|_1 ... c_|R|_|C|
/// ```
///
/// # Configuration
/// * `strict`: If true, the loader returns an error when tokens remain after
///   the declared `R * C` entries, catching shape typos in instance files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader {
    strict: bool,
}

impl Default for MatrixLoader {
    fn default() -> Self {
        Self { strict: false }
    }
}

impl MatrixLoader {
    /// Creates a new `MatrixLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether trailing tokens after the declared entries are an
    /// error.
    #[inline]
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<T, R>(&self, rdr: R) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: Float + FromStr,
        R: BufRead,
    {
        let mut sc = Scanner::new(rdr);

        // Read Dimensions
        let num_workers: usize = sc.next()?;
        let num_jobs: usize = sc.next()?;

        if num_workers == 0 {
            return Err(MatrixLoaderError::InvalidDimensions);
        }

        // Read the cost entries in row-major order
        let mut values = Vec::with_capacity(num_workers * num_jobs);
        for _ in 0..num_workers * num_jobs {
            let value: T = sc.next()?;
            values.push(value);
        }

        if self.strict
            && let Some(token) = sc.take_token()?
        {
            return Err(MatrixLoaderError::TrailingContent(token));
        }

        Ok(CostMatrix::from_flat(num_workers, num_jobs, values)?)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<T, P>(&self, path: P) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: Float + FromStr,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<T, R>(&self, r: R) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: Float + FromStr,
        R: Read,
    {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str<T>(&self, s: &str) -> Result<CostMatrix<T>, MatrixLoaderError>
    where
        T: Float + FromStr,
    {
        self.from_reader(s.as_bytes())
    }
}

/// A helper to read whitespace-delimited tokens from a generic reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    /// Creates a new `Scanner` wrapping the given reader.
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the internal line buffer. Returns `Ok(true)` if data read, `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, MatrixLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self
            .rdr
            .read_line(&mut self.buf)
            .map_err(MatrixLoaderError::Io)?;
        Ok(n > 0)
    }

    /// Consumes and returns the next raw token, if any remains.
    /// Automatically skips whitespace and comments starting with '#'.
    fn take_token(&mut self) -> Result<Option<String>, MatrixLoaderError> {
        loop {
            // Refill buffer if empty or consumed
            if self.pos >= self.buf.len() && !self.fill_line()? {
                return Ok(None);
            }

            // Skip whitespace and comments
            while self.pos < self.buf.len() {
                let remainder = &self.buf[self.pos..];

                // Found a comment? Skip to end of line immediately.
                if remainder.starts_with('#') {
                    self.pos = self.buf.len();
                    break;
                }

                let c = remainder.chars().next().unwrap();
                if !c.is_whitespace() {
                    break; // Found start of a token
                }

                self.pos += c.len_utf8();
            }

            // If we consumed the whole line (whitespace/comments), loop to get next line
            if self.pos >= self.buf.len() {
                continue;
            }

            // Find end of token
            let mut end = self.pos;
            while end < self.buf.len() {
                let remainder = &self.buf[end..];

                // Token ends at whitespace or start of a comment
                if remainder.starts_with('#') {
                    break;
                }

                let c = remainder.chars().next().unwrap();
                if c.is_whitespace() {
                    break;
                }
                end += c.len_utf8();
            }

            let token = self.buf[self.pos..end].to_owned();
            self.pos = end;

            if token.is_empty() {
                continue;
            }

            return Ok(Some(token));
        }
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, MatrixLoaderError>
    where
        T: FromStr,
    {
        let token = self.take_token()?.ok_or(MatrixLoaderError::UnexpectedEof)?;

        token.parse::<T>().map_err(|_| {
            MatrixLoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<T>(),
            })
        })
    }
}
