//! Line-oriented document model
//!
//! Splits text into lines while remembering how it was terminated, so that
//! [`Document::to_text`] reproduces the input byte for byte when nothing was
//! changed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches any single line terminator, CRLF first so it is never split in two.
static LINE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("Invalid line break regex"));

/// Line terminators of LF and CRLF documents. A lone CR is line content there.
static NEWLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("Invalid newline regex"));

/// Line terminator convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// Detect the convention used by `text`.
    ///
    /// The most frequent terminator wins. Ties go to LF, then CRLF. Text
    /// without terminators is LF.
    pub fn detect(text: &str) -> Self {
        let (mut lf, mut crlf, mut cr) = (0usize, 0usize, 0usize);
        for terminator in LINE_BREAK_REGEX.find_iter(text) {
            match terminator.as_str() {
                "\r\n" => crlf += 1,
                "\r" => cr += 1,
                _ => lf += 1,
            }
        }

        if lf >= crlf && lf >= cr {
            Self::Lf
        } else if crlf >= cr {
            Self::CrLf
        } else {
            Self::Cr
        }
    }

    /// Terminators that end a line in a document of this style.
    fn splitter(&self) -> &'static Regex {
        match self {
            Self::Cr => &*LINE_BREAK_REGEX,
            Self::Lf | Self::CrLf => &*NEWLINE_REGEX,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

/// A workflow document as an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Document {
    /// Parse text into lines.
    ///
    /// Empty text yields a document with no lines. A document that mixes
    /// terminator styles is written back using the detected style. Outside
    /// CR documents a lone `\r` stays part of its line.
    pub fn parse(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        if text.is_empty() {
            return Self {
                lines: Vec::new(),
                line_ending,
                trailing_newline: false,
            };
        }

        let trailing_newline = match line_ending {
            LineEnding::Cr => text.ends_with('\n') || text.ends_with('\r'),
            LineEnding::Lf | LineEnding::CrLf => text.ends_with('\n'),
        };
        let mut lines: Vec<String> = line_ending
            .splitter()
            .split(text)
            .map(str::to_string)
            .collect();
        if trailing_newline {
            // split yields an empty piece after the final terminator
            lines.pop();
        }

        Self {
            lines,
            line_ending,
            trailing_newline,
        }
    }

    /// Serialize back to text using the original terminator and
    /// trailing-newline state.
    pub fn to_text(&self) -> String {
        let eol = self.line_ending.as_str();
        let mut text = self.lines.join(eol);
        if self.trailing_newline {
            text.push_str(eol);
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A new document with `lines` and this document's formatting.
    pub(crate) fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
