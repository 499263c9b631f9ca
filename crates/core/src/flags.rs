//! Flag extraction from example command lines.
//!
//! Commands are split on whitespace runs only. Quoted values containing
//! spaces are not kept together, so `--msg "a b"` yields the value `"a`.

/// A flag found in an example command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// The flag token as written, e.g. `--config` or `-v`.
    pub name: String,
    /// The token following the flag, if it was consumed as its value.
    pub value: Option<String>,
    /// True when there is no value or the value is `true`/`false`.
    pub is_boolean: bool,
    /// Byte offset of the flag name in the original command.
    pub start: usize,
    /// Byte offset just past the value (or past the name for a bare flag).
    pub end: usize,
}

/// A piece of an example command, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Flag(Flag),
}

/// Base command text plus the flags that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub base: String,
    pub flags: Vec<Flag>,
}

#[derive(Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Token<'_> {
    fn is_flag(&self) -> bool {
        self.text.starts_with('-')
    }
}

struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    fn new(command: &'a str) -> Self {
        Self {
            tokens: tokenize(command),
            cursor: 0,
        }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.cursor).copied();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.cursor).copied()
    }
}

fn tokenize(command: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in command.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &command[s..i],
                    start: s,
                    end: i,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &command[s..],
            start: s,
            end: command.len(),
        });
    }

    tokens
}

fn is_boolean_value(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

fn read_flag(name: Token<'_>, stream: &mut TokenStream<'_>) -> Flag {
    match stream.peek() {
        Some(value) if !value.is_flag() => {
            stream.next();
            Flag {
                name: name.text.to_string(),
                value: Some(value.text.to_string()),
                is_boolean: is_boolean_value(value.text),
                start: name.start,
                end: value.end,
            }
        }
        _ => Flag {
            name: name.text.to_string(),
            value: None,
            is_boolean: true,
            start: name.start,
            end: name.end,
        },
    }
}

/// Splits a command into static runs and flags, keeping their order.
///
/// Static text between flags (a subcommand phrase, say) is kept as its own
/// segment, with tokens joined by single spaces.
#[must_use]
pub fn segments(command: &str) -> Vec<Segment> {
    let mut stream = TokenStream::new(command);
    let mut segments = Vec::new();
    let mut static_run: Vec<&str> = Vec::new();

    while let Some(token) = stream.next() {
        if token.is_flag() {
            if !static_run.is_empty() {
                segments.push(Segment::Static(static_run.join(" ")));
                static_run.clear();
            }
            segments.push(Segment::Flag(read_flag(token, &mut stream)));
        } else {
            static_run.push(token.text);
        }
    }

    if !static_run.is_empty() {
        segments.push(Segment::Static(static_run.join(" ")));
    }

    segments
}

/// Extracts the base command and its flags.
///
/// The base is every non-flag token before the first flag. Unconsumed
/// tokens after the first flag are not part of the base; use [`segments`]
/// when they matter.
#[must_use]
pub fn extract(command: &str) -> Extraction {
    let mut extraction = Extraction::default();
    let mut base: Vec<String> = Vec::new();

    for segment in segments(command) {
        match segment {
            Segment::Static(text) if extraction.flags.is_empty() => base.push(text),
            Segment::Static(_) => {}
            Segment::Flag(flag) => extraction.flags.push(flag),
        }
    }

    extraction.base = base.join(" ");
    extraction
}
