//! Path expression scanner.
//!
//! Splits expressions such as `a[0].b["c-d"]` into tokens. The scanner never
//! fails: positions where no token can start are skipped one character at a
//! time and reported as [`Recovery`] diagnostics.

use super::ast::TokenPath;
use std::fmt;

/// Characters with a meaning in the path grammar.
const METACHARACTERS: [char; 3] = ['.', '[', ']'];

fn is_meta(ch: char) -> bool {
    METACHARACTERS.contains(&ch)
}

/// A position where the scanner could not start a token and skipped ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Character offset of the skipped character.
    pub position: usize,
    /// The skipped character.
    pub found: char,
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no path token at position {} (found '{}'), skipped one character",
            self.position, self.found
        )
    }
}

/// Result of scanning an expression together with its diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub path: TokenPath,
    pub recoveries: Vec<Recovery>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.recoveries.is_empty()
    }
}

/// Which token shape the scanner is about to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `.` before a token.
    Separator,
    /// `['…']` or `["…"]`.
    QuotedBracket,
    /// `[123]`.
    NumericBracket,
    /// A run of non-metacharacters.
    BareToken,
}

/// Scanner for path expressions.
pub struct Parser {
    input: Vec<char>,
    position: usize,
    path: TokenPath,
    recoveries: Vec<Recovery>,
}

impl Parser {
    /// Creates a new parser for the given expression.
    pub fn new(expr: &str) -> Self {
        Self {
            input: expr.chars().collect(),
            position: 0,
            path: TokenPath::default(),
            recoveries: Vec::new(),
        }
    }

    /// Parses an expression into tokens, logging any recoveries.
    ///
    /// # Example
    ///
    /// ```
    /// use structprobe::path::Parser;
    ///
    /// let path = Parser::parse(r#"a[0].b["c-d"]"#);
    /// assert_eq!(path, ["a", "0", "b", "c-d"]);
    /// ```
    pub fn parse(expr: &str) -> TokenPath {
        Self::parse_with_recoveries(expr).path
    }

    /// Parses an optional expression; `None` yields an empty path.
    pub fn parse_optional(expr: Option<&str>) -> TokenPath {
        expr.map(Self::parse).unwrap_or_default()
    }

    /// Parses an expression and returns the recoveries alongside the tokens.
    pub fn parse_with_recoveries(expr: &str) -> ParseOutcome {
        if expr.trim().is_empty() {
            return ParseOutcome::default();
        }

        let mut parser = Parser::new(expr);
        parser.scan_all();

        if parser.path.is_empty() && !expr.contains(METACHARACTERS) {
            parser.path.push(expr.to_string());
        }

        for recovery in &parser.recoveries {
            log::warn!("path `{}`: {}", expr, recovery);
        }

        ParseOutcome {
            path: parser.path,
            recoveries: parser.recoveries,
        }
    }

    fn scan_all(&mut self) {
        while !self.is_eof() {
            let start = self.position;
            match self.scan_token() {
                Some(token) if self.position > start => self.path.push(token),
                _ => {
                    self.position = start;
                    self.force_advance();
                }
            }
        }
    }

    /// Scans one token, consuming an optional leading separator.
    fn scan_token(&mut self) -> Option<String> {
        if self.peek_transition() == Some(Transition::Separator) {
            self.next();
        }
        match self.peek_transition()? {
            Transition::Separator => None,
            Transition::QuotedBracket => self.scan_quoted_bracket(),
            Transition::NumericBracket => self.scan_numeric_bracket(),
            Transition::BareToken => Some(self.scan_bare()),
        }
    }

    /// Classifies the token shape starting at the current position.
    pub fn peek_transition(&self) -> Option<Transition> {
        match self.peek()? {
            '.' => Some(Transition::Separator),
            '[' => {
                let mut offset = self.position + 1;
                while self.input.get(offset).is_some_and(|c| c.is_whitespace()) {
                    offset += 1;
                }
                match self.input.get(offset) {
                    Some('\'') | Some('"') => Some(Transition::QuotedBracket),
                    Some(c) if c.is_ascii_digit() => Some(Transition::NumericBracket),
                    _ => None,
                }
            }
            ']' => None,
            _ => Some(Transition::BareToken),
        }
    }

    /// Skips one character the scanner could not use.
    fn force_advance(&mut self) {
        if let Some(found) = self.next() {
            self.recoveries.push(Recovery {
                position: self.position - 1,
                found,
            });
        }
    }

    /// `[ 'text' ]`: the closing quote is the first matching quote that is
    /// followed by optional whitespace and `]`.
    fn scan_quoted_bracket(&mut self) -> Option<String> {
        let start = self.position;
        self.expect('[')?;
        self.skip_whitespace();
        let quote = self.next()?;
        let content_start = self.position;

        let mut cursor = content_start;
        while cursor < self.input.len() {
            if self.input[cursor] == quote {
                let mut after = cursor + 1;
                while self.input.get(after).is_some_and(|c| c.is_whitespace()) {
                    after += 1;
                }
                if self.input.get(after) == Some(&']') {
                    let token: String = self.input[content_start..cursor].iter().collect();
                    self.position = after + 1;
                    return Some(token);
                }
            }
            cursor += 1;
        }

        self.position = start;
        None
    }

    /// `[ 123 ]`.
    fn scan_numeric_bracket(&mut self) -> Option<String> {
        let start = self.position;
        self.expect('[')?;
        self.skip_whitespace();
        let mut digits = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.next();
        }
        self.skip_whitespace();
        if digits.is_empty() || self.expect(']').is_none() {
            self.position = start;
            return None;
        }
        Some(digits)
    }

    fn scan_bare(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self.peek().filter(|c| !is_meta(*c)) {
            name.push(ch);
            self.next();
        }
        name
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        if self.peek() == Some(expected) {
            self.next();
            Some(())
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        assert_eq!(Parser::parse("store.book.title"), ["store", "book", "title"]);
    }

    #[test]
    fn test_parse_mixed_notation() {
        assert_eq!(Parser::parse(r#"a[0].b["c-d"]"#), ["a", "0", "b", "c-d"]);
    }

    #[test]
    fn test_parse_leading_dot_is_optional() {
        assert_eq!(Parser::parse(".a.b"), ["a", "b"]);
    }

    #[test]
    fn test_parse_quoted_keeps_metacharacters() {
        assert_eq!(Parser::parse("['a.b'][\"[x]\"]"), ["a.b", "[x]"]);
    }

    #[test]
    fn test_parse_quoted_with_inner_quote() {
        assert_eq!(Parser::parse("['it's']"), ["it's"]);
    }

    #[test]
    fn test_parse_empty_quoted_key() {
        assert_eq!(Parser::parse("a['']"), ["a", ""]);
    }

    #[test]
    fn test_parse_whitespace_inside_brackets() {
        assert_eq!(Parser::parse("a[ 12 ][ 'b' ]"), ["a", "12", "b"]);
    }

    #[test]
    fn test_parse_blank_input() {
        assert!(Parser::parse("").is_empty());
        assert!(Parser::parse("   \t").is_empty());
        assert!(Parser::parse_optional(None).is_empty());
    }

    #[test]
    fn test_parse_single_bare_token() {
        assert_eq!(Parser::parse("name"), ["name"]);
        assert_eq!(Parser::parse("with space"), ["with space"]);
    }

    #[test]
    fn test_clean_parse_has_no_recoveries() {
        let outcome = Parser::parse_with_recoveries("a.b[1]");
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_double_dot_recovers() {
        let outcome = Parser::parse_with_recoveries("a..b");
        assert_eq!(outcome.path, ["a", "b"]);
        assert_eq!(
            outcome.recoveries,
            vec![Recovery {
                position: 1,
                found: '.'
            }]
        );
    }

    #[test]
    fn test_unquoted_non_numeric_bracket_recovers() {
        let outcome = Parser::parse_with_recoveries("a[b]");
        assert_eq!(outcome.path, ["a", "b"]);
        let skipped: Vec<char> = outcome.recoveries.iter().map(|r| r.found).collect();
        assert_eq!(skipped, vec!['[', ']']);
    }

    #[test]
    fn test_unterminated_quote_recovers() {
        let outcome = Parser::parse_with_recoveries("a['b");
        assert_eq!(outcome.path, ["a", "'b"]);
        assert_eq!(outcome.recoveries.len(), 1);
    }

    #[test]
    fn test_only_metacharacters_terminates() {
        let outcome = Parser::parse_with_recoveries("..[]");
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.recoveries.len(), 4);
    }

    #[test]
    fn test_trailing_dot_recovers() {
        let outcome = Parser::parse_with_recoveries("a.");
        assert_eq!(outcome.path, ["a"]);
        assert_eq!(outcome.recoveries.len(), 1);
    }

    #[test]
    fn test_peek_transition() {
        assert_eq!(Parser::new(".a").peek_transition(), Some(Transition::Separator));
        assert_eq!(Parser::new("['a']").peek_transition(), Some(Transition::QuotedBracket));
        assert_eq!(Parser::new("[ 1]").peek_transition(), Some(Transition::NumericBracket));
        assert_eq!(Parser::new("a").peek_transition(), Some(Transition::BareToken));
        assert_eq!(Parser::new("[x]").peek_transition(), None);
        assert_eq!(Parser::new("]").peek_transition(), None);
    }

    #[test]
    fn test_unicode_tokens() {
        assert_eq!(Parser::parse("données.clé[0]"), ["données", "clé", "0"]);
    }
}
