//! Wildcard pattern syntax.
//!
//! A pattern is a sequence of atoms, each optionally followed by one
//! quantifier. A pattern must match a whole key.
//!
//! | Syntax    | Meaning                                    |
//! |-----------|--------------------------------------------|
//! | `c`       | the literal character `c`                  |
//! | `.`       | any single character                       |
//! | `[a-dx]`  | any character in the listed ranges         |
//! | `[^a-d]`  | any character outside the listed ranges    |
//! | `\c`      | `c` taken literally, even a metacharacter  |
//! | `?`       | preceding atom zero or one time            |
//! | `*`       | preceding atom zero or more times          |
//! | `+`       | preceding atom one or more times           |
//!
//! Inside brackets, `a-d` is an inclusive range and a `-` that cannot
//! form a range (first or last in the group) is an error; escape it as
//! `\-` to list it.

use crate::error::{CoreError, CoreResult};
use std::iter::Peekable;
use std::str::Chars;

/// A set of characters given as inclusive ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
    negated: bool,
}

impl CharClass {
    /// Returns true if `c` belongs to the class.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        let listed = self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi);
        listed != self.negated
    }

    /// Whether the class matches characters outside its ranges.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Listed characters, range by range, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = char> + '_ {
        self.ranges.iter().flat_map(|&(lo, hi)| lo..=hi)
    }
}

/// What a single pattern position matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// Any character (`.`).
    Any,
    /// Exactly this character.
    Literal(char),
    /// A bracketed character class.
    Class(CharClass),
}

impl Atom {
    /// Returns true if the atom accepts `c`.
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        match self {
            Atom::Any => true,
            Atom::Literal(l) => *l == c,
            Atom::Class(class) => class.contains(c),
        }
    }
}

/// How many times an atom may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Exactly once.
    One,
    /// Zero or one time (`?`).
    Optional,
    /// Zero or more times (`*`).
    Star,
    /// One or more times (`+`).
    Plus,
}

impl Quantifier {
    /// Whether the atom may be skipped entirely.
    #[must_use]
    pub const fn allows_zero(self) -> bool {
        matches!(self, Quantifier::Optional | Quantifier::Star)
    }

    /// Whether the atom may match more than once.
    #[must_use]
    pub const fn repeats(self) -> bool {
        matches!(self, Quantifier::Star | Quantifier::Plus)
    }
}

/// An atom with its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What to match.
    pub atom: Atom,
    /// How often.
    pub quantifier: Quantifier,
}

/// A parsed wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Parses a pattern. Malformed input fails as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] for an unterminated or empty
    /// bracket group, a range missing a member, an inverted range, a
    /// quantifier with nothing to repeat, or a trailing `\`.
    pub fn parse(pattern: &str) -> CoreResult<Self> {
        let fail = |message: &str| CoreError::invalid_pattern(pattern, message);
        let mut chars = pattern.chars().peekable();
        let mut tokens = Vec::new();

        while let Some(c) = chars.next() {
            let atom = match c {
                '.' => Atom::Any,
                '\\' => Atom::Literal(chars.next().ok_or_else(|| fail("trailing escape"))?),
                '[' => Atom::Class(parse_class(&mut chars).map_err(fail)?),
                '?' | '*' | '+' => return Err(fail("quantifier without an atom")),
                other => Atom::Literal(other),
            };

            let quantifier = match chars.peek() {
                Some('?') => Quantifier::Optional,
                Some('*') => Quantifier::Star,
                Some('+') => Quantifier::Plus,
                _ => Quantifier::One,
            };
            if quantifier != Quantifier::One {
                chars.next();
            }

            tokens.push(Token { atom, quantifier });
        }

        Ok(Self { tokens })
    }

    /// The parsed tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true for the empty pattern, which only matches the empty key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parses a bracket group; the opening `[` is already consumed.
fn parse_class(chars: &mut Peekable<Chars<'_>>) -> Result<CharClass, &'static str> {
    let negated = chars.next_if_eq(&'^').is_some();

    // (char, escaped)
    let mut items = Vec::new();
    loop {
        match chars.next() {
            None => return Err("unterminated character class"),
            Some(']') => break,
            Some('\\') => items.push((chars.next().ok_or("trailing escape")?, true)),
            Some(c) => items.push((c, false)),
        }
    }
    if items.is_empty() {
        return Err("empty character class");
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let (lo, escaped) = items[i];
        if lo == '-' && !escaped {
            return Err("range missing its start");
        }
        if items.get(i + 1) == Some(&('-', false)) {
            let &(hi, _) = items.get(i + 2).ok_or("range missing its end")?;
            if hi < lo {
                return Err("inverted range");
            }
            ranges.push((lo, hi));
            i += 3;
        } else {
            ranges.push((lo, lo));
            i += 1;
        }
    }

    Ok(CharClass { ranges, negated })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(group: &str) -> CoreResult<CharClass> {
        let pattern = Pattern::parse(&format!("[{group}]"))?;
        match &pattern.tokens()[0].atom {
            Atom::Class(class) => Ok(class.clone()),
            other => panic!("expected a class, got {other:?}"),
        }
    }

    fn members(group: &str) -> String {
        class(group).unwrap().members().collect()
    }

    #[test]
    fn class_of_single_letters() {
        assert_eq!(members("asdf"), "asdf");
    }

    #[test]
    fn class_range() {
        assert_eq!(members("a-d"), "abcd");
    }

    #[test]
    fn class_mixed() {
        assert_eq!(members("af-iz"), "afghiz");
        assert_eq!(members("a-dx-z"), "abcdxyz");
    }

    #[test]
    fn class_dash_at_edges_is_an_error() {
        assert!(matches!(class("-a"), Err(CoreError::InvalidPattern { .. })));
        assert!(matches!(class("a-"), Err(CoreError::InvalidPattern { .. })));
        assert!(matches!(class("a-c-"), Err(CoreError::InvalidPattern { .. })));
    }

    #[test]
    fn class_escaped_dash() {
        assert_eq!(members("\\-a"), "-a");
    }

    #[test]
    fn class_inverted_range() {
        assert!(matches!(class("z-a"), Err(CoreError::InvalidPattern { .. })));
    }

    #[test]
    fn negated_class() {
        let c = class("^a-c").unwrap();
        assert!(c.is_negated());
        assert!(!c.contains('b'));
        assert!(c.contains('x'));
    }

    #[test]
    fn quantifiers() {
        let pattern = Pattern::parse("ha?e*l+.").unwrap();
        let quantifiers: Vec<_> = pattern.tokens().iter().map(|t| t.quantifier).collect();
        assert_eq!(
            quantifiers,
            vec![
                Quantifier::One,
                Quantifier::Optional,
                Quantifier::Star,
                Quantifier::Plus,
                Quantifier::One
            ]
        );
        assert_eq!(pattern.tokens()[4].atom, Atom::Any);
    }

    #[test]
    fn escapes_are_literal() {
        let pattern = Pattern::parse("a\\.\\*").unwrap();
        let atoms: Vec<_> = pattern.tokens().iter().map(|t| t.atom.clone()).collect();
        assert_eq!(
            atoms,
            vec![Atom::Literal('a'), Atom::Literal('.'), Atom::Literal('*')]
        );
    }

    #[test]
    fn malformed_patterns() {
        for bad in ["*abc", "a**", "ab\\", "[abc", "[]", "a+?"] {
            assert!(
                matches!(Pattern::parse(bad), Err(CoreError::InvalidPattern { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn empty_pattern() {
        assert!(Pattern::parse("").unwrap().is_empty());
    }
}
