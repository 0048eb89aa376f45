//! SQL identifier validation for column resolvers.
//!
//! [`Ident`] is a dotted identifier (`t.col`, `public."User".id`) whose parts are either
//! unquoted (`[A-Za-z_][A-Za-z0-9_$]*`) or double-quoted (any character except NUL, with `"`
//! escaped as `""`). Column text that goes through [`IdentColumns`](crate::IdentColumns) or
//! [`TableColumns`](crate::TableColumns) is parsed here, so a resolved column can never smuggle
//! operators or comments into the rendered expression.

use crate::error::{WrapperError, WrapperResult};
use std::fmt;

/// One dot-separated part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A validated, possibly qualified SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    parts: Vec<IdentPart>,
}

/// Whether `s` is a plain word: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Used for aliases and parameter-name prefixes, which end up inside bind references.
pub fn is_plain_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

impl Ident {
    /// Parse dotted/quoted identifier text.
    pub fn parse(s: &str) -> WrapperResult<Self> {
        if s.is_empty() {
            return Err(WrapperError::invalid_ident("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(WrapperError::invalid_ident(
                "identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut rest = s;
        loop {
            let (part, tail) = if let Some(quoted) = rest.strip_prefix('"') {
                parse_quoted(quoted)?
            } else {
                parse_unquoted(rest)?
            };
            parts.push(part);

            match tail.strip_prefix('.') {
                Some("") => return Err(WrapperError::invalid_ident("trailing '.'")),
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => {
                    let c = tail.chars().next().unwrap_or_default();
                    return Err(WrapperError::invalid_ident(format!(
                        "expected '.' between parts, got '{c}'"
                    )));
                }
            }
        }

        Ok(Self { parts })
    }

    /// A single quoted part, for names that are not valid unquoted identifiers.
    pub fn quoted(name: &str) -> WrapperResult<Self> {
        if name.is_empty() {
            return Err(WrapperError::invalid_ident("empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(WrapperError::invalid_ident(
                "identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Prefix this identifier with `qualifier` (e.g. a table alias).
    pub fn qualified_by(mut self, qualifier: &Ident) -> Self {
        let mut parts = qualifier.parts.clone();
        parts.append(&mut self.parts);
        Self { parts }
    }

    /// The dot-separated parts.
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// Render as SQL text.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                IdentPart::Unquoted(name) => f.write_str(name)?,
                IdentPart::Quoted(name) => write!(f, "\"{}\"", name.replace('"', "\"\""))?,
            }
        }
        Ok(())
    }
}

fn parse_quoted(s: &str) -> WrapperResult<(IdentPart, &str)> {
    let mut name = String::new();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        // `""` is an escaped quote; a lone `"` closes the part.
        if matches!(chars.peek(), Some((_, '"'))) {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(WrapperError::invalid_ident("empty quoted identifier"));
        }
        return Ok((IdentPart::Quoted(name), &s[i + 1..]));
    }
    Err(WrapperError::invalid_ident("unclosed quoted identifier"))
}

fn parse_unquoted(s: &str) -> WrapperResult<(IdentPart, &str)> {
    let end = s.find('.').unwrap_or(s.len());
    let name = &s[..end];
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(WrapperError::invalid_ident("empty identifier segment")),
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(WrapperError::invalid_ident(format!(
                "invalid start character '{c}'"
            )));
        }
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
        return Err(WrapperError::invalid_ident(format!(
            "invalid character '{c}' in '{name}'"
        )));
    }
    Ok((IdentPart::Unquoted(name.to_string()), &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_and_dotted() {
        assert_eq!(Ident::parse("age").unwrap().to_sql(), "age");
        assert_eq!(Ident::parse("u.age").unwrap().to_sql(), "u.age");
        assert_eq!(
            Ident::parse("public.users.age").unwrap().to_sql(),
            "public.users.age"
        );
    }

    #[test]
    fn parses_quoted_parts() {
        let ident = Ident::parse(r#"public."UserTable".id"#).unwrap();
        assert_eq!(ident.parts().len(), 3);
        assert_eq!(ident.to_sql(), r#"public."UserTable".id"#);

        let escaped = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(escaped.parts(), &[IdentPart::Quoted("has\"quote".into())]);
        assert_eq!(escaped.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn qualifies_with_table_alias() {
        let col = Ident::parse("name").unwrap();
        let table = Ident::parse("u").unwrap();
        assert_eq!(col.qualified_by(&table).to_sql(), "u.name");
    }

    #[test]
    fn rejects_injection_shaped_text() {
        assert!(Ident::parse("age = 1 OR 1").is_err());
        assert!(Ident::parse("age;--").is_err());
        assert!(Ident::parse("1col").is_err());
        assert!(Ident::parse("a..b").is_err());
        assert!(Ident::parse("a.").is_err());
        assert!(Ident::parse(r#""open"#).is_err());
        assert!(Ident::parse(r#""""#).is_err());
        assert!(Ident::parse("").is_err());
    }

    #[test]
    fn plain_words() {
        assert!(is_plain_word("ew"));
        assert!(is_plain_word("_sub1"));
        assert!(!is_plain_word(""));
        assert!(!is_plain_word("1ew"));
        assert!(!is_plain_word("e.w"));
        assert!(!is_plain_word("e$w"));
    }
}
