//! Segments: the atomic units a [`Wrapper`](crate::Wrapper) renders.

use std::fmt;

/// Fixed SQL keyword and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Or,
    Not,
    In,
    NotIn,
    Exists,
    NotExists,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    NotLike,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
    GroupBy,
    OrderBy,
    Having,
    Asc,
    Desc,
}

impl Keyword {
    /// SQL text of the keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::In => "IN",
            Keyword::NotIn => "NOT IN",
            Keyword::Exists => "EXISTS",
            Keyword::NotExists => "NOT EXISTS",
            Keyword::Eq => "=",
            Keyword::Ne => "<>",
            Keyword::Gt => ">",
            Keyword::Ge => ">=",
            Keyword::Lt => "<",
            Keyword::Le => "<=",
            Keyword::Like => "LIKE",
            Keyword::NotLike => "NOT LIKE",
            Keyword::Between => "BETWEEN",
            Keyword::NotBetween => "NOT BETWEEN",
            Keyword::IsNull => "IS NULL",
            Keyword::IsNotNull => "IS NOT NULL",
            Keyword::GroupBy => "GROUP BY",
            Keyword::OrderBy => "ORDER BY",
            Keyword::Having => "HAVING",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of emitted expression text.
///
/// Segments are immutable once appended. Bind references inside a
/// [`Segment::Value`] are generated at append time, so rendering is a pure read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A fixed keyword/operator token.
    Keyword(Keyword),
    /// Caller-supplied text, emitted verbatim.
    Raw(String),
    /// Column text produced by a [`ColumnResolver`](crate::ColumnResolver).
    Column(String),
    /// Text containing one or more bind references.
    Value(String),
}

impl Segment {
    /// Trusted SQL text, emitted verbatim.
    pub fn raw(sql: impl Into<String>) -> Self {
        Segment::Raw(sql.into())
    }

    /// Text this segment contributes to the rendered expression.
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Keyword(kw) => kw.as_str(),
            Segment::Raw(s) | Segment::Column(s) | Segment::Value(s) => s,
        }
    }
}

impl From<Keyword> for Segment {
    fn from(kw: Keyword) -> Self {
        Segment::Keyword(kw)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join segment texts with single spaces.
pub(crate) fn render_segments(segments: &[Segment]) -> String {
    let cap = segments.iter().map(|s| s.as_str().len() + 1).sum::<usize>();
    let mut out = String::with_capacity(cap);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(segment.as_str());
    }
    out
}
