//! Parenthesized groups: raw subqueries and nested wrappers.

use super::Wrapper;
use crate::column::ColumnResolver;
use crate::error::WrapperError;
use crate::param::Param;
use crate::segment::{Keyword, Segment, render_segments};

impl<R: ColumnResolver> Wrapper<R> {
    /// Append `keyword (sql)`, binding `{i}` placeholders in `sql` to `values`.
    ///
    /// Blank `sql` appends nothing, binds nothing, and is recorded as
    /// [`WrapperError::EmptyRawClause`].
    pub fn add_nested_text(
        self,
        condition: bool,
        keyword: Keyword,
        sql: &str,
        values: &[Param],
    ) -> Self {
        self.append_with(condition, |w| {
            if sql.trim().is_empty() {
                w.record_error(WrapperError::EmptyRawClause(keyword.as_str()));
                return None;
            }
            let text = w.format_template(Some(sql), values)?;
            Some(vec![keyword.into(), Segment::Value(format!("({text})"))])
        })
    }

    /// Build a group in a child wrapper and append `keyword ( <child> )`.
    ///
    /// The child starts empty, with this wrapper's resolver and config, and continues this
    /// wrapper's parameter sequence; its bound values move back here when it is folded in, so
    /// names stay unique across the parent and all of its groups. A child that renders empty
    /// appends nothing. The closure must return the wrapper it was given (or one derived from
    /// it by chaining); anything else is recorded as [`WrapperError::DetachedGroup`]. Names the
    /// child generated before being dropped stay consumed.
    pub fn add_nested<F>(mut self, condition: bool, keyword: Option<Keyword>, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if !condition {
            return self;
        }

        let base = self.params.seq();
        let child = f(self.spawn_child());
        if child.params.seq() < base
            || child.config != self.config
            || self.params.overlaps(&child.params)
        {
            self.params.advance_to(child.params.seq());
            self.record_error(WrapperError::DetachedGroup);
            return self;
        }

        let Wrapper {
            segments,
            params,
            build_error,
            ..
        } = child;
        self.params.absorb(params);
        if let Some(err) = build_error {
            self.record_error(err);
        }
        if segments.is_empty() {
            return self;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "wherekit",
            keyword = keyword.map(Keyword::as_str).unwrap_or("-"),
            segments = segments.len(),
            seq = self.params.seq(),
            "folded nested group"
        );

        let mut group = Vec::with_capacity(4);
        if let Some(keyword) = keyword {
            group.push(Segment::Keyword(keyword));
        }
        group.push(Segment::raw("("));
        group.push(Segment::Raw(render_segments(&segments)));
        group.push(Segment::raw(")"));
        self.append(true, group)
    }

    fn spawn_child(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            config: self.config.clone(),
            segments: Vec::new(),
            params: self.params.continuation(),
            build_error: None,
        }
    }

    /// `AND ( ... )`
    pub fn and_nested<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(true, Some(Keyword::And), f)
    }

    /// `AND ( ... )` if `condition` holds.
    pub fn and_nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(condition, Some(Keyword::And), f)
    }

    /// `OR ( ... )`
    pub fn or_nested<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(true, Some(Keyword::Or), f)
    }

    /// `OR ( ... )` if `condition` holds.
    pub fn or_nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(condition, Some(Keyword::Or), f)
    }

    /// `NOT ( ... )`
    pub fn not_nested<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.not_nested_if(true, f)
    }

    /// `NOT ( ... )` if `condition` holds.
    pub fn not_nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(condition, Some(Keyword::Not), f)
    }

    /// `( ... )` with no leading keyword, e.g. as the first predicate.
    pub fn nested<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.nested_if(true, f)
    }

    /// `( ... )` if `condition` holds.
    pub fn nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.add_nested(condition, None, f)
    }
}
