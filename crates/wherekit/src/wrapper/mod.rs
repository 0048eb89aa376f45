//! The condition accumulator.
//!
//! A [`Wrapper`] holds an ordered list of [`Segment`]s and a [`ParamTable`]. Fluent methods
//! append segments behind a boolean gate; value-bearing methods bind each value under a fresh
//! generated name and embed a reference to it. [`Wrapper::render`] joins the segments with
//! single spaces.
//!
//! # Example
//! ```ignore
//! use wherekit::Wrapper;
//!
//! let w = Wrapper::new()
//!     .eq("status", "active")
//!     .and()
//!     .ge_if(min_age.is_some(), "age", min_age.unwrap_or_default())
//!     .and_nested(|w| w.like("name", "ali").or().is_null("name"));
//!
//! let (sql, params) = w.into_parts();
//! ```

mod nested;
mod ops;


use crate::column::{ColumnResolver, RawColumns};
use crate::config::WrapperConfig;
use crate::error::{WrapperError, WrapperResult};
use crate::param::{Param, ParamTable};
use crate::segment::{Segment, render_segments};
use std::fmt;
use tokio_postgres::types::ToSql;

/// Fluent builder for a parameterized condition expression.
#[derive(Debug, Clone)]
#[must_use]
pub struct Wrapper<R = RawColumns> {
    resolver: R,
    config: WrapperConfig,
    segments: Vec<Segment>,
    params: ParamTable,
    build_error: Option<WrapperError>,
}

impl Wrapper<RawColumns> {
    /// Create a wrapper whose columns are emitted as given.
    pub fn new() -> Self {
        Self::with_resolver(RawColumns)
    }
}

impl Default for Wrapper<RawColumns> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ColumnResolver> Wrapper<R> {
    /// Create a wrapper that resolves columns with `resolver`.
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            config: WrapperConfig::default(),
            segments: Vec::new(),
            params: ParamTable::new(),
            build_error: None,
        }
    }

    /// Replace the configuration. Set this before appending anything.
    ///
    /// An invalid configuration is recorded as a build error and the defaults are kept.
    pub fn with_config(mut self, config: WrapperConfig) -> Self {
        match config.validate() {
            Ok(()) => self.config = config,
            Err(err) => self.record_error(err),
        }
        self
    }

    /// Set the bind-variable alias. Empty falls back to the default alias.
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        let config = self.config.clone().alias(alias);
        self.with_config(config)
    }

    /// The bind-variable alias in use.
    pub fn alias(&self) -> &str {
        &self.config.alias
    }

    /// The active configuration.
    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// The column resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    // ==================== Segment sequence ====================

    /// Append `segments` in order if `condition` holds; otherwise do nothing.
    pub fn append<I>(mut self, condition: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        if condition {
            self.segments.extend(segments);
        }
        self
    }

    /// Gated append whose segments are built only when `condition` holds.
    ///
    /// Every predicate method goes through here, so a gated-off call never resolves a column
    /// or binds a value. `build` returning `None` appends nothing.
    pub fn append_with<F>(mut self, condition: bool, build: F) -> Self
    where
        F: FnOnce(&mut Self) -> Option<Vec<Segment>>,
    {
        if !condition {
            return self;
        }
        match build(&mut self) {
            Some(segments) => self.append(true, segments),
            None => self,
        }
    }

    /// Render the expression: segment texts joined by single spaces.
    ///
    /// Pure; an empty wrapper renders `""`, meaning "no predicate".
    pub fn render(&self) -> String {
        render_segments(&self.segments)
    }

    /// The appended segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Values bound so far, keyed by generated name.
    pub fn params(&self) -> &ParamTable {
        &self.params
    }

    /// Consume the wrapper, returning the rendered text and the parameter table.
    pub fn into_parts(self) -> (String, ParamTable) {
        (self.render(), self.params)
    }

    // ==================== Parameters ====================

    /// Bind `value` under a fresh name and return the reference to embed in SQL text.
    pub fn bind_value<T>(&mut self, value: T) -> String
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.bind_param(Param::new(value))
    }

    /// Bind an already wrapped value; see [`Wrapper::bind_value`].
    pub fn bind_param(&mut self, value: Param) -> String {
        let name = self.params.bind(&self.config.param_prefix, value);
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "wherekit", alias = %self.config.alias, name = %name, "bound parameter");
        self.config.reference(&name)
    }

    /// Replace each `{i}` in `template` with a reference to a freshly bound `values[i]`.
    ///
    /// Every value is bound, whether or not its placeholder occurs. A missing or empty
    /// template returns `None`: append nothing. Placeholders without a value stay in the
    /// text literally and are recorded as [`WrapperError::PlaceholderOutOfRange`].
    pub fn format_template(&mut self, template: Option<&str>, values: &[Param]) -> Option<String> {
        let template = template.filter(|t| !t.is_empty())?;
        let mut sql = template.to_string();
        for (i, value) in values.iter().enumerate() {
            let reference = self.bind_param(value.clone());
            sql = sql.replace(&format!("{{{i}}}"), &reference);
        }
        if let Some(index) = first_placeholder(&sql) {
            self.record_error(WrapperError::PlaceholderOutOfRange {
                index,
                provided: values.len(),
            });
        }
        Some(sql)
    }

    // ==================== Errors ====================

    /// The first problem recorded while building, if any.
    pub fn build_error(&self) -> Option<&WrapperError> {
        self.build_error.as_ref()
    }

    /// Fail with the first recorded problem.
    pub fn validate(&self) -> WrapperResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record_error(&mut self, err: WrapperError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "wherekit", error = %err, "condition build error");
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    /// Resolve a column, recording failures.
    fn column(&mut self, column: &R::Column) -> Option<Segment> {
        match self.resolver.resolve(column) {
            Ok(text) => Some(Segment::Column(text)),
            Err(err) => {
                self.record_error(err);
                None
            }
        }
    }
}

impl<R: ColumnResolver> fmt::Display for Wrapper<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Index of the first `{n}` placeholder left in `sql`.
fn first_placeholder(sql: &str) -> Option<usize> {
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let digits = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            let close = i + 1 + digits;
            if digits > 0 && bytes.get(close) == Some(&b'}') {
                if let Ok(index) = sql[i + 1..close].parse() {
                    return Some(index);
                }
            }
            i = close.max(i + 1);
        } else {
            i += 1;
        }
    }
    None
}
