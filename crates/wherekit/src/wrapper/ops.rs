//! Predicate vocabulary.
//!
//! Every method has an ungated form and an `_if` form taking the gate first; the ungated form
//! calls the `_if` form with `true`. All of them funnel into [`Wrapper::append_with`].

use super::Wrapper;
use crate::column::ColumnResolver;
use crate::param::Param;
use crate::segment::{Keyword, Segment};
use tokio_postgres::types::ToSql;

impl<R: ColumnResolver> Wrapper<R> {
    // ==================== Building blocks ====================

    /// `C <keyword> V`
    fn add_condition<T>(self, condition: bool, column: &R::Column, keyword: Keyword, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_pattern(condition, column, keyword, "{0}", value)
    }

    /// `C <keyword> <template>` with the value bound into `{0}`.
    fn add_pattern<T>(
        self,
        condition: bool,
        column: &R::Column,
        keyword: Keyword,
        template: &str,
        value: T,
    ) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.append_with(condition, |w| {
            let column = w.column(column)?;
            let value = w.format_template(Some(template), &[Param::new(value)])?;
            Some(vec![column, keyword.into(), Segment::Value(value)])
        })
    }

    fn add_range<T>(
        self,
        condition: bool,
        column: &R::Column,
        keyword: Keyword,
        from: T,
        to: T,
    ) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.append_with(condition, |w| {
            let column = w.column(column)?;
            let from = w.bind_value(from);
            let to = w.bind_value(to);
            Some(vec![
                column,
                keyword.into(),
                Segment::Value(from),
                Keyword::And.into(),
                Segment::Value(to),
            ])
        })
    }

    fn add_column_keyword(self, condition: bool, column: &R::Column, keyword: Keyword) -> Self {
        self.append_with(condition, |w| Some(vec![w.column(column)?, keyword.into()]))
    }

    fn add_keyword_column(self, condition: bool, keyword: Keyword, column: &R::Column) -> Self {
        self.append_with(condition, |w| Some(vec![keyword.into(), w.column(column)?]))
    }

    // ==================== Comparison ====================

    /// `C = V`
    pub fn eq<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.eq_if(true, column, value)
    }

    /// [`Self::eq`] if `condition` holds.
    pub fn eq_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Eq, value)
    }

    /// `C <> V`
    pub fn ne<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.ne_if(true, column, value)
    }

    /// [`Self::ne`] if `condition` holds.
    pub fn ne_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Ne, value)
    }

    /// `C > V`
    pub fn gt<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.gt_if(true, column, value)
    }

    /// [`Self::gt`] if `condition` holds.
    pub fn gt_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Gt, value)
    }

    /// `C >= V`
    pub fn ge<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.ge_if(true, column, value)
    }

    /// [`Self::ge`] if `condition` holds.
    pub fn ge_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Ge, value)
    }

    /// `C < V`
    pub fn lt<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.lt_if(true, column, value)
    }

    /// [`Self::lt`] if `condition` holds.
    pub fn lt_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Lt, value)
    }

    /// `C <= V`
    pub fn le<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.le_if(true, column, value)
    }

    /// [`Self::le`] if `condition` holds.
    pub fn le_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(condition, column, Keyword::Le, value)
    }

    // ==================== Pattern matching ====================
    //
    // The reference sits inside the quoted pattern; the bound value itself carries no `%`.

    /// `C LIKE '%V%'`
    pub fn like<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.like_if(true, column, value)
    }

    /// [`Self::like`] if `condition` holds.
    pub fn like_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_pattern(condition, column, Keyword::Like, "'%{0}%'", value)
    }

    /// `C NOT LIKE '%V%'`
    pub fn not_like<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.not_like_if(true, column, value)
    }

    /// [`Self::not_like`] if `condition` holds.
    pub fn not_like_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_pattern(condition, column, Keyword::NotLike, "'%{0}%'", value)
    }

    /// `C LIKE '%V'`
    pub fn like_left<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.like_left_if(true, column, value)
    }

    /// [`Self::like_left`] if `condition` holds.
    pub fn like_left_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_pattern(condition, column, Keyword::Like, "'%{0}'", value)
    }

    /// `C LIKE 'V%'`
    pub fn like_right<T>(self, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.like_right_if(true, column, value)
    }

    /// [`Self::like_right`] if `condition` holds.
    pub fn like_right_if<T>(self, condition: bool, column: &R::Column, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_pattern(condition, column, Keyword::Like, "'{0}%'", value)
    }

    // ==================== Ranges and lists ====================

    /// `C BETWEEN V1 AND V2`
    pub fn between<T>(self, column: &R::Column, from: T, to: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.between_if(true, column, from, to)
    }

    /// [`Self::between`] if `condition` holds.
    pub fn between_if<T>(self, condition: bool, column: &R::Column, from: T, to: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_range(condition, column, Keyword::Between, from, to)
    }

    /// `C NOT BETWEEN V1 AND V2`
    pub fn not_between<T>(self, column: &R::Column, from: T, to: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.not_between_if(true, column, from, to)
    }

    /// [`Self::not_between`] if `condition` holds.
    pub fn not_between_if<T>(self, condition: bool, column: &R::Column, from: T, to: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_range(condition, column, Keyword::NotBetween, from, to)
    }

    /// `C IN (V1, V2, ...)`; an empty list emits `1=0`.
    pub fn in_values<T, I>(self, column: &R::Column, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.in_values_if(true, column, values)
    }

    /// [`Self::in_values`] if `condition` holds.
    pub fn in_values_if<T, I>(self, condition: bool, column: &R::Column, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.add_value_list(condition, column, Keyword::In, values, "1=0")
    }

    /// `C NOT IN (V1, V2, ...)`; an empty list emits `1=1`.
    pub fn not_in_values<T, I>(self, column: &R::Column, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.not_in_values_if(true, column, values)
    }

    /// [`Self::not_in_values`] if `condition` holds.
    pub fn not_in_values_if<T, I>(self, condition: bool, column: &R::Column, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.add_value_list(condition, column, Keyword::NotIn, values, "1=1")
    }

    fn add_value_list<T, I>(
        self,
        condition: bool,
        column: &R::Column,
        keyword: Keyword,
        values: I,
        when_empty: &str,
    ) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.append_with(condition, |w| {
            let column = w.column(column)?;
            let refs: Vec<String> = values.into_iter().map(|v| w.bind_value(v)).collect();
            if refs.is_empty() {
                return Some(vec![Segment::raw(when_empty)]);
            }
            Some(vec![
                column,
                keyword.into(),
                Segment::Value(format!("({})", refs.join(", "))),
            ])
        })
    }

    // ==================== NULL checks ====================

    /// `C IS NULL`
    pub fn is_null(self, column: &R::Column) -> Self {
        self.is_null_if(true, column)
    }

    /// [`Self::is_null`] if `condition` holds.
    pub fn is_null_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_column_keyword(condition, column, Keyword::IsNull)
    }

    /// `C IS NOT NULL`
    pub fn is_not_null(self, column: &R::Column) -> Self {
        self.is_not_null_if(true, column)
    }

    /// [`Self::is_not_null`] if `condition` holds.
    pub fn is_not_null_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_column_keyword(condition, column, Keyword::IsNotNull)
    }

    // ==================== Grouping and ordering ====================

    /// `GROUP BY C`
    pub fn group_by(self, column: &R::Column) -> Self {
        self.group_by_if(true, column)
    }

    /// [`Self::group_by`] if `condition` holds.
    pub fn group_by_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_keyword_column(condition, Keyword::GroupBy, column)
    }

    /// `ORDER BY C`
    ///
    /// Emitted where it is called, like every other segment. Call it after the last predicate
    /// so the clause does not land inside the condition.
    pub fn order_by(self, column: &R::Column) -> Self {
        self.order_by_if(true, column)
    }

    /// [`Self::order_by`] if `condition` holds.
    pub fn order_by_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_keyword_column(condition, Keyword::OrderBy, column)
    }

    /// `ORDER BY C ASC`
    pub fn order_by_asc(self, column: &R::Column) -> Self {
        self.order_by_asc_if(true, column)
    }

    /// [`Self::order_by_asc`] if `condition` holds.
    pub fn order_by_asc_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_ordering(condition, column, Keyword::Asc)
    }

    /// `ORDER BY C DESC`
    pub fn order_by_desc(self, column: &R::Column) -> Self {
        self.order_by_desc_if(true, column)
    }

    /// [`Self::order_by_desc`] if `condition` holds.
    pub fn order_by_desc_if(self, condition: bool, column: &R::Column) -> Self {
        self.add_ordering(condition, column, Keyword::Desc)
    }

    fn add_ordering(self, condition: bool, column: &R::Column, direction: Keyword) -> Self {
        self.append_with(condition, |w| {
            Some(vec![Keyword::OrderBy.into(), w.column(column)?, direction.into()])
        })
    }

    /// `HAVING`; append the HAVING condition with further calls.
    pub fn having(self) -> Self {
        self.having_if(true)
    }

    /// [`Self::having`] if `condition` holds.
    pub fn having_if(self, condition: bool) -> Self {
        self.append(condition, [Segment::Keyword(Keyword::Having)])
    }

    // ==================== Connectives ====================

    /// Bare `AND`.
    pub fn and(self) -> Self {
        self.and_if(true)
    }

    /// [`Self::and`] if `condition` holds.
    pub fn and_if(self, condition: bool) -> Self {
        self.append(condition, [Segment::Keyword(Keyword::And)])
    }

    /// Bare `OR`.
    pub fn or(self) -> Self {
        self.or_if(true)
    }

    /// [`Self::or`] if `condition` holds.
    pub fn or_if(self, condition: bool) -> Self {
        self.append(condition, [Segment::Keyword(Keyword::Or)])
    }

    /// Bare `NOT`.
    pub fn not(self) -> Self {
        self.not_if(true)
    }

    /// [`Self::not`] if `condition` holds.
    pub fn not_if(self, condition: bool) -> Self {
        self.append(condition, [Segment::Keyword(Keyword::Not)])
    }

    // ==================== Raw SQL ====================
    //
    // The text is trusted verbatim; only `{i}` values are bound. Never interpolate
    // untrusted input into it.

    /// Append raw SQL.
    pub fn apply(self, sql: &str) -> Self {
        self.apply_with(true, sql, &[])
    }

    /// [`Self::apply`] if `condition` holds.
    pub fn apply_if(self, condition: bool, sql: &str) -> Self {
        self.apply_with(condition, sql, &[])
    }

    /// Append raw SQL with `{0}`, `{1}`, ... bound to `values`.
    ///
    /// ```ignore
    /// w.apply_with(true, "age > {0} AND age < {1}", &[Param::new(18), Param::new(30)])
    /// ```
    pub fn apply_with(self, condition: bool, sql: &str, values: &[Param]) -> Self {
        self.append_with(condition, |w| {
            let text = w.format_template(Some(sql), values)?;
            Some(vec![Segment::Raw(text)])
        })
    }

    /// Append trailing SQL such as `LIMIT 10`. No safety guarantee.
    pub fn last(self, sql: &str) -> Self {
        self.last_if(true, sql)
    }

    /// [`Self::last`] if `condition` holds.
    pub fn last_if(self, condition: bool, sql: &str) -> Self {
        self.append_with(condition, |_| {
            (!sql.is_empty()).then(|| vec![Segment::raw(sql)])
        })
    }

    /// `EXISTS (sql)`
    pub fn exists(self, sql: &str) -> Self {
        self.exists_if(true, sql)
    }

    /// [`Self::exists`] if `condition` holds.
    pub fn exists_if(self, condition: bool, sql: &str) -> Self {
        self.add_nested_text(condition, Keyword::Exists, sql, &[])
    }

    /// `EXISTS (sql)` with `{i}` values bound.
    pub fn exists_with(self, condition: bool, sql: &str, values: &[Param]) -> Self {
        self.add_nested_text(condition, Keyword::Exists, sql, values)
    }

    /// `NOT EXISTS (sql)`
    pub fn not_exists(self, sql: &str) -> Self {
        self.not_exists_if(true, sql)
    }

    /// [`Self::not_exists`] if `condition` holds.
    pub fn not_exists_if(self, condition: bool, sql: &str) -> Self {
        self.add_nested_text(condition, Keyword::NotExists, sql, &[])
    }

    /// `IN (sql)`
    pub fn in_sql(self, sql: &str) -> Self {
        self.in_sql_if(true, sql)
    }

    /// [`Self::in_sql`] if `condition` holds.
    pub fn in_sql_if(self, condition: bool, sql: &str) -> Self {
        self.add_nested_text(condition, Keyword::In, sql, &[])
    }

    /// `NOT IN (sql)`
    pub fn not_in_sql(self, sql: &str) -> Self {
        self.not_in_sql_if(true, sql)
    }

    /// [`Self::not_in_sql`] if `condition` holds.
    pub fn not_in_sql_if(self, condition: bool, sql: &str) -> Self {
        self.add_nested_text(condition, Keyword::NotIn, sql, &[])
    }

    // ==================== Option-friendly helpers ====================

    /// `C = V` if `value` is `Some`.
    pub fn eq_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    pub fn ne_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.ne(column, v),
            None => self,
        }
    }

    pub fn gt_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.gt(column, v),
            None => self,
        }
    }

    pub fn ge_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.ge(column, v),
            None => self,
        }
    }

    pub fn lt_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.lt(column, v),
            None => self,
        }
    }

    pub fn le_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.le(column, v),
            None => self,
        }
    }

    /// `C LIKE '%V%'` if `value` is `Some`.
    pub fn like_opt<T>(self, column: &R::Column, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.like(column, v),
            None => self,
        }
    }
}
