//! Column resolution: the seam between a wrapper and the entity layer that owns column names.
//!
//! A [`Wrapper`](crate::Wrapper) never interprets columns itself. Every column-bearing
//! predicate calls [`ColumnResolver::resolve`] once and embeds the returned text verbatim.
//!
//! # Example
//! ```ignore
//! use wherekit::{Field, FieldColumns, Wrapper};
//!
//! #[derive(Clone, Copy)]
//! enum User { Id, Name }
//!
//! impl Field for User {
//!     fn column_name(&self) -> &'static str {
//!         match self {
//!             User::Id => "id",
//!             User::Name => "user_name",
//!         }
//!     }
//! }
//!
//! let w = Wrapper::with_resolver(FieldColumns::<User>::new()).eq(&User::Name, "alice");
//! assert_eq!(w.render(), "user_name = ew.paramNameValuePairs.MPGENVAL1");
//! ```

use crate::error::{WrapperError, WrapperResult};
use crate::ident::Ident;
use std::marker::PhantomData;

/// Maps an abstract column identifier to its rendered text.
///
/// Resolvers are cloned into nested groups, so they should be cheap to clone.
pub trait ColumnResolver: Clone {
    /// The column identifier type accepted by wrapper methods.
    type Column: ?Sized;

    fn resolve(&self, column: &Self::Column) -> WrapperResult<String>;
}

/// Passes column text through unchanged.
///
/// Use for trusted column expressions such as `COUNT(o.id)` in HAVING conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawColumns;

impl ColumnResolver for RawColumns {
    type Column = str;

    fn resolve(&self, column: &str) -> WrapperResult<String> {
        if column.trim().is_empty() {
            return Err(WrapperError::invalid_column("empty column"));
        }
        Ok(column.to_string())
    }
}

/// Validates column text as a SQL identifier (`col`, `t.col`, `"Quoted"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentColumns;

impl ColumnResolver for IdentColumns {
    type Column = str;

    fn resolve(&self, column: &str) -> WrapperResult<String> {
        Ident::parse(column)
            .map(|ident| ident.to_sql())
            .map_err(|e| WrapperError::invalid_column(format!("'{column}': {e}")))
    }
}

/// Validates column text and qualifies it with a table alias: `name` -> `u.name`.
#[derive(Debug, Clone)]
pub struct TableColumns {
    table: Ident,
}

impl TableColumns {
    /// Qualify columns with `table`, which must be a valid identifier.
    pub fn new(table: &str) -> WrapperResult<Self> {
        Ok(Self {
            table: Ident::parse(table)?,
        })
    }
}

impl ColumnResolver for TableColumns {
    type Column = str;

    fn resolve(&self, column: &str) -> WrapperResult<String> {
        let ident = Ident::parse(column)
            .map_err(|e| WrapperError::invalid_column(format!("'{column}': {e}")))?;
        Ok(ident.qualified_by(&self.table).to_sql())
    }
}

/// A typed column of some entity, usually a fieldless enum.
pub trait Field {
    /// Column name as stored in the database.
    fn column_name(&self) -> &'static str;
}

/// Resolves [`Field`] values, optionally qualified with a table alias.
#[derive(Debug)]
pub struct FieldColumns<F> {
    table: Option<Ident>,
    _field: PhantomData<fn(&F)>,
}

impl<F> FieldColumns<F> {
    /// Unqualified field columns.
    pub fn new() -> Self {
        Self {
            table: None,
            _field: PhantomData,
        }
    }

    /// Field columns qualified with `table`.
    pub fn with_table(table: &str) -> WrapperResult<Self> {
        Ok(Self {
            table: Some(Ident::parse(table)?),
            _field: PhantomData,
        })
    }
}

impl<F> Default for FieldColumns<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for FieldColumns<F> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            _field: PhantomData,
        }
    }
}

impl<F: Field> ColumnResolver for FieldColumns<F> {
    type Column = F;

    fn resolve(&self, field: &F) -> WrapperResult<String> {
        let name = field.column_name();
        let ident = Ident::parse(name)
            .map_err(|e| WrapperError::invalid_column(format!("'{name}': {e}")))?;
        Ok(match &self.table {
            Some(table) => ident.qualified_by(table).to_sql(),
            None => ident.to_sql(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum Order {
        Id,
        Total,
        Broken,
    }

    impl Field for Order {
        fn column_name(&self) -> &'static str {
            match self {
                Order::Id => "id",
                Order::Total => "total_cents",
                Order::Broken => "total cents",
            }
        }
    }

    #[test]
    fn raw_passthrough() {
        assert_eq!(RawColumns.resolve("COUNT(o.id)").unwrap(), "COUNT(o.id)");
        assert!(RawColumns.resolve("  ").is_err());
    }

    #[test]
    fn ident_validates() {
        assert_eq!(IdentColumns.resolve("u.name").unwrap(), "u.name");
        assert!(matches!(
            IdentColumns.resolve("name; DROP TABLE users"),
            Err(WrapperError::InvalidColumn(_))
        ));
    }

    #[test]
    fn table_qualifies() {
        let cols = TableColumns::new("o").unwrap();
        assert_eq!(cols.resolve("total").unwrap(), "o.total");
        assert_eq!(cols.resolve(r#""Total""#).unwrap(), r#"o."Total""#);
        assert!(TableColumns::new("bad alias").is_err());
    }

    #[test]
    fn fields_resolve() {
        let cols = FieldColumns::<Order>::new();
        assert_eq!(cols.resolve(&Order::Total).unwrap(), "total_cents");

        let qualified = FieldColumns::<Order>::with_table("o").unwrap();
        assert_eq!(qualified.resolve(&Order::Id).unwrap(), "o.id");
        assert!(qualified.resolve(&Order::Broken).is_err());
    }
}
