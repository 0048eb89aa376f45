//! # wherekit
//!
//! A fluent builder for parameterized WHERE/HAVING conditions.
//!
//! A [`Wrapper`] accumulates an ordered list of SQL segments. Values never appear in the
//! rendered text: each one is bound under a generated name (`MPGENVAL1`, `MPGENVAL2`, ...) in the
//! wrapper's [`ParamTable`], and the text carries a reference to it
//! (`ew.paramNameValuePairs.MPGENVAL1`). A statement compiler downstream resolves the references
//! against the table.
//!
//! ## Features
//!
//! - **Gated calls**: every predicate has an `_if` form, so optional filters need no branching
//! - **Named binds**: names are unique across a wrapper and all of its nested groups
//! - **Nested groups**: `and_nested(|w| ...)` / `or_nested(|w| ...)` build `AND ( ... )` groups
//! - **Pluggable columns**: a [`ColumnResolver`] maps your column type to SQL text
//! - **Raw escape hatch**: `apply`, `exists`, `in_sql`, `last` take trusted SQL with `{0}` binds
//!
//! ```ignore
//! use wherekit::Wrapper;
//!
//! let w = Wrapper::new()
//!     .eq("status", "active")
//!     .and()
//!     .like("name", "ali")
//!     .or_nested(|w| w.gt("age", 18).and().is_not_null("email"));
//!
//! assert_eq!(
//!     w.render(),
//!     "status = ew.paramNameValuePairs.MPGENVAL1 AND name LIKE '%ew.paramNameValuePairs.MPGENVAL2%' \
//!      OR ( age > ew.paramNameValuePairs.MPGENVAL3 AND email IS NOT NULL )"
//! );
//! assert_eq!(w.params().len(), 3);
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod ident;
pub mod param;
pub mod prelude;
pub mod segment;
pub mod wrapper;

pub use column::{ColumnResolver, Field, FieldColumns, IdentColumns, RawColumns, TableColumns};
pub use config::{DEFAULT_ALIAS, DEFAULT_PARAM_PREFIX, PARAM_ACCESSOR, ReferenceStyle, WrapperConfig};
pub use error::{WrapperError, WrapperResult};
pub use ident::Ident;
pub use param::{Param, ParamTable};
pub use segment::{Keyword, Segment};
pub use wrapper::Wrapper;

/// Start a wrapper with pass-through columns.
pub fn conditions() -> Wrapper<RawColumns> {
    Wrapper::new()
}
