//! Convenient imports for typical `wherekit` usage.
//!
//! ```ignore
//! use wherekit::prelude::*;
//! ```

pub use crate::{
    ColumnResolver, Field, FieldColumns, IdentColumns, Param, ParamTable, RawColumns,
    TableColumns, Wrapper, WrapperConfig, WrapperError, WrapperResult, conditions,
};
