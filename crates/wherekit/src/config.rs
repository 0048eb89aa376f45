//! Builder configuration: alias, parameter naming and reference syntax.

use crate::error::{WrapperError, WrapperResult};
use crate::ident::is_plain_word;
use serde::{Deserialize, Serialize};

/// Alias used when none is configured.
pub const DEFAULT_ALIAS: &str = "ew";

/// Prefix of generated parameter names (`MPGENVAL1`, `MPGENVAL2`, ...).
pub const DEFAULT_PARAM_PREFIX: &str = "MPGENVAL";

/// Accessor segment between the alias and the parameter name in a bind reference.
///
/// Statement compilers resolve `<alias>.paramNameValuePairs.<name>` against the
/// builder's [`ParamTable`](crate::ParamTable).
pub const PARAM_ACCESSOR: &str = "paramNameValuePairs";

/// Syntax of bind references embedded in rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceStyle {
    /// `ew.paramNameValuePairs.MPGENVAL1`
    #[default]
    Bare,
    /// `#{ew.paramNameValuePairs.MPGENVAL1}`
    Mybatis,
}

/// Configuration shared by a wrapper and every nested group it spawns.
///
/// Deserializable so an embedding layer can keep it next to its own settings:
///
/// ```ignore
/// [conditions]
/// alias = "sub"
/// reference_style = "mybatis"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WrapperConfig {
    /// Bind-variable namespace. Must differ between wrappers merged into one statement.
    pub alias: String,
    /// Prefix for generated parameter names.
    pub param_prefix: String,
    /// Reference syntax.
    pub reference_style: ReferenceStyle,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            alias: DEFAULT_ALIAS.to_string(),
            param_prefix: DEFAULT_PARAM_PREFIX.to_string(),
            reference_style: ReferenceStyle::Bare,
        }
    }
}

impl WrapperConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alias. An empty alias falls back to [`DEFAULT_ALIAS`].
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = if alias.is_empty() {
            DEFAULT_ALIAS.to_string()
        } else {
            alias
        };
        self
    }

    /// Set the prefix for generated parameter names.
    pub fn param_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.param_prefix = prefix.into();
        self
    }

    /// Set how bind references are written.
    pub fn reference_style(mut self, style: ReferenceStyle) -> Self {
        self.reference_style = style;
        self
    }

    /// Check that alias and prefix can be embedded in bind references.
    pub fn validate(&self) -> WrapperResult<()> {
        if !is_plain_word(&self.alias) {
            return Err(WrapperError::InvalidAlias(self.alias.clone()));
        }
        if !is_plain_word(&self.param_prefix) {
            return Err(WrapperError::invalid_config(format!(
                "param_prefix '{}' must match [A-Za-z_][A-Za-z0-9_]*",
                self.param_prefix
            )));
        }
        Ok(())
    }

    /// Format the bind reference for a generated parameter name.
    pub fn reference(&self, name: &str) -> String {
        match self.reference_style {
            ReferenceStyle::Bare => format!("{}.{PARAM_ACCESSOR}.{name}", self.alias),
            ReferenceStyle::Mybatis => format!("#{{{}.{PARAM_ACCESSOR}.{name}}}", self.alias),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WrapperConfig::default();
        assert_eq!(config.alias, "ew");
        assert_eq!(config.param_prefix, "MPGENVAL");
        assert_eq!(config.reference_style, ReferenceStyle::Bare);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reference_styles() {
        let bare = WrapperConfig::new();
        assert_eq!(bare.reference("MPGENVAL3"), "ew.paramNameValuePairs.MPGENVAL3");

        let mybatis = WrapperConfig::new()
            .alias("sub")
            .reference_style(ReferenceStyle::Mybatis);
        assert_eq!(
            mybatis.reference("MPGENVAL3"),
            "#{sub.paramNameValuePairs.MPGENVAL3}"
        );
    }

    #[test]
    fn empty_alias_falls_back() {
        assert_eq!(WrapperConfig::new().alias("").alias, DEFAULT_ALIAS);
    }

    #[test]
    fn validate_rejects_bad_alias_and_prefix() {
        assert_eq!(
            WrapperConfig::new().alias("e w").validate(),
            Err(WrapperError::InvalidAlias("e w".into()))
        );
        assert!(matches!(
            WrapperConfig::new().param_prefix("P-").validate(),
            Err(WrapperError::InvalidConfig(_))
        ));
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let config: WrapperConfig =
            serde_json::from_str(r#"{"alias":"sub","reference_style":"mybatis"}"#).unwrap();
        assert_eq!(config.alias, "sub");
        assert_eq!(config.param_prefix, DEFAULT_PARAM_PREFIX);
        assert_eq!(config.reference_style, ReferenceStyle::Mybatis);
    }

    #[test]
    fn deserializes_from_toml() {
        let config: WrapperConfig = toml::from_str(
            r#"
            alias = "orders"
            param_prefix = "P"
            "#,
        )
        .unwrap();
        assert_eq!(config.alias, "orders");
        assert_eq!(config.reference("P1"), "orders.paramNameValuePairs.P1");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = serde_json::from_str::<WrapperConfig>(r#"{"alais":"x"}"#);
        assert!(err.is_err());
    }
}
