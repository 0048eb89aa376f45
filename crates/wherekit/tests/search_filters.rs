//! End-to-end filter composition through the public API.

use chrono::NaiveDate;
use uuid::Uuid;
use wherekit::prelude::*;
use wherekit::{ReferenceStyle, WrapperError};

#[derive(Default)]
struct OrderSearch {
    customer: Option<Uuid>,
    status: Option<&'static str>,
    placed_from: Option<NaiveDate>,
    placed_to: Option<NaiveDate>,
    keyword: Option<&'static str>,
    include_archived: bool,
}

fn search(filter: &OrderSearch) -> Wrapper<TableColumns> {
    let columns = TableColumns::new("o").expect("valid alias");
    let has_range = filter.placed_from.is_some() && filter.placed_to.is_some();

    Wrapper::with_resolver(columns)
        .is_null_if(!filter.include_archived, "archived_at")
        .and_if(!filter.include_archived && filter.customer.is_some())
        .eq_opt("customer_id", filter.customer)
        .and_if(filter.status.is_some())
        .eq_opt("status", filter.status)
        .and_if(has_range)
        .between_if(
            has_range,
            "placed_on",
            filter.placed_from.unwrap_or_default(),
            filter.placed_to.unwrap_or_default(),
        )
        .and_nested_if(filter.keyword.is_some(), |w| {
            let keyword = filter.keyword.unwrap_or_default();
            w.like("reference", keyword).or().like("note", keyword)
        })
}

fn reference(n: usize) -> String {
    format!("ew.paramNameValuePairs.MPGENVAL{n}")
}

#[test]
fn default_filter_only_hides_archived() {
    let w = search(&OrderSearch::default());
    assert_eq!(w.render(), "o.archived_at IS NULL");
    assert!(w.params().is_empty());
}

#[test]
fn full_filter() {
    let customer = Uuid::new_v4();
    let filter = OrderSearch {
        customer: Some(customer),
        status: Some("paid"),
        placed_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        placed_to: NaiveDate::from_ymd_opt(2024, 1, 31),
        keyword: Some("gift"),
        include_archived: false,
    };
    let w = search(&filter);
    assert!(w.validate().is_ok());
    assert_eq!(
        w.render(),
        format!(
            "o.archived_at IS NULL AND o.customer_id = {} AND o.status = {} AND \
             o.placed_on BETWEEN {} AND {} AND ( o.reference LIKE '%{}%' OR o.note LIKE '%{}%' )",
            reference(1),
            reference(2),
            reference(3),
            reference(4),
            reference(5),
            reference(6),
        )
    );

    let params = w.params();
    assert_eq!(params.len(), 6);
    assert_eq!(
        format!("{:?}", params.get("MPGENVAL4").unwrap()),
        "Param(2024-01-31)"
    );
    assert_eq!(
        format!("{:?}", params.get("MPGENVAL1").unwrap()),
        format!("Param({customer:?})")
    );
}

#[test]
fn every_reference_in_text_is_bound() {
    let w = search(&OrderSearch {
        status: Some("open"),
        keyword: Some("x"),
        include_archived: true,
        ..Default::default()
    });
    let (sql, params) = w.into_parts();
    for name in params.names() {
        assert!(sql.contains(&format!("ew.paramNameValuePairs.{name}")), "{name} missing");
    }
    assert_eq!(params.len(), 3);
}

#[test]
fn merged_wrappers_use_distinct_aliases() {
    let outer = Wrapper::new().eq("tenant_id", 7i64);
    let inner = Wrapper::new().with_alias("sub").eq("tenant_id", 7i64);

    let outer_sql = outer.render();
    let inner_sql = inner.render();
    assert_ne!(outer_sql, inner_sql);
    assert!(inner_sql.starts_with("tenant_id = sub."));

    let combined = Wrapper::new()
        .eq("active", true)
        .and()
        .apply("id")
        .in_sql(&format!("SELECT user_id FROM members WHERE {inner_sql}"));
    assert_eq!(
        combined.render(),
        "active = ew.paramNameValuePairs.MPGENVAL1 AND id IN \
         (SELECT user_id FROM members WHERE tenant_id = sub.paramNameValuePairs.MPGENVAL1)"
    );
}

#[test]
fn json_values_bind_like_any_other() {
    let w = conditions().eq("payload", serde_json::json!({"kind": "refund"}));
    assert_eq!(w.render(), format!("payload = {}", reference(1)));
    assert_eq!(w.params().len(), 1);
}

#[test]
fn config_loaded_from_toml() {
    let config: WrapperConfig = toml::from_str(
        r#"
        alias = "report"
        reference_style = "mybatis"
        "#,
    )
    .unwrap();
    assert_eq!(config.reference_style, ReferenceStyle::Mybatis);

    let w = conditions().with_config(config).ge("total", 100i64);
    assert_eq!(w.render(), "total >= #{report.paramNameValuePairs.MPGENVAL1}");
}

#[test]
fn bad_config_is_reported_not_applied() {
    let config = WrapperConfig::new().param_prefix("1bad");
    let w = conditions().with_config(config).eq("a", 1);
    assert_eq!(w.render(), format!("a = {}", reference(1)));
    assert!(matches!(w.validate(), Err(WrapperError::InvalidConfig(_))));
}
