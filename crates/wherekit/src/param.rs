//! Bound values and the named parameter table.

use std::collections::HashMap;
use std::collections::hash_map;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly bound value.
///
/// Any `ToSql` value can be bound, so the table can be handed straight to a
/// `tokio-postgres` statement compiler.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap a value for binding.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// The inner value as a `tokio-postgres` parameter reference.
    pub fn value(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

/// Generated parameter name -> bound value.
///
/// The table also owns the sequence counter. Names are `<prefix><n>` with `n` starting at 1
/// and never reused, so a table that is passed from a parent wrapper into its nested groups
/// and back can never produce colliding names.
#[derive(Clone, Debug, Default)]
pub struct ParamTable {
    values: HashMap<String, Param>,
    // (sequence number, name) in generation order
    order: Vec<(usize, String)>,
    seq: usize,
}

impl ParamTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under the next generated name and return that name.
    pub fn bind(&mut self, prefix: &str, value: Param) -> String {
        self.seq += 1;
        let name = format!("{prefix}{}", self.seq);
        self.values.insert(name.clone(), value);
        self.order.push((self.seq, name.clone()));
        name
    }

    /// Look up a bound value by generated name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.values.get(name)
    }

    /// Whether `name` has been bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of names generated so far.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Param> {
        self.values.iter()
    }

    /// Parameter names in generation order.
    pub fn names(&self) -> Vec<&str> {
        let mut order: Vec<&(usize, String)> = self.order.iter().collect();
        order.sort_by_key(|(seq, _)| *seq);
        order.into_iter().map(|(_, name)| name.as_str()).collect()
    }

    /// Consume the table, returning the name -> value map.
    pub fn into_map(self) -> HashMap<String, Param> {
        self.values
    }

    /// An empty table that continues this table's sequence.
    pub(crate) fn continuation(&self) -> Self {
        Self {
            values: HashMap::new(),
            order: Vec::new(),
            seq: self.seq,
        }
    }

    /// Whether any name in `other` is already taken here.
    pub(crate) fn overlaps(&self, other: &ParamTable) -> bool {
        other.values.keys().any(|k| self.values.contains_key(k))
    }

    /// Take over the values and sequence position of a continuation.
    pub(crate) fn absorb(&mut self, other: ParamTable) {
        self.advance_to(other.seq);
        self.values.extend(other.values);
        self.order.extend(other.order);
    }

    /// Mark every sequence number up to `seq` as used without binding anything.
    pub(crate) fn advance_to(&mut self, seq: usize) {
        self.seq = self.seq.max(seq);
    }
}

impl<'a> IntoIterator for &'a ParamTable {
    type Item = (&'a String, &'a Param);
    type IntoIter = hash_map::Iter<'a, String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_generates_sequential_names() {
        let mut table = ParamTable::new();
        assert_eq!(table.bind("MPGENVAL", Param::new(5i32)), "MPGENVAL1");
        assert_eq!(table.bind("MPGENVAL", Param::new("x")), "MPGENVAL2");
        assert_eq!(table.len(), 2);
        assert_eq!(table.seq(), 2);
        assert_eq!(format!("{:?}", table.get("MPGENVAL1").unwrap()), "Param(5)");
        assert_eq!(format!("{:?}", table.get("MPGENVAL2").unwrap()), "Param(\"x\")");
    }

    #[test]
    fn names_sort_numerically() {
        let mut table = ParamTable::new();
        for i in 0..12i64 {
            table.bind("P", Param::new(i));
        }
        let names = table.names();
        assert_eq!(names.first(), Some(&"P1"));
        assert_eq!(names[9], "P10");
        assert_eq!(names.last(), Some(&"P12"));
    }

    #[test]
    fn continuation_never_reuses_names() {
        let mut parent = ParamTable::new();
        parent.bind("P", Param::new(1i32));

        let mut child = parent.continuation();
        assert!(child.is_empty());
        assert_eq!(child.bind("P", Param::new(2i32)), "P2");
        assert!(!parent.overlaps(&child));

        parent.absorb(child);
        assert_eq!(parent.len(), 2);
        assert_eq!(parent.bind("P", Param::new(3i32)), "P3");
    }

    #[test]
    fn names_follow_generation_order_for_digit_prefixes() {
        let mut table = ParamTable::new();
        let prefix = "P99999999999999999999999";
        for i in 0..3i32 {
            table.bind(prefix, Param::new(i));
        }
        let expected: Vec<String> = (1..=3).map(|n| format!("{prefix}{n}")).collect();
        assert_eq!(table.names(), expected);
    }

    #[test]
    fn advance_to_skips_names_without_binding() {
        let mut table = ParamTable::new();
        table.bind("P", Param::new(1i32));
        table.advance_to(3);
        table.advance_to(2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.bind("P", Param::new(4i32)), "P4");
        assert_eq!(table.names(), vec!["P1", "P4"]);
    }

    #[test]
    fn overlap_detected_for_unrelated_tables() {
        let mut a = ParamTable::new();
        a.bind("P", Param::new(1i32));
        let mut b = ParamTable::new();
        b.bind("P", Param::new(9i32));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn param_exposes_to_sql_reference() {
        let p = Param::new(42i64);
        let refs: Vec<&(dyn ToSql + Sync)> = vec![p.value()];
        assert_eq!(refs.len(), 1);
    }
}
