use crate::dbc::types::{attributes::AttributeValue, value_table::ValueTable};
use crate::diff::options::DiffOptions;
use crate::diff::types::delta::{Field, FieldDelta, FieldValue};

use std::collections::{BTreeMap, BTreeSet};

/// Collects the field deltas of one entity.
pub(crate) struct Deltas<'o> {
    options: &'o DiffOptions,
    out: Vec<FieldDelta>,
}

impl<'o> Deltas<'o> {
    pub(crate) fn new(options: &'o DiffOptions) -> Self {
        Deltas {
            options,
            out: Vec::new(),
        }
    }

    fn push(&mut self, field: Field, old: Option<FieldValue>, new: Option<FieldValue>) {
        self.out.push(FieldDelta { field, old, new });
    }

    /// Any `PartialEq` field, converted to a [`FieldValue`] when it differs.
    pub(crate) fn value<T: PartialEq>(&mut self, field: Field, old: T, new: T, to_value: impl Fn(T) -> FieldValue) {
        if old != new {
            self.push(field, Some(to_value(old)), Some(to_value(new)));
        }
    }

    pub(crate) fn float(&mut self, field: Field, old: f64, new: f64) {
        if !self.options.same_f64(old, new) {
            self.push(field, Some(FieldValue::Float(old)), Some(FieldValue::Float(new)));
        }
    }

    pub(crate) fn text(&mut self, field: Field, old: &str, new: &str) {
        self.value(field, old, new, |s| FieldValue::Text(s.to_string()));
    }

    pub(crate) fn optional_text(&mut self, field: Field, old: Option<&str>, new: Option<&str>) {
        if old != new {
            let text = |s: Option<&str>| s.map(|s| FieldValue::Text(s.to_string()));
            self.push(field, text(old), text(new));
        }
    }

    /// Unordered name sets.
    pub(crate) fn names(&mut self, field: Field, old: BTreeSet<&str>, new: BTreeSet<&str>) {
        self.value(field, old, new, |set| {
            FieldValue::Names(set.into_iter().map(str::to_string).collect())
        });
    }

    /// Value description contents. A table without entries counts as absent.
    pub(crate) fn table(&mut self, field: Field, old: Option<&ValueTable>, new: Option<&ValueTable>) {
        let (old, new) = (entries_of(old), entries_of(new));
        if old != new {
            let table = |e: Option<&BTreeMap<i64, String>>| e.map(|e| FieldValue::Table(e.clone()));
            self.push(field, table(old), table(new));
        }
    }

    /// Effective attribute maps, one delta per attribute name that differs.
    pub(crate) fn attributes(
        &mut self,
        old: &BTreeMap<&str, &AttributeValue>,
        new: &BTreeMap<&str, &AttributeValue>,
    ) {
        let names: BTreeSet<&str> = old.keys().chain(new.keys()).copied().collect();
        for name in names {
            let (o, n) = (old.get(name).copied(), new.get(name).copied());
            let same: bool = match (o, n) {
                (Some(AttributeValue::Float(a)), Some(AttributeValue::Float(b))) => self.options.same_f64(*a, *b),
                (o, n) => o == n,
            };
            if !same {
                let value = |v: Option<&AttributeValue>| v.map(|v| FieldValue::Attribute(v.clone()));
                self.push(Field::Attribute(name.to_string()), value(o), value(n));
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<FieldDelta> {
        self.out
    }
}

fn entries_of(table: Option<&ValueTable>) -> Option<&BTreeMap<i64, String>> {
    table.filter(|t| !t.is_empty()).map(|t| &t.entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_only_differences() {
        let opts = DiffOptions::default();
        let mut d = Deltas::new(&opts);
        d.text(Field::Unit, "rpm", "rpm");
        d.float(Field::Factor, 0.25, 0.5);
        d.float(Field::Offset, 0.0, 0.0);
        d.optional_text(Field::Comment, None, Some("new"));
        let out = d.finish();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].field, Field::Factor);
        assert_eq!(out[1].old, None);
        assert_eq!(out[1].new, Some(FieldValue::Text("new".into())));
    }

    #[test]
    fn receivers_compare_as_sets() {
        let opts = DiffOptions::default();
        let mut d = Deltas::new(&opts);
        d.names(Field::Receivers, ["B", "A"].into(), ["A", "B"].into());
        assert!(d.finish().is_empty());
    }

    #[test]
    fn empty_table_equals_none() {
        let opts = DiffOptions::default();
        let empty = ValueTable::new("");
        let mut full = ValueTable::new("");
        full.entries.insert(0, "Off".into());

        let mut d = Deltas::new(&opts);
        d.table(Field::ValueTable, None, Some(&empty));
        assert!(d.finish().is_empty());

        let mut d = Deltas::new(&opts);
        d.table(Field::ValueTable, Some(&empty), Some(&full));
        let out = d.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].old, None);
    }

    #[test]
    fn attribute_union() {
        let opts = DiffOptions::new().float_tolerance(0.01);
        let (a, b, c) = (AttributeValue::Int(10), AttributeValue::Float(1.0), AttributeValue::Float(1.005));
        let old: BTreeMap<&str, &AttributeValue> = [("Cycle", &a), ("Start", &b)].into();
        let new: BTreeMap<&str, &AttributeValue> = [("Start", &c)].into();
        let mut d = Deltas::new(&opts);
        d.attributes(&old, &new);
        let out = d.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field, Field::Attribute("Cycle".into()));
        assert_eq!(out[0].new, None);
    }
}
