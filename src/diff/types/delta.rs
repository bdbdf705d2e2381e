use crate::dbc::types::{
    attributes::AttributeValue,
    signal::{ByteOrder, Multiplexer, Signedness},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A tracked property of a database, node, value table, message or signal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    // --- database ---
    Version,
    // --- shared ---
    Name,
    Comment,
    /// An attribute assignment (effective value: explicit, else the definition default).
    Attribute(String),
    // --- value table ---
    Entries,
    // --- message ---
    ByteLength,
    Sender,
    Transmitters,
    // --- signal ---
    StartBit,
    BitLength,
    ByteOrder,
    Signedness,
    Factor,
    Offset,
    Minimum,
    Maximum,
    Unit,
    Receivers,
    Multiplexer,
    ValueTable,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Version => f.write_str("version"),
            Field::Name => f.write_str("name"),
            Field::Comment => f.write_str("comment"),
            Field::Attribute(name) => write!(f, "attribute:{}", name),
            Field::Entries => f.write_str("entries"),
            Field::ByteLength => f.write_str("byte_length"),
            Field::Sender => f.write_str("sender"),
            Field::Transmitters => f.write_str("transmitters"),
            Field::StartBit => f.write_str("start_bit"),
            Field::BitLength => f.write_str("bit_length"),
            Field::ByteOrder => f.write_str("byte_order"),
            Field::Signedness => f.write_str("signedness"),
            Field::Factor => f.write_str("factor"),
            Field::Offset => f.write_str("offset"),
            Field::Minimum => f.write_str("minimum"),
            Field::Maximum => f.write_str("maximum"),
            Field::Unit => f.write_str("unit"),
            Field::Receivers => f.write_str("receivers"),
            Field::Multiplexer => f.write_str("multiplexer"),
            Field::ValueTable => f.write_str("value_table"),
        }
    }
}

/// Value of a field on one side of a comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    ByteOrder(ByteOrder),
    Signedness(Signedness),
    Multiplexer(Multiplexer),
    /// Unordered name sets (receivers, transmitters), sorted.
    Names(Vec<String>),
    /// Raw value → label.
    Table(BTreeMap<i64, String>),
    Attribute(AttributeValue),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::ByteOrder(b) => write!(f, "{}", b),
            FieldValue::Signedness(s) => write!(f, "{}", s),
            FieldValue::Multiplexer(m) => write!(f, "{}", m),
            FieldValue::Names(names) => write!(f, "[{}]", names.join(", ")),
            FieldValue::Table(entries) => {
                f.write_str("{")?;
                for (i, (raw, label)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {:?}", raw, label)?;
                }
                f.write_str("}")
            }
            FieldValue::Attribute(a) => write!(f, "{}", a),
        }
    }
}

/// One changed field. `None` means the field is absent on that side
/// (no comment, no value table, attribute not assigned, ...).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDelta {
    pub field: Field,
    pub old: Option<FieldValue>,
    pub new: Option<FieldValue>,
}

impl fmt::Display for FieldDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<FieldValue>| match v {
            Some(v) => v.to_string(),
            None => "-".to_string(),
        };
        write!(f, "{}: {} -> {}", self.field, show(&self.old), show(&self.new))
    }
}
