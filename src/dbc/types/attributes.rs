use serde::Serialize;
use std::fmt;

/// Attribute definition from a `BA_DEF_` line, completed by `BA_DEF_DEF_`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeDefinition {
    /// Attribute name.
    pub name: String,
    /// The type of object the attribute applies to.
    pub object: AttrObject,
    /// Attribute kind.
    pub kind: AttrType,
    // optional fields for numbers
    pub int_min: Option<i64>,
    pub int_max: Option<i64>,
    pub hex_min: Option<u64>,
    pub hex_max: Option<u64>,
    pub float_min: Option<f64>,
    pub float_max: Option<f64>,
    // enum labels, index = raw value
    pub enum_values: Vec<String>,
    /// Default value (`BA_DEF_DEF_`).
    pub default: Option<AttributeValue>,
}

impl AttributeDefinition {
    /// Interprets a raw `BA_`/`BA_DEF_DEF_` value according to this definition.
    ///
    /// Enum attributes are assigned by index in `BA_` and by label in `BA_DEF_DEF_`;
    /// both are normalized to [`AttributeValue::Enum`] carrying the label.
    pub(crate) fn coerce(&self, raw: AttributeValue) -> AttributeValue {
        match (self.kind, raw) {
            (AttrType::Enum, AttributeValue::Int(idx)) => usize::try_from(idx)
                .ok()
                .and_then(|i| self.enum_values.get(i))
                .map(|label| AttributeValue::Enum(label.clone()))
                .unwrap_or(AttributeValue::Int(idx)),
            (AttrType::Enum, AttributeValue::Str(label)) => AttributeValue::Enum(label),
            (AttrType::Hex, AttributeValue::Int(v)) if v >= 0 => AttributeValue::Hex(v as u64),
            (AttrType::Float, AttributeValue::Int(v)) => AttributeValue::Float(v as f64),
            (_, other) => other,
        }
    }
}

/// Attribute value kinds as declared by `BA_DEF_` lines in DBC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttrType {
    #[default]
    String,
    Int,
    Hex,
    Float,
    Enum,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrType::String => "String",
            AttrType::Int => "Int",
            AttrType::Hex => "Hex",
            AttrType::Float => "Float",
            AttrType::Enum => "Enum",
        })
    }
}

/// Concrete attribute value stored on DB/Node/Message/Signal entities.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Hex(u64),
    Float(f64),
    Enum(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => write!(f, "{}", s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Hex(h) => write!(f, "0x{:X}", h),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Enum(s) => write!(f, "{}", s),
        }
    }
}

/// The type of Object of the Attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrObject {
    #[default]
    Database,
    Node,
    Message,
    Signal,
    EnvironmentVariable,
}

impl fmt::Display for AttrObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrObject::Database => "Database",
            AttrObject::Node => "Node",
            AttrObject::Message => "Message",
            AttrObject::Signal => "Signal",
            AttrObject::EnvironmentVariable => "EnvironmentVariable",
        })
    }
}
