use crate::dbc::types::{attributes::AttributeValue, value_table::ValueTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Placeholder node name used by DBC tools when a signal has no receiver
/// or a message has no sender.
pub const NO_NODE: &str = "Vector__XXX";

/// Definition of a signal within a CAN message (DBC).
///
/// Describes position/bit-length, byte order, sign, scaling (factor/offset),
/// valid range, unit of measure, value descriptions, and receiver nodes.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Signal {
    /// Signal name.
    pub name: String,
    /// Bit start in the payload, as written in the DBC.
    pub bit_start: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Byte order (`@0` Motorola / `@1` Intel).
    pub byte_order: ByteOrder,
    /// Sign, upgraded to an IEEE encoding by `SIG_VALTYPE_`.
    pub sign: Signedness,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value.
    pub min: f64,
    /// Maximum physical value.
    pub max: f64,
    /// Unit of measure.
    pub unit: String,
    /// Receiver nodes.
    pub receivers: Receivers,
    /// Multiplexing indicator.
    pub multiplexer: Multiplexer,
    /// Associated comment (DBC `CM_ SG_` section).
    pub comment: Option<String>,
    /// Value descriptions (DBC `VAL_` section).
    pub value_table: Option<ValueTable>,

    // --- Signal Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Signal {
    pub fn new(name: &str) -> Self {
        Signal {
            name: name.to_string(),
            factor: 1.0,
            ..Default::default()
        }
    }

    /// Returns the label for a raw value, if the signal carries value descriptions.
    pub fn value_label(&self, raw: i64) -> Option<&str> {
        self.value_table.as_ref().and_then(|t| t.get(raw))
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    #[default]
    BigEndian, // 0, Motorola
    LittleEndian, // 1, Intel
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::BigEndian => "big_endian",
            ByteOrder::LittleEndian => "little_endian",
        })
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signedness {
    #[default]
    Unsigned, // +
    Signed,     // -
    IeeeFloat,  // SIG_VALTYPE_ = 1
    IeeeDouble, // SIG_VALTYPE_ = 2
}

impl fmt::Display for Signedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signedness::Unsigned => "unsigned",
            Signedness::Signed => "signed",
            Signedness::IeeeFloat => "ieee_float",
            Signedness::IeeeDouble => "ieee_double",
        })
    }
}

/// Receiving nodes of a signal.
///
/// The DBC grammar always requires a token in this position; `Vector__XXX`
/// maps to [`Receivers::None`].
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub enum Receivers {
    #[default]
    None,
    Nodes(Vec<String>),
}

impl Receivers {
    /// Receiver names as an unordered set (empty for [`Receivers::None`]).
    pub fn as_set(&self) -> BTreeSet<&str> {
        match self {
            Receivers::None => BTreeSet::new(),
            Receivers::Nodes(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// What role (if any) a signal plays in multiplexing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", content = "value", rename_all = "snake_case")]
pub enum Multiplexer {
    /// Not multiplexed (always present).
    #[default]
    None,
    /// This signal is the multiplexer switch (marked as `M` in DBC).
    Multiplexor,
    /// This signal is gated by a multiplexer value (marked as `mX`).
    Multiplexed(u64),
    /// Gated by a switch value and itself a switch (marked as `mXM`).
    MultiplexedMultiplexor(u64),
}

impl Multiplexer {
    pub fn is_switch(&self) -> bool {
        matches!(
            self,
            Multiplexer::Multiplexor | Multiplexer::MultiplexedMultiplexor(_)
        )
    }

    pub fn is_multiplexed(&self) -> bool {
        matches!(
            self,
            Multiplexer::Multiplexed(_) | Multiplexer::MultiplexedMultiplexor(_)
        )
    }
}

impl fmt::Display for Multiplexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplexer::None => Ok(()),
            Multiplexer::Multiplexor => f.write_str("M"),
            Multiplexer::Multiplexed(v) => write!(f, "m{}", v),
            Multiplexer::MultiplexedMultiplexor(v) => write!(f, "m{}M", v),
        }
    }
}
