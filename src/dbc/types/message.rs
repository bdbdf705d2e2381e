use crate::dbc::types::{attributes::AttributeValue, signal::Signal};
use std::collections::BTreeMap;

/// Bit 31 of a DBC message ID flags an extended (29-bit) identifier.
pub const EXTENDED_ID_FLAG: u32 = 0x8000_0000;

/// CAN message defined in the database.
///
/// `id` is the raw identifier as written in the `BO_` line (extended flag
/// included), which is also the identity used when comparing two databases.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Message {
    /// Raw CAN ID (base 10 in the file).
    pub id: u32,
    /// Message name.
    pub name: String,
    /// Payload length in bytes.
    pub byte_length: u16,
    /// Sending node; `None` when the file says `Vector__XXX`.
    pub sender: Option<String>,
    /// Additional transmitting nodes (DBC `BO_TX_BU_` section).
    pub transmitters: Vec<String>,
    /// Associated comment (DBC `CM_ BO_` section).
    pub comment: Option<String>,
    /// Signals that belong to this message, in file order.
    pub signals: Vec<Signal>,

    // --- Message Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Message {
    pub fn new(id: u32, name: &str, byte_length: u16) -> Self {
        Message {
            id,
            name: name.to_string(),
            byte_length,
            ..Default::default()
        }
    }

    /// Returns a signal of this message by exact name.
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub(crate) fn get_signal_by_name_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.iter_mut().find(|s| s.name == name)
    }

    /// ID format derived from the extended flag.
    pub fn id_format(&self) -> IdFormat {
        if self.id & EXTENDED_ID_FLAG != 0 {
            IdFormat::Extended
        } else {
            IdFormat::Standard
        }
    }

    /// Arbitration ID with the extended flag stripped.
    pub fn arbitration_id(&self) -> u32 {
        self.id & !EXTENDED_ID_FLAG
    }

    /// Normalized hexadecimal form of the raw ID (`"0x..."`, uppercase).
    pub fn id_hex(&self) -> String {
        format!("0x{:X}", self.id)
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum IdFormat {
    #[default]
    Standard,
    Extended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_flag_is_split_from_arbitration_id() {
        let msg = Message::new(2_527_679_645, "Motor_01", 8);
        assert_eq!(msg.id_format(), IdFormat::Extended);
        assert_eq!(msg.arbitration_id(), 0x16A9_549D);
        assert_eq!(msg.id_hex(), "0x96A9549D");

        let std_msg = Message::new(0x100, "EngineData", 8);
        assert_eq!(std_msg.id_format(), IdFormat::Standard);
        assert_eq!(std_msg.id_hex(), "0x100");
    }
}
