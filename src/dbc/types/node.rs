use crate::dbc::types::attributes::AttributeValue;
use std::collections::BTreeMap;

/// Node/ECU defined in the database.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Node {
    /// Node/ECU name.
    pub name: String,
    /// Associated comment (DBC `CM_ BU_` section).
    pub comment: Option<String>,

    // --- Attributes ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Node {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
