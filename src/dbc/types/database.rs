//! Database model (SlotMap-backed).
//!
//! This module defines the in-memory **CAN database** built by the DBC parser.
//! Nodes and messages live in **SlotMap** arenas with stable keys ([`NodeKey`], [`MessageKey`]);
//! public iteration follows **order vectors** (file order) via `iter_nodes()` and `iter_messages()`.
//! Signals are owned by their [`Message`].
//!
//! **Lookups** are O(1): `get_message_by_id`, `get_node_by_name`.
//! Node names are matched exactly, as DBC tools do.
//!

use slotmap::{SlotMap, new_key_type};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dbc::types::{
    attributes::{AttrObject, AttributeDefinition, AttributeValue},
    errors::InvariantError,
    message::Message,
    node::Node,
    value_table::ValueTable,
};

// --- Stable keys (SlotMap) ---
new_key_type! { pub struct NodeKey; }
new_key_type! { pub struct MessageKey; }

/// A record the parser does not model (vendor extensions, environment
/// variables, signal groups, ...). Kept verbatim so nothing is lost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// Leading keyword, e.g. `EV_` or `SG_MUL_VAL_`.
    pub keyword: String,
    /// 1-based line of the first line of the record.
    pub line: usize,
    /// Full record text, continuation lines joined with `\n`.
    pub text: String,
}

/// In-memory representation of one DBC file.
///
/// Built once by [`crate::dbc::from_str`] and read-only afterwards.
#[derive(Default, Clone, Debug)]
pub struct Database {
    // --- General information ---
    /// Database version string (`VERSION "..."`).
    pub version: String,
    /// Network comment (`CM_ "..."`).
    pub comment: Option<String>,

    // --- Main storage (stable-key maps) ---
    pub nodes: SlotMap<NodeKey, Node>,
    pub messages: SlotMap<MessageKey, Message>,

    // --- Order "views" ---
    pub nodes_order: Vec<NodeKey>,
    pub messages_order: Vec<MessageKey>,

    /// Named value tables (`VAL_TABLE_`).
    pub value_tables: BTreeMap<String, ValueTable>,

    // --- DB Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,

    // --- Attribute definitions (BA_DEF_ / BA_DEF_DEF_) ---
    pub db_attr_defs: BTreeMap<String, AttributeDefinition>,
    pub node_attr_defs: BTreeMap<String, AttributeDefinition>,
    pub msg_attr_defs: BTreeMap<String, AttributeDefinition>,
    pub sig_attr_defs: BTreeMap<String, AttributeDefinition>,

    /// Records kept verbatim.
    pub raw_records: Vec<RawRecord>,

    // --- Lookups ---
    pub(crate) node_key_by_name: HashMap<String, NodeKey>,
    pub(crate) msg_key_by_id: HashMap<u32, MessageKey>,
}

impl Database {
    // --------- Nodes --------
    /// Adds a node to the database if not already present and returns the corresponding `NodeKey`.
    pub fn add_node_if_absent(&mut self, name: &str) -> NodeKey {
        if let Some(k) = self.get_node_key_by_name(name) {
            return k;
        }
        let key: NodeKey = self.nodes.insert(Node::new(name));
        self.nodes_order.push(key);
        self.node_key_by_name.insert(name.to_string(), key);
        key
    }

    pub fn get_node_key_by_name(&self, name: &str) -> Option<NodeKey> {
        self.node_key_by_name.get(name).copied()
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        let key: NodeKey = self.get_node_key_by_name(name)?;
        self.nodes.get(key)
    }

    pub(crate) fn get_node_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        let key: NodeKey = self.get_node_key_by_name(name)?;
        self.nodes.get_mut(key)
    }

    /// Nodes in file order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes_order.iter().filter_map(|&k| self.nodes.get(k))
    }

    // ------------- Messages ------------
    /// Appends a message and indexes its ID.
    ///
    /// Uniqueness is not enforced here: when an ID is pushed twice the lookup keeps
    /// the first message and [`Database::validate`] reports the clash.
    pub fn push_message(&mut self, message: Message) -> MessageKey {
        let id: u32 = message.id;
        let key: MessageKey = self.messages.insert(message);
        self.messages_order.push(key);
        self.msg_key_by_id.entry(id).or_insert(key);
        key
    }

    pub fn get_msg_key_by_id(&self, id: u32) -> Option<MessageKey> {
        self.msg_key_by_id.get(&id).copied()
    }

    pub fn get_message_by_key(&self, key: MessageKey) -> Option<&Message> {
        self.messages.get(key)
    }

    pub(crate) fn get_message_by_key_mut(&mut self, key: MessageKey) -> Option<&mut Message> {
        self.messages.get_mut(key)
    }

    /// Returns a `&Message` given the raw CAN ID.
    pub fn get_message_by_id(&self, id: u32) -> Option<&Message> {
        let key: MessageKey = self.get_msg_key_by_id(id)?;
        self.get_message_by_key(key)
    }

    pub(crate) fn get_message_by_id_mut(&mut self, id: u32) -> Option<&mut Message> {
        let key: MessageKey = self.get_msg_key_by_id(id)?;
        self.get_message_by_key_mut(key)
    }

    /// Messages in file order.
    pub fn iter_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages_order
            .iter()
            .filter_map(|&k| self.messages.get(k))
    }

    pub fn message_count(&self) -> usize {
        self.messages_order.len()
    }

    /// Total number of signals across all messages.
    pub fn signal_count(&self) -> usize {
        self.iter_messages().map(|m| m.signals.len()).sum()
    }

    // ------------- Attributes ------------
    pub fn attr_defs(&self, object: AttrObject) -> Option<&BTreeMap<String, AttributeDefinition>> {
        match object {
            AttrObject::Database => Some(&self.db_attr_defs),
            AttrObject::Node => Some(&self.node_attr_defs),
            AttrObject::Message => Some(&self.msg_attr_defs),
            AttrObject::Signal => Some(&self.sig_attr_defs),
            AttrObject::EnvironmentVariable => None,
        }
    }

    pub(crate) fn attr_defs_mut(
        &mut self,
        object: AttrObject,
    ) -> Option<&mut BTreeMap<String, AttributeDefinition>> {
        match object {
            AttrObject::Database => Some(&mut self.db_attr_defs),
            AttrObject::Node => Some(&mut self.node_attr_defs),
            AttrObject::Message => Some(&mut self.msg_attr_defs),
            AttrObject::Signal => Some(&mut self.sig_attr_defs),
            AttrObject::EnvironmentVariable => None,
        }
    }

    /// Definition of attribute `name` for the given object kind.
    pub fn attr_def(&self, object: AttrObject, name: &str) -> Option<&AttributeDefinition> {
        self.attr_defs(object)?.get(name)
    }

    /// Default value (`BA_DEF_DEF_`) of attribute `name` for the given object kind.
    pub fn attr_default(&self, object: AttrObject, name: &str) -> Option<&AttributeValue> {
        self.attr_def(object, name)?.default.as_ref()
    }

    /// Effective attribute values of one object: defaults of every definition for
    /// `object`, overridden by the explicit assignments in `assigned`.
    pub fn effective_attributes<'a>(
        &'a self,
        object: AttrObject,
        assigned: &'a BTreeMap<String, AttributeValue>,
    ) -> BTreeMap<&'a str, &'a AttributeValue> {
        let mut out: BTreeMap<&str, &AttributeValue> = BTreeMap::new();
        if let Some(defs) = self.attr_defs(object) {
            for (name, def) in defs {
                if let Some(default) = &def.default {
                    out.insert(name.as_str(), default);
                }
            }
        }
        for (name, value) in assigned {
            out.insert(name.as_str(), value);
        }
        out
    }

    // ------------- Invariants ------------
    /// Checks the uniqueness invariants: message IDs within the database and
    /// signal names within each message.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let mut seen: HashMap<u32, &str> = HashMap::new();
        for msg in self.iter_messages() {
            if let Some(first) = seen.insert(msg.id, &msg.name) {
                return Err(InvariantError::DuplicateMessageId {
                    id: msg.id,
                    first: first.to_string(),
                    second: msg.name.clone(),
                });
            }
            let mut names: HashSet<&str> = HashSet::with_capacity(msg.signals.len());
            for sig in &msg.signals {
                if !names.insert(&sig.name) {
                    return Err(InvariantError::DuplicateSignalName {
                        message_id: msg.id,
                        signal: sig.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
