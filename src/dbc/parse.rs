use crate::dbc::core::{
    self, Outcome,
    lexer::Cursor,
    records::{self, Record},
};
use crate::dbc::types::{
    database::{Database, MessageKey, RawRecord},
    errors::{DbcError, InputError, ParseError, ParseErrorKind},
    message::Message,
    signal::Signal,
};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use log::debug;

/// Origin reported in errors when the caller does not name the input.
const ANONYMOUS: &str = "<memory>";

/// Parses DBC text into a [`Database`].
///
/// Same as [`from_str_named`] with errors reporting `<memory>` as origin.
pub fn from_str(text: &str) -> Result<Database, ParseError> {
    from_str_named(ANONYMOUS, text)
}

/// Parses DBC text into a [`Database`], naming the input `origin` in errors.
///
/// Parsing happens in two explicit passes over the record stream:
/// - **Pass 1** builds the primary objects: version, nodes (`BU_`), messages (`BO_`)
///   with their signals (`SG_`), named value tables (`VAL_TABLE_`) and attribute
///   definitions (`BA_DEF_`).
/// - **Pass 2** resolves the annotation records against the completed lookups:
///   attribute defaults (`BA_DEF_DEF_`) first, then `CM_`, `BA_`, `VAL_`,
///   `BO_TX_BU_` and `SIG_VALTYPE_` in file order.
///
/// Records the model does not cover (`EV_`, `SG_MUL_VAL_`, `SIG_GROUP_`, vendor
/// extensions, ...) are kept in [`Database::raw_records`].
///
/// # Errors
/// The first malformed or structurally invalid record aborts the parse with a
/// [`ParseError`] carrying `origin`, the record's line and the offending token.
pub fn from_str_named(origin: &str, text: &str) -> Result<Database, ParseError> {
    let text: &str = text.strip_prefix('\u{feff}').unwrap_or(text);
    let records: Vec<Record> = records::split(text);

    let mut db: Database = Database::default();
    let mut defaults: Vec<&Record> = Vec::new();
    let mut annotations: Vec<&Record> = Vec::new();
    let mut block: Option<MessageBlock> = None;
    let mut first_line_of_id: HashMap<u32, usize> = HashMap::new();

    // --- pass 1: primary objects ---
    for record in &records {
        if record.keyword != "SG_"
            && let Some(done) = block.take()
        {
            done.close(&db, origin)?;
        }

        match record.keyword.as_str() {
            "VERSION" => core::version::decode(&mut db, &mut Cursor::new(origin, record)?)?,
            "NS_" | "BS_" => {}
            "BU_" => core::bu_::decode(&mut db, &mut Cursor::new(origin, record)?)?,
            "BO_" => {
                let msg: Message = core::bo_::decode(&mut Cursor::new(origin, record)?)?;
                if let Some(&first_line) = first_line_of_id.get(&msg.id) {
                    return Err(ParseError {
                        origin: origin.to_string(),
                        line: record.line,
                        token: msg.id.to_string(),
                        reason: ParseErrorKind::DuplicateMessageId {
                            id: msg.id,
                            first_line,
                        },
                    });
                }
                first_line_of_id.insert(msg.id, record.line);
                block = Some(MessageBlock::new(db.push_message(msg)));
            }
            "SG_" => {
                let mut cur: Cursor = Cursor::new(origin, record)?;
                let Some(open) = block.as_mut() else {
                    return Err(cur.error(ParseErrorKind::SignalOutsideMessage));
                };
                let sig: Signal = core::sg_::decode(&mut cur)?;
                open.attach(&mut db, sig, &cur)?;
            }
            "VAL_TABLE_" => core::val_table_::decode(&mut db, &mut Cursor::new(origin, record)?)?,
            "BA_DEF_" => {
                let outcome: Outcome =
                    core::attributes::ba_def_::decode(&mut db, &mut Cursor::new(origin, record)?)?;
                keep_if_opaque(&mut db, record, outcome);
            }
            "BA_DEF_DEF_" => defaults.push(record),
            "CM_" | "BA_" | "VAL_" | "BO_TX_BU_" | "SIG_VALTYPE_" => annotations.push(record),
            _ => {
                debug!(
                    "{}:{}: keeping unsupported record {}",
                    origin, record.line, record.keyword
                );
                keep_if_opaque(&mut db, record, Outcome::Opaque);
            }
        }
    }
    if let Some(done) = block.take() {
        done.close(&db, origin)?;
    }

    // --- pass 2: annotations ---
    for record in defaults {
        let outcome: Outcome = core::attributes::ba_def_def_::decode(&mut db, &mut Cursor::new(origin, record)?)?;
        keep_if_opaque(&mut db, record, outcome);
    }
    for record in annotations {
        let mut cur: Cursor = Cursor::new(origin, record)?;
        let outcome: Outcome = match record.keyword.as_str() {
            "CM_" => core::comments::decode(&mut db, &mut cur)?,
            "BA_" => core::attributes::ba_::decode(&mut db, &mut cur)?,
            "VAL_" => core::val_::decode(&mut db, &mut cur)?,
            "BO_TX_BU_" => {
                core::bo_tx_bu_::decode(&mut db, &mut cur)?;
                Outcome::Applied
            }
            _ => {
                core::sig_valtype_::decode(&mut db, &mut cur)?;
                Outcome::Applied
            }
        };
        keep_if_opaque(&mut db, record, outcome);
    }
    db.raw_records.sort_by_key(|r| r.line);

    debug!(
        "{}: parsed {} records into {} nodes, {} messages, {} signals ({} kept verbatim)",
        origin,
        records.len(),
        db.nodes.len(),
        db.message_count(),
        db.signal_count(),
        db.raw_records.len()
    );

    Ok(db)
}

/// Decodes raw file bytes: UTF-8 when valid, Windows-1252 otherwise (the
/// encoding most DBC editors write).
pub fn from_bytes(origin: &str, bytes: &[u8]) -> Result<Database, ParseError> {
    let text: String = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            debug!("{}: not valid UTF-8, decoding as Windows-1252", origin);
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    };
    from_str_named(origin, &text)
}

/// Reads and parses a `.dbc` file.
///
/// # Errors
/// - [`DbcError::Input`] if the file cannot be opened or read.
/// - [`DbcError::Parse`] if the content is malformed; the error origin is the path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Database, DbcError> {
    let path: &Path = path.as_ref();
    let display: String = path.display().to_string();
    let bytes: Vec<u8> = fs::read(path).map_err(|source| {
        if path.exists() {
            InputError::Read {
                path: display.clone(),
                source,
            }
        } else {
            InputError::OpenFile {
                path: display.clone(),
                source,
            }
        }
    })?;
    Ok(from_bytes(&display, &bytes)?)
}

fn keep_if_opaque(db: &mut Database, record: &Record, outcome: Outcome) {
    if outcome == Outcome::Opaque {
        db.raw_records.push(RawRecord {
            keyword: record.keyword.clone(),
            line: record.line,
            text: record.text.clone(),
        });
    }
}

/// The message whose `SG_` lines are being read.
struct MessageBlock {
    key: MessageKey,
    // multiplexed signals and their lines, checked when the block closes
    multiplexed: Vec<(String, usize)>,
}

impl MessageBlock {
    fn new(key: MessageKey) -> Self {
        MessageBlock {
            key,
            multiplexed: Vec::new(),
        }
    }

    fn attach(&mut self, db: &mut Database, sig: Signal, cur: &Cursor) -> Result<(), ParseError> {
        let Some(msg) = db.get_message_by_key_mut(self.key) else {
            return Err(cur.error(ParseErrorKind::SignalOutsideMessage));
        };
        if msg.get_signal_by_name(&sig.name).is_some() {
            return Err(cur.error_for(
                &sig.name,
                ParseErrorKind::DuplicateSignal {
                    message_id: msg.id,
                    signal: sig.name.clone(),
                },
            ));
        }
        if sig.multiplexer.is_multiplexed() {
            self.multiplexed.push((sig.name.clone(), cur.line()));
        }
        msg.signals.push(sig);
        Ok(())
    }

    /// A multiplexed signal needs a multiplexor switch in the same message.
    fn close(self, db: &Database, origin: &str) -> Result<(), ParseError> {
        let Some(msg) = db.get_message_by_key(self.key) else {
            return Ok(());
        };
        if self.multiplexed.is_empty() || msg.signals.iter().any(|s| s.multiplexer.is_switch()) {
            return Ok(());
        }
        let (signal, line) = self.multiplexed.into_iter().next().unwrap_or_default();
        Err(ParseError {
            origin: origin.to_string(),
            line,
            token: signal.clone(),
            reason: ParseErrorKind::UnknownMultiplexer {
                message_id: msg.id,
                signal,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::types::{
        attributes::AttributeValue,
        signal::{ByteOrder, Multiplexer, Receivers, Signedness},
    };

    const SAMPLE: &str = r#"
VERSION "1.0.2"

NS_ :
	NS_DESC_
	CM_
	BA_DEF_
	BA_
	VAL_
	BA_DEF_DEF_
	BO_TX_BU_
	SIG_VALTYPE_

BS_:

BU_: Motor Infotainment Gateway

VAL_TABLE_ OnOff 1 "On" 0 "Off" ;

BO_ 2527679645 Motor_01: 8 Motor
 SG_ Status : 61|1@1+ (1,0) [0|1] ""  Infotainment,Gateway
 SG_ Overheat : 62|1@1+ (1,0) [0|1] ""  Gateway
 SG_ Engine_Speed : 48|8@1+ (1,0) [0|255] "km/h" Infotainment
 SG_ Failure : 63|1@1+ (1,0) [0|1] "" Infotainment,Gateway

BO_ 708 ZV_04: 8 Vector__XXX
 SG_ Mode M : 0|4@1+ (1,0) [0|15] "" Vector__XXX
 SG_ Lock_A m0 : 8|1@0+ (1.0,0.0) [0.0|1] ""  Vector__XXX
 SG_ Lock_B m1 : 8|1@0- (1.0,0.0) [0.0|1] ""  Vector__XXX

BO_ 1 Empty: 0 Gateway

EV_ Klemme: 0 [0|1] "" 0 1 DUMMY_NODE_VECTOR0 Vector__XXX;

BO_TX_BU_ 2527679645 : Backup_Motor;

CM_ BO_ 2527679645 "Funny comment about Motor_01";
CM_ SG_ 2527679645 Engine_Speed "This comment tells you everything
about Engine Speed.";
CM_ BU_ Motor "Motor ECU is really important for vehicle motion.";

BA_DEF_ BO_ "GenMsgCycleTime" INT 0 65535;
BA_DEF_ "BusType" STRING;
BA_DEF_DEF_ "GenMsgCycleTime" 100;
BA_ "BusType" "CAN FD";
BA_ "GenMsgCycleTime" BO_ 708 20;

VAL_ 2527679645 Status 1 "On" 0 "Off" ;
VAL_ 2527679645 Engine_Speed 255 "Error"
   254 "Init" ;
SIG_VALTYPE_ 2527679645 Engine_Speed : 1;
"#;

    #[test]
    fn test_from_str() {
        let db: Database = from_str(SAMPLE).expect("Failed to parse DBC");

        // --- Database first checks ---
        assert_eq!(db.version, "1.0.2");
        assert_eq!(db.attributes["BusType"], AttributeValue::Str("CAN FD".into()));
        assert_eq!(db.value_tables["OnOff"].get(1), Some("On"));

        // --- Nodes ---
        let names: Vec<&str> = db.iter_nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Motor", "Infotainment", "Gateway"]);
        assert_eq!(
            db.get_node_by_name("Motor").unwrap().comment.as_deref(),
            Some("Motor ECU is really important for vehicle motion.")
        );

        // --- Messages ---
        assert_eq!(db.message_count(), 3);
        let ids: Vec<u32> = db.iter_messages().map(|m| m.id).collect();
        assert_eq!(ids, [2527679645, 708, 1]);

        let msg = db.get_message_by_id(2527679645).unwrap();
        assert_eq!(msg.name, "Motor_01");
        assert_eq!(msg.sender.as_deref(), Some("Motor"));
        assert_eq!(msg.transmitters, ["Backup_Motor"]);
        assert_eq!(msg.comment.as_deref(), Some("Funny comment about Motor_01"));
        assert_eq!(msg.signals.len(), 4);

        let speed = msg.get_signal_by_name("Engine_Speed").unwrap();
        assert_eq!(speed.unit, "km/h");
        assert_eq!(speed.sign, Signedness::IeeeFloat);
        assert_eq!(
            speed.comment.as_deref(),
            Some("This comment tells you everything\nabout Engine Speed.")
        );
        assert_eq!(speed.value_label(254), Some("Init"));
        assert_eq!(speed.value_label(255), Some("Error"));
        assert_eq!(
            msg.get_signal_by_name("Status").unwrap().receivers,
            Receivers::Nodes(vec!["Infotainment".into(), "Gateway".into()])
        );

        let zv = db.get_message_by_id(708).unwrap();
        assert_eq!(zv.sender, None);
        assert_eq!(zv.attributes["GenMsgCycleTime"], AttributeValue::Int(20));
        let lock_b = zv.get_signal_by_name("Lock_B").unwrap();
        assert_eq!(lock_b.multiplexer, Multiplexer::Multiplexed(1));
        assert_eq!(lock_b.byte_order, ByteOrder::BigEndian);
        assert_eq!(lock_b.sign, Signedness::Signed);
        assert_eq!(lock_b.receivers, Receivers::None);

        assert!(db.get_message_by_id(1).unwrap().signals.is_empty());
        assert_eq!(
            db.attr_default(crate::dbc::types::attributes::AttrObject::Message, "GenMsgCycleTime"),
            Some(&AttributeValue::Int(100))
        );

        // --- opaque records ---
        assert_eq!(db.raw_records.len(), 1);
        assert_eq!(db.raw_records[0].keyword, "EV_");
    }

    #[test]
    fn empty_input_is_an_empty_database() {
        let db = from_str("").unwrap();
        assert_eq!(db.message_count(), 0);
        assert_eq!(db.nodes.len(), 0);
        assert_eq!(db.version, "");
    }

    #[test]
    fn signal_before_any_message_fails() {
        let err = from_str_named("x.dbc", "BU_: A\n SG_ S : 0|8@1+ (1,0) [0|1] \"\" A\n").unwrap_err();
        assert_eq!(err.origin, "x.dbc");
        assert_eq!(err.line, 2);
        assert_eq!(err.reason, ParseErrorKind::SignalOutsideMessage);
    }

    #[test]
    fn signal_separated_from_its_message_fails() {
        let text = "BO_ 1 A: 8 X\n SG_ S : 0|8@1+ (1,0) [0|1] \"\" X\nBU_: X\n SG_ T : 8|8@1+ (1,0) [0|1] \"\" X\n";
        let err = from_str(text).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.reason, ParseErrorKind::SignalOutsideMessage);
    }

    #[test]
    fn duplicate_message_id_fails() {
        let text = "BO_ 256 A: 8 X\n\nBO_ 256 B: 8 X\n";
        let err = from_str(text).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.reason,
            ParseErrorKind::DuplicateMessageId {
                id: 256,
                first_line: 1
            }
        );
    }

    #[test]
    fn duplicate_signal_fails() {
        let text = "BO_ 1 A: 8 X\n SG_ S : 0|8@1+ (1,0) [0|1] \"\" X\n SG_ S : 8|8@1+ (1,0) [0|1] \"\" X\n";
        let err = from_str(text).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(err.reason, ParseErrorKind::DuplicateSignal { message_id: 1, .. }));
    }

    #[test]
    fn multiplexed_signal_without_multiplexor_fails() {
        let text = "BO_ 7 A: 8 X\n SG_ S m1 : 0|8@1+ (1,0) [0|1] \"\" X\n\nBO_ 8 B: 8 X\n";
        let err = from_str(text).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.reason,
            ParseErrorKind::UnknownMultiplexer {
                message_id: 7,
                signal: "S".into()
            }
        );
    }

    #[test]
    fn malformed_number_reports_line() {
        let text = "VERSION \"\"\n\nBO_ 1 A: 8 X\n SG_ S : 0|8@1+ (1,0) [0|1e] \"\" X\n";
        let err = from_str(text).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.token, "1e");
        assert_eq!(err.reason, ParseErrorKind::MalformedNumber);
    }

    #[test]
    fn comments_may_precede_their_target() {
        let text = "CM_ BO_ 5 \"declared later\";\nBO_ 5 Late: 8 X\n";
        let db = from_str(text).unwrap();
        assert_eq!(
            db.get_message_by_id(5).unwrap().comment.as_deref(),
            Some("declared later")
        );
    }

    #[test]
    fn vendor_records_are_kept() {
        let text = "BO_ 1 A: 8 X\nSG_MUL_VAL_ 1 S Mux 0-0;\nFOO_BAR_ whatever \"x\";\n";
        let db = from_str(text).unwrap();
        let kws: Vec<&str> = db.raw_records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(kws, ["SG_MUL_VAL_", "FOO_BAR_"]);
    }

    #[test]
    fn environment_attribute_with_default_is_kept() {
        let text = "BU_: A\nBO_ 1 M: 8 A\nEV_ Klemme: 0 [0|1] \"\" 0 1 DUMMY_NODE_VECTOR0 Vector__XXX;\nBA_DEF_ EV_ \"EvAttr\" INT 0 10;\nBA_DEF_DEF_ \"EvAttr\" 0;\nBA_ \"EvAttr\" EV_ Klemme 1;\n";
        let db = from_str(text).unwrap();
        let kws: Vec<(&str, usize)> = db.raw_records.iter().map(|r| (r.keyword.as_str(), r.line)).collect();
        assert_eq!(kws, [("EV_", 3), ("BA_DEF_", 4), ("BA_DEF_DEF_", 5), ("BA_", 6)]);
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let db = from_str("\u{feff}VERSION \"9\"\nBO_ 1 M: 8 A\n").unwrap();
        assert_eq!(db.version, "9");
        assert!(db.raw_records.is_empty());

        let db = from_bytes("bom.dbc", b"\xEF\xBB\xBFVERSION \"9\"\n").unwrap();
        assert_eq!(db.version, "9");
    }

    #[test]
    fn windows_1252_bytes_are_decoded() {
        let mut bytes: Vec<u8> = b"BO_ 1 A: 8 X\nCM_ BO_ 1 \"Gr".to_vec();
        bytes.push(0xFC); // 'ü' in Windows-1252
        bytes.extend_from_slice(b"n\";\n");
        let db = from_bytes("w.dbc", &bytes).unwrap();
        assert_eq!(db.get_message_by_id(1).unwrap().comment.as_deref(), Some("Grün"));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = from_file("/definitely/not/here.dbc").unwrap_err();
        assert!(matches!(err, DbcError::Input(InputError::OpenFile { .. })));
    }

    #[test]
    fn from_file_names_the_path_in_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dbc");
        std::fs::write(&path, "BO_ 1 A 8 X\n").unwrap();
        match from_file(&path) {
            Err(DbcError::Parse(err)) => {
                assert_eq!(err.origin, path.display().to_string());
                assert_eq!(err.line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
