use crate::dbc::types::{database::Database, errors::InvariantError};
use crate::diff::core::{database, messages};
use crate::diff::options::DiffOptions;
use crate::diff::types::change::ChangeSet;

use log::debug;

/// Compares two databases.
///
/// Both sides are checked for duplicate message IDs and duplicate signal
/// names first; a violation is returned as [`InvariantError`] without
/// comparing anything.
///
/// The result is deterministic: messages by ascending ID, signals by
/// ascending name, independent of the order of the input files.
pub fn diff(old: &Database, new: &Database, options: &DiffOptions) -> Result<ChangeSet, InvariantError> {
    old.validate()?;
    new.validate()?;

    let changes = ChangeSet {
        version: database::diff_version(old, new, options),
        nodes: database::diff_nodes(old, new, options),
        value_tables: database::diff_value_tables(old, new, options),
        attributes: database::diff_attributes(old, new, options),
        messages: messages::diff_messages(old, new, options),
    };
    debug!(
        "diff of {} vs {} messages: {}",
        old.message_count(),
        new.message_count(),
        changes.summary()
    );
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::types::message::Message;
    use crate::diff::core::parse;
    use crate::diff::types::change::ChangeStatus;
    use crate::diff::types::delta::{Field, FieldValue};

    const OLD: &str = r#"
VERSION "1"
BU_: ECU ABS
BO_ 256 EngineData: 8 ECU
 SG_ RPM : 0|16@1+ (0.25,0) [0|16383.75] "rpm" ABS
"#;

    #[test]
    fn engine_data_scale_and_brake_status_added() {
        let new = OLD.replace("(0.25,0)", "(0.5,0)")
            + "BO_ 512 BrakeStatus: 1 ABS\n SG_ Pressed : 0|1@1+ (1,0) [0|1] \"\" ECU\n";
        let cs = diff(&parse(OLD), &parse(&new), &DiffOptions::default()).unwrap();

        assert_eq!(cs.messages.len(), 2);
        let engine = cs.message(0x100).unwrap();
        assert_eq!(engine.status, ChangeStatus::Modified);
        let rpm = engine.signal("RPM").unwrap();
        assert_eq!(rpm.status, ChangeStatus::Modified);
        assert_eq!(rpm.deltas.len(), 1);
        assert_eq!(rpm.deltas[0].field, Field::Factor);
        assert_eq!(rpm.deltas[0].old, Some(FieldValue::Float(0.25)));
        assert_eq!(rpm.deltas[0].new, Some(FieldValue::Float(0.5)));

        let brake = cs.message(0x200).unwrap();
        assert_eq!(brake.status, ChangeStatus::Added);
        assert_eq!(brake.name(), "BrakeStatus");
        assert!(cs.version.is_none());
        assert!(cs.nodes.is_empty());
    }

    #[test]
    fn identical_inputs() {
        let db = parse(OLD);
        assert!(diff(&db, &db, &DiffOptions::default()).unwrap().is_empty());

        let cs = diff(&db, &db, &DiffOptions::new().include_unchanged(true)).unwrap();
        assert!(!cs.has_changes());
        assert_eq!(cs.messages.len(), 1);
        assert_eq!(cs.messages[0].signals.len(), 1);
        assert_eq!(cs.nodes.len(), 2);
    }

    #[test]
    fn tolerance_hides_tiny_differences() {
        let new = OLD.replace("(0.25,0)", "(0.2500001,0)");
        let (a, b) = (parse(OLD), parse(&new));
        assert!(!diff(&a, &b, &DiffOptions::default()).unwrap().is_empty());
        assert!(diff(&a, &b, &DiffOptions::new().float_tolerance(1e-6)).unwrap().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let good = parse(OLD);
        let mut bad = parse(OLD);
        bad.push_message(Message::new(256, "Shadow", 8));
        let err = diff(&good, &bad, &DiffOptions::default()).unwrap_err();
        assert!(matches!(err, InvariantError::DuplicateMessageId { id: 256, .. }));
        assert!(diff(&bad, &good, &DiffOptions::default()).is_err());
    }

    #[test]
    fn duplicate_signal_names_are_rejected() {
        let good = parse(OLD);
        let mut bad = parse(OLD);
        let mut msg = Message::new(768, "Twice", 8);
        msg.signals.push(crate::dbc::types::signal::Signal::new("S"));
        msg.signals.push(crate::dbc::types::signal::Signal::new("S"));
        bad.push_message(msg);
        let err = diff(&good, &bad, &DiffOptions::default()).unwrap_err();
        assert_eq!(
            err,
            InvariantError::DuplicateSignalName {
                message_id: 768,
                signal: "S".into()
            }
        );
    }
}
