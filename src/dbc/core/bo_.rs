use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{errors::ParseError, message::Message, signal::NO_NODE};

/// Decode a `BO_` line into a new [`Message`] without signals.
/// Accepts both: `BO_ 123 NAME: 8 Node` and `BO_ 123 NAME : 8 Node`.
pub(crate) fn decode(cur: &mut Cursor) -> Result<Message, ParseError> {
    cur.word("BO_")?;
    let id: u32 = cur.integer("message id")?;
    let name: String = cur.word("message name")?;
    cur.punct(':', "':' after message name")?;
    let byte_length: u16 = cur.integer("message length")?;

    // the sender is mandatory in the grammar, but a few exporters leave it out
    let sender: Option<String> = if cur.at_end() {
        None
    } else {
        Some(cur.word("sending node")?).filter(|s| s != NO_NODE)
    };
    cur.finish()?;

    let mut msg: Message = Message::new(id, &name, byte_length);
    msg.sender = sender;
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::core::cursor;
    use crate::dbc::types::errors::ParseErrorKind;

    #[test]
    fn test_decode() {
        let msg = decode(&mut cursor("BO_ 2527679645 Motor_01: 8 Motor")).unwrap();
        assert_eq!(msg.id, 2527679645);
        assert_eq!(msg.name, "Motor_01");
        assert_eq!(msg.byte_length, 8);
        assert_eq!(msg.sender.as_deref(), Some("Motor"));
        assert!(msg.signals.is_empty());
    }

    #[test]
    fn placeholder_sender_means_none() {
        let msg = decode(&mut cursor("BO_ 708 ZV_04 : 64 Vector__XXX")).unwrap();
        assert_eq!(msg.byte_length, 64);
        assert_eq!(msg.sender, None);
    }

    #[test]
    fn malformed_id_is_an_error() {
        let err = decode(&mut cursor("BO_ 0x100 Foo: 8 Bar")).unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::MalformedNumber);
        assert_eq!(err.token, "0x100");
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = decode(&mut cursor("BO_ 256 Foo 8 Bar")).unwrap_err();
        assert!(matches!(err.reason, ParseErrorKind::UnexpectedToken { .. }));
    }
}
