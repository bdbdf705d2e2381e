use crate::dbc::core::lexer::Cursor;
use crate::dbc::types::{
    errors::{ParseError, ParseErrorKind},
    signal::{ByteOrder, Multiplexer, NO_NODE, Receivers, Signal, Signedness},
};

/// Decode a `SG_` line. The caller attaches it to the current message (the last parsed BO_).
/// Format:
/// SG_ <name> [M|mX|mXM] : <bit_start>|<bit_length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers...>
pub(crate) fn decode(cur: &mut Cursor) -> Result<Signal, ParseError> {
    cur.word("SG_")?;
    let name: String = cur.word("signal name")?;

    // multiplexing tag decoding (if present)
    let multiplexer: Multiplexer = if cur.peek_is_punct(':') {
        Multiplexer::None
    } else {
        let tag: String = cur.word("multiplexer indicator or ':'")?;
        parse_mux_tag(&tag).ok_or_else(|| {
            cur.error_at_previous(ParseErrorKind::UnexpectedToken {
                expected: "multiplexer indicator (M, mX or mXM)",
            })
        })?
    };
    cur.punct(':', "':' after signal name")?;

    // 1) bit info: "63|1@1+"
    let bit_start: u16 = cur.integer("start bit")?;
    cur.punct('|', "'|' between start bit and length")?;
    let bit_length: u16 = cur.integer("bit length")?;
    cur.punct('@', "'@' before byte order")?;
    let es: String = cur.word("byte order and sign")?;
    let (byte_order, sign) = parse_order_and_sign(&es).ok_or_else(|| {
        cur.error_at_previous(ParseErrorKind::UnexpectedToken {
            expected: "byte order (0|1) followed by sign (+|-)",
        })
    })?;

    // 2) "(factor,offset)"
    cur.punct('(', "'(' before factor")?;
    let factor: f64 = cur.number("factor")?;
    cur.punct(',', "',' between factor and offset")?;
    let offset: f64 = cur.number("offset")?;
    cur.punct(')', "')' after offset")?;

    // 3) "[min|max]"
    cur.punct('[', "'[' before minimum")?;
    let min: f64 = cur.number("minimum")?;
    cur.punct('|', "'|' between minimum and maximum")?;
    let max: f64 = cur.number("maximum")?;
    cur.punct(']', "']' after maximum")?;

    // 4) "unit"
    let unit: String = cur.quoted("quoted unit")?;

    // 5) receivers (comma or space separated)
    let mut names: Vec<String> = Vec::new();
    while !cur.at_end() {
        if cur.eat_punct(',') {
            continue;
        }
        let node: String = cur.word("receiver node")?;
        if node != NO_NODE && !names.contains(&node) {
            names.push(node);
        }
    }
    cur.finish()?;

    let receivers: Receivers = if names.is_empty() {
        Receivers::None
    } else {
        Receivers::Nodes(names)
    };

    Ok(Signal {
        name,
        bit_start,
        bit_length,
        byte_order,
        sign,
        factor,
        offset,
        min,
        max,
        unit,
        receivers,
        multiplexer,
        ..Default::default()
    })
}

fn parse_mux_tag(tag: &str) -> Option<Multiplexer> {
    if tag == "M" {
        return Some(Multiplexer::Multiplexor);
    }
    let rest: &str = tag.strip_prefix('m')?;
    if let Some(value) = rest.strip_suffix('M') {
        return value.parse().ok().map(Multiplexer::MultiplexedMultiplexor);
    }
    rest.parse().ok().map(Multiplexer::Multiplexed)
}

fn parse_order_and_sign(es: &str) -> Option<(ByteOrder, Signedness)> {
    let mut chars = es.chars();
    let byte_order: ByteOrder = match chars.next()? {
        '0' => ByteOrder::BigEndian,
        '1' => ByteOrder::LittleEndian,
        _ => return None,
    };
    let sign: Signedness = match chars.next()? {
        '+' => Signedness::Unsigned,
        '-' => Signedness::Signed,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some((byte_order, sign))
}
