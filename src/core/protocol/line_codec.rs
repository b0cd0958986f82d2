// src/core/protocol/line_codec.rs

//! Implements the line framing used by the DICT protocol as a
//! `tokio_util::codec` `Decoder` (server lines) and `Encoder` (commands).

use super::DictCommand;
use crate::core::DictError;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

const CRLF: &[u8] = b"\r\n";

/// Upper bound for a single inbound line. RFC 2229 caps lines at 1024 octets,
/// but real servers send longer definition lines, so the limit is generous.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Frames the byte stream into text lines and encodes outbound commands.
///
/// Inbound lines may end in `CRLF` or a bare `LF`; the terminator is
/// stripped. Bytes that are not valid UTF-8 are replaced rather than rejected.
#[derive(Debug, Default)]
pub struct DictLineCodec;

impl Decoder for DictLineCodec {
    type Item = String;
    type Error = DictError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(pos) = find_newline(src) else {
            // Allow room for the terminator before giving up on the line.
            if src.len() > MAX_LINE_LENGTH + CRLF.len() {
                return Err(DictError::LineTooLong(MAX_LINE_LENGTH));
            }
            return Ok(None);
        };

        let mut line = src.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(pos - 1);
        }
        if line.len() > MAX_LINE_LENGTH {
            return Err(DictError::LineTooLong(MAX_LINE_LENGTH));
        }

        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

impl Encoder<DictCommand> for DictLineCodec {
    type Error = DictError;

    fn encode(&mut self, item: DictCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = item.to_string();
        dst.reserve(line.len() + CRLF.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(CRLF);
        Ok(())
    }
}

fn find_newline(src: &[u8]) -> Option<usize> {
    src.iter().position(|b| *b == b'\n')
}
