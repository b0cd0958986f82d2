// tests/property/codec_test.rs

//! Property-based tests for the line codec: framing must not depend on how
//! the byte stream is split into reads.

use bytes::BytesMut;
use dictclient::core::protocol::DictLineCodec;
use proptest::prelude::*;
use tokio_util::codec::Decoder;

fn decode_in_chunks(input: &[u8], chunk: usize) -> Vec<String> {
    let mut codec = DictLineCodec;
    let mut buf = BytesMut::new();
    let mut lines = Vec::new();
    for piece in input.chunks(chunk) {
        buf.extend_from_slice(piece);
        while let Some(line) = codec.decode(&mut buf).unwrap() {
            lines.push(line);
        }
    }
    lines
}

proptest! {
    #[test]
    fn test_chunking_does_not_change_lines(
        lines in prop::collection::vec("[ -~]{0,60}", 1..20),
        chunk in 1usize..64,
        bare_lf in any::<bool>(),
    ) {
        let terminator = if bare_lf { "\n" } else { "\r\n" };
        let input: String = lines.iter().map(|l| format!("{l}{terminator}")).collect();

        let whole = decode_in_chunks(input.as_bytes(), input.len().max(1));
        let split = decode_in_chunks(input.as_bytes(), chunk);
        prop_assert_eq!(&whole, &lines);
        prop_assert_eq!(&split, &lines);
    }
}
