#![no_main]

use libfuzzer_sys::fuzz_target;
use numtext::{Encoding, ParsePosition, Utf8, Utf16};

/// Walks `text` forward then backward, checking both walks agree with each
/// other and with the seek operations at every index.
fn walk<E: Encoding>(text: &[E::Unit]) {
    let end = text.len();
    let mut forward = Vec::new();
    let mut pos = ParsePosition::new(0);
    while pos.index() < end {
        let before = pos.index();
        match E::decode_next(&mut pos, text, end) {
            Ok(Some(code_point)) => {
                assert!(char::from_u32(code_point).is_some());
                forward.push((before, code_point));
            }
            Ok(None) => unreachable!("decode stopped before the end"),
            Err(_) => {
                assert_eq!(pos.index(), before);
                pos.reset(before + 1);
            }
        }
    }

    for &(index, code_point) in &forward {
        let mut boundary = ParsePosition::new(index);
        assert_eq!(E::seek_to_boundary_start(&mut boundary, text, 0), Ok(()));
        assert_eq!(boundary.index(), index);

        let mut encoded = [<E::Unit>::default(); 4];
        let mut out = ParsePosition::new(0);
        let len = E::encode(&mut out, &mut encoded, E::MAX_UNITS, code_point)
            .expect("decoded code points encode");
        let written = encoded[..len].iter().map(|&unit| Into::<u32>::into(unit));
        let original = text[index..index + len].iter().map(|&unit| Into::<u32>::into(unit));
        assert!(written.eq(original));
    }

    for index in 0..=end {
        let mut pos = ParsePosition::new(index);
        if E::seek_to_boundary_end(&mut pos, text, end).is_ok() {
            assert!(pos.index() >= index && pos.index() <= end);
        }
        let mut pos = ParsePosition::new(index);
        if let Ok(Some(_)) = E::decode_previous(&mut pos, text, 0) {
            assert!(pos.index() < index);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    walk::<Utf8>(data);
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    walk::<Utf16>(&units);
});
