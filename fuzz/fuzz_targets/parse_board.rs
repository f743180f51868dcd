#![no_main]
use libfuzzer_sys::fuzz_target;
use pawnstorm::chess::position::Position;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(position) = Position::try_from(input) else {
        return;
    };
    assert!(position.is_consistent());
    // Printing the placement back and parsing it again yields the same
    // position.
    let placement = position.to_string();
    assert_eq!(Position::from_fen(&placement).ok(), Some(position));
});
