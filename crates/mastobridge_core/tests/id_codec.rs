use mastobridge_core::id::{is_wire_id, to_native_ids, to_wire_ids};
use mastobridge_core::{
    to_native_id, to_native_id_padded, to_wire_id, ErrorKind, DEFAULT_NATIVE_ID_WIDTH,
};

#[test]
fn decode_lowercases_mixed_case_ids() {
    let wire = to_wire_id("9aEj2mPq3O").unwrap();
    assert_eq!(to_native_id(&wire).unwrap(), "9aej2mpq3o");
}

#[test]
fn typical_native_ids_round_trip() {
    for native in ["9k2zx8a1bq", "9kmp0qxg6r", "a", "zzzzzzzzzzzzzzzzzzzzzzzz", "1"] {
        let wire = to_wire_id(native).unwrap();
        assert!(is_wire_id(&wire));
        assert_eq!(to_native_id(&wire).unwrap(), native);
        assert_eq!(to_wire_id(&to_native_id(&wire).unwrap()).unwrap(), wire);
    }
}

#[test]
fn long_ids_exceed_u64_without_overflow() {
    let wire = to_wire_id("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap();
    assert!(wire.len() > 20);
}

#[test]
fn invalid_input_is_rejected_not_coerced() {
    for bad in ["", "9k-2", "é", "ab cd"] {
        assert_eq!(to_wire_id(bad).unwrap_err().kind(), ErrorKind::InvalidId);
    }
    for bad in ["", "-5", "12a", "1.5", "+3"] {
        assert_eq!(to_native_id(bad).unwrap_err().kind(), ErrorKind::InvalidId);
    }
}

#[test]
fn batch_helpers_fail_on_first_invalid_element() {
    assert_eq!(to_wire_ids(&["a", "01"]).unwrap(), vec!["10", "36"]);
    assert!(to_wire_ids(&["a", "!"]).is_err());
    assert_eq!(to_native_ids(&["10", "36"]).unwrap(), vec!["a", "01"]);
    assert!(to_native_ids(&["10", "x"]).is_err());
}

#[test]
fn issued_ids_ending_in_zero_round_trip_at_issued_width() {
    for native in ["9kmp0qxg60", "9k2zx8a100", "b000000000", "0000000000"] {
        let wire = to_wire_id(native).unwrap();
        assert_eq!(
            to_native_id_padded(&wire, DEFAULT_NATIVE_ID_WIDTH).unwrap(),
            native
        );
    }
    // Unpadded decoding only yields the numeric minimum.
    assert_eq!(to_native_id(&to_wire_id("9kmp0qxg60").unwrap()).unwrap(), "9kmp0qxg6");
}

#[test]
fn padding_does_not_shorten_or_alter_wider_ids() {
    let wire = to_wire_id("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap();
    assert_eq!(
        to_native_id_padded(&wire, DEFAULT_NATIVE_ID_WIDTH).unwrap(),
        "zzzzzzzzzzzzzzzzzzzzzzzz"
    );
    assert_eq!(
        to_native_id_padded("x", DEFAULT_NATIVE_ID_WIDTH).unwrap_err().kind(),
        ErrorKind::InvalidId
    );
}
