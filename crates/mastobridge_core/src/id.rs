//! Bidirectional id codec between native base-36 ids and wire decimal ids.
//!
//! # Responsibility
//! - Convert native sortable ids into the decimal strings external clients
//!   expect, and back again when a client echoes an id in a request.
//!
//! # Invariants
//! - The first native character carries the least-significant weight
//!   (`value = Σ digit(s[i]) * 36^i`). Issued wire ids depend on this
//!   orientation, so it must never be flipped.
//! - Native output is always lowercase.
//! - Invalid input is rejected, never coerced.
//! - Request-side decoding pads to the issued id width, so ids ending in
//!   `'0'` survive the round trip.
//!
//! # See also
//! - `convert` module, which applies the codec to every `id` field.

use crate::error::{BridgeError, BridgeResult};
use num_bigint::BigUint;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RADIX: u32 = 36;

/// Length of the ids the native server issues.
pub const DEFAULT_NATIVE_ID_WIDTH: usize = 10;

/// Native id (`0-9a-z`) to wire id (decimal).
///
/// # Errors
/// - `InvalidId` when the input is empty or contains a character outside
///   the 36-symbol alphabet (case-insensitive).
pub fn to_wire_id(native_id: &str) -> BridgeResult<String> {
    if native_id.is_empty() {
        return Err(BridgeError::InvalidId(native_id.to_string()));
    }

    let mut value = BigUint::from(0u32);
    for byte in native_id.bytes().rev() {
        let digit =
            digit_value(byte).ok_or_else(|| BridgeError::InvalidId(native_id.to_string()))?;
        value = value * RADIX + digit;
    }

    Ok(value.to_str_radix(10))
}

/// Wire id (decimal) to native id (`0-9a-z`, lowercase).
///
/// Leading zeros are accepted and parsed numerically.
///
/// # Errors
/// - `InvalidId` when the input is empty, signed, or has non-digit characters.
pub fn to_native_id(wire_id: &str) -> BridgeResult<String> {
    if !is_wire_id(wire_id) {
        return Err(BridgeError::InvalidId(wire_id.to_string()));
    }

    let value = BigUint::parse_bytes(wire_id.as_bytes(), 10)
        .ok_or_else(|| BridgeError::InvalidId(wire_id.to_string()))?;

    // `to_str_radix` is most-significant-first; native ids are the reverse.
    Ok(value.to_str_radix(RADIX).chars().rev().collect())
}

/// Wire id to native id, right-padded with `'0'` to `width` characters.
///
/// Trailing zeros carry no weight, so `to_native_id` alone cannot restore
/// them. Padding to the issued id width makes the round trip exact for every
/// id of that width; shorter minimal forms are never issued by the server.
///
/// # Errors
/// - Same as `to_native_id`.
pub fn to_native_id_padded(wire_id: &str, width: usize) -> BridgeResult<String> {
    let mut native = to_native_id(wire_id)?;
    while native.len() < width {
        native.push('0');
    }
    Ok(native)
}

/// Returns whether `value` is a syntactically valid wire id.
pub fn is_wire_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns whether `value` is a syntactically valid native id.
pub fn is_native_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| digit_value(b).is_some())
}

/// Converts a batch of native ids, failing on the first invalid element.
pub fn to_wire_ids<S: AsRef<str>>(native_ids: &[S]) -> BridgeResult<Vec<String>> {
    native_ids
        .iter()
        .map(|id| to_wire_id(id.as_ref()))
        .collect()
}

/// Converts a batch of wire ids, failing on the first invalid element.
pub fn to_native_ids<S: AsRef<str>>(wire_ids: &[S]) -> BridgeResult<Vec<String>> {
    wire_ids
        .iter()
        .map(|id| to_native_id(id.as_ref()))
        .collect()
}

fn digit_value(byte: u8) -> Option<u32> {
    let folded = byte.to_ascii_lowercase();
    ALPHABET
        .iter()
        .position(|candidate| *candidate == folded)
        .map(|index| index as u32)
}

#[cfg(test)]
mod tests {
    use super::{
        is_native_id, is_wire_id, to_native_id, to_native_id_padded, to_native_ids, to_wire_id,
        to_wire_ids, DEFAULT_NATIVE_ID_WIDTH,
    };
    use crate::error::BridgeError;

    #[test]
    fn zero_maps_to_zero_both_ways() {
        assert_eq!(to_wire_id("0").unwrap(), "0");
        assert_eq!(to_native_id("0").unwrap(), "0");
    }

    #[test]
    fn first_character_is_least_significant() {
        assert_eq!(to_wire_id("a").unwrap(), "10");
        assert_eq!(to_wire_id("01").unwrap(), "36");
        assert_eq!(to_wire_id("z1").unwrap(), "71");
        assert_eq!(to_native_id("36").unwrap(), "01");
        assert_eq!(to_native_id("71").unwrap(), "z1");
    }

    #[test]
    fn roundtrip_preserves_real_world_ids() {
        for id in ["9aej2mpq3o", "9k4x0z8e1b", "a1b2c3d4e5f6g7h8", "zzzzzzzzzzzzzzzzzzzz"] {
            let wire = to_wire_id(id).unwrap();
            assert!(is_wire_id(&wire));
            assert_eq!(to_native_id(&wire).unwrap(), id);
        }
    }

    #[test]
    fn wire_roundtrip_without_leading_zeros() {
        for wire in ["1", "35", "36", "1296", "18446744073709551616", "99999999999999999999999999"] {
            let native = to_native_id(wire).unwrap();
            assert_eq!(to_wire_id(&native).unwrap(), wire);
        }
    }

    #[test]
    fn decode_normalizes_case() {
        let wire = to_wire_id("9aEj2mPq3O").unwrap();
        assert_eq!(wire, to_wire_id("9aej2mpq3o").unwrap());
        assert_eq!(to_native_id(&wire).unwrap(), "9aej2mpq3o");
    }

    #[test]
    fn distinct_ids_of_equal_length_encode_differently() {
        let ids = ["9aej2mpq3o", "9aej2mpq3p", "aaej2mpq3o", "9aej2mpq4o"];
        let mut wires: Vec<String> = ids.iter().map(|id| to_wire_id(id).unwrap()).collect();
        wires.sort();
        wires.dedup();
        assert_eq!(wires.len(), ids.len());
    }

    #[test]
    fn encode_rejects_characters_outside_alphabet() {
        for bad in ["", "9aej-2mp", "abc_def", "ünï", "a b"] {
            assert!(
                matches!(to_wire_id(bad), Err(BridgeError::InvalidId(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn decode_rejects_empty_negative_and_non_digit_input() {
        for bad in ["", "-1", "+1", "12a", "1.5", " 12"] {
            assert!(
                matches!(to_native_id(bad), Err(BridgeError::InvalidId(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn padded_decode_restores_trailing_zeros() {
        for id in ["9kmp0qxg60", "9k4x0z8e00", "a000000000", "0000000000"] {
            let wire = to_wire_id(id).unwrap();
            assert_eq!(to_native_id_padded(&wire, DEFAULT_NATIVE_ID_WIDTH).unwrap(), id);
            let back = to_native_id_padded(&wire, DEFAULT_NATIVE_ID_WIDTH).unwrap();
            assert_eq!(to_wire_id(&back).unwrap(), wire);
        }
        assert_eq!(to_native_id(&to_wire_id("9kmp0qxg60").unwrap()).unwrap(), "9kmp0qxg6");
    }

    #[test]
    fn padded_decode_leaves_longer_ids_untouched() {
        let id = "a1b2c3d4e5f6g7h8";
        let wire = to_wire_id(id).unwrap();
        assert_eq!(to_native_id_padded(&wire, DEFAULT_NATIVE_ID_WIDTH).unwrap(), id);
        assert!(to_native_id_padded("x1", DEFAULT_NATIVE_ID_WIDTH).is_err());
    }

    #[test]
    fn decode_accepts_leading_zeros_numerically() {
        assert_eq!(to_native_id("0036").unwrap(), "01");
    }

    #[test]
    fn batch_helpers_fail_on_first_invalid_element() {
        assert_eq!(to_wire_ids(&["a", "01"]).unwrap(), vec!["10", "36"]);
        assert!(to_native_ids(&["10", "x"]).is_err());
        assert!(is_native_id("9AEJ"));
        assert!(!is_native_id("9a/j"));
    }
}
