//! Property-style tests for normalisation, validation and payloads.
//!
//! Inputs are generated from small grids rather than random data so the
//! tests stay deterministic.

use quickdial::domain::digits_only;
use quickdial::{
    build_qr_payload, normalize_phone_input, validate_name_length, validate_phone_number,
    QuickDialError,
};

/// Every 11-digit local number for a sample of subscriber digits.
fn local_numbers() -> Vec<String> {
    let mut numbers = Vec::new();
    for operator in 3..=9 {
        for seed in [0u32, 1, 12345678, 99999999, 55501234] {
            numbers.push(format!("01{}{:08}", operator, seed));
        }
    }
    numbers
}

/// Ways people type the same number.
fn decorations(number: &str) -> Vec<String> {
    vec![
        number.to_string(),
        format!("88{}", number),
        format!("+88{}", number),
        format!("{}-{}", &number[..5], &number[5..]),
        format!("({}) {} {}", &number[..3], &number[3..7], &number[7..]),
        format!("  {}\t", number),
    ]
}

#[test]
fn prop_local_numbers_validate_with_country_code() {
    for number in local_numbers() {
        for input in decorations(&number) {
            let phone = validate_phone_number(&input)
                .unwrap_or_else(|e| panic!("{:?} should validate: {}", input, e));
            assert!(phone.as_str().starts_with("+88"), "{:?}", input);
            assert_eq!(phone.as_str(), format!("+88{}", number));
        }
    }
}

#[test]
fn prop_normalize_is_idempotent() {
    let mut inputs: Vec<String> = local_numbers()
        .iter()
        .flat_map(|n| decorations(n))
        .collect();
    inputs.extend(
        ["", "+", "0", "01", "88", "+1 (415) 555-1234", "abc123", "٣٤٥", "0".repeat(40).as_str()]
            .iter()
            .map(|s| s.to_string()),
    );

    for input in inputs {
        let once = normalize_phone_input(&input);
        let twice = normalize_phone_input(&once);
        assert_eq!(once, twice, "input {:?}", input);
    }
}

#[test]
fn prop_normalize_output_is_plus_and_digits() {
    for input in ["(017) 12-34", "+88-017", "x9y8z7", "🔢📱☎️"] {
        let out = normalize_phone_input(input);
        let rest = out.strip_prefix('+').unwrap_or(&out);
        assert!(rest.chars().all(|c| c.is_ascii_digit()), "{:?} -> {:?}", input, out);
    }
}

#[test]
fn prop_short_numbers_are_invalid() {
    for len in 1..=7 {
        let input = "9".repeat(len);
        assert!(
            matches!(
                validate_phone_number(&input),
                Err(QuickDialError::InvalidFormat { .. })
            ),
            "{} digits",
            len
        );
    }
}

#[test]
fn prop_generic_length_bounds() {
    for len in 8..=15 {
        assert!(validate_phone_number(&"9".repeat(len)).is_ok(), "{} digits", len);
    }
    assert!(validate_phone_number(&"9".repeat(16)).is_err());
}

#[test]
fn prop_payload_round_trips_digits() {
    let mut inputs = local_numbers();
    inputs.extend(["+14155551234", "4915112345678", "+447911123456"].map(String::from));

    for input in inputs {
        let phone = validate_phone_number(&input).unwrap();
        let payload = build_qr_payload(&phone);
        assert!(payload.as_str().starts_with("tel:+"));
        assert_eq!(digits_only(payload.number()), phone.digits());
    }
}

#[test]
fn prop_names_over_limit_fail() {
    for len in 31..=64 {
        assert!(validate_name_length(&"n".repeat(len)).is_err());
    }
    for len in 0..=30 {
        assert!(validate_name_length(&"n".repeat(len)).is_ok());
    }
}
