use super::{round_half_up, Value};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_round_half_up_rounds_midpoints_away_from_zero() -> Result<()> {
    let test_cases = vec![
        ("2.345", "2.35"),
        ("2.344", "2.34"),
        ("-2.345", "-2.35"),
        ("7.125", "7.13"),
        ("7.1", "7.1"),
        ("10", "10")
    ];

    for (input, expected_output) in test_cases {
        assert_eq!(round_half_up(Decimal::from_str(input)?, 2).to_string(), expected_output);
    }

    Ok(())
}

#[test]
fn test_value_ordering_sorts_null_first_and_text_lexicographically() {
    let mut values = vec![
        Value::from("Food"),
        Value::Null,
        Value::from("Electronics"),
        Value::Integer(3)
    ];

    values.sort();

    assert_eq!(values, vec![
        Value::Null,
        Value::Integer(3),
        Value::from("Electronics"),
        Value::from("Food")
    ]);
}

#[test]
fn test_value_decimal_equality_ignores_scale() -> Result<()> {
    assert_eq!(Value::from(Decimal::from_str("150.00")?), Value::from(Decimal::from(150)));
    assert_eq!(Value::Integer(4).as_decimal(), Some(Decimal::from(4)));
    assert_eq!(Value::from("x").as_decimal(), None);
    assert_eq!(Value::from(None::<Decimal>), Value::Null);

    Ok(())
}

#[test]
fn test_value_display_renders_cells_for_output() -> Result<()> {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::from(Decimal::from_str("9.10")?).to_string(), "9.10");
    assert_eq!(Value::from("Ewallet").to_string(), "Ewallet");

    Ok(())
}
