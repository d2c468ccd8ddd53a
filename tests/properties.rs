//! Property tests for integer semantics and value printing.

use mazescript::{evaluate, ErrorKind, Value};
use proptest::prelude::*;

fn call(src: &str, args: &[i64]) -> Result<Value, mazescript::ScriptError> {
    evaluate(src, None, None)?.call(args.iter().copied().map(Value::Integer).collect())
}

const DIVMOD: &str = "var main = fn (a, b) { return [a / b, a % b]; };";

proptest! {
    #[test]
    fn decimal_literals_evaluate_to_themselves(n in 0..=i64::MAX) {
        let src = format!("var main = fn () {{ return {n}; }};");
        prop_assert_eq!(call(&src, &[]).unwrap(), Value::Integer(n));
    }

    #[test]
    fn hex_literals_evaluate_to_themselves(n in 0..=i64::MAX) {
        let src = format!("var main = fn () {{ return 0x{n:x}; }};");
        prop_assert_eq!(call(&src, &[]).unwrap(), Value::Integer(n));
    }

    #[test]
    fn binary_literals_evaluate_to_themselves(n in 0..=i64::MAX, every in 1usize..9) {
        let digits = format!("{n:b}");
        let grouped = digits
            .chars()
            .enumerate()
            .flat_map(|(i, c)| if i > 0 && i % every == 0 { vec!['_', c] } else { vec![c] })
            .collect::<String>();
        let src = format!("var main = fn () {{ return 0b{grouped}; }};");
        prop_assert_eq!(call(&src, &[]).unwrap(), Value::Integer(n));
    }

    #[test]
    fn underscores_are_ignored_in_literals(n in 0..=i64::MAX) {
        let digits = n.to_string();
        let grouped = digits
            .chars()
            .enumerate()
            .flat_map(|(i, c)| if i > 0 && (digits.len() - i) % 3 == 0 { vec!['_', c] } else { vec![c] })
            .collect::<String>();
        let src = format!("var main = fn () {{ return {grouped}; }};");
        prop_assert_eq!(call(&src, &[]).unwrap(), Value::Integer(n));
    }

    #[test]
    fn base_prefix_without_digits_fails(prefix in "0[xXbB]", underscores in "_{0,4}") {
        let src = format!("{prefix}{underscores};");
        let err = evaluate(&src, None, None).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn division_floors_and_modulo_follows_the_divisor(
        a in -10_000i64..10_000,
        b in (-500i64..500).prop_filter("nonzero", |b| *b != 0),
    ) {
        let q = (a as f64 / b as f64).floor() as i64;
        let r = a - b * q;
        let result = call(DIVMOD, &[a, b]).unwrap();
        prop_assert_eq!(result.to_string(), format!("[{q}, {r}]"));
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.abs() < b.abs());
    }

    #[test]
    fn zero_divisor_is_a_range_error(a in any::<i64>()) {
        let err = call(DIVMOD, &[a, 0]).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::Range);
    }

    #[test]
    fn printed_arrays_match_their_elements(items in prop::collection::vec(-1000i64..1000, 0..20)) {
        let literal = items.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
        let src = format!("var main = fn () {{ print([{literal}]); }};");
        let entry = evaluate(&src, None, None).unwrap();
        entry.call(vec![]).unwrap();
        prop_assert_eq!(entry.output().lines(), vec![format!("[{literal}]")]);
    }
}
