// tests/property/token_test.rs

//! Property-based tests for argument encoding

use proptest::prelude::*;
use typedcmds::Builder;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_integers_are_decimal(n in any::<i64>()) {
        let cmd = Builder::new().incrby().key("k").increment(n).build();
        let expected = n.to_string();
        prop_assert_eq!(&cmd.commands()[2][..], expected.as_bytes());
    }

    #[test]
    fn test_finite_floats_parse_back(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let cmd = Builder::new().incrbyfloat().key("k").increment(value).build();
        let text = std::str::from_utf8(&cmd.commands()[2]).unwrap();
        prop_assert_eq!(text.parse::<f64>().unwrap(), value);
    }

    #[test]
    fn test_binary_values_pass_through(value in prop::collection::vec(any::<u8>(), 0..512)) {
        let cmd = Builder::new().set().key("k").value(value.clone()).build();
        prop_assert_eq!(&cmd.commands()[2][..], value.as_slice());
    }

    #[test]
    fn test_variadic_preserves_order(members in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let cmd = Builder::new().zrem().key("z").member(members.clone()).build();
        prop_assert_eq!(cmd.commands().len(), members.len() + 2);
        for (token, member) in cmd.commands()[2..].iter().zip(&members) {
            prop_assert_eq!(token, member.as_str());
        }
    }

    #[test]
    fn test_arbitrary_tokens_verbatim(tokens in prop::collection::vec(".{0,16}", 1..10)) {
        let cmd = Builder::new().arbitrary(tokens.clone()).build().unwrap();
        prop_assert_eq!(cmd.commands().len(), tokens.len());
        for (token, expected) in cmd.commands().iter().zip(&tokens) {
            prop_assert_eq!(token, expected.as_str());
        }
    }
}
