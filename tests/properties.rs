//! Property tests for the case transforms, the parser round trip, and
//! resolution idempotence.

use proptest::prelude::*;
use signpost::{support, Argument, Command, Input, RawValue, SignatureParser};

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,15}"
}

/// Identifiers whose boundaries survive camel-casing: every word starts
/// with a letter, and there are no leading or trailing separators.
fn camel_safe_identifier() -> impl Strategy<Value = String> {
    let word = "[a-zA-Z]{1,2}[a-z0-9]{0,4}";
    prop::collection::vec((word, prop::sample::select(vec!["", "-", "_"])), 1..4)
        .prop_map(|parts| {
            let mut out = String::new();
            let last = parts.len() - 1;
            for (i, (word, sep)) in parts.into_iter().enumerate() {
                out.push_str(&word);
                if i != last {
                    out.push_str(sep);
                }
            }
            out
        })
}

fn lower_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

proptest! {
    #[test]
    fn kebab_of_camel_matches_kebab(name in camel_safe_identifier()) {
        prop_assert_eq!(
            support::kebab_case(&support::camel_case(&name)),
            support::kebab_case(&name)
        );
    }

    #[test]
    fn snake_and_kebab_differ_only_in_separator(name in identifier()) {
        prop_assert_eq!(
            support::snake_case(&name),
            support::kebab_case(&name).replace('-', "_")
        );
    }

    #[test]
    fn camel_is_pascal_with_a_lowered_head(name in identifier()) {
        let camel = support::camel_case(&name);
        let pascal = support::pascal_case(&name);
        prop_assert_eq!(camel.to_lowercase(), pascal.to_lowercase());
        prop_assert!(!camel.starts_with(|c: char| c.is_ascii_uppercase()));
    }

    #[test]
    fn parsed_arity_round_trips_through_the_synopsis(
        required in prop::collection::vec(lower_name(), 0..3),
        optional in prop::collection::vec(lower_name(), 0..3),
        repeating in any::<bool>(),
    ) {
        // Unique names, required before optional, repeating last.
        let mut names: Vec<String> = required.clone();
        names.extend(optional.iter().cloned());
        names.sort();
        names.dedup();
        prop_assume!(names.len() == required.len() + optional.len());
        prop_assume!(!required.is_empty() || !optional.is_empty());

        let mut signature = String::from("cmd");
        for name in &required {
            signature.push_str(&format!(" <{name}>"));
        }
        for (i, name) in optional.iter().enumerate() {
            let last = i + 1 == optional.len();
            if last && repeating {
                signature.push_str(&format!(" [<{name}>...]"));
            } else {
                signature.push_str(&format!(" [<{name}>]"));
            }
        }

        let cmd = SignatureParser::new().parse(&signature).unwrap();
        let synopsis = cmd.synopsis().unwrap();
        prop_assert_eq!(synopsis.len(), required.len() + optional.len());
        for (i, entry) in synopsis.iter().enumerate() {
            prop_assert_eq!(entry.optional, i >= required.len());
            let is_last_optional = !optional.is_empty() && i + 1 == synopsis.len();
            prop_assert_eq!(entry.repeating, repeating && is_last_optional);
        }
    }

    #[test]
    fn resolution_is_idempotent(
        tokens in prop::collection::vec("[a-z]{1,6}", 1..5),
        opt_value in "[a-z]{1,6}",
        flag_set in any::<bool>(),
    ) {
        let mut cmd = Command::new("cmd").unwrap();
        cmd.add_argument(Argument::new("head").unwrap()).unwrap();
        cmd.add_argument(
            Argument::new("tail").unwrap().with_optional(true).with_repeating(true),
        ).unwrap();
        cmd.add_flag(signpost::Flag::new("flag").unwrap()).unwrap();
        cmd.add_option(signpost::AssocOption::new("opt").unwrap()).unwrap();

        let mut named = vec![("opt".to_string(), RawValue::Str(opt_value))];
        if flag_set {
            named.push(("flag".to_string(), RawValue::Bool(true)));
        }

        let first = Input::resolve(tokens, named, &cmd).unwrap();
        let second = Input::resolve(
            first.positional_values(),
            first.named_values(),
            &cmd,
        ).unwrap();

        prop_assert_eq!(first.arguments(), second.arguments());
        prop_assert_eq!(first.options(), second.options());
        prop_assert_eq!(first.flags(), second.flags());
    }
}
