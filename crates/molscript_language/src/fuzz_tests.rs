//! Fuzz tests for scanner and compiler crash resistance.
//!
//! These tests use property-based testing to verify that scanning and
//! compiling never panic, and that the spans they report stay inside the
//! script, even for malformed input. Well-nested blocks must compile
//! complete, and escaped host values scan back to an equal value.

#[cfg(test)]
mod tests {
    use molscript_foundation::{HostValue, ScriptValue, SelectionSet, ValueHeap};
    use proptest::prelude::*;

    use crate::{CompileFlags, Lexeme, Scanner, compile};

    // ==========================================================================
    // Arbitrary String Generators
    // ==========================================================================

    /// Strategy for generating completely random strings.
    fn arbitrary_string() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<char>(), 0..400).prop_map(|chars| chars.into_iter().collect())
    }

    /// Strategy for generating strings that look like scripts.
    fn script_like_string() -> impl Strategy<Value = String> {
        let word = prop_oneof![
            "[0-9]{1,4}".prop_map(String::from),
            "[0-9]+\\.[0-9]+".prop_map(String::from),
            "[a-z][a-z0-9_]{0,8}".prop_map(String::from),
            r#""[^"\\\n]*""#.prop_map(String::from),
            "(if|else|elseif|end|for|while|switch|case|default|function|try|catch|break|continue)"
                .prop_map(String::from),
            "(select|print|set|load|data|define|echo|label|script)".prop_map(String::from),
        ];

        let punct = prop_oneof![
            Just("(".to_string()),
            Just(")".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just(";".to_string()),
            Just(":".to_string()),
            Just("=".to_string()),
            Just("+=".to_string()),
            Just("++".to_string()),
            Just("#".to_string()),
            Just("/*".to_string()),
            Just("*/".to_string()),
            Just(" ".to_string()),
            Just("\n".to_string()),
            Just("\\\n".to_string()),
        ];

        prop::collection::vec(prop_oneof![word, punct], 0..80).prop_map(|parts| parts.join(" "))
    }

    /// Strategy for block structures with a random subset of closers removed.
    fn ragged_blocks() -> impl Strategy<Value = String> {
        let line = prop_oneof![
            Just("if (total > 1) {".to_string()),
            Just("while (total < 3) {".to_string()),
            Just("for (var i = 1; i < 3; i++) {".to_string()),
            Just("switch (total) {".to_string()),
            Just("case 1:".to_string()),
            Just("print total".to_string()),
            Just("break".to_string()),
            Just("}".to_string()),
            Just("} else {".to_string()),
            Just("end if".to_string()),
        ];
        prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
    }

    /// Strategy for properly nested blocks.
    fn balanced_blocks() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            Just("print total".to_string()),
            Just("total += 1".to_string()),
            Just("select protein".to_string()),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            let body = prop::collection::vec(inner, 1..4).prop_map(|lines| lines.join("\n"));
            prop_oneof![
                body.clone()
                    .prop_map(|b| format!("if (total > 1) {{\n{b}\n}}")),
                (body.clone(), body.clone())
                    .prop_map(|(a, b)| format!("if (total > 1) {{\n{a}\n}} else {{\n{b}\n}}")),
                body.prop_map(|b| format!("while (total < 3) {{\n{b}\nbreak\n}}")),
            ]
        })
    }

    /// Strategy for host values whose escaped form is a single literal.
    fn literal_host_value() -> impl Strategy<Value = HostValue> {
        prop_oneof![
            (0..1_000_000i32).prop_map(HostValue::Int),
            (1u32..100_000_000).prop_map(|n| HostValue::Float(f64::from(n) / 1000.0)),
            "[a-zA-Z0-9 _.,;:!?\"\t]{0,20}".prop_map(HostValue::Str),
            prop::collection::btree_set(0usize..300, 1..12).prop_map(|members| {
                let mut set = SelectionSet::new();
                for i in members {
                    set.set(i);
                }
                HostValue::Set(set)
            }),
        ]
    }

    fn value_of(lexeme: Lexeme) -> Option<ScriptValue> {
        match lexeme {
            Lexeme::Integer(i) => Some(ScriptValue::integer(i)),
            Lexeme::Decimal(f) => Some(ScriptValue::decimal(f)),
            Lexeme::Str(s) => Some(ScriptValue::string(s)),
            Lexeme::Set(set) => Some(ScriptValue::atoms(set)),
            _ => None,
        }
    }

    fn check_compile(input: &str) {
        let program = compile(input, CompileFlags::quiet());
        let len = program.script.chars().count();
        for command in &program.commands {
            assert!(
                command.span.start <= command.span.end && command.span.end <= len,
                "span out of bounds for {input:?}"
            );
        }
        if program.error.is_some() {
            assert!(program.error_message.is_some());
            assert!(program.error_command_index.is_some());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn scanner_never_panics(input in arbitrary_string()) {
            let scanned = Scanner::scan_all(&input);
            let len = input.chars().count();
            for item in scanned {
                prop_assert!(item.span.start < len);
            }
        }

        #[test]
        fn compile_never_panics_on_garbage(input in arbitrary_string()) {
            check_compile(&input);
        }

        #[test]
        fn compile_never_panics_on_script_like_input(input in script_like_string()) {
            check_compile(&input);
        }

        #[test]
        fn compile_never_panics_on_ragged_blocks(input in ragged_blocks()) {
            check_compile(&input);
        }

        #[test]
        fn balanced_blocks_compile_complete(input in balanced_blocks()) {
            let program = compile(&input, CompileFlags::quiet());
            prop_assert!(program.is_ok(), "{:?} for {input:?}", program.error_message);
            prop_assert!(program.is_complete);
        }

        #[test]
        fn escaped_values_scan_back(host in literal_host_value()) {
            let mut heap = ValueHeap::new();
            let original = ScriptValue::from_host(&mut heap, host);
            let text = original.escape(&heap);
            let mut lexemes: Vec<Lexeme> = Scanner::scan_all(&text)
                .into_iter()
                .map(|s| s.lexeme)
                .filter(|l| *l != Lexeme::Whitespace)
                .collect();
            prop_assert_eq!(lexemes.len(), 1, "{:?} scanned as {:?}", text, lexemes);
            let scanned = value_of(lexemes.remove(0));
            prop_assert!(scanned.is_some(), "{:?} is not a literal", text);
            let scanned = scanned.unwrap();
            prop_assert!(original.approximately_equal(&scanned, &heap), "{:?}", text);
            prop_assert_eq!(original.as_string(&heap), scanned.as_string(&heap));
        }

        #[test]
        fn compile_is_deterministic(input in script_like_string()) {
            let first = compile(&input, CompileFlags::quiet());
            let second = compile(&input, CompileFlags::quiet());
            prop_assert_eq!(first.commands, second.commands);
            prop_assert_eq!(first.error_message, second.error_message);
        }
    }
}
