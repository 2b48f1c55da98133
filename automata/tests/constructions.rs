use automata::automaton::Dfa;
use automata::direct::{pos_set_label, Annotations};
use automata::{compile, to_direct_dfa, to_thompson_automaton, Automaton, Dialect, SyntaxErrorKind};

const PLAIN: &[&str] = &[
    "a",
    "a|b",
    "a*b",
    "(a|b)*",
    "(a|b)*abb",
    "",
    "()",
    "a|",
    "(a*b*)*",
    "((a|b)c)*|c*",
    "a(b|c)*d|e",
    "(ab|a)(bc|c)",
    "a**b**",
    "((a|)|(b|))*c",
    "x&y",
    "#(#|!)*",
];

/*
 * Every word over `alphabet` of length at most `len`.
 */
fn words(alphabet: &[char], len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut last = vec![String::new()];

    for _ in 0..len {
        last = last.iter()
            .flat_map(|w| alphabet.iter().map(move |c| format!("{}{}", w, c)))
            .collect();
        all.extend(last.iter().cloned());
    }

    all
}

fn test_alphabet(dfa: &Dfa) -> Vec<char> {
    // One character no pattern uses, to check that foreign input is rejected.
    dfa.alphabet().iter().copied().chain(std::iter::once('z')).collect()
}

#[test]
fn both_constructions_agree() {
    for pattern in PLAIN {
        let tree = compile(pattern, Dialect::Plain).unwrap();
        let nfa = to_thompson_automaton(&tree);
        let dfa = to_direct_dfa(&tree);

        assert!(Dfa::from_nfa(&nfa).equivalent(&dfa), "{}", pattern);
        for word in words(&test_alphabet(&dfa), 5) {
            assert_eq!(nfa.accepts(&word), dfa.accepts(&word), "{} on {:?}", pattern, word);
        }
    }
}

#[test]
fn direct_dfa_is_deterministic_and_epsilon_free() {
    for pattern in PLAIN {
        let dfa = to_direct_dfa(&compile(pattern, Dialect::Plain).unwrap());

        let transitions = dfa.transitions();
        for (i, (from, c, _)) in transitions.iter().enumerate() {
            assert!(dfa.has_symbol(*c));
            assert!(transitions[i + 1..].iter().all(|(f, d, _)| (f, d) != (from, c)));
        }
    }
}

#[test]
fn compilation_is_a_pure_function() {
    for pattern in PLAIN {
        let first = compile(pattern, Dialect::Plain).unwrap();
        let second = compile(pattern, Dialect::Plain).unwrap();

        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(to_direct_dfa(&first).to_string(), to_direct_dfa(&second).to_string());
        assert_eq!(
            to_thompson_automaton(&first).to_string(),
            to_thompson_automaton(&second).to_string()
        );
        assert!(to_direct_dfa(&first).equivalent(&to_direct_dfa(&second)));
    }
}

#[test]
fn start_state_is_first_of_root() {
    for pattern in &["(a|(b|c)|d)e", "((a|b)*c)*d", "(a*|b)*"] {
        let tree = compile(pattern, Dialect::Plain).unwrap();
        let annotations = Annotations::new(&tree);
        let dfa = to_direct_dfa(&tree);

        let start = dfa.start().unwrap();
        assert_eq!(dfa.label(start), pos_set_label(annotations.first(tree.root())));
    }
}

#[test]
fn interleave() {
    let tree = compile("a&b", Dialect::Parallel).unwrap();
    let nfa = to_thompson_automaton(&tree);

    assert!(nfa.accepts("ab"));
    assert!(nfa.accepts("ba"));
    assert!(!nfa.accepts("aa"));
    assert!(!nfa.accepts("bb"));
    assert!(!nfa.accepts(""));
    assert!(!nfa.ties().is_empty());

    let dfa = to_direct_dfa(&tree);
    assert!(Dfa::from_nfa(&nfa).equivalent(&dfa));
}

#[test]
fn interleave_keeps_operand_order() {
    let nfa = to_thompson_automaton(&compile("ab&c*", Dialect::Parallel).unwrap());

    for word in &["ab", "cab", "acb", "abc", "ccaccbc"] {
        assert!(nfa.accepts(word), "{}", word);
    }
    for word in &["ba", "a", "cbca", "ccc"] {
        assert!(!nfa.accepts(word), "{}", word);
    }
}

#[test]
fn parallel_dialect_without_interleave() {
    let plain = to_direct_dfa(&compile("(a|b)*c", Dialect::Plain).unwrap());
    let parallel = to_direct_dfa(&compile("(a|b)*c", Dialect::Parallel).unwrap());
    assert!(plain.equivalent(&parallel));
}

#[test]
fn malformed_pattern() {
    let err = compile("(a", Dialect::Plain).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnclosedGroup);
    assert!(err.errors >= 1);

    let err = compile("a&(b", Dialect::Parallel).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnclosedGroup);
    assert_eq!(err.offset, 4);
}

#[test]
fn long_patterns_do_not_recurse() {
    let pattern = "a".repeat(50_000);
    let tree = compile(&pattern, Dialect::Plain).unwrap();

    let dfa = to_direct_dfa(&tree);
    assert_eq!(dfa.state_count(), 50_001);
    assert!(dfa.accepts(&pattern));
    assert!(!dfa.accepts(&pattern[1..]));

    let nfa = to_thompson_automaton(&tree);
    assert!(nfa.accepts(&pattern));
    assert!(!nfa.accepts(&pattern[1..]));
}

#[test]
fn long_alternations() {
    let pattern = "ab|".repeat(1_000) + "c*";
    let tree = compile(&pattern, Dialect::Plain).unwrap();

    let dfa = to_direct_dfa(&tree);
    assert!(dfa.accepts("ab"));
    assert!(dfa.accepts("ccc"));
    assert!(!dfa.accepts("abab"));

    let nfa = to_thompson_automaton(&tree);
    assert!(nfa.accepts("ab"));
    assert!(!nfa.accepts("ac"));
}
