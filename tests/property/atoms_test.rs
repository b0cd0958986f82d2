// tests/property/atoms_test.rs

//! Property-based tests for atom splitting.

use dictclient::core::protocol::split_atoms;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_bare_words_are_recovered(words in prop::collection::vec("[a-zA-Z0-9.!*-]{1,12}", 0..8)) {
        let line = words.join(" ");
        let atoms = split_atoms(&line);
        prop_assert_eq!(atoms, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_quoted_atom_keeps_inner_whitespace(
        name in "[a-z]{1,10}",
        description in "[a-zA-Z0-9 \t().,]{0,40}",
    ) {
        let line = format!("{name} \"{description}\"");
        let atoms = split_atoms(&line);
        prop_assert_eq!(atoms.len(), 2);
        prop_assert_eq!(atoms[0], name.as_str());
        prop_assert_eq!(atoms[1], description.as_str());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored(
        word in "[a-z]{1,10}",
        before in "[ \t]{0,5}",
        after in "[ \t]{0,5}",
    ) {
        let line = format!("{before}{word}{after}");
        prop_assert_eq!(split_atoms(&line), vec![word.as_str()]);
    }
}
