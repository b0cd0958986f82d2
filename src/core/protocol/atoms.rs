// src/core/protocol/atoms.rs

//! Splits server lines into atoms: bare words or double-quoted strings.

const WHITESPACE: [char; 2] = [' ', '\t'];

/// Splits `line` into its atoms, borrowing from the input.
///
/// A quoted atom runs from an opening `"` to the next `"` and is returned
/// without its quotes. There is no escape syntax, and an unterminated quote
/// extends to the end of the line. A `"` inside a bare word is kept as-is.
pub fn split_atoms(line: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start_matches(WHITESPACE);
        if rest.is_empty() {
            break;
        }

        if let Some(quoted) = rest.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => {
                    atoms.push(&quoted[..end]);
                    rest = &quoted[end + 1..];
                }
                None => {
                    atoms.push(quoted);
                    rest = "";
                }
            }
        } else {
            let end = rest.find(WHITESPACE).unwrap_or(rest.len());
            atoms.push(&rest[..end]);
            rest = &rest[end..];
        }
    }

    atoms
}
