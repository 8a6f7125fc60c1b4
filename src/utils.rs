/// Title-cases a name: the first letter of every alphabetic run is uppercased and
/// the remainder lowercased, leaving digits and punctuation untouched.
///
/// Runs are delimited by any non-alphabetic character, so `"got/ast"` becomes
/// `"Got/Ast"` and `"ac.urico"` becomes `"Ac.Urico"`. This is the form every
/// abbreviation-table key is stored in.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alphabetic = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// Collapses every run of whitespace to a single space and trims the ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Case-insensitive substring containment.
///
/// Both sides are lowercased through `char::to_lowercase`, so accented
/// vocabulary ("Día", "Año") matches regardless of the casing the PDF text
/// layer produced.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack
        .to_lowercase()
        .contains(needle.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hemoglobina"), "Hemoglobina");
        assert_eq!(title_case("RECUENTO DE LEUCOCITOS"), "Recuento De Leucocitos");
        assert_eq!(title_case("got/ast"), "Got/Ast");
        assert_eq!(title_case("GOT/AST"), "Got/Ast");
        assert_eq!(title_case("ac.urico"), "Ac.Urico");
        assert_eq!(title_case("pO2"), "Po2");
        assert_eq!(title_case("glu.orina"), "Glu.Orina");
        assert_eq!(title_case("proteina c reactiva"), "Proteina C Reactiva");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("123"), "123");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        for s in ["Hemoglobina", "Got/Ast", "Ac.Urico", "Po2", "Recuento De Leucocitos"] {
            assert_eq!(title_case(s), s);
            assert_eq!(title_case(&title_case(s)), title_case(s));
        }
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b\t c  "), "a b c");
        assert_eq!(collapse_whitespace("single"), "single");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(
            collapse_whitespace("Desarrollo   de  Escherichia coli"),
            "Desarrollo de Escherichia coli"
        );
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Hospital Barros Luco", "hospital"));
        assert!(contains_ignore_case("HOSPITAL", "Hospital"));
        assert!(contains_ignore_case("3 Días", "día"));
        assert!(!contains_ignore_case("Hemoglobina", "hospital"));
        assert!(!contains_ignore_case("anything", ""));
    }
}
