// ABOUTME: Placeholder substitution over raw template text
// ABOUTME: Single pass, longest-name match; substituted text is never re-scanned

use crate::binder::ParameterSet;

/// Replace every `prefix + name + postfix` token in `template` with the
/// parameter's value.
///
/// This is literal text replacement, not a templating language. Two rules
/// keep it exact:
///
/// - a parameter whose name is a prefix of another supplied name never
///   steals the longer token (longest name wins at each occurrence);
/// - output of one substitution is never re-scanned, so values containing
///   marker characters pass through untouched.
///
/// Tokens with no matching parameter are left as-is in the output, and the
/// same inputs always render byte-identical text.
#[must_use]
pub fn render(template: &str, params: &ParameterSet, prefix: &str, postfix: &str) -> String {
    debug_assert!(!prefix.is_empty(), "parameter prefix must be non-empty");

    // Longest-first, then lexicographic: deterministic and prefix-safe.
    let mut names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
    names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(prefix) {
        out.push_str(&rest[..pos]);
        let at = &rest[pos..];
        let after_prefix = &at[prefix.len()..];

        let matched = names.iter().find(|name| {
            after_prefix.starts_with(**name) && after_prefix[name.len()..].starts_with(postfix)
        });
        match matched {
            Some(name) => {
                out.push_str(params.get(name).unwrap_or_default());
                rest = &after_prefix[name.len() + postfix.len()..];
            }
            None => {
                out.push_str(prefix);
                rest = after_prefix;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&'static str, &str)]) -> ParameterSet {
        entries
            .iter()
            .fold(ParameterSet::new(), |p, (n, v)| p.with(n, (*v).to_string()))
    }

    #[test]
    fn substitutes_every_occurrence() {
        let p = params(&[("personId", "42")]);
        assert_eq!(
            render("SELECT $personId, $personId", &p, "$", ""),
            "SELECT 42, 42"
        );
    }

    #[test]
    fn name_that_prefixes_another_does_not_partially_match() {
        let p = params(&[("person", "WRONG"), ("personId", "42")]);
        assert_eq!(
            render("WHERE id = $personId AND p = $person", &p, "$", ""),
            "WHERE id = 42 AND p = WRONG"
        );
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        // the first value contains a token of the second parameter
        let p = params(&[("a", "$b"), ("b", "2")]);
        assert_eq!(render("$a $b", &p, "$", ""), "$b 2");
    }

    #[test]
    fn unresolved_tokens_pass_through() {
        let p = params(&[("known", "1")]);
        assert_eq!(render("$known $unknown", &p, "$", ""), "1 $unknown");
    }

    #[test]
    fn rendering_is_idempotent_per_inputs() {
        let p = params(&[("maxDate", "'2012-01-01'"), ("personId", "7")]);
        let template = "SELECT * WHERE p = $personId AND d < $maxDate";
        assert_eq!(
            render(template, &p, "$", ""),
            render(template, &p, "$", "")
        );
    }

    #[test]
    fn postfix_markers_delimit_tokens() {
        let p = params(&[("id", "9")]);
        assert_eq!(render("%id% and %idx%", &p, "%", "%"), "9 and %idx%");
    }
}
