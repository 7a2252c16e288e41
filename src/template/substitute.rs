use std::collections::BTreeMap;

/// Replace `{{name}}` tokens in raw template text.
///
/// `name` is one or more ASCII letters, digits, or underscores. Tokens with no matching
/// variable are left verbatim. Values are inserted as-is, without JSON escaping.
pub fn substitute_variables(text: &str, vars: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let name_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        let name = &after[..name_len];

        if name_len > 0 && after[name_len..].starts_with("}}") {
            match vars.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + 4 + name_len]),
            }
            rest = &after[name_len + 2..];
        } else {
            // Not a token here; keep one brace and rescan from the next one.
            out.push('{');
            rest = &rest[start + 1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/template/substitute.rs"]
mod tests;
