//! `{{NAME}}` placeholder filling for the bundled text templates.

use std::collections::BTreeMap;

/// Replaces every `{{NAME}}` in `template` that has an entry in `values`.
///
/// The template is scanned once, left to right. Substituted text is never
/// rescanned, so a value that itself contains `{{OTHER}}` is emitted
/// verbatim. Placeholders without a value are left in place.
///
/// ## Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use gqlforge_gen::template::substitute;
///
/// let values = BTreeMap::from([("NAME", "{{NAME}}".to_string())]);
/// assert_eq!(substitute("hi {{NAME}}", &values), "hi {{NAME}}");
/// ```
pub fn substitute(template: &str, values: &BTreeMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];

        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };

        let name = &after[..close];
        match values.get(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}
