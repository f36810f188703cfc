use crate::report::error::ReportError;
use crate::report::types::ReportRow;

use std::path::Path;

/// Name of the template placeholder the table is inserted at.
pub const TABLE_PLACEHOLDER: &str = "table_json";

/// Anything shorter cannot be a real template.
const MIN_TEMPLATE_LEN: usize = 10;

/// Renders the final report text: the table serialized as a JSON array,
/// substituted at the `$table_json` placeholder.
///
/// Substitution is safe: a template without the placeholder comes back
/// unchanged, and unrecognized `$...` sequences are left alone.
pub fn render_report(
    template: &str,
    template_path: &Path,
    table: &[ReportRow],
) -> Result<String, ReportError> {
    if template.len() < MIN_TEMPLATE_LEN {
        return Err(ReportError::InvalidTemplate {
            path: template_path.to_path_buf(),
        });
    }

    let json = serde_json::to_string(table).map_err(|e| ReportError::Render { source: e })?;

    Ok(substitute(template, TABLE_PLACEHOLDER, &json))
}

/// `$name` / `${name}` substitution with `string.Template` semantics:
/// `$$` escapes to `$`, `$name` only matches at an identifier boundary,
/// and everything unrecognized passes through verbatim.
fn substitute(template: &str, name: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut rest = template;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        if let Some(stripped) = after.strip_prefix('$') {
            out.push('$');
            rest = stripped;
        } else if let Some(stripped) = braced_match(after, name) {
            out.push_str(value);
            rest = stripped;
        } else if let Some(stripped) = bare_match(after, name) {
            out.push_str(value);
            rest = stripped;
        } else {
            out.push('$');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

fn braced_match<'a>(after: &'a str, name: &str) -> Option<&'a str> {
    after
        .strip_prefix('{')?
        .strip_prefix(name)?
        .strip_prefix('}')
}

fn bare_match<'a>(after: &'a str, name: &str) -> Option<&'a str> {
    let stripped = after.strip_prefix(name)?;

    // `$table_jsonx` names a different placeholder.
    let boundary = stripped
        .chars()
        .next()
        .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_');

    boundary.then_some(stripped)
}
