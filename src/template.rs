//! Indent-Aware Template Rendering
//!
//! `{name}` placeholders are replaced by their bound value. A multi-line
//! value is re-indented so every line after the first starts at the column
//! where the placeholder stood, which lets nested YAML blocks be rendered
//! separately and dropped into place. `{{` and `}}` produce literal braces.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown placeholder: {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("Unterminated placeholder at byte {0}")]
    UnterminatedPlaceholder(usize),

    #[error("Binding never used by template: {0}")]
    UnusedBinding(String),
}

/// Render `template`, substituting each `{name}` with its binding.
pub fn render_template(template: &str, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; bindings.len()];
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            offset += pos + 2;
            continue;
        }
        if tail.starts_with('}') {
            // `}}` collapses to one brace; a lone `}` is kept as-is
            out.push('}');
            let skip = if tail.starts_with("}}") { 2 } else { 1 };
            rest = &tail[skip..];
            offset += pos + skip;
            continue;
        }

        let close = tail
            .find('}')
            .filter(|&end| !tail[1..end].contains('\n'))
            .ok_or(TemplateError::UnterminatedPlaceholder(offset + pos))?;
        let name = &tail[1..close];
        let index = bindings
            .iter()
            .position(|(key, _)| *key == name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
        used[index] = true;

        let column = current_column(&out);
        push_indented(&mut out, bindings[index].1, column);

        rest = &tail[close + 1..];
        offset += pos + close + 1;
    }
    out.push_str(rest);

    if let Some(index) = used.iter().position(|u| !u) {
        return Err(TemplateError::UnusedBinding(bindings[index].0.to_string()));
    }

    Ok(out)
}

/// Character column of the end of `text`.
fn current_column(text: &str) -> usize {
    let line_start = text.rfind('\n').map_or(0, |i| i + 1);
    text[line_start..].chars().count()
}

fn push_indented(out: &mut String, value: &str, column: usize) {
    let indent = " ".repeat(column);
    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
}
