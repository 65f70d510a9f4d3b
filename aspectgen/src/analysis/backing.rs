//! Recognition of getters that expose exactly one field.
//!
//! A property is linked to a field when its getter, after stripping an
//! expression-body arrow, a block with a single `return` and a trailing
//! semicolon, has one of these forms (`f` is `field` or `this.field`):
//!
//! ```text
//! f
//! f ??= expr
//! f ?? (f = expr)
//! f == null ? (f = expr) : f        f is null ? (f = expr) : f
//! f != null ? f : (f = expr)        f is not null ? f : (f = expr)
//! ```
//!
//! Anything else is not recognized and the property stays unlinked.

/// Field name exposed by a getter body, if the body matches the grammar.
pub fn backing_field(getter: &str) -> Option<&str> {
    let expr = unwrap_body(getter)?;

    if let Some(field) = field_ref(expr) {
        return Some(field);
    }
    if let Some((lhs, _)) = expr.split_once("??=") {
        return field_ref(lhs);
    }
    if let Some((lhs, rhs)) = expr.split_once("??") {
        let field = field_ref(lhs)?;
        return (assigned_field(rhs)? == field).then_some(field);
    }
    lazy_ternary(expr)
}

fn unwrap_body(getter: &str) -> Option<&str> {
    let mut body = getter.trim();
    if let Some(rest) = body.strip_prefix("=>") {
        body = rest.trim();
    }
    if let Some(inner) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        body = inner.trim().strip_prefix("return")?;
        if !body.starts_with(char::is_whitespace) && !body.starts_with('(') {
            return None;
        }
        body = body.trim();
    }
    let body = body.strip_suffix(';').unwrap_or(body).trim();
    (!body.is_empty()).then_some(body)
}

/// `field` or `this.field`, with nothing else around it.
fn field_ref(expr: &str) -> Option<&str> {
    let expr = expr.trim();
    let name = expr.strip_prefix("this.").unwrap_or(expr).trim();
    is_identifier(name).then_some(name)
}

fn is_identifier(name: &str) -> bool {
    let name = name.strip_prefix('@').unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// `(f = expr)` with optional surrounding parentheses.
fn assigned_field(expr: &str) -> Option<&str> {
    let expr = strip_parens(expr.trim());
    let idx = expr.find('=')?;
    if expr[idx + 1..].starts_with('=') {
        return None;
    }
    field_ref(&expr[..idx])
}

fn strip_parens(expr: &str) -> &str {
    expr.strip_prefix('(')
        .and_then(|e| e.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(expr)
}

fn lazy_ternary(expr: &str) -> Option<&str> {
    let (condition, branches) = expr.split_once('?')?;
    let (when_true, when_false) = split_top_level(branches, ':')?;
    let condition = condition.trim();

    if let Some(field) = null_checked(condition, &[" == null", " is null"]) {
        return (assigned_field(when_true)? == field && field_ref(when_false)? == field)
            .then_some(field);
    }
    if let Some(field) = null_checked(condition, &[" != null", " is not null"]) {
        return (field_ref(when_true)? == field && assigned_field(when_false)? == field)
            .then_some(field);
    }
    None
}

fn null_checked<'a>(condition: &'a str, operators: &[&str]) -> Option<&'a str> {
    operators
        .iter()
        .find_map(|op| condition.strip_suffix(op).and_then(field_ref))
}

/// Split at the first `sep` outside of parentheses.
fn split_top_level(expr: &str, sep: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => return Some((&expr[..idx], &expr[idx + 1..])),
            _ => {}
        }
    }
    None
}
