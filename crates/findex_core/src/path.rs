//! Field path resolution inside records.

use serde_json::Value;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Field(&'a str),
    Position(usize),
}

/// Splits `a.b[0].c` into segments. Returns `None` for malformed brackets.
fn segments(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut out = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(open) => (&part[..open], &part[open..]),
            None => (part, ""),
        };
        if !name.is_empty() {
            out.push(Segment::Field(name));
        }
        while !rest.is_empty() {
            let close = rest.find(']')?;
            let position = rest.get(1..close)?.trim().parse().ok()?;
            out.push(Segment::Position(position));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return None;
            }
        }
    }
    Some(out)
}

/// Resolves a field path against a record.
///
/// Returns `None` when any step is missing; a numeric dotted segment
/// indexes arrays as well as matching object keys literally.
pub(crate) fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let steps = segments(path)?;
    if steps.is_empty() {
        return None;
    }

    let mut current = record;
    for step in steps {
        current = match (step, current) {
            (Segment::Field(name), Value::Object(map)) => map.get(name)?,
            (Segment::Field(name), Value::Array(items)) => items.get(name.parse::<usize>().ok()?)?,
            (Segment::Position(i), Value::Array(items)) => items.get(i)?,
            _ => return None,
        };
    }
    Some(current)
}
