// Query-parameter parsing for the draft routes.
//
// The core assumes clean input: ids and names present, option and drafter
// lists trimmed, non-blank and unique. Those checks live here.

use std::collections::HashSet;

use draftroom_core::DraftError;

/// A required text parameter. Missing or blank values are rejected; the
/// value itself is returned untouched so ids and names stay exact.
pub fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, DraftError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(DraftError::validation(field, "must not be blank")),
        None => Err(DraftError::validation(field, format!("missing '{field}' parameter"))),
    }
}

/// Parse a JSON array of strings (`["a", "b"]`) into a clean list.
///
/// Entries are trimmed and blank entries dropped. Duplicates are an error
/// rather than being silently merged, so the caller can ask the user which
/// one they meant.
pub fn entry_list(raw: &str, field: &str) -> Result<Vec<String>, DraftError> {
    let entries: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        DraftError::validation(field, format!("expected a JSON array of strings: {e}"))
    })?;

    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if !seen.insert(entry.to_string()) {
            return Err(DraftError::validation(
                field,
                format!("duplicate entry `{entry}`"),
            ));
        }
        cleaned.push(entry.to_string());
    }
    Ok(cleaned)
}

/// Parse the rounds-per-drafter count. Zero passes here; the engine rejects
/// it after checking the drafter list.
pub fn rounds(raw: &str) -> Result<u32, DraftError> {
    let raw = raw.trim();
    raw.parse::<u32>()
        .map_err(|_| DraftError::validation("rounds", format!("invalid rounds: `{raw}`")))
}
