/// Collapse runs of whitespace so tokens from hand-edited exports compare
/// cleanly against request parameters.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Subject names are vocabulary tokens and exports disagree on casing, so
/// they are folded to lowercase on the way in. The selection core itself
/// compares subjects by exact equality.
pub(crate) fn normalize_subject(raw: &str) -> String {
    normalize_token(raw).to_ascii_lowercase()
}

/// School names keep their casing; only whitespace is cleaned up.
pub(crate) fn normalize_school(raw: &str) -> String {
    normalize_token(raw)
}
