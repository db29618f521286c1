//! Helpers for turning asset filenames into C++ identifiers.
//!
//! Generated headers name their namespace after the source file, so
//! `audio/jump-2.wav` becomes `wav_jump_2`. The stem is everything before the
//! first `.` in the file name.

/// Error returned when a name cannot be used as a C++ identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier `{0}` must start with a letter or underscore")]
    InvalidStart(String),

    #[error("identifier `{ident}` contains invalid character {ch:?}")]
    InvalidChar { ident: String, ch: char },

    #[error("identifier `{0}` is reserved (contains `__` or starts with `_` and an uppercase letter)")]
    Reserved(String),
}

/// Returns the asset stem: the file name up to its first `.`.
///
/// `"boom.final.wav"` gives `"boom"`; a name without a dot is returned whole.
pub fn asset_stem(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Map a raw stem onto identifier characters.
///
/// Anything outside `[A-Za-z0-9_]` becomes `_`, and runs of `_` collapse to
/// one. The result is meant to be appended to a prefix such as `wav_`, so a
/// leading digit is kept.
pub fn sanitize_stem(stem: &str) -> Result<String, IdentError> {
    if stem.is_empty() {
        return Err(IdentError::Empty);
    }

    let mut out = String::with_capacity(stem.len());
    for c in stem.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    Ok(out)
}

/// Check that `ident` is a valid C/C++ identifier (`[A-Za-z_][A-Za-z0-9_]*`)
/// outside the forms reserved for the implementation.
pub fn validate_ident(ident: &str) -> Result<(), IdentError> {
    let mut chars = ident.chars();
    let first = chars.next().ok_or(IdentError::Empty)?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(IdentError::InvalidStart(ident.to_string()));
    }

    if let Some(ch) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(IdentError::InvalidChar {
            ident: ident.to_string(),
            ch,
        });
    }

    let mut rest = ident.chars().skip(1);
    let reserved_start = first == '_' && rest.next().is_some_and(|c| c.is_ascii_uppercase());
    if reserved_start || ident.contains("__") {
        return Err(IdentError::Reserved(ident.to_string()));
    }

    Ok(())
}

/// Derive the identifier for an asset file name, validated with `prefix` applied.
pub fn ident_for_file(file_name: &str, prefix: &str) -> Result<String, IdentError> {
    let ident = sanitize_stem(asset_stem(file_name))?;
    validate_ident(&format!("{prefix}{ident}"))?;
    Ok(ident)
}
