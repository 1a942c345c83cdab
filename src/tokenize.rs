//! Word tokenizer shared by indexing and querying.

/// Word characters: Unicode alphanumerics and underscore. Everything else is
/// a separator.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lower-cased word tokens.
///
/// Lower-cases the input, treats every maximal run of non-word characters as
/// a single separator, and drops empty tokens. Accents are kept: the Spanish
/// stemmer needs them.
///
/// ```
/// use wikidex::tokenize;
///
/// assert_eq!(tokenize("¡Hola, Mundo!"), vec!["hola", "mundo"]);
/// assert!(tokenize("  --  ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
