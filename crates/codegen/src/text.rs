//! Text folding for rule matching.

/// Lowercase, strip Czech diacritics, turn `_`/`-`/`/` into spaces and collapse whitespace.
///
/// `"Tepelná_čerpadla"` and `"tepelna  cerpadla"` fold to the same key.
pub fn fold(text: &str) -> String {
    let mapped: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'ä' => 'a',
            'č' => 'c',
            'ď' => 'd',
            'é' | 'ě' | 'ë' => 'e',
            'í' => 'i',
            'ľ' | 'ĺ' => 'l',
            'ň' => 'n',
            'ó' | 'ô' | 'ö' => 'o',
            'ř' => 'r',
            'š' => 's',
            'ť' => 't',
            'ú' | 'ů' | 'ü' => 'u',
            'ý' => 'y',
            'ž' => 'z',
            '_' | '-' | '/' => ' ',
            other => other,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `true` when `word` appears in `text` as a whole alphanumeric token.
pub fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

/// Brand suffix: first alphanumeric word, upper-cased, at most six characters.
pub fn brand_token(brand: &str) -> Option<String> {
    let word = fold(brand)
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())?
        .to_uppercase();
    Some(word.chars().take(6).collect())
}
