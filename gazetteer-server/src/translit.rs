//! Cyrillic to Latin transliteration of user input.
//!
//! Stored place names are Latin-script, so names typed in Cyrillic are
//! mapped forward before they reach the store. Only Cyrillic characters are
//! rewritten: everything else passes through untouched so that Latin names
//! with diacritics still match exactly.
//!
//! GeoNames spells Russian names in BGN/PCGN style (`Yaroslavl`,
//! `Chelyabinsk`, `Nizhniy Novgorod`). The letters where that differs from
//! deunicode's spelling are mapped here; deunicode covers the rest.

/// Map every Cyrillic character of `input` to its Latin spelling.
///
/// # Examples
///
/// ```
/// use gazetteer_server::translit::transliterate;
///
/// assert_eq!(transliterate("Москва"), "Moskva");
/// assert_eq!(transliterate("Ярославль"), "Yaroslavl");
/// assert_eq!(transliterate("Omsk"), "Omsk");
/// ```
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let latin = is_cyrillic(c)
            .then(|| bgn_pcgn(c).or_else(|| deunicode::deunicode_char(c)))
            .flatten();
        match latin {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Letters whose BGN/PCGN spelling differs from deunicode's.
fn bgn_pcgn(c: char) -> Option<&'static str> {
    let latin = match c {
        'я' => "ya",
        'Я' => "Ya",
        'ю' => "yu",
        'Ю' => "Yu",
        'ё' => "e",
        'Ё' => "E",
        'й' => "y",
        'Й' => "Y",
        // Hard and soft signs are dropped from GeoNames names.
        'ь' | 'Ь' | 'ъ' | 'Ъ' => "",
        _ => return None,
    };
    Some(latin)
}

/// Returns true if `input` contains any Cyrillic character.
pub fn has_cyrillic(input: &str) -> bool {
    input.chars().any(is_cyrillic)
}

fn is_cyrillic(c: char) -> bool {
    matches!(
        c,
        '\u{0400}'..='\u{052F}' // Cyrillic, Cyrillic Supplement
            | '\u{1C80}'..='\u{1C8F}' // Cyrillic Extended-C
            | '\u{2DE0}'..='\u{2DFF}' // Cyrillic Extended-A
            | '\u{A640}'..='\u{A69F}' // Cyrillic Extended-B
    )
}
