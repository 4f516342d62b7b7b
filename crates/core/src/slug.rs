//! URL slug derivation for category names.
//!
//! Category names are Russian, so Cyrillic letters are transliterated to
//! Latin before the usual lowercase + hyphen normalisation.

/// Latin replacement for a lowercase Cyrillic letter, if it has one.
///
/// `ъ` and `ь` map to an empty string (they are dropped).
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shh",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Generate a URL-safe slug from a category name.
///
/// Lowercases, transliterates Cyrillic, replaces every other non-alphanumeric
/// character with a hyphen, collapses consecutive hyphens, and trims
/// leading/trailing hyphens.
///
/// ```
/// use salon_core::slug::slugify;
///
/// assert_eq!(slugify("Массаж"), "massazh");
/// assert_eq!(slugify("Препаратный педикюр KART"), "preparatnyy-pedikyur-kart");
/// ```
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_hyphen = true; // suppresses a leading hyphen

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if let Some(latin) = transliterate(c) {
            // Dropped letters (ъ, ь) must not break a word with a hyphen.
            if !latin.is_empty() {
                result.push_str(latin);
                prev_hyphen = false;
            }
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_single_word() {
        assert_eq!(slugify("Массаж"), "massazh");
        assert_eq!(slugify("Маникюр"), "manikyur");
        assert_eq!(slugify("Лицо"), "lico");
    }

    #[test]
    fn joins_words_with_hyphens() {
        assert_eq!(slugify("Брови и ресницы"), "brovi-i-resnicy");
        assert_eq!(slugify("Наращивание ногтей"), "narashhivanie-nogtey");
    }

    #[test]
    fn keeps_latin_and_digits() {
        assert_eq!(slugify("Препаратный педикюр KART"), "preparatnyy-pedikyur-kart");
        assert_eq!(slugify("SPA 2 in 1"), "spa-2-in-1");
    }

    #[test]
    fn drops_hard_and_soft_signs() {
        assert_eq!(slugify("Объём"), "obyom");
        assert_eq!(slugify("Пальцы"), "palcy");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("  --Пирсинг!!  & уши-- "), "pirsing-ushi");
        assert_eq!(slugify("!!!"), "");
    }
}
