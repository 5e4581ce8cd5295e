//! Locale-aware string comparison for product names.
//!
//! Names are compared letter by letter on alphabet position rather than code
//! point, so Ukrainian `ґ`, `є`, `і`, `ї` land where a reader expects them.
//! Levels, in order: alphabet position (case folded, `ё` read as `е`, accented
//! Latin read as its base letter), the diacritic distinction, lower case before
//! upper case, and finally code point.

use crate::catalog::Language;
use std::cmp::Ordering;

/// Cyrillic alphabet covering Ukrainian and Russian, in collation order.
const CYRILLIC: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщъыьэюя";

const CLASS_SPACE: u8 = 0;
const CLASS_DIGIT: u8 = 1;
const CLASS_OTHER: u8 = 4;

/// Compares strings the way a reader of one storefront language expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    language: Language,
}

impl Collator {
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }

    /// Compares two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = a.chars().map(|c| self.primary(c)).cmp(b.chars().map(|c| self.primary(c)));
        if primary != Ordering::Equal {
            return primary;
        }

        let secondary = a.chars().map(secondary).cmp(b.chars().map(secondary));
        if secondary != Ordering::Equal {
            return secondary;
        }

        let tertiary = a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase));
        if tertiary != Ordering::Equal {
            return tertiary;
        }

        a.cmp(b)
    }

    /// Script classes: Cyrillic sorts ahead of Latin for Cyrillic languages.
    fn script_classes(&self) -> (u8, u8) {
        if self.language.is_cyrillic() {
            (3, 2)
        } else {
            (2, 3)
        }
    }

    fn primary(&self, c: char) -> (u8, u32) {
        let folded = fold(c);
        let (latin, cyrillic) = self.script_classes();

        if folded.is_whitespace() || is_punctuation(folded) {
            return (CLASS_SPACE, folded as u32);
        }
        if let Some(digit) = folded.to_digit(10) {
            return (CLASS_DIGIT, digit);
        }
        if folded.is_ascii_lowercase() {
            return (latin, folded as u32 - 'a' as u32);
        }
        if let Some(pos) = CYRILLIC.chars().position(|letter| letter == folded) {
            return (cyrillic, pos as u32);
        }
        (CLASS_OTHER, folded as u32)
    }
}

/// Lower-cases a character and strips its diacritic.
fn fold(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    base_letter(lower).unwrap_or(lower)
}

/// Base letter of a lower-case letter carrying a diacritic.
fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'ё' => 'е',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

fn secondary(c: char) -> u8 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    u8::from(base_letter(lower).is_some())
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '’' | 'ʼ' | '«' | '»' | '–' | '—' | '…')
}
