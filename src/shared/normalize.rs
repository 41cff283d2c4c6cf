use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// A value that may carry a station name.
///
/// Only text is a name: numbers and missing cells normalize to an empty key.
pub trait RawName {
    fn as_name(&self) -> Option<&str>;
}

impl RawName for str {
    fn as_name(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawName for String {
    fn as_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: RawName + ?Sized> RawName for &T {
    fn as_name(&self) -> Option<&str> {
        (**self).as_name()
    }
}

impl<T: RawName> RawName for Option<T> {
    fn as_name(&self) -> Option<&str> {
        self.as_ref().and_then(RawName::as_name)
    }
}

macro_rules! not_a_name {
    ($($ty:ty),*) => {
        $(impl RawName for $ty {
            fn as_name(&self) -> Option<&str> {
                None
            }
        })*
    };
}

not_a_name!(i32, i64, u32, u64, f32, f64, bool);

/// Canonicalizes a free-text station name into the key used to join datasets.
///
/// Steps run in order: lowercase, trim, strip diacritics, drop parenthesis
/// characters (not their content), turn hyphens into spaces and collapse
/// whitespace runs. Calling it on its own output returns the same string.
pub fn normalize<T: RawName + ?Sized>(raw: &T) -> String {
    match raw.as_name() {
        Some(name) => canonicalize(name),
        None => String::new(),
    }
}

fn canonicalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered
        .trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        // Compatibility decomposition can surface uppercase letters.
        .flat_map(char::to_lowercase)
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn normalize_lowercases_and_trims() {
    assert_eq!(normalize("  CHATELET  "), "chatelet");
}

#[test]
fn normalize_strips_accents() {
    assert_eq!(normalize("Châtelet-Les Halles"), "chatelet les halles");
    assert_eq!(normalize("Gare de l'Est (Métro)"), "gare de l'est metro");
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize("Saint \t Lazare - Opéra"), "saint lazare opera");
}

#[test]
fn normalize_keeps_parenthesis_content() {
    assert_eq!(normalize("La Défense (Grande Arche)"), "la defense grande arche");
}

#[test]
fn normalize_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("-()-"), "");
}

#[test]
fn normalize_not_text() {
    assert_eq!(normalize(&None::<String>), "");
    assert_eq!(normalize(&42), "");
    assert_eq!(normalize(&12.5), "");
    assert_eq!(normalize(&Some("Nation")), "nation");
}

#[test]
fn normalize_decomposed_input() {
    assert_eq!(normalize("Ope\u{0301}ra"), normalize("Opéra"));
}
