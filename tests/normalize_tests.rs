use proptest::prelude::*;
use quai::shared::normalize;

#[test]
fn normalize_joins_both_spellings() {
    assert_eq!(
        normalize("CHATELET-LES HALLES"),
        normalize("Châtelet-les-Halles")
    );
    assert_eq!(
        normalize("LA DEFENSE (GRANDE ARCHE)"),
        normalize("La Défense (Grande Arche)")
    );
}

#[test]
fn normalize_non_text() {
    assert_eq!(normalize(&None::<&str>), "");
    assert_eq!(normalize(&42), "");
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "[a-zA-ZÀ-ÿ0-9 ()'\\-\t]{0,40}") {
        let once = normalize(s.as_str());
        prop_assert_eq!(normalize(once.as_str()), once);
    }

    #[test]
    fn normalize_output_is_canonical(s in "[a-zA-ZÀ-ÿ0-9 ()'\\-\t]{0,40}") {
        let key = normalize(s.as_str());
        prop_assert_eq!(key.to_lowercase(), key.clone());
        prop_assert!(!key.contains(['(', ')', '-', '\t']));
        prop_assert!(!key.contains("  "));
        prop_assert!(!key.starts_with(' ') && !key.ends_with(' '));
        prop_assert!(!key.chars().any(|c| matches!(c, 'à'..='å' | 'è'..='ë' | 'ì'..='ï' | 'ò'..='ö' | 'ù'..='ü' | 'ç' | 'ñ' | 'ý' | 'ÿ')));
    }
}
