//! Plural form selection for different languages
//!
//! Numerus messages carry an ordered list of translation forms. Each locale
//! maps a count to an index into that list through its [`PluralRule`].

/// Maps a numeric quantity to one of a locale's ordered plural forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// Two forms: 1 selects the singular form, every other count the plural
    /// form. Used by all two-form locales shipped with the client.
    TwoForm,
    /// Three forms: one / few / many (Polish).
    ThreeFormSlavic,
}

impl PluralRule {
    /// Number of translation forms a numerus message needs for this rule.
    pub fn form_count(&self) -> usize {
        match self {
            Self::TwoForm => 2,
            Self::ThreeFormSlavic => 3,
        }
    }

    /// Index of the form to use for `count`.
    pub fn category_index(&self, count: i64) -> usize {
        let n = count.unsigned_abs();
        match self {
            Self::TwoForm => {
                if n == 1 {
                    0
                } else {
                    1
                }
            }
            Self::ThreeFormSlavic => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
        }
    }

    /// Names of the plural categories, in form order.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::TwoForm => &["one", "other"],
            Self::ThreeFormSlavic => &["one", "few", "many"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_form_selects_singular_only_for_one() {
        assert_eq!(PluralRule::TwoForm.category_index(1), 0);
        assert_eq!(PluralRule::TwoForm.category_index(0), 1);
        assert_eq!(PluralRule::TwoForm.category_index(2), 1);
        assert_eq!(PluralRule::TwoForm.category_index(42), 1);
    }

    #[test]
    fn two_form_uses_magnitude_for_negative_counts() {
        assert_eq!(PluralRule::TwoForm.category_index(-1), 0);
        assert_eq!(PluralRule::TwoForm.category_index(-3), 1);
    }

    #[test]
    fn slavic_rule_has_three_categories() {
        let rule = PluralRule::ThreeFormSlavic;
        assert_eq!(rule.form_count(), 3);
        assert_eq!(rule.category_index(1), 0);
        assert_eq!(rule.category_index(2), 1);
        assert_eq!(rule.category_index(4), 1);
        assert_eq!(rule.category_index(22), 1);
        assert_eq!(rule.category_index(5), 2);
        assert_eq!(rule.category_index(12), 2);
        assert_eq!(rule.category_index(14), 2);
        assert_eq!(rule.category_index(100), 2);
    }

    #[test]
    fn category_names_match_form_count() {
        for rule in [PluralRule::TwoForm, PluralRule::ThreeFormSlavic] {
            assert_eq!(rule.categories().len(), rule.form_count());
        }
    }
}
