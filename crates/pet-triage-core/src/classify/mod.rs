//! Request classification.
//!
//! Both classifiers are total: any input string maps to a value.

mod signals;
mod species;

pub use signals::*;
pub use species::*;

/// Lower-cased text split into alphanumeric words.
pub(crate) fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whole-word match, allowing a plural `s`.
pub(crate) fn has_word(words: &[&str], term: &str) -> bool {
    words
        .iter()
        .any(|w| *w == term || w.strip_suffix('s') == Some(term))
}

/// One-line summary of the group and active signals, used to steer the model.
pub fn category_hint(group: SpeciesGroup, signals: &SymptomSignals) -> String {
    let active = signals.active();
    if active.is_empty() {
        format!("species group: {}; no specific symptom category detected", group.label())
    } else {
        format!("species group: {}; symptom categories: {}", group.label(), active.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_word_is_whole_word() {
        let text = "throwing up, two paws sore";
        let w = words(text);
        assert!(has_word(&w, "paw"));
        assert!(has_word(&w, "sore"));
        assert!(!has_word(&w, "wing"));
        assert!(!has_word(&w, "row"));
    }

    #[test]
    fn test_category_hint_lists_signals() {
        let signals = extract_signals("vomiting and very tired");
        let hint = category_hint(SpeciesGroup::DogCat, &signals);
        assert_eq!(
            hint,
            "species group: dog_cat; symptom categories: lethargy, gastrointestinal"
        );
    }

    #[test]
    fn test_category_hint_without_signals() {
        let hint = category_hint(SpeciesGroup::Other, &SymptomSignals::default());
        assert!(hint.contains("other"));
        assert!(hint.contains("no specific symptom category"));
    }
}
