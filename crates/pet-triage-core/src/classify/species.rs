//! Species label → physiological group.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use super::{has_word, words};

/// Minimum Jaro-Winkler similarity for a misspelled word to count as a keyword.
const TYPO_SIMILARITY: f64 = 0.92;

/// Coarse physiological bucket used to pick a fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesGroup {
    SmallMammal,
    Bird,
    Reptile,
    DogCat,
    Other,
}

impl SpeciesGroup {
    /// Groups checked against keywords, in priority order.
    const KEYWORD_ORDER: [SpeciesGroup; 4] = [
        SpeciesGroup::SmallMammal,
        SpeciesGroup::Bird,
        SpeciesGroup::Reptile,
        SpeciesGroup::DogCat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpeciesGroup::SmallMammal => "small_mammal",
            SpeciesGroup::Bird => "bird",
            SpeciesGroup::Reptile => "reptile",
            SpeciesGroup::DogCat => "dog_cat",
            SpeciesGroup::Other => "other",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            SpeciesGroup::SmallMammal => &[
                "rabbit", "bunny", "guinea pig", "cavy", "hamster", "gerbil", "rat", "mouse",
                "mice", "chinchilla", "ferret", "degu", "hedgehog", "small mammal", "rodent",
            ],
            SpeciesGroup::Bird => &[
                "bird", "parrot", "budgie", "budgerigar", "parakeet", "cockatiel", "cockatoo",
                "canary", "finch", "lovebird", "macaw", "conure", "african grey", "pigeon",
                "dove", "chicken", "hen", "duck", "avian",
            ],
            SpeciesGroup::Reptile => &[
                "reptile", "lizard", "gecko", "snake", "python", "boa", "iguana", "turtle",
                "tortoise", "terrapin", "bearded dragon", "dragon", "chameleon", "skink", "uromastyx",
            ],
            SpeciesGroup::DogCat => &[
                "dog", "puppy", "pup", "canine", "cat", "kitten", "kitty", "feline", "labrador",
                "retriever", "shepherd", "terrier", "poodle", "bulldog", "beagle", "husky",
                "spaniel", "collie", "dachshund", "chihuahua", "persian", "siamese", "maine coon",
            ],
            SpeciesGroup::Other => &[],
        }
    }
}

impl std::fmt::Display for SpeciesGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a free-text species label. Never fails; unknown text is `Other`.
pub fn classify_species(raw: &str) -> SpeciesGroup {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return SpeciesGroup::Other;
    }

    let words = words(&text);

    for group in SpeciesGroup::KEYWORD_ORDER {
        if group
            .keywords()
            .iter()
            .any(|kw| keyword_matches(&text, &words, kw))
        {
            return group;
        }
    }

    classify_misspelled(&words).unwrap_or(SpeciesGroup::Other)
}

/// Short keywords only match whole words (optionally plural) so "pirate" is not a rat.
fn keyword_matches(text: &str, words: &[&str], keyword: &str) -> bool {
    if keyword.len() <= 3 {
        has_word(words, keyword)
    } else {
        text.contains(keyword)
    }
}

/// Typo-tolerant second pass over single-word keywords.
fn classify_misspelled(words: &[&str]) -> Option<SpeciesGroup> {
    for group in SpeciesGroup::KEYWORD_ORDER {
        for keyword in group.keywords() {
            if keyword.len() < 5 || keyword.contains(' ') {
                continue;
            }
            let hit = words
                .iter()
                .filter(|w| w.len() >= 4)
                .any(|w| jaro_winkler(w, keyword) >= TYPO_SIMILARITY);
            if hit {
                return Some(group);
            }
        }
    }
    None
}
