//! Coarse symptom signals from free text.
//!
//! Signals are independent keyword checks on the lower-cased text; several can
//! be true at once. Bleeding and paw wounds additionally require a paw/limb
//! word; limb terms match whole words only, so "throwing" is not a wing.

use serde::{Deserialize, Serialize};

use super::{has_word, words};

const LETHARGY: &[&str] = &[
    "letharg", "tired", "weak", "sleepy", "sleeping a lot", "listless", "no energy",
    "low energy", "depressed", "dull", "not moving", "collapse", "hiding",
];

const ANOREXIA: &[&str] = &[
    "not eating", "won't eat", "wont eat", "isn't eating", "stopped eating", "refusing food",
    "refuses food", "no appetite", "loss of appetite", "lost appetite", "off food",
    "off his food", "off her food", "anorexi", "inappetence", "not interested in food",
];

const GASTROINTESTINAL: &[&str] = &[
    "vomit", "throwing up", "threw up", "diarrh", "loose stool", "soft stool", "bloody stool",
    "constipat", "no poop", "not pooping", "no droppings", "fewer droppings", "bloat",
    "nausea", "regurgitat", "straining to poop",
];

const RESPIRATORY: &[&str] = &[
    "cough", "sneez", "wheez", "breathing", "breath", "nasal discharge", "runny nose",
    "tail bob", "gasp", "respiratory", "congest", "honking",
];

const PAIN: &[&str] = &[
    "pain", "hurt", "yelp", "whimper", "crying", "hunched", "guarding", "sensitive to touch",
    "teeth grinding", "grinding teeth", "trembl", "shaking", "won't let me touch", "sore",
];

const BLOOD: &[&str] = &["bleed", "blood"];

const WOUND: &[&str] = &[
    "wound", "cut", "laceration", "torn", "tear", "broken", "injur", "gash", "scrape",
    "puncture", "swollen", "ripped",
];

/// Whole words, optionally plural.
const PAW_OR_LIMB: &[&str] = &[
    "paw", "pad", "footpad", "foot", "feet", "toe", "toenail", "nail", "claw", "dewclaw",
    "leg", "limb", "wing", "hock", "ankle", "wrist",
];

const LAMENESS: &[&str] = &[
    "limp", "lame", "not putting weight", "won't put weight", "not bearing weight",
    "not using", "holding up", "favoring", "favouring", "can't walk", "cannot walk",
    "dragging", "stumbl",
];

/// Independent boolean symptom categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSignals {
    pub lethargy: bool,
    pub anorexia: bool,
    pub gastrointestinal: bool,
    pub respiratory: bool,
    pub pain_or_guarding: bool,
    pub bleeding: bool,
    pub paw_wound: bool,
    pub lameness: bool,
}

impl SymptomSignals {
    /// Names of the signals that are set, in declaration order.
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.lethargy, "lethargy"),
            (self.anorexia, "anorexia"),
            (self.gastrointestinal, "gastrointestinal"),
            (self.respiratory, "respiratory"),
            (self.pain_or_guarding, "pain_or_guarding"),
            (self.bleeding, "bleeding"),
            (self.paw_wound, "paw_wound"),
            (self.lameness, "lameness"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }

    /// Any external-injury signal.
    pub fn any_injury(&self) -> bool {
        self.bleeding || self.paw_wound || self.lameness
    }

    /// Lethargy or loss of appetite.
    pub fn systemic(&self) -> bool {
        self.lethargy || self.anorexia
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Extract signals from raw symptom text. Pure and total.
pub fn extract_signals(raw: &str) -> SymptomSignals {
    let text = raw.to_lowercase();
    let has = |terms: &[&str]| terms.iter().any(|t| text.contains(t));

    let tokens = words(&text);
    let limb = PAW_OR_LIMB.iter().any(|t| has_word(&tokens, t));

    SymptomSignals {
        lethargy: has(LETHARGY),
        anorexia: has(ANOREXIA),
        gastrointestinal: has(GASTROINTESTINAL),
        respiratory: has(RESPIRATORY),
        pain_or_guarding: has(PAIN),
        bleeding: limb && has(BLOOD),
        paw_wound: limb && has(WOUND),
        lameness: has(LAMENESS),
    }
}
