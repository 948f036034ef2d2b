//! Per-group decision tables.
//!
//! Condition selection depends on signals; red flags and care steps are
//! static per group.

use crate::classify::{SpeciesGroup, SymptomSignals};

use super::ConditionKind;

/// Candidate conditions in priority order. May exceed the output cap; the
/// engine truncates. Empty only when nothing matched.
pub(super) fn candidate_conditions(group: SpeciesGroup, s: &SymptomSignals) -> Vec<ConditionKind> {
    let mut out = Vec::new();
    let mut push = |cond: bool, kind: ConditionKind| {
        if cond {
            out.push(kind);
        }
    };

    match group {
        SpeciesGroup::DogCat => {
            // External injuries outrank internal illness.
            push(s.bleeding || s.paw_wound, ConditionKind::TornNail);
            push(s.any_injury(), ConditionKind::PadLacerationOrForeignBody);
            push(s.lameness, ConditionKind::SprainOrFracture);
            push(s.gastrointestinal, ConditionKind::Gastroenteritis);
            push(s.gastrointestinal && s.pain_or_guarding, ConditionKind::Pancreatitis);
            push(
                s.pain_or_guarding || s.systemic(),
                ConditionKind::PainOrSystemicIllness,
            );
            push(s.respiratory, ConditionKind::UpperRespiratoryInfection);
        }
        SpeciesGroup::SmallMammal => {
            push(s.anorexia || s.gastrointestinal, ConditionKind::GiStasis);
            push(s.anorexia, ConditionKind::DentalDisease);
            push(s.respiratory, ConditionKind::SmallMammalRespiratory);
            push(
                s.lethargy || s.pain_or_guarding,
                ConditionKind::SmallMammalSystemic,
            );
            push(s.any_injury(), ConditionKind::LimbInjuryOrPododermatitis);
        }
        SpeciesGroup::Bird => {
            push(s.bleeding || s.paw_wound, ConditionKind::BloodFeatherOrNailInjury);
            push(s.respiratory, ConditionKind::AvianRespiratory);
            push(s.gastrointestinal, ConditionKind::CropOrGiDisorder);
            push(
                s.systemic() || s.pain_or_guarding || s.lameness,
                ConditionKind::AvianSystemic,
            );
        }
        SpeciesGroup::Reptile => {
            push(s.anorexia || s.lethargy, ConditionKind::HusbandryAnorexia);
            push(s.respiratory, ConditionKind::ReptileRespiratory);
            push(s.gastrointestinal, ConditionKind::ParasitesOrImpaction);
            push(s.lameness, ConditionKind::MetabolicBoneDisease);
            push(s.bleeding || s.paw_wound, ConditionKind::TraumaOrBurn);
        }
        SpeciesGroup::Other => {
            push(s.any_injury(), ConditionKind::WoundOrInjury);
            push(s.gastrointestinal, ConditionKind::GiUpset);
            push(s.respiratory, ConditionKind::RespiratoryInfection);
            push(
                s.systemic() || s.pain_or_guarding,
                ConditionKind::SystemicIllness,
            );
        }
    }

    out
}

/// Condition returned when no rule matched.
pub(super) fn catch_all(group: SpeciesGroup) -> ConditionKind {
    match group {
        SpeciesGroup::DogCat => ConditionKind::NonSpecificDogCat,
        SpeciesGroup::SmallMammal => ConditionKind::NonSpecificSmallMammal,
        SpeciesGroup::Bird => ConditionKind::NonSpecificBird,
        SpeciesGroup::Reptile => ConditionKind::NonSpecificReptile,
        SpeciesGroup::Other => ConditionKind::NonSpecificIllness,
    }
}

pub(super) fn red_flags(group: SpeciesGroup) -> &'static [&'static str] {
    match group {
        SpeciesGroup::DogCat => &[
            "Bleeding that does not slow after 10 minutes of gentle pressure",
            "Difficulty breathing, pale or blue gums",
            "Repeated vomiting, or vomiting with a swollen, tight abdomen",
            "Collapse, seizures or inability to stand",
            "Suspected poisoning or a visibly deformed limb",
            "Not eating or drinking for more than 24 hours",
        ],
        SpeciesGroup::SmallMammal => &[
            "No droppings for 12 hours or more",
            "Not eating for more than 12 hours",
            "Hunched posture or teeth grinding",
            "Laboured or open-mouth breathing",
            "Cold ears or body, or collapse",
            "Bloated or hard abdomen",
        ],
        SpeciesGroup::Bird => &[
            "Sitting fluffed up on the cage floor",
            "Tail bobbing or open-mouth breathing",
            "Bleeding that does not stop within a few minutes",
            "Not eating or drinking for more than 24 hours",
            "Blood in droppings or repeated regurgitation",
            "Loss of balance or falling off the perch",
        ],
        SpeciesGroup::Reptile => &[
            "Open-mouth breathing, bubbles or mucus from the nose or mouth",
            "Unable to lift the body or limbs, tremors or twitching",
            "Swelling of the jaw or limbs",
            "Prolapsed tissue from the vent",
            "Burns or open wounds",
            "Not eating for several weeks outside normal brumation",
        ],
        SpeciesGroup::Other => &[
            "Difficulty breathing",
            "Heavy or persistent bleeding",
            "Collapse or unresponsiveness",
            "Not eating or drinking for more than 24 hours",
            "Severe or repeated vomiting or diarrhoea",
            "Signs of severe pain",
        ],
    }
}

pub(super) fn care_steps(group: SpeciesGroup) -> &'static [&'static str] {
    match group {
        SpeciesGroup::DogCat => &[
            "Keep your pet calm and restrict activity.",
            "Apply gentle pressure with a clean cloth to any bleeding.",
            "Offer small amounts of water; withhold food for a few hours after vomiting.",
            "Do not give human pain medication; many are toxic to pets.",
            "Contact your veterinarian, and go to an emergency clinic if any red flag appears.",
        ],
        SpeciesGroup::SmallMammal => &[
            "Do not force-feed; offer fresh hay, leafy greens and water.",
            "Keep your pet warm, quiet and away from stress.",
            "Monitor droppings and urine closely.",
            "Arrange a prompt exam with an exotics vet, ideally within 12 hours.",
        ],
        SpeciesGroup::Bird => &[
            "Keep the bird warm and quiet, away from drafts.",
            "Place food and water where the bird can reach them easily.",
            "For a bleeding feather or nail, apply gentle pressure with clean gauze.",
            "Do not give human medication.",
            "See an avian vet within 24 hours, sooner if any red flag appears.",
        ],
        SpeciesGroup::Reptile => &[
            "Check enclosure temperatures and UVB lighting against species needs.",
            "Keep the animal hydrated with shallow lukewarm soaks if appropriate.",
            "Do not force-feed.",
            "Separate from cage mates if injured.",
            "Arrange an exam with a reptile vet.",
        ],
        SpeciesGroup::Other => &[
            "Keep your pet warm, quiet and comfortable.",
            "Make fresh water available.",
            "Do not give human medication.",
            "Contact a veterinarian experienced with this species.",
        ],
    }
}
