//! Condition catalog for the fallback tables.

use serde::{Deserialize, Serialize};

use crate::models::Condition;

/// Every condition the rule tables can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    // Dogs and cats
    TornNail,
    PadLacerationOrForeignBody,
    SprainOrFracture,
    Gastroenteritis,
    Pancreatitis,
    PainOrSystemicIllness,
    UpperRespiratoryInfection,
    NonSpecificDogCat,

    // Small mammals
    GiStasis,
    DentalDisease,
    SmallMammalRespiratory,
    SmallMammalSystemic,
    LimbInjuryOrPododermatitis,
    NonSpecificSmallMammal,

    // Birds
    BloodFeatherOrNailInjury,
    AvianRespiratory,
    CropOrGiDisorder,
    AvianSystemic,
    NonSpecificBird,

    // Reptiles
    HusbandryAnorexia,
    ReptileRespiratory,
    ParasitesOrImpaction,
    MetabolicBoneDisease,
    TraumaOrBurn,
    NonSpecificReptile,

    // Any other species
    WoundOrInjury,
    GiUpset,
    RespiratoryInfection,
    SystemicIllness,
    NonSpecificIllness,
}

impl ConditionKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ConditionKind::TornNail => "Torn or broken nail/claw",
            ConditionKind::PadLacerationOrForeignBody => "Paw pad laceration or foreign body",
            ConditionKind::SprainOrFracture => "Sprain, strain or fracture",
            ConditionKind::Gastroenteritis => "Gastroenteritis / dietary indiscretion",
            ConditionKind::Pancreatitis => "Pancreatitis",
            ConditionKind::PainOrSystemicIllness => "Pain or systemic illness",
            ConditionKind::UpperRespiratoryInfection => "Upper respiratory infection / kennel cough",
            ConditionKind::NonSpecificDogCat => "Non-specific illness",
            ConditionKind::GiStasis => "Gastrointestinal stasis (ileus)",
            ConditionKind::DentalDisease => "Dental disease / overgrown teeth",
            ConditionKind::SmallMammalRespiratory => "Respiratory infection",
            ConditionKind::SmallMammalSystemic => "Pain or systemic illness",
            ConditionKind::LimbInjuryOrPododermatitis => "Limb injury or sore hocks (pododermatitis)",
            ConditionKind::NonSpecificSmallMammal => "Non-specific illness",
            ConditionKind::BloodFeatherOrNailInjury => "Broken blood feather or nail injury",
            ConditionKind::AvianRespiratory => "Respiratory infection (air sac / upper airway)",
            ConditionKind::CropOrGiDisorder => "Crop or gastrointestinal disorder",
            ConditionKind::AvianSystemic => "Systemic illness",
            ConditionKind::NonSpecificBird => "Non-specific illness",
            ConditionKind::HusbandryAnorexia => "Husbandry-related appetite loss (temperature / UVB)",
            ConditionKind::ReptileRespiratory => "Respiratory infection",
            ConditionKind::ParasitesOrImpaction => "Intestinal parasites or impaction",
            ConditionKind::MetabolicBoneDisease => "Metabolic bone disease",
            ConditionKind::TraumaOrBurn => "Trauma or thermal burn",
            ConditionKind::NonSpecificReptile => "Non-specific illness",
            ConditionKind::WoundOrInjury => "Wound or injury",
            ConditionKind::GiUpset => "Gastrointestinal upset",
            ConditionKind::RespiratoryInfection => "Respiratory infection",
            ConditionKind::SystemicIllness => "Systemic illness",
            ConditionKind::NonSpecificIllness => "Non-specific illness",
        }
    }

    /// Short explanation shown next to the name.
    pub fn reason(self) -> &'static str {
        match self {
            ConditionKind::TornNail => {
                "Bleeding from the paw most often comes from a nail torn or cracked near the quick."
            }
            ConditionKind::PadLacerationOrForeignBody => {
                "Cuts to the pad or a lodged object (glass, thorn, grass seed) cause bleeding and limping."
            }
            ConditionKind::SprainOrFracture => {
                "Refusing to bear weight can indicate a soft-tissue injury or a broken bone."
            }
            ConditionKind::Gastroenteritis => {
                "Vomiting or diarrhoea is commonly caused by eating something unsuitable or an infection."
            }
            ConditionKind::Pancreatitis => {
                "Vomiting together with abdominal pain can point to an inflamed pancreas."
            }
            ConditionKind::PainOrSystemicIllness => {
                "Lethargy, poor appetite or signs of pain can accompany infection, fever or internal disease."
            }
            ConditionKind::UpperRespiratoryInfection => {
                "Coughing or sneezing is often caused by a contagious airway infection."
            }
            ConditionKind::NonSpecificDogCat => {
                "The description does not match a specific pattern; a physical exam is needed."
            }
            ConditionKind::GiStasis => {
                "Small herbivores that stop eating can quickly develop a slowed or stopped gut."
            }
            ConditionKind::DentalDisease => {
                "Continuously growing teeth can overgrow and make eating painful."
            }
            ConditionKind::SmallMammalRespiratory => {
                "Sneezing, discharge or noisy breathing suggests a bacterial airway infection."
            }
            ConditionKind::SmallMammalSystemic => {
                "Small mammals hide illness; lethargy or hunching often signals pain or advanced disease."
            }
            ConditionKind::LimbInjuryOrPododermatitis => {
                "Limping or bleeding feet can follow a fall, a trapped limb or pressure sores."
            }
            ConditionKind::NonSpecificSmallMammal => {
                "No clear pattern; small mammals deteriorate quickly, so an exam is advised."
            }
            ConditionKind::BloodFeatherOrNailInjury => {
                "Growing feathers and nails have a blood supply and can bleed heavily when broken."
            }
            ConditionKind::AvianRespiratory => {
                "Tail bobbing, clicking or open-mouth breathing indicates airway or air sac disease."
            }
            ConditionKind::CropOrGiDisorder => {
                "Regurgitation or abnormal droppings can come from crop infection or gut disease."
            }
            ConditionKind::AvianSystemic => {
                "Birds mask illness; a fluffed, quiet bird that is not eating is often seriously unwell."
            }
            ConditionKind::NonSpecificBird => {
                "No clear pattern; birds hide symptoms until late, so an avian exam is advised."
            }
            ConditionKind::HusbandryAnorexia => {
                "Incorrect temperatures or lighting are the most common reason reptiles stop eating."
            }
            ConditionKind::ReptileRespiratory => {
                "Open-mouth breathing, bubbles or wheezing often follow enclosures that are too cold or damp."
            }
            ConditionKind::ParasitesOrImpaction => {
                "Abnormal stools or straining can be caused by parasites or swallowed substrate."
            }
            ConditionKind::MetabolicBoneDisease => {
                "Weak limbs or difficulty walking can result from calcium or UVB deficiency."
            }
            ConditionKind::TraumaOrBurn => {
                "Injuries in reptiles are often caused by heat sources, cage mates or falls."
            }
            ConditionKind::NonSpecificReptile => {
                "No clear pattern; review husbandry and arrange a reptile vet exam."
            }
            ConditionKind::WoundOrInjury => {
                "Bleeding, wounds or limping suggest an external injury."
            }
            ConditionKind::GiUpset => {
                "Vomiting, diarrhoea or changes in droppings suggest a digestive problem."
            }
            ConditionKind::RespiratoryInfection => {
                "Coughing, sneezing or laboured breathing suggests an airway infection."
            }
            ConditionKind::SystemicIllness => {
                "Lethargy, poor appetite or pain can accompany many internal illnesses."
            }
            ConditionKind::NonSpecificIllness => {
                "The description does not match a specific pattern; a physical exam is needed."
            }
        }
    }

    pub fn to_condition(self) -> Condition {
        Condition::new(self.name(), self.reason())
    }
}
