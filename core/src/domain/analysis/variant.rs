use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::analysis::entities::GenerationLimits;

pub const SKIN_DISCLAIMER: &str = "This AI-generated analysis is for informational purposes only and is not a medical diagnosis. Consult a dermatologist or other qualified healthcare provider about any skin concern.";

pub const EYE_DISCLAIMER: &str = "This AI-generated analysis is for informational purposes only and is not a medical diagnosis. Sudden vision changes, eye pain or injury need prompt evaluation by an eye care professional.";

pub const HISTORY_DISCLAIMER: &str = "This AI-generated summary of the provided history is for informational purposes only and does not replace advice from a licensed healthcare professional.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Skin,
    Eye,
    History,
}

/// Structural family of the result a variant produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportShape {
    Diagnostic,
    History,
}

/// Everything that distinguishes one analysis variant from another.
#[derive(Debug)]
pub struct VariantDescriptor {
    pub variant: Variant,
    pub slug: &'static str,
    pub specialty: &'static str,
    pub subject: &'static str,
    pub disclaimer: &'static str,
    pub example_conditions: &'static [&'static str],
    pub limits: GenerationLimits,
    pub shape: ReportShape,
}

impl VariantDescriptor {
    pub fn requires_attachment(&self) -> bool {
        self.shape == ReportShape::Diagnostic
    }
}

static SKIN: VariantDescriptor = VariantDescriptor {
    variant: Variant::Skin,
    slug: "skin",
    specialty: "dermatology",
    subject: "skin",
    disclaimer: SKIN_DISCLAIMER,
    example_conditions: &[
        "Eczema (atopic dermatitis)",
        "Contact dermatitis",
        "Psoriasis",
        "Fungal skin infection",
        "Acne",
    ],
    limits: GenerationLimits::json(2048, 0.2),
    shape: ReportShape::Diagnostic,
};

static EYE: VariantDescriptor = VariantDescriptor {
    variant: Variant::Eye,
    slug: "eye",
    specialty: "ophthalmology",
    subject: "eye",
    disclaimer: EYE_DISCLAIMER,
    example_conditions: &[
        "Conjunctivitis (pink eye)",
        "Dry eye",
        "Stye (hordeolum)",
        "Blepharitis",
        "Subconjunctival hemorrhage",
    ],
    limits: GenerationLimits::json(2048, 0.2),
    shape: ReportShape::Diagnostic,
};

static HISTORY: VariantDescriptor = VariantDescriptor {
    variant: Variant::History,
    slug: "history",
    specialty: "internal medicine",
    subject: "patient history",
    disclaimer: HISTORY_DISCLAIMER,
    example_conditions: &[],
    limits: GenerationLimits::json(4096, 0.2),
    shape: ReportShape::History,
};

impl Variant {
    pub fn descriptor(&self) -> &'static VariantDescriptor {
        match self {
            Variant::Skin => &SKIN,
            Variant::Eye => &EYE,
            Variant::History => &HISTORY,
        }
    }

    pub fn disclaimer(&self) -> &'static str {
        self.descriptor().disclaimer
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().slug)
    }
}
