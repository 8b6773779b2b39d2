//! Template registry.
//!
//! Every template is a pure function from [`QuoteData`] to a 1080x1080
//! [`Composition`]. The registry is a fixed, ordered catalog; the first entry
//! is the default used for unknown ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quote::QuoteData;
use crate::rendering::Composition;
use crate::{Error, Result};

pub mod classic;
pub mod common;
pub mod vivid;

/// Closed set of template identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    #[default]
    MotivationBlue,
    DevotionClassic,
    BusinessPro,
    PremiumGold,
    ModernPulse,
    GlassCard,
    GradientBurst,
    NeonGlow,
}

impl TemplateId {
    /// Registry order
    pub const ALL: [TemplateId; 8] = [
        TemplateId::MotivationBlue,
        TemplateId::DevotionClassic,
        TemplateId::BusinessPro,
        TemplateId::PremiumGold,
        TemplateId::ModernPulse,
        TemplateId::GlassCard,
        TemplateId::GradientBurst,
        TemplateId::NeonGlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::MotivationBlue => "motivation-blue",
            TemplateId::DevotionClassic => "devotion-classic",
            TemplateId::BusinessPro => "business-pro",
            TemplateId::PremiumGold => "premium-gold",
            TemplateId::ModernPulse => "modern-pulse",
            TemplateId::GlassCard => "glass-card",
            TemplateId::GradientBurst => "gradient-burst",
            TemplateId::NeonGlow => "neon-glow",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| Error::NotFound(format!("template '{}'", s)))
    }
}

/// A registered template
#[derive(Clone, Copy)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub render: fn(&QuoteData) -> Composition,
}

impl Template {
    pub fn render(&self, data: &QuoteData) -> Composition {
        (self.render)(data)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

pub static TEMPLATES: [Template; 8] = [
    Template {
        id: TemplateId::MotivationBlue,
        name: "Blue Motivation",
        description: "Bold and modern, perfect for generic quotes.",
        render: classic::motivation_blue,
    },
    Template {
        id: TemplateId::DevotionClassic,
        name: "Daily Devotion",
        description: "Elegant and peaceful, ideal for scripture.",
        render: classic::devotion_classic,
    },
    Template {
        id: TemplateId::BusinessPro,
        name: "Business Pro",
        description: "Clean and professional, great for leadership quotes.",
        render: classic::business_pro,
    },
    Template {
        id: TemplateId::PremiumGold,
        name: "Premium Gold",
        description: "Luxurious dark design with gold accents.",
        render: classic::premium_gold,
    },
    Template {
        id: TemplateId::ModernPulse,
        name: "Modern Pulse",
        description: "Vibrant and energetic with bold typography.",
        render: vivid::modern_pulse,
    },
    Template {
        id: TemplateId::GlassCard,
        name: "Dynamic Glass",
        description: "Modern glassmorphism effect.",
        render: vivid::glass_card,
    },
    Template {
        id: TemplateId::GradientBurst,
        name: "Gradient Burst",
        description: "Vibrant multi-color gradients with bold energy.",
        render: vivid::gradient_burst,
    },
    Template {
        id: TemplateId::NeonGlow,
        name: "Neon Glow",
        description: "Dark background with glowing neon-style text.",
        render: vivid::neon_glow,
    },
];

pub fn lookup(id: TemplateId) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Registered template for `id`, or the first entry when it is missing.
pub fn lookup_or_default(id: TemplateId) -> &'static Template {
    lookup(id).unwrap_or(&TEMPLATES[0])
}

/// Resolve a string id; unknown ids fall back to the default template.
pub fn lookup_str(id: &str) -> &'static Template {
    match id.parse::<TemplateId>() {
        Ok(id) => lookup_or_default(id),
        Err(_) => {
            log::warn!("unknown template id '{}', using {}", id, TEMPLATES[0].id);
            &TEMPLATES[0]
        }
    }
}
