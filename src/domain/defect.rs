use serde::{Deserialize, Serialize};

use super::detection::{BoundingBox, Detection};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectType {
    Good,
    Crack,
    Bulge,
    Cut,
    Puncture,
    SidewallDamage,
    TreadSeparation,
    UnevenWear,
    BaldSpot,
    ForeignObject,
}

impl DefectType {
    pub fn from_label(label: &str) -> Option<Self> {
        let t = match label.trim().to_ascii_lowercase().as_str() {
            "good" | "normal" => DefectType::Good,
            "crack" | "cracking" => DefectType::Crack,
            "bulge" => DefectType::Bulge,
            "cut" => DefectType::Cut,
            "puncture" => DefectType::Puncture,
            "sidewall_damage" => DefectType::SidewallDamage,
            "tread_separation" => DefectType::TreadSeparation,
            "uneven_wear" => DefectType::UnevenWear,
            "bald_spot" => DefectType::BaldSpot,
            "foreign_object" => DefectType::ForeignObject,
            _ => return None,
        };
        Some(t)
    }

    /// Severidad con confianza plena.
    pub fn base_severity(self) -> DefectSeverity {
        match self {
            DefectType::Good => DefectSeverity::None,
            DefectType::ForeignObject => DefectSeverity::Low,
            DefectType::Crack | DefectType::UnevenWear => DefectSeverity::Medium,
            DefectType::Cut | DefectType::Puncture | DefectType::BaldSpot => DefectSeverity::High,
            DefectType::Bulge | DefectType::SidewallDamage | DefectType::TreadSeparation => {
                DefectSeverity::Critical
            }
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            DefectType::Good => "No visible defects",
            DefectType::Crack => "Cracks in the rubber surface",
            DefectType::Bulge => "Bulge indicating internal structural damage",
            DefectType::Cut => "Cut in the tyre surface",
            DefectType::Puncture => "Puncture in the tread area",
            DefectType::SidewallDamage => "Damage to the sidewall structure",
            DefectType::TreadSeparation => "Tread separating from the casing",
            DefectType::UnevenWear => "Irregular wear across the tread",
            DefectType::BaldSpot => "Localized bald spot on the tread",
            DefectType::ForeignObject => "Foreign object lodged in the tread",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectSeverity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl DefectSeverity {
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Un nivel menos; los defectos reales nunca bajan de `Low`.
    pub fn downgraded(self) -> Self {
        match self {
            DefectSeverity::Critical => DefectSeverity::High,
            DefectSeverity::High => DefectSeverity::Medium,
            DefectSeverity::Medium | DefectSeverity::Low => DefectSeverity::Low,
            DefectSeverity::None => DefectSeverity::None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireDefect {
    #[serde(rename = "type")]
    pub kind: DefectType,
    pub confidence: f32,
    pub severity: DefectSeverity,
    pub bounding_box: Option<BoundingBox>,
    pub description: String,
}

impl TireDefect {
    pub fn new(
        kind: DefectType,
        confidence: f32,
        bounding_box: Option<BoundingBox>,
        downgrade_below: f32,
    ) -> Self {
        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };
        let base = kind.base_severity();
        let severity = if confidence < downgrade_below { base.downgraded() } else { base };

        Self {
            kind,
            confidence,
            severity,
            bounding_box,
            description: kind.describe().to_string(),
        }
    }

    /// `None` si la etiqueta no corresponde a ningún tipo conocido.
    pub fn from_detection(det: &Detection, downgrade_below: f32) -> Option<Self> {
        let kind = DefectType::from_label(&det.label)?;
        Some(Self::new(kind, det.confidence, Some(det.bbox), downgrade_below))
    }

    pub fn is_defect(&self) -> bool {
        self.kind != DefectType::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_types() {
        assert_eq!(DefectType::from_label("bulge"), Some(DefectType::Bulge));
        assert_eq!(DefectType::from_label(" Sidewall_Damage "), Some(DefectType::SidewallDamage));
        assert_eq!(DefectType::from_label("banana"), None);
    }

    #[test]
    fn severity_priorities_are_ordinal() {
        let all = [
            DefectSeverity::None,
            DefectSeverity::Low,
            DefectSeverity::Medium,
            DefectSeverity::High,
            DefectSeverity::Critical,
        ];
        for (i, s) in all.iter().enumerate() {
            assert_eq!(s.priority() as usize, i);
        }
    }

    #[test]
    fn low_confidence_downgrades_one_tier() {
        let d = TireDefect::new(DefectType::Bulge, 0.45, None, 0.5);
        assert_eq!(d.severity, DefectSeverity::High);
        let d = TireDefect::new(DefectType::Bulge, 0.9, None, 0.5);
        assert_eq!(d.severity, DefectSeverity::Critical);
    }

    #[test]
    fn downgrade_threshold_is_configurable() {
        let d = TireDefect::new(DefectType::Bulge, 0.45, None, 0.4);
        assert_eq!(d.severity, DefectSeverity::Critical);
    }

    #[test]
    fn downgrade_never_drops_a_defect_to_none() {
        let d = TireDefect::new(DefectType::ForeignObject, 0.1, None, 0.5);
        assert_eq!(d.severity, DefectSeverity::Low);
        let g = TireDefect::new(DefectType::Good, 0.1, None, 0.5);
        assert_eq!(g.severity, DefectSeverity::None);
    }

    #[test]
    fn nan_confidence_is_sanitized() {
        let d = TireDefect::new(DefectType::Crack, f32::NAN, None, 0.5);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.severity, DefectSeverity::Low);
    }
}
