//! Tabla de reglas deterministas: hallazgos -> recomendaciones y urgencia.
//!
//! Orden de evaluación: defectos críticos, profundidad del dibujo, patrón de
//! desgaste, defectos reparables y edad. La regla de mantenimiento rutinario
//! sólo aplica si ninguna otra produjo salida.

use serde::{Deserialize, Serialize};

use super::age::TireAgeStatus;
use super::defect::{DefectSeverity, DefectType, TireDefect};
use super::scoring::HealthStatus;
use super::tread::{TreadStatus, WearPattern};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Replacement,
    Repair,
    Inspection,
    Alignment,
    Rotation,
    PressureCheck,
    Routine,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    /// 1 = más urgente.
    pub priority: u8,
    pub estimated_cost: Option<u32>,
    pub service_type: ServiceType,
}

impl Recommendation {
    fn new(
        title: &str,
        description: &str,
        priority: u8,
        estimated_cost: Option<u32>,
        service_type: ServiceType,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            priority,
            estimated_cost,
            service_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionRequired {
    None,
    Monitor,
    ServiceSoon,
    ServiceNow,
    Replace,
    DoNotDrive,
}

/// Hallazgos que alimentan las reglas.
#[derive(Debug, Clone, Copy)]
pub struct Findings<'a> {
    pub defects: &'a [TireDefect],
    pub tread_status: Option<TreadStatus>,
    pub wear_pattern: Option<WearPattern>,
    pub age_status: Option<TireAgeStatus>,
    pub overall: HealthStatus,
}

const TIRE_COST: u32 = 120;
const REPAIR_COST: u32 = 25;

fn critical_defect_rule(kind: DefectType) -> Recommendation {
    match kind {
        DefectType::Bulge => Recommendation::new(
            "Replace Tire - Sidewall Bulge",
            "A bulge means the internal structure has failed. Do not drive on this tyre.",
            1,
            Some(TIRE_COST),
            ServiceType::Replacement,
        ),
        DefectType::SidewallDamage => Recommendation::new(
            "Replace Tire - Sidewall Damage",
            "Sidewall damage cannot be repaired safely. Replace the tyre before driving.",
            1,
            Some(TIRE_COST),
            ServiceType::Replacement,
        ),
        DefectType::TreadSeparation => Recommendation::new(
            "Replace Tire - Tread Separation",
            "The tread is separating from the casing and may fail at speed.",
            1,
            Some(TIRE_COST),
            ServiceType::Replacement,
        ),
        _ => Recommendation::new(
            "Replace Tire - Critical Defect",
            "A critical defect was detected. Have the tyre replaced immediately.",
            1,
            Some(TIRE_COST),
            ServiceType::Replacement,
        ),
    }
}

fn tread_rule(status: TreadStatus) -> Option<Recommendation> {
    match status {
        TreadStatus::Critical => Some(Recommendation::new(
            "Replace Tire - Critical Tread",
            "Tread depth is below the 1.6 mm legal minimum. Grip in wet conditions is severely reduced.",
            1,
            Some(TIRE_COST),
            ServiceType::Replacement,
        )),
        TreadStatus::Low => Some(Recommendation::new(
            "Plan Tire Replacement",
            "Tread depth is approaching the legal limit. Budget for a replacement soon.",
            2,
            Some(TIRE_COST),
            ServiceType::Replacement,
        )),
        TreadStatus::Fair => Some(Recommendation::new(
            "Monitor Tread Depth",
            "Tread is moderately worn. Re-check the depth every month.",
            4,
            None,
            ServiceType::Inspection,
        )),
        _ => None,
    }
}

fn wear_rule(pattern: WearPattern) -> Option<Recommendation> {
    match pattern {
        WearPattern::CenterWear => Some(Recommendation::new(
            "Check Tire Pressure - Over-inflation",
            "The centre of the tread is wearing faster than the edges.",
            3,
            None,
            ServiceType::PressureCheck,
        )),
        WearPattern::EdgeWear => Some(Recommendation::new(
            "Check Tire Pressure - Under-inflation",
            "Both shoulders are wearing faster than the centre.",
            3,
            None,
            ServiceType::PressureCheck,
        )),
        WearPattern::InnerEdgeWear | WearPattern::OuterEdgeWear => Some(Recommendation::new(
            "Wheel Alignment Check",
            "One edge of the tread is wearing faster, which usually points to misalignment.",
            3,
            Some(80),
            ServiceType::Alignment,
        )),
        _ => None,
    }
}

fn repairable_rule(defect: &TireDefect) -> Option<Recommendation> {
    let urgent = defect.severity >= DefectSeverity::High;
    let rec = match defect.kind {
        DefectType::Good => return None,
        DefectType::Puncture => Recommendation::new(
            "Puncture Repair",
            "Have the puncture inspected and plugged by a professional.",
            if urgent { 2 } else { 3 },
            Some(REPAIR_COST),
            ServiceType::Repair,
        ),
        DefectType::ForeignObject => Recommendation::new(
            "Remove Foreign Object",
            "An object is lodged in the tread. Remove it and check for a puncture.",
            if urgent { 2 } else { 3 },
            Some(REPAIR_COST),
            ServiceType::Repair,
        ),
        DefectType::Cut => Recommendation::new(
            "Inspect Cut",
            "Have the cut measured; deep cuts require replacement.",
            if urgent { 2 } else { 3 },
            None,
            ServiceType::Inspection,
        ),
        DefectType::Crack => Recommendation::new(
            "Inspect Rubber Cracking",
            "Surface cracking is a sign of ageing or UV damage.",
            3,
            None,
            ServiceType::Inspection,
        ),
        DefectType::BaldSpot => Recommendation::new(
            "Inspect Bald Spot",
            "Localized wear can come from hard braking or a suspension issue.",
            if urgent { 2 } else { 3 },
            None,
            ServiceType::Inspection,
        ),
        DefectType::UnevenWear => Recommendation::new(
            "Rotate Tires",
            "Rotate the tyres to even out wear and check the suspension.",
            4,
            Some(40),
            ServiceType::Rotation,
        ),
        DefectType::Bulge | DefectType::SidewallDamage | DefectType::TreadSeparation => {
            Recommendation::new(
                "Professional Structural Inspection",
                "A possible structural defect was detected with low confidence. Have it checked.",
                2,
                None,
                ServiceType::Inspection,
            )
        }
    };
    Some(rec)
}

fn age_rule(status: TireAgeStatus) -> Option<Recommendation> {
    match status {
        TireAgeStatus::Expired => Some(Recommendation::new(
            "Replace Aged Tire",
            "The tyre is over ten years old. Rubber degrades with age regardless of tread depth.",
            2,
            Some(TIRE_COST),
            ServiceType::Replacement,
        )),
        TireAgeStatus::Old => Some(Recommendation::new(
            "Plan Replacement - Tire Age",
            "The tyre is over six years old. Have it inspected and plan a replacement.",
            3,
            None,
            ServiceType::Inspection,
        )),
        TireAgeStatus::Aging => Some(Recommendation::new(
            "Annual Tire Inspection",
            "The tyre is over five years old. Have it professionally inspected once a year.",
            4,
            None,
            ServiceType::Inspection,
        )),
        _ => None,
    }
}

fn routine() -> Recommendation {
    Recommendation::new(
        "Continue regular maintenance",
        "No issues found. Check pressure monthly and rotate tyres every 10,000 km.",
        5,
        None,
        ServiceType::Routine,
    )
}

fn push_unique(out: &mut Vec<Recommendation>, rec: Recommendation) {
    if !out.iter().any(|r| r.title == rec.title) {
        out.push(rec);
    }
}

/// Recomendaciones ordenadas por prioridad ascendente (orden estable).
pub fn generate_recommendations(findings: &Findings<'_>) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for d in findings.defects.iter().filter(|d| d.severity == DefectSeverity::Critical) {
        push_unique(&mut out, critical_defect_rule(d.kind));
    }

    if let Some(rec) = findings.tread_status.and_then(tread_rule) {
        push_unique(&mut out, rec);
    }

    if let Some(rec) = findings.wear_pattern.and_then(wear_rule) {
        push_unique(&mut out, rec);
    }

    for d in findings.defects.iter().filter(|d| d.severity != DefectSeverity::Critical) {
        if let Some(rec) = repairable_rule(d) {
            push_unique(&mut out, rec);
        }
    }

    if let Some(rec) = findings.age_status.and_then(age_rule) {
        push_unique(&mut out, rec);
    }

    if out.is_empty() {
        out.push(routine());
    }

    out.sort_by_key(|r| r.priority);
    out
}

/// Primera regla que encaja, de mayor a menor urgencia.
pub fn action_required(findings: &Findings<'_>) -> ActionRequired {
    let any_defect = |pred: fn(&TireDefect) -> bool| findings.defects.iter().any(pred);

    if any_defect(|d| {
        d.severity == DefectSeverity::Critical
            && matches!(d.kind, DefectType::Bulge | DefectType::SidewallDamage)
    }) {
        return ActionRequired::DoNotDrive;
    }

    if any_defect(|d| d.severity == DefectSeverity::Critical)
        || findings.tread_status == Some(TreadStatus::Critical)
        || findings.age_status == Some(TireAgeStatus::Expired)
        || findings.overall == HealthStatus::Critical
    {
        return ActionRequired::Replace;
    }

    if any_defect(|d| d.severity == DefectSeverity::High)
        || findings.tread_status == Some(TreadStatus::Low)
        || findings.overall == HealthStatus::Poor
    {
        return ActionRequired::ServiceNow;
    }

    if any_defect(|d| d.severity == DefectSeverity::Medium)
        || findings.tread_status == Some(TreadStatus::Fair)
        || findings.age_status == Some(TireAgeStatus::Old)
        || findings.overall == HealthStatus::Fair
    {
        return ActionRequired::ServiceSoon;
    }

    if any_defect(|d| d.severity == DefectSeverity::Low)
        || findings.age_status == Some(TireAgeStatus::Aging)
        || findings.overall == HealthStatus::Good
    {
        return ActionRequired::Monitor;
    }

    ActionRequired::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn findings<'a>(defects: &'a [TireDefect]) -> Findings<'a> {
        Findings {
            defects,
            tread_status: Some(TreadStatus::Excellent),
            wear_pattern: Some(WearPattern::Even),
            age_status: Some(TireAgeStatus::New),
            overall: HealthStatus::Excellent,
        }
    }

    fn defect(kind: DefectType, conf: f32) -> TireDefect {
        TireDefect::new(kind, conf, None, 0.5)
    }

    #[test]
    fn routine_only_when_nothing_else_fires() {
        let recs = generate_recommendations(&findings(&[]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Continue regular maintenance");
        assert_eq!(recs[0].service_type, ServiceType::Routine);

        let f = Findings { age_status: Some(TireAgeStatus::Aging), ..findings(&[]) };
        let recs = generate_recommendations(&f);
        assert!(recs.iter().all(|r| r.title != "Continue regular maintenance"));
    }

    #[test]
    fn output_is_sorted_by_priority() {
        let defects = [defect(DefectType::UnevenWear, 0.9), defect(DefectType::Bulge, 0.9)];
        let f = Findings {
            tread_status: Some(TreadStatus::Low),
            wear_pattern: Some(WearPattern::InnerEdgeWear),
            age_status: Some(TireAgeStatus::Old),
            ..findings(&defects)
        };
        let recs = generate_recommendations(&f);
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));
        assert_eq!(recs[0].title, "Replace Tire - Sidewall Bulge");
        assert_eq!(recs.len(), 5);
    }

    #[test]
    fn duplicate_titles_collapse() {
        let defects = [defect(DefectType::Puncture, 0.9), defect(DefectType::Puncture, 0.8)];
        let recs = generate_recommendations(&findings(&defects));
        assert_eq!(recs.iter().filter(|r| r.title == "Puncture Repair").count(), 1);
    }

    #[test]
    fn do_not_drive_only_for_critical_bulge_or_sidewall() {
        let bulge = [defect(DefectType::Bulge, 0.9)];
        assert_eq!(action_required(&findings(&bulge)), ActionRequired::DoNotDrive);

        let sidewall = [defect(DefectType::SidewallDamage, 0.9)];
        assert_eq!(action_required(&findings(&sidewall)), ActionRequired::DoNotDrive);

        let separation = [defect(DefectType::TreadSeparation, 0.9)];
        assert_eq!(action_required(&findings(&separation)), ActionRequired::Replace);

        // confianza baja -> HIGH, no CRITICAL
        let weak_bulge = [defect(DefectType::Bulge, 0.3)];
        assert_eq!(action_required(&findings(&weak_bulge)), ActionRequired::ServiceNow);
    }

    #[test]
    fn action_levels_follow_findings() {
        let f = Findings { tread_status: Some(TreadStatus::Critical), ..findings(&[]) };
        assert_eq!(action_required(&f), ActionRequired::Replace);

        let f = Findings { tread_status: Some(TreadStatus::Fair), ..findings(&[]) };
        assert_eq!(action_required(&f), ActionRequired::ServiceSoon);

        let f = Findings { overall: HealthStatus::Good, ..findings(&[]) };
        assert_eq!(action_required(&f), ActionRequired::Monitor);

        assert_eq!(action_required(&findings(&[])), ActionRequired::None);
    }

    #[test]
    fn urgency_levels_are_ordered() {
        assert!(ActionRequired::None < ActionRequired::Monitor);
        assert!(ActionRequired::Monitor < ActionRequired::ServiceSoon);
        assert!(ActionRequired::ServiceSoon < ActionRequired::ServiceNow);
        assert!(ActionRequired::ServiceNow < ActionRequired::Replace);
        assert!(ActionRequired::Replace < ActionRequired::DoNotDrive);
    }
}
