//! Recorridos completos por `TireAnalysisService` con proveedores fijos.

mod common;

use common::fixtures::{row, service, with_measurements, ScriptedModel};
use common::synthetic_image::uniform_png;
use tyreguard_scoring::domain::{
    analysis::DetectionSource, defect::DefectType, recommendation::ActionRequired,
    scoring::HealthStatus, tread::TreadStatus,
};

const BULGE: usize = 2;

#[test]
fn clean_tyre_in_good_condition_keeps_routine_maintenance() {
    let img = uniform_png(64, 64, 110);
    let svc = with_measurements(service(None), Some((5.0, 5.0, 5.0)), Some(48));

    let a = svc.analyze(&img, Some(&img));

    assert!(a.error.is_none());
    assert!(a.defects.is_empty());
    assert_eq!(a.detection_source, Some(DetectionSource::Heuristic));
    // 100 - (15 * 0.35 + 0 * 0.40 + 15 * 0.25)
    assert_eq!(a.overall_health_score, 91);
    assert_eq!(a.overall_status, HealthStatus::Excellent);
    assert_eq!(a.recommendations.len(), 1);
    assert_eq!(a.recommendations[0].title, "Continue regular maintenance");
    assert_eq!(a.action_required, ActionRequired::None);
}

#[test]
fn critical_bulge_overrides_perfect_tread_and_age() {
    let img = uniform_png(64, 64, 110);
    let model = ScriptedModel(vec![row(0.5, 0.5, 0.2, 0.2, 1.0, BULGE, 0.92)]);
    let svc = with_measurements(service(Some(Box::new(model))), Some((8.0, 8.0, 8.0)), Some(6));

    let a = svc.analyze(&img, Some(&img));

    assert_eq!(a.detection_source, Some(DetectionSource::Model));
    assert_eq!(a.heuristic_score, None);
    assert_eq!(a.tread.as_ref().map(|t| t.status), Some(TreadStatus::Excellent));
    assert!(a.defects.iter().all(|d| d.kind == DefectType::Bulge));
    assert_eq!(a.overall_health_score, 60);
    assert_eq!(a.overall_status, HealthStatus::Critical);
    assert_eq!(a.action_required, ActionRequired::DoNotDrive);
    assert_eq!(a.recommendations[0].priority, 1);
}

#[test]
fn overlapping_candidates_collapse_to_one_defect() {
    let img = uniform_png(64, 64, 110);
    let rows = (0..500)
        .map(|i| {
            let jitter = (i % 10) as f32 * 0.001;
            row(0.5 + jitter, 0.5 - jitter, 0.3, 0.3, 1.0, BULGE, 0.6 + (i % 7) as f32 * 0.05)
        })
        .collect();
    let svc = service(Some(Box::new(ScriptedModel(rows))));

    let a = svc.analyze(&img, None);

    assert_eq!(a.defects.len(), 1);
    assert_eq!(a.defects[0].kind, DefectType::Bulge);
}

#[test]
fn critical_tread_forces_critical_status() {
    let img = uniform_png(64, 64, 110);
    let svc = with_measurements(service(None), Some((1.2, 1.3, 1.4)), Some(6));

    let a = svc.analyze(&img, Some(&img));

    let tread = a.tread.as_ref().expect("tread measured");
    assert_eq!(tread.status, TreadStatus::Critical);
    assert!((tread.minimum_depth_mm - 1.2).abs() < 1e-6);
    assert!(a.overall_health_score >= 50, "fused score alone would not be critical");
    assert_eq!(a.overall_status, HealthStatus::Critical);
    assert_eq!(a.recommendations[0].title, "Replace Tire - Critical Tread");
    assert_eq!(a.recommendations[0].priority, 1);
}

#[test]
fn missing_sidewall_drops_the_age_term() {
    let img = uniform_png(64, 64, 110);
    let svc = with_measurements(service(None), Some((5.0, 5.0, 5.0)), Some(150));

    let a = svc.analyze(&img, None);

    assert!(a.error.is_none());
    assert!(a.age.is_none());
    assert_eq!(a.sub_scores.age, None);
    // 100 - 15 * 0.35, sin renormalizar los pesos
    assert_eq!(a.overall_health_score, 95);
    assert_eq!(a.overall_status, HealthStatus::Excellent);
}

#[test]
fn fallback_reports_its_own_score() {
    // superficie muy brillante: sólo salta el umbral de brillo (100 - 15)
    let img = uniform_png(64, 64, 240);

    let a = service(None).analyze(&img, None);

    assert_eq!(a.detection_source, Some(DetectionSource::Heuristic));
    assert_eq!(a.heuristic_score, Some(85));
    assert_eq!(a.defects.len(), 1);
    assert_eq!(a.defects[0].kind, DefectType::BaldSpot);
}

#[test]
fn unreadable_tread_image_reports_an_error_result() {
    let a = service(None).analyze(b"not an image", None);

    assert!(a.is_error());
    assert_eq!(a.overall_health_score, 0);
    assert_eq!(a.overall_status, HealthStatus::Critical);
}
