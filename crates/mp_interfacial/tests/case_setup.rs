// crates/mp_interfacial/tests/case_setup.rs
//!
//! 由 JSON 算例构建并执行
//!
//! 验证配置解析、模型解析与多步写出

use mp_config::CaseConfig;
use mp_interfacial::{build_case, FieldDatabase, ForceKind, MpError};
use std::path::PathBuf;

fn bubble_column_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../cases/bubble_column.json")
}

#[test]
fn test_bubble_column_case_runs() {
    let config = CaseConfig::from_file(bubble_column_path()).unwrap();
    let mut case = build_case(&config).unwrap();

    assert_eq!(case.phases.n_phases(), 2);
    assert_eq!(case.interfacial.n_models(ForceKind::Drag), 3);
    for kind in ForceKind::ALL {
        assert!(case.interfacial.n_models(kind) >= 1, "{} 缺少模型", kind);
    }

    let mut db = FieldDatabase::new();
    for step in 1..=config.run.steps {
        db.begin_step(step);
        case.run_step(&mut db).unwrap();
    }
    assert_eq!(db.len(), 12);
    assert!(case.phase_forces.iter().all(|pf| pf.n_executions() == config.run.steps));

    let water = db.get("interfacial:Total.water").unwrap();
    let air = db.get("interfacial:Total.air").unwrap();
    assert!(water.first_non_finite().is_none());
    for i in 0..water.len() {
        assert!((water[i] + air[i]).length() < 1e-9 * (1.0 + water[i].length()));
    }
}

#[test]
fn test_case_parallel_kinds_matches_serial() {
    let mut config = CaseConfig::from_file(bubble_column_path()).unwrap();
    config.phase_forces[0].parallel_kinds = true;
    config.phase_forces[1].parallel_kinds = false;
    config.phase_forces[1].phase_name = "water".to_string();
    config.phase_forces[1].field_prefix = "serial".to_string();

    let mut case = build_case(&config).unwrap();
    let mut db = FieldDatabase::new();
    db.begin_step(1);
    case.run_step(&mut db).unwrap();

    for kind in ForceKind::ALL {
        let a = db.get(&format!("interfacial:{}.water", kind)).unwrap();
        let b = db.get(&format!("serial:{}.water", kind)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_pair_level_lift_rejected_in_config() {
    let json = std::fs::read_to_string(bubble_column_path()).unwrap();
    let json = json.replace(
        r#""lift": {
                "first_in_second""#,
        r#""lift": {
                "pair""#,
    );
    let err: MpError = CaseConfig::from_json(&json).unwrap_err().into();
    assert!(err.is_config());
}

#[test]
fn test_missing_turbulent_kinetic_energy_fails_execute() {
    let mut config = CaseConfig::from_file(bubble_column_path()).unwrap();
    config.phases[0].turbulent_kinetic_energy = None;
    let mut case = build_case(&config).unwrap();
    let mut db = FieldDatabase::new();
    db.begin_step(1);
    let err = case.run_step(&mut db).unwrap_err();
    assert!(matches!(err, MpError::Evaluation { .. }));
    assert!(db.is_empty());
}
