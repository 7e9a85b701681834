// crates/mp_interfacial/src/setup.rs

//! 由算例配置构建相系统、界面力系统与诊断对象
//!
//! 配置中的相名称在这里解析为索引，闭合模型配置解析为 `Box<dyn ForceModel>`，
//! 混合阈值按相名称分配到相对的两侧。任何引用了相对之外的相名都是配置错误。

use glam::DVec3;
use mp_config::{
    BlendedModelConfig, BlendingConfig, CaseConfig, DragModelConfig, LiftModelConfig,
    ModelConfig, PhaseConfig, TurbulentDispersionModelConfig, VirtualMassModelConfig,
    WallLubricationModelConfig,
};
use mp_foundation::{MpError, MpResult, PairIndex};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::blended::ModelView;
use crate::blending::{BlendingMethod, HyperbolicBlending, LinearBlending, LinearRamp, NoBlending};
use crate::fields::{ScalarField, VectorField};
use crate::interfacial::{InterfacialSystem, InterfacialSystemBuilder};
use crate::mesh::CellMesh;
use crate::models::{
    AntalWallLubrication, ConstantLift, ConstantTurbulentDispersion, ConstantVirtualMass,
    ForceModel, LinearDrag, PrescribedForce, SchillerNaumannDrag,
};
use crate::pair::PairSide;
use crate::phase::{Phase, PhaseSystem};
use crate::phase_forces::PhaseForces;
use crate::sink::FieldSink;

/// 构建完成的算例
#[derive(Debug)]
pub struct Case {
    /// 相系统
    pub phases: PhaseSystem,
    /// 界面力系统
    pub interfacial: InterfacialSystem,
    /// 诊断对象
    pub phase_forces: Vec<PhaseForces>,
}

impl Case {
    /// 执行全部诊断对象并写出
    ///
    /// 先全部执行再统一写出，任一对象失败时不写出任何场。
    pub fn run_step(&mut self, sink: &mut dyn FieldSink) -> MpResult<()> {
        for pf in &mut self.phase_forces {
            pf.execute(&self.phases, &self.interfacial)?;
        }
        for pf in &self.phase_forces {
            pf.write(sink)?;
        }
        Ok(())
    }
}

/// 由算例配置构建
pub fn build_case(config: &CaseConfig) -> MpResult<Case> {
    config.validate()?;

    let n = config.mesh.n_cells;
    let mut mesh = CellMesh::line(n, config.mesh.spacing)?;
    if config.mesh.wall_at_origin {
        mesh = mesh.with_wall_at_origin();
    }

    let mut phases = PhaseSystem::new(Arc::new(mesh));
    for pc in &config.phases {
        phases.add_phase(build_phase(pc, n))?;
    }

    let interfacial = {
        let mut builder = InterfacialSystem::builder(&phases);
        for pair in &config.pairs {
            let [first, second] = &pair.phases;
            let blending = build_blending(&pair.blending, first, second)?;
            let idx = builder.pair_with(first, second, blending)?;

            add_models(&mut builder, idx, &pair.drag, drag_model)?;
            add_models(&mut builder, idx, &pair.virtual_mass, virtual_mass_model)?;
            add_models(&mut builder, idx, &pair.lift, lift_model)?;
            add_models(&mut builder, idx, &pair.wall_lubrication, wall_lubrication_model)?;
            add_models(&mut builder, idx, &pair.turbulent_dispersion, turbulent_dispersion_model)?;
        }
        builder.build()?
    };

    let phase_forces = config
        .phase_forces
        .iter()
        .map(|cfg| PhaseForces::new(cfg.clone(), &phases))
        .collect::<MpResult<Vec<_>>>()?;

    info!(
        n_cells = n,
        n_phases = phases.n_phases(),
        n_pairs = interfacial.n_pairs(),
        n_phase_forces = phase_forces.len(),
        "算例构建完成"
    );

    Ok(Case {
        phases,
        interfacial,
        phase_forces,
    })
}

fn build_phase(pc: &PhaseConfig, n: usize) -> Phase {
    let vector = |init: &mp_config::VectorInit| {
        VectorField::from_fn(n, |i| DVec3::from_array(init.value_at(i, n)))
    };
    let mut phase = Phase::uniform(pc.name.clone(), n, 0.0, pc.density)
        .with_alpha(ScalarField::from_fn(n, |i| pc.alpha.value_at(i, n)))
        .with_velocity_field(vector(&pc.velocity))
        .with_acceleration_field(vector(&pc.acceleration))
        .with_viscosity(pc.viscosity)
        .with_diameter(pc.diameter);
    if let Some(k) = pc.turbulent_kinetic_energy {
        phase = phase.with_turbulent_kinetic_energy(ScalarField::uniform(n, k));
    }
    phase
}

// ============================================================
// 混合方法
// ============================================================

fn side_of(name: &str, first: &str, second: &str, key: &str) -> MpResult<PairSide> {
    if name == first {
        Ok(PairSide::First)
    } else if name == second {
        Ok(PairSide::Second)
    } else {
        Err(MpError::config(format!(
            "{} 引用的相 '{}' 不属于相对 ({}, {})",
            key, name, first, second
        )))
    }
}

fn check_keys(map: &BTreeMap<String, f64>, first: &str, second: &str, key: &str) -> MpResult<()> {
    for name in map.keys() {
        side_of(name, first, second, key)?;
    }
    Ok(())
}

fn build_blending(
    config: &BlendingConfig,
    first: &str,
    second: &str,
) -> MpResult<Arc<dyn BlendingMethod>> {
    let method: Arc<dyn BlendingMethod> = match config {
        BlendingConfig::None { continuous_phase } => match continuous_phase {
            None => Arc::new(NoBlending::segregated()),
            Some(name) => {
                let side = side_of(name, first, second, "blending.continuous_phase")?;
                Arc::new(NoBlending::with_continuous(side))
            }
        },
        BlendingConfig::Linear {
            max_fully_dispersed_alpha,
            max_partly_dispersed_alpha,
        } => {
            check_keys(max_fully_dispersed_alpha, first, second, "blending.max_fully_dispersed_alpha")?;
            check_keys(max_partly_dispersed_alpha, first, second, "blending.max_partly_dispersed_alpha")?;
            let ramp = |name: &str| -> MpResult<Option<LinearRamp>> {
                match (
                    max_fully_dispersed_alpha.get(name),
                    max_partly_dispersed_alpha.get(name),
                ) {
                    (Some(&full), Some(&partly)) => LinearRamp::new(full, partly).map(Some),
                    (None, None) => Ok(None),
                    _ => Err(MpError::missing_config(format!("blending.{}", name))),
                }
            };
            Arc::new(LinearBlending::new(ramp(first)?, ramp(second)?))
        }
        BlendingConfig::Hyperbolic {
            max_dispersed_alpha,
            transition_alpha_scale,
        } => {
            check_keys(max_dispersed_alpha, first, second, "blending.max_dispersed_alpha")?;
            Arc::new(HyperbolicBlending::new(
                max_dispersed_alpha.get(first).copied(),
                max_dispersed_alpha.get(second).copied(),
                *transition_alpha_scale,
            )?)
        }
    };
    Ok(method)
}

// ============================================================
// 闭合模型
// ============================================================

fn add_models<M: ModelConfig>(
    builder: &mut InterfacialSystemBuilder<'_>,
    pair: PairIndex,
    config: &BlendedModelConfig<M>,
    make: fn(&M) -> Box<dyn ForceModel>,
) -> MpResult<()> {
    let views = [
        (ModelView::Pair, &config.pair),
        (ModelView::FirstInSecond, &config.first_in_second),
        (ModelView::SecondInFirst, &config.second_in_first),
    ];
    for (view, model) in views {
        if let Some(m) = model {
            builder.model(pair, view, make(m))?;
        }
    }
    Ok(())
}

fn prescribed<M: ModelConfig>(value: &[f64; 3]) -> Box<dyn ForceModel> {
    Box::new(PrescribedForce::uniform(M::KIND, DVec3::from_array(*value)))
}

fn drag_model(config: &DragModelConfig) -> Box<dyn ForceModel> {
    match config {
        DragModelConfig::SchillerNaumann { residual_re } => {
            Box::new(SchillerNaumannDrag::new(*residual_re))
        }
        DragModelConfig::Linear { coefficient } => Box::new(LinearDrag::new(*coefficient)),
        DragModelConfig::Prescribed { value } => prescribed::<DragModelConfig>(value),
    }
}

fn virtual_mass_model(config: &VirtualMassModelConfig) -> Box<dyn ForceModel> {
    match config {
        VirtualMassModelConfig::ConstantCoefficient { cvm } => {
            Box::new(ConstantVirtualMass::new(*cvm))
        }
        VirtualMassModelConfig::Prescribed { value } => prescribed::<VirtualMassModelConfig>(value),
    }
}

fn lift_model(config: &LiftModelConfig) -> Box<dyn ForceModel> {
    match config {
        LiftModelConfig::ConstantCoefficient { cl } => Box::new(ConstantLift::new(*cl)),
        LiftModelConfig::Prescribed { value } => prescribed::<LiftModelConfig>(value),
    }
}

fn wall_lubrication_model(config: &WallLubricationModelConfig) -> Box<dyn ForceModel> {
    match config {
        WallLubricationModelConfig::Antal { cw1, cw2 } => {
            Box::new(AntalWallLubrication::new(*cw1, *cw2))
        }
        WallLubricationModelConfig::Prescribed { value } => {
            prescribed::<WallLubricationModelConfig>(value)
        }
    }
}

fn turbulent_dispersion_model(config: &TurbulentDispersionModelConfig) -> Box<dyn ForceModel> {
    match config {
        TurbulentDispersionModelConfig::ConstantCoefficient { ctd } => {
            Box::new(ConstantTurbulentDispersion::new(*ctd))
        }
        TurbulentDispersionModelConfig::Prescribed { value } => {
            prescribed::<TurbulentDispersionModelConfig>(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_config::{ForceKind, PairConfig, PhaseForcesConfig};

    const CASE: &str = r#"{
        "mesh": { "n_cells": 5, "spacing": 0.01, "wall_at_origin": true },
        "phases": [
            { "name": "water", "alpha": { "start": 0.9, "end": 0.7 }, "density": 1000.0 },
            { "name": "air", "alpha": { "start": 0.1, "end": 0.3 }, "density": 1.2,
              "velocity": [0.0, 0.25, 0.0], "viscosity": 1.8e-5 }
        ],
        "pairs": [
            { "phases": ["air", "water"],
              "blending": { "type": "linear",
                            "max_fully_dispersed_alpha": { "air": 0.3 },
                            "max_partly_dispersed_alpha": { "air": 0.5 } },
              "drag": { "first_in_second": { "type": "schillerNaumann" },
                        "pair": { "type": "linear", "coefficient": 1.0 } },
              "wall_lubrication": { "first_in_second": { "type": "antal" } } }
        ],
        "phase_forces": [ { "phase_name": "water" }, { "phase_name": "air" } ]
    }"#;

    #[test]
    fn test_build_case() {
        let config = CaseConfig::from_json(CASE).unwrap();
        let case = build_case(&config).unwrap();
        assert_eq!(case.phases.n_phases(), 2);
        assert_eq!(case.interfacial.n_pairs(), 1);
        assert_eq!(case.interfacial.n_models(ForceKind::Drag), 2);
        assert_eq!(case.interfacial.n_models(ForceKind::WallLubrication), 1);
        assert_eq!(case.phase_forces.len(), 2);
        assert_eq!(case.interfacial.blending(PairIndex::new(0)).unwrap().name(), "linear");

        let air = case.phases.get(case.phases.find("air").unwrap()).unwrap();
        assert!((air.alpha[4] - 0.3).abs() < 1e-14);
        assert_eq!(air.velocity[2], DVec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_run_step_writes_all_fields() {
        let config = CaseConfig::from_json(CASE).unwrap();
        let mut case = build_case(&config).unwrap();
        let mut db = crate::sink::FieldDatabase::new();
        db.begin_step(1);
        case.run_step(&mut db).unwrap();
        assert_eq!(db.len(), 12);

        let water = db.get("interfacial:Drag.water").unwrap();
        let air = db.get("interfacial:Drag.air").unwrap();
        for i in 0..5 {
            assert!((water[i] + air[i]).length() < 1e-9);
        }
        // 同一步再次写出被拒绝
        assert!(case.run_step(&mut db).is_err());
    }

    #[test]
    fn test_unknown_continuous_phase() {
        let mut config = CaseConfig::from_json(CASE).unwrap();
        config.pairs[0].blending = BlendingConfig::None {
            continuous_phase: Some("oil".to_string()),
        };
        assert!(build_case(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_blending_key_outside_pair() {
        let mut config = CaseConfig::from_json(CASE).unwrap();
        let mut centre = BTreeMap::new();
        centre.insert("sand".to_string(), 0.3);
        config.pairs[0].blending = BlendingConfig::Hyperbolic {
            max_dispersed_alpha: centre,
            transition_alpha_scale: 0.1,
        };
        assert!(build_case(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_pair_with_missing_phase() {
        let mut config = CaseConfig::from_json(CASE).unwrap();
        config.pairs.push(PairConfig::new("air", "sand"));
        assert!(build_case(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_phase_forces_for_missing_phase() {
        let mut config = CaseConfig::from_json(CASE).unwrap();
        config.phase_forces.push(PhaseForcesConfig::new("sand"));
        assert!(build_case(&config).unwrap_err().is_config());
    }
}
