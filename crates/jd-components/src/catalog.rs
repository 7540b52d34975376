//! Effect catalog and configuration-driven construction.

use crate::binding::{JointBinding, joint_names_key, load_joint_set};
use crate::error::{ComponentError, ComponentResult};
use crate::friction::{FRICTION_KEY, PolynomialFriction};
use crate::spring::{LinearSpring, SPRING_KEY};
use crate::traits::DynamicsComponent;
use jd_config::ParameterSource;
use jd_core::JointSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Config segment: `<robot>/<joint>/effects`.
pub const EFFECTS_KEY: &str = "effects";

/// The effect models this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Friction,
    Spring,
}

impl EffectKind {
    pub const ALL: [EffectKind; 2] = [EffectKind::Friction, EffectKind::Spring];

    /// Config segment under which the effect's coefficients live.
    pub fn key(self) -> &'static str {
        match self {
            EffectKind::Friction => FRICTION_KEY,
            EffectKind::Spring => SPRING_KEY,
        }
    }

    /// Build this effect for an already resolved joint.
    pub fn build(
        self,
        binding: JointBinding,
        source: &dyn ParameterSource,
    ) -> ComponentResult<Box<dyn DynamicsComponent>> {
        let component: Box<dyn DynamicsComponent> = match self {
            EffectKind::Friction => Box::new(PolynomialFriction::from_source(binding, source)?),
            EffectKind::Spring => Box::new(LinearSpring::from_source(binding, source)?),
        };
        Ok(component)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("unknown effect kind '{s}'"))
    }
}

/// Joint set plus every effect listed in `<robot>/<joint>/effects`.
pub struct RobotEffects {
    pub joints: JointSet,
    pub components: Vec<Box<dyn DynamicsComponent>>,
}

/// Build every configured effect of `robot`, in joint-set order.
///
/// Joints without an `effects` list contribute nothing.
pub fn build_components(robot: &str, source: &dyn ParameterSource) -> ComponentResult<RobotEffects> {
    let joints = load_joint_set(robot, source)?;
    let mut components = Vec::new();

    for joint in joints.iter() {
        let key = format!("{robot}/{joint}/{EFFECTS_KEY}");
        for kind_name in source.strings_or_empty(&key)? {
            let kind: EffectKind = kind_name.parse().map_err(|_| ComponentError::UnknownEffect {
                kind: kind_name.clone(),
                joint: joint.to_string(),
            })?;
            let binding = JointBinding::from_joint_set(joint, robot, &joints)?;
            components.push(kind.build(binding, source)?);
        }
    }

    debug!(
        robot,
        key = %joint_names_key(robot),
        joints = joints.len(),
        components = components.len(),
        "built robot effects"
    );

    Ok(RobotEffects { joints, components })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_config::ParamTree;

    #[test]
    fn parse_kinds() {
        assert_eq!("friction".parse::<EffectKind>().unwrap(), EffectKind::Friction);
        assert_eq!("spring".parse::<EffectKind>().unwrap(), EffectKind::Spring);
        assert!("damper".parse::<EffectKind>().is_err());
        assert_eq!(EffectKind::Spring.to_string(), "spring");
    }

    #[test]
    fn builds_in_joint_order() {
        let tree = ParamTree::new()
            .with("arm/joint_names", vec!["j1", "j2"])
            .unwrap()
            .with("arm/j2/effects", vec!["friction", "spring"])
            .unwrap()
            .with("arm/j2/friction/coefficients", vec![0.1, 0.05, 0.01, 10.0])
            .unwrap()
            .with("arm/j2/spring/coefficients", vec![1.0, 0.0])
            .unwrap()
            .with("arm/j1/effects", vec!["spring"])
            .unwrap()
            .with("arm/j1/spring/coefficients", vec![2.0, -1.0])
            .unwrap();

        let effects = build_components("arm", &tree).unwrap();
        let names: Vec<&str> = effects.components.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["j1/spring", "j2/friction", "j2/spring"]);
        assert_eq!(effects.joints.len(), 2);
    }

    #[test]
    fn unknown_kind_fails() {
        let tree = ParamTree::new()
            .with("arm/joint_names", vec!["j1"])
            .unwrap()
            .with("arm/j1/effects", vec!["damper"])
            .unwrap();
        let err = build_components("arm", &tree).err().unwrap();
        assert!(matches!(err, ComponentError::UnknownEffect { ref kind, .. } if kind == "damper"));
    }

    #[test]
    fn listed_effect_without_coefficients_fails() {
        let tree = ParamTree::new()
            .with("arm/joint_names", vec!["j1"])
            .unwrap()
            .with("arm/j1/effects", vec!["friction"])
            .unwrap();
        let err = build_components("arm", &tree).err().unwrap();
        assert!(err.is_missing_parameter());
    }
}
