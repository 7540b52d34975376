//! Measurement datasets and stacked identification matrices.

use crate::error::{IdentError, IdentResult};
use crate::model::EffectModel;
use jd_components::JointSample;
use jd_core::Real;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// On-disk form of one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub q: Vec<Real>,
    pub dq: Vec<Real>,
    pub ddq: Vec<Real>,
    /// Measured joint torques, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tau: Option<Vec<Real>>,
}

/// One measurement sample, validated against the joint count.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub q: DVector<Real>,
    pub dq: DVector<Real>,
    pub ddq: DVector<Real>,
    pub tau: Option<DVector<Real>>,
}

impl Sample {
    pub fn as_joint_sample(&self) -> JointSample<'_> {
        JointSample::new(&self.q, &self.dq, &self.ddq)
    }

    fn from_record(index: usize, record: SampleRecord, joint_count: usize) -> IdentResult<Self> {
        let check = |what: &'static str, values: &[Real]| {
            if values.len() == joint_count {
                Ok(())
            } else {
                Err(IdentError::SampleLength {
                    sample: index,
                    what,
                    expected: joint_count,
                    found: values.len(),
                })
            }
        };
        check("q", &record.q)?;
        check("dq", &record.dq)?;
        check("ddq", &record.ddq)?;
        if let Some(tau) = &record.tau {
            check("tau", tau)?;
        }

        Ok(Self {
            q: DVector::from_vec(record.q),
            dq: DVector::from_vec(record.dq),
            ddq: DVector::from_vec(record.ddq),
            tau: record.tau.map(DVector::from_vec),
        })
    }
}

/// Ordered samples for one joint set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    joint_count: usize,
    samples: Vec<Sample>,
}

impl Dataset {
    /// Validate every record against `joint_count`.
    pub fn from_records(records: Vec<SampleRecord>, joint_count: usize) -> IdentResult<Self> {
        let samples = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Sample::from_record(i, record, joint_count))
            .collect::<IdentResult<Vec<_>>>()?;
        Ok(Self {
            joint_count,
            samples,
        })
    }

    /// Parse a YAML sequence of `{q, dq, ddq, tau?}` records.
    pub fn from_yaml_str(content: &str, joint_count: usize) -> IdentResult<Self> {
        let records: Vec<SampleRecord> = serde_yaml::from_str(content)?;
        Self::from_records(records, joint_count)
    }

    pub fn from_json_str(content: &str, joint_count: usize) -> IdentResult<Self> {
        let records: Vec<SampleRecord> = serde_json::from_str(content)?;
        Self::from_records(records, joint_count)
    }

    /// Load by file extension: `.json` is read as JSON, everything else as YAML.
    pub fn load(path: &std::path::Path, joint_count: usize) -> IdentResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content, joint_count),
            _ => Self::from_yaml_str(&content, joint_count),
        }
    }

    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

fn check_dataset(model: &EffectModel, data: &Dataset) -> IdentResult<()> {
    if data.is_empty() {
        return Err(IdentError::EmptyDataset);
    }
    let n = model.joints().len();
    if data.joint_count() != n {
        return Err(IdentError::SampleLength {
            sample: 0,
            what: "joint vectors",
            expected: n,
            found: data.joint_count(),
        });
    }
    Ok(())
}

/// Stack per-sample regressors into the (K·N) × P identification matrix.
///
/// Rows `k·N .. (k+1)·N` hold sample `k`.
pub fn stack_regressor(model: &EffectModel, data: &Dataset) -> IdentResult<DMatrix<Real>> {
    check_dataset(model, data)?;
    let n = model.joints().len();
    let p = model.parameter_count();

    let blocks: Vec<DMatrix<Real>> = data
        .samples()
        .par_iter()
        .map(|sample| model.compute_regressor(sample.as_joint_sample()))
        .collect();

    let mut stacked = DMatrix::zeros(n * blocks.len(), p);
    for (k, block) in blocks.iter().enumerate() {
        stacked.rows_mut(k * n, n).copy_from(block);
    }

    debug!(
        samples = data.len(),
        rows = stacked.nrows(),
        cols = stacked.ncols(),
        "stacked regressor"
    );
    Ok(stacked)
}

/// Model torques for every sample, stacked like [`stack_regressor`].
pub fn stack_torque(model: &EffectModel, data: &Dataset) -> IdentResult<DVector<Real>> {
    check_dataset(model, data)?;
    let n = model.joints().len();

    let blocks: Vec<DVector<Real>> = data
        .samples()
        .par_iter()
        .map(|sample| model.compute_torque(sample.as_joint_sample()))
        .collect();

    let mut stacked = DVector::zeros(n * blocks.len());
    for (k, block) in blocks.iter().enumerate() {
        stacked.rows_mut(k * n, n).copy_from(block);
    }
    Ok(stacked)
}

/// Measured torques stacked like [`stack_regressor`]; every sample needs `tau`.
pub fn stack_measured(data: &Dataset) -> IdentResult<DVector<Real>> {
    if data.is_empty() {
        return Err(IdentError::EmptyDataset);
    }
    let n = data.joint_count();
    let mut stacked = DVector::zeros(n * data.len());
    for (k, sample) in data.samples().iter().enumerate() {
        let tau = sample
            .tau
            .as_ref()
            .ok_or(IdentError::MissingMeasurement { sample: k })?;
        stacked.rows_mut(k * n, n).copy_from(tau);
    }
    Ok(stacked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_vectors() {
        let yaml = "- {q: [0, 0], dq: [0], ddq: [0, 0]}\n";
        let err = Dataset::from_yaml_str(yaml, 2).unwrap_err();
        assert!(matches!(
            err,
            IdentError::SampleLength { sample: 0, what: "dq", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn measured_torque_is_optional_per_sample() {
        let yaml = "\
- {q: [0.0], dq: [1.0], ddq: [0.0], tau: [0.5]}
- {q: [0.0], dq: [1.0], ddq: [0.0]}
";
        let data = Dataset::from_yaml_str(yaml, 1).unwrap();
        assert_eq!(data.len(), 2);
        assert!(matches!(
            stack_measured(&data),
            Err(IdentError::MissingMeasurement { sample: 1 })
        ));
    }

    #[test]
    fn json_records() {
        let json = r#"[{"q": [1.0, 2.0], "dq": [0.0, 0.0], "ddq": [0.0, 0.0], "tau": [3.0, 4.0]}]"#;
        let data = Dataset::from_json_str(json, 2).unwrap();
        assert_eq!(stack_measured(&data).unwrap().as_slice(), &[3.0, 4.0]);
    }
}
