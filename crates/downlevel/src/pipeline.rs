//! The build pipeline: resolve once, look up features once per family, then
//! lower every unit on the worker pool.

use downlevel_compat::CompatibilityMatrix;
use downlevel_core::{
    Downleveler, FeatureSet, SourceUnit, SyntaxFamily, TransformError, TransformResult,
};
use downlevel_script::ScriptDownleveler;
use downlevel_style::StyleDownleveler;
use downlevel_target::{TargetSpec, resolve};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, error, info};

use crate::config::BuildConfig;
use crate::error::{Error, Result};

/// Outcome of one unit, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub name: String,
    pub family: SyntaxFamily,
    pub result: std::result::Result<TransformResult, TransformError>,
}

impl UnitOutcome {
    fn unchanged(unit: &SourceUnit) -> Self {
        Self {
            name: unit.name.clone(),
            family: unit.family,
            result: Ok(TransformResult::unchanged(unit.source.as_str())),
        }
    }
}

/// Everything a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    units: Vec<UnitOutcome>,
}

impl BuildOutput {
    /// Per-unit outcomes, in the order the units were given.
    pub fn results(&self) -> &[UnitOutcome] {
        &self.units
    }

    pub fn errors(&self) -> impl Iterator<Item = &TransformError> {
        self.units.iter().filter_map(|unit| unit.result.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The transformed units, or the first unit error.
    pub fn into_results(self) -> Result<Vec<TransformResult>> {
        self.units
            .into_iter()
            .map(|unit| unit.result.map_err(Error::from))
            .collect()
    }
}

/// Runs builds against one configuration.
///
/// # Example
///
/// ```
/// use downlevel::{BuildConfig, Pipeline, SourceUnit};
///
/// let pipeline = Pipeline::new(BuildConfig::new("es2019"));
/// let output = pipeline
///     .run(&[SourceUnit::script("main.js", "let x = a ?? b;")])
///     .unwrap();
///
/// let results = output.into_results().unwrap();
/// assert_eq!(results[0].code, "let x = (a != null ? a : b);");
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: BuildConfig,
    matrix: CompatibilityMatrix,
}

impl Pipeline {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            matrix: CompatibilityMatrix::builtin(),
        }
    }

    /// Use different support data.
    pub fn with_matrix(mut self, matrix: CompatibilityMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Resolve the configured target. An absent target disables lowering.
    pub fn target(&self) -> Result<TargetSpec> {
        self.config.validate()?;
        let Some(raw) = &self.config.target else {
            return Ok(TargetSpec::Disabled);
        };
        resolve(raw).map_err(|err| {
            error!(error = %err, "invalid build target");
            Error::from(err)
        })
    }

    /// Lower every unit for the configured target.
    ///
    /// # Errors
    ///
    /// Fails before touching any unit if the target or configuration is
    /// invalid. Unit failures do not fail the build; they are reported in
    /// the returned [`BuildOutput`].
    pub fn run(&self, units: &[SourceUnit]) -> Result<BuildOutput> {
        let target = self.target()?;
        if target.is_disabled() {
            debug!(units = units.len(), "target disabled, passing units through");
            return Ok(BuildOutput {
                units: units.iter().map(UnitOutcome::unchanged).collect(),
            });
        }

        let features = self.family_features(&target, units);
        let lower = |(index, unit): (usize, &SourceUnit)| {
            let unsupported = features.get(&unit.family).copied().unwrap_or_default();
            let outcome = UnitOutcome {
                name: unit.name.clone(),
                family: unit.family,
                result: downleveler(unit.family).transform(unit, unsupported),
            };
            (index, outcome)
        };

        let mut tagged: Vec<(usize, UnitOutcome)> = match self.config.parallelism {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::WorkerPool(e.to_string()))?;
                pool.install(|| units.par_iter().enumerate().map(lower).collect())
            }
            None => units.par_iter().enumerate().map(lower).collect(),
        };
        tagged.sort_unstable_by_key(|(index, _)| *index);

        let output = BuildOutput {
            units: tagged.into_iter().map(|(_, outcome)| outcome).collect(),
        };
        info!(
            build_target = %target,
            units = output.len(),
            failed = output.errors().count(),
            "downlevel build finished"
        );
        Ok(output)
    }

    /// Unsupported features for each family that actually occurs.
    fn family_features(
        &self,
        target: &TargetSpec,
        units: &[SourceUnit],
    ) -> FxHashMap<SyntaxFamily, FeatureSet> {
        let mut features = FxHashMap::default();
        for unit in units {
            features.entry(unit.family).or_insert_with(|| {
                let set = self.matrix.unsupported_features(target, unit.family);
                debug!(family = %unit.family, features = ?set, "features to lower");
                set
            });
        }
        features
    }
}

fn downleveler(family: SyntaxFamily) -> &'static dyn Downleveler {
    match family {
        SyntaxFamily::Script => &ScriptDownleveler,
        SyntaxFamily::Style => &StyleDownleveler,
    }
}
