//! Transform stages and the ordered stage chain attached to every job.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{PlanError, Result};

/// What a stage does to the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    /// Rewrites bare module references into resolvable paths
    Resolve,
    /// Normalizes non-standard module shapes into the output format
    LegacyInterop,
    /// Source-language to target transformation driven by a rule set
    LanguageTransform,
    /// Measures the final artifact without altering it
    SizeReport,
}

impl StageKind {
    /// Kinds that must observe the fully transformed output.
    pub fn must_be_last(self) -> bool {
        matches!(self, StageKind::SizeReport)
    }
}

/// Position constraint of a stage within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Any,
    Last,
}

/// One named, ordered step in producing an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub name: String,
    pub kind: StageKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "is_empty_object")]
    pub options: Value,
}

fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl StageDescriptor {
    /// A stage with no options; size-report stages are constrained `last`.
    pub fn new(name: impl Into<String>, kind: StageKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: if kind.must_be_last() {
                Position::Last
            } else {
                Position::Any
            },
            options: Value::Object(Map::new()),
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// The declared constraint, tightened by the stage kind.
    pub fn effective_position(&self) -> Position {
        if self.kind.must_be_last() {
            Position::Last
        } else {
            self.position
        }
    }
}

/// Ordered, validated list of stages.
///
/// At most one stage may be constrained `last` and it must be the final
/// stage; stage names are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StageChain {
    stages: Vec<StageDescriptor>,
}

impl StageChain {
    pub fn new(stages: Vec<StageDescriptor>) -> Result<Self> {
        let chain = Self { stages };
        chain.validate()?;
        Ok(chain)
    }

    /// The standard chain: resolve, commonjs, babel, size-snapshot.
    ///
    /// `transform_options` becomes the options of the language-transform
    /// stage; `snapshot_path` is where the size-report stage records sizes.
    pub fn standard(transform_options: Value, snapshot_path: &Path) -> Self {
        Self {
            stages: vec![
                StageDescriptor::new("resolve", StageKind::Resolve),
                StageDescriptor::new("commonjs", StageKind::LegacyInterop),
                StageDescriptor::new("babel", StageKind::LanguageTransform)
                    .with_options(transform_options),
                StageDescriptor::new("size-snapshot", StageKind::SizeReport)
                    .with_options(json!({ "snapshot_path": snapshot_path.to_string_lossy() })),
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(PlanError::StageOrder("stage with an empty name".to_string()));
            }
            if !names.insert(stage.name.as_str()) {
                return Err(PlanError::StageOrder(format!(
                    "stage '{}' appears more than once",
                    stage.name
                )));
            }
        }

        let last_constrained: Vec<usize> = self
            .stages
            .iter()
            .enumerate()
            .filter(|(_, s)| s.effective_position() == Position::Last)
            .map(|(idx, _)| idx)
            .collect();

        if last_constrained.len() > 1 {
            let names: Vec<&str> = last_constrained
                .iter()
                .map(|&idx| self.stages[idx].name.as_str())
                .collect();
            return Err(PlanError::StageOrder(format!(
                "stages {} all require the last position",
                names.join(", ")
            )));
        }

        if let Some(&idx) = last_constrained.first() {
            if idx + 1 != self.stages.len() {
                return Err(PlanError::StageOrder(format!(
                    "stage '{}' must run last but is followed by '{}'",
                    self.stages[idx].name,
                    self.stages[idx + 1].name
                )));
            }
        }

        Ok(())
    }

    /// Append a stage, re-validating the chain.
    pub fn push(&mut self, stage: StageDescriptor) -> Result<()> {
        self.stages.push(stage);
        if let Err(e) = self.validate() {
            self.stages.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, kind: StageKind) -> Option<&StageDescriptor> {
        self.stages.iter().find(|s| s.kind == kind)
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }
}

impl<'de> Deserialize<'de> for StageChain {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stages = Vec::<StageDescriptor>::deserialize(deserializer)?;
        StageChain::new(stages).map_err(serde::de::Error::custom)
    }
}
