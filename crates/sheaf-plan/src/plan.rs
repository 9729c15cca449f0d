//! Build plan generation.
//!
//! Maps the discovered entry set onto one build job per entry. Jobs are
//! independent, sorted by entry name and never mutated after generation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheaf_config::{ExportMode, OutputFormat, SheafConfig};
use tracing::{debug, info};

use crate::diagnostics::DiagnosticPolicy;
use crate::discovery::Discovery;
use crate::entry::{Collision, EntryDescriptor, EntrySet};
use crate::error::Result;
use crate::rules::{PlanOptions, TransformRules};
use crate::stage::StageChain;

/// Complete description of one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildJob {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub exports: ExportMode,
    pub interop: bool,
    pub stages: StageChain,
    /// Policy the engine applies to warnings raised while running the job
    pub on_warn: DiagnosticPolicy,
}

/// Ordered list of build jobs handed to the build engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub root: PathBuf,
    pub out_dir: PathBuf,
    pub env: String,
    pub options: PlanOptions,
    pub jobs: Vec<BuildJob>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<Collision>,
}

impl BuildPlan {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn job(&self, name: &str) -> Option<&BuildJob> {
        self.jobs.iter().find(|j| j.name == name)
    }

    /// Output path of a job, resolved against the project root.
    pub fn artifact_path(&self, job: &BuildJob) -> PathBuf {
        self.root.join(&job.output)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output settings shared by every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub exports: ExportMode,
    pub interop: bool,
}

impl OutputSettings {
    pub fn from_config(config: &SheafConfig) -> Self {
        Self {
            out_dir: config.out_dir.clone(),
            format: config.format,
            exports: config.exports,
            interop: config.interop,
        }
    }
}

/// Turns entry descriptors into build jobs.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    output: OutputSettings,
    stages: StageChain,
    policy: DiagnosticPolicy,
}

impl PlanGenerator {
    /// Generator with an explicit stage chain.
    pub fn new(
        output: OutputSettings,
        stages: StageChain,
        policy: DiagnosticPolicy,
    ) -> Result<Self> {
        stages.validate()?;
        Ok(Self {
            output,
            stages,
            policy,
        })
    }

    /// Generator with the standard chain built from the project config.
    pub fn from_config(config: &SheafConfig, options: &PlanOptions) -> Result<Self> {
        let rules = TransformRules::resolve(&config.transform, options);
        let stages = StageChain::standard(rules.to_options(), &config.size.snapshot);
        Self::new(
            OutputSettings::from_config(config),
            stages,
            DiagnosticPolicy::from_config(&config.diagnostics),
        )
    }

    pub fn stages(&self) -> &StageChain {
        &self.stages
    }

    /// Build job for one entry.
    pub fn job(&self, entry: &EntryDescriptor) -> BuildJob {
        BuildJob {
            name: entry.name.clone(),
            input: entry.input(),
            output: self.output.out_dir.join(&entry.name),
            format: self.output.format,
            exports: self.output.exports,
            interop: self.output.interop,
            stages: self.stages.clone(),
            on_warn: self.policy.clone(),
        }
    }

    /// One job per entry, sorted by entry name.
    pub fn jobs(&self, entries: &EntrySet) -> Vec<BuildJob> {
        entries
            .sorted()
            .into_iter()
            .map(|entry| {
                let job = self.job(entry);
                debug!(
                    "job {}: {} -> {}",
                    job.name,
                    job.input.display(),
                    job.output.display()
                );
                job
            })
            .collect()
    }
}

/// Discover entries under `root` and generate the full plan.
pub fn plan_project(root: &Path, config: &SheafConfig, options: PlanOptions) -> Result<BuildPlan> {
    let entries = Discovery::from_config(root, config).discover_config(config)?;
    let generator = PlanGenerator::from_config(config, &options)?;
    let jobs = generator.jobs(&entries);

    info!(
        jobs = jobs.len(),
        collisions = entries.collisions().len(),
        "generated build plan"
    );

    Ok(BuildPlan {
        root: root.to_path_buf(),
        out_dir: config.out_dir.clone(),
        env: config.environment().to_string(),
        options,
        jobs,
        collisions: entries.collisions().to_vec(),
    })
}
