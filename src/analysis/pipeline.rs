//! The synchronous load pipeline.

use tracing::{debug, info, warn};

use crate::classify::{ClassificationRule, Classifier};
use crate::error::Result;
use crate::filter::EntryList;
use crate::graph::{flatten_external, CycleInfo, ImportGraph, ModuleIndex};
use crate::parser::{parse_records, SelfIdentity};
use crate::progress::ProgressSignal;
use crate::source::PackageSource;

/// Read-only snapshot produced by a load.
#[derive(Debug, Clone)]
pub struct LoadedDeps {
    /// The analyzed package and module
    pub identity: SelfIdentity,
    /// Package → imports
    pub forward: ImportGraph,
    /// Package → importers
    pub inverted: ImportGraph,
    /// Module roots and members
    pub modules: ModuleIndex,
    /// Classified external dependencies, sorted for display
    pub entries: EntryList,
    /// Import cycles present in the forward graph
    pub cycles: Vec<CycleInfo>,
}

impl LoadedDeps {
    /// The label used for the analysis root in headers and reports.
    pub fn root(&self) -> &str {
        self.identity.root()
    }
}

/// Loads, classifies and indexes the dependencies reported by `source`.
///
/// Stages run in order: record stream → flatten → standard library →
/// self identification → classification → inversion. Each stage name is
/// reported to `progress` when one is given. The producer's exit status is
/// checked as soon as its stream has been drained, so a failing producer is
/// reported before any follow-up query runs.
///
/// # Errors
///
/// Any source, parse or I/O failure aborts the load; there is no partial
/// result.
pub fn load_dependencies(
    source: &mut dyn PackageSource,
    rules: Vec<ClassificationRule>,
    progress: Option<&ProgressSignal>,
) -> Result<LoadedDeps> {
    let stage = |name: &str| {
        if let Some(progress) = progress {
            progress.set_stage(name);
        }
    };

    stage("go list");
    let parsed = parse_records(source.records()?)?;
    source.finish()?;
    let forward = parsed.forward;
    let modules = parsed.modules;
    info!(
        packages = forward.key_count(),
        imports = forward.edge_count(),
        modules = modules.root_count(),
        members = modules.member_count(),
        "import graph loaded"
    );

    let flat = flatten_external(&forward, &modules);
    debug!(external = flat.len(), "flattened external set");

    stage("standard library");
    let stdlib = source.standard_packages()?;

    stage("own module");
    let identity = source.self_identity()?;
    debug!(root = identity.root(), "analysis root");

    stage("classifications");
    let classifier = Classifier::new(rules, stdlib);
    let entries = EntryList::classify(
        flat.into_iter().filter(|pkg| !identity.is_self(pkg)),
        &classifier,
    );

    stage("import graph");
    let inverted = forward.inverted();
    let cycles = forward.detect_cycles();
    if !cycles.is_empty() {
        warn!(
            cycles = cycles.len(),
            "import graph contains cycles; some import paths will be truncated"
        );
    }

    info!(dependencies = entries.len(), "load complete");

    Ok(LoadedDeps {
        identity,
        forward,
        inverted,
        modules,
        entries,
        cycles,
    })
}
