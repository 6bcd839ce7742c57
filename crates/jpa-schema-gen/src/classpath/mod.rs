//! Execution context assembly.
//!
//! The generation call must be able to resolve project classes that are not
//! visible to this tool's own context. [`ExecutionContext::build`] collects
//! the host build's compiled output and dependency locations into an
//! ordered, deduplicated element list; anything the context cannot resolve
//! falls through to the ambient (caller's) context.
//!
//! Context assembly is the only non-terminal failure in the pipeline: if an
//! element cannot be validated, the build degrades to the ambient context
//! with a warning instead of aborting the invocation.

use crate::config::{ArtifactScope, BuildConfig};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A single resolvable classpath location (directory or archive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathElement {
    path: PathBuf,
}

impl ClasspathElement {
    /// Validate and wrap a location. Fails when the location does not exist
    /// or cannot be inspected.
    pub fn new(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        std::fs::metadata(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Isolated class-resolution context for one generation call.
///
/// Elements are consulted in order; unresolved lookups fall through to the
/// ambient context. The ambient context itself is represented by an empty
/// element list. Owned exclusively by the invoker for the duration of one
/// call and never shared across concurrent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    elements: Vec<ClasspathElement>,
}

impl ExecutionContext {
    /// The caller's own context, with no extra elements layered on top.
    pub fn ambient() -> Self {
        Self { elements: Vec::new() }
    }

    /// Whether this context adds nothing over the ambient one.
    pub fn is_ambient(&self) -> bool {
        self.elements.is_empty()
    }

    /// Contributing elements in resolution order.
    pub fn elements(&self) -> &[ClasspathElement] {
        &self.elements
    }

    /// Assemble the context for a generation call from the host build data.
    ///
    /// Ordering: compile classpath, runtime classpath, compiled output
    /// directory, then declared dependency artifacts. Test-scoped artifacts
    /// are skipped and duplicate locations keep their first position. A
    /// failure while validating any element degrades the whole context to
    /// the ambient one; the invocation itself proceeds.
    pub fn build(build: &BuildConfig) -> Self {
        match Self::try_build(build) {
            Ok(context) => context,
            Err(e) => {
                warn!(
                    "Could not assemble the execution context ({e}); \
                     falling back to the ambient context - project classes may not resolve"
                );
                Self::ambient()
            }
        }
    }

    fn try_build(build: &BuildConfig) -> io::Result<Self> {
        let mut locations: Vec<&Path> = Vec::new();
        locations.extend(build.compile_classpath.iter().map(PathBuf::as_path));
        locations.extend(build.runtime_classpath.iter().map(PathBuf::as_path));
        locations.push(build.output_dir.as_path());

        for artifact in &build.dependencies {
            if artifact.scope == ArtifactScope::Test {
                debug!("Skipping test-scoped artifact: {}", artifact.path.display());
                continue;
            }
            locations.push(artifact.path.as_path());
        }

        let mut elements: Vec<ClasspathElement> = Vec::with_capacity(locations.len());
        for location in locations {
            if elements.iter().any(|e| e.path() == location) {
                continue;
            }
            let element = ClasspathElement::new(location)?;
            debug!("Classpath: {}", element.path().display());
            elements.push(element);
        }

        Ok(Self { elements })
    }
}
