//! Scoped invocation of the external schema generator.
//!
//! The generation call runs with an isolated execution context installed as
//! the thread's active resolution context. [`ContextGuard`] restores the
//! previously active context on every exit path, success or failure; later
//! build steps depend on the original context being intact.

use super::properties::GenerationProperties;
use crate::classpath::ExecutionContext;
use crate::error::{Result, SchemaGenError};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

/// Boxed error type produced at the generator boundary.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// The external schema-generation facility.
///
/// Accepts a unit name and the assembled property map, and emits SQL script
/// files as a side effect against the currently active resolution context.
/// Synchronous and blocking; there is no partial-success signal.
pub trait SchemaGenerator {
    fn generate_schema(
        &self,
        unit: &str,
        properties: &GenerationProperties,
    ) -> std::result::Result<(), GeneratorError>;
}

thread_local! {
    // Active resolution context of this thread; None means ambient.
    static ACTIVE_CONTEXT: RefCell<Option<Arc<ExecutionContext>>> = const { RefCell::new(None) };
}

/// The resolution context currently active on this thread, if any context
/// has been installed over the ambient one.
pub fn active_context() -> Option<Arc<ExecutionContext>> {
    ACTIVE_CONTEXT.with(|slot| slot.borrow().clone())
}

/// RAII guard installing an execution context as the thread's active one.
///
/// Dropping the guard restores whatever context was active before,
/// including on panic or error unwinding.
pub struct ContextGuard {
    previous: Option<Arc<ExecutionContext>>,
}

impl ContextGuard {
    /// Install `context` and remember the previously active one.
    pub fn install(context: Arc<ExecutionContext>) -> Self {
        let previous =
            ACTIVE_CONTEXT.with(|slot| slot.borrow_mut().replace(context));
        Self { previous }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        ACTIVE_CONTEXT.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

/// Invoke the generator exactly once inside a scoped context swap.
///
/// The previous context is restored before any failure is wrapped and
/// propagated as [`SchemaGenError::SchemaGeneration`].
pub fn invoke(
    generator: &dyn SchemaGenerator,
    unit: &str,
    properties: &GenerationProperties,
    context: Arc<ExecutionContext>,
) -> Result<()> {
    debug!(
        "Invoking schema generator for unit '{unit}' with {} classpath elements",
        context.elements().len()
    );

    let outcome = {
        let _guard = ContextGuard::install(context);
        generator.generate_schema(unit, properties)
    };

    outcome.map_err(|source| SchemaGenError::SchemaGeneration {
        unit: unit.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ScriptAction};
    use crate::generator::properties::assemble;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingGenerator {
        calls: AtomicUsize,
        fail: bool,
        saw_context: RefCell<Option<Option<Arc<ExecutionContext>>>>,
    }

    impl RecordingGenerator {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                saw_context: RefCell::new(None),
            }
        }
    }

    impl SchemaGenerator for RecordingGenerator {
        fn generate_schema(
            &self,
            _unit: &str,
            _properties: &GenerationProperties,
        ) -> std::result::Result<(), GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.saw_context.borrow_mut() = Some(active_context());
            if self.fail {
                Err("generator exploded".into())
            } else {
                Ok(())
            }
        }
    }

    fn properties() -> GenerationProperties {
        assemble(
            &DatabaseConfig {
                product_name: "H2".to_string(),
                major_version: String::new(),
                minor_version: String::new(),
            },
            ScriptAction::Create,
            Path::new("/tmp/drop.sql"),
            Path::new("/tmp/create.sql"),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_context_visible_inside_and_restored_after_success() {
        let before = active_context();
        let generator = RecordingGenerator::new(false);
        let context = Arc::new(ExecutionContext::ambient());

        invoke(&generator, "orders-pu", &properties(), context.clone()).unwrap();

        let seen = generator.saw_context.borrow().clone().unwrap();
        assert!(Arc::ptr_eq(&seen.unwrap(), &context));
        assert_eq!(
            active_context().map(|c| Arc::as_ptr(&c)),
            before.map(|c| Arc::as_ptr(&c))
        );
    }

    #[test]
    fn test_context_restored_after_failure() {
        let before = active_context();
        let generator = RecordingGenerator::new(true);

        let err = invoke(
            &generator,
            "orders-pu",
            &properties(),
            Arc::new(ExecutionContext::ambient()),
        )
        .unwrap_err();

        match err {
            SchemaGenError::SchemaGeneration { unit, source } => {
                assert_eq!(unit, "orders-pu");
                assert_eq!(source.to_string(), "generator exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            active_context().map(|c| Arc::as_ptr(&c)),
            before.map(|c| Arc::as_ptr(&c))
        );
    }

    #[test]
    fn test_generator_called_exactly_once() {
        let generator = RecordingGenerator::new(false);
        invoke(
            &generator,
            "orders-pu",
            &properties(),
            Arc::new(ExecutionContext::ambient()),
        )
        .unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_guards_restore_in_order() {
        let outer = Arc::new(ExecutionContext::ambient());
        let inner = Arc::new(ExecutionContext::ambient());

        let outer_guard = ContextGuard::install(outer.clone());
        {
            let _inner_guard = ContextGuard::install(inner.clone());
            assert!(Arc::ptr_eq(&active_context().unwrap(), &inner));
        }
        assert!(Arc::ptr_eq(&active_context().unwrap(), &outer));
        drop(outer_guard);
        assert!(active_context().is_none());
    }
}
