/// Artifact factory tests
///
/// Instantiation of host-supplied types through the default and container
/// strategies, including concurrent use.
/// Run with: cargo test --test artifact_factory_tests

use bpm_query_core::{
    ArtifactFactory, ArtifactFactoryExt, ArtifactStrategy, ArtifactType, ArtifactTypeRegistry,
    ContainerArtifactFactory, DefaultArtifactFactory, EngineConfig, EngineError, QueryEngine,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct AuditListener {
    instance: u64,
}

impl Default for AuditListener {
    fn default() -> Self {
        Self {
            instance: NEXT_LISTENER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

/// Only constructible with a connection string.
#[derive(Debug)]
struct MailNotifier {
    endpoint: String,
}

#[derive(Debug, Default)]
struct RetryPolicy {
    attempts: u32,
}

#[test]
fn test_each_call_returns_new_instance() {
    let factory = DefaultArtifactFactory::new();

    let first = factory.create_default::<AuditListener>().unwrap();
    let second = factory.create_default::<AuditListener>().unwrap();
    assert_ne!(first.instance, second.instance);

    let first = Box::new(first);
    let second = Box::new(second);
    assert!(!std::ptr::eq(first.as_ref(), second.as_ref()));
}

#[test]
fn test_type_without_zero_arg_constructor_fails() {
    let factory = DefaultArtifactFactory::new();
    let err = factory
        .create::<MailNotifier>(&ArtifactType::opaque::<MailNotifier>())
        .unwrap_err();

    match err {
        EngineError::ArtifactCreation { artifact, reason } => {
            assert!(artifact.contains("MailNotifier"));
            assert!(reason.contains("constructor"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_descriptor_type_mismatch_fails() {
    let factory = DefaultArtifactFactory::new();
    let err = factory
        .create::<RetryPolicy>(&ArtifactType::of::<AuditListener>())
        .unwrap_err();
    assert!(matches!(err, EngineError::ArtifactCreation { .. }));
}

#[test]
fn test_create_by_configured_name() {
    let types = ArtifactTypeRegistry::new()
        .register(ArtifactType::of::<AuditListener>().named("audit"))
        .unwrap()
        .register(ArtifactType::of::<RetryPolicy>().named("retry"))
        .unwrap();
    let factory = DefaultArtifactFactory::new();

    let policy: RetryPolicy = factory.create_by_name(&types, "retry").unwrap();
    assert_eq!(policy.attempts, 0);

    assert!(matches!(
        factory.create_by_name::<RetryPolicy>(&types, "missing"),
        Err(EngineError::ArtifactCreation { .. })
    ));
}

#[test]
fn test_concurrent_creation_never_shares_instances() {
    let factory: Arc<dyn ArtifactFactory> = Arc::new(DefaultArtifactFactory::new());
    let mut handles = vec![];

    for _ in 0..8 {
        let factory = Arc::clone(&factory);
        handles.push(thread::spawn(move || {
            (0..100)
                .map(|_| factory.create_default::<AuditListener>().unwrap().instance)
                .collect::<Vec<_>>()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for instance in handle.join().unwrap() {
            assert!(seen.insert(instance), "instance {} was returned twice", instance);
        }
    }
    assert_eq!(seen.len(), 800);
}

#[test]
fn test_container_strategy_through_engine() {
    let container = ContainerArtifactFactory::new()
        .with_provider(|| MailNotifier {
            endpoint: "smtp://localhost:25".into(),
        })
        .with_singleton(Arc::new(RetryPolicy { attempts: 5 }));
    let engine = QueryEngine::builder(
        EngineConfig::new().artifact_strategy(ArtifactStrategy::Container),
    )
    .container(container)
    .build()
    .unwrap();
    let factory = engine.artifact_factory();

    let notifier = factory
        .create::<MailNotifier>(&ArtifactType::opaque::<MailNotifier>())
        .unwrap();
    assert_eq!(notifier.endpoint, "smtp://localhost:25");

    let a = factory
        .create::<Arc<RetryPolicy>>(&ArtifactType::opaque::<Arc<RetryPolicy>>())
        .unwrap();
    let b = factory
        .create::<Arc<RetryPolicy>>(&ArtifactType::opaque::<Arc<RetryPolicy>>())
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.attempts, 5);

    // No provider: falls back to default construction.
    let listener = factory.create_default::<AuditListener>().unwrap();
    assert!(listener.instance > 0);
}

#[test]
fn test_container_without_fallback_rejects_unknown_types() {
    let engine = QueryEngine::builder(
        EngineConfig::new()
            .artifact_strategy(ArtifactStrategy::Container)
            .container_fallback(false),
    )
    .container(ContainerArtifactFactory::new())
    .build()
    .unwrap();

    assert!(matches!(
        engine.artifact_factory().create_default::<AuditListener>(),
        Err(EngineError::ArtifactCreation { .. })
    ));
}

#[test]
fn test_explicit_factory_overrides_strategy() {
    let engine = QueryEngine::builder(EngineConfig::new())
        .artifact_factory(Arc::new(
            ContainerArtifactFactory::new().with_provider(|| RetryPolicy { attempts: 9 }),
        ))
        .build()
        .unwrap();

    let policy = engine
        .artifact_factory()
        .create_default::<RetryPolicy>()
        .unwrap();
    assert_eq!(policy.attempts, 9);
}
