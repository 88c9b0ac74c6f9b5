/// Query property registry tests
///
/// Resolution, enumeration and ordering over the built-in vocabulary and
/// host-registered domains.
/// Run with: cargo test --test property_registry_tests

use bpm_query_core::query::render_order_by;
use bpm_query_core::query::vocabulary::{external_task, historic_job_log, task};
use bpm_query_core::{
    EngineConfig, EngineError, PropertyCatalog, QueryEngine, QueryOrdering, QueryProperty,
    QueryPropertyRegistry,
};
use std::sync::Arc;
use std::thread;

#[test]
fn test_resolve_external_task_properties() {
    let engine = QueryEngine::builder(EngineConfig::new()).build().unwrap();

    assert_eq!(engine.resolve_property("externalTask", "ID").unwrap(), "ID_");
    assert_eq!(
        engine.resolve_property("externalTask", "PRIORITY").unwrap(),
        "PRIORITY_"
    );
    assert_eq!(
        engine
            .resolve_property("externalTask", "LOCK_EXPIRATION_TIME")
            .unwrap(),
        "LOCK_EXP_TIME_"
    );
}

#[test]
fn test_every_listed_property_resolves_to_its_locator() {
    let catalog = PropertyCatalog::builtin();
    let mut checked = 0;

    for domain in catalog.list_domains() {
        let properties = catalog.list_properties(domain).unwrap();
        assert!(!properties.is_empty(), "domain {} has no properties", domain);

        for property in properties {
            assert_eq!(
                catalog.resolve(domain, property.name()).unwrap(),
                property.locator(),
                "{}.{} resolved to the wrong locator",
                domain,
                property.name()
            );
            checked += 1;
        }
    }

    assert!(checked > 0);
}

#[test]
fn test_lookup_is_case_sensitive() {
    let catalog = PropertyCatalog::builtin();
    let err = catalog.resolve(external_task::DOMAIN, "priority").unwrap_err();

    match err {
        EngineError::UnknownProperty { domain, name } => {
            assert_eq!(domain, "externalTask");
            assert_eq!(name, "priority");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_property_names_domain_in_message() {
    let err = PropertyCatalog::builtin()
        .resolve(historic_job_log::DOMAIN, "NOT_A_PROPERTY")
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("historicJobLog"));
    assert!(message.contains("NOT_A_PROPERTY"));
}

#[test]
fn test_same_name_resolves_per_domain() {
    let catalog = PropertyCatalog::builtin();
    assert_eq!(
        catalog.resolve(external_task::DOMAIN, "PRIORITY").unwrap(),
        "PRIORITY_"
    );
    assert_eq!(
        catalog.resolve(historic_job_log::DOMAIN, "PRIORITY").unwrap(),
        "JOB_PRIORITY_"
    );
}

#[test]
fn test_enumeration_follows_registration_order() {
    let properties = PropertyCatalog::builtin()
        .list_properties(external_task::DOMAIN)
        .unwrap();
    let names: Vec<&str> = properties.iter().map(QueryProperty::name).collect();

    assert_eq!(names.first(), Some(&external_task::ID));
    assert_eq!(names.len(), 8);
    let id_pos = names.iter().position(|n| *n == external_task::ID).unwrap();
    let priority_pos = names
        .iter()
        .position(|n| *n == external_task::PRIORITY)
        .unwrap();
    assert!(id_pos < priority_pos);

    // Enumeration is stable across calls.
    let again = PropertyCatalog::builtin()
        .list_properties(external_task::DOMAIN)
        .unwrap();
    assert_eq!(properties, again);
}

#[test]
fn test_builtin_domains() {
    let domains = PropertyCatalog::builtin().list_domains();
    assert_eq!(
        domains,
        vec![
            "externalTask",
            "historicJobLog",
            "historicIdentityLinkLog",
            "historicProcessInstance",
            "task"
        ]
    );
    assert!(!PropertyCatalog::builtin().domain_exists("deployment"));
}

#[test]
fn test_host_domain_does_not_touch_builtin_catalog() {
    let extended = PropertyCatalog::builtin()
        .clone()
        .register("batch", "ID", "ID_")
        .unwrap()
        .register("batch", "TENANT_ID", "TENANT_ID_")
        .unwrap();

    assert_eq!(extended.resolve("batch", "TENANT_ID").unwrap(), "TENANT_ID_");
    assert_eq!(extended.list_properties("batch").unwrap().len(), 2);
    assert!(!PropertyCatalog::builtin().domain_exists("batch"));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let result = QueryPropertyRegistry::builder("batch")
        .register("ID", "ID_")
        .and_then(|b| b.register("ID", "OTHER_ID_"));
    assert!(matches!(result, Err(EngineError::Configuration(_))));

    let catalog = PropertyCatalog::new().register("batch", "ID", "ID_").unwrap();
    assert!(matches!(
        catalog.register("batch", "ID", "OTHER_"),
        Err(EngineError::Configuration(_))
    ));
}

#[test]
fn test_order_by_uses_locators_and_functions() {
    let catalog = PropertyCatalog::builtin();

    let clause = render_order_by(
        &[
            QueryOrdering::desc(external_task::PRIORITY),
            QueryOrdering::asc(external_task::ID),
        ],
        catalog.domain(external_task::DOMAIN).unwrap(),
        Some("RES"),
    )
    .unwrap();
    assert_eq!(clause, "RES.PRIORITY_ desc, RES.ID_ asc");

    let clause = render_order_by(
        &[QueryOrdering::asc(task::NAME_CASE_INSENSITIVE)],
        catalog.domain(task::DOMAIN).unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(clause, "LOWER(NAME_) asc");
}

#[test]
fn test_order_by_unknown_property_fails() {
    let err = render_order_by(
        &[QueryOrdering::asc("NOPE")],
        PropertyCatalog::builtin()
            .domain(external_task::DOMAIN)
            .unwrap(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::UnknownProperty { .. }));
}

#[test]
fn test_orderings_persist_by_property_name() {
    let orderings = vec![
        QueryOrdering::desc(external_task::PRIORITY),
        QueryOrdering::asc(external_task::CREATE_TIME),
    ];
    let json = serde_json::to_string(&orderings).unwrap();
    assert!(json.contains("\"PRIORITY\""));
    assert!(!json.contains("PRIORITY_"));

    let restored: Vec<QueryOrdering> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, orderings);
}

#[test]
fn test_concurrent_lookups() {
    let catalog = Arc::new(PropertyCatalog::builtin().clone());
    let mut handles = vec![];

    for thread_id in 0..8 {
        let catalog = Arc::clone(&catalog);
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                let locator = catalog
                    .resolve(historic_job_log::DOMAIN, historic_job_log::PRIORITY)
                    .unwrap();
                assert_eq!(locator, "JOB_PRIORITY_", "Thread {} saw wrong locator", thread_id);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
