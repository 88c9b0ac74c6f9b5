//! Built-in query property vocabularies.
//!
//! Each domain module exposes its domain name and the logical property
//! names as constants. The names are part of the public API: renaming one
//! breaks every consumer that sorts or filters by it.

use super::{PropertyCatalog, QueryProperty, QueryPropertyRegistry};
use lazy_static::lazy_static;

pub mod external_task {
    pub const DOMAIN: &str = "externalTask";

    pub const ID: &str = "ID";
    pub const LOCK_EXPIRATION_TIME: &str = "LOCK_EXPIRATION_TIME";
    pub const PROCESS_INSTANCE_ID: &str = "PROCESS_INSTANCE_ID";
    pub const PROCESS_DEFINITION_ID: &str = "PROCESS_DEFINITION_ID";
    pub const PROCESS_DEFINITION_KEY: &str = "PROCESS_DEFINITION_KEY";
    pub const TENANT_ID: &str = "TENANT_ID";
    pub const PRIORITY: &str = "PRIORITY";
    pub const CREATE_TIME: &str = "CREATE_TIME";

    pub(super) const PROPERTIES: &[(&str, &str)] = &[
        (ID, "ID_"),
        (LOCK_EXPIRATION_TIME, "LOCK_EXP_TIME_"),
        (PROCESS_INSTANCE_ID, "PROC_INST_ID_"),
        (PROCESS_DEFINITION_ID, "PROC_DEF_ID_"),
        (PROCESS_DEFINITION_KEY, "PROC_DEF_KEY_"),
        (TENANT_ID, "TENANT_ID_"),
        (PRIORITY, "PRIORITY_"),
        (CREATE_TIME, "CREATE_TIME_"),
    ];
}

pub mod historic_job_log {
    pub const DOMAIN: &str = "historicJobLog";

    pub const ID: &str = "ID";
    pub const TIMESTAMP: &str = "TIMESTAMP";
    pub const JOB_ID: &str = "JOB_ID";
    pub const JOB_DEFINITION_ID: &str = "JOB_DEFINITION_ID";
    pub const ACTIVITY_ID: &str = "ACTIVITY_ID";
    pub const EXECUTION_ID: &str = "EXECUTION_ID";
    pub const PROCESS_INSTANCE_ID: &str = "PROCESS_INSTANCE_ID";
    pub const PROCESS_DEFINITION_ID: &str = "PROCESS_DEFINITION_ID";
    pub const PROCESS_DEFINITION_KEY: &str = "PROCESS_DEFINITION_KEY";
    pub const DEPLOYMENT_ID: &str = "DEPLOYMENT_ID";
    pub const DUEDATE: &str = "DUEDATE";
    pub const RETRIES: &str = "RETRIES";
    pub const PRIORITY: &str = "PRIORITY";
    pub const SEQUENCE_COUNTER: &str = "SEQUENCE_COUNTER";
    pub const TENANT_ID: &str = "TENANT_ID";
    pub const HOSTNAME: &str = "HOSTNAME";

    pub(super) const PROPERTIES: &[(&str, &str)] = &[
        (ID, "ID_"),
        (TIMESTAMP, "TIMESTAMP_"),
        (JOB_ID, "JOB_ID_"),
        (JOB_DEFINITION_ID, "JOB_DEF_ID_"),
        (ACTIVITY_ID, "ACT_ID_"),
        (EXECUTION_ID, "EXECUTION_ID_"),
        (PROCESS_INSTANCE_ID, "PROCESS_INSTANCE_ID_"),
        (PROCESS_DEFINITION_ID, "PROCESS_DEF_ID_"),
        (PROCESS_DEFINITION_KEY, "PROCESS_DEF_KEY_"),
        (DEPLOYMENT_ID, "DEPLOYMENT_ID_"),
        (DUEDATE, "JOB_DUEDATE_"),
        (RETRIES, "JOB_RETRIES_"),
        (PRIORITY, "JOB_PRIORITY_"),
        (SEQUENCE_COUNTER, "SEQUENCE_COUNTER_"),
        (TENANT_ID, "TENANT_ID_"),
        (HOSTNAME, "HOSTNAME_"),
    ];
}

pub mod historic_identity_link_log {
    pub const DOMAIN: &str = "historicIdentityLinkLog";

    pub const ID: &str = "ID";
    pub const TIME: &str = "TIME";
    pub const TYPE: &str = "TYPE";
    pub const USER_ID: &str = "USER_ID";
    pub const GROUP_ID: &str = "GROUP_ID";
    pub const TASK_ID: &str = "TASK_ID";
    pub const PROC_DEFINITION_ID: &str = "PROC_DEFINITION_ID";
    pub const PROC_DEFINITION_KEY: &str = "PROC_DEFINITION_KEY";
    pub const OPERATION_TYPE: &str = "OPERATION_TYPE";
    pub const ASSIGNER_ID: &str = "ASSIGNER_ID";
    pub const TENANT_ID: &str = "TENANT_ID";

    pub(super) const PROPERTIES: &[(&str, &str)] = &[
        (ID, "ID_"),
        (TIME, "TIMESTAMP_"),
        (TYPE, "TYPE_"),
        (USER_ID, "USER_ID_"),
        (GROUP_ID, "GROUP_ID_"),
        (TASK_ID, "TASK_ID_"),
        (PROC_DEFINITION_ID, "PROC_DEF_ID_"),
        (PROC_DEFINITION_KEY, "PROC_DEF_KEY_"),
        (OPERATION_TYPE, "OPERATION_TYPE_"),
        (ASSIGNER_ID, "ASSIGNER_ID_"),
        (TENANT_ID, "TENANT_ID_"),
    ];
}

pub mod historic_process_instance {
    pub const DOMAIN: &str = "historicProcessInstance";

    pub const PROCESS_INSTANCE_ID: &str = "PROCESS_INSTANCE_ID";
    pub const PROCESS_DEFINITION_ID: &str = "PROCESS_DEFINITION_ID";
    pub const PROCESS_DEFINITION_KEY: &str = "PROCESS_DEFINITION_KEY";
    pub const PROCESS_DEFINITION_NAME: &str = "PROCESS_DEFINITION_NAME";
    pub const PROCESS_DEFINITION_VERSION: &str = "PROCESS_DEFINITION_VERSION";
    pub const BUSINESS_KEY: &str = "BUSINESS_KEY";
    pub const START_TIME: &str = "START_TIME";
    pub const END_TIME: &str = "END_TIME";
    pub const DURATION: &str = "DURATION";
    pub const TENANT_ID: &str = "TENANT_ID";

    pub(super) const PROPERTIES: &[(&str, &str)] = &[
        (PROCESS_INSTANCE_ID, "PROC_INST_ID_"),
        (PROCESS_DEFINITION_ID, "PROC_DEF_ID_"),
        (PROCESS_DEFINITION_KEY, "PROC_DEF_KEY_"),
        (PROCESS_DEFINITION_NAME, "NAME_"),
        (PROCESS_DEFINITION_VERSION, "VERSION_"),
        (BUSINESS_KEY, "BUSINESS_KEY_"),
        (START_TIME, "START_TIME_"),
        (END_TIME, "END_TIME_"),
        (DURATION, "DURATION_"),
        (TENANT_ID, "TENANT_ID_"),
    ];
}

pub mod task {
    pub const DOMAIN: &str = "task";

    pub const TASK_ID: &str = "TASK_ID";
    pub const NAME: &str = "NAME";
    pub const NAME_CASE_INSENSITIVE: &str = "NAME_CASE_INSENSITIVE";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const PRIORITY: &str = "PRIORITY";
    pub const ASSIGNEE: &str = "ASSIGNEE";
    pub const CREATE_TIME: &str = "CREATE_TIME";
    pub const LAST_UPDATED: &str = "LAST_UPDATED";
    pub const PROCESS_INSTANCE_ID: &str = "PROCESS_INSTANCE_ID";
    pub const CASE_INSTANCE_ID: &str = "CASE_INSTANCE_ID";
    pub const EXECUTION_ID: &str = "EXECUTION_ID";
    pub const CASE_EXECUTION_ID: &str = "CASE_EXECUTION_ID";
    pub const DUE_DATE: &str = "DUE_DATE";
    pub const FOLLOW_UP_DATE: &str = "FOLLOW_UP_DATE";
    pub const TENANT_ID: &str = "TENANT_ID";

    pub(super) const PROPERTIES: &[(&str, &str)] = &[
        (TASK_ID, "ID_"),
        (NAME, "NAME_"),
        (DESCRIPTION, "DESCRIPTION_"),
        (PRIORITY, "PRIORITY_"),
        (ASSIGNEE, "ASSIGNEE_"),
        (CREATE_TIME, "CREATE_TIME_"),
        (LAST_UPDATED, "LAST_UPDATED_"),
        (PROCESS_INSTANCE_ID, "PROC_INST_ID_"),
        (CASE_INSTANCE_ID, "CASE_INST_ID_"),
        (EXECUTION_ID, "EXECUTION_ID_"),
        (CASE_EXECUTION_ID, "CASE_EXECUTION_ID_"),
        (DUE_DATE, "DUE_DATE_"),
        (FOLLOW_UP_DATE, "FOLLOW_UP_DATE_"),
        (TENANT_ID, "TENANT_ID_"),
    ];
}

fn build_registry(domain: &str, pairs: &[(&str, &str)]) -> QueryPropertyRegistry {
    QueryPropertyRegistry::from_pairs(domain, pairs.iter().copied())
        .expect("built-in vocabulary has unique, non-empty names")
}

fn build_task_registry() -> QueryPropertyRegistry {
    let mut builder = QueryPropertyRegistry::builder(task::DOMAIN);
    for (name, locator) in task::PROPERTIES {
        builder = builder
            .register(name, locator)
            .expect("built-in task vocabulary has unique names");
    }
    builder
        .register_property(
            QueryProperty::new(task::NAME_CASE_INSENSITIVE, "NAME_").with_function("LOWER"),
        )
        .expect("built-in task vocabulary has unique names")
        .build()
}

fn build_builtin_catalog() -> PropertyCatalog {
    [
        build_registry(external_task::DOMAIN, external_task::PROPERTIES),
        build_registry(historic_job_log::DOMAIN, historic_job_log::PROPERTIES),
        build_registry(
            historic_identity_link_log::DOMAIN,
            historic_identity_link_log::PROPERTIES,
        ),
        build_registry(
            historic_process_instance::DOMAIN,
            historic_process_instance::PROPERTIES,
        ),
        build_task_registry(),
    ]
    .into_iter()
    .try_fold(PropertyCatalog::new(), PropertyCatalog::with_domain)
    .expect("built-in domains are distinct")
}

lazy_static! {
    static ref BUILTIN_CATALOG: PropertyCatalog = build_builtin_catalog();
}

impl PropertyCatalog {
    /// Process-wide catalog of the engine's built-in query domains.
    pub fn builtin() -> &'static PropertyCatalog {
        &BUILTIN_CATALOG
    }
}
