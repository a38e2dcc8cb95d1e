mod common;

use common::{
    configuration, contribution, contribution_type, contributor, repository, source, FixedClock,
    AUTHOR, NOW,
};
use contrib_core::db::{open_db_in_memory, DbError};
use contrib_core::{
    Audit, Configuration, Contribution, ContributionType, Contributor, CoreLog, ErrorKind,
    Record, RecordService, RecordStore, Repository, Source, SqliteStore, StoreError, Tier,
};
use rusqlite::{ffi, Connection};
use uuid::Uuid;

type SqlService<'a, R> = RecordService<R, SqliteStore<'a, R>, FixedClock, CoreLog>;

fn sql_service<R: contrib_core::repo::SqlRecord>(conn: &Connection) -> SqlService<'_, R> {
    RecordService::with_collaborators(
        SqliteStore::try_new(conn).unwrap(),
        FixedClock::at(NOW),
        CoreLog,
    )
}

/// Seeds a source, contributor, repository and contribution type.
fn seed_graph(conn: &Connection) -> (Source, Contributor, Repository, ContributionType) {
    let source = sql_service::<Source>(conn).add(source()).unwrap();
    let contributor = sql_service::<Contributor>(conn)
        .add(contributor(source.id))
        .unwrap();
    let repository = sql_service::<Repository>(conn)
        .add(repository(source.id))
        .unwrap();
    let kind = sql_service::<ContributionType>(conn)
        .add(contribution_type())
        .unwrap();
    (source, contributor, repository, kind)
}

#[test]
fn every_record_roundtrips_through_its_table() {
    let conn = open_db_in_memory().unwrap();
    let (source, contributor, repository, kind) = seed_graph(&conn);
    let config = sql_service::<Configuration>(&conn)
        .add(configuration())
        .unwrap();
    let mut work = contribution(repository.id, contributor.id, kind.id);
    work.external_merged_at = Some(NOW - 3_600_000);
    let work = sql_service::<Contribution>(&conn).add(work).unwrap();

    assert_eq!(sql_service::<Source>(&conn).retrieve_by_id(source.id).unwrap(), source);
    assert_eq!(
        sql_service::<Contributor>(&conn)
            .retrieve_by_id(contributor.id)
            .unwrap(),
        contributor
    );
    assert_eq!(
        sql_service::<Repository>(&conn)
            .retrieve_by_id(repository.id)
            .unwrap(),
        repository
    );
    assert_eq!(
        sql_service::<ContributionType>(&conn)
            .retrieve_by_id(kind.id)
            .unwrap(),
        kind
    );
    assert_eq!(
        sql_service::<Configuration>(&conn)
            .retrieve_by_id(config.id)
            .unwrap(),
        config
    );
    assert_eq!(
        sql_service::<Contribution>(&conn)
            .retrieve_by_id(work.id)
            .unwrap(),
        work
    );
}

#[test]
fn optional_columns_roundtrip_as_null() {
    let conn = open_db_in_memory().unwrap();
    let (source, _, _, _) = seed_graph(&conn);
    let mut record = repository(source.id);
    record.external_id = "42".to_string();
    record.description = None;
    record.is_private = true;

    let added = sql_service::<Repository>(&conn).add(record).unwrap();
    let loaded = sql_service::<Repository>(&conn)
        .retrieve_by_id(added.id)
        .unwrap();

    assert_eq!(loaded.description, None);
    assert!(loaded.is_private);
    assert!(!loaded.is_organization);
}

#[test]
fn duplicate_unique_key_is_already_exists() {
    let conn = open_db_in_memory().unwrap();
    let service = sql_service::<Source>(&conn);
    service.add(source()).unwrap();

    let err = service.add(source()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(err.tier(), Tier::DependencyValidation);
    assert!(matches!(
        err.store_error(),
        Some(StoreError::UniqueViolation(_))
    ));
    assert_eq!(
        err.diagnostic().and_then(|found| found.code),
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE)
    );
    assert_eq!(service.retrieve_all().unwrap().len(), 1);
}

#[test]
fn duplicate_id_is_already_exists() {
    let conn = open_db_in_memory().unwrap();
    let service = sql_service::<ContributionType>(&conn);
    let first = service.add(contribution_type()).unwrap();
    let mut second = contribution_type();
    second.id = first.id;
    second.name = "issue".to_string();

    let err = service.add(second).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn unknown_reference_is_invalid_reference() {
    let conn = open_db_in_memory().unwrap();

    let err = sql_service::<Contributor>(&conn)
        .add(contributor(Uuid::new_v4()))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidReference);
    assert!(matches!(
        err.store_error(),
        Some(StoreError::ReferenceViolation(_))
    ));
    assert_eq!(
        err.diagnostic().and_then(|found| found.code),
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
    );
}

#[test]
fn removing_referenced_record_is_invalid_reference() {
    let conn = open_db_in_memory().unwrap();
    let (_, contributor, repository, kind) = seed_graph(&conn);
    sql_service::<Contribution>(&conn)
        .add(contribution(repository.id, contributor.id, kind.id))
        .unwrap();

    let err = sql_service::<ContributionType>(&conn)
        .remove_by_id(kind.id)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidReference);
    assert!(sql_service::<ContributionType>(&conn)
        .retrieve_by_id(kind.id)
        .is_ok());
}

#[test]
fn modify_persists_changes_and_keeps_created_audit() {
    let conn = open_db_in_memory().unwrap();
    let service = sql_service::<Configuration>(&conn);
    let mut record = configuration();
    record.audit = Audit::created(AUTHOR, NOW - 30_000);
    let added = service.add(record).unwrap();

    let mut changed = added.clone();
    changed.value = "30m".to_string();
    changed.audit.touch("bob", NOW);
    service.modify(changed).unwrap();

    let loaded = service.retrieve_by_id(added.id).unwrap();
    assert_eq!(loaded.value, "30m");
    assert_eq!(loaded.audit.created_by, AUTHOR);
    assert_eq!(loaded.audit.created_date, NOW - 30_000);
    assert_eq!(loaded.audit.updated_by, "bob");
    assert_eq!(loaded.audit.updated_date, NOW);
}

#[test]
fn remove_by_id_deletes_row_and_reports_missing_afterwards() {
    let conn = open_db_in_memory().unwrap();
    let service = sql_service::<Source>(&conn);
    let added = service.add(source()).unwrap();

    assert_eq!(service.remove_by_id(added.id).unwrap(), added);

    let err = service.retrieve_by_id(added.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = service.remove_by_id(added.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn retrieve_all_orders_by_created_date() {
    let conn = open_db_in_memory().unwrap();
    let service = sql_service::<ContributionType>(&conn);
    let later = service
        .add(ContributionType::new("review", 2, Audit::created(AUTHOR, NOW)))
        .unwrap();
    let earlier = service
        .add(ContributionType::new(
            "issue",
            1,
            Audit::created(AUTHOR, NOW - 10_000),
        ))
        .unwrap();

    assert_eq!(service.retrieve_all().unwrap(), vec![earlier, later]);
}

#[test]
fn writes_to_vanished_rows_are_concurrency_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Source>::try_new(&conn).unwrap();
    let record = source();

    assert!(matches!(
        store.update(&record),
        Err(StoreError::ConcurrencyConflict { id }) if id == record.id
    ));
    assert!(matches!(
        store.delete(&record),
        Err(StoreError::ConcurrencyConflict { .. })
    ));
    assert_eq!(store.select_by_id(record.id).unwrap(), None);
}

#[test]
fn undecodable_row_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO sources (id, name, url, created_by, created_date, updated_by, updated_date)
         VALUES ('not-a-uuid', 'n', 'u', 'a', 1, 'a', 1);",
        [],
    )
    .unwrap();
    let service = sql_service::<Source>(&conn);

    let err = service.retrieve_all().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FailedService);
    assert!(matches!(err.store_error(), Some(StoreError::InvalidData(_))));
}

#[test]
fn store_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteStore::<Source>::try_new(&conn).err().unwrap();

    assert!(matches!(
        err,
        DbError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn record_kind_flows_into_errors() {
    let conn = open_db_in_memory().unwrap();

    let err = sql_service::<Repository>(&conn)
        .retrieve_by_id(Uuid::new_v4())
        .unwrap_err();

    assert_eq!(err.record(), Repository::KIND);
    assert!(err.to_string().starts_with("couldn't find repository"));
}
