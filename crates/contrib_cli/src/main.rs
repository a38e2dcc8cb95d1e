//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `contrib_core` linkage, configuration and storage bootstrap.
//! - Print deterministic per-record counts for quick local sanity checks.
//!
//! Usage: `contrib_cli [config.json]`

use contrib_core::db::{open_db, open_db_in_memory};
use contrib_core::{
    init_logging, ConfigurationService, ContributionService, ContributionTypeService,
    ContributorService, CoreConfig, Record, RecordService, RecordStore, RepositoryService,
    ServiceConfig, SourceService, SqliteStore,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("contrib_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = match &config.database_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    println!("contrib_core version={}", contrib_core::core_version());

    let service = &config.service;
    report("source", SourceService::new(SqliteStore::try_new(&conn)?), service)?;
    report(
        "configuration",
        ConfigurationService::new(SqliteStore::try_new(&conn)?),
        service,
    )?;
    report(
        "contribution_type",
        ContributionTypeService::new(SqliteStore::try_new(&conn)?),
        service,
    )?;
    report(
        "contributor",
        ContributorService::new(SqliteStore::try_new(&conn)?),
        service,
    )?;
    report(
        "repository",
        RepositoryService::new(SqliteStore::try_new(&conn)?),
        service,
    )?;
    report(
        "contribution",
        ContributionService::new(SqliteStore::try_new(&conn)?),
        service,
    )?;

    info!("event=cli_report module=cli status=ok");
    close(conn)
}

fn report<R, S>(name: &str, service: RecordService<R, S>, config: &ServiceConfig) -> CliResult<()>
where
    R: Record,
    S: RecordStore<R>,
{
    let records = service.with_config(config).retrieve_all()?;
    println!("{name} count={}", records.len());
    Ok(())
}

fn close(conn: Connection) -> CliResult<()> {
    conn.close().map_err(|(_, err)| err)?;
    Ok(())
}
