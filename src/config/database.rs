//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    Compensation, Employee, EmployeeComponent, PayComponent, PayrollEntry, PayrollLine,
    PayrollPeriod, PenaltySettings, Shift, TimeLog,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/shiftpay.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. Tables are created in dependency order (referenced tables first).
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let employee_table = schema.create_table_from_entity(Employee);
    let shift_table = schema.create_table_from_entity(Shift);
    let time_log_table = schema.create_table_from_entity(TimeLog);
    let compensation_table = schema.create_table_from_entity(Compensation);
    let pay_component_table = schema.create_table_from_entity(PayComponent);
    let employee_component_table = schema.create_table_from_entity(EmployeeComponent);
    let penalty_settings_table = schema.create_table_from_entity(PenaltySettings);
    let payroll_period_table = schema.create_table_from_entity(PayrollPeriod);
    let payroll_entry_table = schema.create_table_from_entity(PayrollEntry);
    let payroll_line_table = schema.create_table_from_entity(PayrollLine);

    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&shift_table)).await?;
    db.execute(builder.build(&time_log_table)).await?;
    db.execute(builder.build(&compensation_table)).await?;
    db.execute(builder.build(&pay_component_table)).await?;
    db.execute(builder.build(&employee_component_table)).await?;
    db.execute(builder.build(&penalty_settings_table)).await?;
    db.execute(builder.build(&payroll_period_table)).await?;
    db.execute(builder.build(&payroll_entry_table)).await?;
    db.execute(builder.build(&payroll_line_table)).await?;

    Ok(())
}
