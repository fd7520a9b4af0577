//! Execute a compiled batch against the database.

use futures_util::TryStreamExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Either, Executor, Row, TypeInfo, ValueRef};

use query_engine_sql::sql::statement::{Batch, Statement};
use query_engine_sql::sql::string::Param;

use crate::database::ConnectionFactory;
use crate::error::Error;
use crate::response::{QueryResponse, RowDocument};

/// Run a batch as a single transaction and assemble the result document.
///
/// One connection is acquired for the whole batch and released exactly once
/// on every exit path: committed when every statement succeeded, rolled back
/// on the first failure (undoing the earlier statements of the same batch).
pub async fn execute(factory: &ConnectionFactory, batch: &Batch) -> Result<QueryResponse, Error> {
    let mut connection = factory.open(&batch.database).await?;

    let result = run_in_transaction(&mut connection, batch).await;

    if let Err(err) = connection.close().await {
        tracing::warn!("error closing connection: {}", err);
    }

    result
}

/// The explicit transaction scope around one batch. Commit or rollback is
/// chosen solely by whether every statement succeeded.
async fn run_in_transaction(
    connection: &mut SqliteConnection,
    batch: &Batch,
) -> Result<QueryResponse, Error> {
    let mut transaction = connection.begin().await.map_err(Error::Execute)?;

    let mut response = QueryResponse::default();
    let mut outcome = Ok(());

    for statement in &batch.statements {
        outcome = run_statement(&mut transaction, statement, &mut response).await;
        if outcome.is_err() {
            // the first failure aborts the remaining statements
            break;
        }
    }

    match outcome {
        Ok(()) => {
            transaction.commit().await.map_err(Error::Execute)?;
            response.success = true;
            Ok(response)
        }
        Err(err) => {
            if let Err(rollback_err) = transaction.rollback().await {
                tracing::error!("rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

/// Execute one statement and fold its requested outputs into the response.
async fn run_statement(
    transaction: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    statement: &Statement,
    response: &mut QueryResponse,
) -> Result<(), Error> {
    tracing::info!("executing: {}", statement.sql.sql);

    // a statement that wants rows back must actually produce a result set
    if statement.fetches_rows() {
        let description = (&mut **transaction)
            .describe(&statement.sql.sql)
            .await
            .map_err(Error::Execute)?;
        if description.columns().is_empty() {
            return Err(Error::QueryFailed);
        }
    }

    let mut query = sqlx::query(&statement.sql.sql);
    for param in &statement.sql.params {
        query = match param {
            Param::String(value) => query.bind(value.as_str()),
            Param::Null => query.bind(None::<String>),
        };
    }

    // one pass over the statement handle: rows as they are produced, then
    // the completion summary carrying the last insert id and affected count
    let mut rows: Vec<RowDocument> = vec![];
    let mut summary = None;
    {
        let mut stream = query.fetch_many(&mut **transaction);
        while let Some(step) = stream.try_next().await.map_err(Error::Execute)? {
            match step {
                Either::Left(done) => {
                    summary = Some((done.last_insert_rowid(), done.rows_affected()));
                }
                Either::Right(row) => {
                    if statement.fetches_rows() {
                        rows.push(row_document(&row)?);
                    }
                }
            }
        }
    }

    if statement.fetch_oid {
        if let Some((oid, _)) = summary {
            response.oid = Some(oid);
        }
    }
    if statement.fetch_count {
        if let Some((_, nb)) = summary {
            response.nb = Some(nb);
        }
    }
    if statement.fetch_one {
        response.row = Some(rows.into_iter().next().ok_or(Error::RowNotFound)?);
    } else if statement.fetch_all {
        response.rows = Some(rows);
    }

    Ok(())
}

/// Build the sparse row document: null-valued columns are omitted.
fn row_document(row: &SqliteRow) -> Result<RowDocument, Error> {
    let mut document = RowDocument::new();

    for column in row.columns() {
        let index = column.ordinal();
        let value = row.try_get_raw(index).map_err(Error::Execute)?;
        if value.is_null() {
            continue;
        }

        // SQLite values carry their own storage class at runtime
        let decoded = match value.type_info().name() {
            "INTEGER" => Value::from(row.try_get::<i64, _>(index).map_err(Error::Execute)?),
            "REAL" => Value::from(row.try_get::<f64, _>(index).map_err(Error::Execute)?),
            "BLOB" => {
                let bytes = row.try_get::<Vec<u8>, _>(index).map_err(Error::Execute)?;
                Value::from(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => Value::from(row.try_get::<String, _>(index).map_err(Error::Execute)?),
        };

        document.insert(column.name().to_string(), decoded);
    }

    Ok(document)
}
