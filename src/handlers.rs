// ABOUTME: The four execution shapes, the per-operation row mappers, and dispatch
// ABOUTME: Each invocation borrows one session, executes, maps rows, reports exactly once

use tracing::debug;

use crate::binder::{ParameterSet, QueryStore, RenderedStatement, StatementPlan};
use crate::converter::Converter;
use crate::errors::{AdapterError, AdapterResult, SourceError};
use crate::results::{
    Query1Result, Query2Result, Query3Result, Query4Result, Query5Result, Query6Result,
    Query7Result, Query8Result, Query9Result, Query10Result, Query11Result, Query12Result,
    Query13Result, Query14Result, ResultPayload, ResultReporter,
    ShortQuery1PersonProfileResult, ShortQuery2PersonPostsResult, ShortQuery3PersonFriendsResult,
    ShortQuery4MessageContentResult, ShortQuery5MessageCreatorResult,
    ShortQuery6MessageForumResult, ShortQuery7MessageRepliesResult,
};
use crate::session::{ResultRow, Session, SessionProvider};
use crate::templates::OperationType;
use crate::workload::Operation;

type RowOf<P> = <<P as SessionProvider>::Session as Session>::Row;

/// Execute one benchmark operation end to end: bind, render, run on a
/// freshly acquired session, map rows, report.
///
/// The operation set is closed, so dispatch is a `match` binding each
/// variant to its (binder, execution shape, row mapper) triple statically —
/// no type is inspected at runtime.
pub async fn execute_operation<P, C, Rep>(
    store: &QueryStore<C>,
    provider: &P,
    reporter: &mut Rep,
    operation: &Operation,
) -> AdapterResult<()>
where
    P: SessionProvider,
    C: Converter,
    Rep: ResultReporter,
{
    use OperationType as Tag;
    match operation {
        Operation::Query1(op) => {
            let params = store.query1(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery1, params, map_query1, ResultPayload::Query1).await
        }
        Operation::Query2(op) => {
            let params = store.query2(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery2, params, map_query2, ResultPayload::Query2).await
        }
        Operation::Query3(op) => {
            let params = store.query3(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery3, params, map_query3, ResultPayload::Query3).await
        }
        Operation::Query4(op) => {
            let params = store.query4(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery4, params, map_query4, ResultPayload::Query4).await
        }
        Operation::Query5(op) => {
            let params = store.query5(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery5, params, map_query5, ResultPayload::Query5).await
        }
        Operation::Query6(op) => {
            let params = store.query6(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery6, params, map_query6, ResultPayload::Query6).await
        }
        Operation::Query7(op) => {
            let params = store.query7(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery7, params, map_query7, ResultPayload::Query7).await
        }
        Operation::Query8(op) => {
            let params = store.query8(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery8, params, map_query8, ResultPayload::Query8).await
        }
        Operation::Query9(op) => {
            let params = store.query9(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery9, params, map_query9, ResultPayload::Query9).await
        }
        Operation::Query10(op) => {
            let params = store.query10(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery10, params, map_query10, ResultPayload::Query10).await
        }
        Operation::Query11(op) => {
            let params = store.query11(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery11, params, map_query11, ResultPayload::Query11).await
        }
        Operation::Query12(op) => {
            let params = store.query12(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery12, params, map_query12, ResultPayload::Query12).await
        }
        Operation::Query13(op) => {
            let params = store.query13(op);
            run_singleton(store, provider, reporter, operation, Tag::ComplexQuery13, params, map_query13, ResultPayload::Query13).await
        }
        Operation::Query14(op) => {
            let params = store.query14(op);
            run_list(store, provider, reporter, operation, Tag::ComplexQuery14, params, map_query14, ResultPayload::Query14).await
        }
        Operation::ShortQuery1(op) => {
            let params = store.short_query1(op);
            run_singleton(store, provider, reporter, operation, Tag::ShortQuery1, params, map_short_query1, ResultPayload::ShortQuery1).await
        }
        Operation::ShortQuery2(op) => {
            let params = store.short_query2(op);
            run_list(store, provider, reporter, operation, Tag::ShortQuery2, params, map_short_query2, ResultPayload::ShortQuery2).await
        }
        Operation::ShortQuery3(op) => {
            let params = store.short_query3(op);
            run_list(store, provider, reporter, operation, Tag::ShortQuery3, params, map_short_query3, ResultPayload::ShortQuery3).await
        }
        Operation::ShortQuery4(op) => {
            let params = store.short_query4(op);
            run_singleton(store, provider, reporter, operation, Tag::ShortQuery4, params, map_short_query4, ResultPayload::ShortQuery4).await
        }
        Operation::ShortQuery5(op) => {
            let params = store.short_query5(op);
            run_singleton(store, provider, reporter, operation, Tag::ShortQuery5, params, map_short_query5, ResultPayload::ShortQuery5).await
        }
        Operation::ShortQuery6(op) => {
            let params = store.short_query6(op);
            run_singleton(store, provider, reporter, operation, Tag::ShortQuery6, params, map_short_query6, ResultPayload::ShortQuery6).await
        }
        Operation::ShortQuery7(op) => {
            let params = store.short_query7(op);
            run_list(store, provider, reporter, operation, Tag::ShortQuery7, params, map_short_query7, ResultPayload::ShortQuery7).await
        }
        Operation::Update1(op) => {
            let plan = store.update1(op);
            run_plan(store, provider, reporter, operation, &plan).await
        }
        Operation::Update2(op) => {
            let params = store.update2(op);
            run_update(store, provider, reporter, operation, Tag::Update2, params).await
        }
        Operation::Update3(op) => {
            let params = store.update3(op);
            run_update(store, provider, reporter, operation, Tag::Update3, params).await
        }
        Operation::Update4(op) => {
            let plan = store.update4(op);
            run_plan(store, provider, reporter, operation, &plan).await
        }
        Operation::Update5(op) => {
            let params = store.update5(op);
            run_update(store, provider, reporter, operation, Tag::Update5, params).await
        }
        Operation::Update6(op) => {
            let plan = store.update6(op);
            run_plan(store, provider, reporter, operation, &plan).await
        }
        Operation::Update7(op) => {
            let plan = store.update7(op);
            run_plan(store, provider, reporter, operation, &plan).await
        }
        Operation::Update8(op) => {
            let params = store.update8(op);
            run_update(store, provider, reporter, operation, Tag::Update8, params).await
        }
    }
}

// -- execution shapes -------------------------------------------------------

/// Zero or more result rows, reported in result-set order.
#[allow(clippy::too_many_arguments)]
async fn run_list<P, C, Rep, T>(
    store: &QueryStore<C>,
    provider: &P,
    reporter: &mut Rep,
    operation: &Operation,
    tag: OperationType,
    params: ParameterSet,
    map_row: fn(&RowOf<P>) -> Result<T, SourceError>,
    wrap: fn(Vec<T>) -> ResultPayload,
) -> AdapterResult<()>
where
    P: SessionProvider,
    C: Converter,
    Rep: ResultReporter,
{
    let sql = store.render(tag, &params)?;
    let mut session = provider.acquire().await.map_err(AdapterError::Acquire)?;
    debug!(operation = operation.name(), query = %sql, "executing query");
    let outcome = query_mapped(&mut session, &sql, tag, map_row).await;
    let records = settle(session, outcome).await?;
    reporter.report(records.len(), wrap(records), operation);
    Ok(())
}

/// Zero or one result row. More than one row is not an error: the first row
/// wins and the surplus is noted at debug level.
#[allow(clippy::too_many_arguments)]
async fn run_singleton<P, C, Rep, T>(
    store: &QueryStore<C>,
    provider: &P,
    reporter: &mut Rep,
    operation: &Operation,
    tag: OperationType,
    params: ParameterSet,
    map_row: fn(&RowOf<P>) -> Result<T, SourceError>,
    wrap: fn(Option<T>) -> ResultPayload,
) -> AdapterResult<()>
where
    P: SessionProvider,
    C: Converter,
    Rep: ResultReporter,
{
    let sql = store.render(tag, &params)?;
    let mut session = provider.acquire().await.map_err(AdapterError::Acquire)?;
    debug!(operation = operation.name(), query = %sql, "executing query");
    let outcome = query_first(&mut session, &sql, operation, tag, map_row).await;
    let record = settle(session, outcome).await?;
    let count = usize::from(record.is_some());
    reporter.report(count, wrap(record), operation);
    Ok(())
}

/// One statement, no result rows; acknowledged with a zero count.
async fn run_update<P, C, Rep>(
    store: &QueryStore<C>,
    provider: &P,
    reporter: &mut Rep,
    operation: &Operation,
    tag: OperationType,
    params: ParameterSet,
) -> AdapterResult<()>
where
    P: SessionProvider,
    C: Converter,
    Rep: ResultReporter,
{
    let sql = store.render(tag, &params)?;
    let mut session = provider.acquire().await.map_err(AdapterError::Acquire)?;
    debug!(operation = operation.name(), query = %sql, "executing statement");
    let outcome = session
        .execute(&sql)
        .await
        .map_err(|source| AdapterError::Execution { tag, source });
    settle(session, outcome).await?;
    reporter.report(0, ResultPayload::NoResult, operation);
    Ok(())
}

/// A whole statement plan on one session, in plan order, stopping at the
/// first failure. The acknowledgment is reported only after every statement
/// succeeded; partial application is visible through the error's tag.
async fn run_plan<P, C, Rep>(
    store: &QueryStore<C>,
    provider: &P,
    reporter: &mut Rep,
    operation: &Operation,
    plan: &StatementPlan,
) -> AdapterResult<()>
where
    P: SessionProvider,
    C: Converter,
    Rep: ResultReporter,
{
    // Render everything up front: a missing template is a binding failure
    // and nothing may execute in that case.
    let statements = store.render_plan(plan)?;
    let mut session = provider.acquire().await.map_err(AdapterError::Acquire)?;
    let outcome = execute_statements(&mut session, operation, &statements).await;
    settle(session, outcome).await?;
    reporter.report(0, ResultPayload::NoResult, operation);
    Ok(())
}

async fn execute_statements<S: Session>(
    session: &mut S,
    operation: &Operation,
    statements: &[RenderedStatement],
) -> AdapterResult<()> {
    for statement in statements {
        debug!(
            operation = operation.name(),
            template = statement.tag.base_name(),
            query = %statement.sql,
            "executing statement"
        );
        session
            .execute(&statement.sql)
            .await
            .map_err(|source| AdapterError::Execution {
                tag: statement.tag,
                source,
            })?;
    }
    Ok(())
}

async fn query_mapped<S: Session, T>(
    session: &mut S,
    sql: &str,
    tag: OperationType,
    map_row: fn(&S::Row) -> Result<T, SourceError>,
) -> AdapterResult<Vec<T>> {
    let rows = session
        .query_rows(sql)
        .await
        .map_err(|source| AdapterError::Execution { tag, source })?;
    rows.iter()
        .map(|row| map_row(row).map_err(|source| AdapterError::RowDecode { tag, source }))
        .collect()
}

async fn query_first<S: Session, T>(
    session: &mut S,
    sql: &str,
    operation: &Operation,
    tag: OperationType,
    map_row: fn(&S::Row) -> Result<T, SourceError>,
) -> AdapterResult<Option<T>> {
    let rows = session
        .query_rows(sql)
        .await
        .map_err(|source| AdapterError::Execution { tag, source })?;
    if rows.len() > 1 {
        debug!(
            operation = operation.name(),
            rows = rows.len(),
            "singleton query matched more than one row; taking the first"
        );
    }
    rows.first()
        .map(|row| map_row(row).map_err(|source| AdapterError::RowDecode { tag, source }))
        .transpose()
}

/// Give the session back on every exit path. A release failure surfaces
/// only when the invocation itself succeeded; it never masks the earlier
/// execution failure.
async fn settle<S: Session, T>(session: S, outcome: AdapterResult<T>) -> AdapterResult<T> {
    let released = session.release().await;
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release_err)) => Err(AdapterError::Release(release_err)),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(release_err)) => {
            debug!(error = %release_err, "session release failed after an earlier failure");
            Err(err)
        }
    }
}

// -- row mappers ------------------------------------------------------------
//
// Column order is fixed by the workload's result contract; access is by
// ordinal, and no re-sorting happens here.

fn map_query1<R: ResultRow>(row: &R) -> Result<Query1Result, SourceError> {
    Ok(Query1Result {
        friend_id: row.i64_at(0)?,
        friend_last_name: row.string_at(1)?,
        distance_from_person: row.i32_at(2)?,
        friend_birthday: row.timestamp_millis_at(3)?,
        friend_creation_date: row.timestamp_millis_at(4)?,
        friend_gender: row.string_at(5)?,
        friend_browser_used: row.string_at(6)?,
        friend_location_ip: row.string_at(7)?,
        friend_emails: row.string_list_at(8)?,
        friend_languages: row.string_list_at(9)?,
        friend_city_name: row.string_at(10)?,
        friend_universities: row.organisations_at(11)?,
        friend_companies: row.organisations_at(12)?,
    })
}

fn map_query2<R: ResultRow>(row: &R) -> Result<Query2Result, SourceError> {
    Ok(Query2Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        message_id: row.i64_at(3)?,
        message_content: row.string_at(4)?,
        message_creation_date: row.timestamp_millis_at(5)?,
    })
}

fn map_query3<R: ResultRow>(row: &R) -> Result<Query3Result, SourceError> {
    Ok(Query3Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        x_count: row.i32_at(3)?,
        y_count: row.i32_at(4)?,
        count: row.i32_at(5)?,
    })
}

fn map_query4<R: ResultRow>(row: &R) -> Result<Query4Result, SourceError> {
    Ok(Query4Result {
        tag_name: row.string_at(0)?,
        post_count: row.i32_at(1)?,
    })
}

fn map_query5<R: ResultRow>(row: &R) -> Result<Query5Result, SourceError> {
    Ok(Query5Result {
        forum_title: row.string_at(0)?,
        post_count: row.i32_at(1)?,
    })
}

fn map_query6<R: ResultRow>(row: &R) -> Result<Query6Result, SourceError> {
    Ok(Query6Result {
        tag_name: row.string_at(0)?,
        post_count: row.i32_at(1)?,
    })
}

fn map_query7<R: ResultRow>(row: &R) -> Result<Query7Result, SourceError> {
    Ok(Query7Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        like_creation_date: row.timestamp_millis_at(3)?,
        message_id: row.i64_at(4)?,
        message_content: row.string_at(5)?,
        minutes_latency: row.i32_at(6)?,
        is_new: row.bool_at(7)?,
    })
}

fn map_query8<R: ResultRow>(row: &R) -> Result<Query8Result, SourceError> {
    Ok(Query8Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        comment_creation_date: row.timestamp_millis_at(3)?,
        comment_id: row.i64_at(4)?,
        comment_content: row.string_at(5)?,
    })
}

fn map_query9<R: ResultRow>(row: &R) -> Result<Query9Result, SourceError> {
    Ok(Query9Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        message_id: row.i64_at(3)?,
        message_content: row.string_at(4)?,
        message_creation_date: row.timestamp_millis_at(5)?,
    })
}

fn map_query10<R: ResultRow>(row: &R) -> Result<Query10Result, SourceError> {
    Ok(Query10Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        common_interest_score: row.i32_at(3)?,
        person_gender: row.string_at(4)?,
        person_city_name: row.string_at(5)?,
    })
}

fn map_query11<R: ResultRow>(row: &R) -> Result<Query11Result, SourceError> {
    Ok(Query11Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        organization_name: row.string_at(3)?,
        organization_work_from_year: row.i32_at(4)?,
    })
}

fn map_query12<R: ResultRow>(row: &R) -> Result<Query12Result, SourceError> {
    Ok(Query12Result {
        person_id: row.i64_at(0)?,
        person_first_name: row.string_at(1)?,
        person_last_name: row.string_at(2)?,
        tag_names: row.string_list_at(3)?,
        reply_count: row.i32_at(4)?,
    })
}

fn map_query13<R: ResultRow>(row: &R) -> Result<Query13Result, SourceError> {
    Ok(Query13Result {
        shortest_path_length: row.i32_at(0)?,
    })
}

fn map_query14<R: ResultRow>(row: &R) -> Result<Query14Result, SourceError> {
    Ok(Query14Result {
        person_ids_in_path: row.id_list_at(0)?,
        path_weight: row.f64_at(1)?,
    })
}

fn map_short_query1<R: ResultRow>(row: &R) -> Result<ShortQuery1PersonProfileResult, SourceError> {
    Ok(ShortQuery1PersonProfileResult {
        first_name: row.string_at(0)?,
        last_name: row.string_at(1)?,
        birthday: row.timestamp_millis_at(2)?,
        location_ip: row.string_at(3)?,
        browser_used: row.string_at(4)?,
        city_id: row.i64_at(5)?,
        gender: row.string_at(6)?,
        creation_date: row.timestamp_millis_at(7)?,
    })
}

fn map_short_query2<R: ResultRow>(row: &R) -> Result<ShortQuery2PersonPostsResult, SourceError> {
    Ok(ShortQuery2PersonPostsResult {
        message_id: row.i64_at(0)?,
        message_content: row.string_at(1)?,
        message_creation_date: row.timestamp_millis_at(2)?,
        original_post_id: row.i64_at(3)?,
        original_post_author_id: row.i64_at(4)?,
        original_post_author_first_name: row.string_at(5)?,
        original_post_author_last_name: row.string_at(6)?,
    })
}

fn map_short_query3<R: ResultRow>(row: &R) -> Result<ShortQuery3PersonFriendsResult, SourceError> {
    Ok(ShortQuery3PersonFriendsResult {
        person_id: row.i64_at(0)?,
        first_name: row.string_at(1)?,
        last_name: row.string_at(2)?,
        friendship_creation_date: row.timestamp_millis_at(3)?,
    })
}

fn map_short_query4<R: ResultRow>(row: &R) -> Result<ShortQuery4MessageContentResult, SourceError> {
    Ok(ShortQuery4MessageContentResult {
        message_content: row.string_at(0)?,
        message_creation_date: row.timestamp_millis_at(1)?,
    })
}

fn map_short_query5<R: ResultRow>(row: &R) -> Result<ShortQuery5MessageCreatorResult, SourceError> {
    Ok(ShortQuery5MessageCreatorResult {
        person_id: row.i64_at(0)?,
        first_name: row.string_at(1)?,
        last_name: row.string_at(2)?,
    })
}

fn map_short_query6<R: ResultRow>(row: &R) -> Result<ShortQuery6MessageForumResult, SourceError> {
    Ok(ShortQuery6MessageForumResult {
        forum_id: row.i64_at(0)?,
        forum_title: row.string_at(1)?,
        moderator_id: row.i64_at(2)?,
        moderator_first_name: row.string_at(3)?,
        moderator_last_name: row.string_at(4)?,
    })
}

fn map_short_query7<R: ResultRow>(row: &R) -> Result<ShortQuery7MessageRepliesResult, SourceError> {
    Ok(ShortQuery7MessageRepliesResult {
        comment_id: row.i64_at(0)?,
        comment_content: row.string_at(1)?,
        comment_creation_date: row.timestamp_millis_at(2)?,
        reply_author_id: row.i64_at(3)?,
        reply_author_first_name: row.string_at(4)?,
        reply_author_last_name: row.string_at(5)?,
        reply_author_knows_original_message_author: row.bool_at(6)?,
    })
}
