// ABOUTME: Handler behavior through the mock session: shapes, ordering, failure paths
// ABOUTME: Covers singleton/list/update/plan execution, release discipline and reporting

mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use common::{Cell, MockProvider, RecordingReporter, TestRow};
use snb_interactive_pg::errors::AdapterError;
use snb_interactive_pg::handlers::execute_operation;
use snb_interactive_pg::results::{
    ResultPayload, ShortQuery3PersonFriendsResult, ShortQuery5MessageCreatorResult,
};
use snb_interactive_pg::templates::OperationType;
use snb_interactive_pg::workload::{
    Operation, Query13, ShortQuery3PersonFriends, ShortQuery5MessageCreator, Update2AddPostLike,
    Update4AddForum,
};
use snb_interactive_pg::InteractiveAdapter;

fn short5_operation() -> Operation {
    Operation::ShortQuery5(ShortQuery5MessageCreator { message_id: 824 })
}

fn short5_row(person_id: i64, first: &str, last: &str) -> TestRow {
    TestRow(vec![
        Cell::I64(person_id),
        Cell::Str(first.to_string()),
        Cell::Str(last.to_string()),
    ])
}

fn update4_operation(tag_ids: Vec<i64>) -> Operation {
    Operation::Update4(Update4AddForum {
        forum_id: 53975,
        forum_title: "Album 0 of Jose".into(),
        creation_date: Utc.with_ymd_and_hms(2011, 1, 2, 23, 59, 29).unwrap(),
        moderator_person_id: 1564,
        tag_ids,
    })
}

const SHORT5: (&str, &str) =
    ("interactive-short-5", "SELECT id, first, last FROM creator WHERE m_messageid = $messageId");
const SHORT3: (&str, &str) =
    ("interactive-short-3", "SELECT id, first, last, since FROM friends WHERE p_personid = $personId");
const UPDATE2: (&str, &str) =
    ("interactive-update-2", "INSERT INTO likes VALUES ($personId, $postId, $creationDate)");
const FORUM: (&str, &str) = (
    "interactive-update-4-add-forum",
    "INSERT INTO forum VALUES ($forumId, $forumTitle, $creationDate, $moderatorPersonId)",
);
const FORUM_TAGS: (&str, &str) = (
    "interactive-update-4-add-forum-tags",
    "INSERT INTO forum_tag VALUES ($forumId, $tagId)",
);

#[tokio::test]
async fn singleton_with_no_rows_reports_an_empty_result() -> Result<()> {
    let (store, _dir) = common::store_with(&[SHORT5]);
    let provider = MockProvider::new();
    let mut reporter = RecordingReporter::default();

    execute_operation(&store, &provider, &mut reporter, &short5_operation()).await?;

    assert_eq!(reporter.calls.len(), 1);
    let (count, payload, _) = &reporter.calls[0];
    assert_eq!(*count, 0);
    assert_eq!(*payload, ResultPayload::ShortQuery5(None));
    assert_eq!(provider.releases(), 1);
    Ok(())
}

#[tokio::test]
async fn singleton_maps_the_single_row() -> Result<()> {
    let (store, _dir) = common::store_with(&[SHORT5]);
    let provider = MockProvider::with_rows(vec![short5_row(42, "Alice", "Smith")]);
    let mut reporter = RecordingReporter::default();

    execute_operation(&store, &provider, &mut reporter, &short5_operation()).await?;

    let (count, payload, _) = &reporter.calls[0];
    assert_eq!(*count, 1);
    assert_eq!(
        *payload,
        ResultPayload::ShortQuery5(Some(ShortQuery5MessageCreatorResult {
            person_id: 42,
            first_name: "Alice".into(),
            last_name: "Smith".into(),
        }))
    );
    // the rendered query carried the substituted message id
    assert!(provider.queries()[0].contains("m_messageid = 824"));
    Ok(())
}

#[tokio::test]
async fn singleton_takes_the_first_of_many_rows_without_error() -> Result<()> {
    let (store, _dir) = common::store_with(&[SHORT5]);
    let provider = MockProvider::with_rows(vec![
        short5_row(1, "First", "Wins"),
        short5_row(2, "Second", "Ignored"),
        short5_row(3, "Third", "Ignored"),
    ]);
    let mut reporter = RecordingReporter::default();

    execute_operation(&store, &provider, &mut reporter, &short5_operation()).await?;

    let (count, payload, _) = &reporter.calls[0];
    assert_eq!(*count, 1);
    match payload {
        ResultPayload::ShortQuery5(Some(record)) => assert_eq!(record.person_id, 1),
        other => panic!("unexpected payload {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn list_reports_rows_in_result_set_order() -> Result<()> {
    let (store, _dir) = common::store_with(&[SHORT3]);
    let rows = [(21, "Ayesha"), (4398, "Chen"), (16, "Otto")]
        .iter()
        .map(|(id, first)| {
            TestRow(vec![
                Cell::I64(*id),
                Cell::Str((*first).to_string()),
                Cell::Str("L".to_string()),
                Cell::Ts(1_296_000_000_000),
            ])
        })
        .collect();
    let provider = MockProvider::with_rows(rows);
    let mut reporter = RecordingReporter::default();
    let operation = Operation::ShortQuery3(ShortQuery3PersonFriends { person_id: 1 });

    execute_operation(&store, &provider, &mut reporter, &operation).await?;

    let (count, payload, _) = &reporter.calls[0];
    assert_eq!(*count, 3);
    let expected: Vec<ShortQuery3PersonFriendsResult> = [(21, "Ayesha"), (4398, "Chen"), (16, "Otto")]
        .iter()
        .map(|(id, first)| ShortQuery3PersonFriendsResult {
            person_id: *id,
            first_name: (*first).to_string(),
            last_name: "L".to_string(),
            friendship_creation_date: 1_296_000_000_000,
        })
        .collect();
    assert_eq!(*payload, ResultPayload::ShortQuery3(expected));
    Ok(())
}

#[tokio::test]
async fn single_statement_update_acknowledges_with_zero_count() -> Result<()> {
    let (store, _dir) = common::store_with(&[UPDATE2]);
    let provider = MockProvider::new();
    let mut reporter = RecordingReporter::default();
    let operation = Operation::Update2(Update2AddPostLike {
        person_id: 1564,
        post_id: 824,
        creation_date: Utc.with_ymd_and_hms(2011, 1, 2, 12, 0, 0).unwrap(),
    });

    execute_operation(&store, &provider, &mut reporter, &operation).await?;

    assert_eq!(
        reporter.calls,
        vec![(0, ResultPayload::NoResult, "Update2AddPostLike".to_string())]
    );
    assert_eq!(
        provider.statements(),
        vec!["INSERT INTO likes VALUES (1564, 824, '2011-01-02 12:00:00.000+00')".to_string()]
    );
    assert_eq!(provider.releases(), 1);
    Ok(())
}

#[tokio::test]
async fn plan_statements_execute_in_order_on_one_session() -> Result<()> {
    let (store, _dir) = common::store_with(&[FORUM, FORUM_TAGS]);
    let provider = MockProvider::new();
    let mut reporter = RecordingReporter::default();

    execute_operation(&store, &provider, &mut reporter, &update4_operation(vec![206, 61])).await?;

    let statements = provider.statements();
    assert_eq!(statements.len(), 3);
    assert!(statements[0].starts_with("INSERT INTO forum VALUES (53975::bigint,"));
    assert_eq!(statements[1], "INSERT INTO forum_tag VALUES (53975::bigint, 206)");
    assert_eq!(statements[2], "INSERT INTO forum_tag VALUES (53975::bigint, 61)");
    assert_eq!(provider.releases(), 1);
    assert_eq!(
        reporter.calls,
        vec![(0, ResultPayload::NoResult, "Update4AddForum".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn plan_stops_at_the_first_failing_statement() {
    let (store, _dir) = common::store_with(&[FORUM, FORUM_TAGS]);
    // statement 0 is the forum row; statement 1 (the first tag) fails
    let provider = MockProvider::new().failing_execute_at(1);
    let mut reporter = RecordingReporter::default();

    let err = execute_operation(&store, &provider, &mut reporter, &update4_operation(vec![206, 61]))
        .await
        .unwrap_err();

    // the error names the failing statement's template tag
    match err {
        AdapterError::Execution { tag, .. } => {
            assert_eq!(tag, OperationType::Update4AddForumTags);
        }
        other => panic!("unexpected error {other:?}"),
    }
    // statement 3 was never attempted, nothing was reported, and the
    // session still went back
    assert_eq!(provider.statements().len(), 2);
    assert!(reporter.calls.is_empty());
    assert_eq!(provider.releases(), 1);
}

#[tokio::test]
async fn missing_template_fails_before_anything_executes() {
    let (store, _dir) = common::store_with(&[FORUM]); // tag template absent
    let provider = MockProvider::new();
    let mut reporter = RecordingReporter::default();

    let err = execute_operation(&store, &provider, &mut reporter, &update4_operation(vec![206]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdapterError::TemplateMissing(OperationType::Update4AddForumTags)
    ));
    assert!(provider.statements().is_empty());
    assert_eq!(provider.releases(), 0);
    assert!(reporter.calls.is_empty());
}

#[tokio::test]
async fn release_failure_after_success_is_the_reported_error() {
    let (store, _dir) = common::store_with(&[UPDATE2]);
    let provider = MockProvider::new().failing_release();
    let mut reporter = RecordingReporter::default();
    let operation = Operation::Update2(Update2AddPostLike {
        person_id: 1,
        post_id: 2,
        creation_date: Utc.with_ymd_and_hms(2011, 1, 2, 12, 0, 0).unwrap(),
    });

    let err = execute_operation(&store, &provider, &mut reporter, &operation)
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::Release(_)));
    assert!(reporter.calls.is_empty());
}

#[tokio::test]
async fn release_failure_never_masks_an_execution_failure() {
    let (store, _dir) = common::store_with(&[FORUM, FORUM_TAGS]);
    let provider = MockProvider::new().failing_execute_at(0).failing_release();
    let mut reporter = RecordingReporter::default();

    let err = execute_operation(&store, &provider, &mut reporter, &update4_operation(vec![206]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdapterError::Execution {
            tag: OperationType::Update4AddForum,
            ..
        }
    ));
    assert_eq!(provider.releases(), 1);
}

#[tokio::test]
async fn adapter_facade_dispatches_like_the_free_function() -> Result<()> {
    let (store, _dir) = common::store_with(&[(
        "interactive-complex-13",
        "SELECT length FROM paths WHERE p1 = $person1Id AND p2 = $person2Id",
    )]);
    let provider = MockProvider::with_rows(vec![TestRow(vec![Cell::I32(4)])]);
    let log = provider.clone();
    let adapter = InteractiveAdapter::with_store(store, provider);
    let mut reporter = RecordingReporter::default();
    let operation = Operation::Query13(Query13 {
        person1_id: 10995,
        person2_id: 19791,
    });

    adapter.execute(&operation, &mut reporter).await?;

    assert_eq!(log.queries(), vec![
        "SELECT length FROM paths WHERE p1 = 10995 AND p2 = 19791".to_string()
    ]);
    assert_eq!(reporter.calls.len(), 1);
    Ok(())
}
