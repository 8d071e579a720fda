// ABOUTME: Typed result records mapped from result rows, one shape per read operation
// ABOUTME: ResultPayload is the closed reporting envelope; writes acknowledge with NoResult

use serde::{Deserialize, Serialize};

use crate::workload::Operation;

/// Organisation detail inside a Query1 result row: name, starting year and
/// the organisation's place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganisationEntry {
    pub name: String,
    pub year: i32,
    pub place: String,
}

// Temporal result fields carry epoch milliseconds; that is the form the
// benchmark driver validates against.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query1Result {
    pub friend_id: i64,
    pub friend_last_name: String,
    pub distance_from_person: i32,
    pub friend_birthday: i64,
    pub friend_creation_date: i64,
    pub friend_gender: String,
    pub friend_browser_used: String,
    pub friend_location_ip: String,
    pub friend_emails: Vec<String>,
    pub friend_languages: Vec<String>,
    pub friend_city_name: String,
    pub friend_universities: Vec<OrganisationEntry>,
    pub friend_companies: Vec<OrganisationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query2Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub message_id: i64,
    pub message_content: String,
    pub message_creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query3Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub x_count: i32,
    pub y_count: i32,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query4Result {
    pub tag_name: String,
    pub post_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query5Result {
    pub forum_title: String,
    pub post_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query6Result {
    pub tag_name: String,
    pub post_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query7Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub like_creation_date: i64,
    pub message_id: i64,
    pub message_content: String,
    pub minutes_latency: i32,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query8Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub comment_creation_date: i64,
    pub comment_id: i64,
    pub comment_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query9Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub message_id: i64,
    pub message_content: String,
    pub message_creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query10Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub common_interest_score: i32,
    pub person_gender: String,
    pub person_city_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query11Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub organization_name: String,
    pub organization_work_from_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query12Result {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub tag_names: Vec<String>,
    pub reply_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query13Result {
    pub shortest_path_length: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query14Result {
    pub person_ids_in_path: Vec<i64>,
    pub path_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery1PersonProfileResult {
    pub first_name: String,
    pub last_name: String,
    pub birthday: i64,
    pub location_ip: String,
    pub browser_used: String,
    pub city_id: i64,
    pub gender: String,
    pub creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery2PersonPostsResult {
    pub message_id: i64,
    pub message_content: String,
    pub message_creation_date: i64,
    pub original_post_id: i64,
    pub original_post_author_id: i64,
    pub original_post_author_first_name: String,
    pub original_post_author_last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery3PersonFriendsResult {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub friendship_creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery4MessageContentResult {
    pub message_content: String,
    pub message_creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery5MessageCreatorResult {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery6MessageForumResult {
    pub forum_id: i64,
    pub forum_title: String,
    pub moderator_id: i64,
    pub moderator_first_name: String,
    pub moderator_last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery7MessageRepliesResult {
    pub comment_id: i64,
    pub comment_content: String,
    pub comment_creation_date: i64,
    pub reply_author_id: i64,
    pub reply_author_first_name: String,
    pub reply_author_last_name: String,
    pub reply_author_knows_original_message_author: bool,
}

/// What one completed invocation reports back to the driver.
///
/// Singleton reads report `None` inside their variant when the query matched
/// nothing — an explicit empty result, not an error. Writes always report
/// `NoResult` with a zero count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultPayload {
    NoResult,
    Query1(Vec<Query1Result>),
    Query2(Vec<Query2Result>),
    Query3(Vec<Query3Result>),
    Query4(Vec<Query4Result>),
    Query5(Vec<Query5Result>),
    Query6(Vec<Query6Result>),
    Query7(Vec<Query7Result>),
    Query8(Vec<Query8Result>),
    Query9(Vec<Query9Result>),
    Query10(Vec<Query10Result>),
    Query11(Vec<Query11Result>),
    Query12(Vec<Query12Result>),
    Query13(Option<Query13Result>),
    Query14(Vec<Query14Result>),
    ShortQuery1(Option<ShortQuery1PersonProfileResult>),
    ShortQuery2(Vec<ShortQuery2PersonPostsResult>),
    ShortQuery3(Vec<ShortQuery3PersonFriendsResult>),
    ShortQuery4(Option<ShortQuery4MessageContentResult>),
    ShortQuery5(Option<ShortQuery5MessageCreatorResult>),
    ShortQuery6(Option<ShortQuery6MessageForumResult>),
    ShortQuery7(Vec<ShortQuery7MessageRepliesResult>),
}

/// Sink the external driver supplies for completed operations.
///
/// Called exactly once per successful invocation; a failed invocation
/// surfaces as an `AdapterError` instead and reports nothing.
pub trait ResultReporter: Send {
    fn report(&mut self, result_count: usize, payload: ResultPayload, operation: &Operation);
}
