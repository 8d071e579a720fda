// ABOUTME: Typed operation records for the SNB Interactive workload
// ABOUTME: Placeholder-name constants tie each field to its template token

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Workplace or university attachment on a new person (organisation id plus
/// the starting year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub organisation_id: i64,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Complex reads
// ---------------------------------------------------------------------------

/// Friends with a given first name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query1 {
    pub person_id: i64,
    pub first_name: String,
}

impl Query1 {
    pub const PERSON_ID: &'static str = "personId";
    pub const FIRST_NAME: &'static str = "firstName";
}

/// Recent messages by friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query2 {
    pub person_id: i64,
    pub max_date: NaiveDate,
}

impl Query2 {
    pub const PERSON_ID: &'static str = "personId";
    pub const MAX_DATE: &'static str = "maxDate";
}

/// Friends and friends-of-friends that have been to two countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query3 {
    pub person_id: i64,
    pub country_x_name: String,
    pub country_y_name: String,
    pub start_date: NaiveDate,
    pub duration_days: i32,
}

impl Query3 {
    pub const PERSON_ID: &'static str = "personId";
    pub const COUNTRY_X_NAME: &'static str = "countryXName";
    pub const COUNTRY_Y_NAME: &'static str = "countryYName";
    pub const START_DATE: &'static str = "startDate";
    pub const DURATION_DAYS: &'static str = "durationDays";
}

/// New topics among friends' posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query4 {
    pub person_id: i64,
    pub start_date: NaiveDate,
    pub duration_days: i32,
}

impl Query4 {
    pub const PERSON_ID: &'static str = "personId";
    pub const START_DATE: &'static str = "startDate";
    pub const DURATION_DAYS: &'static str = "durationDays";
}

/// New groups joined by friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query5 {
    pub person_id: i64,
    pub min_date: NaiveDate,
}

impl Query5 {
    pub const PERSON_ID: &'static str = "personId";
    pub const MIN_DATE: &'static str = "minDate";
}

/// Tags co-occurring with a given tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query6 {
    pub person_id: i64,
    pub tag_name: String,
}

impl Query6 {
    pub const PERSON_ID: &'static str = "personId";
    pub const TAG_NAME: &'static str = "tagName";
}

/// Recent likers of a person's messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query7 {
    pub person_id: i64,
}

impl Query7 {
    pub const PERSON_ID: &'static str = "personId";
}

/// Recent replies to a person's messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query8 {
    pub person_id: i64,
}

impl Query8 {
    pub const PERSON_ID: &'static str = "personId";
}

/// Recent messages by friends or friends-of-friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query9 {
    pub person_id: i64,
    pub max_date: NaiveDate,
}

impl Query9 {
    pub const PERSON_ID: &'static str = "personId";
    pub const MAX_DATE: &'static str = "maxDate";
}

/// Friend recommendation by common interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query10 {
    pub person_id: i64,
    pub month: i32,
}

impl Query10 {
    pub const PERSON_ID: &'static str = "personId";
    pub const MONTH: &'static str = "month";
}

/// Job referral: friends working in a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query11 {
    pub person_id: i64,
    pub country_name: String,
    pub work_from_year: i32,
}

impl Query11 {
    pub const PERSON_ID: &'static str = "personId";
    pub const COUNTRY_NAME: &'static str = "countryName";
    pub const WORK_FROM_YEAR: &'static str = "workFromYear";
}

/// Expert search among friends' replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query12 {
    pub person_id: i64,
    pub tag_class_name: String,
}

impl Query12 {
    pub const PERSON_ID: &'static str = "personId";
    pub const TAG_CLASS_NAME: &'static str = "tagClassName";
}

/// Single shortest path between two persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query13 {
    pub person1_id: i64,
    pub person2_id: i64,
}

impl Query13 {
    pub const PERSON1_ID: &'static str = "person1Id";
    pub const PERSON2_ID: &'static str = "person2Id";
}

/// Trusted connection paths between two persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query14 {
    pub person1_id: i64,
    pub person2_id: i64,
}

impl Query14 {
    pub const PERSON1_ID: &'static str = "person1Id";
    pub const PERSON2_ID: &'static str = "person2Id";
}

// ---------------------------------------------------------------------------
// Short reads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery1PersonProfile {
    pub person_id: i64,
}

impl ShortQuery1PersonProfile {
    pub const PERSON_ID: &'static str = "personId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery2PersonPosts {
    pub person_id: i64,
}

impl ShortQuery2PersonPosts {
    pub const PERSON_ID: &'static str = "personId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery3PersonFriends {
    pub person_id: i64,
}

impl ShortQuery3PersonFriends {
    pub const PERSON_ID: &'static str = "personId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery4MessageContent {
    pub message_id: i64,
}

impl ShortQuery4MessageContent {
    pub const MESSAGE_ID: &'static str = "messageId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery5MessageCreator {
    pub message_id: i64,
}

impl ShortQuery5MessageCreator {
    pub const MESSAGE_ID: &'static str = "messageId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery6MessageForum {
    pub message_id: i64,
}

impl ShortQuery6MessageForum {
    pub const MESSAGE_ID: &'static str = "messageId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortQuery7MessageReplies {
    pub message_id: i64,
}

impl ShortQuery7MessageReplies {
    pub const MESSAGE_ID: &'static str = "messageId";
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// Add a person together with their one-to-many attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update1AddPerson {
    pub person_id: i64,
    pub person_first_name: String,
    pub person_last_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub creation_date: DateTime<Utc>,
    pub location_ip: String,
    pub browser_used: String,
    pub city_id: i64,
    pub languages: Vec<String>,
    pub emails: Vec<String>,
    pub tag_ids: Vec<i64>,
    pub study_at: Vec<Organisation>,
    pub work_at: Vec<Organisation>,
}

impl Update1AddPerson {
    pub const PERSON_ID: &'static str = "personId";
    pub const PERSON_FIRST_NAME: &'static str = "personFirstName";
    pub const PERSON_LAST_NAME: &'static str = "personLastName";
    pub const GENDER: &'static str = "gender";
    pub const BIRTHDAY: &'static str = "birthday";
    pub const CREATION_DATE: &'static str = "creationDate";
    pub const LOCATION_IP: &'static str = "locationIp";
    pub const BROWSER_USED: &'static str = "browserUsed";
    pub const CITY_ID: &'static str = "cityId";
    pub const LANGUAGES: &'static str = "languages";
    pub const EMAILS: &'static str = "emails";
    pub const TAG_IDS: &'static str = "tagIds";
    // per-attachment placeholders used by the decomposed statements
    pub const ORGANISATION_ID: &'static str = "organizationId";
    pub const WORKS_FROM_YEAR: &'static str = "worksFromYear";
    pub const STUDIES_FROM_YEAR: &'static str = "studiesFromYear";
    pub const EMAIL: &'static str = "email";
    pub const LANGUAGE: &'static str = "language";
    pub const TAG_ID: &'static str = "tagId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update2AddPostLike {
    pub person_id: i64,
    pub post_id: i64,
    pub creation_date: DateTime<Utc>,
}

impl Update2AddPostLike {
    pub const PERSON_ID: &'static str = "personId";
    pub const POST_ID: &'static str = "postId";
    pub const CREATION_DATE: &'static str = "creationDate";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update3AddCommentLike {
    pub person_id: i64,
    pub comment_id: i64,
    pub creation_date: DateTime<Utc>,
}

impl Update3AddCommentLike {
    pub const PERSON_ID: &'static str = "personId";
    pub const COMMENT_ID: &'static str = "commentId";
    pub const CREATION_DATE: &'static str = "creationDate";
}

/// Add a forum and its tag attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update4AddForum {
    pub forum_id: i64,
    pub forum_title: String,
    pub creation_date: DateTime<Utc>,
    pub moderator_person_id: i64,
    pub tag_ids: Vec<i64>,
}

impl Update4AddForum {
    pub const FORUM_ID: &'static str = "forumId";
    pub const FORUM_TITLE: &'static str = "forumTitle";
    pub const CREATION_DATE: &'static str = "creationDate";
    pub const MODERATOR_PERSON_ID: &'static str = "moderatorPersonId";
    pub const TAG_IDS: &'static str = "tagIds";
    pub const TAG_ID: &'static str = "tagId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update5AddForumMembership {
    pub forum_id: i64,
    pub person_id: i64,
    pub join_date: DateTime<Utc>,
}

impl Update5AddForumMembership {
    pub const FORUM_ID: &'static str = "forumId";
    pub const PERSON_ID: &'static str = "personId";
    pub const JOIN_DATE: &'static str = "joinDate";
}

/// Add a post and its tag attachments. Exactly one of `image_file` and
/// `content` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update6AddPost {
    pub post_id: i64,
    pub image_file: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub location_ip: String,
    pub browser_used: String,
    pub language: Option<String>,
    pub content: Option<String>,
    pub length: i32,
    pub author_person_id: i64,
    pub forum_id: i64,
    pub country_id: i64,
    pub tag_ids: Vec<i64>,
}

impl Update6AddPost {
    pub const POST_ID: &'static str = "postId";
    pub const IMAGE_FILE: &'static str = "imageFile";
    pub const CREATION_DATE: &'static str = "creationDate";
    pub const LOCATION_IP: &'static str = "locationIp";
    pub const BROWSER_USED: &'static str = "browserUsed";
    pub const LANGUAGE: &'static str = "language";
    pub const CONTENT: &'static str = "content";
    pub const LENGTH: &'static str = "length";
    pub const AUTHOR_PERSON_ID: &'static str = "authorPersonId";
    pub const FORUM_ID: &'static str = "forumId";
    pub const COUNTRY_ID: &'static str = "countryId";
    pub const TAG_IDS: &'static str = "tagIds";
    pub const TAG_ID: &'static str = "tagId";
}

/// Add a comment replying to a post or to another comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update7AddComment {
    pub comment_id: i64,
    pub creation_date: DateTime<Utc>,
    pub location_ip: String,
    pub browser_used: String,
    pub content: String,
    pub length: i32,
    pub author_person_id: i64,
    pub country_id: i64,
    pub reply_to_post_id: Option<i64>,
    pub reply_to_comment_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl Update7AddComment {
    pub const COMMENT_ID: &'static str = "commentId";
    pub const CREATION_DATE: &'static str = "creationDate";
    pub const LOCATION_IP: &'static str = "locationIp";
    pub const BROWSER_USED: &'static str = "browserUsed";
    pub const CONTENT: &'static str = "content";
    pub const LENGTH: &'static str = "length";
    pub const AUTHOR_PERSON_ID: &'static str = "authorPersonId";
    pub const COUNTRY_ID: &'static str = "countryId";
    pub const REPLY_TO_POST_ID: &'static str = "replyToPostId";
    pub const REPLY_TO_COMMENT_ID: &'static str = "replyToCommentId";
    pub const TAG_IDS: &'static str = "tagIds";
    pub const TAG_ID: &'static str = "tagId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update8AddFriendship {
    pub person1_id: i64,
    pub person2_id: i64,
    pub creation_date: DateTime<Utc>,
}

impl Update8AddFriendship {
    pub const PERSON1_ID: &'static str = "person1Id";
    pub const PERSON2_ID: &'static str = "person2Id";
    pub const CREATION_DATE: &'static str = "creationDate";
}

// ---------------------------------------------------------------------------
// Dispatch enum
// ---------------------------------------------------------------------------

/// One incoming benchmark request. A closed set: each variant is statically
/// bound to its binder, execution shape and row mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Query1(Query1),
    Query2(Query2),
    Query3(Query3),
    Query4(Query4),
    Query5(Query5),
    Query6(Query6),
    Query7(Query7),
    Query8(Query8),
    Query9(Query9),
    Query10(Query10),
    Query11(Query11),
    Query12(Query12),
    Query13(Query13),
    Query14(Query14),
    ShortQuery1(ShortQuery1PersonProfile),
    ShortQuery2(ShortQuery2PersonPosts),
    ShortQuery3(ShortQuery3PersonFriends),
    ShortQuery4(ShortQuery4MessageContent),
    ShortQuery5(ShortQuery5MessageCreator),
    ShortQuery6(ShortQuery6MessageForum),
    ShortQuery7(ShortQuery7MessageReplies),
    Update1(Update1AddPerson),
    Update2(Update2AddPostLike),
    Update3(Update3AddCommentLike),
    Update4(Update4AddForum),
    Update5(Update5AddForumMembership),
    Update6(Update6AddPost),
    Update7(Update7AddComment),
    Update8(Update8AddFriendship),
}

impl Operation {
    /// Short name used in logs and diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Query1(_) => "Query1",
            Self::Query2(_) => "Query2",
            Self::Query3(_) => "Query3",
            Self::Query4(_) => "Query4",
            Self::Query5(_) => "Query5",
            Self::Query6(_) => "Query6",
            Self::Query7(_) => "Query7",
            Self::Query8(_) => "Query8",
            Self::Query9(_) => "Query9",
            Self::Query10(_) => "Query10",
            Self::Query11(_) => "Query11",
            Self::Query12(_) => "Query12",
            Self::Query13(_) => "Query13",
            Self::Query14(_) => "Query14",
            Self::ShortQuery1(_) => "ShortQuery1PersonProfile",
            Self::ShortQuery2(_) => "ShortQuery2PersonPosts",
            Self::ShortQuery3(_) => "ShortQuery3PersonFriends",
            Self::ShortQuery4(_) => "ShortQuery4MessageContent",
            Self::ShortQuery5(_) => "ShortQuery5MessageCreator",
            Self::ShortQuery6(_) => "ShortQuery6MessageForum",
            Self::ShortQuery7(_) => "ShortQuery7MessageReplies",
            Self::Update1(_) => "Update1AddPerson",
            Self::Update2(_) => "Update2AddPostLike",
            Self::Update3(_) => "Update3AddCommentLike",
            Self::Update4(_) => "Update4AddForum",
            Self::Update5(_) => "Update5AddForumMembership",
            Self::Update6(_) => "Update6AddPost",
            Self::Update7(_) => "Update7AddComment",
            Self::Update8(_) => "Update8AddFriendship",
        }
    }
}
