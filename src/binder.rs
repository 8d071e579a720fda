// ABOUTME: Per-operation parameter binding and compound-write decomposition
// ABOUTME: QueryStore turns typed operations into parameter sets or ordered statement plans

use crate::converter::{Converter, PgConverter};
use crate::errors::AdapterResult;
use crate::renderer;
use crate::templates::{OperationType, TemplateCatalog};
use crate::workload::{
    Query1, Query2, Query3, Query4, Query5, Query6, Query7, Query8, Query9, Query10, Query11,
    Query12, Query13, Query14, ShortQuery1PersonProfile, ShortQuery2PersonPosts,
    ShortQuery3PersonFriends, ShortQuery4MessageContent, ShortQuery5MessageCreator,
    ShortQuery6MessageForum, ShortQuery7MessageReplies, Update1AddPerson, Update2AddPostLike,
    Update3AddCommentLike, Update4AddForum, Update5AddForumMembership, Update6AddPost,
    Update7AddComment, Update8AddFriendship,
};

/// Ordered placeholder-name → literal-text mapping for one statement.
///
/// Keys are unique; insertion order is kept so rendering is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(&'static str, String)>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one substitution. Names come from the workload field constants,
    /// so a duplicate is a binder bug.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: String) -> Self {
        debug_assert!(
            self.get(name).is_none(),
            "duplicate parameter name `{name}`"
        );
        self.entries.push((name, value));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One bound statement of a plan: which template, with which values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub tag: OperationType,
    pub params: ParameterSet,
}

/// Ordered statements realizing one logical write.
///
/// The primary-record statement always comes first; each attached collection
/// contributes one statement per element, sections in declared order,
/// elements in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementPlan {
    pub statements: Vec<Statement>,
}

impl StatementPlan {
    fn push(&mut self, tag: OperationType, params: ParameterSet) {
        self.statements.push(Statement { tag, params });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }
}

/// Statement rendered to final SQL text, still carrying its template tag so
/// execution failures can name the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStatement {
    pub tag: OperationType,
    pub sql: String,
}

/// Template catalog plus dialect: binds operations and renders query text.
///
/// Read-only after construction; call-scoped data only, so one store serves
/// any number of concurrent invocations.
#[derive(Debug)]
pub struct QueryStore<C: Converter = PgConverter> {
    catalog: TemplateCatalog,
    converter: C,
    parameter_prefix: String,
    parameter_postfix: String,
    separated_content: bool,
}

impl QueryStore<PgConverter> {
    /// Store for the PostgreSQL dialect with the default `$name` markers.
    #[must_use]
    pub fn postgres(catalog: TemplateCatalog) -> Self {
        Self::with_converter(catalog, PgConverter)
    }
}

impl<C: Converter> QueryStore<C> {
    #[must_use]
    pub fn with_converter(catalog: TemplateCatalog, converter: C) -> Self {
        Self {
            catalog,
            converter,
            parameter_prefix: "$".to_string(),
            parameter_postfix: String::new(),
            separated_content: false,
        }
    }

    /// Override the placeholder markers for a deployment dialect.
    #[must_use]
    pub fn with_markers(mut self, prefix: impl Into<String>, postfix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self.parameter_postfix = postfix.into();
        self
    }

    /// Re-send large post content/image fields as follow-up statements after
    /// the owning row exists. The inline fields stay in the primary
    /// statement either way.
    #[must_use]
    pub fn with_separated_content(mut self, separated: bool) -> Self {
        self.separated_content = separated;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Final query text for one bound statement.
    pub fn render(&self, tag: OperationType, params: &ParameterSet) -> AdapterResult<String> {
        let template = self.catalog.require(tag)?;
        Ok(renderer::render(
            template,
            params,
            &self.parameter_prefix,
            &self.parameter_postfix,
        ))
    }

    /// Render a whole plan up front, so a missing template is caught before
    /// anything executes.
    pub fn render_plan(&self, plan: &StatementPlan) -> AdapterResult<Vec<RenderedStatement>> {
        plan.iter()
            .map(|s| {
                Ok(RenderedStatement {
                    tag: s.tag,
                    sql: self.render(s.tag, &s.params)?,
                })
            })
            .collect()
    }

    // -- complex reads ------------------------------------------------------

    pub fn query1(&self, op: &Query1) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query1::PERSON_ID, c.id(op.person_id))
            .with(Query1::FIRST_NAME, c.string(&op.first_name))
    }

    pub fn query2(&self, op: &Query2) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query2::PERSON_ID, c.id(op.person_id))
            .with(Query2::MAX_DATE, c.date(op.max_date))
    }

    pub fn query3(&self, op: &Query3) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query3::PERSON_ID, c.id(op.person_id))
            .with(Query3::COUNTRY_X_NAME, c.string(&op.country_x_name))
            .with(Query3::COUNTRY_Y_NAME, c.string(&op.country_y_name))
            .with(Query3::START_DATE, c.date(op.start_date))
            .with(Query3::DURATION_DAYS, c.integer(op.duration_days))
    }

    pub fn query4(&self, op: &Query4) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query4::PERSON_ID, c.id(op.person_id))
            .with(Query4::START_DATE, c.date(op.start_date))
            .with(Query4::DURATION_DAYS, c.integer(op.duration_days))
    }

    pub fn query5(&self, op: &Query5) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query5::PERSON_ID, c.id(op.person_id))
            .with(Query5::MIN_DATE, c.date(op.min_date))
    }

    pub fn query6(&self, op: &Query6) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query6::PERSON_ID, c.id(op.person_id))
            .with(Query6::TAG_NAME, c.string(&op.tag_name))
    }

    pub fn query7(&self, op: &Query7) -> ParameterSet {
        ParameterSet::new().with(Query7::PERSON_ID, self.converter.id(op.person_id))
    }

    pub fn query8(&self, op: &Query8) -> ParameterSet {
        ParameterSet::new().with(Query8::PERSON_ID, self.converter.id(op.person_id))
    }

    pub fn query9(&self, op: &Query9) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query9::PERSON_ID, c.id(op.person_id))
            .with(Query9::MAX_DATE, c.date(op.max_date))
    }

    pub fn query10(&self, op: &Query10) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query10::PERSON_ID, c.id(op.person_id))
            .with(Query10::MONTH, c.integer(op.month))
    }

    pub fn query11(&self, op: &Query11) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query11::PERSON_ID, c.id(op.person_id))
            .with(Query11::COUNTRY_NAME, c.string(&op.country_name))
            .with(Query11::WORK_FROM_YEAR, c.integer(op.work_from_year))
    }

    pub fn query12(&self, op: &Query12) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query12::PERSON_ID, c.id(op.person_id))
            .with(Query12::TAG_CLASS_NAME, c.string(&op.tag_class_name))
    }

    pub fn query13(&self, op: &Query13) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query13::PERSON1_ID, c.id(op.person1_id))
            .with(Query13::PERSON2_ID, c.id(op.person2_id))
    }

    pub fn query14(&self, op: &Query14) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Query14::PERSON1_ID, c.id(op.person1_id))
            .with(Query14::PERSON2_ID, c.id(op.person2_id))
    }

    // -- short reads --------------------------------------------------------

    pub fn short_query1(&self, op: &ShortQuery1PersonProfile) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery1PersonProfile::PERSON_ID,
            self.converter.id(op.person_id),
        )
    }

    pub fn short_query2(&self, op: &ShortQuery2PersonPosts) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery2PersonPosts::PERSON_ID,
            self.converter.id(op.person_id),
        )
    }

    pub fn short_query3(&self, op: &ShortQuery3PersonFriends) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery3PersonFriends::PERSON_ID,
            self.converter.id(op.person_id),
        )
    }

    pub fn short_query4(&self, op: &ShortQuery4MessageContent) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery4MessageContent::MESSAGE_ID,
            self.converter.id(op.message_id),
        )
    }

    pub fn short_query5(&self, op: &ShortQuery5MessageCreator) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery5MessageCreator::MESSAGE_ID,
            self.converter.id(op.message_id),
        )
    }

    pub fn short_query6(&self, op: &ShortQuery6MessageForum) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery6MessageForum::MESSAGE_ID,
            self.converter.id(op.message_id),
        )
    }

    pub fn short_query7(&self, op: &ShortQuery7MessageReplies) -> ParameterSet {
        ParameterSet::new().with(
            ShortQuery7MessageReplies::MESSAGE_ID,
            self.converter.id(op.message_id),
        )
    }

    // -- single-statement updates -------------------------------------------

    pub fn update2(&self, op: &Update2AddPostLike) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Update2AddPostLike::PERSON_ID, c.id(op.person_id))
            .with(Update2AddPostLike::POST_ID, c.id(op.post_id))
            .with(
                Update2AddPostLike::CREATION_DATE,
                c.date_time(op.creation_date),
            )
    }

    pub fn update3(&self, op: &Update3AddCommentLike) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Update3AddCommentLike::PERSON_ID, c.id(op.person_id))
            .with(Update3AddCommentLike::COMMENT_ID, c.id(op.comment_id))
            .with(
                Update3AddCommentLike::CREATION_DATE,
                c.date_time(op.creation_date),
            )
    }

    pub fn update5(&self, op: &Update5AddForumMembership) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Update5AddForumMembership::FORUM_ID, c.id(op.forum_id))
            .with(Update5AddForumMembership::PERSON_ID, c.id(op.person_id))
            .with(
                Update5AddForumMembership::JOIN_DATE,
                c.date_time(op.join_date),
            )
    }

    pub fn update8(&self, op: &Update8AddFriendship) -> ParameterSet {
        let c = &self.converter;
        ParameterSet::new()
            .with(Update8AddFriendship::PERSON1_ID, c.id(op.person1_id))
            .with(Update8AddFriendship::PERSON2_ID, c.id(op.person2_id))
            .with(
                Update8AddFriendship::CREATION_DATE,
                c.date_time(op.creation_date),
            )
    }

    // -- compound updates ----------------------------------------------------
    //
    // The relational schema keeps each one-to-many attachment in its own
    // table, so one logical insert becomes a plan: the primary row first
    // (sub-record statements look the new row up by id), then one statement
    // per attached element, sections in declared order.

    /// Person row, then companies, emails, languages, tags, universities.
    pub fn update1(&self, op: &Update1AddPerson) -> StatementPlan {
        let c = &self.converter;
        let mut plan = StatementPlan::default();
        plan.push(
            OperationType::Update1AddPerson,
            ParameterSet::new()
                .with(
                    Update1AddPerson::PERSON_ID,
                    c.id_for_insertion(op.person_id),
                )
                .with(
                    Update1AddPerson::PERSON_FIRST_NAME,
                    c.string(&op.person_first_name),
                )
                .with(
                    Update1AddPerson::PERSON_LAST_NAME,
                    c.string(&op.person_last_name),
                )
                .with(Update1AddPerson::GENDER, c.string(&op.gender))
                .with(Update1AddPerson::BIRTHDAY, c.date(op.birthday))
                .with(
                    Update1AddPerson::CREATION_DATE,
                    c.date_time(op.creation_date),
                )
                .with(Update1AddPerson::LOCATION_IP, c.string(&op.location_ip))
                .with(Update1AddPerson::BROWSER_USED, c.string(&op.browser_used))
                .with(Update1AddPerson::CITY_ID, c.id(op.city_id)),
        );

        for org in &op.work_at {
            let (org_id, year) = c.organisation(org);
            plan.push(
                OperationType::Update1AddPersonCompanies,
                ParameterSet::new()
                    .with(
                        Update1AddPerson::PERSON_ID,
                        c.id_for_insertion(op.person_id),
                    )
                    .with(Update1AddPerson::ORGANISATION_ID, org_id)
                    .with(Update1AddPerson::WORKS_FROM_YEAR, year),
            );
        }
        for email in &op.emails {
            plan.push(
                OperationType::Update1AddPersonEmails,
                ParameterSet::new()
                    .with(
                        Update1AddPerson::PERSON_ID,
                        c.id_for_insertion(op.person_id),
                    )
                    .with(Update1AddPerson::EMAIL, c.string(email)),
            );
        }
        for language in &op.languages {
            plan.push(
                OperationType::Update1AddPersonLanguages,
                ParameterSet::new()
                    .with(
                        Update1AddPerson::PERSON_ID,
                        c.id_for_insertion(op.person_id),
                    )
                    .with(Update1AddPerson::LANGUAGE, c.string(language)),
            );
        }
        for &tag_id in &op.tag_ids {
            plan.push(
                OperationType::Update1AddPersonTags,
                ParameterSet::new()
                    .with(
                        Update1AddPerson::PERSON_ID,
                        c.id_for_insertion(op.person_id),
                    )
                    .with(Update1AddPerson::TAG_ID, c.id(tag_id)),
            );
        }
        for org in &op.study_at {
            let (org_id, year) = c.organisation(org);
            plan.push(
                OperationType::Update1AddPersonUniversities,
                ParameterSet::new()
                    .with(
                        Update1AddPerson::PERSON_ID,
                        c.id_for_insertion(op.person_id),
                    )
                    .with(Update1AddPerson::ORGANISATION_ID, org_id)
                    .with(Update1AddPerson::STUDIES_FROM_YEAR, year),
            );
        }
        plan
    }

    /// Forum row, then tags.
    pub fn update4(&self, op: &Update4AddForum) -> StatementPlan {
        let c = &self.converter;
        let mut plan = StatementPlan::default();
        plan.push(
            OperationType::Update4AddForum,
            ParameterSet::new()
                .with(Update4AddForum::FORUM_ID, c.id_for_insertion(op.forum_id))
                .with(Update4AddForum::FORUM_TITLE, c.string(&op.forum_title))
                .with(
                    Update4AddForum::CREATION_DATE,
                    c.date_time(op.creation_date),
                )
                .with(
                    Update4AddForum::MODERATOR_PERSON_ID,
                    c.id(op.moderator_person_id),
                ),
        );
        for &tag_id in &op.tag_ids {
            plan.push(
                OperationType::Update4AddForumTags,
                ParameterSet::new()
                    .with(Update4AddForum::FORUM_ID, c.id_for_insertion(op.forum_id))
                    .with(Update4AddForum::TAG_ID, c.id(tag_id)),
            );
        }
        plan
    }

    /// Post row, then tags; in separated-content mode also a content and an
    /// image-file follow-up. The follow-ups look the post up by its
    /// reference-form id — the row already exists by then.
    pub fn update6(&self, op: &Update6AddPost) -> StatementPlan {
        let c = &self.converter;
        let mut plan = StatementPlan::default();
        plan.push(
            OperationType::Update6AddPost,
            ParameterSet::new()
                .with(Update6AddPost::POST_ID, c.id_for_insertion(op.post_id))
                .with(
                    Update6AddPost::IMAGE_FILE,
                    c.opt_string(op.image_file.as_deref()),
                )
                .with(Update6AddPost::CREATION_DATE, c.date_time(op.creation_date))
                .with(Update6AddPost::LOCATION_IP, c.string(&op.location_ip))
                .with(Update6AddPost::BROWSER_USED, c.string(&op.browser_used))
                .with(Update6AddPost::LANGUAGE, c.opt_string(op.language.as_deref()))
                .with(Update6AddPost::CONTENT, c.opt_string(op.content.as_deref()))
                .with(Update6AddPost::LENGTH, c.integer(op.length))
                .with(Update6AddPost::AUTHOR_PERSON_ID, c.id(op.author_person_id))
                .with(Update6AddPost::FORUM_ID, c.id(op.forum_id))
                .with(Update6AddPost::COUNTRY_ID, c.id(op.country_id)),
        );
        for &tag_id in &op.tag_ids {
            plan.push(
                OperationType::Update6AddPostTags,
                ParameterSet::new()
                    .with(Update6AddPost::POST_ID, c.id_for_insertion(op.post_id))
                    .with(Update6AddPost::TAG_ID, c.id(tag_id)),
            );
        }
        if self.separated_content {
            plan.push(
                OperationType::Update6AddPostContent,
                ParameterSet::new()
                    .with(Update6AddPost::POST_ID, c.id(op.post_id))
                    .with(Update6AddPost::CONTENT, c.opt_string(op.content.as_deref())),
            );
            plan.push(
                OperationType::Update6AddPostImageFile,
                ParameterSet::new()
                    .with(Update6AddPost::POST_ID, c.id(op.post_id))
                    .with(
                        Update6AddPost::IMAGE_FILE,
                        c.opt_string(op.image_file.as_deref()),
                    ),
            );
        }
        plan
    }

    /// Comment row, then tags.
    pub fn update7(&self, op: &Update7AddComment) -> StatementPlan {
        let c = &self.converter;
        let mut plan = StatementPlan::default();
        plan.push(
            OperationType::Update7AddComment,
            ParameterSet::new()
                .with(
                    Update7AddComment::COMMENT_ID,
                    c.id_for_insertion(op.comment_id),
                )
                .with(
                    Update7AddComment::CREATION_DATE,
                    c.date_time(op.creation_date),
                )
                .with(Update7AddComment::LOCATION_IP, c.string(&op.location_ip))
                .with(Update7AddComment::BROWSER_USED, c.string(&op.browser_used))
                .with(Update7AddComment::CONTENT, c.string(&op.content))
                .with(Update7AddComment::LENGTH, c.integer(op.length))
                .with(
                    Update7AddComment::AUTHOR_PERSON_ID,
                    c.id(op.author_person_id),
                )
                .with(Update7AddComment::COUNTRY_ID, c.id(op.country_id))
                .with(
                    Update7AddComment::REPLY_TO_POST_ID,
                    c.opt_id(op.reply_to_post_id),
                )
                .with(
                    Update7AddComment::REPLY_TO_COMMENT_ID,
                    c.opt_id(op.reply_to_comment_id),
                ),
        );
        for &tag_id in &op.tag_ids {
            plan.push(
                OperationType::Update7AddCommentTags,
                ParameterSet::new()
                    .with(
                        Update7AddComment::COMMENT_ID,
                        c.id_for_insertion(op.comment_id),
                    )
                    .with(Update7AddComment::TAG_ID, c.id(tag_id)),
            );
        }
        plan
    }
}
