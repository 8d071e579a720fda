// ABOUTME: Operation-type tags and the on-disk query template catalog
// ABOUTME: One template file per tag; unreadable files become absent entries, not load errors

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::errors::{AdapterError, AdapterResult};

/// Tag identifying one query template.
///
/// The tag's base name is the template's file name stem; a deployment
/// provides `<dir>/<base_name><suffix>` for every tag it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    // interactive complex reads
    ComplexQuery1,
    ComplexQuery2,
    ComplexQuery3,
    ComplexQuery4,
    ComplexQuery5,
    ComplexQuery6,
    ComplexQuery7,
    ComplexQuery8,
    ComplexQuery9,
    ComplexQuery10,
    ComplexQuery11,
    ComplexQuery12,
    ComplexQuery13,
    ComplexQuery14,
    // alternate dialect renditions, selectable per deployment
    ComplexQuery3DurationAsFunction,
    ComplexQuery4DurationAsFunction,
    ComplexQuery7WithSecond,

    // interactive short reads
    ShortQuery1,
    ShortQuery2,
    ShortQuery3,
    ShortQuery4,
    ShortQuery5,
    ShortQuery6,
    ShortQuery7,

    // interactive updates, one statement per logical operation
    Update1,
    Update2,
    Update3,
    Update4,
    Update5,
    Update6,
    Update7,
    Update8,

    // decomposed updates for schemas that cannot take the one-to-many
    // attachments inline
    Update1AddPerson,
    Update1AddPersonCompanies,
    Update1AddPersonEmails,
    Update1AddPersonLanguages,
    Update1AddPersonTags,
    Update1AddPersonUniversities,
    Update4AddForum,
    Update4AddForumTags,
    Update6AddPost,
    Update6AddPostTags,
    Update7AddComment,
    Update7AddCommentTags,

    // separate re-send of large content fields after the owning row exists
    Update6AddPostContent,
    Update6AddPostImageFile,
}

impl OperationType {
    /// Every declared tag, in catalog order.
    pub const ALL: &'static [OperationType] = &[
        OperationType::ComplexQuery1,
        OperationType::ComplexQuery2,
        OperationType::ComplexQuery3,
        OperationType::ComplexQuery4,
        OperationType::ComplexQuery5,
        OperationType::ComplexQuery6,
        OperationType::ComplexQuery7,
        OperationType::ComplexQuery8,
        OperationType::ComplexQuery9,
        OperationType::ComplexQuery10,
        OperationType::ComplexQuery11,
        OperationType::ComplexQuery12,
        OperationType::ComplexQuery13,
        OperationType::ComplexQuery14,
        OperationType::ComplexQuery3DurationAsFunction,
        OperationType::ComplexQuery4DurationAsFunction,
        OperationType::ComplexQuery7WithSecond,
        OperationType::ShortQuery1,
        OperationType::ShortQuery2,
        OperationType::ShortQuery3,
        OperationType::ShortQuery4,
        OperationType::ShortQuery5,
        OperationType::ShortQuery6,
        OperationType::ShortQuery7,
        OperationType::Update1,
        OperationType::Update2,
        OperationType::Update3,
        OperationType::Update4,
        OperationType::Update5,
        OperationType::Update6,
        OperationType::Update7,
        OperationType::Update8,
        OperationType::Update1AddPerson,
        OperationType::Update1AddPersonCompanies,
        OperationType::Update1AddPersonEmails,
        OperationType::Update1AddPersonLanguages,
        OperationType::Update1AddPersonTags,
        OperationType::Update1AddPersonUniversities,
        OperationType::Update4AddForum,
        OperationType::Update4AddForumTags,
        OperationType::Update6AddPost,
        OperationType::Update6AddPostTags,
        OperationType::Update7AddComment,
        OperationType::Update7AddCommentTags,
        OperationType::Update6AddPostContent,
        OperationType::Update6AddPostImageFile,
    ];

    /// Template file name stem for this tag.
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::ComplexQuery1 => "interactive-complex-1",
            Self::ComplexQuery2 => "interactive-complex-2",
            Self::ComplexQuery3 => "interactive-complex-3",
            Self::ComplexQuery4 => "interactive-complex-4",
            Self::ComplexQuery5 => "interactive-complex-5",
            Self::ComplexQuery6 => "interactive-complex-6",
            Self::ComplexQuery7 => "interactive-complex-7",
            Self::ComplexQuery8 => "interactive-complex-8",
            Self::ComplexQuery9 => "interactive-complex-9",
            Self::ComplexQuery10 => "interactive-complex-10",
            Self::ComplexQuery11 => "interactive-complex-11",
            Self::ComplexQuery12 => "interactive-complex-12",
            Self::ComplexQuery13 => "interactive-complex-13",
            Self::ComplexQuery14 => "interactive-complex-14",
            Self::ComplexQuery3DurationAsFunction => "interactive-complex-3-duration-as-function",
            Self::ComplexQuery4DurationAsFunction => "interactive-complex-4-duration-as-function",
            Self::ComplexQuery7WithSecond => "interactive-complex-7-with-second",
            Self::ShortQuery1 => "interactive-short-1",
            Self::ShortQuery2 => "interactive-short-2",
            Self::ShortQuery3 => "interactive-short-3",
            Self::ShortQuery4 => "interactive-short-4",
            Self::ShortQuery5 => "interactive-short-5",
            Self::ShortQuery6 => "interactive-short-6",
            Self::ShortQuery7 => "interactive-short-7",
            Self::Update1 => "interactive-update-1",
            Self::Update2 => "interactive-update-2",
            Self::Update3 => "interactive-update-3",
            Self::Update4 => "interactive-update-4",
            Self::Update5 => "interactive-update-5",
            Self::Update6 => "interactive-update-6",
            Self::Update7 => "interactive-update-7",
            Self::Update8 => "interactive-update-8",
            Self::Update1AddPerson => "interactive-update-1-add-person",
            Self::Update1AddPersonCompanies => "interactive-update-1-add-person-companies",
            Self::Update1AddPersonEmails => "interactive-update-1-add-person-emails",
            Self::Update1AddPersonLanguages => "interactive-update-1-add-person-languages",
            Self::Update1AddPersonTags => "interactive-update-1-add-person-tags",
            Self::Update1AddPersonUniversities => "interactive-update-1-add-person-universities",
            Self::Update4AddForum => "interactive-update-4-add-forum",
            Self::Update4AddForumTags => "interactive-update-4-add-forum-tags",
            Self::Update6AddPost => "interactive-update-6-add-post",
            Self::Update6AddPostTags => "interactive-update-6-add-post-tags",
            Self::Update7AddComment => "interactive-update-7-add-comment",
            Self::Update7AddCommentTags => "interactive-update-7-add-comment-tags",
            Self::Update6AddPostContent => "interactive-update-6-add-post-content",
            Self::Update6AddPostImageFile => "interactive-update-6-add-post-imagefile",
        }
    }
}

/// Raw query templates keyed by operation type.
///
/// Built once at startup and read-only afterwards; safe to share across
/// concurrent operation invocations without locking.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    templates: HashMap<OperationType, String>,
}

impl TemplateCatalog {
    /// Load one template per declared tag from `directory`.
    ///
    /// A missing or unreadable file is logged and stored as an absent entry
    /// so a deployment can ship templates only for the operation types it
    /// supports; the gap surfaces as a binding failure if that type is ever
    /// invoked.
    #[must_use]
    pub fn load(directory: &Path, suffix: &str) -> Self {
        let mut templates = HashMap::new();
        for &tag in OperationType::ALL {
            let path = directory.join(format!("{}{}", tag.base_name(), suffix));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    templates.insert(tag, text);
                }
                Err(err) => {
                    warn!(
                        template = tag.base_name(),
                        path = %path.display(),
                        error = %err,
                        "query template not loaded; operations that need it will fail to bind"
                    );
                }
            }
        }
        Self { templates }
    }

    /// Template text for `tag`, if one was loaded.
    #[must_use]
    pub fn get(&self, tag: OperationType) -> Option<&str> {
        self.templates.get(&tag).map(String::as_str)
    }

    /// Template text for `tag`, or the binding failure for an absent entry.
    pub fn require(&self, tag: OperationType) -> AdapterResult<&str> {
        self.get(tag).ok_or(AdapterError::TemplateMissing(tag))
    }

    /// Number of loaded templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no template loaded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn partial_directory_loads_present_templates_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("interactive-short-1.sql"),
            "SELECT 1 WHERE id = $personId",
        )
        .unwrap();

        let catalog = TemplateCatalog::load(dir.path(), ".sql");
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(OperationType::ShortQuery1),
            Some("SELECT 1 WHERE id = $personId")
        );
        assert!(catalog.get(OperationType::ComplexQuery1).is_none());
    }

    #[test]
    fn absent_template_is_a_binding_failure_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TemplateCatalog::load(dir.path(), ".sql");
        let err = catalog.require(OperationType::ComplexQuery2).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::TemplateMissing(OperationType::ComplexQuery2)
        ));
    }

    #[test]
    fn base_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &tag in OperationType::ALL {
            assert!(seen.insert(tag.base_name()), "duplicate {}", tag.base_name());
        }
        assert_eq!(seen.len(), OperationType::ALL.len());
    }
}
