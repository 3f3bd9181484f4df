//! External collaborator seams
//!
//! The session never performs I/O itself: the hierarchy, applicability
//! checks, contact lookups and interview creation all come through these
//! traits.

use crate::error::CollaboratorError;
use crate::types::{ContactId, Submission};
use async_trait::async_trait;
use orgscope_tree::TreeNode;

/// Source of company hierarchies
#[async_trait]
pub trait TreeSource: Send + Sync {
    /// Fetch the full tree rooted at a company
    async fn fetch_tree(&self, company_id: i64) -> Result<TreeNode, CollaboratorError>;
}

/// Checks whether a questionnaire has questions for a set of roles
#[async_trait]
pub trait ApplicabilityValidator: Send + Sync {
    /// True if at least one question applies to the given roles
    async fn has_applicable_questions(
        &self,
        questionnaire_id: i64,
        role_ids: &[i64],
    ) -> Result<bool, CollaboratorError>;
}

/// Resolves the people holding a role
#[async_trait]
pub trait ContactLookup: Send + Sync {
    /// Contacts for one numeric role id
    async fn contacts_for_role(&self, role_id: i64) -> Result<Vec<ContactId>, CollaboratorError>;
}

/// Creates interviews from a confirmed selection
#[async_trait]
pub trait InterviewSubmitter: Send + Sync {
    /// Hand off a submission
    async fn submit(&self, submission: Submission) -> Result<(), CollaboratorError>;
}
