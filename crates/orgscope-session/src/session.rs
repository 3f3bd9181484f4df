//! Scope-selection session
//!
//! Owns one user's view of a hierarchy: the flattened table, the role
//! selection, expansion and search state, and the latest answers from the
//! applicability and contact services.
//!
//! # Latest wins
//!
//! Lookups are split into `begin_*` (snapshot inputs with a
//! [`RequestTicket`]) and `complete_*` (apply an answer). An answer is applied
//! only if its ticket still matches the session; anything else belongs to a
//! superseded selection or tree and is dropped.

use crate::collaborator::{ApplicabilityValidator, ContactLookup, InterviewSubmitter, TreeSource};
use crate::config::ScopeConfig;
use crate::error::{CollaboratorError, SessionError, SessionResult};
use crate::types::{
    ContactId, ContactMap, ContactRequest, InterviewType, RequestTicket, Submission, Tagged,
    ValidationRequest,
};
use orgscope_select::{visible_nodes, ExpansionSet, SearchQuery, SelectionEngine, SelectionState, TriStateView};
use orgscope_tree::{CompositeId, FlatNode, FlatTree, Flattener, TreeNode};
use std::path::Path;

/// One user's scope-selection state
#[derive(Debug)]
pub struct ScopeSession {
    config: ScopeConfig,
    flattener: Flattener,
    tree: Option<FlatTree>,
    generation: u64,
    version: u64,
    engine: SelectionEngine,
    expanded: ExpansionSet,
    query: SearchQuery,
    interview_type: InterviewType,
    public_interview: bool,
    questionnaire_id: Option<i64>,
    applicability: Option<Tagged<bool>>,
    contacts: Option<Tagged<ContactMap>>,
}

impl Default for ScopeSession {
    fn default() -> Self {
        Self::new(ScopeConfig::default())
    }
}

impl ScopeSession {
    /// Create an empty session from a TOML or YAML config file
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the file cannot be loaded
    pub fn from_config_path(path: impl AsRef<Path>) -> SessionResult<Self> {
        Ok(Self::new(ScopeConfig::from_path(path)?))
    }

    /// Create an empty session
    #[must_use]
    pub fn new(config: ScopeConfig) -> Self {
        Self {
            flattener: Flattener::new(config.path_separator.clone()),
            interview_type: config.default_interview_type,
            public_interview: config.public_interview,
            config,
            tree: None,
            generation: 0,
            version: 0,
            engine: SelectionEngine::new(),
            expanded: ExpansionSet::new(),
            query: SearchQuery::default(),
            questionnaire_id: None,
            applicability: None,
            contacts: None,
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Loaded table, if any
    #[inline]
    #[must_use]
    pub fn tree(&self) -> Option<&FlatTree> {
        self.tree.as_ref()
    }

    /// Ticket describing the current lookup inputs
    #[inline]
    #[must_use]
    pub fn ticket(&self) -> RequestTicket {
        RequestTicket {
            generation: self.generation,
            version: self.version,
        }
    }

    /// Fetch a company's hierarchy and load it
    ///
    /// # Errors
    /// Returns error if the fetch fails or the tree is malformed; the
    /// previously loaded tree is kept in both cases
    pub async fn load_tree<S>(&mut self, source: &S, company_id: i64) -> SessionResult<&FlatTree>
    where
        S: TreeSource + ?Sized,
    {
        tracing::debug!(company_id, "fetching hierarchy");
        let root = source.fetch_tree(company_id).await?;
        self.replace_tree(&root)
    }

    /// Flatten and load a tree
    ///
    /// Clears the selection and every lookup answer, and collapses the view
    /// to the root's children.
    ///
    /// # Errors
    /// Returns [`SessionError::Tree`] if the tree is malformed; the
    /// previously loaded tree is kept
    pub fn replace_tree(&mut self, root: &TreeNode) -> SessionResult<&FlatTree> {
        let flat = self.flattener.flatten(root)?;

        self.generation += 1;
        self.version = 0;
        self.engine.clear();
        self.applicability = None;
        self.contacts = None;
        self.expanded = ExpansionSet::root_only(&flat);
        tracing::info!(
            generation = self.generation,
            nodes = flat.len(),
            roles = flat.roles().count(),
            "hierarchy loaded"
        );

        Ok(self.tree.insert(flat))
    }

    fn loaded(&self) -> SessionResult<&FlatTree> {
        self.tree.as_ref().ok_or(SessionError::NoTree)
    }

    fn bump(&mut self) {
        self.version += 1;
        tracing::trace!(ticket = %self.ticket(), "lookup inputs changed");
    }

    // Selection

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selected(&self) -> &SelectionState {
        self.engine.selected()
    }

    /// Cascade toggle a node; returns true if the selection changed
    ///
    /// # Errors
    /// Returns [`SessionError::NoTree`] before a tree is loaded, or
    /// [`SessionError::Tree`] if the node's subtree loops
    pub fn toggle(&mut self, id: &CompositeId) -> SessionResult<bool> {
        let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
        let changed = self.engine.toggle(tree, id)?;
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Empty the selection; returns true if anything was selected
    pub fn clear(&mut self) -> bool {
        let changed = self.engine.clear();
        if changed {
            self.bump();
        }
        changed
    }

    /// Selected numeric role ids, ascending
    #[must_use]
    pub fn selected_role_ids(&self) -> Vec<i64> {
        self.tree
            .as_ref()
            .map(|tree| self.engine.resolve_numeric(tree))
            .unwrap_or_default()
    }

    /// Tri-state badges for the loaded tree
    ///
    /// # Errors
    /// Returns [`SessionError::NoTree`] before a tree is loaded, or
    /// [`SessionError::Tree`] if a subtree loops
    pub fn view(&self) -> SessionResult<TriStateView> {
        Ok(self.engine.view(self.loaded()?)?)
    }

    // Visibility

    /// Set the search text
    pub fn set_search(&mut self, raw: &str) {
        self.query = SearchQuery::new(raw);
    }

    /// Active search
    #[inline]
    #[must_use]
    pub fn search(&self) -> &SearchQuery {
        &self.query
    }

    /// Expand a node
    pub fn expand(&mut self, id: CompositeId) -> bool {
        self.expanded.expand(id)
    }

    /// Collapse a node
    pub fn collapse(&mut self, id: &CompositeId) -> bool {
        self.expanded.collapse(id)
    }

    /// Expand every ancestor of a node
    pub fn reveal(&mut self, id: &CompositeId) {
        if let Some(tree) = &self.tree {
            self.expanded.expand_to(tree, id);
        }
    }

    /// Expansion state
    #[inline]
    #[must_use]
    pub fn expansion(&self) -> &ExpansionSet {
        &self.expanded
    }

    /// Rows to render; empty before a tree is loaded
    #[must_use]
    pub fn visible_nodes(&self) -> Vec<&FlatNode> {
        self.tree
            .as_ref()
            .map(|tree| visible_nodes(tree, &self.expanded, &self.query))
            .unwrap_or_default()
    }

    // Interview settings

    /// Interview setting
    #[inline]
    #[must_use]
    pub fn interview_type(&self) -> InterviewType {
        self.interview_type
    }

    /// Change the interview setting
    pub fn set_interview_type(&mut self, interview_type: InterviewType) {
        self.interview_type = interview_type;
    }

    /// True in public-interview mode
    #[inline]
    #[must_use]
    pub fn public_interview(&self) -> bool {
        self.public_interview
    }

    /// Switch public-interview mode; leaving it drops resolved contacts
    pub fn set_public_interview(&mut self, public: bool) {
        if self.public_interview != public {
            self.public_interview = public;
            if !public {
                self.contacts = None;
            }
            tracing::debug!(public, "interview mode changed");
        }
    }

    /// Active questionnaire
    #[inline]
    #[must_use]
    pub fn questionnaire_id(&self) -> Option<i64> {
        self.questionnaire_id
    }

    /// Choose the questionnaire; a change invalidates applicability
    pub fn set_questionnaire(&mut self, questionnaire_id: i64) {
        if self.questionnaire_id != Some(questionnaire_id) {
            self.questionnaire_id = Some(questionnaire_id);
            self.bump();
        }
    }

    // Applicability

    /// Snapshot inputs for an applicability check
    ///
    /// # Errors
    /// Returns [`SessionError::NoTree`], [`SessionError::NoQuestionnaire`]
    /// or [`SessionError::EmptySelection`] when there is nothing to check
    pub fn begin_validation(&self) -> SessionResult<ValidationRequest> {
        let tree = self.loaded()?;
        let questionnaire_id = self.questionnaire_id.ok_or(SessionError::NoQuestionnaire)?;
        let role_ids = self.engine.resolve_numeric(tree);
        if role_ids.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        Ok(ValidationRequest {
            ticket: self.ticket(),
            questionnaire_id,
            role_ids,
        })
    }

    /// Apply an applicability answer; returns false if it was stale
    ///
    /// A failed check is recorded as no answer.
    pub fn complete_validation(&mut self, ticket: RequestTicket, result: Result<bool, CollaboratorError>) -> bool {
        if ticket != self.ticket() {
            tracing::debug!(%ticket, current = %self.ticket(), "dropping stale applicability answer");
            return false;
        }

        self.applicability = match result {
            Ok(value) => Some(Tagged { ticket, value }),
            Err(err) => {
                tracing::warn!(%ticket, error = %err, "applicability check failed");
                None
            }
        };
        true
    }

    /// Run an applicability check for the current selection
    ///
    /// Returns the answer now held by the session.
    ///
    /// # Errors
    /// Same as [`Self::begin_validation`]; collaborator failures are not
    /// errors
    pub async fn refresh_applicability<V>(&mut self, validator: &V) -> SessionResult<Option<bool>>
    where
        V: ApplicabilityValidator + ?Sized,
    {
        let request = self.begin_validation()?;
        let result = validator
            .has_applicable_questions(request.questionnaire_id, &request.role_ids)
            .await;
        self.complete_validation(request.ticket, result);
        Ok(self.applicability())
    }

    /// Applicability of the current selection, if answered
    #[must_use]
    pub fn applicability(&self) -> Option<bool> {
        self.applicability
            .as_ref()
            .filter(|tagged| tagged.ticket == self.ticket())
            .map(|tagged| tagged.value)
    }

    // Contacts

    /// Snapshot inputs for a contact lookup; `None` outside public mode
    ///
    /// # Errors
    /// Returns [`SessionError::NoTree`] or [`SessionError::EmptySelection`]
    pub fn begin_contact_lookup(&self) -> SessionResult<Option<ContactRequest>> {
        if !self.public_interview {
            return Ok(None);
        }
        let tree = self.loaded()?;
        let role_ids = self.engine.resolve_numeric(tree);
        if role_ids.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        Ok(Some(ContactRequest {
            ticket: self.ticket(),
            role_ids,
        }))
    }

    /// Apply per-role contact answers; returns false if they were dropped
    ///
    /// Any failed role leaves the session without contacts.
    pub fn complete_contact_lookup(
        &mut self,
        ticket: RequestTicket,
        results: impl IntoIterator<Item = (i64, Result<Vec<ContactId>, CollaboratorError>)>,
    ) -> bool {
        if ticket != self.ticket() || !self.public_interview {
            tracing::debug!(%ticket, current = %self.ticket(), "dropping stale contact answer");
            return false;
        }

        let mut grouped = ContactMap::new();
        for (role_id, result) in results {
            match result {
                Ok(contacts) => grouped.entry(role_id).or_default().extend(contacts),
                Err(err) => {
                    tracing::warn!(%ticket, role_id, error = %err, "contact lookup failed");
                    self.contacts = None;
                    return true;
                }
            }
        }

        self.contacts = Some(Tagged { ticket, value: grouped });
        true
    }

    /// Look up contacts for every selected role
    ///
    /// Does nothing outside public-interview mode.
    ///
    /// # Errors
    /// Same as [`Self::begin_contact_lookup`]; collaborator failures are not
    /// errors
    pub async fn refresh_contacts<L>(&mut self, lookup: &L) -> SessionResult<Option<&ContactMap>>
    where
        L: ContactLookup + ?Sized,
    {
        let Some(request) = self.begin_contact_lookup()? else {
            return Ok(None);
        };

        let mut results = Vec::with_capacity(request.role_ids.len());
        for role_id in request.role_ids {
            results.push((role_id, lookup.contacts_for_role(role_id).await));
        }
        self.complete_contact_lookup(request.ticket, results);
        Ok(self.contacts())
    }

    /// Contacts for the current selection, if resolved
    #[must_use]
    pub fn contacts(&self) -> Option<&ContactMap> {
        self.contacts
            .as_ref()
            .filter(|tagged| tagged.ticket == self.ticket())
            .map(|tagged| &tagged.value)
    }

    // Confirmation

    /// True if [`Self::confirm`] would succeed
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.confirm().is_ok()
    }

    /// Build the submission for the current state
    ///
    /// # Errors
    /// - [`SessionError::NoTree`]: nothing loaded
    /// - [`SessionError::EmptySelection`]: no role selected
    /// - [`SessionError::NoQuestionnaire`]: no questionnaire chosen
    /// - [`SessionError::ValidationPending`]: no applicability answer for the current selection
    /// - [`SessionError::NotApplicable`]: the questionnaire does not apply
    /// - [`SessionError::ContactsPending`]: public mode without resolved contacts
    pub fn confirm(&self) -> SessionResult<Submission> {
        let tree = self.loaded()?;
        let role_ids = self.engine.resolve_numeric(tree);
        if role_ids.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        let questionnaire_id = self.questionnaire_id.ok_or(SessionError::NoQuestionnaire)?;

        match self.applicability() {
            None => return Err(SessionError::ValidationPending),
            Some(false) => return Err(SessionError::NotApplicable { questionnaire_id }),
            Some(true) => {}
        }

        let contacts = if self.public_interview {
            Some(self.contacts().cloned().ok_or(SessionError::ContactsPending)?)
        } else {
            None
        };

        Ok(Submission {
            questionnaire_id,
            interview_type: self.interview_type,
            role_ids,
            contacts,
        })
    }

    /// Confirm and hand off to the interview service
    ///
    /// # Errors
    /// Returns any [`Self::confirm`] error, or the submitter's failure
    pub async fn submit<S>(&self, submitter: &S) -> SessionResult<Submission>
    where
        S: InterviewSubmitter + ?Sized,
    {
        let submission = self.confirm()?;
        submitter.submit(submission.clone()).await?;
        tracing::info!(
            questionnaire_id = submission.questionnaire_id,
            roles = submission.role_ids.len(),
            interview_type = %submission.interview_type,
            "interviews submitted"
        );
        Ok(submission)
    }
}
