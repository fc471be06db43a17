//! Problem workspace: a problem, its owning contest when entered through
//! one, the transient code buffer, and the submit/run actions. The buffer
//! never reaches the server until submitted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use common::Language;
use thiserror::Error;

use crate::access::AccessController;
use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::problem::{RunRequest, RunResponse};
use crate::models::submission::NewSubmission;
use crate::models::{Contest, Preferences, Problem};
use crate::routes::Route;

/// Everything the editor widget needs to (re)bind its extensions.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub language: Language,
    pub tab_size: u32,
    pub indent_unit: u32,
    pub font_family: String,
    pub font_size: u32,
    pub line_height: f64,
    pub dark: bool,
    pub line_numbers: bool,
    pub fold_gutter: bool,
    pub match_brackets: bool,
}

impl EditorConfig {
    pub fn derive(preferences: &Preferences, language: Language, system_dark: bool) -> Self {
        Self {
            language,
            tab_size: preferences.tab_size,
            indent_unit: preferences.indent_unit,
            font_family: preferences.font_family.clone(),
            font_size: preferences.font_size,
            line_height: preferences.line_height,
            dark: preferences.theme.is_dark(system_dark),
            line_numbers: preferences.line_numbers,
            fold_gutter: preferences.fold_gutter,
            match_brackets: preferences.match_brackets,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// OI contest past its end; rejected locally, no request is made.
    #[error("contest ended")]
    ContestEnded,
    /// A submit is already in flight; the action is disabled.
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("contest ended")]
    ContestEnded,
    #[error("code buffer is empty")]
    EmptyCode,
    #[error("rate limited")]
    RateLimited,
    #[error("error: {0}")]
    Other(String),
}

pub struct ProblemWorkspace {
    gateway: Arc<ApiGateway>,
    access: Option<Arc<AccessController>>,
    problem: Problem,
    contest: Option<Contest>,
    /// Local end gating applies only when entered through a contest page.
    gated: bool,
    language: RwLock<Language>,
    code: RwLock<String>,
    submitting: AtomicBool,
}

impl ProblemWorkspace {
    /// Open the standalone problem page. `contest_id` (from `?contestId=`)
    /// constrains the language whitelist but adds no end gating.
    pub async fn open_problem(
        gateway: Arc<ApiGateway>,
        problem_id: i64,
        contest_id: Option<i64>,
    ) -> Result<Self, ApiError> {
        let problem = gateway.get_problem(problem_id).await?;
        let contest = match contest_id {
            Some(id) => Some(gateway.get_contest(id).await?),
            None => None,
        };
        Ok(Self::assemble(gateway, None, problem, contest, false))
    }

    /// Open problem `order` of a contest. The problem and the contest
    /// summary are fetched in parallel; a 403 evicts the cached access.
    pub async fn open_contest(
        gateway: Arc<ApiGateway>,
        access: Arc<AccessController>,
        contest_id: i64,
        order: usize,
    ) -> Result<Self, ApiError> {
        let result = tokio::try_join!(
            gateway.get_contest_problem(contest_id, order),
            gateway.get_contest(contest_id),
        );
        match result {
            Ok((problem, contest)) => Ok(Self::assemble(
                gateway,
                Some(access),
                problem,
                Some(contest),
                true,
            )),
            Err(e) => {
                if e.is_forbidden() {
                    access.note_forbidden(contest_id);
                }
                Err(e)
            }
        }
    }

    fn assemble(
        gateway: Arc<ApiGateway>,
        access: Option<Arc<AccessController>>,
        problem: Problem,
        contest: Option<Contest>,
        gated: bool,
    ) -> Self {
        let workspace = Self {
            gateway,
            access,
            problem,
            contest,
            gated,
            language: RwLock::new(Language::Cpp),
            code: RwLock::new(String::new()),
            submitting: AtomicBool::new(false),
        };
        workspace.enforce_whitelist();
        workspace
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn contest(&self) -> Option<&Contest> {
        self.contest.as_ref()
    }

    pub fn language(&self) -> Language {
        *self.language.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn code(&self) -> String {
        self.code.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_code(&self, code: impl Into<String>) {
        *self.code.write().unwrap_or_else(|e| e.into_inner()) = code.into();
    }

    pub fn set_language(&self, language: Language) {
        *self.language.write().unwrap_or_else(|e| e.into_inner()) = language;
    }

    /// Switch to an allowed language when the current one is not in the
    /// contest whitelist, resetting the buffer.
    fn enforce_whitelist(&self) {
        let Some(contest) = &self.contest else { return };
        let current = self.language();
        if let Some(next) = Language::pick_allowed(current, &contest.languages) {
            if next != current {
                self.set_language(next);
                self.set_code(String::new());
            }
        }
    }

    /// The local "contest ended" gate. OI only; other rules defer to the
    /// server.
    pub fn ended(&self, now: DateTime<Utc>) -> bool {
        self.gated
            && self
                .contest
                .as_ref()
                .is_some_and(|c| c.locally_ended(now))
    }

    pub fn can_run(&self, now: DateTime<Utc>) -> bool {
        !self.ended(now) && !self.code().is_empty()
    }

    pub fn editor_config(&self, preferences: &Preferences, system_dark: bool) -> EditorConfig {
        EditorConfig::derive(preferences, self.language(), system_dark)
    }

    /// Submit the buffer. Success navigates to `/submissions`.
    pub async fn submit(&self, now: DateTime<Utc>) -> Result<Route, SubmitError> {
        if self.ended(now) {
            return Err(SubmitError::ContestEnded);
        }
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }

        let body = NewSubmission {
            problem_id: self.problem.id,
            code: self.code(),
            language: self.language(),
            contest_id: self.gated.then(|| self.contest.as_ref().map(|c| c.id)).flatten(),
        };
        let result = self.gateway.create_submission(&body).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(_) => Ok(Route::Submissions),
            Err(e) => {
                if e.is_forbidden() {
                    if let (Some(access), Some(contest)) = (&self.access, &self.contest) {
                        access.note_forbidden(contest.id);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Custom-input run.
    pub async fn run(&self, input: &str, now: DateTime<Utc>) -> Result<RunResponse, RunError> {
        if self.ended(now) {
            return Err(RunError::ContestEnded);
        }
        let code = self.code();
        if code.is_empty() {
            return Err(RunError::EmptyCode);
        }
        let body = RunRequest {
            problem_id: self.problem.id,
            code,
            language: self.language(),
            input: input.to_string(),
        };
        match self.gateway.run(&body).await {
            Ok(response) => Ok(response),
            Err(ApiError::RateLimited) => Err(RunError::RateLimited),
            Err(e) => Err(RunError::Other(e.to_string())),
        }
    }
}
