//! Domain-level error type used across the engine, the store and the clients.
//!
//! This error type is transport- and DB-agnostic. Store implementations
//! translate their backend errors into it (see `crate::infra::db_errors`),
//! and the engine adds validation/authorization failures plus an
//! operation context via [`DomainError::context`].

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    /// An upstream HTTP collaborator could not be reached or misbehaved.
    Upstream,
    /// An upstream collaborator returned data that violates its contract.
    MalformedUpstream,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Pairing,
    Set,
    Card,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    PlayerAlreadyJoined,
    PlayerAlreadyDropped,
    /// Engine-level: the caller's match has already been reported.
    MatchAlreadyReported,
    /// Store-level: the compare-and-set on a pairing row did not apply.
    PairingAlreadyReported,
    LeagueAlreadyOngoing,
    NoActiveLeague,
    InsufficientBalance,
    Unique(String),
    Other(String),
}

/// Validation failures raised by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidMatchResult,
    AmbiguousCardName,
    SetNotUnlocked,
    InvalidPackCount,
    Other(String),
}

/// Authorization failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    NotAdmin,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with the current league state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Caller lacks the privilege for the operation
    Forbidden(ForbiddenKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Forbidden(kind, d) => write!(f, "forbidden {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Prefix the detail with an operation description, keeping the kind.
    ///
    /// `"player already joined"` becomes
    /// `"failed to join league: player already joined"`.
    pub fn context(self, op: &str) -> Self {
        match self {
            DomainError::Validation(k, d) => DomainError::Validation(k, format!("{op}: {d}")),
            DomainError::Conflict(k, d) => DomainError::Conflict(k, format!("{op}: {d}")),
            DomainError::NotFound(k, d) => DomainError::NotFound(k, format!("{op}: {d}")),
            DomainError::Forbidden(k, d) => DomainError::Forbidden(k, format!("{op}: {d}")),
            DomainError::Infra(k, d) => DomainError::Infra(k, format!("{op}: {d}")),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Forbidden(_, d)
            | DomainError::Infra(_, d) => d,
        }
    }

    pub fn is_conflict(&self, kind: ConflictKind) -> bool {
        matches!(self, DomainError::Conflict(k, _) if *k == kind)
    }

    pub fn is_not_found(&self, kind: NotFoundKind) -> bool {
        matches!(self, DomainError::NotFound(k, _) if *k == kind)
    }

    pub fn is_validation(&self, kind: ValidationKind) -> bool {
        matches!(self, DomainError::Validation(k, _) if *k == kind)
    }

    pub fn is_forbidden(&self, kind: ForbiddenKind) -> bool {
        matches!(self, DomainError::Forbidden(k, _) if *k == kind)
    }

    pub fn is_infra(&self) -> bool {
        matches!(self, DomainError::Infra(..))
    }

    /// Plain-language rendering for the command layer.
    ///
    /// Infra failures never leak their detail; callers are expected to log
    /// the full error before showing this.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::PlayerAlreadyJoined => "You've already joined the league.".into(),
                ConflictKind::PlayerAlreadyDropped => "You've already dropped from the league.".into(),
                ConflictKind::MatchAlreadyReported | ConflictKind::PairingAlreadyReported => {
                    "This match has already been reported.".into()
                }
                ConflictKind::LeagueAlreadyOngoing => "A league is already running.".into(),
                ConflictKind::NoActiveLeague => "There is no active league right now.".into(),
                ConflictKind::InsufficientBalance => {
                    "You don't have enough wild cards or packs for that.".into()
                }
                ConflictKind::Unique(_) | ConflictKind::Other(_) => {
                    "That conflicts with the current league state.".into()
                }
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Player => "You haven't joined the league yet.".into(),
                NotFoundKind::Pairing => "You don't have an open pairing this round.".into(),
                NotFoundKind::Set => "That set doesn't exist.".into(),
                NotFoundKind::Card => "No card matches that.".into(),
                NotFoundKind::Other(what) => format!("{what} not found."),
            },
            DomainError::Validation(kind, detail) => match kind {
                ValidationKind::InvalidMatchResult => {
                    "That isn't a valid match result; at least one game must be reported.".into()
                }
                ValidationKind::AmbiguousCardName => {
                    "More than one card matches that name, please be more specific.".into()
                }
                ValidationKind::SetNotUnlocked => "That set isn't part of the league yet.".into(),
                ValidationKind::InvalidPackCount => "You need to redeem at least one pack.".into(),
                ValidationKind::Other(_) => detail.clone(),
            },
            DomainError::Forbidden(ForbiddenKind::NotAdmin, _) => {
                "Only league admins can do that.".into()
            }
            DomainError::Infra(..) => {
                "Something went wrong on our side, please try again later.".into()
            }
        }
    }
}

/// Attach an operation context to the error side of a result.
pub trait DomainResultExt<T> {
    fn op_context(self, op: &str) -> Result<T, DomainError>;
}

impl<T> DomainResultExt<T> for Result<T, DomainError> {
    fn op_context(self, op: &str) -> Result<T, DomainError> {
        self.map_err(|e| e.context(op))
    }
}
