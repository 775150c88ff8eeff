//! Pluggable seams around the submission pipeline.
//!
//! Authorization, outbound notifications and rendering are infrastructure
//! concerns the core flow only talks to through these traits. Production
//! deployments supply real implementations; the defaults here keep a
//! single-process setup working out of the box.

use anyhow::Result;
use serde::Serialize;

use claimledger_claims::CaseState;
use claimledger_core::{ActorId, ActorRole, CaseId};

/// Decides whether an actor may act on a case at all. Role constraints per
/// command are enforced in the domain; this gate covers tenancy and
/// membership.
pub trait AccessControl: Send + Sync {
    fn authorize(&self, actor_id: ActorId, role: ActorRole, case_id: CaseId) -> bool;
}

/// Permits everything. The single-tenant default.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessControl for AllowAll {
    fn authorize(&self, _actor_id: ActorId, _role: ActorRole, _case_id: CaseId) -> bool {
        true
    }
}

/// Pushes a short update about a committed submission to an external system
/// (project portal, messaging). Called after commit, outside any lock; a
/// failure is logged and never rolls back the append.
pub trait CollaborationNotifier: Send + Sync {
    fn post_update(&self, external_ref: &str, summary: &str) -> Result<()>;
}

/// Swallows notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl CollaborationNotifier for NoopNotifier {
    fn post_update(&self, _external_ref: &str, _summary: &str) -> Result<()> {
        Ok(())
    }
}

/// Renders a case snapshot for export.
pub trait CaseRenderer: Send + Sync {
    fn render(&self, state: &CaseState) -> Result<Vec<u8>>;
}

/// JSON snapshot renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCaseRenderer;

impl CaseRenderer for JsonCaseRenderer {
    /// Serializes the snapshot a caller would show: id, version, overall
    /// status and the opening metadata.
    fn render(&self, state: &CaseState) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            case_id: CaseId,
            version: u64,
            overall_status: claimledger_claims::OverallStatus,
            meta: Option<&'a claimledger_claims::CaseMeta>,
        }
        let snapshot = Snapshot {
            case_id: state.case_id(),
            version: claimledger_core::AggregateRoot::version(state),
            overall_status: state.overall_status(),
            meta: state.meta(),
        };
        Ok(serde_json::to_vec_pretty(&snapshot)?)
    }
}
