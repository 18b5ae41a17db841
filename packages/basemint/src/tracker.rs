//! Transaction lifecycle tracker
//!
//! One write call, four user-visible states: Idle until a hash exists,
//! Submitted while awaiting first inclusion, Confirming while awaiting the
//! required depth, then terminal Confirmed or Failed. Transitions are driven
//! entirely by a [`TxCollaborator`] (the wallet/RPC layer); the tracker owns
//! no retry logic and cannot cancel a submitted transaction.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use alloy::primitives::TxHash;

use crate::calls::TokenCall;

/// Failure from the signing/submission/confirmation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The signer declined to sign.
    #[error("signature rejected: {0}")]
    Rejected(String),
    /// Network or node failure, before or after a hash was obtained.
    #[error("rpc error: {0}")]
    Rpc(String),
    /// Included on-chain but reverted.
    #[error("transaction reverted on-chain")]
    Reverted,
}

impl SubmitError {
    /// Short human-readable form, for inline display.
    pub fn short_message(&self) -> &'static str {
        match self {
            SubmitError::Rejected(_) => "Signature rejected",
            SubmitError::Rpc(_) => "Network error",
            SubmitError::Reverted => "Transaction reverted",
        }
    }
}

/// Terminal failure details: a short message for the form, the full
/// diagnostic for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxFailure {
    pub short: String,
    pub detail: String,
}

impl From<&SubmitError> for TxFailure {
    fn from(error: &SubmitError) -> Self {
        Self {
            short: error.short_message().to_string(),
            detail: error.to_string(),
        }
    }
}

/// Where a tracked transaction currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStage {
    /// No submission attempted since construction or the last reset.
    Idle,
    /// Hash assigned, awaiting first on-chain inclusion.
    Submitted { hash: TxHash },
    /// Included, awaiting the required confirmation depth.
    Confirming { hash: TxHash },
    /// Terminal: confirmed at the required depth.
    Confirmed { hash: TxHash },
    /// Terminal: rejected, errored, or reverted. The hash is present only
    /// if the failure happened after submission.
    Failed {
        hash: Option<TxHash>,
        failure: TxFailure,
    },
}

impl TxStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStage::Confirmed { .. } | TxStage::Failed { .. })
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, TxStage::Submitted { .. } | TxStage::Confirming { .. })
    }

    /// The transaction hash, once known.
    pub fn hash(&self) -> Option<TxHash> {
        match self {
            TxStage::Idle => None,
            TxStage::Submitted { hash }
            | TxStage::Confirming { hash }
            | TxStage::Confirmed { hash } => Some(*hash),
            TxStage::Failed { hash, .. } => *hash,
        }
    }
}

/// First inclusion of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    pub hash: TxHash,
    pub block_number: u64,
    /// The receipt carried a failed status.
    pub reverted: bool,
}

/// The external signing/RPC collaborator: submit returns an identifier,
/// awaiting inclusion and confirmation yield terminal outcomes. Fakes can
/// resolve all three synchronously.
#[async_trait]
pub trait TxCollaborator: Send + Sync {
    /// Sign and submit; returns the transaction hash.
    async fn submit(&self, call: &TokenCall) -> Result<TxHash, SubmitError>;

    /// Wait until the transaction is included in a block.
    async fn wait_included(&self, hash: TxHash) -> Result<Inclusion, SubmitError>;

    /// Wait until the inclusion has reached the required confirmation depth.
    async fn wait_confirmed(&self, inclusion: &Inclusion) -> Result<(), SubmitError>;
}

/// Attempted to start a submission while one is already tracked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a transaction is already being tracked; reset before resubmitting")]
pub struct TrackerBusy;

/// Tracks exactly one in-flight write call at a time.
#[derive(Debug)]
pub struct TxTracker {
    stage: TxStage,
}

impl Default for TxTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TxTracker {
    pub fn new() -> Self {
        Self {
            stage: TxStage::Idle,
        }
    }

    pub fn stage(&self) -> &TxStage {
        &self.stage
    }

    pub fn hash(&self) -> Option<TxHash> {
        self.stage.hash()
    }

    /// Terminal failure details, if the last run failed.
    pub fn failure(&self) -> Option<&TxFailure> {
        match &self.stage {
            TxStage::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Return to Idle, discarding the hash and any failure. Does not cancel
    /// an already-submitted transaction; the wallet offers no such thing.
    pub fn reset(&mut self) {
        self.stage = TxStage::Idle;
    }

    /// Drive one call to a terminal stage. Failures land in the stage, not
    /// in the return value; the only error is starting while non-Idle.
    pub async fn run<C: TxCollaborator + ?Sized>(
        &mut self,
        collaborator: &C,
        call: &TokenCall,
    ) -> Result<&TxStage, TrackerBusy> {
        self.run_with(collaborator, call, |_| {}).await
    }

    /// Like [`TxTracker::run`], invoking `progress` at every transition so a
    /// frontend can render intermediate states.
    pub async fn run_with<C, F>(
        &mut self,
        collaborator: &C,
        call: &TokenCall,
        mut progress: F,
    ) -> Result<&TxStage, TrackerBusy>
    where
        C: TxCollaborator + ?Sized,
        F: FnMut(&TxStage),
    {
        if self.stage != TxStage::Idle {
            return Err(TrackerBusy);
        }

        debug!(
            target_address = %call.target(),
            function = call.function_name(),
            "submitting call"
        );

        let hash = match collaborator.submit(call).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!(error = %e, function = call.function_name(), "submission failed");
                self.transition(
                    TxStage::Failed {
                        hash: None,
                        failure: TxFailure::from(&e),
                    },
                    &mut progress,
                );
                return Ok(&self.stage);
            }
        };
        self.transition(TxStage::Submitted { hash }, &mut progress);

        let inclusion = match collaborator.wait_included(hash).await {
            Ok(inclusion) => inclusion,
            Err(e) => {
                warn!(tx_hash = %hash, error = %e, "inclusion wait failed");
                self.transition(
                    TxStage::Failed {
                        hash: Some(hash),
                        failure: TxFailure::from(&e),
                    },
                    &mut progress,
                );
                return Ok(&self.stage);
            }
        };
        self.transition(TxStage::Confirming { hash }, &mut progress);

        if inclusion.reverted {
            self.transition(
                TxStage::Failed {
                    hash: Some(hash),
                    failure: TxFailure::from(&SubmitError::Reverted),
                },
                &mut progress,
            );
            return Ok(&self.stage);
        }

        match collaborator.wait_confirmed(&inclusion).await {
            Ok(()) => {
                info!(tx_hash = %hash, "transaction confirmed");
                self.transition(TxStage::Confirmed { hash }, &mut progress);
            }
            Err(e) => {
                warn!(tx_hash = %hash, error = %e, "confirmation failed");
                self.transition(
                    TxStage::Failed {
                        hash: Some(hash),
                        failure: TxFailure::from(&e),
                    },
                    &mut progress,
                );
            }
        }

        Ok(&self.stage)
    }

    fn transition<F: FnMut(&TxStage)>(&mut self, next: TxStage, progress: &mut F) {
        self.stage = next;
        progress(&self.stage);
    }
}
