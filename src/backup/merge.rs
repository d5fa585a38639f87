// src/backup/merge.rs
//! Merge engine: reconcile an imported settings map with the current one
//!
//! Imported keys are visited in ascending order. New keys are added,
//! identical records are ignored, and a differing record suspends the
//! session until the caller supplies a [`MergeDecision`]:
//!
//! ```text
//! Initializing ─▶ Scanning ──(conflict)──▶ AwaitingConflictDecision
//!                   ▲   │                      │  overwrite / skip
//!                   │   └─▶ Completed          │
//!                   └──────────────────────────┘
//!                         cancel ─▶ Aborted
//! ```
//!
//! The session works on a copy. Nothing reaches the store unless the
//! session completes.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::enums::MergeDecision;
use crate::error::{CoreError, Result};
use crate::settings::{Field, ParameterRecord, SettingsMap, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Initializing,
    Scanning,
    AwaitingConflictDecision,
    Completed,
    Aborted,
}

/// Same description, different parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: String,
    pub existing: ParameterRecord,
    pub imported: ParameterRecord,
}

impl Conflict {
    pub fn differing_fields(&self) -> Vec<Field> {
        self.existing.differing_fields(&self.imported)
    }
}

/// Where a session stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// Suspended; call [`MergeSession::resume`] with a decision
    Conflict(Conflict),
    Completed { added: usize },
    Aborted,
}

/// Final result reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Number of records added or overwritten
    Completed { added: usize },
    /// Cancelled by the user; the store is unchanged
    Aborted,
}

pub struct MergeSession {
    working: SettingsMap,
    imported: SettingsMap,
    keys: Vec<String>,
    cursor: usize,
    added: usize,
    aborted: bool,
    state: MergeState,
}

impl MergeSession {
    /// Seed the working map from `current` and queue the imported keys
    pub fn new(current: &SettingsMap, imported: SettingsMap) -> Self {
        let mut session = Self {
            working: SettingsMap::new(),
            imported,
            keys: Vec::new(),
            cursor: 0,
            added: 0,
            aborted: false,
            state: MergeState::Initializing,
        };
        session.working = current.clone();
        // BTreeMap keys are already in ascending order
        session.keys = session.imported.keys().cloned().collect();
        session.state = MergeState::Scanning;
        debug!(imported = session.keys.len(), "merge session started");
        session
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    pub fn added_count(&self) -> usize {
        self.added
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Scan forward to the next conflict or to the end.
    ///
    /// While suspended this re-reports the pending conflict; after the
    /// session has finished it reports the final step again.
    pub fn step(&mut self) -> Result<MergeStep> {
        match self.state {
            MergeState::AwaitingConflictDecision => {
                return self.pending_conflict().map(MergeStep::Conflict)
            }
            MergeState::Completed => return Ok(MergeStep::Completed { added: self.added }),
            MergeState::Aborted => return Ok(MergeStep::Aborted),
            MergeState::Initializing | MergeState::Scanning => {}
        }

        while let Some(key) = self.keys.get(self.cursor) {
            let Some(incoming) = self.imported.get(key) else {
                self.cursor += 1;
                continue;
            };

            match self.working.get(key) {
                None => {
                    debug!(%key, "merge: new setting");
                    self.working.insert(key.clone(), incoming.clone());
                    self.added += 1;
                    self.cursor += 1;
                }
                Some(existing) if existing == incoming => {
                    self.cursor += 1;
                }
                Some(existing) => {
                    let conflict = Conflict {
                        key: key.clone(),
                        existing: existing.clone(),
                        imported: incoming.clone(),
                    };
                    self.state = MergeState::AwaitingConflictDecision;
                    return Ok(MergeStep::Conflict(conflict));
                }
            }
        }

        self.state = MergeState::Completed;
        Ok(MergeStep::Completed { added: self.added })
    }

    /// Apply the decision for the pending conflict and keep scanning
    pub fn resume(&mut self, decision: MergeDecision) -> Result<MergeStep> {
        if self.state != MergeState::AwaitingConflictDecision {
            return Err(CoreError::NoPendingConflict);
        }
        let key = self
            .keys
            .get(self.cursor)
            .cloned()
            .ok_or(CoreError::NoPendingConflict)?;

        match decision {
            MergeDecision::Cancel => {
                self.aborted = true;
                self.state = MergeState::Aborted;
                self.working.clear();
                return Ok(MergeStep::Aborted);
            }
            MergeDecision::Overwrite => {
                if let Some(incoming) = self.imported.get(&key) {
                    self.working.insert(key.clone(), incoming.clone());
                    self.added += 1;
                }
            }
            MergeDecision::Skip => {}
        }
        debug!(%key, ?decision, "merge: conflict resolved");

        self.cursor += 1;
        self.state = MergeState::Scanning;
        self.step()
    }

    /// The merged map, only once the session has completed
    pub fn into_merged(self) -> Option<SettingsMap> {
        (self.state == MergeState::Completed).then_some(self.working)
    }

    fn pending_conflict(&self) -> Result<Conflict> {
        let key = self.keys.get(self.cursor).ok_or(CoreError::NoPendingConflict)?;
        match (self.working.get(key), self.imported.get(key)) {
            (Some(existing), Some(imported)) => Ok(Conflict {
                key: key.clone(),
                existing: existing.clone(),
                imported: imported.clone(),
            }),
            _ => Err(CoreError::NoPendingConflict),
        }
    }
}

/// Answers conflict prompts (a user, or a script in tests)
pub trait DecisionProvider {
    fn decide(&mut self, conflict: &Conflict) -> MergeDecision;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Conflict) -> MergeDecision,
{
    fn decide(&mut self, conflict: &Conflict) -> MergeDecision {
        self(conflict)
    }
}

/// Fixed sequence of decisions; cancels once exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    queue: VecDeque<MergeDecision>,
    seen: Vec<String>,
}

impl ScriptedDecisions {
    pub fn new(decisions: impl IntoIterator<Item = MergeDecision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
            seen: Vec::new(),
        }
    }

    /// Keys of the conflicts presented so far, in order
    pub fn seen(&self) -> &[String] {
        &self.seen
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn decide(&mut self, conflict: &Conflict) -> MergeDecision {
        self.seen.push(conflict.key.clone());
        self.queue.pop_front().unwrap_or(MergeDecision::Cancel)
    }
}

/// Run a full merge into `store`, asking `provider` at every conflict.
///
/// The store is replaced only on completion; an aborted merge leaves it
/// exactly as it was.
pub fn run_merge<D: DecisionProvider + ?Sized>(
    store: &mut SettingsStore,
    imported: SettingsMap,
    provider: &mut D,
) -> Result<MergeOutcome> {
    let mut session = MergeSession::new(store.records(), imported);
    let mut step = session.step()?;

    loop {
        match step {
            MergeStep::Conflict(conflict) => {
                let decision = provider.decide(&conflict);
                step = session.resume(decision)?;
            }
            MergeStep::Completed { added } => {
                if let Some(merged) = session.into_merged() {
                    store.replace_all(merged)?;
                }
                info!(added, "merge complete");
                return Ok(MergeOutcome::Completed { added });
            }
            MergeStep::Aborted => {
                info!("merge aborted by the user");
                return Ok(MergeOutcome::Aborted);
            }
        }
    }
}
