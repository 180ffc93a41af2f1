//! Merging a freshly fetched server batch into the held message list.
//!
//! The merge is idempotent: applying the same batch twice leaves the list
//! unchanged, because every incoming id is already present after the first
//! pass and the candidate set becomes empty.

use std::collections::HashSet;

use super::message::Message;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub messages: Vec<Message>,
    /// Server ids appended as genuinely new entries: not present by id
    /// before the pass and not matched to a pending local placeholder.
    /// The read tracker counts unread arrivals from this list.
    pub fresh_server_ids: Vec<String>,
    /// Ids of local placeholders that were replaced by their server echo.
    pub replaced_placeholder_ids: Vec<String>,
    pub changed: bool,
}

/// Merges `incoming` into `current`.
///
/// Candidates are incoming messages whose id is not yet present. Each
/// candidate first tries to replace an unmatched local placeholder with an
/// equal body (keeping the placeholder's position); otherwise it is appended.
/// The result is deduplicated by id (first occurrence wins) and trimmed from
/// the head down to `window_limit`.
pub fn reconcile(current: &[Message], incoming: &[Message], window_limit: usize) -> ReconcileOutcome {
    let existing_ids: HashSet<&str> = current.iter().map(|m| m.id.as_str()).collect();

    let mut candidate_ids: HashSet<&str> = HashSet::new();
    let candidates: Vec<&Message> = incoming
        .iter()
        .filter(|m| !existing_ids.contains(m.id.as_str()) && candidate_ids.insert(m.id.as_str()))
        .collect();

    if candidates.is_empty() {
        return ReconcileOutcome {
            messages: current.to_vec(),
            fresh_server_ids: Vec::new(),
            replaced_placeholder_ids: Vec::new(),
            changed: false,
        };
    }

    let mut merged = current.to_vec();
    let mut fresh_server_ids = Vec::new();
    let mut replaced_placeholder_ids = Vec::new();

    for candidate in candidates {
        // A replaced slot stops being a placeholder, so each placeholder
        // can absorb at most one candidate per pass.
        let matched = merged
            .iter()
            .position(|m| m.is_placeholder() && m.body == candidate.body);

        match matched {
            Some(index) => {
                replaced_placeholder_ids.push(merged[index].id.clone());
                merged[index] = candidate.clone();
            }
            None => {
                fresh_server_ids.push(candidate.id.clone());
                merged.push(candidate.clone());
            }
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    merged.retain(|m| seen.insert(m.id.clone()));

    if merged.len() > window_limit {
        let overflow = merged.len() - window_limit;
        merged.drain(..overflow);
    }

    ReconcileOutcome {
        messages: merged,
        fresh_server_ids,
        replaced_placeholder_ids,
        changed: true,
    }
}
