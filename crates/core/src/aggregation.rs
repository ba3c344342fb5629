//! Availability aggregation
//!
//! Turns a snapshot of participants into per-slot counts and ratios, the
//! highlight set for a chosen group of participants, and a ranking of the
//! best candidate slots. Everything is recomputed from scratch on each call.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use meetgrid_domain::{
    intersect_availability, AggregationResult, Participant, RankedSlot, Slot, SlotSet,
};
use serde::Serialize;

/// Number of participants available in each candidate slot. Slots outside
/// `candidates` are not counted.
pub fn compute_counts(candidates: &SlotSet, participants: &[Participant]) -> BTreeMap<Slot, usize> {
    candidates
        .iter()
        .map(|slot| {
            let count = participants.iter().filter(|p| p.availability.contains(slot)).count();
            (*slot, count)
        })
        .collect()
}

/// `count / total`, or zero for every slot when there are no participants.
pub fn compute_ratios(counts: &BTreeMap<Slot, usize>, total: usize) -> BTreeMap<Slot, f64> {
    counts.iter().map(|(slot, count)| (*slot, ratio(*count, total))).collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Slots every selected participant is available in.
///
/// No ids means no highlight. Ids that match no participant are ignored.
pub fn compute_highlight<S>(participants: &[Participant], selected_ids: &[S]) -> SlotSet
where
    S: AsRef<str>,
{
    if selected_ids.is_empty() {
        return SlotSet::new();
    }
    let wanted: BTreeSet<&str> = selected_ids.iter().map(AsRef::as_ref).collect();
    intersect_availability(
        participants
            .iter()
            .filter(|p| wanted.contains(p.id.as_str()))
            .map(|p| &p.availability),
    )
}

/// Add every highlighted slot to the current selection. Never removes.
pub fn apply_highlight_to_selection(current: &SlotSet, highlight: &SlotSet) -> SlotSet {
    current.union(highlight)
}

/// Counts, ratios, highlight and the top `best_limit` slots in one pass.
pub fn aggregate<S>(
    candidates: &SlotSet,
    participants: &[Participant],
    selected_ids: &[S],
    best_limit: usize,
) -> AggregationResult
where
    S: AsRef<str>,
{
    let per_slot_count = compute_counts(candidates, participants);
    let mut result = AggregationResult {
        per_slot_ratio: compute_ratios(&per_slot_count, participants.len()),
        per_slot_count,
        highlight: compute_highlight(participants, selected_ids),
        participant_count: participants.len(),
        best_slots: Vec::new(),
    };
    result.best_slots = rank_best_slots(&result, best_limit);
    result
}

/// Candidate slots ordered by count, most popular first, ties broken
/// chronologically. Slots nobody picked are left out.
pub fn rank_best_slots(result: &AggregationResult, limit: usize) -> Vec<RankedSlot> {
    let mut ranked: Vec<RankedSlot> = result
        .per_slot_count
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(slot, count)| RankedSlot {
            slot: *slot,
            count: *count,
            ratio: ratio(*count, result.participant_count),
        })
        .collect();
    // stable sort keeps the map's chronological order among equal counts
    ranked.sort_by_key(|entry| Reverse(entry.count));
    ranked.truncate(limit);
    ranked
}

/// How many candidate slots one participant marked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantAvailability {
    pub id: String,
    pub name: String,
    pub selected: usize,
    pub ratio: f64,
}

/// Per-participant totals over the candidate set, in input order.
pub fn availability_summary(
    candidates: &SlotSet,
    participants: &[Participant],
) -> Vec<ParticipantAvailability> {
    participants
        .iter()
        .map(|participant| {
            let selected =
                participant.availability.iter().filter(|slot| candidates.contains(slot)).count();
            ParticipantAvailability {
                id: participant.id.clone(),
                name: participant.name.clone(),
                selected,
                ratio: ratio(selected, candidates.len()),
            }
        })
        .collect()
}
