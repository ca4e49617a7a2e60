//! Participant pool and result lists
//!
//! Names come from free text (one per line). Each entry gets a synthetic
//! [`ParticipantId`] so duplicate names stay distinguishable; every pool and
//! result operation is keyed on the id, never the display name.

use serde::{Deserialize, Serialize};

use super::selection::{Outcome, OutcomeStatus};
use crate::palette::{Color, color_for_name};

/// Names loaded by "add example"
pub const EXAMPLE_NAMES: [&str; 8] = [
    "Pablo", "Nathan", "Sofia", "Jenna", "Sam", "Alex", "Maria", "Carlos",
];

/// Stable identity of one participant entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

/// One entry of the active pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Trimmed, non-empty
    pub name: String,
    pub color: Color,
}

/// A resolved participant in the results or absentees list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub id: ParticipantId,
    pub name: String,
}

/// Search-filtered view over all three lists
#[derive(Debug, Default)]
pub struct RosterView<'a> {
    pub participants: Vec<&'a Participant>,
    pub results: Vec<&'a ResultEntry>,
    pub absentees: Vec<&'a ResultEntry>,
}

/// Split text into trimmed, non-empty names
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pool: Vec<Participant>,
    results: Vec<ResultEntry>,
    absentees: Vec<ResultEntry>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut roster = Self::new();
        roster.set_text(text);
        roster
    }

    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn absentees(&self) -> &[ResultEntry] {
        &self.absentees
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.pool.get(index)
    }

    fn allocate_id(&mut self) -> ParticipantId {
        // Default-constructed rosters start at 0; keep ids non-zero either way
        self.next_id = self.next_id.max(1);
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace the pool from text. Returns whether the pool changed.
    ///
    /// The k-th occurrence of a name keeps the id of the previous k-th
    /// occurrence, so editing unrelated lines does not re-identify anyone.
    pub fn set_text(&mut self, text: &str) -> bool {
        let names = parse_names(text);
        let old_ids: Vec<ParticipantId> = self.pool.iter().map(|p| p.id).collect();
        let mut previous: Vec<Option<Participant>> =
            std::mem::take(&mut self.pool).into_iter().map(Some).collect();

        let mut pool = Vec::with_capacity(names.len());
        for name in names {
            let reused = previous
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|p| p.name == name))
                .and_then(|slot| slot.take());
            let participant = match reused {
                Some(p) => p,
                None => Participant {
                    id: self.allocate_id(),
                    color: color_for_name(&name),
                    name,
                },
            };
            pool.push(participant);
        }

        let changed = pool.iter().map(|p| p.id).ne(old_ids.iter().copied());
        self.pool = pool;
        changed
    }

    /// The pool as text, one name per line
    pub fn text(&self) -> String {
        self.pool
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Empty the pool (result lists are kept)
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Replace the pool with the built-in example names
    pub fn load_example(&mut self) -> bool {
        self.set_text(&EXAMPLE_NAMES.join("\n"))
    }

    /// Remove one entry from the pool
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let pos = self.pool.iter().position(|p| p.id == id)?;
        Some(self.pool.remove(pos))
    }

    /// File a resolved outcome: remove from the pool and append to the
    /// matching list, moving it out of the opposite list if needed.
    /// Returns whether anything changed.
    pub fn record(&mut self, outcome: &Outcome) -> bool {
        let (target, opposite) = match outcome.status {
            OutcomeStatus::Present => (&mut self.results, &mut self.absentees),
            OutcomeStatus::Absent => (&mut self.absentees, &mut self.results),
            OutcomeStatus::Pending => return false,
        };

        let mut changed = false;
        let before = opposite.len();
        opposite.retain(|e| e.id != outcome.participant);
        changed |= opposite.len() != before;

        if !target.iter().any(|e| e.id == outcome.participant) {
            target.push(ResultEntry {
                id: outcome.participant,
                name: outcome.name.clone(),
            });
            changed = true;
        }

        changed |= self.remove(outcome.participant).is_some();
        changed
    }

    /// Case-insensitive substring filter over all lists; empty query matches all
    pub fn filter(&self, query: &str) -> RosterView<'_> {
        let needle = query.trim().to_lowercase();
        let matches = |name: &str| needle.is_empty() || name.to_lowercase().contains(&needle);
        RosterView {
            participants: self.pool.iter().filter(|p| matches(p.name.as_str())).collect(),
            results: self.results.iter().filter(|e| matches(e.name.as_str())).collect(),
            absentees: self.absentees.iter().filter(|e| matches(e.name.as_str())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(p: &Participant, status: OutcomeStatus) -> Outcome {
        Outcome {
            participant: p.id,
            name: p.name.clone(),
            status,
        }
    }

    fn names(roster: &Roster) -> Vec<&str> {
        roster.pool().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        assert_eq!(
            parse_names("  Ana \n\n\tBeto\n   \nCaro"),
            vec!["Ana", "Beto", "Caro"]
        );
        assert!(parse_names("").is_empty());
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let roster = Roster::from_text("Ana\nAna\nBeto");
        let ids: Vec<_> = roster.pool().iter().map(|p| p.id).collect();
        assert_ne!(ids[0], ids[1]);
        assert_eq!(roster.pool()[0].color, roster.pool()[1].color);
    }

    #[test]
    fn test_reparse_keeps_ids() {
        let mut roster = Roster::from_text("Ana\nBeto\nAna");
        let before: Vec<_> = roster.pool().iter().map(|p| p.id).collect();

        assert!(roster.set_text("Zoe\nAna\nBeto\nAna"));
        let after: Vec<_> = roster.pool().iter().map(|p| p.id).collect();
        assert_eq!(&after[1..], &before[..]);

        // Identical text is not a change
        assert!(!roster.set_text("Zoe\n  Ana\nBeto\nAna\n"));
        let again: Vec<_> = roster.pool().iter().map(|p| p.id).collect();
        assert_eq!(again, after);
    }

    #[test]
    fn test_reorder_is_a_change() {
        let mut roster = Roster::from_text("Ana\nBeto");
        assert!(roster.set_text("Beto\nAna"));
        assert_eq!(names(&roster), vec!["Beto", "Ana"]);
    }

    #[test]
    fn test_dropping_a_line_is_a_change() {
        let mut roster = Roster::from_text("Ana\nBeto");
        assert!(roster.set_text("Ana"));
        assert_eq!(names(&roster), vec!["Ana"]);
    }

    #[test]
    fn test_record_present_and_absent() {
        let mut roster = Roster::from_text("Ana\nBeto\nCaro");
        let beto = roster.pool()[1].clone();
        assert!(roster.record(&outcome(&beto, OutcomeStatus::Present)));
        assert_eq!(names(&roster), vec!["Ana", "Caro"]);
        assert_eq!(roster.results()[0].name, "Beto");
        assert!(roster.absentees().is_empty());

        let ana = roster.pool()[0].clone();
        assert!(roster.record(&outcome(&ana, OutcomeStatus::Absent)));
        assert_eq!(names(&roster), vec!["Caro"]);
        assert_eq!(roster.absentees()[0].name, "Ana");
        assert_eq!(roster.results().len(), 1);
    }

    #[test]
    fn test_record_is_idempotent_and_moves_between_lists() {
        let mut roster = Roster::from_text("Ana\nBeto");
        let ana = roster.pool()[0].clone();
        assert!(roster.record(&outcome(&ana, OutcomeStatus::Present)));
        // Re-resolving an already removed entry the same way is a no-op
        assert!(!roster.record(&outcome(&ana, OutcomeStatus::Present)));
        assert_eq!(roster.results().len(), 1);

        // Resolving the other way moves it instead of duplicating
        assert!(roster.record(&outcome(&ana, OutcomeStatus::Absent)));
        assert!(roster.results().is_empty());
        assert_eq!(roster.absentees().len(), 1);
        assert_eq!(names(&roster), vec!["Beto"]);
    }

    #[test]
    fn test_record_removes_only_that_duplicate() {
        let mut roster = Roster::from_text("Ana\nAna");
        let first = roster.pool()[0].clone();
        roster.record(&outcome(&first, OutcomeStatus::Present));
        assert_eq!(roster.len(), 1);
        assert_ne!(roster.pool()[0].id, first.id);
        assert_eq!(roster.text(), "Ana");
    }

    #[test]
    fn test_pending_outcome_is_ignored() {
        let mut roster = Roster::from_text("Ana");
        let ana = roster.pool()[0].clone();
        assert!(!roster.record(&outcome(&ana, OutcomeStatus::Pending)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut roster = Roster::from_text("Maria\nMario\nSam");
        let sam = roster.pool()[2].clone();
        roster.record(&outcome(&sam, OutcomeStatus::Absent));

        let view = roster.filter("MAR");
        assert_eq!(view.participants.len(), 2);
        assert!(view.absentees.is_empty());

        let view = roster.filter(" sa ");
        assert!(view.participants.is_empty());
        assert_eq!(view.absentees.len(), 1);

        let view = roster.filter("");
        assert_eq!(view.participants.len(), 2);
        assert_eq!(view.absentees.len(), 1);
    }

    #[test]
    fn test_clear_and_example() {
        let mut roster = Roster::new();
        assert!(roster.load_example());
        assert_eq!(roster.len(), EXAMPLE_NAMES.len());
        roster.clear();
        assert!(roster.is_empty());
        assert_eq!(roster.text(), "");
    }
}
