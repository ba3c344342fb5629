//! Participants and their wire records

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{MeetgridError, SlotIssue};
use crate::types::slot::{Granularity, Slot};
use crate::types::slot_set::SlotSet;

/// A person who has responded to a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub availability: SlotSet,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, availability: SlotSet) -> Self {
        Self { id: id.into(), name: name.into(), availability }
    }

    /// Copy with availability replaced.
    #[must_use]
    pub fn with_availability(&self, availability: SlotSet) -> Self {
        Self { id: self.id.clone(), name: self.name.clone(), availability }
    }

    pub fn to_record(&self) -> ParticipantRecord {
        ParticipantRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            availability: self.availability.iter().map(Slot::to_wire).collect(),
        }
    }

    pub fn summary(&self) -> ParticipantSummary {
        ParticipantSummary { id: self.id.clone(), name: self.name.clone() }
    }
}

/// Participant as persisted: availability is a list of ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub availability: Vec<String>,
}

impl ParticipantRecord {
    /// Convert into a [`Participant`] under the schedule's granularity.
    ///
    /// Entries that fail to parse, or that belong to the other granularity,
    /// are dropped and reported back; the conversion itself never fails.
    pub fn into_participant(self, granularity: Granularity) -> (Participant, Vec<SlotIssue>) {
        let (availability, issues) =
            parse_slots(Some(&self.id), self.availability.iter().map(String::as_str), granularity);
        (Participant { id: self.id, name: self.name, availability }, issues)
    }
}

/// Identity of a participant without their availability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ParticipantSummary {
    pub id: String,
    pub name: String,
}

/// Parse a batch of wire slots, collecting failures instead of aborting.
pub fn parse_slots<'a, I>(
    participant_id: Option<&str>,
    raw: I,
    granularity: Granularity,
) -> (SlotSet, Vec<SlotIssue>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slots = SlotSet::new();
    let mut issues = Vec::new();
    for entry in raw {
        match Slot::parse(entry, granularity) {
            Ok(slot) => {
                slots.insert(slot);
            }
            Err(error) => issues.push(issue(participant_id, entry, error)),
        }
    }
    (slots, issues)
}

fn issue(participant_id: Option<&str>, raw: &str, error: MeetgridError) -> SlotIssue {
    SlotIssue { participant_id: participant_id.map(str::to_owned), raw: raw.to_owned(), error }
}
