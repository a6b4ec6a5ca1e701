use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

pub type StateId = u32;

const GAMEKITTY_JSON: &str = include_str!("../../assets/gamekitty.json");

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid state graph document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("state graph has no states")]
    Empty,
    #[error("state id is not a non-negative integer: {0:?}")]
    InvalidId(String),
    #[error("duplicate state id: {0}")]
    DuplicateState(StateId),
    #[error("state {0} has an empty frame list")]
    EmptyFrames(StateId),
    #[error("state {0} has no successors")]
    EmptySuccessors(StateId),
    #[error("state {state} lists unknown successor {successor}")]
    DanglingSuccessor { state: StateId, successor: StateId },
    #[error("entry state {0} is not in the graph")]
    MissingEntry(StateId),
}

/// One node of the animation graph.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub id: StateId,
    /// Sprite-sheet frame indices, played in order.
    pub frames: Vec<u32>,
    /// Successor ids. Repeats weight the random pick.
    pub successors: Vec<StateId>,
    /// Horizontal move applied once the frames have played out.
    pub x_offset: i32,
    pub flip_x: bool,
    next_slots: Vec<usize>,
}

impl State {
    pub fn new(id: StateId, frames: Vec<u32>, successors: Vec<StateId>) -> Self {
        Self {
            id,
            frames,
            successors,
            x_offset: 0,
            flip_x: false,
            next_slots: Vec::new(),
        }
    }

    pub fn with_x_offset(mut self, x_offset: i32) -> Self {
        self.x_offset = x_offset;
        self
    }

    pub fn with_flip_x(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }
}

/// Validated, immutable state graph.
///
/// States are stored densely; successor ids are resolved to slots once at
/// load time so playback never has to look anything up by id.
#[derive(Clone, Debug)]
pub struct StateGraph {
    states: Vec<State>,
    slot_by_id: HashMap<StateId, usize>,
    entry_slot: usize,
}

impl StateGraph {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// The "gamekitty" cat from the PICO-8 cartridge.
    pub fn gamekitty() -> Result<Self, GraphError> {
        Self::from_json(GAMEKITTY_JSON)
    }

    /// Build from states directly. `entry` of `None` picks the smallest id.
    pub fn from_states(states: Vec<State>, entry: Option<StateId>) -> Result<Self, GraphError> {
        if states.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut by_id: BTreeMap<StateId, State> = BTreeMap::new();
        for state in states.into_iter() {
            if state.frames.is_empty() {
                return Err(GraphError::EmptyFrames(state.id));
            }
            if state.successors.is_empty() {
                return Err(GraphError::EmptySuccessors(state.id));
            }
            let id = state.id;
            if by_id.insert(id, state).is_some() {
                return Err(GraphError::DuplicateState(id));
            }
        }

        let slot_by_id: HashMap<StateId, usize> = by_id
            .keys()
            .enumerate()
            .map(|(slot, id)| (*id, slot))
            .collect();

        let mut states: Vec<State> = by_id.into_values().collect();
        for state in states.iter_mut() {
            let mut slots = Vec::with_capacity(state.successors.len());
            for next in state.successors.iter() {
                let slot = slot_by_id
                    .get(next)
                    .copied()
                    .ok_or(GraphError::DanglingSuccessor {
                        state: state.id,
                        successor: *next,
                    })?;
                slots.push(slot);
            }
            state.next_slots = slots;
        }

        // BTreeMap order: slot 0 holds the smallest id.
        let entry_slot = match entry {
            None => 0,
            Some(id) => slot_by_id
                .get(&id)
                .copied()
                .ok_or(GraphError::MissingEntry(id))?,
        };

        log::info!(
            "state graph loaded: {} states, entry {}",
            states.len(),
            states[entry_slot].id
        );

        Ok(Self {
            states,
            slot_by_id,
            entry_slot,
        })
    }

    /// Same graph, different entry state.
    pub fn with_entry(mut self, id: StateId) -> Result<Self, GraphError> {
        self.entry_slot = self.slot(id).ok_or(GraphError::MissingEntry(id))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn entry(&self) -> StateId {
        self.states[self.entry_slot].id
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.slot(id).map(|slot| &self.states[slot])
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(|s| s.id)
    }

    pub(crate) fn entry_slot(&self) -> usize {
        self.entry_slot
    }

    pub(crate) fn slot(&self, id: StateId) -> Option<usize> {
        self.slot_by_id.get(&id).copied()
    }

    pub(crate) fn by_slot(&self, slot: usize) -> &State {
        &self.states[slot]
    }

    pub(crate) fn successor_slot(&self, slot: usize, pick: usize) -> usize {
        self.states[slot].next_slots[pick]
    }

    fn from_document(doc: GraphDocument) -> Result<Self, GraphError> {
        let states = match doc.states {
            StatesDocument::Keyed(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, entry) in entries.into_iter() {
                    let id: StateId = key
                        .trim()
                        .parse()
                        .map_err(|_| GraphError::InvalidId(key.clone()))?;
                    out.push(entry.into_state(id));
                }
                out
            }
            // Positional lists number states from 1, like the Lua table they came from.
            StatesDocument::Listed(list) => list
                .into_iter()
                .enumerate()
                .map(|(idx, entry)| entry.into_state(idx as StateId + 1))
                .collect(),
        };

        Self::from_states(states, doc.start)
    }
}

/// Top-level document: a bare keyed map, a bare list, or
/// `{"start": .., "states": ..}`. A bare keyed map may also carry `start`.
struct GraphDocument {
    start: Option<StateId>,
    states: StatesDocument,
}

/// Keyed entries stay a list so repeated keys reach the duplicate check.
enum StatesDocument {
    Keyed(Vec<(String, StateEntry)>),
    Listed(Vec<StateEntry>),
}

fn read_listed<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<Vec<StateEntry>, A::Error> {
    let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(entry) = seq.next_element::<StateEntry>()? {
        list.push(entry);
    }
    Ok(list)
}

impl<'de> Deserialize<'de> for StatesDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatesVisitor)
    }
}

struct StatesVisitor;

impl<'de> Visitor<'de> for StatesVisitor {
    type Value = StatesDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of state id to state, or a list of states")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Ok(StatesDocument::Listed(read_listed(seq)?))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let entry = map.next_value::<StateEntry>()?;
            entries.push((key, entry));
        }
        Ok(StatesDocument::Keyed(entries))
    }
}

impl<'de> Deserialize<'de> for GraphDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GraphVisitor)
    }
}

struct GraphVisitor;

impl<'de> Visitor<'de> for GraphVisitor {
    type Value = GraphDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a state graph document")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Ok(GraphDocument {
            start: None,
            states: StatesDocument::Listed(read_listed(seq)?),
        })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut start: Option<Option<StateId>> = None;
        let mut states: Option<StatesDocument> = None;
        let mut keyed = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "start" => {
                    if start.is_some() {
                        return Err(de::Error::duplicate_field("start"));
                    }
                    start = Some(map.next_value()?);
                }
                "states" => {
                    if states.is_some() {
                        return Err(de::Error::duplicate_field("states"));
                    }
                    states = Some(map.next_value()?);
                }
                _ => {
                    let entry = map.next_value::<StateEntry>()?;
                    keyed.push((key, entry));
                }
            }
        }

        let states = match states {
            Some(_) if !keyed.is_empty() => {
                return Err(de::Error::custom(format!(
                    "state {:?} sits beside a \"states\" field",
                    keyed[0].0
                )));
            }
            Some(states) => states,
            None => StatesDocument::Keyed(keyed),
        };

        Ok(GraphDocument {
            start: start.flatten(),
            states,
        })
    }
}

#[derive(Deserialize)]
struct StateEntry {
    s: Vec<u32>,
    next: Vec<StateId>,
    #[serde(default)]
    xo: i32,
    #[serde(default)]
    flipx: bool,
}

impl StateEntry {
    fn into_state(self, id: StateId) -> State {
        State::new(id, self.s, self.next)
            .with_x_offset(self.xo)
            .with_flip_x(self.flipx)
    }
}
