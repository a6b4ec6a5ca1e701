//! Sprite animation driven by a state graph.
//!
//! Each state plays its frames in order, holding each one for a fixed number
//! of ticks. When the last frame has been held, a successor is drawn
//! uniformly from the state's successor list (repeats weight the pick) and
//! playback restarts at that state's first frame.

use std::sync::Arc;

use crate::core::random::RandomSource;
use crate::domain::sprite_graph::{StateGraph, StateId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationCursor {
    pub state_id: StateId,
    pub frame_index: usize,
    pub frame_tick_counter: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame still within its hold time.
    Held,
    Advanced { frame: u32 },
    Transitioned { from: StateId, to: StateId, frame: u32 },
}

impl TickOutcome {
    pub fn changed_frame(&self) -> bool {
        !matches!(self, TickOutcome::Held)
    }
}

pub struct AnimationStateMachine<R: RandomSource> {
    graph: Arc<StateGraph>,
    rng: R,
    hold_ticks: u32,
    slot: usize,
    frame_index: usize,
    frame_tick_counter: u32,
    x_offset: i32,
}

impl<R: RandomSource> AnimationStateMachine<R> {
    /// `hold_ticks` of 0 is treated as 1.
    pub fn new(graph: Arc<StateGraph>, hold_ticks: u32, rng: R) -> Self {
        let slot = graph.entry_slot();
        Self {
            graph,
            rng,
            hold_ticks: hold_ticks.max(1),
            slot,
            frame_index: 0,
            frame_tick_counter: 0,
            x_offset: 0,
        }
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn hold_ticks(&self) -> u32 {
        self.hold_ticks
    }

    pub fn cursor(&self) -> AnimationCursor {
        AnimationCursor {
            state_id: self.current_state(),
            frame_index: self.frame_index,
            frame_tick_counter: self.frame_tick_counter,
        }
    }

    pub fn current_state(&self) -> StateId {
        self.graph.by_slot(self.slot).id
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Sprite-sheet index of the frame on screen.
    pub fn current_frame(&self) -> u32 {
        self.graph.by_slot(self.slot).frames[self.frame_index]
    }

    pub fn flip_x(&self) -> bool {
        self.graph.by_slot(self.slot).flip_x
    }

    /// Sum of `x_offset` over every state that has finished playing.
    pub fn x_offset(&self) -> i32 {
        self.x_offset
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.frame_tick_counter += 1;
        if self.frame_tick_counter < self.hold_ticks {
            return TickOutcome::Held;
        }
        self.frame_tick_counter = 0;
        self.frame_index += 1;

        let state = self.graph.by_slot(self.slot);
        if self.frame_index < state.frames.len() {
            return TickOutcome::Advanced {
                frame: state.frames[self.frame_index],
            };
        }

        let from = state.id;
        let finished_offset = state.x_offset;
        let pick = self.rng.pick_index(state.successors.len());

        self.x_offset += finished_offset;
        self.slot = self.graph.successor_slot(self.slot, pick);
        self.frame_index = 0;

        let to = self.current_state();
        log::debug!("sprite state {} -> {}", from, to);
        TickOutcome::Transitioned {
            from,
            to,
            frame: self.current_frame(),
        }
    }

    /// Back to the entry state, frame 0, no walk offset.
    pub fn reset(&mut self) {
        self.slot = self.graph.entry_slot();
        self.frame_index = 0;
        self.frame_tick_counter = 0;
        self.x_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{SeededRandom, SequenceRandom};
    use crate::domain::sprite_graph::State;

    fn graph(states: Vec<State>) -> Arc<StateGraph> {
        Arc::new(StateGraph::from_states(states, None).expect("valid graph"))
    }

    #[test]
    fn three_frames_held_two_ticks_transition_on_sixth_tick() {
        let g = graph(vec![
            State::new(1, vec![10, 11, 12], vec![2]),
            State::new(2, vec![20], vec![2]),
        ]);
        let mut m = AnimationStateMachine::new(g, 2, SequenceRandom::new(vec![0.0]));

        let mut frames = vec![m.current_frame()];
        for _ in 0..5 {
            if let TickOutcome::Advanced { frame } = m.tick() {
                frames.push(frame);
            }
            assert_eq!(m.current_state(), 1);
        }
        assert_eq!(frames, vec![10, 11, 12]);

        let outcome = m.tick();
        assert_eq!(outcome, TickOutcome::Transitioned { from: 1, to: 2, frame: 20 });
        assert_eq!(m.current_state(), 2);
        assert_eq!(m.frame_index(), 0);
    }

    #[test]
    fn counter_resets_after_each_advance() {
        let g = graph(vec![State::new(1, vec![0, 1], vec![1])]);
        let mut m = AnimationStateMachine::new(g, 3, SequenceRandom::new(vec![0.0]));
        assert_eq!(m.tick(), TickOutcome::Held);
        assert_eq!(m.cursor().frame_tick_counter, 1);
        assert_eq!(m.tick(), TickOutcome::Held);
        assert_eq!(m.tick(), TickOutcome::Advanced { frame: 1 });
        assert_eq!(m.cursor().frame_tick_counter, 0);
    }

    #[test]
    fn self_loop_replays_forever() {
        let g = graph(vec![State::new(5, vec![1, 2, 3], vec![5])]);
        let mut m = AnimationStateMachine::new(g, 1, SeededRandom::new(3));
        let mut seen = Vec::new();
        for _ in 0..9 {
            m.tick();
            assert_eq!(m.current_state(), 5);
            seen.push(m.current_frame());
        }
        assert_eq!(seen, vec![2, 3, 1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn duplicate_successors_weight_the_pick() {
        let g = graph(vec![
            State::new(1, vec![0], vec![2, 2, 3]),
            State::new(2, vec![0], vec![1]),
            State::new(3, vec![0], vec![1]),
        ]);
        let mut m = AnimationStateMachine::new(g, 1, SeededRandom::new(0x5eed));

        let (mut to_a, mut to_b) = (0u32, 0u32);
        for _ in 0..6000 {
            if let TickOutcome::Transitioned { from: 1, to, .. } = m.tick() {
                match to {
                    2 => to_a += 1,
                    3 => to_b += 1,
                    other => panic!("unexpected successor {other}"),
                }
            }
        }
        // Every other tick leaves state 1, so 3000 draws; expect ~2000 / ~1000.
        assert_eq!(to_a + to_b, 3000);
        assert!((1800..=2200).contains(&to_a), "to_a={to_a}");
        assert!((800..=1200).contains(&to_b), "to_b={to_b}");
    }

    #[test]
    fn injected_sequence_drives_choice() {
        let g = graph(vec![
            State::new(1, vec![0], vec![2, 3]),
            State::new(2, vec![0], vec![1]),
            State::new(3, vec![0], vec![1]),
        ]);
        let mut m = AnimationStateMachine::new(g, 1, SequenceRandom::new(vec![0.9, 0.0, 0.1]));
        assert_eq!(m.tick(), TickOutcome::Transitioned { from: 1, to: 3, frame: 0 });
        assert_eq!(m.tick(), TickOutcome::Transitioned { from: 3, to: 1, frame: 0 });
        assert_eq!(m.tick(), TickOutcome::Transitioned { from: 1, to: 2, frame: 0 });
    }

    #[test]
    fn finished_states_accumulate_offset() {
        let g = graph(vec![
            State::new(1, vec![0, 1], vec![1]).with_x_offset(-1).with_flip_x(true),
        ]);
        let mut m = AnimationStateMachine::new(g, 1, SequenceRandom::new(vec![0.0]));
        assert!(m.flip_x());
        for _ in 0..6 {
            m.tick();
        }
        assert_eq!(m.x_offset(), -3);
        m.reset();
        assert_eq!(m.x_offset(), 0);
        assert_eq!(m.cursor(), AnimationCursor { state_id: 1, frame_index: 0, frame_tick_counter: 0 });
    }

    #[test]
    fn zero_hold_behaves_like_one() {
        let g = graph(vec![State::new(1, vec![0, 1], vec![1])]);
        let mut m = AnimationStateMachine::new(g, 0, SequenceRandom::new(vec![0.0]));
        assert_eq!(m.hold_ticks(), 1);
        assert_eq!(m.tick(), TickOutcome::Advanced { frame: 1 });
    }
}
