use std::sync::Arc;

use crate::core::geometry::PixelRect;
use crate::core::random::RandomSource;
use crate::domain::settings::{SettingsError, SpriteSettings};
use crate::domain::sprite_graph::{StateGraph, StateId};
use crate::systems::animation::{AnimationStateMachine, TickOutcome};

use super::sprite_sheet::SpriteSheet;

/// Headless sprite preview: a state machine plus sheet geometry.
pub struct SpritePreviewCore {
    settings: SpriteSettings,
    sheet: SpriteSheet,
    machine: AnimationStateMachine<Box<dyn RandomSource>>,
}

impl SpritePreviewCore {
    pub fn new(
        graph: Arc<StateGraph>,
        settings: SpriteSettings,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            sheet: SpriteSheet::new(settings.sheet_columns, settings.cell_size),
            machine: AnimationStateMachine::new(graph, settings.frame_hold_ticks, rng),
            settings,
        })
    }

    pub fn settings(&self) -> &SpriteSettings {
        &self.settings
    }

    pub fn sheet(&self) -> SpriteSheet {
        self.sheet
    }

    pub fn machine(&self) -> &AnimationStateMachine<Box<dyn RandomSource>> {
        &self.machine
    }

    /// One tick of playback.
    pub fn update(&mut self) -> TickOutcome {
        self.machine.tick()
    }

    pub fn current_frame(&self) -> u32 {
        self.machine.current_frame()
    }

    pub fn current_state(&self) -> StateId {
        self.machine.current_state()
    }

    pub fn flip_x(&self) -> bool {
        self.machine.flip_x()
    }

    pub fn source_rect(&self) -> PixelRect {
        self.sheet.source_rect(self.current_frame())
    }

    /// Where the frame lands on the preview canvas. Walking off one edge
    /// wraps around to the other.
    pub fn dest_rect(&self) -> PixelRect {
        let width = self.settings.canvas_width as i32;
        let x = (self.settings.anchor_x + self.machine.x_offset()).rem_euclid(width);
        PixelRect {
            x,
            y: self.settings.anchor_y,
            w: self.sheet.cell_size(),
            h: self.sheet.cell_size(),
        }
    }

    pub fn reset(&mut self) {
        self.machine.reset();
    }
}
