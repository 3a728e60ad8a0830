//! Input collaborator contract
//!
//! The level reads one snapshot of intents per tick. Pointer coordinates
//! arrive in screen space; the level hands the source its camera offset
//! first so `mouse_location` can answer in world space.

use glam::Vec2;

/// Per-tick input as seen by the level
pub trait InputSource {
    /// Accepts the camera's top-left world offset for this tick
    fn set_camera_offset(&mut self, offset: Vec2);

    fn move_direction(&self) -> Vec2;
    /// Pointer position in world space
    fn mouse_location(&self) -> Vec2;
    fn exit(&self) -> bool;
    fn fire_primary(&self) -> bool;
    fn fire_secondary(&self) -> bool;
    fn trigger_gadget1(&self) -> bool;
    fn debug_key(&self) -> bool;
}

/// Plain input snapshot filled in by a platform layer or a script
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub move_direction: Vec2,
    /// Pointer position in screen space
    pub mouse_screen: Vec2,
    pub exit: bool,
    pub fire_primary: bool,
    pub fire_secondary: bool,
    pub trigger_gadget1: bool,
    pub debug_key: bool,
    pub(crate) camera_offset: Vec2,
}

impl InputState {
    /// Clear one-shot triggers after a tick consumed them
    pub fn clear_triggers(&mut self) {
        self.trigger_gadget1 = false;
        self.debug_key = false;
        self.exit = false;
    }

    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset
    }
}

impl InputSource for InputState {
    fn set_camera_offset(&mut self, offset: Vec2) {
        self.camera_offset = offset;
    }

    fn move_direction(&self) -> Vec2 {
        self.move_direction
    }

    fn mouse_location(&self) -> Vec2 {
        self.mouse_screen + self.camera_offset
    }

    fn exit(&self) -> bool {
        self.exit
    }

    fn fire_primary(&self) -> bool {
        self.fire_primary
    }

    fn fire_secondary(&self) -> bool {
        self.fire_secondary
    }

    fn trigger_gadget1(&self) -> bool {
        self.trigger_gadget1
    }

    fn debug_key(&self) -> bool {
        self.debug_key
    }
}
