//! Level-triggered analog movement
//!
//! Movement is recomputed from scratch every tick out of the latest snapshots.
//! Nothing here remembers the previous tick.

use crate::controller::{ControllerSlot, StickPosition};

#[derive(Clone, Debug)]
pub struct MovementSettings {
    /// Radial dead zone for both sticks, fraction of full deflection
    pub stick_deadzone: f32,
    pub trigger_deadzone: f32,
    pub look_sensitivity: f32,
    pub invert_look: bool,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            stick_deadzone: 0.24,
            trigger_deadzone: 0.12,
            look_sensitivity: 1.0,
            invert_look: false,
        }
    }
}

/// Analog input for a single tick. Every axis is in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInput {
    pub forward: f32,
    pub side: f32,
    pub up: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl MovementInput {
    pub const ZERO: MovementInput = MovementInput {
        forward: 0.0,
        side: 0.0,
        up: 0.0,
        yaw: 0.0,
        pitch: 0.0,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::ZERO
    }

    fn accumulate(&mut self, other: MovementInput) {
        self.forward += other.forward;
        self.side += other.side;
        self.up += other.up;
        self.yaw += other.yaw;
        self.pitch += other.pitch;
    }

    fn clamped(self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            side: self.side.clamp(-1.0, 1.0),
            up: self.up.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
        }
    }
}

/// Sum the contribution of every connected slot.
pub fn map_movement(slots: &[ControllerSlot], settings: &MovementSettings) -> MovementInput {
    let mut total = MovementInput::ZERO;
    for slot in slots.iter().filter(|slot| slot.connected) {
        let state = &slot.latest_state;
        let movement = apply_radial_deadzone(state.left_stick, settings.stick_deadzone);
        let look = apply_radial_deadzone(state.right_stick, settings.stick_deadzone);
        let pitch_sign = if settings.invert_look { -1.0 } else { 1.0 };

        total.accumulate(MovementInput {
            forward: movement.y,
            side: movement.x,
            up: apply_deadzone(state.right_trigger, settings.trigger_deadzone)
                - apply_deadzone(state.left_trigger, settings.trigger_deadzone),
            yaw: look.x * settings.look_sensitivity,
            pitch: look.y * settings.look_sensitivity * pitch_sign,
        });
    }
    total.clamped()
}

// Helper function to apply deadzone to trigger values
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        // Rescale the value to the range outside the deadzone
        let sign = if value < 0.0 { -1.0 } else { 1.0 };
        (sign * (value.abs() - deadzone) / (1.0 - deadzone)).clamp(-1.0, 1.0)
    }
}

/// Circular dead zone; the remaining range is renormalized to `[0, 1]`.
pub fn apply_radial_deadzone(raw: StickPosition, deadzone: f32) -> StickPosition {
    let magnitude = raw.magnitude();
    if magnitude < deadzone || magnitude == 0.0 {
        return StickPosition::default();
    }
    let adjusted = ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0);
    StickPosition::new(raw.x / magnitude * adjusted, raw.y / magnitude * adjusted)
}
