//! Per-tick input entry point for the engine frame callback.

use tracing::{debug, info};

use crate::console::{CommandSink, Console};
use crate::controller::{DeviceInfo, GamepadPoller, PadSource};
use crate::mapping::{CommandBindings, InputTranslator, MovementInput, MovementSettings};

/// Owns the poller and the translator and always runs them in that order.
pub struct InputSystem<P: PadSource> {
    poller: GamepadPoller<P>,
    translator: InputTranslator,
}

impl<P: PadSource> InputSystem<P> {
    pub fn new(
        source: P,
        settings: MovementSettings,
        bindings: CommandBindings,
        console: &mut dyn Console,
    ) -> Self {
        info!(
            "Initializing input system with {} bindings, settings: {:?}",
            bindings.len(),
            settings
        );
        Self {
            poller: GamepadPoller::new(source, console),
            translator: InputTranslator::new(settings, bindings),
        }
    }

    /// Pump every slot, then translate the fresh slots. Call once per tick.
    pub fn tick(
        &mut self,
        console: &mut dyn Console,
        commands: &mut dyn CommandSink,
    ) -> MovementInput {
        self.poller.pump(console);
        let movement = self.translator.translate(self.poller.slots(), commands);
        if !movement.is_idle() {
            debug!("Movement this tick: {:?}", movement);
        }
        movement
    }

    pub fn enumerate_devices(&self) -> Vec<DeviceInfo> {
        self.poller.enumerate_devices()
    }

    pub fn poller(&self) -> &GamepadPoller<P> {
        &self.poller
    }

    pub fn shutdown(&mut self) {
        self.poller.shutdown();
    }

    /// Shut down and start over with empty slots and no held buttons.
    pub fn reinit(&mut self, console: &mut dyn Console) {
        self.poller.reinit(console);
        self.translator.reset();
    }
}
