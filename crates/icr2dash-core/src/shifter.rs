//! H-shifter emulation
//!
//! The simulator only understands sequential shift keys, so an H-pattern
//! shifter is emulated: the driver slots a gear, and the engine sends as
//! many up or down keystrokes as it takes to get there. With the clutch
//! enabled the keystrokes go out when the clutch is released; slotting
//! into gear from neutral without the clutch grinds instead of shifting.
//!
//! [`Shifter::poll`] consumes one decoded input sample and returns the
//! keystroke commands to send. The caller owns the key bindings and the
//! actual key injection; a command only carries a direction and the
//! pause to insert after sending it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ShiftingSettings;

/// Direction of one sequential shift keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDirection {
    /// Shift-up key
    Up,
    /// Shift-down key
    Down,
}

/// One keystroke to send, with the pause that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCommand {
    /// Which key to send
    pub direction: ShiftDirection,
    /// Pause after the keystroke, so the simulator registers each one
    pub delay: Duration,
}

/// One decoded input sample from the physical shifter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShifterInput {
    /// Gear slot currently held, `None` for neutral
    pub pressed_gear: Option<u8>,
    /// Clutch pedal held
    pub clutch: bool,
}

/// Result of one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShifterOutput {
    /// Keystrokes to send, in order
    pub commands: Vec<ShiftCommand>,
    /// Gears are grinding (shifted without the clutch); play the sound
    pub grinding: bool,
}

/// Gear shifting state machine
#[derive(Debug, Clone)]
pub struct Shifter {
    clutch_mode: bool,
    upshift_delay: Duration,
    downshift_delay: Duration,
    target_gear: Option<u8>,
    lock_shift: bool,
    grinding: bool,
}

impl Shifter {
    /// Create a shifter in neutral
    pub fn new(settings: &ShiftingSettings) -> Self {
        Self {
            clutch_mode: settings.clutch,
            upshift_delay: Duration::from_secs_f64(settings.upshift_delay.max(0.0)),
            downshift_delay: Duration::from_secs_f64(settings.downshift_delay.max(0.0)),
            target_gear: None,
            lock_shift: false,
            grinding: false,
        }
    }

    /// Gear the driver has selected, `None` in neutral
    pub fn target_gear(&self) -> Option<u8> {
        self.target_gear
    }

    /// True while the gears are grinding
    pub fn grinding(&self) -> bool {
        self.grinding
    }

    /// Process one input sample against the gear the simulator reports
    pub fn poll(&mut self, input: ShifterInput, game_gear: u8) -> ShifterOutput {
        let commands = if self.clutch_mode {
            self.poll_clutch(&input, game_gear)
        } else {
            self.poll_direct(&input, game_gear)
        };
        ShifterOutput {
            commands,
            grinding: self.grinding,
        }
    }

    fn poll_clutch(&mut self, input: &ShifterInput, game_gear: u8) -> Vec<ShiftCommand> {
        // Passing through neutral is what re-arms the shifter
        if self.target_gear.is_none() {
            self.lock_shift = false;
        }

        match input.pressed_gear {
            None => {
                self.target_gear = None;
                self.grinding = false;
            }
            Some(pressed) => {
                // Slotting in from neutral without the clutch grinds;
                // grinding blocks the target until the lever comes back out
                if !input.clutch && self.target_gear.is_none() {
                    self.grinding = true;
                }
                if input.clutch && !self.grinding {
                    self.target_gear = Some(pressed);
                }
            }
        }

        let mut commands = Vec::new();
        if !input.clutch && !self.lock_shift {
            if let Some(target) = self.target_gear {
                commands = self.shift_batch(target, game_gear);
                self.lock_shift = true;
            }
        }
        commands
    }

    fn poll_direct(&mut self, input: &ShifterInput, game_gear: u8) -> Vec<ShiftCommand> {
        if let Some(pressed) = input.pressed_gear {
            self.target_gear = Some(pressed);
        }

        if self.target_gear == Some(game_gear) {
            self.lock_shift = false;
        }

        let mut commands = Vec::new();
        if !self.lock_shift {
            if let Some(target) = self.target_gear {
                if target != game_gear {
                    commands = self.shift_batch(target, game_gear);
                    self.lock_shift = true;
                }
            }
        }
        commands
    }

    fn shift_batch(&self, target: u8, game_gear: u8) -> Vec<ShiftCommand> {
        if target > game_gear {
            (game_gear..target)
                .map(|_| ShiftCommand {
                    direction: ShiftDirection::Up,
                    delay: self.upshift_delay,
                })
                .collect()
        } else {
            (target..game_gear)
                .map(|_| ShiftCommand {
                    direction: ShiftDirection::Down,
                    delay: self.downshift_delay,
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifter(clutch: bool) -> Shifter {
        let settings = ShiftingSettings {
            clutch,
            upshift_delay: 0.05,
            downshift_delay: 0.1,
            ..ShiftingSettings::default()
        };
        Shifter::new(&settings)
    }

    fn held(gear: u8, clutch: bool) -> ShifterInput {
        ShifterInput {
            pressed_gear: Some(gear),
            clutch,
        }
    }

    fn neutral() -> ShifterInput {
        ShifterInput::default()
    }

    #[test]
    fn test_clutch_shift_fires_on_release() {
        let mut shifter = shifter(true);

        assert!(shifter.poll(neutral(), 1).commands.is_empty());

        // Clutch in, slot third: target latches but nothing is sent yet
        let out = shifter.poll(held(3, true), 1);
        assert!(out.commands.is_empty());
        assert_eq!(shifter.target_gear(), Some(3));

        // Clutch out: two upshifts, each followed by the upshift pause
        let out = shifter.poll(held(3, false), 1);
        assert_eq!(out.commands.len(), 2);
        assert!(out
            .commands
            .iter()
            .all(|c| c.direction == ShiftDirection::Up
                && c.delay == Duration::from_millis(50)));

        // Locked until the lever passes through neutral
        assert!(shifter.poll(held(3, false), 3).commands.is_empty());
        shifter.poll(neutral(), 3);
        assert_eq!(shifter.target_gear(), None);
    }

    #[test]
    fn test_clutch_downshift_uses_downshift_delay() {
        let mut shifter = shifter(true);

        shifter.poll(neutral(), 5);
        shifter.poll(held(2, true), 5);
        let out = shifter.poll(held(2, false), 5);

        assert_eq!(out.commands.len(), 3);
        assert!(out
            .commands
            .iter()
            .all(|c| c.direction == ShiftDirection::Down
                && c.delay == Duration::from_millis(100)));
    }

    #[test]
    fn test_selecting_the_current_gear_still_locks() {
        let mut shifter = shifter(true);

        shifter.poll(neutral(), 4);
        shifter.poll(held(4, true), 4);
        let out = shifter.poll(held(4, false), 4);
        assert!(out.commands.is_empty());

        // The lock is set even though nothing was sent, so re-latching a
        // different gear without a neutral transit stays silent
        shifter.poll(held(2, true), 4);
        assert!(shifter.poll(held(2, false), 4).commands.is_empty());

        // After neutral the same selection goes through
        shifter.poll(neutral(), 4);
        shifter.poll(held(2, true), 4);
        assert_eq!(shifter.poll(held(2, false), 4).commands.len(), 2);
    }

    #[test]
    fn test_grinding_lifecycle() {
        let mut shifter = shifter(true);
        shifter.poll(neutral(), 2);

        // Slot a gear with no clutch: grind, send nothing
        let out = shifter.poll(held(4, false), 2);
        assert!(out.grinding);
        assert!(out.commands.is_empty());
        assert_eq!(shifter.target_gear(), None);

        // Pressing the clutch mid-grind does not rescue the shift
        let out = shifter.poll(held(4, true), 2);
        assert!(out.grinding);
        assert_eq!(shifter.target_gear(), None);

        // Back to neutral clears the grind; a proper shift then works
        assert!(!shifter.poll(neutral(), 2).grinding);
        shifter.poll(held(4, true), 2);
        let out = shifter.poll(held(4, false), 2);
        assert!(!out.grinding);
        assert_eq!(out.commands.len(), 2);
    }

    #[test]
    fn test_clutchless_shifts_immediately() {
        let mut shifter = shifter(false);

        // Nothing selected yet: no commands, whatever gear the game is in
        assert!(shifter.poll(neutral(), 2).commands.is_empty());

        let out = shifter.poll(held(4, false), 2);
        assert_eq!(out.commands.len(), 2);
        assert_eq!(out.commands[0].direction, ShiftDirection::Up);
        assert!(!out.grinding);

        // Locked while the game catches up
        assert!(shifter.poll(held(4, false), 2).commands.is_empty());
        assert!(shifter.poll(neutral(), 3).commands.is_empty());

        // Game reaches the target: unlocked, next selection fires
        assert!(shifter.poll(neutral(), 4).commands.is_empty());
        let out = shifter.poll(held(3, false), 4);
        assert_eq!(out.commands.len(), 1);
        assert_eq!(out.commands[0].direction, ShiftDirection::Down);
    }
}
