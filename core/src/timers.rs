/// # Timers
/// Two 8-bit countdown timers that tick once per interpreter cycle.
/// - delay: readable and writable by programs
/// - sound: a tone should be heard for as long as it's above 0
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers, stopping at 0.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
