//! Volume and mute bookkeeping
//!
//! Volume is linear in [0, 1], the scale the engine expects. Muting keeps the
//! stored level so unmute can restore it.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Stored level (0.0-1.0)
    level: f32,

    /// Mute state (preserves level)
    muted: bool,

    /// Level restored by unmute when the stored level is 0
    fallback: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0-1.0)
    /// * `fallback` - Level used by unmute when the stored level is 0
    pub fn new(level: f32, fallback: f32) -> Self {
        let fallback = sanitize(fallback);
        Self {
            level: sanitize(level),
            muted: false,
            fallback: if fallback > 0.0 { fallback } else { 0.5 },
        }
    }

    /// Set level; a level of 0 counts as muted, anything else unmutes
    pub fn set_level(&mut self, level: f32) {
        self.level = sanitize(level);
        self.muted = self.level == 0.0;
    }

    /// Stored level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Toggle mute state
    ///
    /// Unmuting from a stored level of 0 restores the fallback level.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            if self.level == 0.0 {
                self.level = self.fallback;
            }
            self.muted = false;
        } else {
            self.muted = true;
        }
    }

    /// Level the engine should actually output
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}

/// Clamp into [0, 1]; NaN counts as silence
fn sanitize(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8, 0.5);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
        assert_eq!(vol.effective(), 0.8);
    }

    #[test]
    fn set_level_clamps() {
        let mut vol = Volume::default();

        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);

        vol.set_level(-0.2);
        assert_eq!(vol.level(), 0.0);
        assert!(vol.is_muted());

        vol.set_level(f32::NAN);
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn zero_level_mutes_and_nonzero_unmutes() {
        let mut vol = Volume::default();
        vol.set_level(0.0);
        assert!(vol.is_muted());

        vol.set_level(0.3);
        assert!(!vol.is_muted());
        assert_eq!(vol.effective(), 0.3);
    }

    #[test]
    fn toggle_mute_preserves_level() {
        let mut vol = Volume::new(0.8, 0.5);

        vol.toggle_mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.8);
        assert_eq!(vol.effective(), 0.0);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.effective(), 0.8);
    }

    #[test]
    fn unmute_from_zero_uses_fallback() {
        let mut vol = Volume::new(0.8, 0.5);
        vol.set_level(0.0);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.5);
    }

    #[test]
    fn zero_fallback_is_replaced() {
        let mut vol = Volume::new(0.0, 0.0);
        vol.set_level(0.0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 0.5);
    }
}
