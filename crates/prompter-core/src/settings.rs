//! Bounded numeric settings exposed by the settings panel
//!
//! Every slider in the panel maps to a [`Setting`], and every value written
//! into [`PrompterState`](crate::PrompterState) goes through its [`Bounds`].

/// Inclusive range with a fixed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp a value into the range. NaN falls back to the minimum.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies inside the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Move `value` by `steps` increments, snapping to the step grid and clamping
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let snapped = ((value - self.min) / self.step).round() * self.step + self.min;
        self.clamp(snapped + self.step * steps as f64)
    }
}

pub const SPEED: Bounds = Bounds::new(1.0, 40.0, 1.0);
pub const FONT_SIZE: Bounds = Bounds::new(8.0, 30.0, 1.0);
pub const WIDTH: Bounds = Bounds::new(100.0, 600.0, 1.0);
pub const HEIGHT: Bounds = Bounds::new(100.0, 500.0, 1.0);

/// A numeric setting of the prompter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Speed,
    FontSize,
    Width,
    Height,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::Speed,
        Setting::FontSize,
        Setting::Width,
        Setting::Height,
    ];

    pub fn bounds(&self) -> Bounds {
        match self {
            Setting::Speed => SPEED,
            Setting::FontSize => FONT_SIZE,
            Setting::Width => WIDTH,
            Setting::Height => HEIGHT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Setting::Speed => "Speed",
            Setting::FontSize => "Text size",
            Setting::Width => "Prompter width",
            Setting::Height => "Prompter height",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Setting::Speed => "pt/s",
            Setting::FontSize => "pt",
            Setting::Width | Setting::Height => "px",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_range() {
        assert_eq!(SPEED.clamp(0.0), 1.0);
        assert_eq!(SPEED.clamp(100.0), 40.0);
        assert_eq!(SPEED.clamp(12.0), 12.0);
        assert_eq!(FONT_SIZE.clamp(f64::NAN), 8.0);
    }

    #[test]
    fn test_step_snaps_and_clamps() {
        assert_eq!(WIDTH.step_by(250.4, 1), 251.0);
        assert_eq!(WIDTH.step_by(599.0, 10), 600.0);
        assert_eq!(HEIGHT.step_by(105.0, -10), 100.0);
        assert_eq!(SPEED.step_by(20.0, 0), 20.0);
    }

    #[test]
    fn test_settings_ranges() {
        assert_eq!(Setting::Speed.bounds(), Bounds::new(1.0, 40.0, 1.0));
        assert_eq!(Setting::FontSize.bounds(), Bounds::new(8.0, 30.0, 1.0));
        assert_eq!(Setting::Width.bounds(), Bounds::new(100.0, 600.0, 1.0));
        assert_eq!(Setting::Height.bounds(), Bounds::new(100.0, 500.0, 1.0));
        assert!(Setting::Width.bounds().contains(100.0));
        assert!(!Setting::Height.bounds().contains(501.0));
    }
}
