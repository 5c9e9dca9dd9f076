/// Operator dials. They change how bright blips are drawn, never which
/// targets are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarControls {
    pub gain: u8,
    pub threshold: u8,
    pub pulse_length: u8,
    pub stc: bool,
    pub cfar: bool,
    pub boost: bool,
}

impl Default for RadarControls {
    fn default() -> Self {
        Self {
            gain: 50,
            threshold: 30,
            pulse_length: 50,
            stc: true,
            cfar: false,
            boost: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Gain,
    Threshold,
    PulseLength,
    Stc,
    Cfar,
    Boost,
}

impl ControlKind {
    pub const ALL: [Self; 6] = [
        Self::Gain,
        Self::Threshold,
        Self::PulseLength,
        Self::Stc,
        Self::Cfar,
        Self::Boost,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Gain => "Gain",
            Self::Threshold => "Threshold",
            Self::PulseLength => "Pulse length",
            Self::Stc => "STC",
            Self::Cfar => "CFAR",
            Self::Boost => "Boost",
        }
    }

    pub const fn is_switch(self) -> bool {
        matches!(self, Self::Stc | Self::Cfar | Self::Boost)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }
}

/// Dial step used by the keyboard.
pub const DIAL_STEP: i16 = 5;

impl RadarControls {
    /// Blip brightness for a target `distance_nm` out on a scope of `range_nm`, in `[0, 1]`.
    pub fn intensity(&self, distance_nm: f64, range_nm: f64) -> f64 {
        let mut intensity = 0.8 * f64::from(self.gain) / 50.0;
        if self.stc {
            intensity *= distance_nm / range_nm + 0.4;
        }
        if self.cfar {
            intensity *= 1.0 - f64::from(self.threshold) / 100.0;
        }
        if self.boost {
            intensity *= 1.2;
        }
        intensity.clamp(0.0, 1.0)
    }

    /// Moves a dial by `delta`, saturating at 0 and 100. Switches flip when `delta != 0`.
    pub fn adjust(&mut self, kind: ControlKind, delta: i16) {
        let nudge = |value: u8| -> u8 {
            let moved = (i16::from(value) + delta).clamp(0, 100);
            u8::try_from(moved).unwrap_or(value)
        };
        match kind {
            ControlKind::Gain => self.gain = nudge(self.gain),
            ControlKind::Threshold => self.threshold = nudge(self.threshold),
            ControlKind::PulseLength => self.pulse_length = nudge(self.pulse_length),
            ControlKind::Stc | ControlKind::Cfar | ControlKind::Boost if delta != 0 => {
                self.toggle(kind);
            }
            _ => {}
        }
    }

    pub fn toggle(&mut self, kind: ControlKind) {
        match kind {
            ControlKind::Stc => self.stc = !self.stc,
            ControlKind::Cfar => self.cfar = !self.cfar,
            ControlKind::Boost => self.boost = !self.boost,
            ControlKind::Gain | ControlKind::Threshold | ControlKind::PulseLength => {}
        }
    }

    pub fn value_label(&self, kind: ControlKind) -> String {
        let switch = |on: bool| if on { "ON" } else { "OFF" }.to_string();
        match kind {
            ControlKind::Gain => format!("{}%", self.gain),
            ControlKind::Threshold => format!("{}%", self.threshold),
            ControlKind::PulseLength => format!("{}%", self.pulse_length),
            ControlKind::Stc => switch(self.stc),
            ControlKind::Cfar => switch(self.cfar),
            ControlKind::Boost => switch(self.boost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intensity_follows_stc() {
        let controls = RadarControls::default();
        assert!((controls.intensity(0.0, 50.0) - 0.32).abs() < 1e-9);
        assert!((controls.intensity(25.0, 50.0) - 0.72).abs() < 1e-9);
    }

    #[test]
    fn cfar_and_boost_scale_intensity() {
        let controls = RadarControls {
            stc: false,
            cfar: true,
            boost: true,
            threshold: 50,
            ..RadarControls::default()
        };
        // 0.8 * 0.5 * 1.2
        assert!((controls.intensity(10.0, 50.0) - 0.48).abs() < 1e-9);
    }

    #[test]
    fn intensity_is_clamped() {
        let hot = RadarControls {
            gain: 100,
            boost: true,
            ..RadarControls::default()
        };
        assert!((hot.intensity(50.0, 50.0) - 1.0).abs() < f64::EPSILON);

        let dead = RadarControls {
            gain: 0,
            ..RadarControls::default()
        };
        assert!(dead.intensity(50.0, 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn adjust_saturates_and_flips_switches() {
        let mut controls = RadarControls::default();
        controls.adjust(ControlKind::Gain, 200);
        controls.adjust(ControlKind::Threshold, -200);
        controls.adjust(ControlKind::Cfar, DIAL_STEP);
        controls.adjust(ControlKind::Stc, 0);

        assert_eq!(controls.gain, 100);
        assert_eq!(controls.threshold, 0);
        assert!(controls.cfar);
        assert!(controls.stc);
        assert_eq!(controls.value_label(ControlKind::Cfar), "ON");
        assert_eq!(controls.value_label(ControlKind::Gain), "100%");
    }
}
