//! One-shot sound recipes
//!
//! Each cue is a fixed, hand-tuned voice: one or more oscillators summed into
//! a single gain envelope. Times are seconds relative to the voice start.

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A scheduled parameter change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Automation {
    /// Jump to `value` at `at`
    Set { value: f32, at: f64 },
    /// Linear ramp reaching `value` at `at`
    Linear { value: f32, at: f64 },
    /// Exponential ramp reaching `value` at `at` (value must be > 0)
    Exponential { value: f32, at: f64 },
}

impl Automation {
    pub fn at(&self) -> f64 {
        match *self {
            Automation::Set { at, .. }
            | Automation::Linear { at, .. }
            | Automation::Exponential { at, .. } => at,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            Automation::Set { value, .. }
            | Automation::Linear { value, .. }
            | Automation::Exponential { value, .. } => value,
        }
    }
}

/// One oscillator in a voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency: &'static [Automation],
}

/// A complete one-shot voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub tones: &'static [Tone],
    pub gain: &'static [Automation],
    /// Oscillators stop here; the voice is finished afterwards
    pub duration: f64,
}

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Vehicle reached a map node
    Enter,
    /// Back to the hub from a section
    Exit,
    /// XP pickup
    Collect,
    /// UI tick (buttons, toggles)
    Hover,
    /// Horn (H)
    Horn,
    /// Engine start / scan (E)
    Startup,
}

use Automation::{Exponential, Linear, Set};

/// Rising sine sweep
const ENTER: Voice = Voice {
    tones: &[Tone {
        waveform: Waveform::Sine,
        frequency: &[
            Set { value: 200.0, at: 0.0 },
            Exponential { value: 1200.0, at: 0.4 },
        ],
    }],
    gain: &[
        Set { value: 0.0, at: 0.0 },
        Linear { value: 0.2, at: 0.1 },
        Linear { value: 0.0, at: 0.4 },
    ],
    duration: 0.4,
};

/// Falling triangle sweep
const EXIT: Voice = Voice {
    tones: &[Tone {
        waveform: Waveform::Triangle,
        frequency: &[
            Set { value: 800.0, at: 0.0 },
            Exponential { value: 100.0, at: 0.5 },
        ],
    }],
    gain: &[
        Set { value: 0.15, at: 0.0 },
        Linear { value: 0.0, at: 0.5 },
    ],
    duration: 0.5,
};

/// Two-note chime, B5 then E6
const COLLECT: Voice = Voice {
    tones: &[Tone {
        waveform: Waveform::Sine,
        frequency: &[
            Set { value: 987.77, at: 0.0 },
            Set { value: 1318.51, at: 0.05 },
        ],
    }],
    gain: &[
        Set { value: 0.0, at: 0.0 },
        Linear { value: 0.15, at: 0.01 },
        Exponential { value: 0.01, at: 0.2 },
    ],
    duration: 0.2,
};

/// Short A4 blip
const HOVER: Voice = Voice {
    tones: &[Tone {
        waveform: Waveform::Sine,
        frequency: &[Set { value: 440.0, at: 0.0 }],
    }],
    gain: &[
        Set { value: 0.05, at: 0.0 },
        Linear { value: 0.0, at: 0.05 },
    ],
    duration: 0.05,
};

/// F4 + A4 chord with a short hold and long release
const HORN: Voice = Voice {
    tones: &[
        Tone {
            waveform: Waveform::Triangle,
            frequency: &[Set { value: 349.23, at: 0.0 }],
        },
        Tone {
            waveform: Waveform::Triangle,
            frequency: &[Set { value: 440.00, at: 0.0 }],
        },
    ],
    gain: &[
        Set { value: 0.0, at: 0.0 },
        Linear { value: 0.2, at: 0.05 },
        Linear { value: 0.2, at: 0.15 },
        Linear { value: 0.0, at: 0.85 },
    ],
    duration: 0.85,
};

/// Sawtooth crank: up to 150 Hz, settle at 45 Hz
const STARTUP: Voice = Voice {
    tones: &[Tone {
        waveform: Waveform::Sawtooth,
        frequency: &[
            Set { value: 30.0, at: 0.0 },
            Exponential { value: 150.0, at: 0.15 },
            Exponential { value: 45.0, at: 0.5 },
        ],
    }],
    gain: &[
        Set { value: 0.0, at: 0.0 },
        Linear { value: 0.3, at: 0.1 },
        Linear { value: 0.0, at: 0.5 },
    ],
    duration: 0.5,
};

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Enter,
        SoundEffect::Exit,
        SoundEffect::Collect,
        SoundEffect::Hover,
        SoundEffect::Horn,
        SoundEffect::Startup,
    ];

    /// The voice recipe for this cue
    pub fn voice(self) -> &'static Voice {
        match self {
            SoundEffect::Enter => &ENTER,
            SoundEffect::Exit => &EXIT,
            SoundEffect::Collect => &COLLECT,
            SoundEffect::Hover => &HOVER,
            SoundEffect::Horn => &HORN,
            SoundEffect::Startup => &STARTUP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_is_rising_chime() {
        let voice = SoundEffect::Collect.voice();
        assert_eq!(voice.tones.len(), 1);
        let freqs: Vec<f32> = voice.tones[0].frequency.iter().map(|a| a.value()).collect();
        assert_eq!(freqs, vec![987.77, 1318.51]);
        assert!(freqs[1] > freqs[0]);
        assert_eq!(voice.duration, 0.2);
    }

    #[test]
    fn test_horn_is_two_tone_chord() {
        let voice = SoundEffect::Horn.voice();
        let freqs: Vec<f32> = voice.tones.iter().map(|t| t.frequency[0].value()).collect();
        assert_eq!(freqs, vec![349.23, 440.0]);
        assert!(voice.tones.iter().all(|t| t.waveform == Waveform::Triangle));
        assert_eq!(voice.duration, 0.85);
    }

    #[test]
    fn test_recipes_are_well_formed() {
        for effect in SoundEffect::ALL {
            let voice = effect.voice();
            assert!(!voice.tones.is_empty(), "{effect:?} has no tones");
            assert!(voice.duration > 0.0);

            let lanes = voice
                .tones
                .iter()
                .map(|t| t.frequency)
                .chain(std::iter::once(voice.gain));
            for lane in lanes {
                // Starts with an explicit value at t = 0
                assert!(matches!(lane[0], Automation::Set { at, .. } if at == 0.0));
                for pair in lane.windows(2) {
                    assert!(pair[0].at() <= pair[1].at(), "{effect:?} out of order");
                }
                for step in lane {
                    assert!(step.at() <= voice.duration, "{effect:?} schedules past stop");
                    if let Automation::Exponential { value, .. } = step {
                        assert!(*value > 0.0, "{effect:?} exponential ramp to zero");
                    }
                }
            }
        }
    }

    #[test]
    fn test_envelopes_end_quiet() {
        for effect in SoundEffect::ALL {
            let last = voice_last_gain(effect);
            assert!(last <= 0.01, "{effect:?} ends at {last}");
        }
    }

    fn voice_last_gain(effect: SoundEffect) -> f32 {
        effect.voice().gain.last().map(|a| a.value()).unwrap_or(0.0)
    }
}
