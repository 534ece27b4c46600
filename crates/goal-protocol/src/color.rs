//! Color types for the four illuminated field goals.
//!
//! Channel value 0 never goes on the wire: 0x00 is the frame padding byte
//! and the controller would read it as early end-of-message, so zero is
//! remapped to 1 before transmission. The difference is invisible on the
//! goal fixtures.

/// Number of independently colorable goals on the field.
pub const NUM_GOALS: usize = 4;

/// Channel bytes carried by an all-goals color command.
pub const ALL_RGB_LEN: usize = 3;

/// Channel bytes carried by a full per-goal color command.
pub const EACH_RGB_LEN: usize = NUM_GOALS * 3;

/// Remap a single channel byte: 0 becomes 1, everything else unchanged.
pub fn sanitize_channel(v: u8) -> u8 {
    if v == 0 {
        1
    } else {
        v
    }
}

// -- RGB triple --

/// One RGB color, channels 0-255 as supplied by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Copy with zero channels remapped to 1.
    pub fn sanitized(self) -> Self {
        Self {
            r: sanitize_channel(self.r),
            g: sanitize_channel(self.g),
            b: sanitize_channel(self.b),
        }
    }

    /// Wire payload bytes for `DORGB:`, sanitized.
    pub fn to_payload(self) -> [u8; ALL_RGB_LEN] {
        let c = self.sanitized();
        [c.r, c.g, c.b]
    }
}

// -- Goals --

/// The four goals, addressed clockwise around the field starting at the
/// blue-alliance left goal. The wire order of `EARGB:` payloads follows
/// this numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Goal {
    BlueLeft = 0,
    BlueRight = 1,
    RedLeft = 2,
    RedRight = 3,
}

impl Goal {
    pub const ALL: [Goal; NUM_GOALS] =
        [Goal::BlueLeft, Goal::BlueRight, Goal::RedLeft, Goal::RedRight];

    pub const fn index(self) -> usize {
        self as usize
    }
}

// -- Per-goal color set --

/// Colors for all four goals, payload source for the `EARGB:` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalColors {
    goals: [Rgb; NUM_GOALS],
}

impl GoalColors {
    /// Every goal set to the same color.
    pub fn uniform(color: Rgb) -> Self {
        Self {
            goals: [color; NUM_GOALS],
        }
    }

    /// Build from the 12-byte wire layout (goal-major, clockwise).
    pub fn from_values(values: [u8; EACH_RGB_LEN]) -> Self {
        let mut colors = Self::default();
        for (i, chunk) in values.chunks_exact(3).enumerate() {
            colors.goals[i] = Rgb::new(chunk[0], chunk[1], chunk[2]);
        }
        colors
    }

    pub fn set(&mut self, goal: Goal, color: Rgb) {
        self.goals[goal.index()] = color;
    }

    pub fn get(&self, goal: Goal) -> Rgb {
        self.goals[goal.index()]
    }

    /// Wire payload for `EARGB:`, 3 channels per goal in clockwise goal
    /// order, every byte sanitized.
    pub fn to_payload(&self) -> [u8; EACH_RGB_LEN] {
        let mut out = [0u8; EACH_RGB_LEN];
        for (slot, color) in out.chunks_exact_mut(3).zip(self.goals.iter()) {
            slot.copy_from_slice(&color.to_payload());
        }
        out
    }
}
