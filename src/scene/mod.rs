//! Scene system with compile-time known scene variants
//!
//! Every operating state renders through a scene. Scenes are created the
//! first time their state is entered and kept for the lifetime of the
//! renderer, so animations continue where they left off.

mod boot;
mod connecting;
mod lights;
mod placeholder;

use embassy_time::{Duration, Instant};

pub use boot::BootScene;
pub use connecting::ConnectingScene;
pub use lights::{LightScene, MAX_LIGHTS};
pub use placeholder::{DEFAULT_PLACEHOLDER_TINT, PlaceholderScene};

use crate::color::{Color, Palette};
use crate::ring::Disc;
use crate::transition::DEFAULT_TRANSITION_DURATION;

const STATE_NAME_DORMANT: &str = "dormant";
const STATE_NAME_ACTIVE: &str = "active";
const STATE_NAME_RESPOND_TO_USER: &str = "respond_to_user";
const STATE_NAME_PROMPT: &str = "prompt";
const STATE_NAME_PROCESSING: &str = "processing";
const STATE_NAME_ERROR: &str = "error";
const STATE_NAME_CONNECTING: &str = "connecting";
const STATE_NAME_BOOT: &str = "boot";
const STATE_NAME_PLACEHOLDER_TRANSITION: &str = "placeholder_transition";

const STATE_ID_DORMANT: u8 = 0;
const STATE_ID_ACTIVE: u8 = 1;
const STATE_ID_RESPOND_TO_USER: u8 = 2;
const STATE_ID_PROMPT: u8 = 3;
const STATE_ID_PROCESSING: u8 = 4;
const STATE_ID_ERROR: u8 = 5;
const STATE_ID_CONNECTING: u8 = 6;
const STATE_ID_BOOT: u8 = 7;
const STATE_ID_PLACEHOLDER_TRANSITION: u8 = 8;

/// Number of operating states
pub const STATE_COUNT: usize = 9;

/// Operating states of the device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum OperatingState {
    #[default]
    Dormant = STATE_ID_DORMANT,
    Active = STATE_ID_ACTIVE,
    RespondToUser = STATE_ID_RESPOND_TO_USER,
    Prompt = STATE_ID_PROMPT,
    Processing = STATE_ID_PROCESSING,
    Error = STATE_ID_ERROR,
    Connecting = STATE_ID_CONNECTING,
    Boot = STATE_ID_BOOT,
    PlaceholderTransition = STATE_ID_PLACEHOLDER_TRANSITION,
}

impl OperatingState {
    pub const ALL: [Self; STATE_COUNT] = [
        Self::Dormant,
        Self::Active,
        Self::RespondToUser,
        Self::Prompt,
        Self::Processing,
        Self::Error,
        Self::Connecting,
        Self::Boot,
        Self::PlaceholderTransition,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            STATE_ID_DORMANT => Self::Dormant,
            STATE_ID_ACTIVE => Self::Active,
            STATE_ID_RESPOND_TO_USER => Self::RespondToUser,
            STATE_ID_PROMPT => Self::Prompt,
            STATE_ID_PROCESSING => Self::Processing,
            STATE_ID_ERROR => Self::Error,
            STATE_ID_CONNECTING => Self::Connecting,
            STATE_ID_BOOT => Self::Boot,
            STATE_ID_PLACEHOLDER_TRANSITION => Self::PlaceholderTransition,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dormant => STATE_NAME_DORMANT,
            Self::Active => STATE_NAME_ACTIVE,
            Self::RespondToUser => STATE_NAME_RESPOND_TO_USER,
            Self::Prompt => STATE_NAME_PROMPT,
            Self::Processing => STATE_NAME_PROCESSING,
            Self::Error => STATE_NAME_ERROR,
            Self::Connecting => STATE_NAME_CONNECTING,
            Self::Boot => STATE_NAME_BOOT,
            Self::PlaceholderTransition => STATE_NAME_PLACEHOLDER_TRANSITION,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            STATE_NAME_DORMANT => Some(Self::Dormant),
            STATE_NAME_ACTIVE => Some(Self::Active),
            STATE_NAME_RESPOND_TO_USER => Some(Self::RespondToUser),
            STATE_NAME_PROMPT => Some(Self::Prompt),
            STATE_NAME_PROCESSING => Some(Self::Processing),
            STATE_NAME_ERROR => Some(Self::Error),
            STATE_NAME_CONNECTING => Some(Self::Connecting),
            STATE_NAME_BOOT => Some(Self::Boot),
            STATE_NAME_PLACEHOLDER_TRANSITION => Some(Self::PlaceholderTransition),
            _ => None,
        }
    }

    /// Index into per-state storage
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Create the scene for this state
    ///
    /// `tint` and `recolor` only matter for the placeholder scene.
    pub fn to_slot(self, now: Instant, tint: Color, recolor: Duration) -> SceneSlot {
        match self {
            Self::Dormant => SceneSlot::Lights(LightScene::dormant(now)),
            Self::Active => SceneSlot::Lights(LightScene::active(now)),
            Self::RespondToUser => SceneSlot::Lights(LightScene::respond_to_user(now)),
            Self::Prompt => SceneSlot::Lights(LightScene::prompt(now)),
            Self::Processing => SceneSlot::Lights(LightScene::processing(now)),
            Self::Error => SceneSlot::Lights(LightScene::error(now)),
            Self::Connecting => SceneSlot::Connecting(ConnectingScene::new(now)),
            Self::Boot => SceneSlot::Boot(BootScene::new(now)),
            Self::PlaceholderTransition => {
                SceneSlot::Placeholder(
                    PlaceholderScene::new(tint, now).with_recolor_duration(recolor),
                )
            }
        }
    }
}

pub trait Scene {
    /// Advance the animation and add one frame to the disc
    fn render(&mut self, now: Instant, disc: &mut Disc);

    /// Recolor the scene, fading over `duration`
    fn apply_palette(&mut self, _palette: &Palette, _duration: Duration, _now: Instant) {}

    /// Colors currently shown by the scene
    fn palette(&self) -> Palette;

    /// Update the state specific parameter color
    fn set_parameter(&mut self, _color: Color, _now: Instant) {}
}

/// Scene slot - enum containing all scene kinds
#[derive(Debug, Clone)]
pub enum SceneSlot {
    /// Glow and orb compositions
    Lights(LightScene),
    /// WiFi symbol
    Connecting(ConnectingScene),
    /// Rings lighting up from the center
    Boot(BootScene),
    /// Tinted orbs recolored by spiral fusion
    Placeholder(PlaceholderScene),
}

impl SceneSlot {
    pub fn render(&mut self, now: Instant, disc: &mut Disc) {
        match self {
            Self::Lights(scene) => scene.render(now, disc),
            Self::Connecting(scene) => scene.render(now, disc),
            Self::Boot(scene) => scene.render(now, disc),
            Self::Placeholder(scene) => scene.render(now, disc),
        }
    }

    pub fn apply_palette(&mut self, palette: &Palette, duration: Duration, now: Instant) {
        match self {
            Self::Lights(scene) => scene.apply_palette(palette, duration, now),
            Self::Connecting(scene) => scene.apply_palette(palette, duration, now),
            Self::Boot(scene) => scene.apply_palette(palette, duration, now),
            Self::Placeholder(scene) => scene.apply_palette(palette, duration, now),
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Lights(scene) => scene.palette(),
            Self::Connecting(scene) => scene.palette(),
            Self::Boot(scene) => scene.palette(),
            Self::Placeholder(scene) => scene.palette(),
        }
    }

    pub fn set_parameter(&mut self, color: Color, now: Instant) {
        match self {
            Self::Lights(scene) => scene.set_parameter(color, now),
            Self::Connecting(scene) => scene.set_parameter(color, now),
            Self::Boot(scene) => scene.set_parameter(color, now),
            Self::Placeholder(scene) => scene.set_parameter(color, now),
        }
    }
}

/// Per-state scene storage
///
/// A scene is built on first access and reused afterwards.
#[derive(Debug, Clone)]
pub struct SceneStore {
    scenes: [Option<SceneSlot>; STATE_COUNT],
    tint: Color,
    recolor_duration: Duration,
}

impl SceneStore {
    pub fn new() -> Self {
        Self {
            scenes: core::array::from_fn(|_| None),
            tint: DEFAULT_PLACEHOLDER_TINT,
            recolor_duration: DEFAULT_TRANSITION_DURATION,
        }
    }

    /// Use `duration` for placeholder recolors
    #[must_use]
    pub fn with_recolor_duration(mut self, duration: Duration) -> Self {
        self.set_recolor_duration(duration);
        self
    }

    /// Scene of a state, created if it does not exist yet
    pub fn get_or_create(&mut self, state: OperatingState, now: Instant) -> &mut SceneSlot {
        let (tint, recolor) = (self.tint, self.recolor_duration);
        self.scenes[state.index()].get_or_insert_with(|| state.to_slot(now, tint, recolor))
    }

    /// Scene of a state if it was entered before
    pub fn get(&self, state: OperatingState) -> Option<&SceneSlot> {
        self.scenes[state.index()].as_ref()
    }

    pub fn contains(&self, state: OperatingState) -> bool {
        self.scenes[state.index()].is_some()
    }

    /// Forward the parameter color to every scene
    ///
    /// Scenes created later pick up the latest tint.
    pub fn set_parameter(&mut self, color: Color, now: Instant) {
        self.tint = color;
        for scene in self.scenes.iter_mut().flatten() {
            scene.set_parameter(color, now);
        }
    }

    pub const fn tint(&self) -> Color {
        self.tint
    }

    /// Change the placeholder recolor duration, also for an existing scene
    pub fn set_recolor_duration(&mut self, duration: Duration) {
        self.recolor_duration = duration;
        if let Some(SceneSlot::Placeholder(scene)) =
            &mut self.scenes[OperatingState::PlaceholderTransition.index()]
        {
            scene.set_recolor_duration(duration);
        }
    }

    pub const fn recolor_duration(&self) -> Duration {
        self.recolor_duration
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
