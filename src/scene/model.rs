use crate::animation::ease::Ease;
use crate::animation::state::StateDef;
use crate::foundation::core::{SectionGeometry, TargetId};
use crate::lifecycle::section::DisplayItem;
use crate::scroll::progress::Trigger;
use serde::{Deserialize, Serialize};

pub(crate) const PAGE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PageDef {
    #[serde(default = "default_version")]
    pub(crate) version: u32,
    pub(crate) sections: Vec<SectionDef>,
}

fn default_version() -> u32 {
    PAGE_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SectionDef {
    pub(crate) id: String,
    pub(crate) layout: SectionGeometry,
    #[serde(default)]
    pub(crate) items: Vec<DisplayItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) entrance: Option<EntranceDef>,
    #[serde(default)]
    pub(crate) wide: VariantDef,
    #[serde(default)]
    pub(crate) compact: VariantDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EntranceDef {
    pub(crate) duration_ms: f64,
    pub(crate) tweens: Vec<TweenDef>,
}

/// `"rest"` or an animated graph.
#[derive(Debug, Clone, Default)]
pub(crate) enum VariantDef {
    #[default]
    Rest,
    Animated(AnimatedDef),
}

impl Serialize for VariantDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Rest => serializer.serialize_str("rest"),
            Self::Animated(a) => a.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for VariantDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Animated(AnimatedDef),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyword(k) if k == "rest" => Ok(Self::Rest),
            Repr::Keyword(k) => Err(serde::de::Error::custom(format!(
                "unknown variant keyword '{k}' (expected \"rest\" or an object)"
            ))),
            Repr::Animated(a) => Ok(Self::Animated(a)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AnimatedDef {
    #[serde(default = "default_trigger")]
    pub(crate) trigger: Trigger,
    #[serde(default)]
    pub(crate) drive: DriveDef,
    pub(crate) tweens: Vec<TweenDef>,
}

fn default_trigger() -> Trigger {
    Trigger::DEFAULT_PINNED
}

/// Like [`crate::responsive::variant::Drive`], but the scrub lag may fall back to the engine
/// default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub(crate) enum DriveDef {
    Scrub {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lag_ms: Option<f64>,
    },
    PlayOnEnter {
        duration_ms: f64,
    },
}

impl Default for DriveDef {
    fn default() -> Self {
        Self::Scrub { lag_ms: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TweenDef {
    pub(crate) targets: TargetsDef,
    #[serde(default)]
    pub(crate) at: f64,
    #[serde(default = "default_span")]
    pub(crate) span: f64,
    #[serde(default)]
    pub(crate) from: StateDef,
    #[serde(default)]
    pub(crate) to: StateDef,
    #[serde(default)]
    pub(crate) ease: Ease,
    #[serde(default)]
    pub(crate) stagger: f64,
}

pub(crate) const DEFAULT_SPAN: f64 = 0.3;

fn default_span() -> f64 {
    DEFAULT_SPAN
}

/// One target or a list of targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum TargetsDef {
    One(TargetId),
    Many(Vec<TargetId>),
}

impl TargetsDef {
    pub(crate) fn to_vec(&self) -> Vec<TargetId> {
        match self {
            Self::One(t) => vec![t.clone()],
            Self::Many(ts) => ts.clone(),
        }
    }
}
