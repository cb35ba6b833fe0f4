use std::collections::BTreeMap;

use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Animatable visual property of a target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal offset in pixels.
    X,
    /// Vertical offset in pixels.
    Y,
    /// In-plane rotation in degrees.
    Rotate,
    /// Rotation around the vertical axis in degrees.
    RotateY,
    /// Uniform scale factor.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 6] = [
        Property::X,
        Property::Y,
        Property::Rotate,
        Property::RotateY,
        Property::Scale,
        Property::Opacity,
    ];

    /// Untransformed, fully visible value.
    pub fn resting(self) -> f64 {
        match self {
            Self::X | Self::Y | Self::Rotate | Self::RotateY => 0.0,
            Self::Scale | Self::Opacity => 1.0,
        }
    }
}

/// Authored property value; viewport units resolve at advance time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Plain number (pixels, degrees or unitless depending on the property).
    Num(f64),
    /// Percentage of viewport width (`"20vw"`).
    Vw(f64),
    /// Percentage of viewport height (`"20vh"`).
    Vh(f64),
}

impl Value {
    /// Shorthand for [`Value::Vw`].
    pub fn vw(v: f64) -> Self {
        Self::Vw(v)
    }

    /// Shorthand for [`Value::Vh`].
    pub fn vh(v: f64) -> Self {
        Self::Vh(v)
    }

    /// Resolve against the viewport into a plain number.
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Num(v) => v,
            Self::Vw(v) => v * viewport.width / 100.0,
            Self::Vh(v) => v * viewport.height / 100.0,
        }
    }

    fn is_finite(self) -> bool {
        match self {
            Self::Num(v) | Self::Vw(v) | Self::Vh(v) => v.is_finite(),
        }
    }

    /// Parse `"12"`, `"12px"`, `"12deg"`, `"-20vw"` or `"5vh"`.
    pub fn parse(raw: &str) -> ChoreoResult<Self> {
        let s = raw.trim();
        let (num, ctor): (&str, fn(f64) -> Value) = if let Some(n) = s.strip_suffix("vw") {
            (n, Value::Vw)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, Value::Vh)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Value::Num)
        } else if let Some(n) = s.strip_suffix("deg") {
            (n, Value::Num)
        } else {
            (s, Value::Num)
        };
        let v: f64 = num
            .trim()
            .parse()
            .map_err(|_| ChoreoError::animation(format!("invalid property value '{raw}'")))?;
        if !v.is_finite() {
            return Err(ChoreoError::animation(format!(
                "property value '{raw}' is not finite"
            )));
        }
        Ok(ctor(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Self::Num(v) => serializer.serialize_f64(v),
            Self::Vw(v) => serializer.serialize_str(&format!("{v}vw")),
            Self::Vh(v) => serializer.serialize_str(&format!("{v}vh")),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Self::Num(v)),
            Repr::Str(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Sparse authored state: the properties a keyframe mentions.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StateDef(pub BTreeMap<Property, Value>);

impl StateDef {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `prop` to `value` (builder style).
    pub fn with(mut self, prop: Property, value: impl Into<Value>) -> Self {
        self.0.insert(prop, value.into());
        self
    }

    /// Set the horizontal offset.
    pub fn x(self, value: impl Into<Value>) -> Self {
        self.with(Property::X, value)
    }

    /// Set the vertical offset.
    pub fn y(self, value: impl Into<Value>) -> Self {
        self.with(Property::Y, value)
    }

    /// Set the in-plane rotation (degrees).
    pub fn rotate(self, deg: f64) -> Self {
        self.with(Property::Rotate, deg)
    }

    /// Set the Y-axis rotation (degrees).
    pub fn rotate_y(self, deg: f64) -> Self {
        self.with(Property::RotateY, deg)
    }

    /// Set the scale factor.
    pub fn scale(self, v: f64) -> Self {
        self.with(Property::Scale, v)
    }

    /// Set the opacity.
    pub fn opacity(self, v: f64) -> Self {
        self.with(Property::Opacity, v)
    }

    /// The resting values for every property.
    pub fn resting() -> Self {
        Self(
            Property::ALL
                .iter()
                .map(|&p| (p, Value::Num(p.resting())))
                .collect(),
        )
    }

    /// Value authored for `prop`, if any.
    pub fn get(&self, prop: Property) -> Option<Value> {
        self.0.get(&prop).copied()
    }

    /// Iterate authored properties in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, Value)> + '_ {
        self.0.iter().map(|(&p, &v)| (p, v))
    }

    /// Return `true` when no property is authored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn validate(&self) -> ChoreoResult<()> {
        for (prop, value) in self.iter() {
            if !value.is_finite() {
                return Err(ChoreoError::animation(format!(
                    "value for {prop:?} must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Resolved numeric state written to a target. Only touched properties are present.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VisualState(pub BTreeMap<Property, f64>);

impl VisualState {
    /// Empty state (writes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Every property at its resting value.
    pub fn resting() -> Self {
        Self(Property::ALL.iter().map(|&p| (p, p.resting())).collect())
    }

    /// Resting values for just `props`.
    pub fn resting_for(props: impl IntoIterator<Item = Property>) -> Self {
        Self(props.into_iter().map(|p| (p, p.resting())).collect())
    }

    /// Resolved value for `prop`, if touched.
    pub fn get(&self, prop: Property) -> Option<f64> {
        self.0.get(&prop).copied()
    }

    /// Value for `prop`, falling back to its resting value.
    pub fn value_or_resting(&self, prop: Property) -> f64 {
        self.get(prop).unwrap_or_else(|| prop.resting())
    }

    /// Set `prop` to `v`.
    pub fn set(&mut self, prop: Property, v: f64) {
        self.0.insert(prop, v);
    }

    /// Overwrite with every property present in `other`.
    pub fn merge(&mut self, other: &VisualState) {
        for (&p, &v) in &other.0 {
            self.0.insert(p, v);
        }
    }

    /// Return `true` when every touched property sits at its resting value.
    pub fn is_resting(&self) -> bool {
        self.0
            .iter()
            .all(|(p, v)| (v - p.resting()).abs() <= 1e-9)
    }

    /// Return `true` when nothing is touched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Touched properties in stable order.
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
