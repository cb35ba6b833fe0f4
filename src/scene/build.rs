use crate::animation::track::Track;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::lifecycle::section::{Entrance, Section};
use crate::responsive::variant::{DeviceClass, Drive, VariantGraph};
use crate::scene::model::{AnimatedDef, DriveDef, SectionDef, TweenDef, VariantDef};
use crate::timeline::dsl::TimelineBuilder;

/// Lower one authored section into its runtime form.
pub(crate) fn build_section(def: &SectionDef, default_lag_ms: f64) -> ChoreoResult<Section> {
    let mut section = Section::new(def.id.as_str(), def.layout).with_items(def.items.clone());
    if let Some(e) = &def.entrance {
        let tracks = build_tracks(&e.tweens)
            .map_err(|err| ChoreoError::scene(format!("section '{}' entrance: {err}", def.id)))?;
        section = section.with_entrance(Entrance {
            tracks,
            duration_ms: e.duration_ms,
        });
    }
    for (class, variant) in [(DeviceClass::Wide, &def.wide), (DeviceClass::Compact, &def.compact)] {
        let graph = build_variant(variant, default_lag_ms).map_err(|err| {
            ChoreoError::scene(format!("section '{}' {class:?} variant: {err}", def.id))
        })?;
        section = section.with_variant(class, graph);
    }
    section.validate()?;
    Ok(section)
}

pub(crate) fn build_variant(def: &VariantDef, default_lag_ms: f64) -> ChoreoResult<VariantGraph> {
    let VariantDef::Animated(AnimatedDef {
        trigger,
        drive,
        tweens,
    }) = def
    else {
        return Ok(VariantGraph::Rest);
    };
    let drive = match *drive {
        DriveDef::Scrub { lag_ms } => Drive::Scrub {
            lag_ms: lag_ms.unwrap_or(default_lag_ms),
        },
        DriveDef::PlayOnEnter { duration_ms } => Drive::PlayOnEnter { duration_ms },
    };
    Ok(VariantGraph::Animated {
        trigger: *trigger,
        drive,
        tracks: build_tracks(tweens)?,
    })
}

/// Place tweens on the `[0, 1]` axis; a tween's end is clamped to 1.
pub(crate) fn build_tracks(tweens: &[TweenDef]) -> ChoreoResult<Vec<Track>> {
    let mut b = TimelineBuilder::new();
    for (i, tw) in tweens.iter().enumerate() {
        if !tw.span.is_finite() || tw.span < 0.0 {
            return Err(ChoreoError::animation(format!(
                "tween {i}: span must be finite and >= 0, got {}",
                tw.span
            )));
        }
        let targets = tw.targets.to_vec();
        if targets.is_empty() {
            return Err(ChoreoError::animation(format!("tween {i} has no targets")));
        }
        let end = (tw.at + tw.span).min(1.0);
        b = b
            .stagger(targets, tw.at, end, tw.from.clone(), tw.to.clone(), tw.ease, tw.stagger)
            .map_err(|e| ChoreoError::animation(format!("tween {i}: {e}")))?;
    }
    b.into_tracks()
}
