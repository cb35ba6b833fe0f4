use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::EngineConfig;
use crate::foundation::core::{SectionId, TargetId};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::lifecycle::section::Section;
use crate::scene::build::build_section;
use crate::scene::model::{PAGE_VERSION, PageDef};

/// An authored page: its sections in document order.
#[derive(Debug, Clone)]
pub struct Page {
    def: PageDef,
}

impl Page {
    /// Parse a page from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        let def: PageDef = serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse page JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChoreoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Number of authored sections.
    pub fn section_count(&self) -> usize {
        self.def.sections.len()
    }

    /// Section ids in document order.
    pub fn section_ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.def.sections.iter().map(|s| SectionId::new(s.id.as_str()))
    }

    /// Check structure, tweens, and that no target is shared between sections.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.sections(&EngineConfig::default()).map(|_| ())
    }

    /// Build runtime sections; scrub variants without a lag use `config.default_scrub_lag_ms`.
    pub fn sections(&self, config: &EngineConfig) -> ChoreoResult<Vec<Section>> {
        if self.def.version != PAGE_VERSION {
            return Err(ChoreoError::validation(format!(
                "unsupported page version {} (expected {PAGE_VERSION})",
                self.def.version
            )));
        }

        let mut ids = BTreeSet::new();
        let mut owners: BTreeMap<TargetId, SectionId> = BTreeMap::new();
        let mut out = Vec::with_capacity(self.def.sections.len());
        for def in &self.def.sections {
            if !ids.insert(def.id.as_str()) {
                return Err(ChoreoError::scene(format!(
                    "duplicate section id '{}'",
                    def.id
                )));
            }
            let section = build_section(def, config.default_scrub_lag_ms)?;
            for target in section.targets() {
                if let Some(owner) = owners.get(&target) {
                    return Err(ChoreoError::scene(format!(
                        "target '{target}' is animated by sections '{owner}' and '{}'",
                        def.id
                    )));
                }
                owners.insert(target, section.id().clone());
            }
            out.push(section);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/page.rs"]
mod tests;
