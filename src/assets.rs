//! Asset readiness
//!
//! The host loads images and sounds however it likes and reports back here.
//! A session may only start once every required asset has either loaded or
//! failed. Failed images are drawn with fallback colors and failed sounds
//! are skipped.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::error::AssetError;
use crate::sim::EntityKind;

/// Asset category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Sound,
}

/// Load state of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed(AssetError),
}

impl AssetStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }
}

/// Something that can fetch assets by name, e.g. the browser or a test double
pub trait AssetProvider {
    fn load(&mut self, name: &str, kind: AssetKind) -> Result<(), AssetError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AssetEntry {
    kind: AssetKind,
    status: AssetStatus,
}

/// Required assets and their load state, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    entries: BTreeMap<String, AssetEntry>,
}

impl AssetManifest {
    /// Manifest with nothing required
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything a game draws or plays, all pending
    pub fn for_game(config: &GameConfig) -> Self {
        let mut manifest = Self::new();
        let kinds: &[EntityKind] = match config {
            GameConfig::Dodge(_) => &[
                EntityKind::Player,
                EntityKind::GoodItem,
                EntityKind::BadItem,
            ],
            GameConfig::Soccer(_) => &[EntityKind::Player, EntityKind::Opponent, EntityKind::Ball],
        };
        for kind in kinds {
            manifest.require(sprite_name(*kind), AssetKind::Image);
        }
        if let GameConfig::Soccer(_) = config {
            manifest.require(SOUND_KICK, AssetKind::Sound);
            manifest.require(SOUND_GOAL, AssetKind::Sound);
        }
        manifest
    }

    /// Add a pending asset. Re-requiring an existing name keeps its status.
    pub fn require(&mut self, name: &str, kind: AssetKind) {
        self.entries
            .entry(name.to_string())
            .or_insert(AssetEntry {
                kind,
                status: AssetStatus::Pending,
            });
    }

    pub fn mark_ready(&mut self, name: &str) -> Result<(), AssetError> {
        self.set_status(name, AssetStatus::Ready)
    }

    pub fn mark_failed(&mut self, name: &str, reason: &str) -> Result<(), AssetError> {
        log::warn!("Asset `{name}` failed to load: {reason}");
        self.set_status(
            name,
            AssetStatus::Failed(AssetError::LoadFailed {
                name: name.to_string(),
                reason: reason.to_string(),
            }),
        )
    }

    /// Ask `provider` for every pending asset and record the outcome
    pub fn load_all(&mut self, provider: &mut impl AssetProvider) {
        for (name, entry) in self.entries.iter_mut() {
            if entry.status.is_resolved() {
                continue;
            }
            entry.status = match provider.load(name, entry.kind) {
                Ok(()) => AssetStatus::Ready,
                Err(err) => {
                    log::warn!("{err}");
                    AssetStatus::Failed(err)
                }
            };
        }
    }

    pub fn status(&self, name: &str) -> Option<&AssetStatus> {
        self.entries.get(name).map(|e| &e.status)
    }

    pub fn is_ready(&self, name: &str) -> bool {
        matches!(self.status(name), Some(AssetStatus::Ready))
    }

    /// True when nothing is still pending
    pub fn is_resolved(&self) -> bool {
        self.entries.values().all(|e| e.status.is_resolved())
    }

    /// Names still loading, in name order
    pub fn pending(&self) -> Vec<String> {
        self.names_where(|s| !s.is_resolved())
    }

    /// Names that failed, in name order
    pub fn failed(&self) -> Vec<String> {
        self.names_where(|s| matches!(s, AssetStatus::Failed(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn names_where(&self, pred: impl Fn(&AssetStatus) -> bool) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| pred(&e.status))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn set_status(&mut self, name: &str, status: AssetStatus) -> Result<(), AssetError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;
        entry.status = status;
        Ok(())
    }
}

pub const SOUND_KICK: &str = "kick";
pub const SOUND_GOAL: &str = "goal";

/// Image asset name for an entity kind
pub fn sprite_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Player => "player",
        EntityKind::Opponent => "cpu",
        EntityKind::GoodItem => "apple",
        EntityKind::BadItem => "bomb",
        EntityKind::Ball => "ball",
    }
}
