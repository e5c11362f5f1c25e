//! Read-only registry of ship sprite sets.
//!
//! Built once at startup by [`load_sprite_registry`] and never mutated after.
//! Ships keep only a variant index; the registry is handed to
//! [`crate::ship::ShipController::new`] and to the sprite-apply system
//! explicitly.

use crate::config::{ShipConfig, SpriteSetPaths};
use crate::ship::sprite_direction::SpriteDirection;
use bevy::prelude::*;

/// The three banking sprites of one ship variant.
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    pub left: Handle<Image>,
    pub center: Handle<Image>,
    pub right: Handle<Image>,
}

impl SpriteSet {
    #[inline]
    pub fn get(&self, direction: SpriteDirection) -> &Handle<Image> {
        match direction {
            SpriteDirection::Left => &self.left,
            SpriteDirection::Center => &self.center,
            SpriteDirection::Right => &self.right,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ShipSpriteRegistry {
    sets: Vec<SpriteSet>,
}

impl ShipSpriteRegistry {
    pub fn new(sets: Vec<SpriteSet>) -> Self {
        Self { sets }
    }

    pub fn get(&self, variant: usize) -> Option<&SpriteSet> {
        self.sets.get(variant)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Map a configured variant index onto a registered one.
    ///
    /// Negative indices become 0 silently.  Indices past the end also become 0,
    /// with a warning, since that usually means a missing `[[sprite_sets]]` entry.
    pub fn resolve_variant(&self, requested: i64) -> usize {
        let index = usize::try_from(requested.max(0)).unwrap_or(0);
        if index < self.len() || (index == 0 && self.is_empty()) {
            index
        } else {
            warn!(
                "[sprites] variant {index} not registered ({} sets); using variant 0",
                self.len()
            );
            0
        }
    }

    /// Handle for `direction` of `variant`, falling back to variant 0.
    pub fn image(&self, variant: usize, direction: SpriteDirection) -> Option<Handle<Image>> {
        self.get(variant)
            .or_else(|| self.get(0))
            .map(|set| set.get(direction).clone())
    }
}

fn load_set(asset_server: &AssetServer, paths: &SpriteSetPaths) -> SpriteSet {
    SpriteSet {
        left: asset_server.load(paths.left.clone()),
        center: asset_server.load(paths.center.clone()),
        right: asset_server.load(paths.right.clone()),
    }
}

/// Startup system: request every configured sprite image and fill the registry.
///
/// Must run after [`crate::config::load_ship_config`].  Nothing writes the
/// registry after this.
pub fn load_sprite_registry(
    mut registry: ResMut<ShipSpriteRegistry>,
    asset_server: Res<AssetServer>,
    config: Res<ShipConfig>,
) {
    let config = config.sanitized();
    let sets: Vec<SpriteSet> = config
        .sprite_sets
        .iter()
        .map(|paths| load_set(&asset_server, paths))
        .collect();
    info!("[sprites] Registered {} ship sprite set(s)", sets.len());
    *registry = ShipSpriteRegistry::new(sets);
}
