//! Side-effect hooks into external collaborators.
//!
//! The engine never plays audio, draws menus or reads image files itself.
//! It calls out through these narrow traits and ignores whatever happens on
//! the other side. Every method has a no-op default so collaborators only
//! implement what they care about.
//!
//! [`Services`] bundles one implementation of each and is handed to the
//! round controller at construction.

pub mod assets;

pub use assets::{load_with_fallback, AssetSource, DirectoryAssets, StaticAssets};

/// Audio cues. Fire-and-forget.
pub trait AudioHooks {
    fn on_flip(&mut self) {}
    fn on_match(&mut self) {}
    fn on_mismatch(&mut self) {}
    fn on_win(&mut self) {}
    fn on_game_over(&mut self) {}
    fn on_hazard_found(&mut self) {}
}

/// Menu visibility.
pub trait MenuHooks {
    fn show_main_menu(&mut self, _show: bool) {}
    fn show_pause_menu(&mut self, _show: bool) {}
    fn show_game_over_menu(&mut self, _show: bool) {}
    fn show_end_level_menu(&mut self, _show: bool) {}
}

/// Hooks that do nothing. Used for headless play and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioHooks for Silent {}
impl MenuHooks for Silent {}

/// Collaborators the round controller talks to.
pub struct Services {
    pub audio: Box<dyn AudioHooks>,
    pub menus: Box<dyn MenuHooks>,
    pub assets: Box<dyn AssetSource>,
}

impl Services {
    /// Bundle the given collaborators.
    pub fn new(
        audio: Box<dyn AudioHooks>,
        menus: Box<dyn MenuHooks>,
        assets: Box<dyn AssetSource>,
    ) -> Self {
        Self {
            audio,
            menus,
            assets,
        }
    }

    /// Silent audio and menus with the given asset source.
    pub fn headless(assets: impl AssetSource + 'static) -> Self {
        Self::new(Box::new(Silent), Box::new(Silent), Box::new(assets))
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
