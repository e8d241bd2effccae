//! The viewer session: one owned context tying the components together.
//!
//! A [`Session`] holds the manifest, the timeline, the snapshot store, the
//! layer synchronizer and the map surface. Every UI event (navigation, date
//! input, search text, zoom, layer switches) enters through a method here.
//! Nothing is global, so sessions are independent of each other.
//!
//! # Startup
//! 1. Fetch and validate the base manifest; failure is fatal
//! 2. Build the static layers (fortifications, dragon teeth)
//! 3. Synchronize to the last available date, unless opened with
//!    [`Session::load`]

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
    fetcher::Fetcher,
    layers::{LayerKind, LayerToggles, LineLayer, MapSurface, RenderLayer},
    manifest::BaseManifest,
    store::SnapshotStore,
    sync::{ActiveSelection, LayerSynchronizer, SyncState},
    timeline::{Direction, Timeline},
    transform::transform_static_lines,
};
use std::sync::Arc;

/// Knobs for opening a session
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub cache_capacity: usize,
    pub zoom: u8,
    pub toggles: LayerToggles,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cache_capacity: crate::core::store::DEFAULT_CACHE_CAPACITY,
            zoom: crate::core::sync::DEFAULT_ZOOM,
            toggles: LayerToggles::default(),
        }
    }
}

pub struct Session<F, M> {
    manifest: Arc<BaseManifest>,
    timeline: Timeline,
    store: SnapshotStore<F>,
    sync: LayerSynchronizer,
    map: M,
    fortifications: LineLayer,
    dragon_teeth: LineLayer,
}

/// Fetch and validate the manifest; every failure is a fatal `ManifestLoad`
pub async fn load_manifest<F: Fetcher>(fetcher: &F) -> Result<BaseManifest> {
    let value = fetcher
        .fetch_manifest()
        .await
        .map_err(ViewerError::manifest_load)?;
    BaseManifest::from_value(value)
}

impl<F: Fetcher, M: MapSurface> Session<F, M> {
    /// Load the manifest, build static layers and show the latest date.
    ///
    /// A manifest failure aborts with a fatal error. A failure fetching the
    /// first snapshot does not: the session opens in the `Error` state with
    /// an empty map and can be navigated from there.
    pub async fn open(fetcher: F, map: M, options: SessionOptions) -> Result<Self> {
        let mut session = Self::load(fetcher, map, options).await?;
        let initial = session.timeline.last().clone();
        if let Err(e) = session.synchronize(initial).await {
            log::warn!("Initial snapshot unavailable: {e}");
        }
        Ok(session)
    }

    /// Like [`open`](Self::open) but render nothing; the session stays `Idle`
    /// until the first navigation, which starts from the latest date
    pub async fn load(fetcher: F, map: M, options: SessionOptions) -> Result<Self> {
        log::info!("Loading base manifest from {}", fetcher.describe());
        let manifest = load_manifest(&fetcher).await?;
        let timeline = Timeline::new(manifest.dates.clone())?;
        log::info!(
            "Manifest loaded: {} dates ({} to {}), {} units",
            timeline.len(),
            timeline.first(),
            timeline.last(),
            manifest.unit_map.len()
        );

        let mut sync = LayerSynchronizer::new(options.toggles, options.zoom);
        let fortifications = LineLayer::new(
            sync.layer_ids().next_id(),
            LayerKind::Fortifications,
            transform_static_lines(&manifest.fortifications),
        );
        let dragon_teeth = LineLayer::new(
            sync.layer_ids().next_id(),
            LayerKind::DragonTeeth,
            transform_static_lines(&manifest.dragon_teeth),
        );

        let mut session = Self {
            manifest: Arc::new(manifest),
            timeline,
            store: SnapshotStore::new(fetcher, options.cache_capacity),
            sync,
            map,
            fortifications,
            dragon_teeth,
        };
        session.attach_static_layers();
        Ok(session)
    }

    fn attach_static_layers(&mut self) {
        let toggles = self.sync.toggles();
        for layer in [&self.fortifications, &self.dragon_teeth] {
            if toggles.is_enabled(layer.kind()) {
                self.map.add_layer(layer);
            }
        }
    }

    async fn synchronize(&mut self, target: DateKey) -> Result<()> {
        self.sync
            .synchronize(target, &mut self.store, &self.manifest, &mut self.map)
            .await
    }

    /// The date navigation starts from: the rendered date, or the last one
    fn anchor(&self) -> DateKey {
        self.sync
            .selection()
            .date_key
            .clone()
            .unwrap_or_else(|| self.timeline.last().clone())
    }

    /// Step through the timeline; returns the date now shown
    pub async fn navigate(&mut self, direction: Direction) -> Result<DateKey> {
        let target = self.timeline.next_date_key(&self.anchor(), direction);
        log::debug!("Navigate {direction} -> {target}");
        self.synchronize(target.clone()).await?;
        Ok(target)
    }

    /// Jump to a free-text date such as `2023-01-31`
    pub async fn go_to_input(&mut self, input: &str) -> Result<DateKey> {
        let target = DateKey::from_input(input)?;
        self.go_to(target).await
    }

    pub async fn go_to(&mut self, target: DateKey) -> Result<DateKey> {
        self.timeline.require(&target)?;
        self.synchronize(target.clone()).await?;
        Ok(target)
    }

    /// Set the search query; returns how many unit markers remain visible
    pub fn search(&mut self, query: &str) -> usize {
        self.sync.apply_filter(query, &mut self.map)
    }

    /// Zoom changed: resize unit icons and re-apply the search
    pub fn zoom(&mut self, zoom: u8) -> usize {
        self.sync.rescale(zoom, &mut self.map)
    }

    /// Flip a layer switch; returns whether the layer is now shown
    pub fn toggle(&mut self, kind: LayerKind) -> bool {
        let enabled = self.sync.toggle(kind, &mut self.map);
        let static_layer = match kind {
            LayerKind::Fortifications => &self.fortifications,
            LayerKind::DragonTeeth => &self.dragon_teeth,
            _ => return enabled,
        };
        if enabled {
            self.map.add_layer(static_layer);
        } else {
            self.map.remove_layer(static_layer.id());
        }
        enabled
    }

    pub fn manifest(&self) -> &BaseManifest {
        &self.manifest
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn selection(&self) -> &ActiveSelection {
        self.sync.selection()
    }

    pub fn state(&self) -> SyncState {
        self.sync.state()
    }

    pub fn toggles(&self) -> LayerToggles {
        self.sync.toggles()
    }

    pub fn store(&self) -> &SnapshotStore<F> {
        &self.store
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn static_layer(&self, kind: LayerKind) -> Option<&LineLayer> {
        match kind {
            LayerKind::Fortifications => Some(&self.fortifications),
            LayerKind::DragonTeeth => Some(&self.dragon_teeth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fetcher::StaticFetcher, layers::InMemoryMap};
    use serde_json::json;

    fn fetcher() -> Arc<StaticFetcher> {
        Arc::new(
            StaticFetcher::new()
                .with_document(
                    "base",
                    json!({
                        "unit_map": {"1": {"n": "14th Mechanized", "sidc": "10031000161211000000"}},
                        "dates": ["20230101", "20230102", "20230103"],
                        "fortifications": [[[1.0, 1.0], [2.0, 2.0]]]
                    }),
                )
                .with_document("20230101", json!({"units": {"ua": [[1, [1.0, 1.0]]]}}))
                .with_document("20230102", json!({"units": {"ua": [[1, [1.0, 1.0]], [9, [2.0, 2.0]]]}}))
                .with_document("20230103", json!({"units": {"ru": [[9, [3.0, 3.0]]]}})),
        )
    }

    async fn open(fetcher: &Arc<StaticFetcher>) -> Session<Arc<StaticFetcher>, InMemoryMap> {
        Session::open(Arc::clone(fetcher), InMemoryMap::new(), SessionOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_shows_last_date() {
        let fetcher = fetcher();
        let session = open(&fetcher).await;
        assert_eq!(session.selection().date_key.as_ref().unwrap().as_str(), "20230103");
        assert_eq!(session.state(), SyncState::Ready);
        assert_eq!(fetcher.requests(), vec!["base", "20230103"]);
        assert_eq!(session.map().count_of(LayerKind::Fortifications), 0);
    }

    #[tokio::test]
    async fn test_load_fetches_only_the_requested_date() {
        let fetcher = fetcher();
        let mut session = Session::load(Arc::clone(&fetcher), InMemoryMap::new(), SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(session.state(), SyncState::Idle);
        assert!(session.selection().date_key.is_none());

        session.go_to_input("2023-01-01").await.unwrap();
        assert_eq!(fetcher.requests(), vec!["base", "20230101"]);
        assert_eq!(session.state(), SyncState::Ready);
    }

    #[tokio::test]
    async fn test_load_then_navigate_starts_from_latest() {
        let fetcher = fetcher();
        let mut session = Session::load(Arc::clone(&fetcher), InMemoryMap::new(), SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(session.navigate(Direction::Previous).await.unwrap().as_str(), "20230102");
        assert_eq!(fetcher.requests(), vec!["base", "20230102"]);
    }

    #[tokio::test]
    async fn test_open_fails_without_manifest() {
        let fetcher = StaticFetcher::new();
        let result = Session::open(fetcher, InMemoryMap::new(), SessionOptions::default()).await;
        let err = result.err().unwrap();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_navigate_and_return_hits_cache() {
        let fetcher = fetcher();
        let mut session = open(&fetcher).await;

        assert_eq!(session.navigate(Direction::Previous).await.unwrap().as_str(), "20230102");
        assert_eq!(session.navigate(Direction::Next).await.unwrap().as_str(), "20230103");
        assert_eq!(fetcher.request_count(), 3);
    }

    #[tokio::test]
    async fn test_go_to_input_validates_against_timeline() {
        let fetcher = fetcher();
        let mut session = open(&fetcher).await;

        assert_eq!(session.go_to_input("2023-01-01").await.unwrap().as_str(), "20230101");
        let err = session.go_to_input("2023-02-01").await.unwrap_err();
        assert!(matches!(err, ViewerError::DateNotAvailable { .. }));
        assert!(session.go_to_input("yesterday").await.is_err());
        assert_eq!(session.selection().date_key.as_ref().unwrap().as_str(), "20230101");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_date() {
        let fetcher = fetcher();
        let mut session = open(&fetcher).await;
        fetcher.remove("20230102");

        let err = session.navigate(Direction::Previous).await.unwrap_err();
        assert!(matches!(err, ViewerError::Fetch { .. }));
        assert_eq!(session.state(), SyncState::Error);
        assert_eq!(session.selection().date_key.as_ref().unwrap().as_str(), "20230103");
        assert_eq!(session.map().count_of(LayerKind::Units), 1);
    }

    #[tokio::test]
    async fn test_search_and_toggles() {
        let fetcher = fetcher();
        let mut session = open(&fetcher).await;
        session.go_to_input("20230102").await.unwrap();

        assert_eq!(session.search("mechanized"), 1);
        assert_eq!(session.zoom(12), 1);

        assert!(session.toggle(LayerKind::Fortifications));
        assert_eq!(session.map().count_of(LayerKind::Fortifications), 1);
        assert!(!session.toggle(LayerKind::Units));
        assert_eq!(session.map().count_of(LayerKind::Units), 0);
        assert!(session.toggle(LayerKind::Units));
        assert_eq!(session.selection().layers.visible_unit_count(), 1);
    }
}
