//! Layer synchronizer: keeps the dynamic layers in step with the active date.
//!
//! # States
//! `Idle` → `Loading` → `Ready` | `Error`, and back to `Loading` on the next
//! request. `Error` is recoverable; the previously rendered layers stay on
//! the map.
//!
//! # In-flight guard
//! [`LayerSynchronizer::begin`] refuses to start while a request is
//! `Loading` and hands out a [`SyncTicket`] stamped with a generation number.
//! Only the ticket of the current generation may complete or fail, so a late
//! response can never overwrite a newer selection, whichever trigger fired.

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
    fetcher::Fetcher,
    layers::{LayerIds, LayerKind, LayerToggles, LineLayer, MapSurface, PointLayer, RenderLayer, UnitLayer},
    manifest::BaseManifest,
    search::SearchFilter,
    snapshot::Snapshot,
    store::SnapshotStore,
    transform::{transform_frontline, transform_points, transform_units},
};
use std::sync::Arc;

pub const DEFAULT_ZOOM: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTicket {
    generation: u64,
    target: DateKey,
}

impl SyncTicket {
    pub fn target(&self) -> &DateKey {
        &self.target
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The three dynamic layers currently built
#[derive(Debug, Default)]
pub struct DynamicLayers {
    pub frontline: Option<LineLayer>,
    pub units: Vec<UnitLayer>,
    pub geos: Vec<PointLayer>,
}

impl DynamicLayers {
    pub fn unit_count(&self) -> usize {
        self.units.iter().map(|layer| layer.markers.len()).sum()
    }

    pub fn visible_unit_count(&self) -> usize {
        self.units.iter().map(UnitLayer::visible_count).sum()
    }

    pub fn geo_count(&self) -> usize {
        self.geos.iter().map(|layer| layer.collection.len()).sum()
    }
}

/// What is on screen right now
#[derive(Debug, Default)]
pub struct ActiveSelection {
    pub date_key: Option<DateKey>,
    pub snapshot: Option<Arc<Snapshot>>,
    pub filter: SearchFilter,
    pub layers: DynamicLayers,
}

#[derive(Debug)]
pub struct LayerSynchronizer {
    state: SyncState,
    generation: u64,
    pending: Option<DateKey>,
    zoom: u8,
    toggles: LayerToggles,
    ids: LayerIds,
    selection: ActiveSelection,
}

impl Default for LayerSynchronizer {
    fn default() -> Self {
        Self::new(LayerToggles::default(), DEFAULT_ZOOM)
    }
}

impl LayerSynchronizer {
    pub fn new(toggles: LayerToggles, zoom: u8) -> Self {
        Self {
            state: SyncState::Idle,
            generation: 0,
            pending: None,
            zoom,
            toggles,
            ids: LayerIds::default(),
            selection: ActiveSelection::default(),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn toggles(&self) -> LayerToggles {
        self.toggles
    }

    /// Hand out fresh ids for layers built outside the synchronizer
    pub fn layer_ids(&mut self) -> &mut LayerIds {
        &mut self.ids
    }

    /// Enter `Loading` for `target`; rejected while another request is in flight
    pub fn begin(&mut self, target: DateKey) -> Result<SyncTicket> {
        if self.state == SyncState::Loading {
            let pending = self.pending.clone().unwrap_or_else(|| target.clone());
            log::debug!("Rejecting sync to {target}, {pending} still in flight");
            return Err(ViewerError::SyncInFlight { pending });
        }
        self.generation += 1;
        self.state = SyncState::Loading;
        self.pending = Some(target.clone());
        log::debug!("Sync #{} to {target} started", self.generation);
        Ok(SyncTicket {
            generation: self.generation,
            target,
        })
    }

    fn check_ticket(&self, ticket: &SyncTicket) -> Result<()> {
        if ticket.generation != self.generation || self.state != SyncState::Loading {
            return Err(ViewerError::StaleSync {
                generation: ticket.generation,
                current: self.generation,
            });
        }
        Ok(())
    }

    /// Replace the three dynamic layers with ones built from `snapshot`
    pub fn complete(
        &mut self,
        ticket: SyncTicket,
        snapshot: Arc<Snapshot>,
        manifest: &BaseManifest,
        map: &mut dyn MapSurface,
    ) -> Result<()> {
        self.check_ticket(&ticket)?;

        let frontline = LineLayer::new(
            self.ids.next_id(),
            LayerKind::Frontline,
            transform_frontline(&snapshot.frontline),
        );
        self.replace_frontline(frontline, map);

        let zoom = self.zoom;
        let units = transform_units(&snapshot.units, manifest).map(|side, collection| {
            collection.map(|c| UnitLayer::from_collection(self.ids.next_id(), side, c, zoom))
        });
        self.replace_units([units.ua, units.ru].into_iter().flatten().collect(), map);

        let geos = transform_points(&snapshot.geos)
            .map(|side, collection| PointLayer::new(self.ids.next_id(), side, collection));
        self.replace_geos(vec![geos.ua, geos.ru], map);

        self.selection.date_key = Some(ticket.target.clone());
        self.selection.snapshot = Some(snapshot);
        self.pending = None;
        self.state = SyncState::Ready;
        log::debug!(
            "Sync #{} to {} complete: {} units, {} points",
            ticket.generation,
            ticket.target,
            self.selection.layers.unit_count(),
            self.selection.layers.geo_count()
        );
        Ok(())
    }

    /// Record a failed request; rendered layers are left untouched
    pub fn fail(&mut self, ticket: SyncTicket, error: &ViewerError) -> Result<()> {
        self.check_ticket(&ticket)?;
        log::warn!("Sync to {} failed: {error}", ticket.target);
        self.pending = None;
        self.state = SyncState::Error;
        Ok(())
    }

    /// Resolve `target` through the store and swap the layers in
    pub async fn synchronize<F: Fetcher>(
        &mut self,
        target: DateKey,
        store: &mut SnapshotStore<F>,
        manifest: &BaseManifest,
        map: &mut dyn MapSurface,
    ) -> Result<()> {
        let ticket = self.begin(target)?;
        match store.resolve(ticket.target()).await {
            Ok(snapshot) => self.complete(ticket, snapshot, manifest, map),
            Err(e) => {
                self.fail(ticket, &e)?;
                Err(e)
            }
        }
    }

    fn replace_frontline(&mut self, layer: LineLayer, map: &mut dyn MapSurface) {
        if let Some(old) = self.selection.layers.frontline.take() {
            map.remove_layer(old.id());
        }
        map.add_layer(&layer);
        self.selection.layers.frontline = Some(layer);
    }

    fn replace_units(&mut self, layers: Vec<UnitLayer>, map: &mut dyn MapSurface) {
        for old in self.selection.layers.units.drain(..) {
            map.remove_layer(old.id());
        }
        self.selection.layers.units = layers;
        self.selection.filter.apply(&mut self.selection.layers.units);
        if self.toggles.units {
            for layer in &self.selection.layers.units {
                map.add_layer(layer);
            }
        }
    }

    fn replace_geos(&mut self, layers: Vec<PointLayer>, map: &mut dyn MapSurface) {
        for old in self.selection.layers.geos.drain(..) {
            map.remove_layer(old.id());
        }
        if self.toggles.geos {
            for layer in &layers {
                map.add_layer(layer);
            }
        }
        self.selection.layers.geos = layers;
    }

    /// Set the search query and re-apply it; returns visible unit count
    pub fn apply_filter(&mut self, query: &str, map: &mut dyn MapSurface) -> usize {
        self.selection.filter = SearchFilter::new(query);
        self.refresh_units(map)
    }

    /// Recompute every unit icon for `zoom` without refetching
    pub fn rescale(&mut self, zoom: u8, map: &mut dyn MapSurface) -> usize {
        self.zoom = zoom;
        for marker in self
            .selection
            .layers
            .units
            .iter_mut()
            .flat_map(|layer| layer.markers.iter_mut())
        {
            marker.rescale(zoom);
        }
        self.refresh_units(map)
    }

    /// Re-apply the filter and push the updated markers to the map
    fn refresh_units(&mut self, map: &mut dyn MapSurface) -> usize {
        let visible = self.selection.filter.apply(&mut self.selection.layers.units);
        for layer in &self.selection.layers.units {
            if map.has_layer(layer.id()) {
                map.add_layer(layer);
            }
        }
        visible
    }

    /// Flip a dynamic layer's switch, attaching or detaching its layers.
    /// Static kinds only flip the switch; the session owns those layers.
    pub fn toggle(&mut self, kind: LayerKind, map: &mut dyn MapSurface) -> bool {
        let enabled = self.toggles.toggle(kind);
        match kind {
            LayerKind::Units => {
                for layer in &self.selection.layers.units {
                    if enabled {
                        map.add_layer(layer);
                    } else {
                        map.remove_layer(layer.id());
                    }
                }
                if enabled {
                    self.refresh_units(map);
                }
            }
            LayerKind::Geos => {
                for layer in &self.selection.layers.geos {
                    if enabled {
                        map.add_layer(layer);
                    } else {
                        map.remove_layer(layer.id());
                    }
                }
            }
            LayerKind::Frontline | LayerKind::Fortifications | LayerKind::DragonTeeth => {}
        }
        enabled
    }
}
