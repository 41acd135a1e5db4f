//! The guide model: owns the catalog and everything derived from it.
//!
//! # Rebuild ordering
//!
//! Derived state (layout, index) is rebuilt in full, never patched, on:
//!
//! 1. category arrival
//! 2. stream arrival
//! 3. a session flag change
//!
//! Data arrives tagged with a [`FetchTicket`]. Only the most recently issued
//! ticket may apply data; results of a superseded fetch are dropped, so the
//! last fetch wins regardless of completion order.

use std::fmt;

use vibeguide_catalog::{Catalog, CatalogSource, Category, ResilientSource, Stream, StreamQuery};
use vibeguide_core::event::Event;
use vibeguide_core::rng::{RandomSource, XorShift64};
use vibeguide_layout::{ConfigError, Layout, LayoutOptions, generate_layout};
use vibeguide_nav::{GridIndex, GridMetrics, NavOutcome, Navigator, Viewport};

use crate::rotation::FeaturedState;
use crate::session::{SessionFlags, SessionStore};

/// Guide construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideConfig {
    pub layout: LayoutOptions,
    pub grid: GridMetrics,
    /// Number of top categories to request.
    pub category_limit: u32,
    /// Per-category stream request.
    pub stream_query: StreamQuery,
    /// Fixed layout seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Ticks between featured rotations.
    pub rotation_interval_ticks: u32,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            grid: GridMetrics::default(),
            category_limit: 20,
            stream_query: StreamQuery::default(),
            seed: None,
            rotation_interval_ticks: 10,
        }
    }
}

impl GuideConfig {
    #[must_use]
    pub fn layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn grid(mut self, grid: GridMetrics) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn category_limit(mut self, limit: u32) -> Self {
        self.category_limit = vibeguide_catalog::clamp_limit(Some(limit));
        self
    }

    #[must_use]
    pub fn stream_query(mut self, query: StreamQuery) -> Self {
        self.stream_query = query;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn rotation_interval_ticks(mut self, ticks: u32) -> Self {
        self.rotation_interval_ticks = ticks;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }
}

/// Identifies one fetch. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch#{}", self.0)
    }
}

/// Catalog, layout, index, focus, and featured state for one session.
pub struct Guide<R = XorShift64> {
    config: GuideConfig,
    flags: SessionFlags,
    catalog: Catalog,
    layout: Layout,
    index: GridIndex,
    navigator: Navigator,
    featured: FeaturedState,
    rng: R,
    session: Option<SessionStore>,
    latest_ticket: u64,
    generation: u64,
}

impl Guide<XorShift64> {
    /// Guide seeded from `config.seed` (or the clock).
    pub fn new(config: GuideConfig, flags: SessionFlags) -> Result<Self, ConfigError> {
        let rng = config.seed.map_or_else(XorShift64::from_time, XorShift64::new);
        Self::with_rng(config, flags, rng)
    }

    /// Guide whose flags are read once from `store`. Every later flag
    /// toggle is saved back to it.
    pub fn from_session(config: GuideConfig, store: SessionStore) -> Result<Self, ConfigError> {
        let mut guide = Self::new(config, store.load())?;
        guide.session = Some(store);
        Ok(guide)
    }
}

impl<R: RandomSource> Guide<R> {
    /// Guide drawing layout randomness from `rng`.
    pub fn with_rng(config: GuideConfig, flags: SessionFlags, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut guide = Self {
            navigator: Navigator::new(config.grid),
            featured: FeaturedState::new(config.rotation_interval_ticks),
            config,
            flags,
            catalog: Catalog::new(),
            layout: Layout::default(),
            index: GridIndex::default(),
            rng,
            session: None,
            latest_ticket: 0,
            generation: 0,
        };
        guide.rebuild();
        Ok(guide)
    }

    #[must_use]
    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    #[must_use]
    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn featured(&self) -> &FeaturedState {
        &self.featured
    }

    /// Store that flag toggles are saved to, if any.
    #[must_use]
    pub fn session(&self) -> Option<&SessionStore> {
        self.session.as_ref()
    }

    /// Number of rebuilds so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fetch. Every earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// Whether `ticket` may still apply data.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Replace the category list. Returns `false` for a stale ticket.
    pub fn apply_categories(&mut self, ticket: FetchTicket, categories: Vec<Category>) -> bool {
        if !self.accept(ticket, "categories") {
            return false;
        }
        self.catalog.set_categories(categories);
        self.rebuild();
        true
    }

    /// Replace one category's streams. Returns `false` for a stale ticket.
    pub fn apply_streams(
        &mut self,
        ticket: FetchTicket,
        category_id: &str,
        streams: Vec<Stream>,
    ) -> bool {
        self.apply_stream_batch(ticket, vec![(category_id.to_string(), streams)])
    }

    /// Replace several categories' streams with one rebuild.
    pub fn apply_stream_batch(
        &mut self,
        ticket: FetchTicket,
        batch: Vec<(String, Vec<Stream>)>,
    ) -> bool {
        if !self.accept(ticket, "streams") {
            return false;
        }
        for (category_id, streams) in batch {
            self.catalog.set_streams(category_id, streams);
        }
        self.rebuild();
        true
    }

    /// Fetch categories, then every category's streams, from `source`.
    pub fn load<S: CatalogSource>(&mut self, source: &ResilientSource<S>) -> FetchTicket {
        let ticket = self.begin_fetch();
        let categories = source.top_categories(self.config.category_limit);
        let ids: Vec<String> = categories.iter().map(|c| c.id.clone()).collect();
        self.apply_categories(ticket, categories);

        let batch = ids
            .into_iter()
            .map(|id| {
                let streams = source.streams_for_category(&id, &self.config.stream_query);
                (id, streams)
            })
            .collect();
        self.apply_stream_batch(ticket, batch);
        ticket
    }

    /// Toggle leading blank rows; rebuilds when the value changes.
    pub fn set_include_leading_blank_rows(&mut self, include: bool) -> bool {
        if self.flags.include_leading_blank_rows == include {
            return false;
        }
        self.flags.include_leading_blank_rows = include;
        self.rebuild();
        self.persist_flags();
        true
    }

    /// Toggle the mature filter; rebuilds when the value changes.
    pub fn set_hide_mature(&mut self, hide: bool) -> bool {
        if self.flags.hide_mature == hide {
            return false;
        }
        self.flags.hide_mature = hide;
        self.rebuild();
        self.persist_flags();
        true
    }

    /// Route an input event. Ticks drive featured rotation.
    pub fn handle_event<V: Viewport + ?Sized>(&mut self, event: &Event, viewport: &mut V) -> NavOutcome {
        match event {
            Event::Tick => {
                self.featured.on_tick(&self.index);
                NavOutcome::Ignored
            }
            _ => self
                .navigator
                .handle_event(event, &self.index, viewport, &mut self.featured),
        }
    }

    fn accept(&self, ticket: FetchTicket, what: &str) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        tracing::debug!(%ticket, latest = self.latest_ticket, what, "dropping stale fetch result");
        false
    }

    fn persist_flags(&self) {
        let Some(store) = &self.session else {
            return;
        };
        if let Err(error) = store.save(&self.flags) {
            tracing::warn!(backend = %store.backend_name(), %error, "failed to save session flags");
        }
    }

    fn rebuild(&mut self) {
        let filtered;
        let catalog = if self.flags.hide_mature {
            filtered = self.catalog.without_mature();
            &filtered
        } else {
            &self.catalog
        };
        let options = self
            .config
            .layout
            .clone()
            .leading_blank_rows(self.flags.include_leading_blank_rows);

        let layout = generate_layout(catalog, &options, &mut self.rng);
        let index = GridIndex::build(&layout, catalog);
        self.layout = layout;
        self.index = index;
        self.generation += 1;

        self.navigator.revalidate(&self.index);
        self.featured.ensure_featured(&self.index);

        tracing::info!(
            generation = self.generation,
            rows = self.layout.len(),
            cells = self.index.cell_count(),
            "rebuilt guide"
        );
    }
}

impl<R> fmt::Debug for Guide<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guide")
            .field("flags", &self.flags)
            .field("categories", &self.catalog.len())
            .field("rows", &self.layout.len())
            .field("session", &self.session.as_ref().map(SessionStore::backend_name))
            .field("generation", &self.generation)
            .field("latest_ticket", &self.latest_ticket)
            .finish()
    }
}
