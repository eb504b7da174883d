use std::fmt;

use crate::{
    engine::ProbeEngine,
    errors::{Operation, StateError},
    query::PositionQuery,
    registry::PathRegistry,
    types::{CompressionScheme, ProbeOutcome},
};

/// Compression scheme of the supported table sets.
const SCHEME: CompressionScheme = CompressionScheme::Cp4;

/// Engine verbosity during initialization.
const VERBOSITY: u32 = 1;

/// Default cache budget: 1 GiB.
const DEFAULT_CACHE_BYTES: u64 = 1024 * 1024 * 1024;

/// Default share of the cache reserved for WDL data, in percent.
const DEFAULT_WDL_FRACTION: u32 = 96;

/// Lifecycle states of a [`ProbeSession`].
///
/// A session moves from `Uninitialized` through `Initialized` to
/// `Closed`, once, forward only. Probing is valid in `Initialized`
/// only, and a closed session cannot be initialized again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initialized,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Initialized => "initialized",
            SessionState::Closed => "closed",
        })
    }
}

/// Outcome of a successful initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    diagnostic: Option<String>,
    paths: usize,
}

impl InitReport {
    /// Advisory diagnostic reported by the engine, e.g. missing or
    /// incompatible table files. Informational: the session initialized
    /// regardless, and probes against material the diagnostic concerns
    /// simply report unavailable.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub fn into_diagnostic(self) -> Option<String> {
        self.diagnostic
    }

    /// Number of search paths handed to the engine.
    pub fn registered_paths(&self) -> usize {
        self.paths
    }
}

/// Cumulative counters over the probes of one session.
///
/// Reset when the session initializes. Counts at this boundary, not
/// inside the engine: a hit is a probe a tablebase could service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub probes: u64,
    pub hits: u64,
    pub misses: u64,
}

impl ProbeStats {
    fn record(&mut self, available: bool) {
        self.probes += 1;
        if available {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

/// A probing session over an external engine.
///
/// Owns the engine, the [`PathRegistry`] once handed over, and the
/// lifecycle: [`initialize`](ProbeSession::initialize) configures the
/// engine and its cache, [`probe`](ProbeSession::probe) answers queries,
/// [`shutdown`](ProbeSession::shutdown) releases everything.
///
/// All three operations take `&mut self`, so shared use requires an
/// explicit caller-side lock (for example `Mutex<ProbeSession<E>>`); a
/// probe can then never observe a mid-teardown cache. Note that a native
/// engine binding typically keeps process-global state internally, so at
/// most one session over such a backend should exist per process; the
/// session object itself makes no attempt to hide that constraint.
pub struct ProbeSession<E: ProbeEngine> {
    engine: E,
    state: SessionState,
    registry: Option<PathRegistry>,
    cache_bytes: u64,
    wdl_fraction: u32,
    stats: ProbeStats,
}

impl<E: ProbeEngine> fmt::Debug for ProbeSession<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeSession")
            .field("state", &self.state)
            .field("cache_bytes", &self.cache_bytes)
            .field("wdl_fraction", &self.wdl_fraction)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<E: ProbeEngine> ProbeSession<E> {
    /// Creates an uninitialized session over the given engine.
    pub fn new(engine: E) -> ProbeSession<E> {
        ProbeSession {
            engine,
            state: SessionState::Uninitialized,
            registry: None,
            cache_bytes: DEFAULT_CACHE_BYTES,
            wdl_fraction: DEFAULT_WDL_FRACTION,
            stats: ProbeStats::default(),
        }
    }

    /// Sets the cache byte budget used at initialization.
    ///
    /// Defaults to 1 GiB.
    #[must_use]
    pub fn with_cache_size(mut self, bytes: u64) -> Self {
        self.cache_bytes = bytes;
        self
    }

    /// Sets the percentage of the cache budget reserved for WDL data
    /// over distance-to-mate data.
    ///
    /// Defaults to 96.
    ///
    /// # Panics
    ///
    /// Panics if `percent > 100`.
    #[must_use]
    pub fn with_wdl_fraction(mut self, percent: u32) -> Self {
        assert!(percent <= 100, "WDL fraction is a percentage");
        self.wdl_fraction = percent;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Counters over the probes issued since initialization.
    pub fn stats(&self) -> ProbeStats {
        self.stats
    }

    /// Takes ownership of the registry and configures the engine:
    /// registers the search paths in registration order, sets up the
    /// shared cache, resets probe statistics.
    ///
    /// An empty registry is allowed; every later probe then reports
    /// unavailable. An engine diagnostic about missing or incompatible
    /// files is advisory and comes back in the [`InitReport`];
    /// initialization has still succeeded and probing is valid.
    ///
    /// # Errors
    ///
    /// Errors if the session is not [`SessionState::Uninitialized`].
    /// A closed session cannot be initialized again.
    pub fn initialize(&mut self, registry: PathRegistry) -> Result<InitReport, StateError> {
        if self.state != SessionState::Uninitialized {
            return Err(StateError::new(Operation::Initialize, self.state));
        }

        for path in &registry {
            tracing::info!(path = %path.display(), "adding tablebase search path");
        }

        let diagnostic = self
            .engine
            .init(VERBOSITY, SCHEME, registry.paths())
            .filter(|message| !message.is_empty());
        if let Some(message) = &diagnostic {
            tracing::warn!(%message, "engine reported initialization diagnostics");
        }

        if !self.engine.cache_init(self.cache_bytes, self.wdl_fraction) {
            tracing::warn!(bytes = self.cache_bytes, "probe cache setup failed, probing uncached");
        }
        self.engine.stats_reset();
        self.stats = ProbeStats::default();

        let report = InitReport {
            diagnostic,
            paths: registry.len(),
        };
        self.registry = Some(registry);
        self.state = SessionState::Initialized;
        Ok(report)
    }

    /// Looks a position up in the loaded tablebases.
    ///
    /// An unavailable tablebase is a normal outcome, reported through
    /// [`ProbeOutcome::tb_available`], never an error. Given an unchanged
    /// session, identical queries yield identical outcomes.
    ///
    /// # Errors
    ///
    /// Errors if the session is not [`SessionState::Initialized`]. This
    /// is a contract violation by the caller, not a probing failure.
    pub fn probe(&mut self, query: &PositionQuery) -> Result<ProbeOutcome, StateError> {
        if self.state != SessionState::Initialized {
            return Err(StateError::new(Operation::Probe, self.state));
        }
        let raw = self.engine.probe_hard(&query.encode());
        let outcome = ProbeOutcome::decode(raw);
        self.stats.record(outcome.tb_available);
        Ok(outcome)
    }

    /// Releases the cache and all engine resources and drops the owned
    /// registry. No probes are valid afterwards.
    ///
    /// Shutting an already closed session down again is a benign no-op.
    ///
    /// # Errors
    ///
    /// Errors if the session was never initialized.
    pub fn shutdown(&mut self) -> Result<(), StateError> {
        match self.state {
            SessionState::Initialized => {
                self.teardown();
                Ok(())
            }
            SessionState::Closed => Ok(()),
            SessionState::Uninitialized => {
                Err(StateError::new(Operation::Shutdown, self.state))
            }
        }
    }

    fn teardown(&mut self) {
        self.engine.cache_done();
        self.engine.done();
        self.registry = None;
        self.state = SessionState::Closed;
    }
}

impl<E: ProbeEngine> Drop for ProbeSession<E> {
    fn drop(&mut self) {
        if self.state == SessionState::Initialized {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::{Color, Role, Square};

    use super::*;
    use crate::{engine::NullEngine, errors::Operation, types::Outcome};

    fn bare_kings() -> PositionQuery {
        PositionQuery::builder(Color::White)
            .piece(Color::White, Square::E1, Role::King)
            .piece(Color::Black, Square::E8, Role::King)
            .build()
            .expect("two kings")
    }

    #[test]
    fn test_lifecycle_states() {
        let mut session = ProbeSession::new(NullEngine::new());
        assert_eq!(session.state(), SessionState::Uninitialized);

        let mut registry = PathRegistry::new();
        registry.add("tables/gaviota").expect("valid path");
        let report = session.initialize(registry).expect("fresh session");
        assert_eq!(session.state(), SessionState::Initialized);
        assert_eq!(report.registered_paths(), 1);
        assert_eq!(report.diagnostic(), None);

        session.shutdown().expect("initialized session");
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_probe_requires_initialized() {
        let mut session = ProbeSession::new(NullEngine::new());
        let err = session.probe(&bare_kings()).expect_err("not initialized");
        assert_eq!(err.operation(), Operation::Probe);
        assert_eq!(err.state(), SessionState::Uninitialized);

        session.initialize(PathRegistry::new()).expect("fresh session");
        session.shutdown().expect("initialized session");
        let err = session.probe(&bare_kings()).expect_err("closed");
        assert_eq!(err.state(), SessionState::Closed);
    }

    #[test]
    fn test_unavailable_probe_reports_unknown() {
        // No tablebases registered at all: a bare-kings lookup must come
        // back unserviced, not as an error.
        let mut session = ProbeSession::new(NullEngine::new());
        session.initialize(PathRegistry::new()).expect("fresh session");
        let outcome = session.probe(&bare_kings()).expect("initialized");
        assert!(!outcome.found);
        assert!(!outcome.tb_available);
        assert_eq!(outcome.info, Outcome::Unknown);
    }

    #[test]
    fn test_reinitialize_is_rejected() {
        let mut session = ProbeSession::new(NullEngine::new());
        session.initialize(PathRegistry::new()).expect("fresh session");
        let err = session
            .initialize(PathRegistry::new())
            .expect_err("already initialized");
        assert_eq!(err.operation(), Operation::Initialize);

        session.shutdown().expect("initialized session");
        let err = session
            .initialize(PathRegistry::new())
            .expect_err("closed sessions stay closed");
        assert_eq!(err.state(), SessionState::Closed);
    }

    #[test]
    fn test_shutdown_semantics() {
        let mut session = ProbeSession::new(NullEngine::new());
        let err = session.shutdown().expect_err("never initialized");
        assert_eq!(err.operation(), Operation::Shutdown);

        session.initialize(PathRegistry::new()).expect("fresh session");
        session.shutdown().expect("initialized session");
        session.shutdown().expect("repeated shutdown is benign");
    }

    #[test]
    fn test_stats_count_probes() {
        let mut session = ProbeSession::new(NullEngine::new());
        session.initialize(PathRegistry::new()).expect("fresh session");
        session.probe(&bare_kings()).expect("initialized");
        session.probe(&bare_kings()).expect("initialized");

        let stats = session.stats();
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    #[should_panic(expected = "percentage")]
    fn test_wdl_fraction_is_a_percentage() {
        let _ = ProbeSession::new(NullEngine::new()).with_wdl_fraction(101);
    }
}
