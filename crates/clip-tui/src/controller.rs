//! Controller state machine — catalog, selection, resolution, status.
//!
//! All user-visible state lives in one `ControllerState` value that only
//! `apply()` mutates.  Components read it during render; background tasks
//! never touch it directly — their outcomes come back as
//! `ControllerEvent`s through the app's message channel, and `apply()`
//! answers with the `Effect`s the app must execute (spawn a fetch, start
//! or stop the player).  This keeps every transition unit-testable
//! without a terminal or a server.
//!
//! Overlapping resolutions are stamped with a generation counter.  The
//! slot semantics are last-write-wins: a stale completion still lands
//! (source and status), it is only logged.  See DESIGN.md for why this is
//! kept rather than cancelled.

use clip_proto::catalog::ClipEntry;
use tracing::warn;

/// Colour class of the status slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Error,
}

/// The single status slot.  Overwritten whole on every update; no history.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: String,
    pub severity: Severity,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Where the controller is in its lifecycle.  Errors are not sticky; the
/// next status-producing event overwrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    CatalogLoading,
    CatalogLoaded,
    CatalogError,
    Resolving,
    Playing,
    ResolveError,
}

impl Phase {
    /// Short label for the header badge.  `None` = nothing noteworthy.
    pub fn badge_label(&self) -> Option<&'static str> {
        match self {
            Phase::Idle | Phase::CatalogLoaded => None,
            Phase::CatalogLoading => Some("LOAD"),
            Phase::CatalogError | Phase::ResolveError => Some("ERR"),
            Phase::Resolving => Some("RESV"),
            Phase::Playing => Some("PLAY"),
        }
    }
}

/// Everything that can happen to the controller.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// A catalog load is about to be issued (startup or reload key).
    CatalogLoadStarted,
    CatalogLoaded(Vec<ClipEntry>),
    CatalogFailed(String),
    /// The user activated a rendered clip row.
    ClipSelected(ClipEntry),
    PlaybackResolved { generation: u64, url: String },
    ResolveFailed { generation: u64, message: String },
}

/// Side effects the app executes after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog,
    Resolve { key: String, generation: u64 },
    StartPlayback { url: String },
    StopPlayback,
}

#[derive(Debug, Default)]
pub struct ControllerState {
    pub phase: Phase,
    /// `None` = not loaded (or cleared for a load in flight); `Some` =
    /// loaded, in exactly the order the server sent.  Replaced wholesale,
    /// never patched.
    pub catalog: Option<Vec<ClipEntry>>,
    /// Selection is tracked by key, not list position.
    pub selected_key: Option<String>,
    /// Display name of the selected clip, for the header.
    pub selected_name: Option<String>,
    /// URL currently attached to the player.  Cleared synchronously when
    /// a selection happens, before the new resolution is spawned.
    pub player_source: Option<String>,
    pub status: StatusLine,
    resolve_generation: u64,
}

impl ControllerState {
    /// The catalog as a renderable slice (empty when not loaded).
    pub fn clips(&self) -> &[ClipEntry] {
        self.catalog.as_deref().unwrap_or_default()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_key.as_deref() == Some(key)
    }

    /// Apply one event and return the effects to execute.
    pub fn apply(&mut self, event: ControllerEvent) -> Vec<Effect> {
        match event {
            ControllerEvent::CatalogLoadStarted => {
                // The list is cleared before the request goes out, so a
                // failed load shows an empty list, never a stale one.
                self.catalog = None;
                self.phase = Phase::CatalogLoading;
                self.status = StatusLine::info("Loading library...");
                vec![Effect::FetchCatalog]
            }

            ControllerEvent::CatalogLoaded(clips) => {
                self.phase = Phase::CatalogLoaded;
                self.status = if clips.is_empty() {
                    StatusLine::info("No items found")
                } else {
                    StatusLine::info(format!("Loaded {} clips", clips.len()))
                };
                // Key-tracked selection: survives a reload only when the
                // same key is present in the new catalog.
                if let Some(key) = self.selected_key.as_deref() {
                    if !clips.iter().any(|c| c.key == key) {
                        self.selected_key = None;
                        self.selected_name = None;
                    }
                }
                self.catalog = Some(clips);
                Vec::new()
            }

            ControllerEvent::CatalogFailed(message) => {
                self.phase = Phase::CatalogError;
                self.status = StatusLine::error(message);
                Vec::new()
            }

            ControllerEvent::ClipSelected(entry) => {
                self.selected_key = Some(entry.key.clone());
                self.selected_name = Some(entry.name);
                self.player_source = None;
                self.phase = Phase::Resolving;
                self.status = StatusLine::info("Requesting playback URL...");
                self.resolve_generation += 1;
                vec![
                    Effect::StopPlayback,
                    Effect::Resolve {
                        key: entry.key,
                        generation: self.resolve_generation,
                    },
                ]
            }

            ControllerEvent::PlaybackResolved { generation, url } => {
                if generation != self.resolve_generation {
                    warn!(
                        generation,
                        current = self.resolve_generation,
                        "stale resolution landed; last write wins"
                    );
                }
                self.player_source = Some(url.clone());
                self.phase = Phase::Playing;
                self.status = StatusLine::info("Playing");
                vec![Effect::StartPlayback { url }]
            }

            ControllerEvent::ResolveFailed {
                generation,
                message,
            } => {
                if generation != self.resolve_generation {
                    warn!(
                        generation,
                        current = self.resolve_generation,
                        "stale resolution failure landed"
                    );
                }
                // The source stays whatever it was — for the failed
                // selection that means unset, since selecting cleared it.
                self.phase = Phase::ResolveError;
                self.status = StatusLine::error(message);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str, key: &str, size: u64) -> ClipEntry {
        ClipEntry {
            name: name.to_string(),
            key: key.to_string(),
            size,
        }
    }

    fn sample_catalog() -> Vec<ClipEntry> {
        vec![
            clip("intro.mp4", "clips/intro.mp4", 1536),
            clip("demo.mp4", "clips/demo.mp4", 0),
            clip("outro.mp4", "clips/outro.mp4", 1_048_576),
        ]
    }

    /// Convenience: run a selection and pull out the resolve generation.
    fn select(state: &mut ControllerState, entry: ClipEntry) -> u64 {
        let effects = state.apply(ControllerEvent::ClipSelected(entry));
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Resolve { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("selection must spawn a resolution")
    }

    #[test]
    fn test_load_renders_all_entries_in_order() {
        let mut state = ControllerState::default();
        let effects = state.apply(ControllerEvent::CatalogLoadStarted);
        assert_eq!(effects, vec![Effect::FetchCatalog]);
        assert!(state.catalog.is_none());
        assert_eq!(state.status.message, "Loading library...");

        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));
        let clips = state.clips();
        assert_eq!(clips.len(), 3);
        assert_eq!(clips[0].key, "clips/intro.mp4");
        assert_eq!(clips[1].key, "clips/demo.mp4");
        assert_eq!(clips[2].key, "clips/outro.mp4");
        assert_eq!(state.status.message, "Loaded 3 clips");
        assert_eq!(state.status.severity, Severity::Info);
    }

    #[test]
    fn test_empty_catalog_is_informational_not_error() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoadStarted);
        state.apply(ControllerEvent::CatalogLoaded(Vec::new()));

        assert_eq!(state.status.message, "No items found");
        assert_eq!(state.status.severity, Severity::Info);
        assert_eq!(state.phase, Phase::CatalogLoaded);
        // Empty-loaded is distinct from never-loaded.
        assert_eq!(state.catalog, Some(Vec::new()));
    }

    #[test]
    fn test_failed_load_clears_list_and_reports_body_text() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoadStarted);
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        // Reload clears the list before the request is out...
        state.apply(ControllerEvent::CatalogLoadStarted);
        assert!(state.clips().is_empty());

        // ...so a failure leaves it empty, not stale.
        state.apply(ControllerEvent::CatalogFailed("boom".to_string()));
        assert!(state.catalog.is_none());
        assert_eq!(state.status.message, "boom");
        assert_eq!(state.status.severity, Severity::Error);
        assert_eq!(state.phase, Phase::CatalogError);
    }

    #[test]
    fn test_selection_clears_source_before_resolution() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        let generation = select(&mut state, clip("intro.mp4", "clips/intro.mp4", 1536));
        assert!(state.player_source.is_none());
        assert_eq!(state.status.message, "Requesting playback URL...");
        assert_eq!(state.selected_name.as_deref(), Some("intro.mp4"));

        state.apply(ControllerEvent::PlaybackResolved {
            generation,
            url: "https://bucket/intro".to_string(),
        });
        assert_eq!(state.player_source.as_deref(), Some("https://bucket/intro"));
        assert_eq!(state.status.message, "Playing");

        // Selecting another clip clears the attached source synchronously.
        let effects = state.apply(ControllerEvent::ClipSelected(clip(
            "demo.mp4",
            "clips/demo.mp4",
            0,
        )));
        assert!(state.player_source.is_none());
        assert_eq!(effects[0], Effect::StopPlayback);
    }

    #[test]
    fn test_exactly_one_selected_after_a_then_b() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        select(&mut state, clip("intro.mp4", "clips/intro.mp4", 1536));
        select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));

        assert!(state.is_selected("clips/demo.mp4"));
        assert!(!state.is_selected("clips/intro.mp4"));
        assert!(!state.is_selected("clips/outro.mp4"));
    }

    #[test]
    fn test_resolve_failure_leaves_source_unset_and_selection_intact() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        let generation = select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));
        state.apply(ControllerEvent::ResolveFailed {
            generation,
            message: "S3 presign error".to_string(),
        });

        assert!(state.player_source.is_none());
        assert!(state.is_selected("clips/demo.mp4"));
        assert_eq!(state.status.severity, Severity::Error);
        assert_eq!(state.status.message, "S3 presign error");
        assert_eq!(state.phase, Phase::ResolveError);
    }

    #[test]
    fn test_overlapping_resolutions_last_write_wins() {
        // Select A, then B before A settles.  Whichever completion lands
        // last owns the source and status — documented behaviour, in both
        // completion orders.
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        let gen_a = select(&mut state, clip("intro.mp4", "clips/intro.mp4", 1536));
        let gen_b = select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));

        // Order 1: A settles after B — the stale A result wins the slot.
        state.apply(ControllerEvent::PlaybackResolved {
            generation: gen_b,
            url: "https://bucket/b".to_string(),
        });
        state.apply(ControllerEvent::PlaybackResolved {
            generation: gen_a,
            url: "https://bucket/a".to_string(),
        });
        assert_eq!(state.player_source.as_deref(), Some("https://bucket/a"));
        assert_eq!(state.status.message, "Playing");
        // The highlight still belongs to B; the surface shows A.
        assert!(state.is_selected("clips/demo.mp4"));

        // Order 2: B settles last and wins.
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));
        let gen_a = select(&mut state, clip("intro.mp4", "clips/intro.mp4", 1536));
        let gen_b = select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));
        state.apply(ControllerEvent::PlaybackResolved {
            generation: gen_a,
            url: "https://bucket/a".to_string(),
        });
        state.apply(ControllerEvent::PlaybackResolved {
            generation: gen_b,
            url: "https://bucket/b".to_string(),
        });
        assert_eq!(state.player_source.as_deref(), Some("https://bucket/b"));
        assert!(state.is_selected("clips/demo.mp4"));
    }

    #[test]
    fn test_stale_failure_overwrites_status_but_not_source() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));

        let gen_a = select(&mut state, clip("intro.mp4", "clips/intro.mp4", 1536));
        let gen_b = select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));

        state.apply(ControllerEvent::PlaybackResolved {
            generation: gen_b,
            url: "https://bucket/b".to_string(),
        });
        // A's failure arrives late: status flips to error, the attached
        // source stays B's.
        state.apply(ControllerEvent::ResolveFailed {
            generation: gen_a,
            message: "timed out".to_string(),
        });
        assert_eq!(state.player_source.as_deref(), Some("https://bucket/b"));
        assert_eq!(state.status.message, "timed out");
        assert_eq!(state.status.severity, Severity::Error);
    }

    #[test]
    fn test_selection_survives_reload_only_by_key() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoaded(sample_catalog()));
        select(&mut state, clip("demo.mp4", "clips/demo.mp4", 0));

        // Same key still present after reload: selection kept.
        state.apply(ControllerEvent::CatalogLoadStarted);
        state.apply(ControllerEvent::CatalogLoaded(vec![clip(
            "demo.mp4",
            "clips/demo.mp4",
            0,
        )]));
        assert!(state.is_selected("clips/demo.mp4"));

        // Key gone: selection dropped, not remapped to another row.
        state.apply(ControllerEvent::CatalogLoadStarted);
        state.apply(ControllerEvent::CatalogLoaded(vec![clip(
            "other.mp4",
            "clips/other.mp4",
            9,
        )]));
        assert!(state.selected_key.is_none());
        assert!(state.selected_name.is_none());
    }

    #[test]
    fn test_error_states_are_not_sticky() {
        let mut state = ControllerState::default();
        state.apply(ControllerEvent::CatalogLoadStarted);
        state.apply(ControllerEvent::CatalogFailed("listing down".to_string()));
        assert_eq!(state.phase, Phase::CatalogError);

        state.apply(ControllerEvent::CatalogLoadStarted);
        assert_eq!(state.phase, Phase::CatalogLoading);
        assert_eq!(state.status.severity, Severity::Info);
    }
}
