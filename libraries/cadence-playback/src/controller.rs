//! Playback controller
//!
//! A single task owns the session, the engine handle and the status
//! subscription. [`PlaybackController`] is a cheap, cloneable handle that
//! sends commands to that task over a bounded channel and waits for the
//! reply, so commands run one at a time and in the order they were issued.
//!
//! Every load bumps a generation counter. The engine gets a forwarder that
//! stamps each status update with the generation of the load that
//! registered it; updates from older loads are dropped by the task.

use crate::config::ConfigStore;
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::history::RecentHistoryStore;
use crate::resolver::TrackListResolver;
use crate::shuffle::{shuffle, shuffle_anchored};
use crate::types::{PlaybackSnapshot, TransportState};
use cadence_core::{
    CadenceError, KeyValueStore, KeyValueStoreExt, Library, LoadOptions, PlaybackStatus,
    PlayingInfo, SoundEngine, TrackId, TrackSource,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

pub const PLAYING_INFO_KEY: &str = "playing-info";

/// Elapsed position after which `prev` restarts the current track
pub const RESTART_THRESHOLD_MS: u64 = 10_000;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

/// Collaborators handed to the controller task
pub struct Collaborators {
    pub library: Arc<dyn Library>,
    pub store: Arc<dyn KeyValueStore>,
    pub engine: Arc<dyn SoundEngine>,
    pub history: Arc<RecentHistoryStore>,
}

/// Commands processed by the controller task
#[derive(Debug)]
enum Command {
    Play {
        track_id: Option<TrackId>,
        source: TrackSource,
        reply: oneshot::Sender<Result<()>>,
    },
    Pause {
        reply: oneshot::Sender<()>,
    },
    TogglePlayPause {
        reply: oneshot::Sender<()>,
    },
    Next {
        reply: oneshot::Sender<()>,
    },
    Prev {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Status update tagged with the load it belongs to
#[derive(Debug)]
struct StatusMessage {
    generation: u64,
    status: PlaybackStatus,
}

/// Handle to the playback controller task
#[derive(Clone)]
pub struct PlaybackController {
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackController {
    /// Start the controller task
    ///
    /// The last persisted session is restored in the `Idle` state; nothing
    /// is loaded until the first command asks for it.
    pub async fn spawn(collaborators: Collaborators) -> Self {
        let Collaborators {
            library,
            store,
            engine,
            history,
        } = collaborators;

        let info = restore_session(store.as_ref()).await;
        if let Some(info) = &info {
            info!(
                source = %info.list_src(),
                tracks = info.len(),
                track_idx = info.track_idx(),
                "restored playback session"
            );
        }

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (status_tx, status_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(PlaybackSnapshot::idle(info.clone()));
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

        let task = ControllerTask {
            resolver: TrackListResolver::new(Arc::clone(&library)),
            config: ConfigStore::new(Arc::clone(&store)),
            library,
            store,
            engine,
            history,
            info,
            loaded: false,
            is_playing: false,
            position_ms: 0,
            generation: 0,
            last_state: TransportState::Idle,
            commands: command_rx,
            status_tx,
            status_rx,
            snapshot: snapshot_tx,
            events: event_tx.clone(),
        };
        tokio::spawn(task.run());

        Self {
            commands: command_tx,
            snapshot: snapshot_rx,
            events: event_tx,
        }
    }

    /// Play `source`, optionally starting at `track_id`
    ///
    /// # Errors
    /// `NotFound` when the source or the requested track does not exist;
    /// the session is left unchanged.
    pub async fn play(&self, track_id: Option<TrackId>, source: TrackSource) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Play {
            track_id,
            source,
            reply,
        })
        .await?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)?
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| Command::Pause { reply }).await
    }

    pub async fn toggle_play_pause(&self) -> Result<()> {
        self.request(|reply| Command::TogglePlayPause { reply }).await
    }

    pub async fn next(&self) -> Result<()> {
        self.request(|reply| Command::Next { reply }).await
    }

    pub async fn prev(&self) -> Result<()> {
        self.request(|reply| Command::Prev { reply }).await
    }

    /// Stop the task after the commands already queued, unloading the engine
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    async fn request(&self, command: impl FnOnce(oneshot::Sender<()>) -> Command) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply)).await?;
        rx.await.map_err(|_| PlaybackError::ControllerClosed)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlaybackError::ControllerClosed)
    }
}

async fn restore_session(store: &dyn KeyValueStore) -> Option<PlayingInfo> {
    match store.get_or::<Option<PlayingInfo>>(PLAYING_INFO_KEY, None).await {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "discarding unreadable playback session");
            None
        }
    }
}

/// State owned by the controller task
struct ControllerTask {
    library: Arc<dyn Library>,
    resolver: TrackListResolver,
    config: ConfigStore,
    store: Arc<dyn KeyValueStore>,
    engine: Arc<dyn SoundEngine>,
    history: Arc<RecentHistoryStore>,

    info: Option<PlayingInfo>,
    loaded: bool,
    is_playing: bool,
    position_ms: u64,
    generation: u64,
    last_state: TransportState,

    commands: mpsc::Receiver<Command>,
    status_tx: mpsc::UnboundedSender<StatusMessage>,
    status_rx: mpsc::UnboundedReceiver<StatusMessage>,
    snapshot: watch::Sender<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl ControllerTask {
    async fn run(mut self) {
        debug!("playback controller started");

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        self.stop_engine().await;
                        self.publish();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.process_command(command).await,
                    None => {
                        self.stop_engine().await;
                        break;
                    }
                },

                Some(message) = self.status_rx.recv() => self.handle_status(message).await,
            }
        }

        debug!("playback controller stopped");
    }

    async fn process_command(&mut self, command: Command) {
        match command {
            Command::Play {
                track_id,
                source,
                reply,
            } => {
                let result = self.play(track_id, source).await;
                self.publish();
                let _ = reply.send(result);
            }
            Command::Pause { reply } => {
                self.pause().await;
                self.publish();
                let _ = reply.send(());
            }
            Command::TogglePlayPause { reply } => {
                self.toggle_play_pause().await;
                self.publish();
                let _ = reply.send(());
            }
            Command::Next { reply } => {
                self.next().await;
                self.publish();
                let _ = reply.send(());
            }
            Command::Prev { reply } => {
                self.prev().await;
                self.publish();
                let _ = reply.send(());
            }
            // Handled by the run loop
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    async fn play(&mut self, track_id: Option<TrackId>, source: TrackSource) -> Result<()> {
        let same_session = self
            .info
            .as_ref()
            .is_some_and(|info| info.list_src() == &source);

        if same_session {
            self.play_in_session(track_id).await
        } else {
            self.start_session(track_id, source).await
        }
    }

    async fn play_in_session(&mut self, track_id: Option<TrackId>) -> Result<()> {
        if let (Some(track_id), Some(info)) = (track_id, self.info.as_mut()) {
            if info.track_id() != Some(&track_id) {
                let idx = info.select_track(&track_id)?;
                debug!(track_id = %track_id, track_idx = idx, "switching track in session");
                self.persist_session().await;
                self.load_and_play(true).await;
                return Ok(());
            }
        }

        self.resume().await;
        Ok(())
    }

    async fn start_session(&mut self, track_id: Option<TrackId>, source: TrackSource) -> Result<()> {
        let mut track_list = self.resolver.resolve(&source).await?;

        if let Some(id) = &track_id {
            if !track_list.contains(id) {
                return Err(PlaybackError::not_found("Track", id.as_str()));
            }
        }

        let shuffled = self.config.shuffle().await;
        let track_idx = if shuffled {
            track_list = match &track_id {
                Some(anchor) => shuffle_anchored(track_list, anchor),
                None => {
                    shuffle(&mut track_list);
                    track_list
                }
            };
            0
        } else {
            track_id
                .as_ref()
                .and_then(|id| track_list.iter().position(|t| t == id))
                .unwrap_or(0)
        };

        // Without an explicit track the new session always reloads
        let different_track = match &track_id {
            Some(id) => self.current_track_id() != Some(id),
            None => true,
        };

        let info = PlayingInfo::new(source.clone(), track_list, track_idx)?;
        let length = info.len();
        let is_empty = info.is_empty();
        self.info = Some(info);

        info!(source = %source, tracks = length, shuffled, "started playback session");
        self.emit(PlaybackEvent::SessionStarted {
            source: source.clone(),
            length,
        });
        self.persist_session().await;

        if let Err(e) = self.history.push(source).await {
            warn!(error = %e, "failed to record recently played source");
        }

        if is_empty {
            warn!("session has no tracks to play");
            self.stop_engine().await;
        } else if different_track {
            self.load_and_play(true).await;
        } else {
            self.resume().await;
        }

        Ok(())
    }

    /// Continue the current track, loading it first when nothing is loaded
    async fn resume(&mut self) {
        if !self.loaded {
            self.load_and_play(true).await;
            return;
        }

        match self.engine.play().await {
            Ok(()) => self.is_playing = true,
            Err(e) => self.report_engine_error("play", &e),
        }
    }

    async fn pause(&mut self) {
        match self.engine.pause().await {
            Ok(()) => self.is_playing = false,
            Err(e) => self.report_engine_error("pause", &e),
        }
    }

    async fn toggle_play_pause(&mut self) {
        let loaded = match self.engine.status().await {
            Ok(status) => status.loaded,
            Err(e) => {
                warn!(error = %e, "failed to read engine status");
                self.loaded
            }
        };

        if loaded {
            if self.is_playing {
                self.pause().await;
            } else {
                self.resume().await;
            }
        } else if self.current_track_id().is_some() {
            self.load_and_play(true).await;
        } else {
            warn!("nothing to play");
        }
    }

    async fn next(&mut self) {
        let Some(new_idx) = self.info.as_ref().and_then(PlayingInfo::next_index) else {
            debug!("next ignored, no active session");
            return;
        };

        let repeat = self.config.repeat().await;
        let autoplay = !(new_idx == 0 && !repeat);

        if !self.select_index(new_idx) {
            return;
        }
        self.persist_session().await;
        self.load_and_play(autoplay).await;
    }

    async fn prev(&mut self) {
        let Some(prev_idx) = self.info.as_ref().and_then(PlayingInfo::prev_index) else {
            debug!("prev ignored, no active session");
            return;
        };

        let restart = match self.engine.status().await {
            Ok(status) => status.loaded && status.position_ms > RESTART_THRESHOLD_MS,
            Err(e) => {
                warn!(error = %e, "failed to read engine status");
                false
            }
        };

        if !restart {
            if !self.select_index(prev_idx) {
                return;
            }
            self.persist_session().await;
        }

        self.load_and_play(true).await;
    }

    fn select_index(&mut self, idx: usize) -> bool {
        let Some(info) = self.info.as_mut() else {
            return false;
        };
        match info.select_index(idx) {
            Ok(()) => true,
            Err(e) => {
                error!(track_idx = idx, error = %e, "failed to move selection");
                false
            }
        }
    }

    /// Replace whatever is loaded with the current track
    async fn load_and_play(&mut self, autoplay: bool) {
        let Some(track_id) = self.current_track_id().cloned() else {
            warn!("no current track to load");
            return;
        };

        // Anything the outgoing asset reports from here on is stale
        self.generation += 1;
        let generation = self.generation;
        self.position_ms = 0;
        self.engine.set_status_listener(None);

        if let Err(e) = self.engine.unload().await {
            self.report_engine_error("unload", &e);
            return;
        }
        self.loaded = false;
        self.is_playing = false;

        let track = match self.library.get_track(&track_id).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                let e = CadenceError::not_found("Track", track_id.as_str());
                self.report_engine_error("load", &e);
                return;
            }
            Err(e) => {
                self.report_engine_error("load", &e);
                return;
            }
        };

        match self.engine.load(&track.uri, LoadOptions { autoplay }).await {
            Ok(()) => {
                let status_tx = self.status_tx.clone();
                self.engine
                    .set_status_listener(Some(Box::new(move |status: PlaybackStatus| {
                        // Fails only once the controller task has stopped
                        let _ = status_tx.send(StatusMessage { generation, status });
                    })));

                self.loaded = true;
                self.is_playing = autoplay;
                debug!(track_id = %track_id, generation, autoplay, "loaded track");

                let track_idx = self.info.as_ref().map_or(0, PlayingInfo::track_idx);
                self.emit(PlaybackEvent::TrackChanged {
                    track_id,
                    track_idx,
                });
            }
            Err(e) => self.report_engine_error("load", &e),
        }
    }

    /// Unload the engine and drop the status subscription
    async fn stop_engine(&mut self) {
        self.generation += 1;
        self.engine.set_status_listener(None);

        if let Err(e) = self.engine.unload().await {
            self.report_engine_error("unload", &e);
        }
        self.loaded = false;
        self.is_playing = false;
        self.position_ms = 0;
    }

    async fn handle_status(&mut self, message: StatusMessage) {
        if message.generation != self.generation {
            debug!(
                generation = message.generation,
                current = self.generation,
                "dropping status from a previous load"
            );
            return;
        }

        let status = message.status;
        if !status.loaded {
            return;
        }

        self.position_ms = status.position_ms;
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: status.position_ms,
            duration_ms: status.duration_ms,
        });

        if status.just_finished {
            debug!(generation = message.generation, "track finished");
            self.next().await;
        }

        self.publish();
    }

    async fn persist_session(&self) {
        if let Err(e) = self.store.set_json(PLAYING_INFO_KEY, &self.info).await {
            warn!(error = %e, "failed to persist playback session");
        }
    }

    fn current_track_id(&self) -> Option<&TrackId> {
        self.info.as_ref().and_then(PlayingInfo::track_id)
    }

    fn state(&self) -> TransportState {
        match (self.loaded, self.is_playing) {
            (false, _) => TransportState::Idle,
            (true, true) => TransportState::Playing,
            (true, false) => TransportState::Paused,
        }
    }

    fn publish(&mut self) {
        let state = self.state();
        if state != self.last_state {
            self.last_state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }

        self.snapshot.send_replace(PlaybackSnapshot {
            state,
            is_playing: self.is_playing,
            info: self.info.clone(),
            position_ms: self.position_ms,
        });
    }

    fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn report_engine_error(&self, operation: &str, err: &CadenceError) {
        error!(operation, error = %err, "sound engine call failed");
        self.emit(PlaybackEvent::Error {
            message: format!("{operation} failed: {err}"),
        });
    }
}
