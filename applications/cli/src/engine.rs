//! Simulated sound engine
//!
//! Pretends every asset is `track_ms` long and reports progress on a timer,
//! so the controller can be driven end to end without an audio device.

use async_trait::async_trait;
use cadence_core::{CadenceError, LoadOptions, PlaybackStatus, Result, SoundEngine, StatusListener};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct EngineState {
    loaded: Option<String>,
    playing: bool,
    position_ms: u64,
}

type SharedListener = Arc<Mutex<Option<StatusListener>>>;

pub struct SimulatedSoundEngine {
    track_ms: u64,
    tick: Duration,
    state: Arc<Mutex<EngineState>>,
    listener: SharedListener,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedSoundEngine {
    pub fn new(track_ms: u64, tick: Duration) -> Self {
        Self {
            track_ms,
            tick,
            state: Arc::new(Mutex::new(EngineState::default())),
            listener: Arc::new(Mutex::new(None)),
            ticker: Mutex::new(None),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, EngineState>> {
        lock(&self.state)
    }

    fn start_ticker(&self) -> Result<()> {
        let state = Arc::clone(&self.state);
        let listener = Arc::clone(&self.listener);
        let track_ms = self.track_ms;
        let tick = self.tick;
        let tick_ms = tick.as_millis() as u64;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                let status = {
                    let Ok(mut current) = state.lock() else { break };
                    if current.loaded.is_none() {
                        break;
                    }
                    if !current.playing {
                        continue;
                    }

                    current.position_ms = (current.position_ms + tick_ms).min(track_ms);
                    let just_finished = current.position_ms >= track_ms;
                    if just_finished {
                        current.playing = false;
                    }

                    PlaybackStatus {
                        loaded: true,
                        position_ms: current.position_ms,
                        duration_ms: Some(track_ms),
                        just_finished,
                    }
                };

                trace!(position_ms = status.position_ms, "simulated tick");
                if let Ok(listener) = listener.lock() {
                    if let Some(listener) = listener.as_ref() {
                        listener(status);
                    }
                }

                if status.just_finished {
                    break;
                }
            }
        });

        let mut ticker = lock(&self.ticker)?;
        if let Some(previous) = ticker.replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    fn stop_ticker(&self) -> Result<()> {
        if let Some(handle) = lock(&self.ticker)?.take() {
            handle.abort();
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| CadenceError::engine("simulated engine state poisoned"))
}

#[async_trait]
impl SoundEngine for SimulatedSoundEngine {
    async fn load(&self, uri: &str, options: LoadOptions) -> Result<()> {
        {
            let mut state = self.state()?;
            if let Some(current) = &state.loaded {
                return Err(CadenceError::engine(format!(
                    "cannot load {uri}: {current} is still loaded"
                )));
            }
            state.loaded = Some(uri.to_string());
            state.playing = options.autoplay;
            state.position_ms = 0;
        }

        debug!(uri, autoplay = options.autoplay, "simulated load");
        self.start_ticker()
    }

    async fn unload(&self) -> Result<()> {
        self.stop_ticker()?;
        let mut state = self.state()?;
        *state = EngineState::default();
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut state = self.state()?;
        if state.loaded.is_none() {
            return Err(CadenceError::engine("nothing loaded"));
        }
        state.playing = true;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let mut state = self.state()?;
        if state.loaded.is_none() {
            return Err(CadenceError::engine("nothing loaded"));
        }
        state.playing = false;
        Ok(())
    }

    async fn status(&self) -> Result<PlaybackStatus> {
        let state = self.state()?;
        Ok(PlaybackStatus {
            loaded: state.loaded.is_some(),
            position_ms: state.position_ms,
            duration_ms: state.loaded.as_ref().map(|_| self.track_ms),
            just_finished: false,
        })
    }

    fn set_status_listener(&self, listener: Option<StatusListener>) {
        if let Ok(mut current) = self.listener.lock() {
            *current = listener;
        }
    }
}

impl Drop for SimulatedSoundEngine {
    fn drop(&mut self) {
        let _ = self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_listener(engine: &SimulatedSoundEngine) -> Arc<Mutex<Vec<PlaybackStatus>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.set_status_listener(Some(Box::new(move |status| {
            sink.lock().unwrap().push(status);
        })));
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn reports_progress_and_finish() {
        let engine = SimulatedSoundEngine::new(300, Duration::from_millis(100));
        let seen = recording_listener(&engine);

        engine.load("file:///a.flac", LoadOptions { autoplay: true }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;

        let seen = seen.lock().unwrap().clone();
        let positions: Vec<u64> = seen.iter().map(|s| s.position_ms).collect();
        assert_eq!(positions, vec![100, 200, 300]);
        assert!(seen.last().unwrap().just_finished);
        assert_eq!(seen.iter().filter(|s| s.just_finished).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_load_does_not_advance() {
        let engine = SimulatedSoundEngine::new(300, Duration::from_millis(100));
        let seen = recording_listener(&engine);

        engine.load("file:///a.flac", LoadOptions { autoplay: false }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(seen.lock().unwrap().is_empty());

        engine.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(engine.status().await.unwrap().position_ms, 100);
    }

    #[tokio::test]
    async fn load_requires_unload_first() {
        let engine = SimulatedSoundEngine::new(300, Duration::from_millis(100));

        engine.load("file:///a.flac", LoadOptions::default()).await.unwrap();
        assert!(engine.load("file:///b.flac", LoadOptions::default()).await.is_err());

        engine.unload().await.unwrap();
        engine.load("file:///b.flac", LoadOptions::default()).await.unwrap();
        assert!(engine.status().await.unwrap().loaded);
    }

    #[tokio::test]
    async fn play_without_asset_is_rejected() {
        let engine = SimulatedSoundEngine::new(300, Duration::from_millis(100));
        assert!(engine.play().await.is_err());
        assert!(engine.pause().await.is_err());
        assert!(!engine.status().await.unwrap().loaded);
    }
}
