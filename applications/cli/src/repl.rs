//! Interactive command loop

use cadence_core::{Library, SourceKind, TrackId, TrackSource};
use cadence_playback::{
    Artwork, ConfigStore, PlaybackController, QueueManager, RecentHistoryStore, TransportState,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play {
        source: TrackSource,
        track_id: Option<TrackId>,
    },
    Pause,
    Toggle,
    Next,
    Prev,
    Status,
    QueueShow,
    QueueAdd(TrackId),
    QueueRemove(usize),
    QueueClear,
    Recent,
    Shuffle(bool),
    Repeat(bool),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  play album <id> [track]       play an album, optionally from a track
  play artist <name> [track]    play an artist (quote names with spaces)
  play playlist <name> [track]  play a playlist
  play favorites [track]        play favorite tracks
  play tracks [track]           play the whole library
  pause | toggle | next | prev
  status                        show the current session
  queue                         show current, upcoming and queued tracks
  queue add <track> | queue rm <index> | queue clear
  recent                        show recently played sources
  shuffle on|off | repeat on|off
  help | quit";

/// Split a line into words, keeping double-quoted runs together
fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn parse_flag(word: Option<&str>) -> Result<bool, String> {
    match word {
        Some("on" | "true" | "yes") => Ok(true),
        Some("off" | "false" | "no") => Ok(false),
        _ => Err("expected on or off".to_string()),
    }
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let words = tokenize(line);
    let mut words = words.iter().map(String::as_str);

    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "play" => {
            let kind_word = words.next().ok_or("play needs a source")?;
            let kind = SourceKind::parse(kind_word)
                .ok_or_else(|| format!("unknown source kind: {kind_word}"))?;

            let reference = match kind {
                SourceKind::Album | SourceKind::Artist | SourceKind::Playlist => words
                    .next()
                    .ok_or_else(|| format!("play {kind} needs a name or id"))?
                    .to_string(),
                SourceKind::Favorites | SourceKind::AllTracks => String::new(),
            };

            Command::Play {
                source: TrackSource::new(kind, reference),
                track_id: words.next().map(TrackId::from),
            }
        }
        "pause" => Command::Pause,
        "toggle" => Command::Toggle,
        "next" => Command::Next,
        "prev" => Command::Prev,
        "status" => Command::Status,
        "queue" => match words.next() {
            None => Command::QueueShow,
            Some("add") => Command::QueueAdd(TrackId::from(
                words.next().ok_or("queue add needs a track id")?,
            )),
            Some("rm") => {
                let index = words.next().ok_or("queue rm needs an index")?;
                Command::QueueRemove(
                    index
                        .parse()
                        .map_err(|_| format!("not an index: {index}"))?,
                )
            }
            Some("clear") => Command::QueueClear,
            Some(other) => return Err(format!("unknown queue command: {other}")),
        },
        "recent" => Command::Recent,
        "shuffle" => Command::Shuffle(parse_flag(words.next())?),
        "repeat" => Command::Repeat(parse_flag(words.next())?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try help)")),
    };

    Ok(Some(command))
}

/// Everything the loop needs to execute commands
pub struct Session {
    pub controller: PlaybackController,
    pub library: Arc<dyn Library>,
    pub config: ConfigStore,
    pub queue: QueueManager,
    pub history: Arc<RecentHistoryStore>,
}

impl Session {
    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{HELP}");

        while let Some(line) = lines.next_line().await? {
            match parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    if let Err(e) = self.execute(command).await {
                        println!("error: {e}");
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{message}"),
            }
        }

        Ok(())
    }

    async fn execute(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Play { source, track_id } => {
                self.controller.play(track_id, source).await?;
                self.print_status();
            }
            Command::Pause => self.controller.pause().await?,
            Command::Toggle => self.controller.toggle_play_pause().await?,
            Command::Next => {
                self.controller.next().await?;
                self.print_status();
            }
            Command::Prev => {
                self.controller.prev().await?;
                self.print_status();
            }
            Command::Status => self.print_status(),
            Command::QueueShow => self.print_queue().await,
            Command::QueueAdd(track_id) => self.queue.add(track_id).await,
            Command::QueueRemove(index) => {
                let removed = self.queue.remove_at(index).await?;
                println!("removed {removed}");
            }
            Command::QueueClear => self.queue.clear().await,
            Command::Recent => self.print_recent().await,
            Command::Shuffle(on) => self.config.set_shuffle(on).await?,
            Command::Repeat(on) => self.config.set_repeat(on).await?,
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_status(&self) {
        let snapshot = self.controller.snapshot();
        let state = match snapshot.state {
            TransportState::Idle => "idle",
            TransportState::Playing => "playing",
            TransportState::Paused => "paused",
        };

        match &snapshot.info {
            Some(info) => match info.track_id() {
                Some(track_id) => println!(
                    "{state}: {track_id} ({}/{}) from {} at {}s",
                    info.track_idx() + 1,
                    info.len(),
                    info.list_src(),
                    snapshot.position_ms / 1000
                ),
                None => println!("{state}: {} has no tracks", info.list_src()),
            },
            None => println!("{state}: nothing played yet"),
        }
    }

    async fn print_queue(&self) {
        let snapshot = self.controller.snapshot();
        let info = snapshot.info.as_ref();

        if let Some(current) = QueueManager::current(info) {
            let current = QueueManager::resolve_excerpts(self.library.as_ref(), &[current]).await;
            if let Some(track) = current.first() {
                println!("current: {}", describe(&track.name, track.artist_name.as_deref()));
            }
        }

        let upcoming = QueueManager::upcoming(info);
        for track in QueueManager::resolve_excerpts(self.library.as_ref(), &upcoming).await {
            println!("  next: {}", describe(&track.name, track.artist_name.as_deref()));
        }

        let queued = self.queue.full().await;
        let queued = QueueManager::resolve_excerpts(self.library.as_ref(), &queued).await;
        for (index, track) in queued.iter().enumerate() {
            println!("  [{index}] {}", describe(&track.name, track.artist_name.as_deref()));
        }
    }

    async fn print_recent(&self) {
        let cards = self.history.resolve(self.library.as_ref()).await;
        if cards.is_empty() {
            println!("nothing played yet");
        }
        for card in cards {
            let artwork = match &card.artwork {
                Artwork::Single(Some(_)) => "cover",
                Artwork::Single(None) => "no cover",
                Artwork::Collage(_) => "collage",
            };
            let extra = card.extra.as_deref().unwrap_or_default();
            println!(
                "{} - {} {extra} [{artwork}] {}",
                card.title, card.subtitle, card.href
            );
        }
    }
}

fn describe(name: &str, artist: Option<&str>) -> String {
    match artist {
        Some(artist) => format!("{name} by {artist}"),
        None => name.to_string(),
    }
}
