use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub fn create_replay_logger(
    filename: Option<String>,
    map_width: usize,
    map_height: usize,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, map_width, map_height)),
    }
}

pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_turn(&mut self, tick: usize, level: usize, score: usize, enemies: usize) {}

    #[allow(unused_variables)]
    fn log_end_game(&mut self, outcome: String) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, tick: usize, event: Event) {}

    fn clear(&mut self) {}

    fn save(&self) {}

    fn log_level_start(&mut self, tick: usize, level: usize) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::LevelStart,
                entity: "Level".to_string(),
                entity_id: None,
                location: None,
                detail: Some(level.to_string()),
            },
        );
    }

    fn log_place_bomb(&mut self, tick: usize, id: String, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Spawn,
                entity: "Bomb".to_string(),
                entity_id: Some(id),
                location: Some(location),
                detail: None,
            },
        );
    }

    fn log_detonate_bomb(&mut self, tick: usize, id: String, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Detonate,
                entity: "Bomb".to_string(),
                entity_id: Some(id),
                location: Some(location),
                detail: None,
            },
        );
    }

    fn log_reveal(&mut self, tick: usize, tile: &str, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Reveal,
                entity: tile.to_string(),
                entity_id: None,
                location: Some(location),
                detail: None,
            },
        );
    }

    fn log_consume(&mut self, tick: usize, tile: &str, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Consume,
                entity: tile.to_string(),
                entity_id: None,
                location: Some(location),
                detail: None,
            },
        );
    }

    fn log_kill_enemy(&mut self, tick: usize, id: String, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Remove,
                entity: "Enemy".to_string(),
                entity_id: Some(id),
                location: Some(location),
                detail: None,
            },
        );
    }

    fn log_player_death(&mut self, tick: usize, location: (usize, usize)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Remove,
                entity: "Player".to_string(),
                entity_id: None,
                location: Some(location),
                detail: None,
            },
        );
    }
}

#[derive(serde::Serialize)]
enum EventType {
    LevelStart,
    Spawn,
    Detonate,
    Reveal,
    Consume,
    Remove,
}

#[derive(serde::Serialize)]
pub struct Event {
    event_type: EventType,
    entity: String,
    entity_id: Option<String>,
    location: Option<(usize, usize)>,
    detail: Option<String>,
}

struct Turn {
    tick: usize,
    level: usize,
    score: usize,
    enemies: usize,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    map_width: usize,
    map_height: usize,
    turns: Vec<Turn>,
    events: HashMap<usize, Vec<Event>>,
    outcome: Option<String>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, map_width: usize, map_height: usize) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            map_width,
            map_height,
            turns: Vec::new(),
            events: HashMap::new(),
            outcome: None,
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_turn(&mut self, tick: usize, level: usize, score: usize, enemies: usize) {
        self.turns.push(Turn {
            tick,
            level,
            score,
            enemies,
        });
    }

    fn log_end_game(&mut self, outcome: String) {
        self.outcome = Some(outcome);
    }

    fn log_event(&mut self, tick: usize, event: Event) {
        self.events.entry(tick).or_default().push(event);
    }

    fn clear(&mut self) {
        self.turns.clear();
        self.events.clear();
        self.outcome = None;
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let turns: Vec<_> = self
            .turns
            .iter()
            .map(|turn| {
                json!({
                    "tick": turn.tick,
                    "level": turn.level,
                    "score": turn.score,
                    "enemies": turn.enemies,
                    "events": self.events.get(&turn.tick).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "map": {
                "width": self.map_width,
                "height": self.map_height,
            },
            "turns": turns,
            "outcome": self.outcome,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}
