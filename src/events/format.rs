//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 1-2 char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00850|SR|R|0.50|9.38,7.02,0.00|0.50
//! T:01900|RT|R
//! T:02010|SC|R|0|1|1|2
//! T:02500|MI|L|0.62
//! T:03120|ST|1
//! ```
//!
//! Tick events (rate-limited by the logger):
//! ```text
//! T:00100|T|6|0.15,0.54,0.00|9.38,6.86,0.00|1
//!          ^frame|ball_pos|ball_vel|airborne
//! ```

use super::types::GameEvent;
use crate::tuning::GameplayTuning;
use crate::world::Basket;

fn fmt_vec3(v: (f32, f32, f32)) -> String {
    format!("{:.2},{:.2},{:.2}", v.0, v.1, v.2)
}

fn fmt_flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(tuning) => {
            // Config is compact JSON for easy parsing
            serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::ShotRelease {
            target,
            power,
            velocity,
        } => format!("{}|{:.2}|{}", target, power, fmt_vec3(*velocity)),
        GameEvent::RimTouch { hoop } => hoop.to_string(),
        GameEvent::BackboardTouch { hoop } => hoop.to_string(),
        GameEvent::Bounce { speed } => format!("{:.2}", speed),
        GameEvent::Scored {
            hoop,
            swish,
            made,
            attempts,
            points,
        } => format!(
            "{}|{}|{}|{}|{}",
            hoop,
            fmt_flag(*swish),
            made,
            attempts,
            points
        ),
        GameEvent::Missed { hoop, distance } => format!("{}|{:.2}", hoop, distance),
        GameEvent::Settled { scored } => fmt_flag(*scored).to_string(),
        GameEvent::Reset => String::new(),
        GameEvent::PowerChange { power } => format!("{:.2}", power),
        GameEvent::ClockExpired => String::new(),
        GameEvent::Tick {
            frame,
            ball_pos,
            ball_vel,
            airborne,
        } => format!(
            "{}|{}|{}|{}",
            frame,
            fmt_vec3(*ball_pos),
            fmt_vec3(*ball_vel),
            fmt_flag(*airborne)
        ),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a line back into timestamp and event
pub fn parse_event(line: &str) -> Option<(u32, GameEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SE" if data.len() >= 2 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "CF" if !data.is_empty() => {
            // Rejoin in case the JSON contains |
            let json_str = data.join("|");
            let tuning: GameplayTuning = serde_json::from_str(&json_str).ok()?;
            GameEvent::Config(tuning)
        }
        "SR" if data.len() >= 3 => GameEvent::ShotRelease {
            target: parse_basket(data[0])?,
            power: data[1].parse().ok()?,
            velocity: parse_vec3(data[2])?,
        },
        "RT" => GameEvent::RimTouch {
            hoop: parse_basket(data[0])?,
        },
        "BT" => GameEvent::BackboardTouch {
            hoop: parse_basket(data[0])?,
        },
        "B" => GameEvent::Bounce {
            speed: data[0].parse().ok()?,
        },
        "SC" if data.len() >= 5 => GameEvent::Scored {
            hoop: parse_basket(data[0])?,
            swish: parse_flag(data[1])?,
            made: data[2].parse().ok()?,
            attempts: data[3].parse().ok()?,
            points: data[4].parse().ok()?,
        },
        "MI" if data.len() >= 2 => GameEvent::Missed {
            hoop: parse_basket(data[0])?,
            distance: data[1].parse().ok()?,
        },
        "ST" => GameEvent::Settled {
            scored: parse_flag(data[0])?,
        },
        "RS" => GameEvent::Reset,
        "PW" => GameEvent::PowerChange {
            power: data[0].parse().ok()?,
        },
        "CE" => GameEvent::ClockExpired,
        "T" if data.len() >= 4 => GameEvent::Tick {
            frame: data[0].parse().ok()?,
            ball_pos: parse_vec3(data[1])?,
            ball_vel: parse_vec3(data[2])?,
            airborne: parse_flag(data[3])?,
        },
        _ => return None,
    };

    Some((time_ms, event))
}

fn parse_basket(s: &str) -> Option<Basket> {
    match s {
        "L" => Some(Basket::Left),
        "R" => Some(Basket::Right),
        _ => None,
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn parse_vec3(s: &str) -> Option<(f32, f32, f32)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parts[0].parse().ok()?,
        parts[1].parse().ok()?,
        parts[2].parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_line() {
        let event = GameEvent::Scored {
            hoop: Basket::Right,
            swish: true,
            made: 3,
            attempts: 5,
            points: 6,
        };
        let line = serialize_event(2010, &event);
        assert_eq!(line, "T:02010|SC|R|1|3|5|6");
        let (ts, parsed) = parse_event(&line).unwrap();
        assert_eq!(ts, 2010);
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_shot_release_precision() {
        let event = GameEvent::ShotRelease {
            target: Basket::Left,
            power: 0.456,
            velocity: (-6.234, 11.5, 0.0),
        };
        let line = serialize_event(850, &event);
        let (_, parsed) = parse_event(&line).unwrap();
        if let GameEvent::ShotRelease {
            target,
            power,
            velocity,
        } = parsed
        {
            assert_eq!(target, Basket::Left);
            assert!((power - 0.46).abs() < 0.001);
            assert!((velocity.0 - -6.23).abs() < 0.001);
        } else {
            panic!("Wrong event type");
        }
    }

    #[test]
    fn test_empty_payload_events() {
        let line = serialize_event(100, &GameEvent::Reset);
        assert_eq!(line, "T:00100|RS|");
        assert_eq!(parse_event(&line), Some((100, GameEvent::Reset)));
        let line = serialize_event(100_500, &GameEvent::ClockExpired);
        assert_eq!(parse_event(&line), Some((500, GameEvent::ClockExpired)));
    }

    #[test]
    fn test_config_json_payload() {
        let tuning = GameplayTuning::default();
        let line = serialize_event(0, &GameEvent::Config(tuning.clone()));
        let (_, parsed) = parse_event(&line).unwrap();
        assert_eq!(parsed, GameEvent::Config(tuning));
    }

    #[test]
    fn test_tick_line() {
        let event = GameEvent::Tick {
            frame: 150,
            ball_pos: (1.0, 3.25, -0.5),
            ball_vel: (6.0, -2.0, 0.0),
            airborne: true,
        };
        let line = serialize_event(100, &event);
        assert!(line.contains("|T|150|1.00,3.25,-0.50|"));
        assert_eq!(parse_event(&line).unwrap().1, event);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_event("hello").is_none());
        assert!(parse_event("T:00100|ZZ|1").is_none());
        assert!(parse_event("T:00100|RT|X").is_none());
        assert!(parse_event("T:abc|RS|").is_none());
    }
}
