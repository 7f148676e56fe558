//! Assertion checking for test expectations

use std::collections::HashMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GameEvent;
use crate::simulation::GameSim;
use crate::world::Basket;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub hoop: Option<Basket>,
}

impl CapturedEvent {
    pub fn from_game_event(frame: u64, event: &GameEvent) -> Self {
        let hoop = match event {
            GameEvent::ShotRelease { target, .. } => Some(*target),
            GameEvent::RimTouch { hoop }
            | GameEvent::BackboardTouch { hoop }
            | GameEvent::Scored { hoop, .. }
            | GameEvent::Missed { hoop, .. } => Some(*hoop),
            _ => None,
        };
        Self {
            frame,
            event_type: event.name().to_string(),
            hoop,
        }
    }
}

/// Check if captured events match expected sequence (in order, gaps allowed)
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let exp_hoop = match exp.hoop.as_deref() {
            Some(name) => Some(Basket::from_name(name).ok_or_else(|| AssertionError {
                message: format!("Event #{} has unknown hoop '{}'", i + 1, name),
                expected: "left or right".to_string(),
                actual: name.to_string(),
            })?),
            None => None,
        };

        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            cap.event_type == exp.event && (exp_hoop.is_none() || cap.hoop == exp_hoop)
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                let hoop_str = exp.hoop.as_ref().map(|h| format!(" (hoop: {})", h)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, hoop_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!("events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Fail if any forbidden event name was captured
pub fn check_forbidden(forbidden: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    for name in forbidden {
        if let Some(cap) = captured.iter().find(|c| &c.event_type == name) {
            return Err(AssertionError {
                message: format!("Forbidden event '{}' occurred", name),
                expected: format!("no '{}' events", name),
                actual: format!("'{}' at frame {}", name, cap.frame),
            });
        }
    }
    Ok(())
}

/// World state for assertions, flattened to "path -> value"
pub struct WorldState {
    pub values: HashMap<String, f32>,
}

impl WorldState {
    pub fn capture(sim: &GameSim, shot_power: f32, captured: &[CapturedEvent]) -> Self {
        let mut values = HashMap::new();
        let ball = &sim.ball;
        values.insert("ball.x".to_string(), ball.position.x);
        values.insert("ball.y".to_string(), ball.position.y);
        values.insert("ball.z".to_string(), ball.position.z);
        values.insert("ball.vx".to_string(), ball.velocity.x);
        values.insert("ball.vy".to_string(), ball.velocity.y);
        values.insert("ball.vz".to_string(), ball.velocity.z);
        values.insert("ball.airborne".to_string(), flag(ball.airborne));

        values.insert("score.attempts".to_string(), sim.score.attempts as f32);
        values.insert("score.made".to_string(), sim.score.made as f32);
        values.insert("score.points".to_string(), sim.score.points as f32);
        values.insert("score.accuracy".to_string(), sim.score.accuracy_percent());

        let attempt = sim.attempt.as_ref();
        values.insert("attempt.active".to_string(), flag(attempt.is_some()));
        values.insert("attempt.scored".to_string(), flag(attempt.is_some_and(|a| a.scored)));
        values.insert("attempt.touched_rim".to_string(), flag(attempt.is_some_and(|a| a.touched_rim)));
        values.insert(
            "attempt.touched_backboard".to_string(),
            flag(attempt.is_some_and(|a| a.touched_backboard)),
        );

        values.insert("power".to_string(), shot_power);
        values.insert("trail.len".to_string(), sim.trail.len() as f32);

        for cap in captured {
            *values.entry(format!("events.{}", cap.event_type)).or_insert(0.0) += 1.0;
        }

        Self { values }
    }

    /// Event counts default to zero; any other unknown path is an error
    fn get(&self, path: &str) -> Option<f32> {
        match self.values.get(path) {
            Some(v) => Some(*v),
            None if path.starts_with("events.") => Some(0.0),
            None => None,
        }
    }
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'ball.y <= 0.5' or 'score.made = 1'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.get(path).ok_or_else(|| AssertionError {
            message: format!("Unknown state path '{}'", path),
            expected: "ball.*, score.*, attempt.*, power, trail.len or events.*".to_string(),
            actual: path.to_string(),
        })?;

        let expected = match expected_value {
            "true" => 1.0,
            "false" => 0.0,
            other => other.parse::<f32>().map_err(|_| AssertionError {
                message: format!("Invalid value for {}", path),
                expected: "number or bool".to_string(),
                actual: other.to_string(),
            })?,
        };

        check_float_comparison(path, actual, operator, expected)?;
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, value: f32) -> Result<(), AssertionError> {
    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.01,
        "!=" => (actual - value).abs() >= 0.01,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.3})", path, operator, value, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.3}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(names: &[(&str, u64)]) -> Vec<CapturedEvent> {
        names
            .iter()
            .map(|(name, frame)| CapturedEvent {
                frame: *frame,
                event_type: name.to_string(),
                hoop: Some(Basket::Right),
            })
            .collect()
    }

    fn expected(event: &str) -> ExpectedEvent {
        ExpectedEvent {
            event: event.to_string(),
            hoop: None,
            frame_min: None,
            frame_max: None,
        }
    }

    #[test]
    fn test_sequence_allows_gaps() {
        let events = captured(&[("shot_release", 1), ("bounce", 40), ("swish", 90), ("settled", 300)]);
        assert!(check_sequence(&[expected("shot_release"), expected("swish")], &events).is_ok());
        assert!(check_sequence(&[expected("swish"), expected("shot_release")], &events).is_err());
    }

    #[test]
    fn test_sequence_frame_window() {
        let events = captured(&[("swish", 90)]);
        let mut exp = expected("swish");
        exp.frame_max = Some(80);
        assert!(check_sequence(&[exp], &events).is_err());
    }

    #[test]
    fn test_state_checks() {
        let sim = GameSim::default();
        let events = captured(&[("reset", 3)]);
        let state = WorldState::capture(&sim, 0.5, &events);
        let assertion = StateAssertion {
            after_frame: 0,
            checks: vec![
                "ball.airborne = false".to_string(),
                "ball.y <= 0.46".to_string(),
                "power = 0.5".to_string(),
                "events.reset = 1".to_string(),
                "events.swish = 0".to_string(),
            ],
        };
        assert!(check_state(&assertion, &state).is_ok());

        let bad = StateAssertion {
            after_frame: 0,
            checks: vec!["score.made >= 1".to_string()],
        };
        assert!(check_state(&bad, &state).is_err());

        let unknown = StateAssertion {
            after_frame: 0,
            checks: vec!["ball.spin = 0".to_string()],
        };
        assert!(check_state(&unknown, &state).is_err());
    }

    #[test]
    fn test_forbidden_events() {
        let events = captured(&[("rim_touch", 10)]);
        assert!(check_forbidden(&["missed".to_string()], &events).is_ok());
        assert!(check_forbidden(&["rim_touch".to_string()], &events).is_err());
    }
}
