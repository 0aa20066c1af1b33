use axum::{routing::post, Json, Router};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{self, Coordinate, Validation};

// Error strings are part of the API contract and must match byte-for-byte
const MISSING_FIELDS: &str = "Required field(s) missing";
const MISSING_FIELD: &str = "Required field missing";
const WRONG_LENGTH: &str = "Expected puzzle to be 81 characters long";
const INVALID_CHARACTERS: &str = "Invalid characters in puzzle";
const INVALID_COORDINATE: &str = "Invalid coordinate";
const INVALID_VALUE: &str = "Invalid value";
const UNSOLVABLE: &str = "Puzzle cannot be solved";

pub fn api_router() -> Router {
    Router::new()
        .route("/api/check", post(check_placement))
        .route("/api/solve", post(solve_puzzle))
}

// Fields are optional so a missing one becomes an in-band error, not a 4xx
#[derive(Debug, Deserialize)]
struct CheckRequest {
    puzzle: Option<String>,
    coordinate: Option<String>,
    // Accepted as JSON number or string
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SolveRequest {
    puzzle: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CheckOutcome {
    Failure {
        error: &'static str,
    },
    Verdict {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        conflict: Option<Vec<&'static str>>,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SolveOutcome {
    Failure { error: &'static str },
    Solved { solution: String },
}

// Checks run in a fixed order and the first failure is the response;
// every outcome is HTTP 200 with the result reported in the body.
#[axum::debug_handler]
async fn check_placement(Json(payload): Json<CheckRequest>) -> Json<CheckOutcome> {
    info!("check_placement called");
    debug!("Received payload: {:?}", payload);

    let (Some(puzzle), Some(coordinate), Some(value)) =
        (payload.puzzle, payload.coordinate, payload.value)
    else {
        return Json(CheckOutcome::Failure {
            error: MISSING_FIELDS,
        });
    };

    match engine::validate(&puzzle) {
        Validation::InvalidLength => {
            return Json(CheckOutcome::Failure {
                error: WRONG_LENGTH,
            })
        }
        Validation::InvalidCharacters => {
            return Json(CheckOutcome::Failure {
                error: INVALID_CHARACTERS,
            })
        }
        Validation::Valid => {}
    }

    let Some(coord) = Coordinate::parse(&coordinate) else {
        return Json(CheckOutcome::Failure {
            error: INVALID_COORDINATE,
        });
    };

    let Some(value) = parse_value(&value) else {
        return Json(CheckOutcome::Failure {
            error: INVALID_VALUE,
        });
    };

    let mut conflicts = Vec::new();

    if !engine::check_row_placement(&puzzle, coord, value) {
        conflicts.push("row");
    }
    if !engine::check_col_placement(&puzzle, coord, value) {
        conflicts.push("column");
    }
    if !engine::check_region_placement(&puzzle, coord, value) {
        conflicts.push("region");
    }

    info!(
        "Placement {}{} = {}: {} conflict(s)",
        coord.row_label(),
        coord.column(),
        value,
        conflicts.len()
    );

    if conflicts.is_empty() {
        Json(CheckOutcome::Verdict {
            valid: true,
            conflict: None,
        })
    } else {
        Json(CheckOutcome::Verdict {
            valid: false,
            conflict: Some(conflicts),
        })
    }
}

async fn solve_puzzle(Json(payload): Json<SolveRequest>) -> Json<SolveOutcome> {
    info!("solve_puzzle called");
    debug!("Received payload: {:?}", payload);

    let Some(puzzle) = payload.puzzle else {
        return Json(SolveOutcome::Failure {
            error: MISSING_FIELD,
        });
    };

    match engine::validate(&puzzle) {
        Validation::InvalidLength => {
            return Json(SolveOutcome::Failure {
                error: WRONG_LENGTH,
            })
        }
        Validation::InvalidCharacters => {
            return Json(SolveOutcome::Failure {
                error: INVALID_CHARACTERS,
            })
        }
        Validation::Valid => {}
    }

    match engine::solve(&puzzle) {
        Some(solution) => {
            info!("Puzzle solved");
            Json(SolveOutcome::Solved { solution })
        }
        None => {
            info!("Puzzle has no solution");
            Json(SolveOutcome::Failure { error: UNSOLVABLE })
        }
    }
}

// A value is a digit 1-9, arriving as a JSON number or a numeric string
fn parse_value(value: &Value) -> Option<char> {
    let number = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    if !(1..=9).contains(&number) {
        return None;
    }

    char::from_digit(number as u32, 10)
}
