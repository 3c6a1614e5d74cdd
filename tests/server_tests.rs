// Route tests against the Rocket instance using the local blocking client

use breadcrumb_snake::bot::Bot;
use breadcrumb_snake::config::Config;
use breadcrumb_snake::handler::build_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

fn client() -> Client {
    Client::tracked(build_rocket(Bot::new(Config::default_hardcoded())))
        .expect("valid rocket instance")
}

fn game_state(you_id: &str) -> Value {
    let you = json!({
        "id": "me",
        "name": "breadcrumb",
        "health": 90,
        "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
        "head": {"x": 1, "y": 1},
        "length": 2,
        "latency": "12",
        "shout": ""
    });
    let mut requested = you.clone();
    requested["id"] = json!(you_id);

    json!({
        "game": {
            "id": "game-1",
            "ruleset": {"name": "standard", "version": "v1.2.3"},
            "timeout": 500,
            "source": "custom"
        },
        "turn": 4,
        "board": {
            "height": 5,
            "width": 5,
            "food": [{"x": 4, "y": 1}],
            "hazards": [],
            "snakes": [you]
        },
        "you": requested
    })
}

#[test]
fn test_index_reports_appearance() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some("battlesnake/github/breadcrumb-snake")
    );
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["author"], "breadcrumb");
}

#[test]
fn test_move_returns_direction_toward_food() {
    let client = client();
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(game_state("me").to_string())
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    assert_eq!(body["move"], "right");
}

#[test]
fn test_move_with_unknown_self_is_bad_request() {
    let client = client();
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(game_state("ghost").to_string())
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    let text = response.into_string().unwrap_or_default();
    assert!(text.contains("invalid board state"));
}

#[test]
fn test_start_and_end_acknowledge() {
    let client = client();

    for route in ["/start", "/end"] {
        let response = client
            .post(route)
            .header(ContentType::JSON)
            .body(game_state("me").to_string())
            .dispatch();
        assert_eq!(response.status(), Status::Ok, "{}", route);
    }
}
