//! Wire-frame fixtures
//!
//! JSON frames in the exact shapes the simulation feed produces.

/// A flights snapshot with one flight between two airports
pub fn flights_snapshot(flight_id: &str) -> String {
    format!(
        r#"{{
            "type": "flights",
            "flights": {{
                "{flight_id}": {{
                    "id": "{flight_id}",
                    "departure": {{
                        "name": "Arturo Merino Benitez",
                        "city": {{"name": "Santiago", "country": {{"name": "Chile"}}}},
                        "location": {{"lat": 0.0, "long": 0.0}}
                    }},
                    "destination": {{
                        "name": "Jorge Chavez",
                        "city": {{"name": "Lima", "country": {{"name": "Peru"}}}},
                        "location": {{"lat": 10.0, "long": 10.0}}
                    }}
                }}
            }}
        }}"#
    )
}

/// A plane snapshot with only the required fields
pub fn plane_frame(flight_id: &str, status: &str) -> String {
    format!(r#"{{"type":"plane","plane":{{"flight_id":"{flight_id}","status":"{status}"}}}}"#)
}

/// A take-off event with coordinates
pub fn take_off_frame(flight_id: &str) -> String {
    format!(r#"{{"type":"take-off","flight_id":"{flight_id}","lat":0.0,"long":0.0}}"#)
}

/// A landing event with coordinates
pub fn landing_frame(flight_id: &str) -> String {
    format!(r#"{{"type":"landing","flight_id":"{flight_id}","lat":10.0,"long":10.0}}"#)
}

/// A crash event
pub fn crashed_frame(flight_id: &str) -> String {
    format!(r#"{{"type":"crashed","flight_id":"{flight_id}"}}"#)
}

/// A chat message broadcast
pub fn message_frame(name: &str, content: &str) -> String {
    format!(
        r#"{{"type":"message","message":{{"name":"{name}","content":"{content}","date":"2024-11-02T15:04:05Z"}}}}"#
    )
}
