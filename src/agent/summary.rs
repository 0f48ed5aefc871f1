//! Human-readable rendering of action results.

use serde_json::Value;

/// Summarise an action's JSON result for the user.
///
/// Room lists and bookings get a dedicated layout; anything else is
/// printed as pretty JSON.
pub fn summarize(action: &str, body: &Value) -> String {
    match body {
        Value::Array(items) if items.iter().all(is_room) => summarize_rooms(items),
        Value::Object(_) if is_booking(body) => summarize_booking(body),
        Value::String(text) => format!("{} returned:\n{}", action, text),
        other => format!(
            "{} returned:\n{}",
            action,
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
        ),
    }
}

fn is_room(value: &Value) -> bool {
    value.get("id").is_some() && value.get("room_type").is_some()
}

fn is_booking(value: &Value) -> bool {
    value.get("id").is_some() && value.get("room_id").is_some() && value.get("status").is_some()
}

fn summarize_rooms(rooms: &[Value]) -> String {
    if rooms.is_empty() {
        return "No rooms available.".to_string();
    }

    let mut lines = vec![format!(
        "Found {} room{}:",
        rooms.len(),
        if rooms.len() == 1 { "" } else { "s" }
    )];
    for room in rooms {
        let features = room
            .get("features")
            .and_then(|f| f.as_array())
            .map(|f| {
                f.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        lines.push(format!(
            "  - {} ({}, ${}/night){}",
            text(room, "id"),
            text(room, "room_type"),
            text(room, "price"),
            if features.is_empty() {
                String::new()
            } else {
                format!(": {}", features)
            }
        ));
    }
    lines.join("\n")
}

fn summarize_booking(booking: &Value) -> String {
    format!(
        "Booking {} for {}: {} from {} to {} ({})",
        text(booking, "id"),
        text(booking, "guest_name"),
        text(booking, "room_id"),
        text(booking, "check_in"),
        text(booking, "check_out"),
        text(booking, "status"),
    )
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}
