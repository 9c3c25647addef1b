//! Fixed reply texts for schedule outcomes that don't need the model.

use askama::Template;

use crate::schedule::{NotFound, TooLate};

/// Reply when a lookup fails for reasons the user can't fix.
pub const SOMETHING_WRONG: &str = "Sorry, something went wrong. Please try that again.";

/// Reply when the destination or time couldn't be worked out.
pub const NOT_UNDERSTOOD: &str = "Sorry, I couldn't work out where you want to go or when. \
    Try something like \"4pm bus to Mangalore\".";

/// Reply for intents the bot doesn't handle.
pub const UNKNOWN_INTENT: &str =
    "Sorry, I'm not sure how to help with that. I'm best at finding bus times.";

/// Reply when the chat model call fails.
pub const CHAT_FALLBACK: &str =
    "Sorry, I'm not sure how to reply to that! I'm best at finding bus times.";

/// Reply when handling a message fails unexpectedly.
pub const GLITCH: &str = "Oh no! My brain just glitched. Please try asking me again.";

#[derive(Template)]
#[template(path = "too_late.txt")]
struct TooLateReply<'a> {
    search_term: &'a str,
    target_time: String,
    last_bus_time: String,
}

#[derive(Template)]
#[template(path = "not_found.txt")]
struct NotFoundReply<'a> {
    search_term: &'a str,
    target_time: String,
    off_peak_message: Option<&'a str>,
    contact: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "no_route.txt")]
struct NoRouteReply<'a> {
    search_term: &'a str,
    known_routes: String,
}

/// Every bus has left: say when the last one was.
pub fn too_late(result: &TooLate) -> Result<String, askama::Error> {
    TooLateReply {
        search_term: &result.search_term,
        target_time: result.target_time.to_12_hour(),
        last_bus_time: result.last_bus_time.to_12_hour(),
    }
    .render()
}

/// No departures listed: pass on the off-peak advice and conductor's number.
pub fn not_found(result: &NotFound) -> Result<String, askama::Error> {
    NotFoundReply {
        search_term: &result.search_term,
        target_time: result.target_time.to_12_hour(),
        off_peak_message: result.off_peak_message.as_deref(),
        contact: result.route.contact.as_deref(),
    }
    .render()
}

/// Unknown destination: list the ones we do know.
pub fn no_route(search_term: &str, known_routes: &[String]) -> Result<String, askama::Error> {
    NoRouteReply {
        search_term,
        known_routes: join_names(known_routes),
    }
    .render()
}

/// Quote and join names as an English list: 'A', 'B', and 'C'.
fn join_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    match quoted.as_slice() {
        [] => "no routes yet".to_string(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
