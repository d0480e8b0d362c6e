//! Lists event handlers whose relative order only a random tie break decides.
//!
//! Handlers are grouped by event name; each event's handlers are sorted by
//! (order, priority, sub-order) and every remaining tie is reported.
//!
//! Run with:
//! ```bash
//! cargo run -p initiative-explore --example handler_collisions
//! ```

use std::cmp::Ordering;

use initiative_core::{group_ties_by_key, init_logging_with_level, sorted_with_tie_breaker};
use initiative_explore::prelude::*;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
struct Handler {
    effect: &'static str,
    event: &'static str,
    /// Fixed slot; handlers without one run after all slotted handlers.
    order: Option<u32>,
    priority: i32,
    sub_order: u32,
}

const fn handler(
    effect: &'static str,
    event: &'static str,
    order: Option<u32>,
    priority: i32,
    sub_order: u32,
) -> Handler {
    Handler {
        effect,
        event,
        order,
        priority,
        sub_order,
    }
}

fn handlers() -> Vec<Handler> {
    vec![
        handler("leftovers", "Residual", Some(5), 0, 4),
        handler("blacksludge", "Residual", Some(5), 0, 4),
        handler("leechseed", "Residual", Some(8), 0, 0),
        handler("sandstorm", "Residual", Some(1), 0, 0),
        handler("intimidate", "Start", None, 0, 0),
        handler("drizzle", "Start", None, 0, 0),
        handler("pressure", "Start", None, 0, 0),
        handler("choiceband", "ModifyAtk", None, 1, 0),
        handler("hugepower", "ModifyAtk", None, 5, 0),
        handler("guts", "ModifyAtk", None, 5, 0),
        handler("focussash", "Damage", None, -100, 0),
        handler("sturdy", "Damage", None, -100, 0),
        handler("substitute", "TryPrimaryHit", None, 0, 0),
    ]
}

/// Slotted before unslotted, then higher priority, then lower sub-order.
fn compare_priority(a: &Handler, b: &Handler) -> Ordering {
    let slot = |h: &Handler| h.order.unwrap_or(u32::MAX);
    slot(a)
        .cmp(&slot(b))
        .then(b.priority.cmp(&a.priority))
        .then(a.sub_order.cmp(&b.sub_order))
}

fn main() {
    init_logging_with_level("info");

    let by_event = match group_ties_by_key(&handlers(), |h| h.event) {
        Ok(groups) => groups,
        Err(err) => panic!("grouping handlers failed: {err}"),
    };

    let mut total = 0;
    for event_handlers in by_event {
        let event = event_handlers[0].event;
        let mut report = CollisionReport::new(|h: &Handler| h.effect.to_string());
        if let Err(err) = sorted_with_tie_breaker(&event_handlers, compare_priority, &mut report) {
            panic!("sorting {event} handlers failed: {err}");
        }

        for tie in report.ties() {
            total += 1;
            println!("tie for {event}: {}", tie.join(", "));
        }
    }
    info!(ties = total, "Handler scan complete");
}
