//! Basic usage example showing how to use the initiative meta-crate

use initiative::prelude::*;

fn main() {
    // A recorded run: every draw lands in the returned trace
    let cfg = HarnessConfig::new([1, 2, 3, 4], "basic_usage");
    let result = run_recorded(cfg, |source, _ctx| {
        let hit = source.flip_coin(217, 256)?;
        let order = sorted_with_tie_breaker(
            &["tackle", "ember", "growl"],
            |a: &&str, b: &&str| a.len().cmp(&b.len()),
            &mut ShuffleTies::new(source),
        )?;
        Ok::<_, InitiativeError>((hit, order))
    });

    let (outcome, trace) = match result {
        Ok(recorded) => recorded,
        Err(err) => panic!("recording failed: {err}"),
    };
    println!("outcome: {outcome:?}");
    println!("recorded {} events from seed {}", trace.events.len(), trace.meta.seed);

    // Replaying the same draws gives the same outcome
    let mut replay = ReplaySource::new(&trace);
    let hit = replay.flip_coin(217, 256);
    println!("replayed hit: {hit:?}, diverged: {:?}", replay.take_error());
}
