use std::sync::mpsc;

use reto_handoff::{
    platform::RandomNonces, AdmissionGate, AgentConfig, FaceToken, HandoffAgent, Interest,
    LimitedFace, ManualClock, Name, ReferenceRoutes, Timestamp,
};
use tracing_subscriber::EnvFilter;

// A consumer asks for /prefix/0, /prefix/1, ... every 100ms while the producer
//  moves behind /ap2. The handoff takes 500ms, during which the agent holds
//  the Interests back, then replays them in one burst through a rate-limited face.
//
// Run with RUST_LOG=debug to see every decision the agent makes.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AgentConfig::new(Name::parse("/prefix"))
        .with_locator(Name::parse("/ap2"))
        .with_handoff_delay_ms(500)
        .with_open_cache(true);

    let clock = ManualClock::new(Timestamp::from_ms(0));
    let (tx, rx) = mpsc::channel::<Interest>();
    let face = LimitedFace::new(FaceToken(1), tx, clock.clone(), AdmissionGate::new(8.0, 20.0));

    let mut routes = ReferenceRoutes::new();
    let mut agent = HandoffAgent::new(config, FaceToken(1), clock.clone(), face, RandomNonces::new());
    if let Err(err) = agent.start(&mut routes) {
        eprintln!("cannot start agent: {err}");
        return;
    }

    for seq in 0..10u32 {
        let name = Name::parse("/prefix").appending(seq.to_string());
        let outcome = agent.on_interest(&Interest::new(name.clone(), seq));
        println!("t={:>4}ms {:<12} {:?}", clock.get().ms_since_1970, name.to_string(), outcome);

        for sent in rx.try_iter() {
            println!("          -> {} via {}", sent.name, sent.locator.unwrap_or_default());
        }
        clock.advance(100);
    }

    println!("refused by the face: {}", agent.sender().refused());
    if let Err(err) = agent.stop() {
        eprintln!("cannot stop agent: {err}");
    }
}
