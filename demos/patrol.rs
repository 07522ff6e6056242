//! A guard that idles, patrols and chases.
//!
//! Run with `RUST_LOG=statetree=debug cargo run --example patrol` to see the
//! engine's arbitration.

use statetree::builder::{StateBuilder, TransitionBuilder};
use statetree::context::Context;
use statetree::core::{Priority, SelectionBehavior, Status, Task, Wait};
use statetree::engine::TreeConfig;
use statetree::generator::{generate, Registry, TreeDescription};
use statetree::{state_ids, StateTree};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

state_ids! {
    ROOT = "Root";
    IDLE = "Idle";
    PATROL = "Patrol";
    CHASE = "Chase";
}

/// Walks a fixed number of waypoints, one per tick.
struct Walk {
    waypoints: u32,
    reached: u32,
}

impl Task for Walk {
    fn enter_state(&mut self, _ctx: &Context) -> Status {
        self.reached = 0;
        Status::Running
    }

    fn tick(&mut self, ctx: &Context, _dt: f64) -> Status {
        self.reached += 1;
        ctx.set("waypoint", self.reached);
        if self.reached >= self.waypoints {
            Status::Succeeded
        } else {
            Status::Running
        }
    }
}

const DESCRIPTION: &str = r#"{
    "name": "sentry",
    "states": [
        { "id": "Post", "tasks": [{ "kind": "wait", "params": { "seconds": 0.03 } }],
          "transitions": [{ "target": "Sweep", "trigger": "OnStateSucceeded" }] },
        { "id": "Sweep", "tasks": [{ "kind": "set_value", "params": { "key": "swept", "value": true } }] }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let guard = StateTree::builder()
        .state(
            StateBuilder::new(ROOT)
                .selection(SelectionBehavior::ChildrenInOrder)
                .children([IDLE, PATROL, CHASE]),
        )?
        .state(
            StateBuilder::new(IDLE)
                .parent(ROOT)
                .task(Wait::new(0.02))
                .transition(TransitionBuilder::new(PATROL).on_state_succeeded()),
        )?
        .state(
            StateBuilder::new(PATROL)
                .parent(ROOT)
                .task(Walk { waypoints: 3, reached: 0 })
                .transition(TransitionBuilder::new(IDLE).on_state_succeeded())
                .transition(
                    TransitionBuilder::new(CHASE)
                        .on_event("Spotted")
                        .priority(Priority::High),
                ),
        )?
        .state(StateBuilder::new(CHASE).parent(ROOT))?
        .build();

    guard.start(ROOT)?;
    for frame in 1..=8 {
        if frame == 7 {
            guard.send_event("Spotted");
        }
        let report = guard.tick(0.016);
        println!(
            "frame {frame}: {:?} via {} transition(s), path {:?}",
            guard.current_state(),
            report.transitions,
            guard.active_path()
        );
    }
    println!("visited: {:?}", guard.history().get_path());
    println!("stats: {:?}", guard.stats());

    let description = TreeDescription::from_json(DESCRIPTION)?;
    let sentry = generate(&description, &Registry::with_builtins(), TreeConfig::default())?;
    sentry.start("Post")?;
    while sentry.current_state().as_deref() != Some("Sweep") {
        sentry.tick(0.016);
    }
    println!(
        "sentry swept after {} ticks: {:?}",
        sentry.tick_count(),
        sentry.context().get_bool("swept")
    );

    Ok(())
}
