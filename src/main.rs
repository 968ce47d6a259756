//! Critter Engine - Demo Entry Point
//!
//! Spawns a mixed population of robots and spinners into the reference
//! arena, then runs the tick loop interactively. Movement intents are
//! integrated with a trivial Euler step; the engine itself never moves
//! anything.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use critter_engine::core::config::CritterSpec;
use critter_engine::core::error::Result;
use critter_engine::core::types::Vec2;
use critter_engine::engine::{Critter, TransitionBus};
use critter_engine::species::{robot_controller, spinner_controller, ROBOT_SPECIES, SPINNER_SPECIES};
use critter_engine::world::{ArenaWorld, WorldQuery};

use std::io::{self, Write};

/// Integration step for the demo loop (seconds per tick)
const DT: f64 = 0.01;

/// Body radius used for every spawned critter
const CRITTER_RADIUS: f64 = 2.0;

#[derive(Parser, Debug)]
#[command(name = "critter-engine", about = "Critter behavioral engine demo arena")]
struct Args {
    /// Number of robots to spawn
    #[arg(long, default_value_t = 3)]
    robots: usize,

    /// Number of spinners to spawn
    #[arg(long, default_value_t = 3)]
    spinners: usize,

    /// View distance for every spawned critter
    #[arg(long, default_value_t = 50.0)]
    view: f64,

    /// RNG seed for spawn placement and robot steering
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

struct Demo {
    world: ArenaWorld,
    critters: Vec<Critter>,
    bus: TransitionBus,
    tick: u64,
}

impl Demo {
    fn new(args: &Args) -> Result<Self> {
        let mut world = ArenaWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

        // A few static features scattered through the arena
        for _ in 0..4 {
            let pos = Vec2::new(rng.gen_range(-150.0..150.0), rng.gen_range(-150.0..150.0));
            world.spawn_obstacle(pos, 10.0);
        }

        let mut critters = Vec::new();
        for i in 0..args.robots {
            let spec = CritterSpec::from_json(&format!(
                r#"{{ "name": "{ROBOT_SPECIES}", "definition": {{ "view": {} }} }}"#,
                args.view
            ))?;
            let pos = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            let heading = rng.gen_range(0.0..std::f64::consts::TAU);
            let id = world.spawn(ROBOT_SPECIES, pos, CRITTER_RADIUS);
            let controller = robot_controller(args.seed.wrapping_add(i as u64))?;
            critters.push(Critter::new(id, &spec, pos, heading, controller));
        }
        for _ in 0..args.spinners {
            let spec = CritterSpec::from_json(&format!(
                r#"{{ "name": "{SPINNER_SPECIES}", "definition": {{ "view": {} }} }}"#,
                args.view
            ))?;
            let pos = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            let heading = rng.gen_range(0.0..std::f64::consts::TAU);
            let id = world.spawn(SPINNER_SPECIES, pos, CRITTER_RADIUS);
            critters.push(Critter::new(id, &spec, pos, heading, spinner_controller()?));
        }

        Ok(Self {
            world,
            critters,
            bus: TransitionBus::new(),
            tick: 0,
        })
    }

    /// Advance every critter one tick and integrate its movement intent
    fn run_tick(&mut self) -> Result<()> {
        for critter in &mut self.critters {
            let intent = critter.tick(&mut self.world, &mut self.bus)?;

            let heading = critter.heading() + intent.angular * DT;
            let position =
                critter.position() + Vec2::from_heading(heading) * (intent.forward * DT);
            critter.set_pose(position, heading);
            self.world.set_position(critter.id(), position);
        }
        self.tick += 1;
        Ok(())
    }

    fn display_status(&self) {
        println!("tick {} | {} critters", self.tick, self.critters.len());
        for critter in &self.critters {
            let name = self
                .world
                .name_of(critter.id())
                .unwrap_or("<unregistered>");
            println!(
                "  {:<12} {:>8?} at ({:>7.1}, {:>7.1})",
                name,
                critter.state_kind(),
                critter.position().x,
                critter.position().y,
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "critter_engine=info".into()),
        )
        .init();

    let args = Args::parse();
    tracing::info!(?args, "critter arena starting");

    let mut demo = Demo::new(&args)?;

    println!("\n=== CRITTER ARENA ===");
    println!("Commands:");
    println!("  tick / t     - Advance the simulation by one tick");
    println!("  run <n>      - Run n ticks");
    println!("  status / s   - Show critter states and positions");
    println!("  quit / q     - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }
        if input == "tick" || input == "t" {
            demo.run_tick()?;
            println!("Tick {} complete.", demo.tick);
            continue;
        }
        if input == "status" || input == "s" {
            demo.display_status();
            continue;
        }
        if let Some(n) = input.strip_prefix("run ") {
            if let Ok(n) = n.parse::<u32>() {
                for _ in 0..n {
                    demo.run_tick()?;
                }
                println!("Completed {} ticks. Now at tick {}.", n, demo.tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }
        println!("Unknown command: {input}");
    }

    Ok(())
}
