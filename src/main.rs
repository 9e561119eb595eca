//! Creature Forge - Entry Point
//!
//! A line-oriented driver for the engine: build a world, then tick it,
//! fabricate schematics and perform actions from stdin.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use creature_forge::core::config::EngineConfig;
use creature_forge::core::error::Result;
use creature_forge::core::types::plural;
use creature_forge::world::{Catalogs, World};

#[derive(Parser, Debug)]
#[command(name = "creature_forge")]
#[command(about = "Gather, fabricate and wear out a creature from the command line")]
struct Args {
    /// Directory holding items/species/schematics/actions TOML; built-ins if omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Species key of the player creature
    #[arg(long, default_value = "human")]
    species: String,

    /// Simulated seconds per `tick`
    #[arg(long, default_value_t = 0.25)]
    seconds_per_tick: f32,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("creature_forge=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let catalogs = match &args.data {
        Some(dir) => Catalogs::load_from_dir(dir)?,
        None => Catalogs::with_defaults(),
    };
    let config = EngineConfig {
        player_species: args.species.clone(),
        max_tick_seconds: args.seconds_per_tick,
        ..EngineConfig::default()
    };
    let mut world = World::new(config, catalogs)?;

    println!("\n=== CREATURE FORGE ===");
    println!();
    println!("Commands:");
    println!("  status / s          - Show the player's stamina, body and items");
    println!("  tick / t            - Advance time by one tick");
    println!("  run <n>             - Run n ticks");
    println!("  list / l            - List schematics and actions");
    println!("  json                - Print the player snapshot as JSON");
    println!("  fabricate <id> / f  - Fabricate a schematic");
    println!("  act <id> / a        - Perform an action");
    println!("  quit / q            - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        match (command, arg) {
            ("quit" | "q", _) => break,
            ("status" | "s", _) => display_status(&world),
            ("tick" | "t", _) => {
                run_ticks(&mut world, 1, args.seconds_per_tick);
                println!("Tick {} complete.", world.current_tick);
            }
            ("run", Some(n)) => match n.parse::<u32>() {
                Ok(n) => {
                    run_ticks(&mut world, n, args.seconds_per_tick);
                    println!("Completed {} ticks. Now at tick {}.", n, world.current_tick);
                }
                Err(_) => println!("Usage: run <number>"),
            },
            ("list" | "l", _) => display_catalog(&world),
            ("json", _) => println!("{}", world.snapshot().to_json()?),
            ("fabricate" | "f", Some(id)) => match world.fabricate(id) {
                Ok(report) => {
                    let produced: Vec<_> = report
                        .produced
                        .iter()
                        .map(|(name, n)| plural(world.catalogs().items.label(name), *n))
                        .collect();
                    println!("Fabricated {}.", produced.join(", "));
                }
                Err(e) => println!("Cannot fabricate: {}", e),
            },
            ("act" | "a", Some(id)) => match world.perform_action(id) {
                Ok(report) => {
                    let gathered: Vec<_> = report
                        .gathered
                        .iter()
                        .map(|(name, n)| plural(world.catalogs().items.label(name), *n))
                        .collect();
                    println!("Gathered {}.", gathered.join(", "));
                }
                Err(e) => println!("Cannot act: {}", e),
            },
            ("run" | "fabricate" | "f" | "act" | "a", None) => {
                println!("Usage: {} <argument>", command)
            }
            _ => println!("Unknown command: {}", command),
        }
    }

    tracing::info!(tick = world.current_tick, "Creature Forge exiting");
    Ok(())
}

fn run_ticks(world: &mut World, n: u32, seconds_per_tick: f32) {
    for _ in 0..n {
        for event in world.tick(seconds_per_tick) {
            println!("  {:?}", event);
        }
    }
}

fn display_status(world: &World) {
    let player = world.player();
    println!(
        "{} the {} - stamina {:.1}/{:.0}, health {}/{}, age {:.1}s",
        player.name(),
        player.species().key,
        player.stamina(),
        player.max_stamina(),
        player.health(),
        player.max_health(),
        player.age()
    );
    for part in player.body().iter() {
        println!("  {:<12} {:>3}/{}", part.label, part.health, part.max_health);
    }
    if player.items().is_empty() {
        println!("  (no items)");
    }
    for (name, amount) in player.items().sorted() {
        println!("  {}", plural(world.catalogs().items.label(name), amount));
    }
}

fn display_catalog(world: &World) {
    let items = &world.catalogs().items;
    println!("Schematics (! wears the body):");
    for schematic in world.catalogs().schematics.all() {
        let mark = if world.player().can_fabricate(schematic) { "*" } else { " " };
        let wear = if schematic.inflicts_damage() { "!" } else { " " };
        println!(
            " {}{} {:<16} {}",
            mark,
            wear,
            schematic.id,
            schematic.describe(items)
        );
    }
    println!("Actions:");
    for action in world.catalogs().actions.all() {
        let availability = action.availability(world.player(), world.deposit());
        match availability.reason {
            None => println!(" * {:<16} {}", action.id, action.label),
            Some(reason) => println!("   {:<16} {} ({})", action.id, action.label, reason),
        }
    }
}
