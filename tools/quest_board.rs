/// Quest Board - interactive shell over a saved game.
///
/// Usage: quest_board --save-dir <path> [--catalog <dir>] [--settings <file>] [--seed <n>]
///
/// Commands:
///   create <name> <class> [avatar]  - create (or replace) the character
///   status                          - show character level, experience, and stats
///   quests                          - list today's quests
///   complete <id|#>                 - complete a quest from today's list
///   set <stat>=<value> ...          - overwrite stats
///   catalog [category] [difficulty] - browse the full quest catalog
///   classes                         - list class profiles
///   help                            - list commands
///   quit                            - exit

use leveling_engine::core::catalog::QuestCatalog;
use leveling_engine::core::storage::FileStore;
use leveling_engine::core::store::CharacterStore;
use leveling_engine::schema::character::CharacterClass;
use leveling_engine::schema::quest::{Quest, QuestCategory, QuestDifficulty, QuestId};
use leveling_engine::schema::stats::{StatKind, StatUpdate};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut save_dir = None;
    let mut catalog_dir = None;
    let mut settings_path = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--save-dir" if i + 1 < args.len() => {
                i += 1;
                save_dir = Some(args[i].clone());
            }
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_dir = Some(args[i].clone());
            }
            "--settings" if i + 1 < args.len() => {
                i += 1;
                settings_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = match parse_seed(&args[i]) {
                    Ok(n) => Some(n),
                    Err(e) => {
                        eprintln!("ERROR: {}", e);
                        std::process::exit(1);
                    }
                };
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let save_dir = match save_dir {
        Some(dir) => dir,
        None => {
            eprintln!("--save-dir is required");
            std::process::exit(1);
        }
    };

    let built = build_store(
        &save_dir,
        catalog_dir.as_deref(),
        settings_path.as_deref(),
        seed,
    );
    let mut store = match built {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = store.initialize() {
        eprintln!("ERROR: failed to load save: {}", e);
        std::process::exit(1);
    }

    if let Some(day) = store.day_key() {
        println!("Today: {}", day);
    }
    match store.character() {
        Some(c) => println!("Welcome back, {} (level {} {}).", c.name, c.level, c.class),
        None => println!("No character yet. Use 'create <name> <class>' to begin."),
    }
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("quests> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "create" => {
                if parts.len() < 3 {
                    println!("Usage: create <name> <class> [avatar]");
                    println!("  class: warrior, mage, assassin, tank, support");
                    continue;
                }
                let class = match parts[2].parse::<CharacterClass>() {
                    Ok(c) => c,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let avatar = parts.get(3).copied().unwrap_or("1");
                match store.create_character(parts[1], class, avatar) {
                    Ok(Some(c)) => println!("{} the {} has awakened.", c.name, c.class),
                    Ok(None) => println!("A character needs a name."),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "status" => {
                print_status(&store);
            }
            "quests" => {
                if store.daily_quests().is_empty() {
                    println!("All of today's quests are done. Come back tomorrow.");
                    continue;
                }
                for (n, quest) in store.daily_quests().iter().enumerate() {
                    print!("  #{} ", n + 1);
                    print_quest(quest);
                }
            }
            "complete" | "done" => {
                if parts.len() < 2 {
                    println!("Usage: complete <quest id | #number>");
                    continue;
                }
                let id = match resolve_quest_id(&store, parts[1]) {
                    Some(id) => id,
                    None => {
                        println!("No quest '{}' in today's list.", parts[1]);
                        continue;
                    }
                };
                match store.complete_quest(&id) {
                    Ok(Some(done)) => {
                        println!(
                            "Completed '{}': +{} XP {}",
                            done.quest.title, done.experience_gained, done.stats_gained
                        );
                        if let Some(up) = done.level_up {
                            println!("*** LEVEL UP! {} -> {} ***", up.from, up.to);
                        }
                    }
                    Ok(None) => println!("Create a character first."),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "set" => {
                if parts.len() < 2 {
                    println!("Usage: set <stat>=<value> [<stat>=<value> ...]");
                    continue;
                }
                let update = match parse_stat_update(&parts[1..]) {
                    Ok(u) => u,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match store.update_stats(&update) {
                    Ok(true) => print_status(&store),
                    Ok(false) => println!("Create a character first."),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "catalog" => {
                let mut category = None;
                let mut difficulty = None;
                for arg in &parts[1..] {
                    if let Ok(c) = arg.parse::<QuestCategory>() {
                        category = Some(c);
                    } else if let Ok(d) = arg.parse::<QuestDifficulty>() {
                        difficulty = Some(d);
                    } else if !arg.eq_ignore_ascii_case("all") {
                        println!("Unknown filter: {}", arg);
                    }
                }
                let found = store.catalog().filter(category, difficulty);
                println!("{} quests found", found.len());
                for quest in found {
                    print!("  ");
                    print_quest(quest);
                }
            }
            "classes" => {
                print_classes(store.catalog());
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn build_store(
    save_dir: &str,
    catalog_dir: Option<&str>,
    settings_path: Option<&str>,
    seed: Option<u64>,
) -> Result<CharacterStore, Box<dyn std::error::Error>> {
    let storage = FileStore::open(save_dir)?;
    println!("Save directory: {}", storage.dir().display());
    let mut builder = CharacterStore::builder().storage(storage);
    if let Some(dir) = catalog_dir {
        let mut catalog = QuestCatalog::builtin()?;
        catalog.merge(QuestCatalog::load_from_dir(Path::new(dir))?);
        builder = builder.catalog(catalog);
    }
    if let Some(path) = settings_path {
        builder = builder.settings_file(path);
    }
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}

fn resolve_quest_id(store: &CharacterStore, arg: &str) -> Option<QuestId> {
    if let Some(n) = arg.strip_prefix('#') {
        let index: usize = n.parse().ok()?;
        return store
            .daily_quests()
            .get(index.checked_sub(1)?)
            .map(|q| q.id.clone());
    }
    let id = QuestId::from(arg);
    store
        .daily_quests()
        .iter()
        .any(|q| q.id == id)
        .then_some(id)
}

fn parse_seed(arg: &str) -> Result<u64, String> {
    arg.parse().map_err(|_| format!("Invalid seed: {}", arg))
}

fn parse_stat_update(args: &[&str]) -> Result<StatUpdate, String> {
    let mut update = StatUpdate::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("Expected <stat>=<value>, got '{}'", arg))?;
        let kind: StatKind = name.parse().map_err(|e| format!("{}", e))?;
        let value: u32 = value
            .parse()
            .map_err(|_| format!("Invalid value for {}: {}", kind, value))?;
        update = update.with(kind, value);
    }
    Ok(update)
}

fn print_status(store: &CharacterStore) {
    let c = match store.character() {
        Some(c) => c,
        None => {
            println!("No character yet.");
            return;
        }
    };
    println!("\n--- {} ---", c.name);
    println!("Class: {}   Avatar: {}", c.class, c.avatar);
    println!(
        "Level {}   XP {} ({}% to next, {} needed)",
        c.level,
        c.experience,
        c.level_progress(),
        c.experience_to_next
    );
    for kind in StatKind::ALL {
        println!("  {} {:>4}", kind.abbreviation(), c.stats.get(kind));
    }
    println!("  Total {}", c.stats.total());
    println!(
        "Quests completed: {} ({} today)\n",
        c.total_quests, c.completed_today
    );
}

fn print_quest(quest: &Quest) {
    println!(
        "[{}] {} ({}, {}) +{} XP {} - {}",
        quest.id,
        quest.title,
        quest.category.name(),
        quest.difficulty.name(),
        quest.rewards.experience,
        quest.stat_bonus,
        quest.time_estimate
    );
}

fn print_classes(catalog: &QuestCatalog) {
    for profile in catalog.classes() {
        let s = &profile.starting_stats;
        println!("{}: {}", profile.class, profile.description);
        println!(
            "    STR {} INT {} DEX {} CON {} LCK {}",
            s.strength, s.intelligence, s.dexterity, s.constitution, s.luck
        );
    }
}

fn print_usage() {
    println!("Quest Board - interactive shell over a saved game.");
    println!();
    println!(
        "Usage: quest_board --save-dir <path> [--catalog <dir>] [--settings <file>] [--seed <n>]"
    );
    println!();
    println!("  --save-dir <path>   Directory holding the saved game (created if missing)");
    println!("  --catalog <dir>     Extra quests.ron/classes.ron merged over the built-in catalog");
    println!("  --settings <file>   RON settings file (daily_quest_count, key_prefix)");
    println!("  --seed <n>          Seed for daily quest sampling");
}

fn print_help() {
    println!("Commands:");
    println!("  create <name> <class> [avatar]   Create (or replace) the character");
    println!("  status                           Show level, experience, and stats");
    println!("  quests                           List today's quests");
    println!("  complete <id|#n>                 Complete a quest from today's list");
    println!("  set <stat>=<value> ...           Overwrite stats");
    println!("  catalog [category] [difficulty]  Browse the full catalog");
    println!("  classes                          List class profiles");
    println!("  help                             Show this help");
    println!("  quit                             Exit");
    println!();
    println!("Classes: warrior, mage, assassin, tank, support");
    println!("Stats: strength, intelligence, dexterity, constitution, luck");
    println!("Categories: fitness, learning, productivity, mindfulness, social, creativity");
    println!("Difficulties: easy, medium, hard, elite");
}
