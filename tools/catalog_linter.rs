/// Catalog Linter - validates quest catalog coverage and data quality.
///
/// Usage: catalog_linter <catalog_dir | --builtin> [--daily-count <n>]

use leveling_engine::core::catalog::QuestCatalog;
use leveling_engine::core::progression::DEFAULT_DAILY_QUEST_COUNT;
use leveling_engine::schema::character::CharacterClass;
use leveling_engine::schema::quest::QuestCategory;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog_dir | --builtin> [--daily-count <n>]");
        process::exit(0);
    }

    let source = &args[1];
    let mut daily_count = DEFAULT_DAILY_QUEST_COUNT;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--daily-count" && i + 1 < args.len() {
            i += 1;
            daily_count = match args[i].parse() {
                Ok(n) => n,
                Err(_) => {
                    eprintln!("ERROR: Invalid daily count: {}", args[i]);
                    process::exit(1);
                }
            };
        }
        i += 1;
    }

    let loaded = if source == "--builtin" {
        QuestCatalog::builtin()
    } else {
        let dir = Path::new(source);
        if !dir.is_dir() {
            eprintln!("ERROR: Path '{}' is not a directory", source);
            process::exit(1);
        }
        QuestCatalog::load_from_dir(dir)
    };

    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} quests and {} class profiles",
        catalog.len(),
        catalog.classes().len()
    );

    let (errors, warnings) = lint_catalog(&catalog, daily_count);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &QuestCatalog, daily_count: usize) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        errors.push("Catalog contains no quests".to_string());
        return (errors, warnings);
    }

    if catalog.len() < daily_count {
        warnings.push(format!(
            "Catalog has {} quests, fewer than the daily set size of {}",
            catalog.len(),
            daily_count
        ));
    }

    // Coverage: every category should offer something
    for category in QuestCategory::ALL {
        let count = catalog.by_category(category).len();
        if count == 0 {
            warnings.push(format!("No quests in category '{}'", category.name()));
        }
    }

    for class in CharacterClass::ALL {
        if catalog.class_profile(class).is_none() {
            warnings.push(format!("No class profile for '{}'", class));
        }
    }

    for quest in catalog.quests() {
        if quest.title.trim().is_empty() {
            errors.push(format!("Quest '{}' has an empty title", quest.id));
        }

        if quest.rewards.experience == 0 {
            errors.push(format!("Quest '{}' rewards no experience", quest.id));
        }

        for (stat, bonus) in quest.stat_bonus.iter() {
            if bonus == 0 {
                errors.push(format!(
                    "Quest '{}' has a zero bonus for '{}'",
                    quest.id, stat
                ));
            }
        }

        if quest.stat_bonus.is_empty() {
            warnings.push(format!("Quest '{}' grants no stat bonus", quest.id));
        }

        // Convention: ids are prefixed with their lowercase category
        let prefix = format!("{}_", quest.category.name().to_lowercase());
        if !quest.id.as_str().starts_with(&prefix) {
            warnings.push(format!(
                "Quest '{}' id does not start with '{}'",
                quest.id, prefix
            ));
        }
    }

    (errors, warnings)
}
