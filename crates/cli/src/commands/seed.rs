use crate::commands::{build_runtime, load_config, CommandResult};
use gamedeck_db::{connect_with_settings, migrations, DemoCatalog, SeedResult};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seed_result = DemoCatalog::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = DemoCatalog::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        pool.close().await;

        if verification.all_present {
            Ok(seed_result)
        } else {
            Err(("seed_verification", verification_message(&verification.missing), 6u8))
        }
    });

    match result {
        Ok(seed_result) => CommandResult::success("seed", summary(&seed_result)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn summary(result: &SeedResult) -> String {
    let names = DemoCatalog::names().collect::<Vec<_>>().join(", ");
    format!(
        "demo catalog ready: {} inserted, {} already present ({names})",
        result.inserted, result.already_present
    )
}

fn verification_message(missing: &[&str]) -> String {
    if missing.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for games: {}", missing.join(", "))
    }
}
