use clap::Parser;

use super::*;

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["subpulse", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Run { dry_run: false }));
}

#[test]
fn parses_run_dry_run_flag() {
    let cli = Cli::try_parse_from(["subpulse", "run", "--dry-run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Run { dry_run: true }));
}

#[test]
fn parses_status_with_community_filter() {
    let cli = Cli::try_parse_from(["subpulse", "status", "--community", "suns"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Status { community, limit } => {
            assert_eq!(community.as_deref(), Some("suns"));
            assert_eq!(limit, 20);
        }
        other => panic!("expected status command, got {other:?}"),
    }
}

#[test]
fn parses_status_limit_override() {
    let cli = Cli::try_parse_from(["subpulse", "status", "--limit", "5"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Status { community, limit } => {
            assert!(community.is_none());
            assert_eq!(limit, 5);
        }
        other => panic!("expected status command, got {other:?}"),
    }
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["subpulse", "db", "migrate"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Migrate
        }
    ));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["subpulse", "db", "ping"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Ping
        }
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["subpulse"]).is_err());
}

#[test]
fn log_filter_prefers_rust_log_directives() {
    let filter = log_filter(Some("warn"), "debug");
    assert_eq!(filter.to_string(), "warn");
}

#[test]
fn log_filter_falls_back_to_configured_level() {
    let filter = log_filter(None, "debug");
    assert_eq!(filter.to_string(), "debug");
}

#[test]
fn log_filter_defaults_to_info_when_configured_level_is_invalid() {
    let filter = log_filter(None, "no=such=level");
    assert_eq!(filter.to_string(), "info");
}
