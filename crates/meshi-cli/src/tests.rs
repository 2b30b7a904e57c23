use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["meshi-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_migrate_and_seed() {
    let cli = Cli::try_parse_from(["meshi-cli", "migrate"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Migrate)));

    let cli = Cli::try_parse_from(["meshi-cli", "seed"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Seed)));
}

#[test]
fn search_defaults_max_results() {
    let cli = Cli::try_parse_from(["meshi-cli", "search", "ramen shibuya"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query, max: 5, json: false }) if query == "ramen shibuya"
    ));
}

#[test]
fn search_accepts_max_and_json() {
    let cli = Cli::try_parse_from(["meshi-cli", "search", "cafe", "--max", "10", "--json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            max: 10,
            json: true,
            ..
        })
    ));
}

#[test]
fn search_requires_query() {
    assert!(Cli::try_parse_from(["meshi-cli", "search"]).is_err());
}

#[test]
fn check_duplicate_parses_flags() {
    let cli = Cli::try_parse_from([
        "meshi-cli",
        "check-duplicate",
        "--map-url",
        "https://maps.app.goo.gl/abc",
        "--name",
        "Taro",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::CheckDuplicate { ref map_url, ref name, json: false })
            if map_url == "https://maps.app.goo.gl/abc" && name == "Taro"
    ));
}

#[test]
fn check_duplicate_name_defaults_to_empty() {
    let cli = Cli::try_parse_from([
        "meshi-cli",
        "check-duplicate",
        "--map-url",
        "https://maps.app.goo.gl/abc",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::CheckDuplicate { ref name, .. }) if name.is_empty()
    ));
}

#[test]
fn check_duplicate_requires_map_url() {
    assert!(Cli::try_parse_from(["meshi-cli", "check-duplicate", "--name", "Taro"]).is_err());
}

#[test]
fn log_test_has_default_message() {
    let cli = Cli::try_parse_from(["meshi-cli", "log-test"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::LogTest { ref message }) if message == "meshi-cli log test"
    ));
}
