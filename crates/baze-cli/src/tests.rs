use super::*;

#[test]
fn parses_processes_command() {
    let cli = Cli::try_parse_from(["baze-cli", "processes"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Processes));
}

#[test]
fn candidates_filters_default_to_none() {
    let cli = Cli::try_parse_from(["baze-cli", "candidates"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Candidates {
            recruiter: None,
            process: None,
            sources: false
        }
    ));
}

#[test]
fn candidates_accepts_recruiter_and_process() {
    let cli = Cli::try_parse_from([
        "baze-cli",
        "candidates",
        "--recruiter",
        "Anna",
        "--process",
        "P1",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Candidates {
            recruiter, process, ..
        } => {
            assert_eq!(recruiter.as_deref(), Some("Anna"));
            assert_eq!(process.as_deref(), Some("P1"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn decide_parses_hyphenated_verdict() {
    let cli = Cli::try_parse_from(["baze-cli", "decide", "recX", "no-pass"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Decide { record_id, verdict } => {
            assert_eq!(record_id, "recX");
            assert_eq!(verdict, Verdict::NoPass);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn decide_rejects_unknown_verdict() {
    assert!(Cli::try_parse_from(["baze-cli", "decide", "recX", "maybe"]).is_err());
}

#[test]
fn selections_takes_optional_field() {
    let cli = Cli::try_parse_from([
        "baze-cli",
        "selections",
        "recW1",
        "--field",
        "lavoratore_id",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Selections { worker_id, field } => {
            assert_eq!(worker_id, "recW1");
            assert_eq!(field.as_deref(), Some("lavoratore_id"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["baze-cli"]).is_err());
}

#[test]
fn read_sync_file_parses_candidate_array() {
    let path = std::env::temp_dir().join(format!("baze-sync-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"id":"c1","name":"Anna","email":"a@example.com","role":"Colf","status":"pending","skills":["stiro"]}]"#,
    )
    .expect("write fixture");

    let candidates = review::read_sync_file(&path).expect("parse fixture");
    std::fs::remove_file(&path).ok();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].skills, vec!["stiro"]);
}
