use super::*;
use obliqo_core::ListSection;

#[test]
fn parses_health_command() {
    let cli = Cli::try_parse_from(["obliqo", "health"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Health));
    assert!(cli.api_url.is_none());
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["obliqo"]).is_err());
}

#[test]
fn api_url_is_global() {
    let cli = Cli::try_parse_from(["obliqo", "stats", "--api-url", "http://api.test:9000"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Stats));
    assert_eq!(cli.api_url.as_deref(), Some("http://api.test:9000"));
}

#[test]
fn jobs_list_defaults() {
    let cli = Cli::try_parse_from(["obliqo", "jobs", "list"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Jobs {
            command: JobsCommands::List {
                page: 1,
                page_size: None,
                decision: None
            }
        }
    ));
}

#[test]
fn jobs_list_with_decision_filter() {
    let cli = Cli::try_parse_from([
        "obliqo",
        "jobs",
        "list",
        "--page",
        "3",
        "--page-size",
        "10",
        "--decision",
        "apply",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Jobs {
            command: JobsCommands::List {
                page: 3,
                page_size: Some(10),
                decision: Some(Decision::Apply)
            }
        }
    ));
}

#[test]
fn jobs_list_rejects_unknown_decision() {
    assert!(Cli::try_parse_from(["obliqo", "jobs", "list", "--decision", "maybe"]).is_err());
}

#[test]
fn jobs_show_with_animation() {
    let cli = Cli::try_parse_from(["obliqo", "jobs", "show", "https://jobs.example/1", "--animate"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Jobs {
            command: JobsCommands::Show { ref id, animate: true }
        } if id == "https://jobs.example/1"
    ));
}

#[test]
fn profile_set_takes_path_and_value() {
    let cli = Cli::try_parse_from(["obliqo", "profile", "set", "personal_info.email", "a@b.c"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Profile {
            command: ProfileCommands::Set { ref path, ref value, dry_run: false }
        } if path == "personal_info.email" && value == "a@b.c"
    ));
}

#[test]
fn profile_add_item_parses_section() {
    let cli = Cli::try_parse_from([
        "obliqo",
        "profile",
        "add-item",
        "work_experience",
        r#"{"company":"Initech"}"#,
        "--dry-run",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Profile {
            command: ProfileCommands::AddItem {
                section: ListSection::WorkExperience,
                dry_run: true,
                ..
            }
        }
    ));
}

#[test]
fn profile_remove_item_rejects_unknown_section() {
    assert!(Cli::try_parse_from(["obliqo", "profile", "remove-item", "hobbies", "x"]).is_err());
}

#[test]
fn profile_upload_cv_autofill_flag() {
    let cli = Cli::try_parse_from(["obliqo", "profile", "upload-cv", "cv.pdf", "--autofill"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Profile {
            command: ProfileCommands::UploadCv { autofill: true, .. }
        }
    ));
}
