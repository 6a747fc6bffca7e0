//! Profile command handlers for the CLI.
//!
//! Every editing command loads the stored profile, applies one change to the
//! form, and saves the result, so the server copy is the only persistent
//! state. `--dry-run` prints the payload that would be saved instead.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use obliqo_client::{ObliqoClient, ProfileSession};
use obliqo_core::{
    ExtractedCvData, FieldScope, ListSection, ProfileForm, ProfilePatch, UserProfile,
};
use serde_json::Value;

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Print the stored profile
    Show {
        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print an empty profile as YAML, ready to fill in and import
    Template,
    /// Replace the stored profile with one read from a JSON or YAML file
    Import {
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
    /// Set one field, e.g. `personal_info.email` or `about_me`
    Set {
        /// Field path: `<section>.<field>` or a top-level field name
        path: String,
        /// New value; parsed as JSON, otherwise taken as a string
        value: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Append an item to a list section such as `projects`
    AddItem {
        section: ListSection,
        /// Item fields as a JSON object
        item: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Change one field of a list item
    SetItem {
        section: ListSection,
        id: String,
        field: String,
        /// New value; parsed as JSON, otherwise taken as a string
        value: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove a list item by id
    RemoveItem {
        section: ListSection,
        id: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Upload a CV (.pdf, .doc, .docx)
    UploadCv {
        path: PathBuf,
        /// Fill profile fields from the extracted CV data and save
        #[arg(long)]
        autofill: bool,
    },
}

/// Dispatches a `profile` sub-command.
///
/// # Errors
///
/// Returns an error if an edit is rejected by the form, a required field is
/// blank at save time, or an API call fails.
pub(crate) async fn run(client: ObliqoClient, command: ProfileCommands) -> anyhow::Result<()> {
    let mut session = ProfileSession::new(client);
    let found = session.load().await;

    match command {
        ProfileCommands::Show { json } => {
            if !found {
                println!("no stored profile yet; run `profile template` to start one");
                return Ok(());
            }
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(session.form().profile())?
                );
            } else {
                print_summary(session.form());
            }
            Ok(())
        }
        ProfileCommands::Template => {
            print!("{}", serde_yaml::to_string(&UserProfile::skeleton())?);
            Ok(())
        }
        ProfileCommands::Import { file, dry_run } => {
            let patch = read_profile_file(&file)?;
            session.form_mut().load(Some(patch));
            finish(&mut session, dry_run).await
        }
        ProfileCommands::Set {
            path,
            value,
            dry_run,
        } => {
            set_field(session.form_mut(), &path, &value)?;
            finish(&mut session, dry_run).await
        }
        ProfileCommands::AddItem {
            section,
            item,
            dry_run,
        } => {
            let template: Value = serde_json::from_str(&item)
                .with_context(|| format!("item for {section} is not valid JSON"))?;
            let id = session.form_mut().add_item(section, template)?;
            println!("added {section} item {id}");
            finish(&mut session, dry_run).await
        }
        ProfileCommands::SetItem {
            section,
            id,
            field,
            value,
            dry_run,
        } => {
            let updated =
                session
                    .form_mut()
                    .update_item_field(section, &id, &field, parse_value(&value))?;
            anyhow::ensure!(updated, "no {section} item with id '{id}'");
            finish(&mut session, dry_run).await
        }
        ProfileCommands::RemoveItem {
            section,
            id,
            dry_run,
        } => {
            anyhow::ensure!(
                session.form_mut().remove_item(section, &id),
                "no {section} item with id '{id}'"
            );
            finish(&mut session, dry_run).await
        }
        ProfileCommands::UploadCv { path, autofill } => upload_cv(&mut session, &path, autofill).await,
    }
}

/// Saves the session, or prints the would-be payload when `dry_run` is set.
async fn finish(session: &mut ProfileSession, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        session.form().validate_required()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&session.form().submission())?
        );
        return Ok(());
    }
    let ack = session.save().await?;
    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Profile saved successfully")
    );
    Ok(())
}

async fn upload_cv(
    session: &mut ProfileSession,
    path: &Path,
    autofill: bool,
) -> anyhow::Result<()> {
    let response = session.upload_cv_file(path).await?;
    println!("uploaded {} ({})", response.filename, response.file_url);

    match session.form().pending_extraction() {
        Some(data) => print_extraction(data),
        None => println!("no usable data could be extracted from this CV"),
    }

    if autofill {
        if session.apply_autofill() {
            println!("profile fields filled from CV");
        }
    } else if session.form().pending_extraction().is_some() {
        println!("re-run with --autofill to copy these values into your profile");
    }

    // The resume URL is part of the profile, so record it even without autofill.
    if let Err(err) = session.form().validate_required() {
        println!("profile not saved: {err}");
        return Ok(());
    }
    finish(session, false).await
}

/// Routes a dotted field path to the form.
///
/// The three comma-separated list fields go to their text buffers, which
/// are what gets submitted.
fn set_field(form: &mut ProfileForm, path: &str, raw: &str) -> anyhow::Result<()> {
    match path {
        "skills" => form.set_skills_input(raw),
        "preferred_roles" => form.set_roles_input(raw),
        "preferred_locations" => form.set_locations_input(raw),
        _ => {
            let (scope, field) = match path.split_once('.') {
                Some((section, field)) => {
                    let scope = FieldScope::from(section);
                    anyhow::ensure!(
                        scope != FieldScope::TopLevel,
                        "unknown profile section '{section}'"
                    );
                    (scope, field)
                }
                None => (FieldScope::TopLevel, path),
            };
            form.update_field(scope, field, parse_value(raw))?;
        }
    }
    Ok(())
}

/// JSON when it parses, otherwise the raw text as a JSON string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Reads a profile file, choosing YAML or JSON by extension.
fn read_profile_file(path: &Path) -> anyhow::Result<ProfilePatch> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let patch = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("{} is not a valid profile", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a valid profile", path.display()))?
    };
    Ok(patch)
}

fn print_summary(form: &ProfileForm) {
    let profile = form.profile();
    let info = &profile.personal_info;

    println!("{} <{}>", or_dash(&info.full_name), or_dash(&info.email));
    println!("user id:     {}", profile.user_id);
    println!("phone:       {}", or_dash(&info.phone_number));
    println!("address:     {}", or_dash(&info.address));
    println!(
        "experience:  {} ({} years)",
        or_dash(&profile.experience_level),
        profile.experience_years
    );
    println!("skills:      {}", or_dash(form.skills_input()));
    println!("roles:       {}", or_dash(form.roles_input()));
    println!("locations:   {}", or_dash(form.locations_input()));
    println!(
        "work mode:   {:?}{}",
        profile.work_preferences.work_mode,
        if profile.work_preferences.willing_to_relocate {
            ", willing to relocate"
        } else {
            ""
        }
    );
    println!(
        "resume:      {}",
        if profile.has_uploaded_resume {
            profile.resume_url.as_str()
        } else {
            "not uploaded"
        }
    );

    println!();
    println!("{:<28}ITEMS", "SECTION");
    for section in ListSection::ALL {
        println!("{:<28}{}", section.wire_name(), profile.section_len(section));
    }
}

fn print_extraction(data: &ExtractedCvData) {
    println!("extracted from CV:");
    if let Some(info) = &data.personal_info {
        for (label, value) in [
            ("name", &info.full_name),
            ("email", &info.email),
            ("phone", &info.phone_number),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                println!("  {label:<10}{value}");
            }
        }
    }
    if let Some(social) = &data.social_profiles {
        for (label, value) in [("linkedin", &social.linkedin), ("github", &social.github)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                println!("  {label:<10}{value}");
            }
        }
    }
    if let Some(skills) = data.skills.as_ref().filter(|s| !s.is_empty()) {
        println!("  {:<10}{}", "skills", skills.join(", "));
    }
    if let Some(years) = data.experience_years.filter(|&y| y > 0) {
        println!("  {:<10}{years}", "years");
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
