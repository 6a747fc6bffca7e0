use super::*;

fn patch_from(json: serde_json::Value) -> ProfilePatch {
    serde_json::from_value(json).expect("patch should deserialize")
}

// -----------------------------------------------------------------------
// skeleton
// -----------------------------------------------------------------------

#[test]
fn skeleton_has_documented_defaults() {
    let profile = UserProfile::skeleton();
    assert!(profile.user_id.starts_with("user_"));
    assert_eq!(profile.experience_level, "Entry");
    assert_eq!(profile.work_preferences.work_mode, WorkMode::Any);
    assert!(!profile.work_preferences.willing_to_relocate);
    assert!(!profile.has_uploaded_resume);
    assert_eq!(profile.personal_info, PersonalInfo::default());
    for section in ListSection::ALL {
        assert_eq!(profile.section_len(section), 0, "{section} should start empty");
    }
}

// -----------------------------------------------------------------------
// merged
// -----------------------------------------------------------------------

#[test]
fn merged_missing_github_keeps_default_and_other_social_fields() {
    let patch = patch_from(serde_json::json!({
        "social_profiles": {
            "linkedin": "https://linkedin.com/in/ada",
            "portfolio": "https://ada.dev"
        }
    }));
    let merged = UserProfile::skeleton().merged(patch);
    assert_eq!(merged.social_profiles.github, "");
    assert_eq!(merged.social_profiles.linkedin, "https://linkedin.com/in/ada");
    assert_eq!(merged.social_profiles.portfolio, "https://ada.dev");
}

#[test]
fn merged_treats_null_as_absent() {
    let patch = patch_from(serde_json::json!({
        "personal_info": {
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone_number": "555-0100",
            "address": "London",
            "gender": null,
            "date_of_birth": null
        },
        "about_me": null,
        "resume_url": null,
        "medical_info": null
    }));
    let merged = UserProfile::skeleton().merged(patch);
    assert_eq!(merged.personal_info.full_name, "Ada Lovelace");
    assert_eq!(merged.personal_info.gender, "");
    assert_eq!(merged.personal_info.date_of_birth, "");
    assert_eq!(merged.about_me, "");
    assert_eq!(merged.resume_url, "");
    assert_eq!(merged.medical_info, MedicalInfo::default());
}

#[test]
fn merged_gives_repeated_ids_fresh_ones() {
    let patch = patch_from(serde_json::json!({
        "awards": [
            { "id": "42", "title": "A" },
            { "id": "42", "title": "B" },
            { "id": "", "title": "C" },
            { "id": "7", "title": "D" }
        ]
    }));
    let merged = UserProfile::skeleton().merged(patch);
    let ids: Vec<&str> = merged.awards.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids[0], "42");
    assert_eq!(ids[3], "7");
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 4);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[test]
fn merged_overwrites_top_level_fields_wholesale() {
    let mut base = UserProfile::skeleton();
    base.skills = vec!["Java".to_owned(), "Kotlin".to_owned()];
    let patch = patch_from(serde_json::json!({
        "user_id": "user_42",
        "skills": ["Rust"],
        "experience_years": 4,
        "experience_level": "Mid"
    }));
    let merged = base.merged(patch);
    assert_eq!(merged.user_id, "user_42");
    assert_eq!(merged.skills, vec!["Rust"]);
    assert_eq!(merged.experience_years, 4);
    assert_eq!(merged.experience_level, "Mid");
}

#[test]
fn merged_keeps_unpatched_section_fields() {
    let mut base = UserProfile::skeleton();
    base.work_preferences.willing_to_relocate = true;
    let patch = patch_from(serde_json::json!({
        "work_preferences": { "work_mode": "Remote" }
    }));
    let merged = base.merged(patch);
    assert_eq!(merged.work_preferences.work_mode, WorkMode::Remote);
    assert!(merged.work_preferences.willing_to_relocate);
}

#[test]
fn merged_assigns_ids_to_items_without_one() {
    let patch = patch_from(serde_json::json!({
        "projects": [
            { "id": "p-1", "title": "Compiler", "description": "", "technologies": [] },
            { "title": "Crawler", "description": "", "technologies": ["Rust"] }
        ]
    }));
    let merged = UserProfile::skeleton().merged(patch);
    assert_eq!(merged.projects.len(), 2);
    assert_eq!(merged.projects[0].id, "p-1");
    assert!(!merged.projects[1].id.is_empty());
    assert_ne!(merged.projects[1].id, "p-1");
}

#[test]
fn merged_accepts_null_optional_item_fields() {
    let patch = patch_from(serde_json::json!({
        "awards": [
            { "id": "a-1", "title": "Best Paper", "issuer": "ACM", "date": "2024", "description": null }
        ]
    }));
    let merged = UserProfile::skeleton().merged(patch);
    assert_eq!(merged.awards[0].description, None);
}

// -----------------------------------------------------------------------
// WorkMode / ListSection
// -----------------------------------------------------------------------

#[test]
fn work_mode_unknown_value_reads_as_any() {
    let mode: WorkMode = serde_json::from_value(serde_json::json!("Flexible")).unwrap();
    assert_eq!(mode, WorkMode::Any);
    let mode: WorkMode = serde_json::from_value(serde_json::json!("Hybrid")).unwrap();
    assert_eq!(mode, WorkMode::Hybrid);
}

#[test]
fn work_mode_serializes_variant_name() {
    let value = serde_json::to_value(WorkMode::Onsite).unwrap();
    assert_eq!(value, serde_json::json!("Onsite"));
}

#[test]
fn list_section_parses_wire_names() {
    for section in ListSection::ALL {
        assert_eq!(section.wire_name().parse::<ListSection>().unwrap(), section);
    }
    let err = "hobbies".parse::<ListSection>().unwrap_err();
    assert!(err.contains("hobbies"), "error should name the input: {err}");
}

#[test]
fn new_item_id_is_unique_across_rapid_calls() {
    let ids: std::collections::HashSet<String> = (0..1_000).map(|_| new_item_id()).collect();
    assert_eq!(ids.len(), 1_000);
}
