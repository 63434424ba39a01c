//! Text rendering of the controller state for the terminal.

use client_core::LookupState;
use serde_json::Value;
use shared::domain::Profile;

/// Profile keys shown in the summary view, in display order.
const SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("login", "Login"),
    ("name", "Name"),
    ("company", "Company"),
    ("location", "Location"),
    ("bio", "Bio"),
    ("public_repos", "Repos"),
    ("followers", "Followers"),
    ("following", "Following"),
    ("html_url", "Profile"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

/// Renders both fields the way a bound view would: the error line when set,
/// and the profile when set. Both can be present after a rejected input.
pub fn render_state(state: &LookupState, format: OutputFormat) -> String {
    let mut out = String::new();
    if let Some(message) = &state.error {
        out.push_str(message);
        out.push('\n');
    }
    if let Some(profile) = &state.result {
        match format {
            OutputFormat::Summary => out.push_str(&render_summary(profile)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(profile)
                    .unwrap_or_else(|_| "{}".to_string());
                out.push_str(&json);
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_summary(profile: &Profile) -> String {
    let width = SUMMARY_FIELDS
        .iter()
        .map(|(_, label)| label.len())
        .max()
        .unwrap_or_default();

    SUMMARY_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let value = display_value(profile.get(*key)?)?;
            Some(format!("{label:<width$}  {value}\n"))
        })
        .collect()
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.replace('\n', " ")),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> Profile {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn summary_skips_missing_and_null_fields() {
        let rendered = render_summary(&profile(json!({
            "login": "octocat",
            "name": "The Octocat",
            "company": null,
            "public_repos": 8,
            "unrelated": "ignored"
        })));

        assert_eq!(
            rendered,
            "Login      octocat\nName       The Octocat\nRepos      8\n"
        );
    }

    #[test]
    fn error_only_state_prints_message() {
        let state = LookupState {
            error: Some("Network Error 404 Not Found".into()),
            ..LookupState::default()
        };
        assert_eq!(
            render_state(&state, OutputFormat::Summary),
            "Network Error 404 Not Found\n"
        );
    }

    #[test]
    fn stale_result_is_shown_below_validation_error() {
        let state = LookupState {
            result: Some(profile(json!({"login": "octocat"}))),
            error: Some("You need to enter a valid Github user name!".into()),
            ..LookupState::default()
        };
        assert_eq!(
            render_state(&state, OutputFormat::Summary),
            "You need to enter a valid Github user name!\nLogin      octocat\n"
        );
    }

    #[test]
    fn json_format_prints_profile_verbatim() {
        let state = LookupState {
            result: Some(profile(json!({"login": "octocat"}))),
            ..LookupState::default()
        };
        assert_eq!(
            render_state(&state, OutputFormat::Json),
            "{\n  \"login\": \"octocat\"\n}\n"
        );
    }
}
