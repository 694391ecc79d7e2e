//! Rendering failure lists into grouped, human-readable reports.
//!
//! This module provides [`render_failures`] for turning a [`Failures`]
//! into a deterministic message grouped by path, and [`DecodeError`], the
//! terminal error raised at the outermost decode entry points.

use indexmap::IndexMap;

use super::failure::{ConvertFailure, Failures};
use crate::tree::ConfigOrigin;

/// Renders a failure list grouped by path.
///
/// The message opens with the target type the decode was attempted
/// against. Failures at the decode root come first under an "at the root"
/// heading; the remaining paths follow in first-seen order, each under an
/// `at '<path>':` heading, one reason line per failure. Origins render as
/// a `(source:line)` suffix when present.
///
/// # Example
///
/// ```rust
/// use decant::{ConvertFailure, FailureReason, Failures};
/// use decant::error::render_failures;
///
/// let failures = Failures::single(ConvertFailure::new(FailureReason::KeyNotFound {
///     key: "port".to_string(),
///     candidates: vec![],
/// }));
///
/// let report = render_failures("myapp::Server", &failures);
/// assert!(report.contains("Cannot convert configuration to type myapp::Server"));
/// assert!(report.contains("at the root:"));
/// ```
pub fn render_failures(type_name: &str, failures: &Failures) -> String {
    let mut groups: IndexMap<String, Vec<&ConvertFailure>> = IndexMap::new();
    for failure in failures.iter() {
        groups
            .entry(failure.path.to_string())
            .or_default()
            .push(failure);
    }

    let mut out = format!(
        "Cannot convert configuration to type {}. Failures are:\n",
        type_name
    );

    if let Some(root_group) = groups.get("") {
        out.push_str("  at the root:\n");
        for failure in root_group {
            push_reason_line(&mut out, failure);
        }
    }

    for (path, group) in &groups {
        if path.is_empty() {
            continue;
        }
        out.push_str(&format!("  at '{}':\n", path));
        for failure in group {
            push_reason_line(&mut out, failure);
        }
    }

    out
}

fn push_reason_line(out: &mut String, failure: &ConvertFailure) {
    out.push_str("    - ");
    out.push_str(&failure.reason.to_string());
    if let Some(ref origin) = failure.origin {
        out.push_str(&format!(" ({})", origin));
    }
    out.push('\n');
}

/// The terminal decode error.
///
/// Produced only at the outermost entry points ([`crate::decode`] and the
/// registry's decode), where the accumulation result is unwrapped into a
/// `Result`. Carries every discovered failure plus the rendered report;
/// nothing below the decode root ever raises.
#[derive(Debug, thiserror::Error)]
#[error("{rendered}")]
pub struct DecodeError {
    type_name: String,
    failures: Failures,
    rendered: String,
}

impl DecodeError {
    /// Creates a terminal error from an accumulated failure list.
    pub fn new(type_name: impl Into<String>, failures: Failures) -> Self {
        let type_name = type_name.into();
        let rendered = render_failures(&type_name, &failures);
        Self {
            type_name,
            failures,
            rendered,
        }
    }

    /// A terminal error for an unreadable configuration source.
    pub fn cannot_read(
        type_name: impl Into<String>,
        source: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self::new(type_name, Failures::cannot_read(source, cause))
    }

    /// A terminal error for a source that failed to parse.
    pub fn cannot_parse(
        type_name: impl Into<String>,
        message: impl Into<String>,
        origin: Option<ConfigOrigin>,
    ) -> Self {
        Self::new(type_name, Failures::cannot_parse(message, origin))
    }

    /// The target type the decode was attempted against.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Every failure discovered by the decode.
    pub fn failures(&self) -> &Failures {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureReason;
    use crate::tree::ConfigValueType;
    use stillwater::prelude::*;

    fn key_not_found(key: &str) -> ConvertFailure {
        ConvertFailure::new(FailureReason::KeyNotFound {
            key: key.to_string(),
            candidates: vec![],
        })
    }

    fn wrong_type_at(field: &str) -> ConvertFailure {
        ConvertFailure::new(FailureReason::WrongType {
            found: ConfigValueType::String,
            expected: vec![ConfigValueType::Number],
        })
        .at_field(field)
    }

    #[test]
    fn test_root_group_renders_first() {
        // The wrong-type failure at 'a' is encountered before the root
        // failures, but the root group still leads the report.
        let failures = Failures::single(wrong_type_at("a"))
            .combine(Failures::single(key_not_found("b")))
            .combine(Failures::single(key_not_found("c")));

        let report = render_failures("Settings", &failures);

        let root_pos = report.find("at the root:").expect("root heading");
        let a_pos = report.find("at 'a':").expect("a heading");
        assert!(root_pos < a_pos);
        assert!(report.contains("- Key not found: 'b'."));
        assert!(report.contains("- Key not found: 'c'."));
        assert!(report.contains("- Expected type NUMBER. Found STRING instead."));
    }

    #[test]
    fn test_non_root_groups_in_first_seen_order() {
        let failures = Failures::single(wrong_type_at("z"))
            .combine(Failures::single(wrong_type_at("a")))
            .combine(Failures::single(wrong_type_at("z")));

        let report = render_failures("Settings", &failures);

        let z_pos = report.find("at 'z':").unwrap();
        let a_pos = report.find("at 'a':").unwrap();
        assert!(z_pos < a_pos);
        // Both 'z' failures collapse into one group with two lines.
        assert_eq!(report.matches("at 'z':").count(), 1);
    }

    #[test]
    fn test_report_opens_with_target_type() {
        let failures = Failures::single(key_not_found("x"));
        let report = render_failures("myapp::Config", &failures);
        assert!(report.starts_with("Cannot convert configuration to type myapp::Config."));
    }

    #[test]
    fn test_origin_suffix_rendered() {
        let failure = key_not_found("x").with_origin(Some(ConfigOrigin::new("app.conf", 4)));
        let report = render_failures("Settings", &Failures::single(failure));
        assert!(report.contains("(app.conf:4)"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let failures = Failures::single(wrong_type_at("a"))
            .combine(Failures::single(key_not_found("b")));
        let first = render_failures("Settings", &failures);
        let second = render_failures("Settings", &failures);
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_error_display_matches_report() {
        let failures = Failures::single(key_not_found("host"));
        let error = DecodeError::new("Server", failures.clone());

        assert_eq!(error.to_string(), render_failures("Server", &failures));
        assert_eq!(error.type_name(), "Server");
        assert_eq!(error.failures().len(), 1);
    }

    #[test]
    fn test_decode_error_cannot_read() {
        let error = DecodeError::cannot_read("Server", "app.conf", "no such file");
        assert_eq!(error.failures().len(), 1);
        assert!(error
            .to_string()
            .contains("Unable to read source app.conf: no such file."));
    }
}
