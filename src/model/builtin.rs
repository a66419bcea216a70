//! Built-in Conversion Model
//!
//! Renames for the studio, show, hybrid, line and caller-id properties a
//! VX-Prime server reports. Read-only; callers customise through overrides.

use std::sync::LazyLock;

use super::schema::{ConversionModel, ConversionRule};

/// (raw name, canonical name, column labels)
const DEFAULT_RULES: &[(&str, &str, &[&str])] = &[
    ("studio_list", "studioList", &["studioId", "studioName"]),
    ("server_id", "serverId", &[]),
    ("server_version", "serverVersion", &[]),
    ("server_caps", "serverCapabilites", &[]),
    ("lwcp_version", "lwcpVersion", &[]),
    ("id", "studioId", &[]),
    ("name", "studioName", &[]),
    ("show_id", "showId", &[]),
    ("show_name", "showName", &[]),
    ("num_lines", "numberOfLines", &[]),
    ("hybrid_list", "hybridList", &[]),
    ("num_hybrids", "numberOfHybrids", &[]),
    ("num_hyb_fixed", "numberOfFixedHybrids", &[]),
    ("pnext", "producerNext", &[]),
    ("busy_all", "allBusy", &[]),
    ("mute", "muted", &[]),
    ("show_locked", "showLocked", &[]),
    ("auto_answer", "autoAnswerOn", &[]),
    ("show_list", "showList", &["showId", "showName"]),
    (
        "line_list",
        "lineList",
        &[
            "state",
            "callstate",
            "name",
            "local",
            "remote",
            "hybrid",
            "time",
            "comment",
            "direction",
        ],
    ),
    ("caller_id", "callerId", &[]),
    ("list", "list", &["id", "name", "number"]),
];

static BUILTIN: LazyLock<ConversionModel> = LazyLock::new(|| {
    DEFAULT_RULES
        .iter()
        .map(|&(raw, canonical, fields)| {
            let rule = ConversionRule::rename(canonical);
            let rule = if fields.is_empty() {
                rule
            } else {
                rule.with_fields(fields.iter().copied())
            };
            (raw, rule)
        })
        .collect()
});

pub(crate) fn builtin_model() -> &'static ConversionModel {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_loaded() {
        assert_eq!(builtin_model().len(), DEFAULT_RULES.len());
    }

    #[test]
    fn test_line_list_columns() {
        let rule = builtin_model().get("line_list").unwrap();
        assert_eq!(rule.canonical_name.as_deref(), Some("lineList"));
        assert_eq!(rule.field_names.as_ref().map(Vec::len), Some(9));
        assert_eq!(rule.field_names.as_ref().unwrap()[8], "direction");
    }

    #[test]
    fn test_plain_renames_have_no_columns() {
        let rule = builtin_model().get("busy_all").unwrap();
        assert_eq!(rule, &ConversionRule::rename("allBusy"));
    }

    #[test]
    fn test_canonical_names_are_not_raw_names() {
        // `list` maps onto itself; any other overlap would chain renames
        let model = builtin_model();
        for raw in model.raw_names() {
            let target = model.get(raw).unwrap().target_name(raw);
            if target != raw {
                assert!(model.get(target).is_none(), "{raw} renames onto {target}");
            }
        }
    }
}
