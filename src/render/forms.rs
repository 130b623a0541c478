//! `GET` forms. Submitting one navigates to the same page with the fields
//! as query parameters; blank fields are stripped by a redirect.

use crate::api::endpoints::{DiffSelection, StatsFilter};

use super::html::{Html, escape};

fn text_input(name: &str, value: Option<&str>, placeholder: &str, size: Option<u32>) -> Html {
    let size = size.map(|n| format!(" size=\"{n}\"")).unwrap_or_default();
    Html::raw(format!(
        "<input type=\"text\" name=\"{}\" value=\"{}\" placeholder=\"{}\"{size}>",
        escape(name),
        escape(value.unwrap_or_default()),
        escape(placeholder),
    ))
}

fn field(label: &str, control: Html) -> Html {
    let mut out = Html::raw("<dt><label>");
    out.push_text(label);
    out.push_raw("</label></dt><dd>");
    out.push(control);
    out.push_raw("</dd>");
    out
}

fn status_select(selected: Option<&str>) -> Html {
    let selected = selected.unwrap_or_default();
    let mut out = Html::raw("<select name=\"status\">");
    for (value, label) in [("", ""), ("enabled", "enabled"), ("disabled", "disabled")] {
        let mark = if value == selected { " selected" } else { "" };
        out.push_raw(&format!("<option value=\"{value}\"{mark}>{label}</option>"));
    }
    out.push_raw("</select>");
    out
}

fn form(action: &str, fields: Html, buttons: &str) -> Html {
    Html::raw(format!(
        "<form method=\"get\" action=\"{}\"><dl>{fields}</dl>{buttons}</form>",
        escape(action)
    ))
}

/// Filter form of the stat listing.
pub fn stats_filter_form(action: &str, filter: &StatsFilter) -> Html {
    let mut fields = Html::new();
    fields.push(field(
        "Path Prefix:",
        text_input("path_prefix", filter.path_prefix.as_deref(), "data/archives", Some(80)),
    ));
    fields.push(field(
        "Path Partial:",
        text_input("path_partial", filter.path_partial.as_deref(), "", Some(40)),
    ));
    fields.push(field("Status:", status_select(filter.status.as_deref())));
    for (name, label, value) in [
        ("mtime_after", "File Modified After:", &filter.mtime_after),
        ("mtime_before", "File Modified Before:", &filter.mtime_before),
        ("updated_at_after", "Updated After:", &filter.updated_at_after),
        ("updated_at_before", "Updated Before:", &filter.updated_at_before),
    ] {
        fields.push(field(
            label,
            text_input(name, value.as_deref(), "2020-01-01T00:00:00", None),
        ));
    }
    fields.push(field(
        "Limit:",
        text_input("limit", filter.limit.as_deref(), "100", Some(6)),
    ));
    form(action, fields, "<button>Search</button>")
}

/// Two `(group, path prefix)` pairs, an `Up` button and a `Select` button.
///
/// `Up` submits `up=1`; the server answers with both prefixes trimmed by
/// one segment.
pub fn diff_form(action: &str, selection: &DiffSelection) -> Html {
    let side = |group: &Option<String>,
                prefix: &Option<String>,
                group_field: &str,
                prefix_field: &str| {
        let mut control = text_input(group_field, group.as_deref(), "default", None);
        control.push_raw(" / ");
        control.push(text_input(prefix_field, prefix.as_deref(), "data/archives", Some(80)));
        control
    };

    let mut fields = Html::new();
    fields.push(field(
        "Group Name 1 / Path Prefix 1:",
        side(&selection.group_name1, &selection.path_prefix1, "group_name1", "path_prefix1"),
    ));
    fields.push(field(
        "Group Name 2 / Path Prefix 2:",
        side(&selection.group_name2, &selection.path_prefix2, "group_name2", "path_prefix2"),
    ));
    form(
        action,
        fields,
        "<button type=\"submit\" name=\"up\" value=\"1\">Up</button> <button type=\"submit\">Select</button>",
    )
}
