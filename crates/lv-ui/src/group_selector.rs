//! Country-group dropdown

use egui::{ComboBox, Ui};
use lv_core::{FilterChange, InteractionSink};

/// Names up to this length without underscores are treated as acronyms
const ACRONYM_MAX_LEN: usize = 5;

/// Human-readable name of a group column: `oecd` becomes `OECD`, `north_america` becomes `North America`
pub fn display_group_name(column: &str) -> String {
    if column.len() <= ACRONYM_MAX_LEN && !column.contains('_') {
        return column.to_uppercase();
    }
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The `country-selector` dropdown.
///
/// Picking a different group reports it to `sink`; returns whether it did.
pub fn group_selector(ui: &mut Ui, groups: &[String], selected: &str, sink: &dyn InteractionSink) -> bool {
    let mut choice = selected.to_string();

    ui.label("Country group:");
    ComboBox::from_id_source("country-selector")
        .selected_text(display_group_name(selected))
        .show_ui(ui, |ui| {
            for group in groups {
                ui.selectable_value(&mut choice, group.clone(), display_group_name(group));
            }
        });

    if choice != selected {
        tracing::debug!("Group selected: {choice}");
        sink.on_filter_changed(FilterChange::SelectGroup(choice));
        true
    } else {
        false
    }
}
