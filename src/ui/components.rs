//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Ui};

use crate::models::RecordId;

/// Status indicator and accent colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);

    pub const SKY: Color32 = Color32::from_rgb(0x0e, 0xa5, 0xe9);
    pub const INDIGO: Color32 = Color32::from_rgb(0x63, 0x66, 0xf1);
    pub const EMERALD: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
    pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
    pub const BLUE: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
    pub const VIOLET: Color32 = Color32::from_rgb(0x7c, 0x3a, 0xed);
    pub const ROSE: Color32 = Color32::from_rgb(0xe1, 0x1d, 0x48);
}

/// Render a titled container with an icon in its header row.
pub fn section(ui: &mut Ui, title: &str, icon: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(12))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).size(18.0));
                ui.label(RichText::new(title).size(18.0).strong());
            });
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(10.0);
            add_contents(ui);
        });
}

/// Render a stat card with title and accented value.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, accent: Color32) {
    egui::Frame::new()
        .fill(ui.style().visuals.faint_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small().weak());
                ui.add_space(4.0);
                ui.label(RichText::new(value).heading().strong().color(accent));
            });
        });
}

/// Labeled single-line text input.
pub fn text_input(ui: &mut Ui, label: &str, value: &mut String, hint: &str) -> Response {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small());
        ui.add(egui::TextEdit::singleline(value).desired_width(180.0).hint_text(hint))
    })
    .inner
}

/// Labeled dropdown over a fixed set of options.
pub fn select<T: PartialEq + Copy>(
    ui: &mut Ui,
    id_salt: &str,
    label: &str,
    value: &mut T,
    options: &[T],
    option_label: impl Fn(&T) -> &'static str,
) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small());
        egui::ComboBox::from_id_salt(id_salt)
            .width(160.0)
            .selected_text(option_label(&*value))
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(value, *option, option_label(option));
                }
            });
    });
}

/// Labeled dropdown over fetched records with an empty placeholder entry.
///
/// Returns `true` when the selection changed.
pub fn record_select<'a>(
    ui: &mut Ui,
    id_salt: &str,
    label: &str,
    placeholder: &str,
    selected: &mut Option<RecordId>,
    options: impl Iterator<Item = (&'a RecordId, &'a str)> + Clone,
) -> bool {
    let before = selected.clone();

    let selected_text = selected
        .as_ref()
        .and_then(|id| options.clone().find(|(option_id, _)| *option_id == id))
        .map(|(_, name)| name.to_string())
        .or_else(|| selected.as_ref().map(|id| id.to_string()))
        .unwrap_or_else(|| placeholder.to_string());

    ui.vertical(|ui| {
        ui.label(RichText::new(label).small());
        egui::ComboBox::from_id_salt(id_salt)
            .width(180.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if ui.selectable_label(selected.is_none(), placeholder).clicked() {
                    *selected = None;
                }
                for (id, name) in options {
                    if ui.selectable_label(selected.as_ref() == Some(id), name).clicked() {
                        *selected = Some(id.clone());
                    }
                }
            });
    });

    *selected != before
}

/// Filled button with a leading icon.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str, fill: Color32, enabled: bool) -> Response {
    let label = RichText::new(format!("{icon}  {text}")).color(Color32::WHITE).size(14.0);
    ui.add_enabled(enabled, egui::Button::new(label).fill(fill).min_size(egui::vec2(0.0, 30.0)))
}

/// Plain button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(format!("{icon}  {text}")).size(14.0)).min_size(egui::vec2(0.0, 30.0)))
}

/// Compact card for one listed record: bold headline, muted tag, detail line.
pub fn record_card(ui: &mut Ui, headline: &str, tag: &str, detail: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.faint_bg_color)
        .stroke(ui.style().visuals.widgets.noninteractive.bg_stroke)
        .inner_margin(Margin::same(12))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_width(320.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(headline).strong());
                if !tag.is_empty() {
                    ui.label(RichText::new(format!("• {tag}")).weak());
                }
            });
            ui.label(RichText::new(detail).small());
        });
}

/// Placeholder line shown for an empty list.
pub fn empty_list(ui: &mut Ui, loading: bool, noun: &str) {
    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Loading...").weak());
        });
    } else {
        ui.label(RichText::new(format!("No {noun} yet")).weak());
    }
}

/// Format an amount with a currency prefix, `-` when the backend left it out.
pub fn money(symbol: &str, amount: Option<f64>) -> String {
    match amount {
        Some(value) => format!("{symbol}{value}"),
        None => "-".to_string(),
    }
}

/// Text or an em dash placeholder for absent values.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "—",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money("₹", Some(12500.0)), "₹12500");
        assert_eq!(money("₹", Some(99.5)), "₹99.5");
        assert_eq!(money("$", Some(0.0)), "$0");
        assert_eq!(money("₹", None), "-");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("ops@acme.com")), "ops@acme.com");
        assert_eq!(or_dash(Some("")), "—");
        assert_eq!(or_dash(None), "—");
    }
}
