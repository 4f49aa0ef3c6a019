//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use flock_core::{render_fields, FormDefinition, RenderedField, Widget};
use unicode_width::UnicodeWidthStr;

/// Print forms as a table.
pub fn print_forms_table(forms: &[FormDefinition]) {
    if forms.is_empty() {
        println!("{}", "No forms configured.".dimmed());
        return;
    }

    println!(
        "{} {} {} {}",
        pad_right("Key", 26),
        pad_right("Title", 26),
        pad_right("Resource", 30),
        "Fields"
    );
    println!("{}", "─".repeat(term_width().min(90)));

    for form in forms {
        println!(
            "{} {} {} {}",
            pad_right(&truncate_visual(&form.key, 26), 26).cyan(),
            pad_right(&truncate_visual(&form.title, 26), 26),
            pad_right(&truncate_visual(&form.resource, 30), 30).dimmed(),
            form.fields.len()
        );
    }

    println!();
    println!("{} form(s) total", forms.len());
}

/// Print one form with its resolved widgets.
pub fn print_form(form: &FormDefinition) {
    println!("{} {}", form.title.cyan().bold(), format!("({})", form.key).dimmed());
    println!("{}: {}", "Resource".bold(), form.resource);
    println!("{}: {}", "Id field".bold(), form.id_field);
    println!();

    let fields = render_fields(&form.fields);
    if fields.is_empty() {
        println!("{}", "No fields.".dimmed());
        return;
    }

    for field in &fields {
        print_field(field);
    }
}

fn print_field(field: &RenderedField) {
    let marker = if field.required { "*".red() } else { " ".normal() };
    println!(
        "  {}{} {} {}",
        pad_right(&field.name, 20),
        marker,
        widget_label(&field.widget),
        field.label.dimmed()
    );

    match &field.widget {
        Widget::Select { options } | Widget::RemoteSelect { seed: options, .. } => {
            for option in options {
                println!("      {} {}", option.value.dimmed(), option.label);
            }
        }
        _ => {}
    }
    if let Widget::RemoteSelect {
        endpoint: Some(endpoint),
        ..
    } = &field.widget
    {
        println!("      {} {}", "from".dimmed(), endpoint);
    }
}

fn widget_label(widget: &Widget) -> ColoredString {
    let label = match widget {
        Widget::Input { input_type } => format!("input[{}]", input_type),
        other => other.kind_name().to_string(),
    };
    let padded = pad_right(&label, 16);
    match widget {
        Widget::Input { .. } => padded.normal(),
        Widget::DatePicker => padded.blue(),
        Widget::TextArea => padded.normal(),
        Widget::Select { .. } => padded.yellow(),
        Widget::RemoteSelect { .. } => padded.magenta(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
