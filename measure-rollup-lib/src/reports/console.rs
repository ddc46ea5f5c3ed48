use super::{ReportableComponent, common};
use crate::Result;
use crate::component::ComponentType;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

pub fn generate<W: Write>(components: &[ReportableComponent], use_colors: bool, writer: &mut W) -> Result<()> {
    let term_width = get_terminal_width();

    for component in components {
        let indent = "  ".repeat(component.depth);
        let type_str = component.component_type.to_string();

        if use_colors {
            let colored_type = if component.component_type == ComponentType::ProjectView {
                type_str.dimmed().to_string()
            } else {
                type_str.cyan().to_string()
            };
            writeln!(writer, "{indent}{} {}", component.key.bold(), colored_type)?;
        } else {
            writeln!(writer, "{indent}{} {type_str}", component.key)?;
        }

        // Compute max metric name length for alignment
        let max_name_len = component
            .measures
            .iter()
            .map(|m| m.metric_key.len())
            .max()
            .unwrap_or(0);

        // Indent for measure lines: indent + "  " (2) + metric key + " : " (3)
        let value_indent = indent.len() + 2 + max_name_len + 3;

        for measure in &component.measures {
            let mut formatted_value = common::format_measure_value(&measure.measure, measure.value_type);
            if let Some(variations) = measure.measure.variations() {
                let formatted_variations = common::format_variations(variations);
                formatted_value = if formatted_value.is_empty() {
                    format!("[{formatted_variations}]")
                } else {
                    format!("{formatted_value} [{formatted_variations}]")
                };
            }

            let wrapped_lines = wrap_text(&formatted_value, term_width, value_indent);
            if let Some(first_line) = wrapped_lines.first() {
                let name = format!("{:<width$}", measure.metric_key, width = max_name_len);
                if use_colors {
                    writeln!(writer, "{indent}  {} : {}", name.green(), first_line)?;
                } else {
                    writeln!(writer, "{indent}  {name} : {first_line}")?;
                }

                for line in wrapped_lines.iter().skip(1) {
                    writeln!(writer, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

/// Word-wrap text to fit within a given width, with indentation for continuation lines
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut is_first_line = true;

    for word in text.split_whitespace() {
        let separator_len = usize::from(!current_line.is_empty());

        // the first line starts after the metric name, so every line begins at `indent`
        let line_width = indent + current_line.len();

        if !current_line.is_empty() && line_width + separator_len + word.len() > width {
            if is_first_line {
                lines.push(current_line);
                is_first_line = false;
            } else {
                lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
            }
            current_line = word.to_string();
        } else {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        if is_first_line {
            lines.push(current_line);
        } else {
            lines.push(format!("{:indent$}{}", "", current_line, indent = indent));
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
