use mneme_lib::scheduler::DueStatus;
use regex::Regex;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const STRIKETHROUGH: &str = "\x1b[9m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Badge text for a topic's due classification
pub fn due_badge(status: DueStatus, use_color: bool) -> String {
    let (label, color) = match status {
        DueStatus::Overdue => ("overdue", Color::RED),
        DueStatus::DueToday => ("due today", Color::YELLOW),
        DueStatus::Upcoming => ("upcoming", Color::GREEN),
    };

    if use_color {
        format!("{}{}{}", color, label, Color::RESET)
    } else {
        label.to_string()
    }
}

/// Render a markdown body to terminal text
pub fn render_markdown(content: &str, use_color: bool) -> String {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for line in content.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            if use_color {
                lines.push(format!("{}{}{}", Color::CYAN, line, Color::RESET));
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        if in_code_block {
            if use_color {
                lines.push(format!("{}{}{}", Color::CYAN, line, Color::RESET));
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        if trimmed.starts_with('#') {
            lines.push(render_heading(line, use_color));
        } else if trimmed.starts_with("> ") || trimmed == ">" {
            lines.push(render_quote_line(line, use_color));
        } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            lines.push(render_bullet_line(line, use_color));
        } else if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            // Wrap before styling so ANSI codes do not skew the width
            for wrapped in wrap_lines(line, "", 80) {
                lines.push(style_inline(&wrapped, use_color));
            }
        }
    }

    // Remove trailing blank lines
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn render_heading(line: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", Color::BOLD, line.trim_start(), Color::RESET)
    } else {
        line.trim_start().to_string()
    }
}

fn render_quote_line(line: &str, use_color: bool) -> String {
    let text = line.trim_start().trim_start_matches('>').trim_start();
    if use_color {
        format!("{}\u{2502} {}{}", Color::DIM, text, Color::RESET)
    } else {
        format!("> {}", text)
    }
}

fn render_bullet_line(line: &str, use_color: bool) -> String {
    let indent_len = line.len() - line.trim_start().len();
    let indent = &line[..indent_len];
    let text = style_inline(&line.trim_start()[2..], use_color);
    format!("{}\u{2022} {}", indent, text)
}

/// Apply inline markdown emphasis as ANSI styling
fn style_inline(text: &str, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }

    let bold_re = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let text = bold_re
        .replace_all(text, format!("{}$1{}", Color::BOLD, Color::RESET))
        .to_string();

    let code_re = Regex::new(r"`([^`]+)`").unwrap();
    code_re
        .replace_all(&text, format!("{}$1{}", Color::CYAN, Color::RESET))
        .to_string()
}

/// Simple word-wrapping for terminal output
fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.len() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            // Simple word wrap
            let words: Vec<&str> = line.split_whitespace().collect();
            let mut current_line = String::new();
            for word in words {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.len() + 1 + word.len() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    if lines.is_empty() && !text.is_empty() {
        lines.push(format!("{}{}", prefix, text));
    }

    lines
}
