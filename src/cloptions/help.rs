//! # Help and Value Rendering
//!
//! Everything here returns a `String`; printing is left to the caller.
//!
//! Help output lists the built-in options and then every parameter in option table
//! order, each as a header line followed by its word-wrapped description:
//!
//! ```text
//! USAGE: planet [options]
//!
//! AVAILABLE OPTIONS:
//!   -h, -help [no argument]
//!                Prints out this help information.
//!   -Mass [double, default=0]
//!                This is the planet's mass (in kg).
//! ```
//!
//! Wrapping never breaks a word. Widths are measured in terminal columns, so wide
//! characters count double.

use crate::param::Category;
use crate::registry::Registry;
use crate::table::{OptionTable, OptionTag};
use console::Style;
use once_cell::sync::Lazy;
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_DESCRIPTION_PAD: usize = 15;
pub const DEFAULT_MAX_WIDTH: usize = 80;
pub const HELP_DESCRIPTION: &str = "Prints out this help information.";

const BANNER: &str = "*****************";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Columns of indentation before each description line.
    pub pad: usize,
    /// A word that would push a line past this column starts a new line.
    pub max_width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            pad: DEFAULT_DESCRIPTION_PAD,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

/// The version option as shown in help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    pub description: String,
    pub text: String,
}

struct HelpStyles {
    heading: Style,
    option: Style,
}

static HELP_STYLES: Lazy<HelpStyles> = Lazy::new(|| HelpStyles {
    heading: Style::new().bold(),
    option: Style::new().cyan(),
});

fn paint(style: &Style, text: &str, use_color: bool) -> String {
    if use_color {
        style.apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Renders the full usage block for `program`.
pub fn render_help(
    program: &str,
    table: &OptionTable,
    registry: &Registry,
    version: Option<&VersionInfo>,
    layout: HelpLayout,
    use_color: bool,
) -> String {
    let styles = &*HELP_STYLES;
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "{} {} [options]\n",
        paint(&styles.heading, "USAGE:", use_color),
        program
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}\n",
        paint(&styles.heading, "AVAILABLE OPTIONS:", use_color)
    ));

    for entry in table.entries() {
        let flags = match entry.short {
            Some(short) => format!("-{}, -{}", short, entry.long),
            None => format!("-{}", entry.long),
        };
        let flags = paint(&styles.option, &flags, use_color);

        match entry.tag {
            OptionTag::Help => {
                output.push_str(&format!("  {} [no argument]\n", flags));
                output.push_str(&wrap_description(HELP_DESCRIPTION, layout));
            }
            OptionTag::Version => {
                let description = version.map(|v| v.description.as_str()).unwrap_or_default();
                output.push_str(&format!("  {} [no argument]\n", flags));
                output.push_str(&wrap_description(description, layout));
            }
            OptionTag::Param(category) => {
                let Some(param) = registry.get(&entry.long) else {
                    continue;
                };
                output.push_str(&format!(
                    "  {} [{}, default={}]\n",
                    flags,
                    category,
                    param.default_value()
                ));
                output.push_str(&wrap_description(param.description(), layout));
            }
        }
    }

    output.push('\n');
    output
}

/// Word-wraps a description, indenting every line by `layout.pad` columns.
///
/// Words are separated by single spaces. The first word of a line is always placed,
/// so a word longer than the line still appears whole. Every line ends in `\n`.
pub fn wrap_description(description: &str, layout: HelpLayout) -> String {
    if description.is_empty() {
        return "\n".to_string();
    }

    let indent = " ".repeat(layout.pad);
    let mut output = String::new();
    let mut current = 0;

    for word in description.split(' ') {
        let width = word.width();
        if current == 0 {
            output.push_str(&indent);
            output.push_str(word);
            current = layout.pad + width + 1;
        } else if current + width > layout.max_width {
            output.push('\n');
            output.push_str(&indent);
            output.push_str(word);
            current = layout.pad + width + 1;
        } else {
            output.push(' ');
            output.push_str(word);
            current += width + 1;
        }
    }

    output.push('\n');
    output
}

/// Dumps current values, one `name value` line per parameter.
///
/// The simple form can be read back as a configuration file, except that a string
/// value containing spaces reloads as its first word only. The detailed form adds
/// a banner per category and the description and default above each value.
pub fn render_values(registry: &Registry, detailed: bool) -> String {
    Category::all()
        .iter()
        .map(|category| render_category(registry, *category, detailed))
        .collect()
}

/// Dumps one category. Empty categories render as nothing, banner included.
pub fn render_category(registry: &Registry, category: Category, detailed: bool) -> String {
    let mut output = String::new();
    let mut params = registry.iter_category(category).peekable();
    if params.peek().is_none() {
        return output;
    }

    if detailed {
        output.push_str(&format!("{}\n  {}\n{}\n", BANNER, category.heading(), BANNER));
    }

    for param in params {
        if detailed {
            output.push_str(&format!("# {}\n", param.description()));
            output.push_str(&format!("# [Default = {}]\n", param.default_value()));
        }
        output.push_str(&format!("{} {}\n", param.name(), param.value()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register("Mass", "This is the planet's mass (in kg).", 0.0.into())
            .unwrap();
        registry.register("n,Name", "", "Earth".into()).unwrap();
        registry.register("Moons", "Number of moons.", 1.into()).unwrap();
        registry.register("Rings", "Has rings?", false.into()).unwrap();
        registry
    }

    #[test]
    fn test_render_help_layout() {
        let registry = registry();
        let table = OptionTable::build(&registry, None);
        let help = render_help("planet", &table, &registry, None, HelpLayout::default(), false);

        let pad = " ".repeat(15);
        let expected = format!(
            "\nUSAGE: planet [options]\n\nAVAILABLE OPTIONS:\n\
             \x20 -h, -help [no argument]\n{pad}Prints out this help information.\n\
             \x20 -Rings [bool, default=0]\n{pad}Has rings?\n\
             \x20 -Mass [double, default=0]\n{pad}This is the planet's mass (in kg).\n\
             \x20 -Moons [int, default=1]\n{pad}Number of moons.\n\
             \x20 -n, -Name [string, default=Earth]\n{pad}No description for Name.\n\n",
            pad = pad
        );
        assert_eq!(help, expected);
    }

    #[test]
    fn test_render_help_includes_version() {
        let registry = registry();
        let table = OptionTable::build(&registry, Some("version"));
        let version = VersionInfo {
            name: "version".into(),
            description: "Print version information and exit.".into(),
            text: "planet v1".into(),
        };
        let help = render_help(
            "planet",
            &table,
            &registry,
            Some(&version),
            HelpLayout::default(),
            false,
        );
        assert!(help.contains("  -version [no argument]\n"));
        assert!(help.contains("Print version information and exit."));
    }

    #[test]
    fn test_render_help_is_repeatable() {
        let registry = registry();
        let table = OptionTable::build(&registry, None);
        let first = render_help("p", &table, &registry, None, HelpLayout::default(), false);
        let second = render_help("p", &table, &registry, None, HelpLayout::default(), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let layout = HelpLayout::default();
        assert_eq!(wrap_description("Short text.", layout), format!("{}Short text.\n", " ".repeat(15)));
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let layout = HelpLayout {
            pad: 2,
            max_width: 12,
        };
        // the running count is 12 after "bbbb", so "cccc" starts a new line
        assert_eq!(
            wrap_description("aaaa bbbb cccc", layout),
            "  aaaa bbbb\n  cccc\n"
        );
    }

    #[test]
    fn test_wrap_lines_respect_max_width() {
        let layout = HelpLayout::default();
        let text = "Check your proxy settings or contact your network administrator to make sure \
                    the proxy server is working and that it accepts connections from this host.";
        let wrapped = wrap_description(text, layout);
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.width() <= layout.max_width, "too wide: {:?}", line);
            assert!(line.starts_with(&" ".repeat(15)));
        }
        let words: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(words, text.split(' ').collect::<Vec<_>>());
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        let layout = HelpLayout {
            pad: 4,
            max_width: 10,
        };
        assert_eq!(
            wrap_description("tiny extraordinarily tiny", layout),
            "    tiny\n    extraordinarily\n    tiny\n"
        );
    }

    #[test]
    fn test_wrap_counts_display_columns() {
        let layout = HelpLayout {
            pad: 0,
            max_width: 6,
        };
        // each ideograph is two columns wide
        assert_eq!(wrap_description("日本 語語", layout), "日本\n語語\n");
    }

    #[test]
    fn test_wrap_empty_description() {
        assert_eq!(wrap_description("", HelpLayout::default()), "\n");
    }

    #[test]
    fn test_render_values_simple() {
        let mut registry = registry();
        registry.set("Moons", "2").unwrap();
        assert_eq!(
            render_values(&registry, false),
            "Rings 0\nMass 0\nMoons 2\nName Earth\n"
        );
    }

    #[test]
    fn test_render_values_detailed() {
        let registry = registry();
        let text = render_values(&registry, true);
        assert!(text.starts_with("*****************\n  BOOLEANS\n*****************\n# Has rings?\n# [Default = 0]\nRings 0\n"));
        assert!(text.contains("  INTEGERS\n"));
        assert!(text.contains("# No description for Name.\n# [Default = Earth]\nName Earth\n"));
    }

    #[test]
    fn test_render_values_skips_empty_categories() {
        let mut registry = Registry::new();
        registry.register("Only", "", 1.into()).unwrap();
        let text = render_values(&registry, true);
        assert!(!text.contains("BOOLEANS"));
        assert!(text.contains("INTEGERS"));
    }

    #[test]
    fn test_render_single_category() {
        let registry = registry();
        assert_eq!(render_category(&registry, Category::Int, false), "Moons 1\n");
        assert_eq!(render_category(&Registry::new(), Category::Int, true), "");
    }
}
