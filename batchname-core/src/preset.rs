use crate::case::{convert_case, CaseMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("The '{preset}' preset needs {what}")]
    MissingInput { preset: &'static str, what: &'static str },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("Unknown preset '{0}'. Run `batchname presets` to list the available presets")]
    UnknownPreset(String),
}

/// Named renaming options offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    SpacesToUnderscores,
    SpacesToHyphens,
    RemoveNumbers,
    RemoveSpecialCharacters,
    NumbersOnly,
    AddPrefix,
    AddSuffix,
    RemoveExtraSpaces,
    CollapseSpaces,
    Lowercase,
    Uppercase,
    TitleCase,
    CamelCase,
    PascalCase,
    SnakeCase,
    KebabCase,
    RemoveText,
    ReplaceText,
    Custom,
}

/// Which user inputs a preset consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetInputs {
    None,
    Text,
    TextAndReplacement,
    PatternAndReplacement,
}

impl Preset {
    pub fn all() -> &'static [Self] {
        &[
            Self::SpacesToUnderscores,
            Self::SpacesToHyphens,
            Self::RemoveNumbers,
            Self::RemoveSpecialCharacters,
            Self::NumbersOnly,
            Self::AddPrefix,
            Self::AddSuffix,
            Self::RemoveExtraSpaces,
            Self::CollapseSpaces,
            Self::Lowercase,
            Self::Uppercase,
            Self::TitleCase,
            Self::CamelCase,
            Self::PascalCase,
            Self::SnakeCase,
            Self::KebabCase,
            Self::RemoveText,
            Self::ReplaceText,
            Self::Custom,
        ]
    }

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::SpacesToUnderscores => "spaces-to-underscores",
            Self::SpacesToHyphens => "spaces-to-hyphens",
            Self::RemoveNumbers => "remove-numbers",
            Self::RemoveSpecialCharacters => "remove-special-characters",
            Self::NumbersOnly => "numbers-only",
            Self::AddPrefix => "add-prefix",
            Self::AddSuffix => "add-suffix",
            Self::RemoveExtraSpaces => "remove-extra-spaces",
            Self::CollapseSpaces => "collapse-spaces",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::TitleCase => "title-case",
            Self::CamelCase => "camel-case",
            Self::PascalCase => "pascal-case",
            Self::SnakeCase => "snake-case",
            Self::KebabCase => "kebab-case",
            Self::RemoveText => "remove-text",
            Self::ReplaceText => "replace-text",
            Self::Custom => "custom",
        }
    }

    /// Human readable name, also accepted when parsing
    pub fn label(self) -> &'static str {
        match self {
            Self::SpacesToUnderscores => "Replace Spaces with Underscores",
            Self::SpacesToHyphens => "Replace Spaces with Hyphens",
            Self::RemoveNumbers => "Remove Numbers",
            Self::RemoveSpecialCharacters => "Remove Special Characters",
            Self::NumbersOnly => "Extract Numbers Only",
            Self::AddPrefix => "Add Prefix",
            Self::AddSuffix => "Add Suffix Before Extension",
            Self::RemoveExtraSpaces => "Remove Extra Spaces",
            Self::CollapseSpaces => "Collapse Spaces",
            Self::Lowercase => "Convert to Lowercase",
            Self::Uppercase => "Convert to Uppercase",
            Self::TitleCase => "Title Case",
            Self::CamelCase => "camelCase",
            Self::PascalCase => "Pascal Case",
            Self::SnakeCase => "Snake Case",
            Self::KebabCase => "Kebab Case",
            Self::RemoveText => "Remove Text",
            Self::ReplaceText => "Replace Text",
            Self::Custom => "Custom Pattern",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SpacesToUnderscores => "Convert runs of whitespace to an underscore",
            Self::SpacesToHyphens => "Convert runs of whitespace to a hyphen",
            Self::RemoveNumbers => "Delete all numbers from filenames",
            Self::RemoveSpecialCharacters => {
                "Keep only letters, numbers, spaces, dots, hyphens and underscores"
            },
            Self::NumbersOnly => "Keep only numbers (the extension is dropped too)",
            Self::AddPrefix => "Add text at the start",
            Self::AddSuffix => "Insert text before the extension",
            Self::RemoveExtraSpaces => "Delete all whitespace",
            Self::CollapseSpaces => "Replace repeated whitespace with a single space",
            Self::Lowercase => "Make the name lowercase, keeping the extension",
            Self::Uppercase => "Make the name uppercase, keeping the extension",
            Self::TitleCase => "Capitalize Each Word, keeping the extension",
            Self::CamelCase => "Convert the name to camelCase",
            Self::PascalCase => "Convert the name to PascalCase",
            Self::SnakeCase => "Convert the name to snake_case",
            Self::KebabCase => "Convert the name to kebab-case",
            Self::RemoveText => "Remove specific text",
            Self::ReplaceText => "Find and replace text",
            Self::Custom => "Apply your own regular expression",
        }
    }

    pub fn inputs(self) -> PresetInputs {
        match self {
            Self::AddPrefix | Self::AddSuffix | Self::RemoveText => PresetInputs::Text,
            Self::ReplaceText => PresetInputs::TextAndReplacement,
            Self::Custom => PresetInputs::PatternAndReplacement,
            _ => PresetInputs::None,
        }
    }

    /// Prompt for the `--text` value, when the preset takes one
    pub fn input_label(self) -> Option<&'static str> {
        match self {
            Self::AddPrefix => Some("Prefix to add"),
            Self::AddSuffix => Some("Suffix to add"),
            Self::RemoveText => Some("Text to remove"),
            Self::ReplaceText => Some("Text to find"),
            Self::Custom => Some("Regular expression"),
            _ => None,
        }
    }

    /// Older display name still accepted when parsing.
    ///
    /// "Camel Case" used to capitalize each word, which is `title-case` now.
    pub fn legacy_label(self) -> Option<&'static str> {
        match self {
            Self::TitleCase => Some("Camel Case"),
            _ => None,
        }
    }

    /// Presets whose whole purpose is replacing spaces
    pub fn targets_spaces(self) -> bool {
        matches!(self, Self::SpacesToUnderscores | Self::SpacesToHyphens)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| {
                p.name().eq_ignore_ascii_case(wanted)
                    || p.label().eq_ignore_ascii_case(wanted)
                    || p.legacy_label().is_some_and(|l| l.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| RuleError::UnknownPreset(s.to_string()))
    }
}

/// Text supplied by the user alongside a preset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInput {
    /// Prefix, suffix, text to find/remove, or the custom pattern
    pub text: Option<String>,
    /// Replacement for `replace-text` and `custom`
    pub replace_with: Option<String>,
}

impl RuleInput {
    pub fn new(text: Option<String>, replace_with: Option<String>) -> Self {
        Self { text, replace_with }
    }
}

/// A renaming rule, ready to be compiled and applied to file names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Substitute every match of `pattern`; `replacement` uses `${n}` group references
    Regex { pattern: String, replacement: String },
    Case { mode: CaseMode },
}

impl Rule {
    pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    pub fn compile(&self) -> Result<CompiledRule, RuleError> {
        match self {
            Self::Regex {
                pattern,
                replacement,
            } => {
                let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
                    pattern: pattern.clone(),
                    source: Box::new(e),
                })?;
                Ok(CompiledRule::Regex {
                    regex,
                    replacement: replacement.clone(),
                })
            },
            Self::Case { mode } => Ok(CompiledRule::Case(*mode)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex {
                pattern,
                replacement,
            } => write!(f, "s/{}/{}/", pattern, replacement),
            Self::Case { mode } => write!(f, "case: {:?}", mode),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CompiledRule {
    Regex { regex: Regex, replacement: String },
    Case(CaseMode),
}

impl CompiledRule {
    /// Compute the new name for `name`.
    ///
    /// Returns `None` when a regex rule does not match the name at all.
    pub fn apply(&self, name: &str) -> Option<String> {
        match self {
            Self::Regex { regex, replacement } => {
                if !regex.is_match(name) {
                    return None;
                }
                Some(regex.replace_all(name, replacement.as_str()).into_owned())
            },
            Self::Case(mode) => Some(convert_case(name, *mode)),
        }
    }
}

/// Build the rule for `preset` from the user's input.
pub fn build_rule(preset: Preset, input: &RuleInput) -> Result<Rule, RuleError> {
    let rule = match preset {
        Preset::SpacesToUnderscores => Rule::regex(r"\s+", "_"),
        Preset::SpacesToHyphens => Rule::regex(r"\s+", "-"),
        Preset::RemoveNumbers => Rule::regex(r"\d+", ""),
        Preset::RemoveSpecialCharacters => Rule::regex(r"[^a-zA-Z0-9._\-\s]", ""),
        Preset::NumbersOnly => Rule::regex(r"[^\d]", ""),
        Preset::RemoveExtraSpaces => Rule::regex(r"\s+", ""),
        Preset::CollapseSpaces => Rule::regex(r"\s{2,}", " "),
        Preset::AddPrefix => {
            let prefix = required_text(preset, input.text.as_deref(), "a prefix (--text)")?;
            Rule::regex(r"^(.*)$", format!("{}${{1}}", escape_replacement(prefix)))
        },
        Preset::AddSuffix => {
            let suffix = required_text(preset, input.text.as_deref(), "a suffix (--text)")?;
            Rule::regex(
                r"^(.*?)(\.[\w]+)$",
                format!("${{1}}{}${{2}}", escape_replacement(suffix)),
            )
        },
        Preset::RemoveText => {
            let text = required_text(preset, input.text.as_deref(), "the text to remove (--text)")?;
            Rule::regex(regex::escape(text), "")
        },
        Preset::ReplaceText => {
            let text = required_text(preset, input.text.as_deref(), "the text to find (--text)")?;
            let with = input.replace_with.as_deref().map_or("", str::trim);
            Rule::regex(regex::escape(text), escape_replacement(with))
        },
        Preset::Custom => {
            let pattern = input
                .text
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or(RuleError::MissingInput {
                    preset: preset.name(),
                    what: "a regular expression (--pattern)",
                })?;
            let replacement = translate_backreferences(input.replace_with.as_deref().unwrap_or(""));
            Rule::regex(pattern, replacement)
        },
        Preset::Lowercase => Rule::Case { mode: CaseMode::Lower },
        Preset::Uppercase => Rule::Case { mode: CaseMode::Upper },
        Preset::TitleCase => Rule::Case { mode: CaseMode::Title },
        Preset::CamelCase => Rule::Case { mode: CaseMode::Camel },
        Preset::PascalCase => Rule::Case { mode: CaseMode::Pascal },
        Preset::SnakeCase => Rule::Case { mode: CaseMode::Snake },
        Preset::KebabCase => Rule::Case { mode: CaseMode::Kebab },
    };

    // Surface bad custom patterns here rather than at plan time
    rule.compile()?;
    Ok(rule)
}

fn required_text<'a>(
    preset: Preset,
    text: Option<&'a str>,
    what: &'static str,
) -> Result<&'a str, RuleError> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(RuleError::MissingInput {
            preset: preset.name(),
            what,
        })
}

/// Make user text literal inside a regex replacement string
fn escape_replacement(text: &str) -> String {
    text.replace('$', "$$")
}

/// Accept `\1` style group references in custom replacements
fn translate_backreferences(replacement: &str) -> String {
    let mut translated = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek().is_some_and(char::is_ascii_digit) {
            translated.push_str("${");
            while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                translated.push(digit);
            }
            translated.push('}');
        } else {
            translated.push(c);
        }
    }

    translated
}

/// A worked regex example shown to users
#[derive(Debug, Clone, Serialize)]
pub struct Example {
    pub title: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub before: &'static str,
    pub after: &'static str,
}

/// Common custom patterns, usable with the `custom` preset
pub fn examples() -> Vec<Example> {
    vec![
        Example {
            title: "Replace 'old' with 'new'",
            pattern: "old",
            replacement: "new",
            before: "file_old.txt",
            after: "file_new.txt",
        },
        Example {
            title: "Remove 'backup_' prefix",
            pattern: "^backup_",
            replacement: "",
            before: "backup_photo.jpg",
            after: "photo.jpg",
        },
        Example {
            title: "Add '_final' before extension",
            pattern: r"^(.*)(\.\w+)$",
            replacement: "${1}_final${2}",
            before: "document.pdf",
            after: "document_final.pdf",
        },
        Example {
            title: "Rearrange date (2024-01-15 -> 15-01-2024)",
            pattern: r"(\d{4})-(\d{2})-(\d{2})",
            replacement: "${3}-${2}-${1}",
            before: "2024-01-15.txt",
            after: "15-01-2024.txt",
        },
        Example {
            title: "Capture numbers in brackets",
            pattern: r"(\d+)",
            replacement: "[${1}]",
            before: "photo123.jpg",
            after: "photo[123].jpg",
        },
    ]
}
