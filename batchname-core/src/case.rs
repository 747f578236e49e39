use serde::{Deserialize, Serialize};

/// Case conversions applied to the stem of a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    Upper,
    Lower,
    /// Capitalize each whitespace separated word and join with single spaces
    Title,
    Camel,
    Pascal,
    Snake,
    Kebab,
}

/// Split a file name into stem and extension.
///
/// The extension starts at the last `.`, unless everything before that dot is
/// itself dots: `.bashrc` has no extension, `file.` has the extension `.`.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].bytes().any(|b| b != b'.') => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    }
}

/// Convert the stem of `name` and re-attach its extension unchanged.
pub fn convert_case(name: &str, mode: CaseMode) -> String {
    let (stem, ext) = split_extension(name);

    let new_stem = match mode {
        CaseMode::Upper => stem.to_uppercase(),
        CaseMode::Lower => stem.to_lowercase(),
        CaseMode::Title => stem
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        CaseMode::Camel => convert_identifier_style(stem, to_camel),
        CaseMode::Pascal => convert_identifier_style(stem, |tokens| {
            tokens.iter().map(|t| capitalize(t)).collect()
        }),
        CaseMode::Snake => convert_identifier_style(stem, |tokens| join_lower(tokens, "_")),
        CaseMode::Kebab => convert_identifier_style(stem, |tokens| join_lower(tokens, "-")),
    };

    format!("{}{}", new_stem, ext)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        },
        None => String::new(),
    }
}

fn convert_identifier_style(stem: &str, join: impl Fn(&[String]) -> String) -> String {
    // Leading dots mark hidden files and survive the conversion
    let body = stem.trim_start_matches('.');
    let dots = &stem[..stem.len() - body.len()];

    let tokens = tokenize(body);
    if tokens.is_empty() {
        return stem.to_string();
    }

    format!("{}{}", dots, join(&tokens))
}

fn to_camel(tokens: &[String]) -> String {
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| if i == 0 { t.to_lowercase() } else { capitalize(t) })
        .collect()
}

fn join_lower(tokens: &[String], separator: &str) -> String {
    tokens
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split a stem into words on separators and case transitions.
///
/// `HTTPServer_log-file` becomes `HTTP`, `Server`, `log`, `file`.
fn tokenize(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // fooBar, foo2Bar, and the last capital of an acronym in HTTPServer
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower)
            {
                tokens.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("..hidden"), ("..hidden", ""));
        assert_eq!(split_extension(".config.toml"), (".config", ".toml"));
        assert_eq!(split_extension("file."), ("file", "."));
    }

    #[test]
    fn test_upper_and_lower_keep_extension() {
        assert_eq!(convert_case("My Photo.JPG", CaseMode::Upper), "MY PHOTO.JPG");
        assert_eq!(convert_case("My Photo.JPG", CaseMode::Lower), "my photo.JPG");
        assert_eq!(convert_case("straße.txt", CaseMode::Upper), "STRASSE.txt");
    }

    #[test]
    fn test_title_case_collapses_whitespace() {
        assert_eq!(
            convert_case("my  holiday   PHOTOS.png", CaseMode::Title),
            "My Holiday Photos.png"
        );
        assert_eq!(convert_case("notes.txt", CaseMode::Title), "Notes.txt");
    }

    #[test]
    fn test_title_case_of_blank_stem() {
        assert_eq!(convert_case("   .txt", CaseMode::Title), ".txt");
    }

    #[test]
    fn test_identifier_styles() {
        let name = "quarterly report_final-v2.xlsx";
        assert_eq!(convert_case(name, CaseMode::Camel), "quarterlyReportFinalV2.xlsx");
        assert_eq!(convert_case(name, CaseMode::Pascal), "QuarterlyReportFinalV2.xlsx");
        assert_eq!(convert_case(name, CaseMode::Snake), "quarterly_report_final_v2.xlsx");
        assert_eq!(convert_case(name, CaseMode::Kebab), "quarterly-report-final-v2.xlsx");
    }

    #[test]
    fn test_tokenize_case_transitions() {
        assert_eq!(tokenize("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(tokenize("myFileName"), vec!["my", "File", "Name"]);
        assert_eq!(tokenize("page2Draft"), vec!["page2", "Draft"]);
        assert_eq!(tokenize("__a__b__"), vec!["a", "b"]);
    }

    #[test]
    fn test_hidden_file_keeps_leading_dot() {
        assert_eq!(convert_case(".my config", CaseMode::Snake), ".my_config");
        assert_eq!(convert_case(".env", CaseMode::Pascal), ".Env");
    }

    #[test]
    fn test_stem_without_words_is_unchanged() {
        assert_eq!(convert_case("___.txt", CaseMode::Camel), "___.txt");
    }
}
