use csvtint::scan::StyleCategory;
use csvtint::theme::{Color, Theme, BUILTIN_THEMES, DEFAULT_DARK_YAML, DEFAULT_LIGHT_YAML};

const MINIMAL_YAML: &str = r##"
version: 1
name: "Minimal"
csv:
  foreground: "#EEEEEE"
  delimiter: "#FF00FF"
  quote: "#00FF00"
"##;

#[test]
fn test_color_from_hex() {
    let color = Color::from_hex("#1E90FF").unwrap();
    assert_eq!(color, Color::rgb(0x1E, 0x90, 0xFF));
}

#[test]
fn test_color_from_hex_without_hash() {
    assert_eq!(Color::from_hex("a31515").unwrap(), Color::rgb(0xA3, 0x15, 0x15));
}

#[test]
fn test_color_from_hex_rejects_bad_input() {
    assert!(Color::from_hex("#FFF").is_err());
    assert!(Color::from_hex("#GG0000").is_err());
    assert!(Color::from_hex("#1E1E1E80").is_err());
    assert!(Color::from_hex("#ééé").is_err());
}

#[test]
fn test_color_to_hex() {
    assert_eq!(Color::rgb(0xA3, 0x15, 0x15).to_hex(), "#A31515");
}

#[test]
fn test_default_theme() {
    let theme = Theme::default_dark();
    assert_eq!(theme.name, "Default Dark");
    assert_eq!(theme.csv.background, Some(Color::rgb(0x1E, 0x1E, 0x1E)));
    assert_eq!(Theme::default(), theme);
}

#[test]
fn test_default_dark_yaml_parses() {
    let theme = Theme::from_yaml(DEFAULT_DARK_YAML).unwrap();
    assert_eq!(theme.name, "Default Dark");
}

#[test]
fn test_default_light_matches_classic_colors() {
    let theme = Theme::from_yaml(DEFAULT_LIGHT_YAML).unwrap();
    assert_eq!(theme.name, "Default Light");
    assert_eq!(theme.csv.delimiter, Color::rgb(0, 0, 0xFF));
    assert_eq!(theme.csv.quote, Color::rgb(0xA3, 0x15, 0x15));
    // No quoted_content or control entry in the file
    assert_eq!(theme.csv.quoted_content, theme.csv.quote);
    assert_eq!(theme.csv.control, theme.csv.whitespace);
}

#[test]
fn test_from_builtin() {
    let theme = Theme::from_builtin("default-light").unwrap();
    assert_eq!(theme.name, "Default Light");

    let result = Theme::from_builtin("nonexistent");
    assert!(result.is_err());
}

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_yaml(builtin.yaml)
            .unwrap_or_else(|e| panic!("Failed to parse theme '{}': {}", builtin.id, e));
        assert!(
            !theme.name.is_empty(),
            "Theme '{}' has empty name",
            builtin.id
        );
    }
}

#[test]
fn test_optional_colors_fall_back() {
    let theme = Theme::from_yaml(MINIMAL_YAML).unwrap();
    let csv = &theme.csv;

    assert_eq!(csv.background, None);
    assert_eq!(csv.quoted_content, csv.quote);
    assert_eq!(csv.whitespace, Color::rgb(0x80, 0x80, 0x80));
    assert_eq!(csv.line_break, csv.whitespace);
    assert_eq!(csv.control, csv.whitespace);
    assert_eq!(csv.non_printable, Color::rgb(0xFF, 0, 0));
    assert_eq!(csv.comment, csv.foreground);
}

#[test]
fn test_invalid_color_in_theme_is_an_error() {
    let yaml = MINIMAL_YAML.replace("#FF00FF", "purple");
    let err = Theme::from_yaml(&yaml).unwrap_err();
    assert!(err.contains("purple"), "unexpected error: {}", err);
}

#[test]
fn test_missing_required_color_is_an_error() {
    let yaml = MINIMAL_YAML.replace("  delimiter: \"#FF00FF\"\n", "");
    assert!(Theme::from_yaml(&yaml).is_err());
}

#[test]
fn test_color_for_every_category() {
    let theme = Theme::from_yaml(MINIMAL_YAML).unwrap();
    assert_eq!(
        theme.csv.color_for(StyleCategory::Delimiter),
        Color::rgb(0xFF, 0, 0xFF)
    );
    assert_eq!(
        theme.csv.color_for(StyleCategory::PlainContent),
        theme.csv.foreground
    );
    assert_eq!(
        theme.csv.color_for(StyleCategory::QuotedContent),
        theme.csv.quote
    );
}

#[test]
fn test_palette_dedups_shared_colors() {
    let theme = Theme::from_yaml(MINIMAL_YAML).unwrap();
    let palette = theme.palette();

    // foreground, delimiter, quote, gray, red
    assert_eq!(palette.colors().len(), 5);
    assert_eq!(
        palette.slot(StyleCategory::QuoteMark),
        palette.slot(StyleCategory::QuotedContent)
    );
    assert_eq!(
        palette.slot(StyleCategory::Whitespace),
        palette.slot(StyleCategory::LineBreak)
    );
    assert_eq!(
        palette.slot(StyleCategory::Comment),
        palette.slot(StyleCategory::PlainContent)
    );
    assert_ne!(
        palette.slot(StyleCategory::Delimiter),
        palette.slot(StyleCategory::PlainContent)
    );
}

#[test]
fn test_palette_carries_theme_background() {
    let theme = Theme::from_builtin("default-light").unwrap();
    assert_eq!(theme.palette().background(), Some(Color::rgb(0xFF, 0xFF, 0xFF)));

    let minimal = Theme::from_yaml(MINIMAL_YAML).unwrap();
    assert_eq!(minimal.palette().background(), None);
}

#[test]
fn test_palette_colors_follow_first_use() {
    let palette = Theme::from_yaml(MINIMAL_YAML).unwrap().palette();
    // Delimiter is the first category, so it takes slot 0
    assert_eq!(palette.slot(StyleCategory::Delimiter), 0);
    assert_eq!(palette.colors()[0], Color::rgb(0xFF, 0, 0xFF));
    for category in StyleCategory::ALL {
        assert!(palette.slot(category) < palette.colors().len());
    }
}
