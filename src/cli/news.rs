use super::ui;
use crate::core::news::{NewsCategory, NewsItem};

/// Renders the headline list under the category banner.
pub fn display(category: &NewsCategory, items: &[NewsItem]) -> String {
    let mut output = format!(
        "{}  {}\n\n",
        category.icon(),
        ui::style_text(&format!("{} News", category.title()), ui::StyleType::Title)
    );

    if items.is_empty() {
        output.push_str(&ui::style_text("No headlines available", ui::StyleType::Subtle));
        output.push('\n');
        return output;
    }

    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {}\n",
            i + 1,
            ui::style_text(&item.title, ui::StyleType::Value)
        ));
        let description = if item.description.is_empty() {
            String::new()
        } else {
            format!(" — {}...", item.description)
        };
        output.push_str(&format!("    {}{}\n", item.source, description));
        output.push_str(&format!(
            "    {}\n",
            ui::style_text(&item.url, ui::StyleType::Subtle)
        ));
        if i < items.len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            source: "Reuters".to_string(),
            description: description.to_string(),
            url: format!("https://example.com/{title}"),
        }
    }

    #[test]
    fn test_display_items() {
        let items = vec![item("first", "Markets rallied"), item("second", "")];
        let output = display(&NewsCategory::Business, &items);
        assert!(output.starts_with("💼"));
        assert!(output.contains("Business News"));
        assert!(output.contains(" 1. "));
        assert!(output.contains("Reuters — Markets rallied..."));
        assert!(output.contains("https://example.com/second"));
        assert!(!output.contains("Reuters — ..."));
    }

    #[test]
    fn test_display_unknown_category_uses_default_icon() {
        let category = NewsCategory::Other("gardening".to_string());
        let output = display(&category, &[]);
        assert!(output.starts_with("📰"));
        assert!(output.contains("Gardening News"));
        assert!(output.contains("No headlines available"));
    }
}
