//! Console report: crawl results as a table grouped by store.

use crate::domain::ExtractedItem;

const WIDTH: usize = 80;
const NAME_WIDTH: usize = 60;

/// Render the full report. Separated from printing so tests can assert on it.
pub fn render_report(items: &[ExtractedItem], stores: &[&str]) -> String {
    let mut out = String::new();

    if items.is_empty() {
        out.push_str("\nNo products found.\n");
        return out;
    }

    out.push_str(&format!("\n{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("{:^WIDTH$}\n", "EGG PRICE CRAWL RESULTS"));
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("\nTotal products found: {}\n\n", items.len()));

    for store in stores {
        let store_items: Vec<&ExtractedItem> =
            items.iter().filter(|item| item.store == *store).collect();
        if store_items.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
        out.push_str(&format!(
            "{} ({} products)\n",
            store.to_uppercase(),
            store_items.len()
        ));
        out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
        for (i, item) in store_items.iter().enumerate() {
            out.push_str(&format!(
                "{:2}. {:<NAME_WIDTH$} {:>10}\n",
                i + 1,
                truncate_name(&item.item_name),
                item.price
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out
}

pub fn print_report(items: &[ExtractedItem], stores: &[&str]) {
    print!("{}", render_report(items, stores));
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let truncated: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{truncated}...")
    } else {
        name.to_string()
    }
}
