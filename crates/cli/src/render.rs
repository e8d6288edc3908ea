//! Terminal output for list pages, notices and trees.

use colored::Colorize;
use dashboard::{Breadcrumb, Notice, NoticeKind};
use pipeline::Page;
use store::{CategoryNode, CsvExportable, OrderSummary};

const MAX_CELL_WIDTH: usize = 28;

/// Print one page as an aligned table followed by the pager line.
pub fn print_page<T: CsvExportable>(page: &Page<T>, href: &str) {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|item| item.to_csv_row().into_iter().map(|c| truncate(&c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());

    if rows.is_empty() {
        println!("{}", "No matching records".dimmed());
    }
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }

    println!(
        "{} Page {}/{} · {} rows · {} per page{}{}",
        "»".cyan(),
        page.page,
        page.total_pages,
        page.total_items,
        page.page_size,
        if page.has_prev { " · ‹ prev" } else { "" },
        if page.has_next { " · next ›" } else { "" },
    );
    println!("{} {}", "URL:".dimmed(), href);
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut short: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        short.push('…');
        short
    }
}

pub fn print_breadcrumbs(crumbs: &[Breadcrumb]) {
    let trail = crumbs
        .iter()
        .map(|c| match c.href {
            Some(_) => c.label.normal(),
            None => c.label.bold(),
        })
        .map(|label| label.to_string())
        .collect::<Vec<_>>()
        .join(" › ");
    println!("{}", trail);
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("{} {}", "✓".green(), notice.message),
            NoticeKind::Error => eprintln!("{} {}", "✗".red(), notice.message),
        }
    }
}

pub fn print_tree(nodes: &[CategoryNode], depth: usize) {
    for node in nodes {
        println!(
            "{}{} {} {}",
            "  ".repeat(depth),
            "•".green(),
            node.category.name,
            format!("({}, position {})", node.category.id, node.category.position).dimmed()
        );
        print_tree(&node.children, depth + 1);
    }
}

pub fn print_summary(summary: &OrderSummary) {
    println!("{}", "Order Summary:".bold().blue());
    println!("{}Total orders: {}", "• ".green(), summary.total_orders);
    for (status, count) in &summary.by_status {
        println!("  - {}: {}", status, count);
    }
    println!("{}Delivered revenue: {:.2}", "• ".cyan(), summary.revenue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_cells() {
        let long = "x".repeat(40);
        let short = truncate(&long);

        assert_eq!(short.chars().count(), MAX_CELL_WIDTH);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("Espresso"), "Espresso");
    }
}
