use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mobility_core::CohortSummary;
use mobility_model::{CareerCategory, RunStats};

use mobility_cli::types::{EnrichReport, OutputFile, RunReport};

pub fn print_summary(report: &RunReport, tail: usize) {
    print_outputs(&report.outputs);
    print_stats_table(&report.stats);
    if report.cohorts.is_some() {
        print_distribution_table(&report.stats);
    }
    if let Some(cohorts) = &report.cohorts {
        print_cohort_tail(cohorts, tail);
    }
}

pub fn print_enrich_summary(report: &EnrichReport) {
    print_outputs(&report.outputs);
    let stats = &report.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Enrichment"), header_cell("Authors")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Sequences enriched", stats.total),
        ("Profiles found", stats.profiles_found),
        ("Registry searches answered", stats.successful_searches),
        ("Potential thesis matches", stats.potential_matches),
        ("Author-role matches", stats.confident_matches),
        ("Origin starters with a thesis", stats.origin_starters_with_thesis),
        ("Ever in origin", stats.ever_in_origin),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Lookup failures"),
        count_cell(Some(stats.lookup_failures), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Unreadable sequence rows"),
        count_cell(Some(report.skipped_rows), Color::Yellow),
    ]);
    println!("{table}");
}

fn print_outputs(outputs: &[OutputFile]) {
    for output in outputs {
        println!("{}: {}", output.label, output.path.display());
    }
}

fn print_stats_table(stats: &RunStats) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Run"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if stats.total_rows > 0 || stats.rejected_rows > 0 {
        table.add_row(vec![Cell::new("Input rows"), Cell::new(stats.total_rows)]);
        table.add_row(vec![
            Cell::new("Rejected rows"),
            count_cell(Some(stats.rejected_rows), Color::Yellow),
        ]);
        for (reason, count) in &stats.rejections_by_reason {
            table.add_row(vec![
                dim_cell(format!("  {reason}")),
                count_cell(Some(*count), Color::Yellow),
            ]);
        }
    }
    table.add_row(vec![Cell::new("Authors"), Cell::new(stats.authors)]);
    table.add_row(vec![
        Cell::new("Origin starters"),
        Cell::new(stats.origin_authors),
    ]);
    table.add_row(vec![
        Cell::new("At or before floor year"),
        count_cell(Some(stats.below_floor_authors), Color::DarkYellow),
    ]);
    println!("{table}");
}

fn print_distribution_table(stats: &RunStats) {
    let total = stats.classified_authors();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Authors"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for category in CareerCategory::ALL {
        let count = stats
            .category_distribution
            .get(&category)
            .copied()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(category.label()),
            count_cell(Some(count), Color::Green),
            share_cell(count, total),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!();
    println!("Category distribution:");
    println!("{table}");
}

fn print_cohort_tail(cohorts: &CohortSummary, tail: usize) {
    let buckets = cohorts.tail(tail);
    if buckets.is_empty() {
        println!();
        println!("No cohorts after {}.", cohorts.floor_year);
        return;
    }
    let mut header = vec![header_cell("Start year")];
    header.extend(
        CareerCategory::ALL
            .into_iter()
            .map(|category| header_cell(category.label())),
    );
    header.push(header_cell("Total"));
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=CareerCategory::ALL.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for bucket in buckets {
        let mut row = vec![Cell::new(bucket.start_year)];
        row.extend(
            CareerCategory::ALL
                .into_iter()
                .map(|category| count_cell(Some(bucket.count(category)), Color::Green)),
        );
        row.push(Cell::new(bucket.total()).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    println!();
    println!("Most recent cohorts (start year > {}):", cohorts.floor_year);
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(count: Option<u64>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn share_cell(count: u64, total: u64) -> Cell {
    if total == 0 {
        return dim_cell("-");
    }
    Cell::new(format!("{:.1}%", count as f64 / total as f64 * 100.0))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
