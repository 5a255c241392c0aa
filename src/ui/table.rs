use crate::storage::CatalogStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: impl ToString) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &CatalogStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Skills", stats.skills);
    builder.add_row("Categories", stats.categories);
    builder.add_row("Sources", stats.sources);
    builder.add_row("Platforms", stats.platforms);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_stats_table_lists_metrics() {
        let stats = CatalogStats { skills: 12, categories: 3, sources: 2, platforms: 4 };
        let table = stats_table(&stats);
        assert!(table.contains("Metric"));
        assert!(table.contains("Categories"));
        assert!(table.contains("12"));
    }
}
